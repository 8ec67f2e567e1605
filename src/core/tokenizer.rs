//! The tokenizer: whitespace segmentation, cached chunk dispatch, affix
//! peeling, and infix splitting.
//!
//! # Algorithm
//!
//! Input text is scanned once, splitting at whitespace transitions into
//! chunks. Every chunk goes through the same path: fingerprint, cache
//! probe, and on a miss the affix machinery:
//!
//! 1. **Peeling** strips regex-matched prefixes and suffixes one layer per
//!    iteration until the remainder stops shrinking. If stripping one side
//!    would leave a special-case string, the loop strips that side alone
//!    and escapes early so the special expansion wins.
//! 2. **Assembly** emits prefixes in order, then the residual (cached
//!    vector, or one lexeme, or three lexemes around a single infix
//!    split), then the suffixes in reverse.
//! 3. The finished lexeme vector is written back to the cache under the
//!    chunk's original fingerprint.
//!
//! Special-case expansions are preseeded into the cache at construction,
//! so a chunk that exactly matches a rule never reaches the affix
//! machinery.
//!
//! # Concurrency
//!
//! One tokenizer processes one input at a time; `tokenize` takes `&mut
//! self` because it appends to the lexicon and the cache. Parallel
//! deployments hold a tokenizer per thread or serialize calls externally.

use rustc_hash::FxHashMap;
use thiserror::Error;
use tracing::debug;

use super::fingerprint::{fingerprint, StringView};
use super::lexicon::{LexemeId, Lexicon, LexiconError};
use super::presets;
use super::rules::{LanguageData, RuleSet};
use super::tokens::Tokens;

#[derive(Error, Debug)]
pub enum TokenizerError {
    #[error("Regex compilation error: {0}")]
    Regex(#[from] regex::Error),
    #[error("Lexicon error: {0}")]
    Lexicon(#[from] LexiconError),
}

/// Chunk-level tokenizer with a fingerprint-keyed result cache.
///
/// Owns the lexicon (and through it the string store), the compiled rule
/// set, and the cache. The cache maps a chunk fingerprint to the exact
/// lexeme sequence the chunk tokenizes to; entries are added on first
/// sight and never evicted, so any chunk is tokenized at most once per
/// tokenizer.
pub struct Tokenizer {
    lexicon: Lexicon,
    rules: RuleSet,
    cache: FxHashMap<u64, Vec<LexemeId>>,
}

impl Tokenizer {
    /// Build a tokenizer from per-language rule data.
    ///
    /// Seeds the lexicon with the supplied lexeme payloads, compiles the
    /// affix patterns, and preseeds every special-case rule into both the
    /// special table and the chunk cache.
    pub fn new(data: LanguageData) -> Result<Self, TokenizerError> {
        let mut lexicon = Lexicon::new();
        for (surface, payload) in &data.lexemes {
            lexicon.set(surface, *payload);
        }

        let mut rules = RuleSet::compile(
            data.prefix.as_deref(),
            data.suffix.as_deref(),
            data.infix.as_deref(),
        )?;

        let mut cache = FxHashMap::default();
        for (chunk, expansion) in &data.rules {
            let ids: Vec<LexemeId> = expansion.iter().map(|s| lexicon.get(s)).collect();
            let fp = fingerprint(chunk);
            rules.add_special(fp, ids.clone());
            cache.insert(fp, ids);
        }

        debug!(
            specials = rules.special_count(),
            lexemes = lexicon.len(),
            "tokenizer ready"
        );
        Ok(Self {
            lexicon,
            rules,
            cache,
        })
    }

    /// A tokenizer with the built-in English rule set.
    pub fn english() -> Result<Self, TokenizerError> {
        Self::new(presets::english())
    }

    /// Tokenize `text` into a sequence of lexeme occurrences.
    ///
    /// Scans for whitespace transitions and routes each chunk through the
    /// cache. Exactly one literal space is consumed at each word-to-space
    /// transition and recorded as a trailing-space flag on the token
    /// before it; all other whitespace becomes whitespace tokens.
    pub fn tokenize(&mut self, text: &str) -> Tokens {
        let mut out = Tokens::new();
        let Some(first) = text.chars().next() else {
            return out;
        };

        let mut in_ws = first.is_whitespace();
        let mut start = 0;
        for (i, ch) in text.char_indices() {
            if ch.is_whitespace() != in_ws {
                if start < i {
                    self.tokenize_chunk(&text[start..i], start, &mut out);
                }
                in_ws = !in_ws;
                start = i;
                if ch == ' ' {
                    out.set_trailing_space(true);
                    start = i + 1;
                }
            }
        }
        if start < text.len() {
            self.tokenize_chunk(&text[start..], start, &mut out);
        }
        out
    }

    /// Cache probe for one chunk; on a miss, run affix tokenization and
    /// write the result back under the chunk's original fingerprint. The
    /// cache write happens after the tokens are emitted.
    fn tokenize_chunk(&mut self, chunk: &str, start: usize, out: &mut Tokens) {
        let chunk_fp = fingerprint(chunk);
        if let Some(cached) = self.cache.get(&chunk_fp) {
            out.extend(&self.lexicon, start, cached);
            return;
        }
        let ids = self.affix_tokenize(chunk);
        out.extend(&self.lexicon, start, &ids);
        self.cache.insert(chunk_fp, ids);
    }

    /// Affix peeling and assembly for one uncached chunk.
    fn affix_tokenize(&mut self, chunk: &str) -> Vec<LexemeId> {
        let mut s = StringView::new(chunk);
        let mut prefixes: Vec<LexemeId> = Vec::new();
        let mut suffixes: Vec<LexemeId> = Vec::new();

        // Peel one affix layer per iteration. Escape as soon as stripping
        // one side exposes a special-case string, so its expansion applies
        // to the remainder.
        while !s.is_empty() {
            let before = s.len();

            let pre_len = self.rules.find_prefix(s.text());
            if pre_len > 0 {
                let minus_pre = s.strip_prefix(pre_len);
                if !minus_pre.is_empty() && self.rules.has_special(minus_pre.fingerprint()) {
                    prefixes.push(self.lexicon.get(&s.text()[..pre_len]));
                    s = minus_pre;
                    break;
                }
            }

            let suf_len = self.rules.find_suffix(s.text());
            if suf_len > 0 {
                let minus_suf = s.strip_suffix(suf_len);
                if !minus_suf.is_empty() && self.rules.has_special(minus_suf.fingerprint()) {
                    suffixes.push(self.lexicon.get(&s.text()[s.len() - suf_len..]));
                    s = minus_suf;
                    break;
                }
            }

            if pre_len > 0 && suf_len > 0 && pre_len + suf_len <= s.len() {
                prefixes.push(self.lexicon.get(&s.text()[..pre_len]));
                suffixes.push(self.lexicon.get(&s.text()[s.len() - suf_len..]));
                s = s.strip_prefix(pre_len).strip_suffix(suf_len);
            } else if pre_len > 0 {
                prefixes.push(self.lexicon.get(&s.text()[..pre_len]));
                s = s.strip_prefix(pre_len);
            } else if suf_len > 0 {
                suffixes.push(self.lexicon.get(&s.text()[s.len() - suf_len..]));
                s = s.strip_suffix(suf_len);
            }

            if self.rules.has_special(s.fingerprint()) {
                break;
            }
            if s.len() == before {
                break;
            }
        }

        // Assemble: prefixes, residual, suffixes in reverse. Specials are
        // reachable through the cache probe because the cache is preseeded
        // with them.
        let mut ids = prefixes;
        if !s.is_empty() {
            if let Some(cached) = self.cache.get(&s.fingerprint()) {
                ids.extend_from_slice(cached);
            } else {
                let split = self.rules.find_infix(s.text());
                if split == 0 {
                    ids.push(self.lexicon.get_view(&s));
                } else {
                    let text = s.text();
                    let infix_end = split + text[split..].chars().next().map_or(0, char::len_utf8);
                    ids.push(self.lexicon.get(&text[..split]));
                    ids.push(self.lexicon.get(&text[split..infix_end]));
                    if infix_end < text.len() {
                        ids.push(self.lexicon.get(&text[infix_end..]));
                    }
                }
            }
        }
        ids.extend(suffixes.into_iter().rev());
        ids
    }

    pub fn lexicon(&self) -> &Lexicon {
        &self.lexicon
    }

    pub fn lexicon_mut(&mut self) -> &mut Lexicon {
        &mut self.lexicon
    }

    pub fn rules(&self) -> &RuleSet {
        &self.rules
    }

    /// Number of cached chunk results, preseeded specials included.
    pub fn cache_len(&self) -> usize {
        self.cache.len()
    }
}
