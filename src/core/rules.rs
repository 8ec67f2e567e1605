//! Affix matchers and the special-case table.
//!
//! A [`RuleSet`] compiles the three per-language pattern sources into
//! anchored matchers and holds the fingerprint-indexed table of
//! special-case expansions. All four lookups are pure functions of the
//! input and the compiled set.

use regex::Regex;
use rustc_hash::FxHashMap;

use super::lexicon::{LexPayload, LexemeId};

/// Construction input for a tokenizer: the per-language rule sources.
///
/// `rules` pairs a chunk with its canonical expansion; each pair preseeds
/// both the special table and the chunk cache. The three pattern sources
/// compile into the prefix, suffix, and infix matchers. `lexemes` seeds
/// the lexicon with caller-supplied feature payloads.
#[derive(Debug, Default, Clone)]
pub struct LanguageData {
    pub rules: Vec<(String, Vec<String>)>,
    pub prefix: Option<String>,
    pub suffix: Option<String>,
    pub infix: Option<String>,
    pub lexemes: Vec<(String, LexPayload)>,
}

/// Compiled affix matchers plus the special-case expansion table.
#[derive(Debug)]
pub struct RuleSet {
    prefix: Option<Regex>,
    suffix: Option<Regex>,
    infix: Option<Regex>,
    specials: FxHashMap<u64, Vec<LexemeId>>,
}

impl RuleSet {
    /// Compile the three pattern sources. The prefix pattern is anchored
    /// at the start of the haystack, the suffix pattern at the end; the
    /// infix pattern matches anywhere. Overlaps resolve to whatever the
    /// engine finds first; they are not re-ranked here.
    pub fn compile(
        prefix: Option<&str>,
        suffix: Option<&str>,
        infix: Option<&str>,
    ) -> Result<Self, regex::Error> {
        let prefix = prefix
            .map(|p| Regex::new(&format!("^(?:{p})")))
            .transpose()?;
        let suffix = suffix
            .map(|p| Regex::new(&format!("(?:{p})$")))
            .transpose()?;
        let infix = infix.map(Regex::new).transpose()?;
        Ok(Self {
            prefix,
            suffix,
            infix,
            specials: FxHashMap::default(),
        })
    }

    /// Byte length of the match anchored at the start of `text`, 0 if none.
    pub fn find_prefix(&self, text: &str) -> usize {
        self.prefix
            .as_ref()
            .and_then(|re| re.find(text))
            .map_or(0, |m| m.end())
    }

    /// Byte length of the match anchored at the end of `text`, 0 if none.
    pub fn find_suffix(&self, text: &str) -> usize {
        self.suffix
            .as_ref()
            .and_then(|re| re.find(text))
            .map_or(0, |m| text.len() - m.start())
    }

    /// Byte offset of the first match inside `text`, 0 if none.
    pub fn find_infix(&self, text: &str) -> usize {
        self.infix
            .as_ref()
            .and_then(|re| re.find(text))
            .map_or(0, |m| m.start())
    }

    /// The preseeded expansion for a chunk fingerprint.
    pub fn special(&self, fingerprint: u64) -> Option<&[LexemeId]> {
        self.specials.get(&fingerprint).map(Vec::as_slice)
    }

    pub fn has_special(&self, fingerprint: u64) -> bool {
        self.specials.contains_key(&fingerprint)
    }

    /// Register a special-case expansion. Construction-time only; entries
    /// are never evicted.
    pub fn add_special(&mut self, fingerprint: u64, expansion: Vec<LexemeId>) {
        self.specials.insert(fingerprint, expansion);
    }

    pub fn special_count(&self) -> usize {
        self.specials.len()
    }
}
