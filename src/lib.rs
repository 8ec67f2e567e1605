//! Chunklex - chunk-level natural-language tokenizer
//!
//! A tokenizer built around whitespace-separated chunks:
//! - Fingerprint-keyed chunk cache, so any chunk is tokenized at most once
//! - Regex-driven affix peeling with special-case escape
//! - Single infix split per residual
//! - Append-only lexicon and string store with flat-file persistence
//! - FxHashMap/FxHasher keying throughout

pub mod core;

pub use core::{
    fingerprint, orth_payload, presets, LanguageData, LexPayload, Lexeme, LexemeId, Lexicon,
    LexiconError, RuleSet, StringStore, StringView, StringsError, Token, Tokenizer,
    TokenizerError, Tokens, LEX_PAYLOAD_LEN,
};
