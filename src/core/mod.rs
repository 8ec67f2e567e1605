//! Core tokenization engine for chunklex.
//!
//! This module contains the chunk-level tokenizer and its supporting
//! stores:
//!
//! - [`Tokenizer`]: whitespace segmentation, fingerprint-keyed chunk
//!   cache, affix peeling with special-case escape, single infix split
//! - [`Lexicon`]: append-only interner from fingerprint to lexeme record,
//!   with flat-file persistence
//! - [`StringStore`]: append-only interner for the surface strings lexeme
//!   records point at
//! - [`RuleSet`]: compiled prefix/suffix/infix matchers and the
//!   special-case expansion table
//! - [`Tokens`]: the emitted token sequence
//!
//! # Architecture
//!
//! Chunks are maximal runs between whitespace transitions. Each chunk is
//! fingerprinted and resolved through the cache; a miss runs the affix
//! fixed point and writes the resulting lexeme vector back, so repeated
//! chunks cost one map lookup. The lexicon assigns every distinct surface
//! form a dense 1-based ordinal that stays stable for the lexicon's
//! lifetime and across `dump`/`load`.

mod fingerprint;
mod lexicon;
pub mod presets;
mod rules;
mod strings;
mod tokenizer;
mod tokens;

pub use fingerprint::{fingerprint, StringView};
pub use lexicon::{
    orth_payload, FeatureFn, LexPayload, Lexeme, LexemeId, Lexicon, LexiconError, LEX_ALPHA,
    LEX_ASCII, LEX_DIGIT, LEX_LOWER, LEX_PAYLOAD_LEN, LEX_PUNCT, LEX_RECORD_LEN, LEX_SPACE,
    LEX_TITLE, LEX_UPPER,
};
pub use rules::{LanguageData, RuleSet};
pub use strings::{StringStore, StringsError};
pub use tokenizer::{Tokenizer, TokenizerError};
pub use tokens::{Token, Tokens};
