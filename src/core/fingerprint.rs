//! String fingerprinting for cache and lexicon keys.
//!
//! Every chunk, affix slice, and lexeme surface is identified by a 64-bit
//! content hash of its UTF-8 bytes. The same bytes always produce the same
//! fingerprint within a build, which is what keeps the chunk cache and the
//! on-disk lexicon records aligned across runs.

use rustc_hash::FxHasher;
use std::hash::Hasher;

/// Compute the 64-bit fingerprint of a string.
///
/// Hashes exactly the UTF-8 bytes of `text` with a fixed-seed [`FxHasher`].
/// The bytes are written directly so the digest covers the byte range and
/// nothing else (no length prefix).
#[inline]
pub fn fingerprint(text: &str) -> u64 {
    let mut hasher = FxHasher::default();
    hasher.write(text.as_bytes());
    hasher.finish()
}

/// A borrowed string slice with its fingerprint computed up front.
///
/// The affix peeling loop repeatedly narrows a chunk and probes the special
/// table with the fingerprint of what remains. Carrying the hash alongside
/// the slice keeps each probe to a single map lookup.
#[derive(Clone, Copy, Debug)]
pub struct StringView<'a> {
    text: &'a str,
    fingerprint: u64,
}

impl<'a> StringView<'a> {
    pub fn new(text: &'a str) -> Self {
        Self {
            text,
            fingerprint: fingerprint(text),
        }
    }

    #[inline]
    pub fn text(&self) -> &'a str {
        self.text
    }

    #[inline]
    pub fn fingerprint(&self) -> u64 {
        self.fingerprint
    }

    /// Length in bytes.
    #[inline]
    pub fn len(&self) -> usize {
        self.text.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }

    /// A view of everything after the first `n` bytes.
    pub fn strip_prefix(&self, n: usize) -> StringView<'a> {
        Self::new(&self.text[n..])
    }

    /// A view of everything before the last `n` bytes.
    pub fn strip_suffix(&self, n: usize) -> StringView<'a> {
        Self::new(&self.text[..self.text.len() - n])
    }
}
