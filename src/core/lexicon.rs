//! The lexicon: append-only interned store of lexical types.
//!
//! Every distinct surface form ever tokenized gets exactly one [`Lexeme`]
//! record, found by the fingerprint of its text and addressed by a dense
//! 1-based ordinal. Records live in an append-only table owned by the
//! [`Lexicon`]; a [`LexemeId`] is an ordinal into that table and stays valid
//! for the lexicon's whole lifetime. Ordinal 0 is reserved and never handed
//! out.
//!
//! # Persistence
//!
//! [`Lexicon::dump`] and [`Lexicon::load`] move the record table through a
//! flat stream of fixed-size little-endian records with no header, trailer,
//! or framing; end of file is the only terminator. Surface strings are
//! persisted separately through the owned
//! [`StringStore`](super::strings::StringStore).

use std::fs::File;
use std::io::{BufReader, BufWriter, Write};
use std::path::{Path, PathBuf};

use rustc_hash::FxHashMap;
use thiserror::Error;
use tracing::debug;

use super::fingerprint::{fingerprint, StringView};
use super::strings::{read_full, StringStore};

/// Width of the opaque per-lexeme feature block.
pub const LEX_PAYLOAD_LEN: usize = 16;

/// Opaque fixed-width feature payload attached to each lexeme.
pub type LexPayload = [u8; LEX_PAYLOAD_LEN];

/// Computes the payload for a surface form at first interning.
pub type FeatureFn = fn(&str) -> LexPayload;

/// Size in bytes of one on-disk lexeme record.
pub const LEX_RECORD_LEN: usize = 36;

// Flag bits in payload byte 0, as set by `orth_payload`.
pub const LEX_ALPHA: u8 = 1 << 0;
pub const LEX_DIGIT: u8 = 1 << 1;
pub const LEX_LOWER: u8 = 1 << 2;
pub const LEX_UPPER: u8 = 1 << 3;
pub const LEX_TITLE: u8 = 1 << 4;
pub const LEX_PUNCT: u8 = 1 << 5;
pub const LEX_SPACE: u8 = 1 << 6;
pub const LEX_ASCII: u8 = 1 << 7;

#[derive(Error, Debug)]
pub enum LexiconError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("{} is a directory", .0.display())]
    IsDirectory(PathBuf),
    #[error("load requires an empty lexicon ({0} records present)")]
    NotEmpty(usize),
    #[error("truncated record at ordinal {ordinal}")]
    TruncatedRecord { ordinal: u32 },
}

/// Stable handle to a lexeme record. The wrapped value is the ordinal.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub struct LexemeId(u32);

impl LexemeId {
    /// The reserved 0 ordinal.
    pub const RESERVED: LexemeId = LexemeId(0);

    #[inline]
    pub fn ordinal(self) -> u32 {
        self.0
    }
}

/// One lexical type: the record for a distinct surface form.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Lexeme {
    /// 1-based insertion index; dense, never reused.
    pub ordinal: u32,
    /// Id of the surface form in the string store.
    pub surface: u32,
    /// Byte length of the surface form.
    pub length: u32,
    /// Content hash of the surface form.
    pub fingerprint: u64,
    /// Opaque feature block.
    pub payload: LexPayload,
}

impl Lexeme {
    fn pack(&self, buf: &mut [u8; LEX_RECORD_LEN]) {
        buf[0..4].copy_from_slice(&self.ordinal.to_le_bytes());
        buf[4..8].copy_from_slice(&self.surface.to_le_bytes());
        buf[8..12].copy_from_slice(&self.length.to_le_bytes());
        buf[12..20].copy_from_slice(&self.fingerprint.to_le_bytes());
        buf[20..36].copy_from_slice(&self.payload);
    }

    fn unpack(buf: &[u8; LEX_RECORD_LEN]) -> Lexeme {
        let mut u32_le = [0u8; 4];
        let mut u64_le = [0u8; 8];
        let mut payload = [0u8; LEX_PAYLOAD_LEN];

        u32_le.copy_from_slice(&buf[0..4]);
        let ordinal = u32::from_le_bytes(u32_le);
        u32_le.copy_from_slice(&buf[4..8]);
        let surface = u32::from_le_bytes(u32_le);
        u32_le.copy_from_slice(&buf[8..12]);
        let length = u32::from_le_bytes(u32_le);
        u64_le.copy_from_slice(&buf[12..20]);
        let fingerprint = u64::from_le_bytes(u64_le);
        payload.copy_from_slice(&buf[20..36]);

        Lexeme {
            ordinal,
            surface,
            length,
            fingerprint,
            payload,
        }
    }
}

/// Append-only interner from fingerprint to lexeme record.
///
/// Holds the record table (the arena), the fingerprint index over it, and
/// the string store that backs surface forms. `get` on a new surface
/// interns the string, computes the feature payload, and appends a record;
/// everything after that is lookups.
pub struct Lexicon {
    by_fingerprint: FxHashMap<u64, LexemeId>,
    records: Vec<Lexeme>,
    strings: StringStore,
    features: FeatureFn,
}

impl Default for Lexicon {
    fn default() -> Self {
        Self::new()
    }
}

impl Lexicon {
    /// A lexicon using [`orth_payload`] for feature computation.
    pub fn new() -> Self {
        Self::with_features(orth_payload)
    }

    /// A lexicon with a caller-supplied feature computation.
    pub fn with_features(features: FeatureFn) -> Self {
        Self {
            by_fingerprint: FxHashMap::default(),
            records: vec![Lexeme {
                ordinal: 0,
                surface: 0,
                length: 0,
                fingerprint: 0,
                payload: [0; LEX_PAYLOAD_LEN],
            }],
            strings: StringStore::new(),
            features,
        }
    }

    /// Number of records, the reserved slot excluded.
    pub fn len(&self) -> usize {
        self.records.len() - 1
    }

    pub fn is_empty(&self) -> bool {
        self.records.len() == 1
    }

    pub fn strings(&self) -> &StringStore {
        &self.strings
    }

    pub fn strings_mut(&mut self) -> &mut StringStore {
        &mut self.strings
    }

    /// Return the record id for `text`, interning it on first sight.
    pub fn get(&mut self, text: &str) -> LexemeId {
        self.get_hashed(fingerprint(text), text)
    }

    /// [`get`](Self::get) with the fingerprint already computed.
    pub fn get_view(&mut self, view: &StringView<'_>) -> LexemeId {
        self.get_hashed(view.fingerprint(), view.text())
    }

    fn get_hashed(&mut self, fp: u64, text: &str) -> LexemeId {
        if let Some(&id) = self.by_fingerprint.get(&fp) {
            return id;
        }
        let payload = (self.features)(text);
        self.insert(fp, text, payload)
    }

    fn insert(&mut self, fp: u64, text: &str, payload: LexPayload) -> LexemeId {
        let ordinal = self.records.len() as u32;
        let surface = self.strings.intern(text);
        self.records.push(Lexeme {
            ordinal,
            surface,
            length: text.len() as u32,
            fingerprint: fp,
            payload,
        });
        let id = LexemeId(ordinal);
        self.by_fingerprint.insert(fp, id);
        id
    }

    /// Force the payload for `surface`, creating the record if absent.
    /// The ordinal is preserved on overwrite.
    pub fn set(&mut self, surface: &str, payload: LexPayload) -> LexemeId {
        let fp = fingerprint(surface);
        if let Some(&id) = self.by_fingerprint.get(&fp) {
            self.records[id.0 as usize].payload = payload;
            return id;
        }
        self.insert(fp, surface, payload)
    }

    /// By-value copy of the record for `surface`, if interned.
    pub fn lookup(&self, surface: &str) -> Option<Lexeme> {
        let id = self.by_fingerprint.get(&fingerprint(surface))?;
        Some(self.records[id.0 as usize])
    }

    pub fn lexeme(&self, id: LexemeId) -> &Lexeme {
        &self.records[id.0 as usize]
    }

    pub fn id_by_fingerprint(&self, fp: u64) -> Option<LexemeId> {
        self.by_fingerprint.get(&fp).copied()
    }

    /// Surface text for a lexeme. Empty when the surface id cannot be
    /// resolved, which happens for a lexicon loaded without its strings
    /// file.
    pub fn surface_of(&self, id: LexemeId) -> &str {
        self.strings
            .resolve(self.records[id.0 as usize].surface)
            .unwrap_or("")
    }

    /// Write every record except the reserved 0-th, in ordinal order, as
    /// fixed-size little-endian records. Fails if `path` is a directory.
    pub fn dump(&self, path: &Path) -> Result<(), LexiconError> {
        if path.is_dir() {
            return Err(LexiconError::IsDirectory(path.to_path_buf()));
        }
        let mut w = BufWriter::new(File::create(path)?);
        let mut buf = [0u8; LEX_RECORD_LEN];
        for rec in &self.records[1..] {
            rec.pack(&mut buf);
            w.write_all(&buf)?;
        }
        w.flush()?;
        debug!(records = self.len(), path = %path.display(), "dumped lexicon");
        Ok(())
    }

    /// Read fixed-size records until end of file, appending each to the
    /// table and indexing it by its stored fingerprint. The lexicon must
    /// hold only the reserved slot. A partial trailing record is an error,
    /// not a terminator: it means the dump was torn.
    pub fn load(&mut self, path: &Path) -> Result<(), LexiconError> {
        if !self.is_empty() {
            return Err(LexiconError::NotEmpty(self.len()));
        }
        let mut r = BufReader::new(File::open(path)?);
        let mut buf = [0u8; LEX_RECORD_LEN];
        loop {
            let filled = read_full(&mut r, &mut buf)?;
            if filled == 0 {
                break;
            }
            if filled < LEX_RECORD_LEN {
                return Err(LexiconError::TruncatedRecord {
                    ordinal: self.records.len() as u32,
                });
            }
            let rec = Lexeme::unpack(&buf);
            let id = LexemeId(self.records.len() as u32);
            self.by_fingerprint.insert(rec.fingerprint, id);
            self.records.push(rec);
        }
        debug!(records = self.len(), path = %path.display(), "loaded lexicon");
        Ok(())
    }
}

/// Default feature computation: orthographic flags in byte 0 and the
/// fingerprint of the lowercased form in bytes 8..16.
pub fn orth_payload(text: &str) -> LexPayload {
    let mut payload = [0u8; LEX_PAYLOAD_LEN];
    if text.is_empty() {
        return payload;
    }
    let mut flags = 0u8;
    let any_upper = text.chars().any(char::is_uppercase);
    let any_lower = text.chars().any(char::is_lowercase);
    if text.chars().all(char::is_alphabetic) {
        flags |= LEX_ALPHA;
    }
    if text.chars().all(char::is_numeric) {
        flags |= LEX_DIGIT;
    }
    if any_lower && !any_upper {
        flags |= LEX_LOWER;
    }
    if any_upper && !any_lower {
        flags |= LEX_UPPER;
    }
    let mut chars = text.chars();
    if chars.next().is_some_and(char::is_uppercase) && !chars.any(char::is_uppercase) {
        flags |= LEX_TITLE;
    }
    if text.chars().all(|c| c.is_ascii_punctuation()) {
        flags |= LEX_PUNCT;
    }
    if text.chars().all(char::is_whitespace) {
        flags |= LEX_SPACE;
    }
    if text.is_ascii() {
        flags |= LEX_ASCII;
    }
    payload[0] = flags;
    payload[8..16].copy_from_slice(&fingerprint(&text.to_lowercase()).to_le_bytes());
    payload
}
