//! Interned storage for surface strings.
//!
//! The lexicon does not own string data directly; each lexeme record carries
//! an id into this store. Interning is keyed by fingerprint, so two lexemes
//! with the same surface share one entry. The store is append-only and ids
//! are stable for its lifetime.
//!
//! Persistence is a flat stream of entries in id order: a little-endian u32
//! byte length followed by the UTF-8 bytes. End of file is the only
//! terminator.

use std::fs::File;
use std::io::{BufReader, BufWriter, Read, Write};
use std::path::{Path, PathBuf};

use rustc_hash::FxHashMap;
use thiserror::Error;
use tracing::debug;

use super::fingerprint::fingerprint;

#[derive(Error, Debug)]
pub enum StringsError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("{} is a directory", .0.display())]
    IsDirectory(PathBuf),
    #[error("load requires an empty string store ({0} strings present)")]
    NotEmpty(usize),
    #[error("truncated entry at index {0}")]
    Truncated(usize),
    #[error("entry {0} is not valid UTF-8")]
    InvalidUtf8(usize),
}

/// Append-only interner from fingerprint to surface string.
#[derive(Default, Debug)]
pub struct StringStore {
    map: FxHashMap<u64, u32>,
    strings: Vec<String>,
}

impl StringStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Intern `text`, returning its stable id.
    pub fn intern(&mut self, text: &str) -> u32 {
        let fp = fingerprint(text);
        if let Some(&id) = self.map.get(&fp) {
            return id;
        }
        let id = self.strings.len() as u32;
        self.strings.push(text.to_owned());
        self.map.insert(fp, id);
        id
    }

    /// The string for an id handed out by `intern`.
    pub fn resolve(&self, id: u32) -> Option<&str> {
        self.strings.get(id as usize).map(String::as_str)
    }

    /// The id for an already-interned fingerprint.
    pub fn find(&self, fingerprint: u64) -> Option<u32> {
        self.map.get(&fingerprint).copied()
    }

    pub fn len(&self) -> usize {
        self.strings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.strings.is_empty()
    }

    /// Write every entry in id order. Fails if `path` is a directory.
    pub fn dump(&self, path: &Path) -> Result<(), StringsError> {
        if path.is_dir() {
            return Err(StringsError::IsDirectory(path.to_path_buf()));
        }
        let mut w = BufWriter::new(File::create(path)?);
        for s in &self.strings {
            w.write_all(&(s.len() as u32).to_le_bytes())?;
            w.write_all(s.as_bytes())?;
        }
        w.flush()?;
        debug!(strings = self.strings.len(), path = %path.display(), "dumped string store");
        Ok(())
    }

    /// Read entries until end of file. The store must be empty.
    pub fn load(&mut self, path: &Path) -> Result<(), StringsError> {
        if !self.strings.is_empty() {
            return Err(StringsError::NotEmpty(self.strings.len()));
        }
        let mut r = BufReader::new(File::open(path)?);
        let mut len_buf = [0u8; 4];
        loop {
            let filled = read_full(&mut r, &mut len_buf)?;
            if filled == 0 {
                break;
            }
            if filled < len_buf.len() {
                return Err(StringsError::Truncated(self.strings.len()));
            }
            let len = u32::from_le_bytes(len_buf) as usize;
            let mut bytes = vec![0u8; len];
            if read_full(&mut r, &mut bytes)? < len {
                return Err(StringsError::Truncated(self.strings.len()));
            }
            let text = String::from_utf8(bytes)
                .map_err(|_| StringsError::InvalidUtf8(self.strings.len()))?;
            self.intern(&text);
        }
        debug!(strings = self.strings.len(), path = %path.display(), "loaded string store");
        Ok(())
    }
}

/// Read until `buf` is full or the reader is exhausted, returning how many
/// bytes were actually read. A short count means end of stream.
pub(crate) fn read_full(r: &mut impl Read, buf: &mut [u8]) -> std::io::Result<usize> {
    let mut filled = 0;
    while filled < buf.len() {
        match r.read(&mut buf[filled..]) {
            Ok(0) => break,
            Ok(n) => filled += n,
            Err(e) if e.kind() == std::io::ErrorKind::Interrupted => continue,
            Err(e) => return Err(e),
        }
    }
    Ok(filled)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_intern_is_idempotent() {
        let mut store = StringStore::new();
        let a = store.intern("hello");
        let b = store.intern("hello");
        assert_eq!(a, b);
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn test_resolve_round_trip() {
        let mut store = StringStore::new();
        let id = store.intern("world");
        assert_eq!(store.resolve(id), Some("world"));
        assert_eq!(store.resolve(id + 1), None);
    }

    #[test]
    fn test_find_by_fingerprint() {
        let mut store = StringStore::new();
        let id = store.intern("chunk");
        assert_eq!(store.find(fingerprint("chunk")), Some(id));
        assert_eq!(store.find(fingerprint("other")), None);
    }

    #[test]
    fn test_dump_load_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("strings");

        let mut store = StringStore::new();
        store.intern("hello");
        store.intern(" ");
        store.intern("n't");
        store.dump(&path).unwrap();

        let mut loaded = StringStore::new();
        loaded.load(&path).unwrap();
        assert_eq!(loaded.len(), 3);
        assert_eq!(loaded.resolve(0), Some("hello"));
        assert_eq!(loaded.resolve(1), Some(" "));
        assert_eq!(loaded.resolve(2), Some("n't"));
    }

    #[test]
    fn test_load_rejects_populated_store() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("strings");
        StringStore::new().dump(&path).unwrap();

        let mut store = StringStore::new();
        store.intern("busy");
        assert!(matches!(store.load(&path), Err(StringsError::NotEmpty(1))));
    }

    #[test]
    fn test_truncated_entry() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("strings");
        // Length claims 10 bytes, only 3 follow.
        std::fs::write(&path, [10, 0, 0, 0, b'a', b'b', b'c']).unwrap();

        let mut store = StringStore::new();
        assert!(matches!(store.load(&path), Err(StringsError::Truncated(0))));
    }
}
