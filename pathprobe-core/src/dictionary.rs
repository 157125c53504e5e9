//! Wordlist loading.
//!
//! A [`Dictionary`] is built once at startup and shared read-only by every
//! scan. Cloning it only bumps a reference count.

use std::{fmt, path::Path, sync::Arc};

use tracing::info;

use crate::error::{Result, ScanError};

/// One candidate path segment or file stem.
///
/// Never empty and never carries leading or trailing whitespace.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct DictionaryEntry(Box<str>);

impl DictionaryEntry {
    /// Trim `raw` and wrap it, or return `None` when nothing is left.
    pub fn new(raw: &str) -> Option<Self> {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            None
        } else {
            Some(Self(trimmed.into()))
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl AsRef<str> for DictionaryEntry {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for DictionaryEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Ordered, immutable wordlist.
///
/// Duplicates are kept; order is the order of the source resource.
#[derive(Debug, Clone, Default)]
pub struct Dictionary {
    entries: Arc<[DictionaryEntry]>,
}

impl Dictionary {
    /// Parse newline-separated entries. Blank lines are dropped and every
    /// line is trimmed, so `\r\n` sources load the same as `\n` ones.
    pub fn parse(contents: &str) -> Self {
        contents.lines().filter_map(DictionaryEntry::new).collect()
    }

    pub fn from_entries<I, S>(entries: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        entries
            .into_iter()
            .filter_map(|raw| DictionaryEntry::new(raw.as_ref()))
            .collect()
    }

    /// Read and parse the wordlist at `path`.
    pub fn load(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path).map_err(|source| {
            ScanError::DictionaryLoad {
                path: path.to_path_buf(),
                source,
            }
        })?;

        let dictionary = Self::parse(&contents);
        info!(
            target: "dictionary",
            entries = dictionary.len(),
            path = %path.display(),
            "loaded dictionary"
        );
        Ok(dictionary)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&DictionaryEntry> {
        self.entries.get(index)
    }

    pub fn entries(&self) -> &[DictionaryEntry] {
        &self.entries
    }

    pub fn iter(&self) -> impl Iterator<Item = &DictionaryEntry> {
        self.entries.iter()
    }
}

impl FromIterator<DictionaryEntry> for Dictionary {
    fn from_iter<T: IntoIterator<Item = DictionaryEntry>>(iter: T) -> Self {
        Self {
            entries: iter.into_iter().collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn entry_rejects_blank_and_trims() {
        assert!(DictionaryEntry::new("   ").is_none());
        assert!(DictionaryEntry::new("").is_none());
        let entry = DictionaryEntry::new("  admin\t").unwrap();
        assert_eq!(entry.as_str(), "admin");
    }

    #[test]
    fn parse_strips_blank_lines_and_whitespace() {
        let dictionary = Dictionary::parse("admin\r\n\r\n  login \n\n.git\n");
        let words: Vec<&str> =
            dictionary.iter().map(DictionaryEntry::as_str).collect();
        assert_eq!(words, vec!["admin", "login", ".git"]);
    }

    #[test]
    fn parse_keeps_duplicates_in_order() {
        let dictionary = Dictionary::parse("b\na\nb\n");
        let words: Vec<&str> =
            dictionary.iter().map(DictionaryEntry::as_str).collect();
        assert_eq!(words, vec!["b", "a", "b"]);
    }

    #[test]
    fn load_reads_file_from_disk() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "robots.txt").unwrap();
        writeln!(file).unwrap();
        writeln!(file, "  sitemap.xml  ").unwrap();

        let dictionary = Dictionary::load(file.path()).unwrap();
        assert_eq!(dictionary.len(), 2);
        assert_eq!(dictionary.get(1).unwrap().as_str(), "sitemap.xml");
    }

    #[test]
    fn load_missing_file_is_dictionary_load_error() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("nope.txt");

        let err = Dictionary::load(&missing).unwrap_err();
        match err {
            ScanError::DictionaryLoad { path, .. } => assert_eq!(path, missing),
            other => panic!("expected DictionaryLoad, got {other:?}"),
        }
    }

    #[test]
    fn clones_share_storage() {
        let dictionary = Dictionary::from_entries(["a", "b"]);
        let clone = dictionary.clone();
        assert!(std::ptr::eq(
            dictionary.entries().as_ptr(),
            clone.entries().as_ptr()
        ));
    }
}
