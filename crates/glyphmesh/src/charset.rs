//! Character sets to build atlases from.

use crate::error::{AtlasError, AtlasResult};
use std::path::Path;

/// An ordered sequence of characters. Duplicates are allowed; the builder
/// keeps one entry per character.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CharacterSet {
    text: String,
}

impl CharacterSet {
    pub fn from_text(text: impl Into<String>) -> Self {
        Self { text: text.into() }
    }

    /// Read a UTF-8 file verbatim. Line breaks in the file are characters
    /// too.
    pub fn from_file(path: impl AsRef<Path>) -> AtlasResult<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|source| AtlasError::InputReadFailure {
            path: path.to_path_buf(),
            source,
        })?;
        Ok(Self { text })
    }

    /// Printable ASCII, space through tilde.
    pub fn ascii() -> Self {
        Self {
            text: (' '..='~').collect(),
        }
    }

    pub fn as_str(&self) -> &str {
        &self.text
    }

    pub fn chars(&self) -> std::str::Chars<'_> {
        self.text.chars()
    }

    /// Number of characters, counting duplicates.
    pub fn len(&self) -> usize {
        self.text.chars().count()
    }

    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }

    /// Number of distinct characters.
    pub fn unique_len(&self) -> usize {
        let mut seen: Vec<char> = self.text.chars().collect();
        seen.sort_unstable();
        seen.dedup();
        seen.len()
    }
}

impl From<&str> for CharacterSet {
    fn from(text: &str) -> Self {
        Self::from_text(text)
    }
}

impl From<String> for CharacterSet {
    fn from(text: String) -> Self {
        Self::from_text(text)
    }
}

impl AsRef<str> for CharacterSet {
    fn as_ref(&self) -> &str {
        &self.text
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ascii() {
        let set = CharacterSet::ascii();
        assert_eq!(set.len(), 95);
        assert!(set.as_str().starts_with(" !"));
        assert!(set.as_str().ends_with('~'));
    }

    #[test]
    fn test_duplicates_counted() {
        let set = CharacterSet::from_text("abca");
        assert_eq!(set.len(), 4);
        assert_eq!(set.unique_len(), 3);
    }

    #[test]
    fn test_file_is_verbatim() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("chars.txt");
        std::fs::write(&path, "é ж\n").unwrap();

        let set = CharacterSet::from_file(&path).unwrap();
        assert_eq!(set.as_str(), "é ж\n");
        assert_eq!(set.len(), 4);
    }

    #[test]
    fn test_missing_file() {
        let err = CharacterSet::from_file("/no/such/chars.txt").unwrap_err();
        assert!(matches!(err, AtlasError::InputReadFailure { .. }));
    }
}
