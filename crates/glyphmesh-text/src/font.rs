use crate::error::{TextError, TextResult};
use cosmic_text::fontdb;
use std::path::Path;
use std::sync::Arc;

/// A font database that manages available fonts.
///
/// Used to pick a font when none is configured explicitly.
pub struct FontDatabase {
    inner: fontdb::Database,
}

impl FontDatabase {
    /// Create a new font database with system fonts loaded.
    pub fn new() -> Self {
        let mut db = fontdb::Database::new();
        db.load_system_fonts();
        tracing::debug!("Loaded {} system font faces", db.len());
        Self { inner: db }
    }

    /// Create an empty font database.
    pub fn empty() -> Self {
        Self {
            inner: fontdb::Database::new(),
        }
    }

    /// Load a font from bytes.
    pub fn load_font_data(&mut self, data: Vec<u8>) {
        self.inner
            .load_font_source(fontdb::Source::Binary(Arc::new(data)));
    }

    /// Load fonts from a directory.
    pub fn load_fonts_dir(&mut self, path: impl AsRef<Path>) {
        self.inner.load_fonts_dir(path);
    }

    /// Get the number of fonts loaded.
    pub fn len(&self) -> usize {
        self.inner.len()
    }

    /// Check if the database is empty.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Load the first face in the database.
    ///
    /// Faces whose data cannot be parsed are skipped.
    pub fn first_font(&self) -> TextResult<LoadedFont> {
        self.first_font_covering("")
    }

    /// Load the first face that has a glyph for every character of `text`.
    pub fn first_font_covering(&self, text: &str) -> TextResult<LoadedFont> {
        for face in self.inner.faces() {
            let name = face
                .families
                .first()
                .map(|(family, _)| family.clone())
                .unwrap_or_else(|| face.post_script_name.clone());

            let loaded = self
                .inner
                .with_face_data(face.id, |data, index| {
                    LoadedFont::from_bytes(data.to_vec(), index, name.clone())
                });

            match loaded {
                Some(Ok(font)) if font.covers(text) => return Ok(font),
                Some(Ok(_)) => tracing::trace!("Skipping face '{}': missing glyphs", name),
                Some(Err(err)) => tracing::debug!("Skipping face '{}': {}", name, err),
                None => tracing::debug!("Skipping face '{}': data unavailable", name),
            }
        }
        Err(TextError::NoFontsAvailable)
    }
}

impl Default for FontDatabase {
    fn default() -> Self {
        Self::new()
    }
}

/// An owned, validated font face.
#[derive(Clone)]
pub struct LoadedFont {
    data: Arc<[u8]>,
    index: u32,
    name: String,
    units_per_em: u16,
}

impl LoadedFont {
    /// Read and validate a font file. Only the first face of a collection is
    /// used.
    pub fn from_file(path: impl AsRef<Path>) -> TextResult<Self> {
        let path = path.as_ref();
        let data = std::fs::read(path).map_err(|err| match err.kind() {
            std::io::ErrorKind::NotFound => TextError::FontFileNotFound(path.to_path_buf()),
            _ => TextError::FontReadError {
                path: path.to_path_buf(),
                message: err.to_string(),
            },
        })?;

        let name = path
            .file_stem()
            .and_then(|stem| stem.to_str())
            .unwrap_or("font")
            .to_string();

        Self::from_bytes(data, 0, name)
    }

    /// Validate font bytes.
    pub fn from_bytes(data: Vec<u8>, index: u32, name: impl Into<String>) -> TextResult<Self> {
        let face = ttf_parser::Face::parse(&data, index)
            .map_err(|err| TextError::InvalidFontData(err.to_string()))?;
        let units_per_em = face.units_per_em();
        if units_per_em == 0 {
            return Err(TextError::InvalidFontData("unitsPerEm is zero".into()));
        }

        Ok(Self {
            data: data.into(),
            index,
            name: name.into(),
            units_per_em,
        })
    }

    /// Parse the face. Cheap: tables are located, not decoded.
    pub fn face(&self) -> TextResult<ttf_parser::Face<'_>> {
        ttf_parser::Face::parse(&self.data, self.index)
            .map_err(|err| TextError::InvalidFontData(err.to_string()))
    }

    /// Whether the face maps every character of `text` to a glyph.
    pub fn covers(&self, text: &str) -> bool {
        self.face()
            .map(|face| text.chars().all(|c| face.glyph_index(c).is_some()))
            .unwrap_or(false)
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn units_per_em(&self) -> u16 {
        self.units_per_em
    }
}

impl std::fmt::Debug for LoadedFont {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LoadedFont")
            .field("name", &self.name)
            .field("index", &self.index)
            .field("units_per_em", &self.units_per_em)
            .field("bytes", &self.data.len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_file() {
        let err = LoadedFont::from_file("/definitely/not/here.ttf").unwrap_err();
        assert!(matches!(err, TextError::FontFileNotFound(_)));
    }

    #[test]
    fn test_garbage_bytes() {
        let err = LoadedFont::from_bytes(vec![0xde, 0xad, 0xbe, 0xef], 0, "junk").unwrap_err();
        assert!(matches!(err, TextError::InvalidFontData(_)));
    }

    #[test]
    fn test_garbage_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("junk.ttf");
        std::fs::write(&path, b"definitely not a font").unwrap();

        let err = LoadedFont::from_file(&path).unwrap_err();
        assert!(matches!(err, TextError::InvalidFontData(_)));

        let mut db = FontDatabase::empty();
        db.load_fonts_dir(dir.path());
        assert!(db.is_empty());
    }

    #[test]
    fn test_empty_database_has_no_first_font() {
        let db = FontDatabase::empty();
        assert!(db.is_empty());
        assert!(matches!(db.first_font(), Err(TextError::NoFontsAvailable)));
    }

    #[test]
    fn test_invalid_data_is_not_registered() {
        let mut db = FontDatabase::empty();
        db.load_font_data(b"not a font".to_vec());
        assert!(db.is_empty());
    }
}
