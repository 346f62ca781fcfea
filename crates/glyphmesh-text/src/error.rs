use std::path::PathBuf;

/// Errors that can occur while loading fonts or shaping text.
#[derive(Debug, Clone)]
pub enum TextError {
    /// Font file not found.
    FontFileNotFound(PathBuf),

    /// Font file exists but could not be read.
    FontReadError { path: PathBuf, message: String },

    /// Invalid font data.
    InvalidFontData(String),

    /// The font database has no faces to fall back on.
    NoFontsAvailable,

    /// Generic IO error.
    IoError(String),
}

impl std::fmt::Display for TextError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TextError::FontFileNotFound(path) => {
                write!(f, "Font file not found: {}", path.display())
            }
            TextError::FontReadError { path, message } => {
                write!(f, "Failed to read font '{}': {}", path.display(), message)
            }
            TextError::InvalidFontData(msg) => write!(f, "Invalid font data: {}", msg),
            TextError::NoFontsAvailable => write!(f, "No fonts available"),
            TextError::IoError(msg) => write!(f, "IO error: {}", msg),
        }
    }
}

impl std::error::Error for TextError {}

impl From<std::io::Error> for TextError {
    fn from(err: std::io::Error) -> Self {
        TextError::IoError(err.to_string())
    }
}

/// Result type for text operations.
pub type TextResult<T> = Result<T, TextError>;
