//! Error types for atlas construction and serialization.

use std::fmt;
use std::path::PathBuf;

/// Errors that abort an atlas build, a serialization or a parse.
///
/// Unprintable glyphs and malformed polygons are not errors; they are
/// absorbed into the atlas and reported through
/// [`BuildReport`](crate::BuildReport).
#[derive(Debug)]
pub enum AtlasError {
    /// The font could not be resolved or loaded.
    FontResourceUnavailable {
        /// The configured font path, `None` when the default font was used.
        path: Option<PathBuf>,
        /// Why loading failed.
        reason: String,
    },

    /// The output file could not be written.
    OutputWriteFailure {
        /// The destination path.
        path: PathBuf,
        /// The underlying IO error.
        source: std::io::Error,
    },

    /// An input file (character set, style config) could not be read.
    InputReadFailure {
        /// The path that failed to load.
        path: PathBuf,
        /// The underlying IO error.
        source: std::io::Error,
    },

    /// The width padding glyphs produce no geometry, so widths cannot be
    /// measured.
    DegeneratePadding {
        /// The padding string.
        padding: String,
    },

    /// The font name cannot be embedded in the output.
    InvalidFontName {
        /// The rejected name.
        name: String,
    },

    /// A style configuration file could not be decoded.
    InvalidConfig {
        /// The config file path.
        path: PathBuf,
        /// The decoder's message.
        message: String,
    },

    /// JSON encoding or decoding failed.
    Json(serde_json::Error),

    /// A serialized atlas does not have the expected shape.
    MalformedPayload {
        /// What is wrong with it.
        reason: String,
    },

    /// A character is not in the atlas.
    MissingGlyph {
        /// The missing character.
        character: char,
    },
}

impl fmt::Display for AtlasError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AtlasError::FontResourceUnavailable { path, reason } => match path {
                Some(path) => write!(f, "Font '{}' unavailable: {}", path.display(), reason),
                None => write!(f, "No default font available: {}", reason),
            },
            AtlasError::OutputWriteFailure { path, source } => {
                write!(f, "Failed to write '{}': {}", path.display(), source)
            }
            AtlasError::InputReadFailure { path, source } => {
                write!(f, "Failed to read '{}': {}", path.display(), source)
            }
            AtlasError::DegeneratePadding { padding } => {
                write!(f, "Width padding {:?} produces no geometry", padding)
            }
            AtlasError::InvalidFontName { name } => {
                write!(f, "Invalid font name {:?}", name)
            }
            AtlasError::InvalidConfig { path, message } => {
                write!(f, "Invalid style config '{}': {}", path.display(), message)
            }
            AtlasError::Json(err) => write!(f, "JSON error: {}", err),
            AtlasError::MalformedPayload { reason } => {
                write!(f, "Malformed atlas payload: {}", reason)
            }
            AtlasError::MissingGlyph { character } => {
                write!(f, "Character {:?} is not in the atlas", character)
            }
        }
    }
}

impl std::error::Error for AtlasError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            AtlasError::OutputWriteFailure { source, .. }
            | AtlasError::InputReadFailure { source, .. } => Some(source),
            AtlasError::Json(err) => Some(err),
            _ => None,
        }
    }
}

impl From<serde_json::Error> for AtlasError {
    fn from(err: serde_json::Error) -> Self {
        AtlasError::Json(err)
    }
}

/// Result type alias for atlas operations.
pub type AtlasResult<T> = Result<T, AtlasError>;

#[cfg(test)]
mod tests {
    use super::*;
    use std::error::Error;

    #[test]
    fn test_display_names_the_path() {
        let err = AtlasError::FontResourceUnavailable {
            path: Some(PathBuf::from("fonts/missing.ttf")),
            reason: "Font file not found".into(),
        };
        assert!(err.to_string().contains("fonts/missing.ttf"));

        let err = AtlasError::FontResourceUnavailable {
            path: None,
            reason: "No fonts available".into(),
        };
        assert!(err.to_string().starts_with("No default font"));
    }

    #[test]
    fn test_source_chain() {
        let err = AtlasError::OutputWriteFailure {
            path: PathBuf::from("out.js"),
            source: std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied"),
        };
        assert!(err.source().is_some());
        assert!(AtlasError::MissingGlyph { character: 'x' }.source().is_none());
    }
}
