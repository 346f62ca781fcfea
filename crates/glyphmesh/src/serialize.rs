//! The atlas wire format.
//!
//! An atlas is written as a single JavaScript call registering the font:
//!
//! ```text
//! registerFont('<name>',{"A":{"kerningWidth":0.66,"mesh":[[[x,y,z],...],...]},...});
//! ```
//!
//! followed by a newline. The payload is compact JSON with keys in atlas
//! order. The name is embedded verbatim, so names that would need escaping
//! are rejected.

use crate::atlas::{FontAtlas, GlyphRecord};
use crate::error::{AtlasError, AtlasResult};
use indexmap::IndexMap;
use std::path::Path;

const PREFIX: &str = "registerFont('";
const NAME_END: &str = "',";
const SUFFIX: &str = ");\n";

/// Check that a font name can be embedded in a single-quoted literal.
pub fn validate_font_name(name: &str) -> AtlasResult<()> {
    let invalid = name.is_empty()
        || name
            .chars()
            .any(|c| matches!(c, '\'' | '\\' | '\n' | '\r' | '\u{2028}' | '\u{2029}'));
    if invalid {
        return Err(AtlasError::InvalidFontName {
            name: name.to_string(),
        });
    }
    Ok(())
}

/// Serialize an atlas under `name`.
pub fn serialize(atlas: &FontAtlas, name: &str) -> AtlasResult<String> {
    validate_font_name(name)?;
    let payload = serde_json::to_string(atlas)?;

    let mut out = String::with_capacity(PREFIX.len() + name.len() + payload.len() + 8);
    out.push_str(PREFIX);
    out.push_str(name);
    out.push_str(NAME_END);
    out.push_str(&payload);
    out.push_str(SUFFIX);
    Ok(out)
}

/// Serialize an atlas and write it to `path`.
///
/// The whole output is produced before the file is touched, so a failed
/// serialization leaves no file behind.
pub fn write_atlas(path: impl AsRef<Path>, atlas: &FontAtlas, name: &str) -> AtlasResult<()> {
    let path = path.as_ref();
    let text = serialize(atlas, name)?;
    std::fs::write(path, text).map_err(|source| AtlasError::OutputWriteFailure {
        path: path.to_path_buf(),
        source,
    })?;
    tracing::info!("Wrote {} glyphs to {}", atlas.len(), path.display());
    Ok(())
}

/// Parse serialized output back into its name and atlas.
pub fn parse(text: &str) -> AtlasResult<(String, FontAtlas)> {
    let malformed = |reason: &str| AtlasError::MalformedPayload {
        reason: reason.to_string(),
    };

    let rest = text
        .strip_prefix(PREFIX)
        .ok_or_else(|| malformed("missing registerFont prefix"))?;
    let (name, rest) = rest
        .split_once(NAME_END)
        .ok_or_else(|| malformed("unterminated font name"))?;
    let payload = rest
        .strip_suffix(SUFFIX)
        .or_else(|| rest.strip_suffix(");"))
        .ok_or_else(|| malformed("missing closing ');'"))?;

    validate_font_name(name)?;

    let entries: IndexMap<String, GlyphRecord> = serde_json::from_str(payload)?;
    let mut atlas = FontAtlas::new();
    for (key, record) in entries {
        let mut chars = key.chars();
        let character = match (chars.next(), chars.next()) {
            (Some(c), None) => c,
            _ => {
                return Err(AtlasError::MalformedPayload {
                    reason: format!("key {:?} is not a single character", key),
                });
            }
        };
        atlas.insert(character, record);
    }

    Ok((name.to_string(), atlas))
}

/// Read and parse a serialized atlas file.
pub fn read_atlas(path: impl AsRef<Path>) -> AtlasResult<(String, FontAtlas)> {
    let path = path.as_ref();
    let text = std::fs::read_to_string(path).map_err(|source| AtlasError::InputReadFailure {
        path: path.to_path_buf(),
        source,
    })?;
    parse(&text)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::atlas::Face;
    use glam::Vec3;

    fn sample() -> FontAtlas {
        let mut atlas = FontAtlas::new();
        atlas.insert(
            'A',
            GlyphRecord::new(
                0.5,
                vec![Face::from_positions([Vec3::ZERO, Vec3::X, Vec3::Y])],
            ),
        );
        atlas.insert(' ', GlyphRecord::empty(0.25));
        atlas
    }

    #[test]
    fn test_exact_output() {
        let text = serialize(&sample(), "Serif").unwrap();
        assert_eq!(
            text,
            "registerFont('Serif',{\"A\":{\"kerningWidth\":0.5,\"mesh\":[[[0.0,0.0,0.0],[1.0,0.0,0.0],[0.0,1.0,0.0]]]},\" \":{\"kerningWidth\":0.25,\"mesh\":[]}});\n"
        );
    }

    #[test]
    fn test_empty_atlas() {
        assert_eq!(
            serialize(&FontAtlas::new(), "x").unwrap(),
            "registerFont('x',{});\n"
        );
    }

    #[test]
    fn test_round_trip() {
        let atlas = sample();
        let (name, parsed) = parse(&serialize(&atlas, "Serif").unwrap()).unwrap();
        assert_eq!(name, "Serif");
        assert_eq!(parsed, atlas);
        assert_eq!(parsed.characters().collect::<String>(), "A ");
    }

    #[test]
    fn test_invalid_names() {
        for name in ["", "it's", "back\\slash", "two\nlines"] {
            assert!(
                matches!(
                    serialize(&sample(), name),
                    Err(AtlasError::InvalidFontName { .. })
                ),
                "{name:?} should be rejected"
            );
        }
    }

    #[test]
    fn test_parse_rejects_multichar_keys() {
        let err = parse("registerFont('x',{\"ab\":{\"kerningWidth\":1,\"mesh\":[]}});\n").unwrap_err();
        assert!(matches!(err, AtlasError::MalformedPayload { .. }));
    }

    #[test]
    fn test_parse_rejects_bad_framing() {
        assert!(matches!(
            parse("{\"a\":{}}"),
            Err(AtlasError::MalformedPayload { .. })
        ));
        assert!(matches!(
            parse("registerFont('x',{}"),
            Err(AtlasError::MalformedPayload { .. })
        ));
        assert!(matches!(
            parse("registerFont('x',{\"a\":1});\n"),
            Err(AtlasError::Json(_))
        ));
    }

    #[test]
    fn test_write_failure_names_path() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("no_such_dir").join("font.js");

        match write_atlas(&path, &sample(), "Serif") {
            Err(AtlasError::OutputWriteFailure { path: failed, .. }) => assert_eq!(failed, path),
            other => panic!("expected OutputWriteFailure, got {:?}", other),
        }
        assert!(!path.exists());
    }

    #[test]
    fn test_invalid_name_writes_nothing() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("font.js");
        assert!(write_atlas(&path, &sample(), "bad'name").is_err());
        assert!(!path.exists());
    }
}
