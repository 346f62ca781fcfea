//! End-to-end atlas construction against the mock rasterizer.

use glam::Vec3;
use glyphmesh::geometry::PolygonMesh;
use glyphmesh::{
    AtlasError, AtlasResult, FontAtlasBuilder, GlyphIssue, GlyphRasterizer,
    MalformedPolygonPolicy, NormalizeOptions, RasterResult, RasterizationSession, StyleOptions,
    measure_width, parse, serialize, write_atlas,
};
use glyphmesh_test_utils::{MockRasterizer, RasterCall};

fn approx(a: f32, b: f32) -> bool {
    (a - b).abs() < 1e-5
}

// ====================
// Building
// ====================

#[test]
fn test_ab_space_with_defaults() {
    let mock = MockRasterizer::new();
    let atlas = FontAtlasBuilder::new(&mock)
        .build("AB ", &StyleOptions::default())
        .unwrap();

    assert_eq!(atlas.characters().collect::<String>(), "AB ");

    let space = atlas.get(' ').unwrap();
    assert!(space.mesh.is_empty());
    assert!(space.kerning_width.is_finite());
    assert!(approx(space.kerning_width, 1.0));

    for c in ['A', 'B'] {
        let record = atlas.get(c).unwrap();
        assert!(approx(record.kerning_width, 1.0));
        assert_eq!(record.mesh.len(), 2);
    }

    let text = serialize(&atlas, "Mock").unwrap();
    assert!(text.starts_with("registerFont('Mock',{"));
    assert!(text.ends_with(");\n"));
}

#[test]
fn test_every_face_is_a_finite_triangle() {
    let mock = MockRasterizer::new().with_quads();
    let style = StyleOptions::default().with_extrude(0.2);
    let atlas = FontAtlasBuilder::new(&mock).build("Wqj", &style).unwrap();

    for (_, record) in atlas.iter() {
        assert!(!record.mesh.is_empty());
        for face in &record.mesh {
            assert!(face.is_triangle());
            assert!(face.vertices().iter().all(|v| v.is_finite()));
        }
    }
}

#[test]
fn test_duplicate_characters_keep_one_entry() {
    let mock = MockRasterizer::new();
    let atlas = FontAtlasBuilder::new(&mock)
        .build("abab", &StyleOptions::default())
        .unwrap();

    assert_eq!(atlas.len(), 2);
    assert_eq!(atlas.characters().collect::<String>(), "ab");

    let single = FontAtlasBuilder::new(&mock)
        .build("ab", &StyleOptions::default())
        .unwrap();
    assert_eq!(atlas, single);
}

/// Draws each lone character one unit further right than the previous one,
/// so repeated characters get distinguishable meshes.
struct Drifting;

struct DriftingSession {
    glyphs_drawn: usize,
}

impl GlyphRasterizer for Drifting {
    type Session = DriftingSession;

    fn open_session(&self, _style: &StyleOptions) -> AtlasResult<DriftingSession> {
        Ok(DriftingSession { glyphs_drawn: 0 })
    }
}

impl RasterizationSession for DriftingSession {
    fn rasterize(&mut self, body: &str) -> RasterResult {
        let len = body.chars().count() as f32;
        let (left, right) = if len == 1.0 {
            let left = self.glyphs_drawn as f32;
            self.glyphs_drawn += 1;
            (left, left + 1.0)
        } else {
            (0.0, len)
        };

        let mut mesh = PolygonMesh::new();
        let a = mesh.add_vertex(Vec3::new(left, 0.0, 0.0));
        let b = mesh.add_vertex(Vec3::new(right, 0.0, 0.0));
        let c = mesh.add_vertex(Vec3::new(right, 1.0, 0.0));
        mesh.add_polygon([a, b, c]);
        RasterResult::from_mesh(mesh)
    }
}

#[test]
fn test_duplicate_keeps_last_occurrence() {
    let atlas = FontAtlasBuilder::new(Drifting)
        .build("aba", &StyleOptions::default())
        .unwrap();

    assert_eq!(atlas.characters().collect::<String>(), "ab");
    let first_x = |c: char| atlas.get(c).unwrap().mesh[0].vertices()[0].position.x;
    assert_eq!(first_x('b'), 1.0);
    assert_eq!(first_x('a'), 2.0);
}

#[test]
fn test_custom_advance_is_measured() {
    let mock = MockRasterizer::new().with_advance('W', 1.5).with_advance('i', 0.4);
    let atlas = FontAtlasBuilder::new(&mock)
        .build("Wi", &StyleOptions::default())
        .unwrap();

    assert!(approx(atlas.get('W').unwrap().kerning_width, 1.5));
    assert!(approx(atlas.get('i').unwrap().kerning_width, 0.4));
}

#[test]
fn test_negative_width_survives_serialization() {
    let mock = MockRasterizer::new().with_advance('x', -0.2);
    let atlas = FontAtlasBuilder::new(&mock)
        .build("x", &StyleOptions::default())
        .unwrap();

    let width = atlas.get('x').unwrap().kerning_width;
    assert!(width < 0.0);
    assert!(approx(width, -0.2));

    let text = serialize(&atlas, "Mock").unwrap();
    assert!(text.contains("\"kerningWidth\":-"));
    let (_, parsed) = parse(&text).unwrap();
    assert_eq!(parsed.get('x').unwrap().kerning_width, width);
}

#[test]
fn test_size_scales_widths() {
    let mock = MockRasterizer::new();
    let style = StyleOptions::default().with_size(2.0);
    let atlas = FontAtlasBuilder::new(&mock).build("x", &style).unwrap();
    assert!(approx(atlas.get('x').unwrap().kerning_width, 2.0));
}

#[test]
fn test_unprintable_characters_reported() {
    let mock = MockRasterizer::new().with_unprintable('?');
    let (atlas, report) = FontAtlasBuilder::new(&mock)
        .build_with_report("a?\t", &StyleOptions::default())
        .unwrap();

    assert!(atlas.get('?').unwrap().is_whitespace());
    assert!(atlas.get('\t').unwrap().is_whitespace());
    assert_eq!(report.unprintable().collect::<String>(), "?\t");
}

#[test]
fn test_broken_character_does_not_abort() {
    let mock = MockRasterizer::new().with_broken('X');
    let (atlas, report) = FontAtlasBuilder::new(&mock)
        .build_with_report("AX", &StyleOptions::default())
        .unwrap();

    assert_eq!(atlas.len(), 2);
    assert!(approx(atlas.get('A').unwrap().kerning_width, 1.0));

    let broken = atlas.get('X').unwrap();
    assert_eq!(broken.kerning_width, 0.0);
    assert!(broken.mesh.is_empty());
    assert_eq!(report.unmeasured().collect::<String>(), "X");
    assert_eq!(report.unprintable().collect::<String>(), "X");
}

#[test]
fn test_malformed_faces_kept_then_discarded() {
    let mock = MockRasterizer::new().with_malformed('m');

    let (lenient, report) = FontAtlasBuilder::new(&mock)
        .build_with_report("m", &StyleOptions::default())
        .unwrap();
    assert_eq!(lenient.get('m').unwrap().mesh.len(), 3);
    assert_eq!(
        report.issues(),
        &[('m', GlyphIssue::MalformedPolygon { faces: 1 })]
    );

    let strict = NormalizeOptions::default().with_malformed_policy(MalformedPolygonPolicy::Discard);
    let discarded = FontAtlasBuilder::new(&mock)
        .with_normalize_options(strict)
        .build("m", &StyleOptions::default())
        .unwrap();
    let record = discarded.get('m').unwrap();
    assert_eq!(record.mesh.len(), 2);
    assert_eq!(record.triangle_count(), 2);
}

#[test]
fn test_normals_in_output() {
    let mock = MockRasterizer::new();
    let options = NormalizeOptions::default().with_normals(true);
    let atlas = FontAtlasBuilder::new(&mock)
        .with_normalize_options(options)
        .build("n", &StyleOptions::default())
        .unwrap();

    let text = serialize(&atlas, "Mock").unwrap();
    assert!(text.contains("{\"position\":["));
    assert!(text.contains("\"normal\":["));

    let (_, parsed) = parse(&text).unwrap();
    assert_eq!(parsed, atlas);

    let normal = parsed.get('n').unwrap().mesh[0].vertices()[0].normal.unwrap();
    assert!((normal - glam::Vec3::Z).length() < 1e-6);
}

// ====================
// Sessions
// ====================

#[test]
fn test_one_session_per_build() {
    let mock = MockRasterizer::new();
    FontAtlasBuilder::new(&mock)
        .build("abc", &StyleOptions::default())
        .unwrap();

    assert_eq!(mock.sessions_opened(), 1);
    assert_eq!(mock.sessions_closed(), 1);
    // Two measurements and one glyph rasterization per character.
    assert_eq!(mock.rasterize_count(), 9);
    assert_eq!(mock.calls().last(), Some(&RasterCall::CloseSession));
}

#[test]
fn test_measure_width_is_idempotent() {
    let mock = MockRasterizer::new().with_advance('g', 0.7);
    let style = StyleOptions::default();
    let mut session = mock.open_session(&style).unwrap();

    let first = measure_width(&mut session, 'x', &style).unwrap();
    measure_width(&mut session, 'W', &style).unwrap();
    let again = measure_width(&mut session, 'x', &style).unwrap();
    assert_eq!(first, again);
}

#[test]
fn test_unprintable_padding_is_fatal() {
    let mock = MockRasterizer::new();
    let style = StyleOptions::default().with_padding(" ");
    let err = FontAtlasBuilder::new(&mock).build("a", &style).unwrap_err();

    assert!(matches!(err, AtlasError::DegeneratePadding { .. }));
    assert_eq!(mock.sessions_closed(), 1);
}

// ====================
// Failures
// ====================

#[test]
fn test_invalid_font_aborts_before_any_glyph() {
    let dir = tempfile::tempdir().unwrap();
    let output = dir.path().join("font.js");

    let mock = MockRasterizer::new().with_font("present.ttf");
    let style = StyleOptions::default().with_font("absent.ttf");

    let result = FontAtlasBuilder::new(&mock)
        .build("AB ", &style)
        .and_then(|atlas| write_atlas(&output, &atlas, "Mock"));

    assert!(matches!(
        result,
        Err(AtlasError::FontResourceUnavailable { path: Some(_), .. })
    ));
    assert_eq!(mock.rasterize_count(), 0);
    assert!(!output.exists());
}

#[test]
fn test_known_font_builds() {
    let mock = MockRasterizer::new().with_font("present.ttf");
    let style = StyleOptions::default().with_font("present.ttf");
    assert!(FontAtlasBuilder::new(&mock).build("a", &style).is_ok());
}

// ====================
// Output
// ====================

#[test]
fn test_write_and_read_back() {
    let dir = tempfile::tempdir().unwrap();
    let output = dir.path().join("font.js");

    let mock = MockRasterizer::new().with_quads();
    let style = StyleOptions::default().with_extrude(0.1);
    let atlas = FontAtlasBuilder::new(&mock).build("Hi !", &style).unwrap();

    write_atlas(&output, &atlas, "Mock Sans").unwrap();
    let (name, parsed) = glyphmesh::read_atlas(&output).unwrap();

    assert_eq!(name, "Mock Sans");
    assert_eq!(parsed, atlas);
    assert_eq!(
        std::fs::read_to_string(&output).unwrap(),
        serialize(&atlas, "Mock Sans").unwrap()
    );
}

#[test]
fn test_rebuild_is_deterministic() {
    let mock = MockRasterizer::new();
    let style = StyleOptions::default();
    let builder = FontAtlasBuilder::new(&mock);

    let first = serialize(&builder.build("xyz", &style).unwrap(), "M").unwrap();
    let second = serialize(&builder.build("xyz", &style).unwrap(), "M").unwrap();
    assert_eq!(first, second);
}
