//! The font atlas data model.
//!
//! A [`FontAtlas`] maps characters to [`GlyphRecord`]s in insertion order.
//! Each record holds the glyph's kerning width and its mesh as a list of
//! triangular [`Face`]s. Vertices serialize as bare `[x, y, z]` arrays unless
//! they carry optional attributes, in which case they become objects.

use glam::{Vec2, Vec3};
use indexmap::IndexMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// A mesh vertex.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Vertex {
    pub position: Vec3,
    /// Flat face normal, when requested.
    pub normal: Option<Vec3>,
    /// Planar texture coordinate, when requested.
    pub uv: Option<Vec2>,
}

impl Vertex {
    pub fn new(position: Vec3) -> Self {
        Self {
            position,
            normal: None,
            uv: None,
        }
    }

    pub fn with_normal(mut self, normal: Vec3) -> Self {
        self.normal = Some(normal);
        self
    }

    pub fn with_uv(mut self, uv: Vec2) -> Self {
        self.uv = Some(uv);
        self
    }

    /// Whether any optional attribute is present.
    pub fn has_attributes(&self) -> bool {
        self.normal.is_some() || self.uv.is_some()
    }

    pub fn is_finite(&self) -> bool {
        self.position.is_finite()
    }
}

impl From<Vec3> for Vertex {
    fn from(position: Vec3) -> Self {
        Self::new(position)
    }
}

#[derive(Serialize)]
struct VertexAttributes {
    position: [f32; 3],
    #[serde(skip_serializing_if = "Option::is_none")]
    normal: Option<[f32; 3]>,
    #[serde(skip_serializing_if = "Option::is_none")]
    uv: Option<[f32; 2]>,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum VertexRepr {
    Position([f32; 3]),
    Attributes {
        position: [f32; 3],
        #[serde(default)]
        normal: Option<[f32; 3]>,
        #[serde(default)]
        uv: Option<[f32; 2]>,
    },
}

impl Serialize for Vertex {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        if !self.has_attributes() {
            return self.position.to_array().serialize(serializer);
        }
        VertexAttributes {
            position: self.position.to_array(),
            normal: self.normal.map(|n| n.to_array()),
            uv: self.uv.map(|uv| uv.to_array()),
        }
        .serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for Vertex {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        Ok(match VertexRepr::deserialize(deserializer)? {
            VertexRepr::Position(position) => Vertex::new(Vec3::from_array(position)),
            VertexRepr::Attributes {
                position,
                normal,
                uv,
            } => Vertex {
                position: Vec3::from_array(position),
                normal: normal.map(Vec3::from_array),
                uv: uv.map(Vec2::from_array),
            },
        })
    }
}

/// One polygon of a glyph mesh, normally a triangle.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Face(pub Vec<Vertex>);

impl Face {
    pub fn new(vertices: Vec<Vertex>) -> Self {
        Self(vertices)
    }

    /// A face from bare positions.
    pub fn from_positions(positions: impl IntoIterator<Item = Vec3>) -> Self {
        Self(positions.into_iter().map(Vertex::new).collect())
    }

    pub fn vertices(&self) -> &[Vertex] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn is_triangle(&self) -> bool {
        self.0.len() == 3
    }

    pub fn positions(&self) -> impl Iterator<Item = Vec3> + '_ {
        self.0.iter().map(|v| v.position)
    }
}

/// A single character's entry in the atlas.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GlyphRecord {
    /// Horizontal advance of the glyph, in em.
    pub kerning_width: f32,
    /// Triangles of the glyph; empty for unprintable characters.
    pub mesh: Vec<Face>,
}

impl GlyphRecord {
    pub fn new(kerning_width: f32, mesh: Vec<Face>) -> Self {
        Self {
            kerning_width,
            mesh,
        }
    }

    /// A record with no geometry.
    pub fn empty(kerning_width: f32) -> Self {
        Self::new(kerning_width, Vec::new())
    }

    /// Whether the glyph draws nothing.
    pub fn is_whitespace(&self) -> bool {
        self.mesh.is_empty()
    }

    pub fn triangle_count(&self) -> usize {
        self.mesh.iter().filter(|face| face.is_triangle()).count()
    }
}

/// Characters mapped to glyph records, in insertion order.
///
/// Re-inserting a character replaces its record but keeps its position.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FontAtlas {
    glyphs: IndexMap<char, GlyphRecord>,
}

impl FontAtlas {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a record, returning the one it replaced.
    pub fn insert(&mut self, character: char, record: GlyphRecord) -> Option<GlyphRecord> {
        self.glyphs.insert(character, record)
    }

    pub fn get(&self, character: char) -> Option<&GlyphRecord> {
        self.glyphs.get(&character)
    }

    pub fn contains(&self, character: char) -> bool {
        self.glyphs.contains_key(&character)
    }

    pub fn len(&self) -> usize {
        self.glyphs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.glyphs.is_empty()
    }

    /// Entries in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (char, &GlyphRecord)> + '_ {
        self.glyphs.iter().map(|(c, record)| (*c, record))
    }

    pub fn characters(&self) -> impl Iterator<Item = char> + '_ {
        self.glyphs.keys().copied()
    }

    /// Total number of faces across every glyph.
    pub fn face_count(&self) -> usize {
        self.glyphs.values().map(|record| record.mesh.len()).sum()
    }
}

impl FromIterator<(char, GlyphRecord)> for FontAtlas {
    fn from_iter<I: IntoIterator<Item = (char, GlyphRecord)>>(iter: I) -> Self {
        Self {
            glyphs: iter.into_iter().collect(),
        }
    }
}

impl<'a> IntoIterator for &'a FontAtlas {
    type Item = (&'a char, &'a GlyphRecord);
    type IntoIter = indexmap::map::Iter<'a, char, GlyphRecord>;

    fn into_iter(self) -> Self::IntoIter {
        self.glyphs.iter()
    }
}

/// Something a build absorbed instead of failing on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GlyphIssue {
    /// The rasterizer produced no geometry; the mesh is empty.
    Unprintable,
    /// The character drew nothing between the padding glyphs, so its width
    /// is recorded as zero.
    Unmeasured,
    /// Faces that were not triangles after triangulation.
    MalformedPolygon { faces: usize },
}

/// Per-glyph issues recorded during a build, in build order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct BuildReport {
    issues: Vec<(char, GlyphIssue)>,
}

impl BuildReport {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, character: char, issue: GlyphIssue) {
        self.issues.push((character, issue));
    }

    pub fn issues(&self) -> &[(char, GlyphIssue)] {
        &self.issues
    }

    pub fn is_clean(&self) -> bool {
        self.issues.is_empty()
    }

    /// Characters that rasterized to nothing.
    pub fn unprintable(&self) -> impl Iterator<Item = char> + '_ {
        self.issues
            .iter()
            .filter(|(_, issue)| *issue == GlyphIssue::Unprintable)
            .map(|(c, _)| *c)
    }

    /// Characters whose width could not be measured.
    pub fn unmeasured(&self) -> impl Iterator<Item = char> + '_ {
        self.issues
            .iter()
            .filter(|(_, issue)| *issue == GlyphIssue::Unmeasured)
            .map(|(c, _)| *c)
    }

    /// Total malformed faces across the build.
    pub fn malformed_faces(&self) -> usize {
        self.issues
            .iter()
            .map(|(_, issue)| match issue {
                GlyphIssue::MalformedPolygon { faces } => *faces,
                GlyphIssue::Unprintable | GlyphIssue::Unmeasured => 0,
            })
            .sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn triangle() -> Face {
        Face::from_positions([Vec3::ZERO, Vec3::X, Vec3::Y])
    }

    #[test]
    fn test_reinsert_keeps_position() {
        let mut atlas = FontAtlas::new();
        atlas.insert('a', GlyphRecord::empty(1.0));
        atlas.insert('b', GlyphRecord::empty(2.0));
        let previous = atlas.insert('a', GlyphRecord::empty(3.0));

        assert_eq!(previous, Some(GlyphRecord::empty(1.0)));
        assert_eq!(atlas.len(), 2);
        assert_eq!(atlas.characters().collect::<String>(), "ab");
        assert_eq!(atlas.get('a').unwrap().kerning_width, 3.0);
    }

    #[test]
    fn test_plain_vertex_is_array() {
        let json = serde_json::to_string(&Vertex::new(Vec3::new(1.0, 0.5, -2.0))).unwrap();
        assert_eq!(json, "[1.0,0.5,-2.0]");
    }

    #[test]
    fn test_vertex_with_attributes_is_object() {
        let vertex = Vertex::new(Vec3::ZERO).with_normal(Vec3::Z);
        let json = serde_json::to_string(&vertex).unwrap();
        assert_eq!(json, r#"{"position":[0.0,0.0,0.0],"normal":[0.0,0.0,1.0]}"#);

        let back: Vertex = serde_json::from_str(&json).unwrap();
        assert_eq!(back, vertex);
    }

    #[test]
    fn test_record_layout() {
        let record = GlyphRecord::new(0.5, vec![triangle()]);
        let json = serde_json::to_string(&record).unwrap();
        assert_eq!(
            json,
            r#"{"kerningWidth":0.5,"mesh":[[[0.0,0.0,0.0],[1.0,0.0,0.0],[0.0,1.0,0.0]]]}"#
        );
        assert!(!record.is_whitespace());
        assert_eq!(record.triangle_count(), 1);
    }

    #[test]
    fn test_report_totals() {
        let mut report = BuildReport::new();
        assert!(report.is_clean());

        report.push(' ', GlyphIssue::Unprintable);
        report.push('?', GlyphIssue::Unmeasured);
        report.push('x', GlyphIssue::MalformedPolygon { faces: 2 });
        report.push('y', GlyphIssue::MalformedPolygon { faces: 1 });

        assert_eq!(report.unprintable().collect::<Vec<_>>(), vec![' ']);
        assert_eq!(report.unmeasured().collect::<Vec<_>>(), vec!['?']);
        assert_eq!(report.malformed_faces(), 3);
    }
}
