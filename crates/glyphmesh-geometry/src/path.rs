//! Path primitives for glyph outlines.
//!
//! A path is a sequence of drawing commands. Font outlines are fed into a
//! [`PathBuilder`] one glyph at a time and the resulting paths are appended
//! into a single path per text body.

use crate::Transform2D;
use glam::Vec2;

/// A command in a path.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PathCommand {
    /// Move to a new position without drawing.
    MoveTo(Vec2),
    /// Draw a line to a position.
    LineTo(Vec2),
    /// Draw a quadratic Bezier curve.
    QuadTo {
        /// Control point
        control: Vec2,
        /// End point
        to: Vec2,
    },
    /// Draw a cubic Bezier curve.
    CubicTo {
        /// First control point
        control1: Vec2,
        /// Second control point
        control2: Vec2,
        /// End point
        to: Vec2,
    },
    /// Close the current sub-path by drawing a line to the start.
    Close,
}

impl PathCommand {
    fn map_points(self, f: impl Fn(Vec2) -> Vec2) -> Self {
        match self {
            PathCommand::MoveTo(to) => PathCommand::MoveTo(f(to)),
            PathCommand::LineTo(to) => PathCommand::LineTo(f(to)),
            PathCommand::QuadTo { control, to } => PathCommand::QuadTo {
                control: f(control),
                to: f(to),
            },
            PathCommand::CubicTo {
                control1,
                control2,
                to,
            } => PathCommand::CubicTo {
                control1: f(control1),
                control2: f(control2),
                to: f(to),
            },
            PathCommand::Close => PathCommand::Close,
        }
    }
}

/// A 2D path consisting of drawing commands.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Path {
    commands: Vec<PathCommand>,
}

impl Path {
    /// Create a new empty path.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a path from a list of commands.
    pub fn from_commands(commands: Vec<PathCommand>) -> Self {
        Self { commands }
    }

    /// Get the commands in this path.
    pub fn commands(&self) -> &[PathCommand] {
        &self.commands
    }

    /// Check if the path is empty.
    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }

    /// Get the number of commands.
    pub fn len(&self) -> usize {
        self.commands.len()
    }

    /// Append all commands of `other`, each transformed by `transform`.
    pub fn append_transformed(&mut self, other: &Path, transform: &Transform2D) {
        self.commands.extend(
            other
                .commands
                .iter()
                .map(|cmd| cmd.map_points(|p| transform.transform_point(p))),
        );
    }

    /// Return a copy of this path with every point transformed.
    pub fn transformed(&self, transform: &Transform2D) -> Self {
        let mut out = Path::new();
        out.append_transformed(self, transform);
        out
    }

    /// Get the bounding box of the path.
    ///
    /// Control points are included, so the bounds are conservative.
    /// Returns (min, max) corners.
    pub fn bounds(&self) -> Option<(Vec2, Vec2)> {
        let mut min = Vec2::splat(f32::INFINITY);
        let mut max = Vec2::splat(f32::NEG_INFINITY);

        for cmd in &self.commands {
            match cmd {
                PathCommand::MoveTo(to) | PathCommand::LineTo(to) => {
                    min = min.min(*to);
                    max = max.max(*to);
                }
                PathCommand::QuadTo { control, to } => {
                    min = min.min(*control).min(*to);
                    max = max.max(*control).max(*to);
                }
                PathCommand::CubicTo {
                    control1,
                    control2,
                    to,
                } => {
                    min = min.min(*control1).min(*control2).min(*to);
                    max = max.max(*control1).max(*control2).max(*to);
                }
                PathCommand::Close => {}
            }
        }

        if min.is_finite() && max.is_finite() {
            Some((min, max))
        } else {
            None
        }
    }
}

/// Builder for constructing paths.
#[derive(Debug, Default)]
pub struct PathBuilder {
    commands: Vec<PathCommand>,
    current_pos: Vec2,
    subpath_start: Vec2,
}

impl PathBuilder {
    /// Create a new path builder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Move to a new position without drawing.
    pub fn move_to(&mut self, to: Vec2) -> &mut Self {
        self.commands.push(PathCommand::MoveTo(to));
        self.current_pos = to;
        self.subpath_start = to;
        self
    }

    /// Draw a line to a position.
    pub fn line_to(&mut self, to: Vec2) -> &mut Self {
        self.commands.push(PathCommand::LineTo(to));
        self.current_pos = to;
        self
    }

    /// Draw a quadratic Bezier curve.
    pub fn quad_to(&mut self, control: Vec2, to: Vec2) -> &mut Self {
        self.commands.push(PathCommand::QuadTo { control, to });
        self.current_pos = to;
        self
    }

    /// Draw a cubic Bezier curve.
    pub fn cubic_to(&mut self, control1: Vec2, control2: Vec2, to: Vec2) -> &mut Self {
        self.commands.push(PathCommand::CubicTo {
            control1,
            control2,
            to,
        });
        self.current_pos = to;
        self
    }

    /// Close the current sub-path.
    pub fn close(&mut self) -> &mut Self {
        self.commands.push(PathCommand::Close);
        self.current_pos = self.subpath_start;
        self
    }

    /// Add a closed axis-aligned rectangle, counter-clockwise in y-up space.
    pub fn rect(&mut self, position: Vec2, size: Vec2) -> &mut Self {
        self.move_to(position)
            .line_to(Vec2::new(position.x + size.x, position.y))
            .line_to(position + size)
            .line_to(Vec2::new(position.x, position.y + size.y))
            .close()
    }

    /// Add a closed polygon.
    pub fn polygon(&mut self, points: &[Vec2]) -> &mut Self {
        let Some((first, rest)) = points.split_first() else {
            return self;
        };
        self.move_to(*first);
        for point in rest {
            self.line_to(*point);
        }
        self.close()
    }

    /// Get the current position.
    pub fn current_pos(&self) -> Vec2 {
        self.current_pos
    }

    /// Whether no command has been recorded yet.
    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }

    /// Build the path.
    pub fn build(self) -> Path {
        Path {
            commands: self.commands,
        }
    }
}
