//! Visual-object descriptors.
//!
//! A [`VisualObject`] is a [`Shape`] plus a [`Style`] plus the control points
//! the renderer draws it from. Every spatial operation in this crate moves
//! points; nothing here knows how to rasterise.

use std::ops::Range;

use glam::DVec3;
use serde::{Deserialize, Serialize};

use crate::store::ObjectId;

/// Screen centre.
pub const ORIGIN: DVec3 = DVec3::ZERO;
/// One unit up.
pub const UP: DVec3 = DVec3::Y;
/// One unit down.
pub const DOWN: DVec3 = DVec3::NEG_Y;
/// One unit left.
pub const LEFT: DVec3 = DVec3::NEG_X;
/// One unit right.
pub const RIGHT: DVec3 = DVec3::X;

/// Half extents of the visible frame (16:9, eight units tall).
pub const FRAME_HALF: DVec3 = DVec3::new(8.0 * 16.0 / 9.0 / 2.0, 4.0, 0.0);

/// An opaque RGB colour.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Color {
    pub const WHITE: Color = Color::from_hex(0xFFFFFF);
    pub const BLACK: Color = Color::from_hex(0x000000);
    pub const YELLOW: Color = Color::from_hex(0xF7D96F);
    pub const BLUE: Color = Color::from_hex(0x58C4DD);
    pub const GREEN: Color = Color::from_hex(0x83C167);
    pub const RED: Color = Color::from_hex(0xFC6255);

    /// Build a colour from a `0xRRGGBB` literal.
    #[must_use]
    pub const fn from_hex(rgb: u32) -> Self {
        Self {
            r: ((rgb >> 16) & 0xFF) as u8,
            g: ((rgb >> 8) & 0xFF) as u8,
            b: (rgb & 0xFF) as u8,
        }
    }
}

impl std::fmt::Display for Color {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "#{:02X}{:02X}{:02X}", self.r, self.g, self.b)
    }
}

/// Stroke and fill settings.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Style {
    pub stroke: Color,
    pub stroke_width: f64,
    pub fill: Option<Color>,
    pub fill_opacity: f64,
}

impl Style {
    /// Default style with the given stroke colour.
    #[must_use]
    pub fn stroked(color: Color) -> Self {
        Self {
            stroke: color,
            ..Self::default()
        }
    }

    #[must_use]
    pub fn with_stroke_width(mut self, width: f64) -> Self {
        self.stroke_width = width;
        self
    }

    #[must_use]
    pub fn filled(mut self, color: Color, opacity: f64) -> Self {
        self.fill = Some(color);
        self.fill_opacity = opacity;
        self
    }
}

impl Default for Style {
    fn default() -> Self {
        Self {
            stroke: Color::WHITE,
            stroke_width: 4.0,
            fill: None,
            fill_opacity: 0.0,
        }
    }
}

/// A coloured byte range of a typeset source string.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Highlight {
    pub bytes: Range<usize>,
    pub color: Color,
}

/// What kind of thing an object is, with the parameters its points don't carry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Shape {
    /// A coordinate grid. Points are grid-line endpoint pairs: vertical lines
    /// first (`x_lines` pairs), then horizontal lines (`y_lines` pairs).
    Plane {
        x_lines: usize,
        y_lines: usize,
        coordinates: bool,
    },
    /// A directed segment. Points are `[start, end]`.
    Arrow {
        buff: f64,
        max_tip_length_to_length_ratio: f64,
        max_stroke_width_to_length_ratio: f64,
    },
    /// An open segment. Points are `[start, end]`.
    Line,
    /// A closed polygon through its points.
    Polygon,
    /// The polygon through the points minus the `subtract` polygon.
    Difference { subtract: Vec<DVec3> },
    /// A circle. Points are `[center]`.
    Circle { radius: f64 },
    /// Plain text anchored at its single point.
    Text { content: String, font_size: f64 },
    /// Typeset math anchored at its single point.
    Tex {
        source: String,
        font_size: f64,
        highlights: Vec<Highlight>,
    },
}

/// One drawable object.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VisualObject {
    /// Assigned by the [`ObjectStore`](crate::ObjectStore) on insert.
    pub id: ObjectId,
    pub shape: Shape,
    pub style: Style,
    pub points: Vec<DVec3>,
}

impl VisualObject {
    #[must_use]
    pub fn new(shape: Shape, points: Vec<DVec3>) -> Self {
        Self {
            id: ObjectId::UNASSIGNED,
            shape,
            style: Style::default(),
            points,
        }
    }

    #[must_use]
    pub fn polygon(vertices: Vec<DVec3>) -> Self {
        Self::new(Shape::Polygon, vertices)
    }

    /// An arrow with the engine's default tip ratios.
    #[must_use]
    pub fn arrow(start: DVec3, end: DVec3) -> Self {
        Self::new(
            Shape::Arrow {
                buff: 0.25,
                max_tip_length_to_length_ratio: 0.25,
                max_stroke_width_to_length_ratio: 5.0,
            },
            vec![start, end],
        )
    }

    #[must_use]
    pub fn line(start: DVec3, end: DVec3) -> Self {
        Self::new(Shape::Line, vec![start, end])
    }

    #[must_use]
    pub fn circle(center: DVec3, radius: f64) -> Self {
        Self::new(Shape::Circle { radius }, vec![center])
    }

    /// Axis-aligned square centred on the origin.
    #[must_use]
    pub fn square(side: f64) -> Self {
        let h = side / 2.0;
        Self::polygon(vec![
            DVec3::new(h, h, 0.0),
            DVec3::new(-h, h, 0.0),
            DVec3::new(-h, -h, 0.0),
            DVec3::new(h, -h, 0.0),
        ])
    }

    #[must_use]
    pub fn text(content: impl Into<String>, font_size: f64) -> Self {
        Self::new(
            Shape::Text {
                content: content.into(),
                font_size,
            },
            vec![ORIGIN],
        )
    }

    #[must_use]
    pub fn tex(source: impl Into<String>, font_size: f64, highlights: Vec<Highlight>) -> Self {
        Self::new(
            Shape::Tex {
                source: source.into(),
                font_size,
                highlights,
            },
            vec![ORIGIN],
        )
    }

    #[must_use]
    pub fn with_style(mut self, style: Style) -> Self {
        self.style = style;
        self
    }

    #[must_use]
    pub fn with_color(mut self, color: Color) -> Self {
        self.style.stroke = color;
        self
    }

    /// Axis-aligned bounding box of the control points.
    #[must_use]
    pub fn bounds(&self) -> Option<(DVec3, DVec3)> {
        let first = *self.points.first()?;
        let mut bounds = (first, first);
        for p in &self.points[1..] {
            bounds.0 = bounds.0.min(*p);
            bounds.1 = bounds.1.max(*p);
        }
        // A circle's single point is its centre.
        if let Shape::Circle { radius } = self.shape {
            bounds.0 -= DVec3::new(radius, radius, 0.0);
            bounds.1 += DVec3::new(radius, radius, 0.0);
        }
        Some(bounds)
    }

    /// Centre of the bounding box, or [`ORIGIN`] for an empty object.
    #[must_use]
    pub fn center(&self) -> DVec3 {
        self.bounds()
            .map_or(ORIGIN, |(min, max)| (min + max) / 2.0)
    }

    fn half_extent(&self) -> DVec3 {
        self.bounds()
            .map_or(DVec3::ZERO, |(min, max)| (max - min) / 2.0)
    }

    pub fn shift(&mut self, offset: DVec3) -> &mut Self {
        for p in &mut self.points {
            *p += offset;
        }
        self
    }

    /// Move so the bounding-box centre lands on `point`.
    pub fn move_to(&mut self, point: DVec3) -> &mut Self {
        let offset = point - self.center();
        self.shift(offset)
    }

    /// Bounding-box point in `direction`: a corner for `UP + LEFT`, an edge
    /// midpoint for `UP`.
    #[must_use]
    pub fn corner(&self, direction: DVec3) -> DVec3 {
        self.center() + direction * self.half_extent()
    }

    /// Move so the bounding-box point in `direction` lands on `point`.
    pub fn align_to(&mut self, point: DVec3, direction: DVec3) -> &mut Self {
        let offset = point - self.corner(direction);
        self.shift(offset)
    }

    /// Replace every control point with `f(point)`.
    pub fn apply_pointwise(&mut self, f: impl Fn(DVec3) -> DVec3) -> &mut Self {
        for p in &mut self.points {
            *p = f(*p);
        }
        if let Shape::Difference { subtract } = &mut self.shape {
            for p in subtract {
                *p = f(*p);
            }
        }
        self
    }

    /// Rotate counter-clockwise about the bounding-box centre in the xy-plane.
    pub fn rotate(&mut self, angle: f64) -> &mut Self {
        let center = self.center();
        let (sin, cos) = angle.sin_cos();
        self.apply_pointwise(|p| {
            let d = p - center;
            center + DVec3::new(d.x * cos - d.y * sin, d.x * sin + d.y * cos, d.z)
        })
    }

    /// Place this object beside `other` in `direction`, `buff` units apart.
    ///
    /// `direction` is expected to be one of the unit axis constants.
    pub fn next_to(&mut self, other: &VisualObject, direction: DVec3, buff: f64) -> &mut Self {
        let target = other.center()
            + direction * (other.half_extent() + self.half_extent() + DVec3::splat(buff));
        self.move_to(target)
    }

    /// Push the object against the frame edge in `direction`, `buff` units in.
    pub fn to_edge(&mut self, direction: DVec3, buff: f64) -> &mut Self {
        let center = self.center();
        let edge = FRAME_HALF - self.half_extent() - DVec3::splat(buff);
        let mut target = center;
        for axis in 0..3 {
            if direction[axis] != 0.0 {
                target[axis] = edge[axis] * direction[axis].signum();
            }
        }
        self.move_to(target)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn approx(a: DVec3, b: DVec3) -> bool {
        (a - b).length() < 1e-9
    }

    #[test]
    fn test_color_hex() {
        assert_eq!(Color::from_hex(0x12AB34), Color { r: 0x12, g: 0xAB, b: 0x34 });
        assert_eq!(Color::RED.to_string(), "#FC6255");
    }

    #[test]
    fn test_square_center_and_shift() {
        let mut sq = VisualObject::square(2.0);
        assert!(approx(sq.center(), ORIGIN));
        sq.shift(DVec3::new(1.0, 2.0, 0.0));
        assert!(approx(sq.center(), DVec3::new(1.0, 2.0, 0.0)));
    }

    #[test]
    fn test_corner_and_align_to() {
        let mut sq = VisualObject::square(2.0);
        assert!(approx(sq.corner(UP + LEFT), DVec3::new(-1.0, 1.0, 0.0)));
        assert!(approx(sq.corner(DOWN), DVec3::new(0.0, -1.0, 0.0)));
        sq.align_to(DVec3::new(3.0, 3.0, 0.0), DOWN + RIGHT);
        assert!(approx(sq.corner(DOWN + RIGHT), DVec3::new(3.0, 3.0, 0.0)));
        assert!(approx(sq.center(), DVec3::new(2.0, 4.0, 0.0)));
    }

    #[test]
    fn test_move_to() {
        let mut arrow = VisualObject::arrow(ORIGIN, DVec3::new(2.0, 0.0, 0.0));
        arrow.move_to(DVec3::new(0.0, 3.0, 0.0));
        assert!(approx(arrow.points[0], DVec3::new(-1.0, 3.0, 0.0)));
        assert!(approx(arrow.points[1], DVec3::new(1.0, 3.0, 0.0)));
    }

    #[test]
    fn test_next_to_right() {
        let left = VisualObject::square(2.0);
        let mut right = VisualObject::square(2.0);
        right.next_to(&left, RIGHT, 0.5);
        assert!(approx(right.center(), DVec3::new(2.5, 0.0, 0.0)));
    }

    #[test]
    fn test_circle_bounds_include_radius() {
        let c = VisualObject::circle(DVec3::new(1.0, 1.0, 0.0), 0.5);
        let (min, max) = c.bounds().unwrap();
        assert!(approx(min, DVec3::new(0.5, 0.5, 0.0)));
        assert!(approx(max, DVec3::new(1.5, 1.5, 0.0)));
    }

    #[test]
    fn test_rotate_quarter_turn() {
        let mut arrow = VisualObject::arrow(DVec3::new(-1.0, 0.0, 0.0), DVec3::new(1.0, 0.0, 0.0));
        arrow.rotate(std::f64::consts::FRAC_PI_2);
        assert!(approx(arrow.points[0], DVec3::new(0.0, -1.0, 0.0)));
        assert!(approx(arrow.points[1], DVec3::new(0.0, 1.0, 0.0)));
    }

    #[test]
    fn test_to_edge_up() {
        let mut text = VisualObject::text("statement", 48.0);
        text.to_edge(UP, 0.5);
        assert!(approx(text.center(), DVec3::new(0.0, 3.5, 0.0)));
    }

    #[test]
    fn test_shape_serializes_with_kind_tag() {
        let obj = VisualObject::circle(ORIGIN, 1.0);
        let json = serde_json::to_value(&obj).unwrap();
        assert_eq!(json["shape"]["kind"], "circle");
        let restored: VisualObject = serde_json::from_value(json).unwrap();
        assert_eq!(restored, obj);
    }
}
