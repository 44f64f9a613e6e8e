//! Number plane: mapping between logical coordinates and screen points.
//!
//! A [`NumberPlane`] is `scale × range` units wide on each axis and centred on
//! its `center`. Logical coordinates are measured from the middle of each
//! range, so a symmetric range puts `(0, 0)` on the centre.

use std::str::FromStr;

use anim_object::{Shape, VisualObject};
use glam::{DVec2, DVec3};
use serde::{Deserialize, Serialize};

use crate::error::SpaceError;

const TICK_EPSILON: f64 = 1e-9;

/// One logical axis.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Axis {
    X,
    Y,
}

impl FromStr for Axis {
    type Err = SpaceError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "x" => Ok(Self::X),
            "y" => Ok(Self::Y),
            other => Err(SpaceError::InvalidAxis(other.to_string())),
        }
    }
}

impl std::fmt::Display for Axis {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::X => write!(f, "x"),
            Self::Y => write!(f, "y"),
        }
    }
}

/// `(min, max, step)` for one axis. Callers keep `min < max` and `step > 0`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AxisRange {
    pub min: f64,
    pub max: f64,
    pub step: f64,
}

impl AxisRange {
    #[must_use]
    pub const fn new(min: f64, max: f64, step: f64) -> Self {
        Self { min, max, step }
    }

    #[must_use]
    pub fn span(&self) -> f64 {
        self.max - self.min
    }

    #[must_use]
    pub fn mid(&self) -> f64 {
        (self.min + self.max) / 2.0
    }

    /// On-screen length of the axis at `scale` units per logical unit.
    #[must_use]
    pub fn length(&self, scale: f64) -> f64 {
        self.span() * scale
    }

    /// Tick values `min, min + step, ...` up to and including `max`.
    ///
    /// A range with a non-positive step or `max < min` yields `min` alone.
    pub fn ticks(&self) -> impl Iterator<Item = f64> + '_ {
        let count = if self.step > 0.0 && self.span() >= 0.0 {
            (self.span() / self.step + TICK_EPSILON).floor() as usize
        } else {
            0
        };
        (0..=count).map(move |i| self.min + i as f64 * self.step)
    }

    /// Where the perpendicular axis crosses this one: zero if in range.
    fn crossing(&self) -> f64 {
        0.0_f64.clamp(self.min, self.max)
    }
}

impl From<[f64; 3]> for AxisRange {
    fn from([min, max, step]: [f64; 3]) -> Self {
        Self::new(min, max, step)
    }
}

impl Default for AxisRange {
    fn default() -> Self {
        Self::new(-4.0, 4.0, 1.0)
    }
}

/// A rectangular coordinate grid placed on screen.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct NumberPlane {
    center: DVec3,
    scale: f64,
    x_range: AxisRange,
    y_range: AxisRange,
}

impl NumberPlane {
    /// Place a plane with its range midpoints at `center`.
    ///
    /// Ranges are taken as given. A range whose step is not positive draws a
    /// single grid line at its `min`; see [`AxisRange::ticks`].
    #[must_use]
    pub fn new(center: DVec3, scale: f64, x_range: AxisRange, y_range: AxisRange) -> Self {
        Self {
            center,
            scale,
            x_range,
            y_range,
        }
    }

    #[must_use]
    pub fn center(&self) -> DVec3 {
        self.center
    }

    #[must_use]
    pub fn scale(&self) -> f64 {
        self.scale
    }

    #[must_use]
    pub fn range(&self, axis: Axis) -> AxisRange {
        match axis {
            Axis::X => self.x_range,
            Axis::Y => self.y_range,
        }
    }

    #[must_use]
    pub fn x_length(&self) -> f64 {
        self.x_range.length(self.scale)
    }

    #[must_use]
    pub fn y_length(&self) -> f64 {
        self.y_range.length(self.scale)
    }

    /// Logical `(x, y)` to a screen point with `z = 0` relative to the centre.
    #[must_use]
    pub fn coords_to_point(&self, x: f64, y: f64) -> DVec3 {
        self.center
            + DVec3::new(
                (x - self.x_range.mid()) * self.scale,
                (y - self.y_range.mid()) * self.scale,
                0.0,
            )
    }

    /// Inverse of [`coords_to_point`](Self::coords_to_point); `z` is ignored.
    #[must_use]
    pub fn point_to_coords(&self, point: DVec3) -> DVec2 {
        let d = point - self.center;
        DVec2::new(
            d.x / self.scale + self.x_range.mid(),
            d.y / self.scale + self.y_range.mid(),
        )
    }

    /// The screen point of `value` on the given axis line.
    #[must_use]
    pub fn number_to_point(&self, axis: Axis, value: f64) -> DVec3 {
        match axis {
            Axis::X => self.coords_to_point(value, self.y_range.crossing()),
            Axis::Y => self.coords_to_point(self.x_range.crossing(), value),
        }
    }

    #[must_use]
    pub fn axis_start(&self, axis: Axis) -> DVec3 {
        self.number_to_point(axis, self.range(axis).min)
    }

    #[must_use]
    pub fn axis_end(&self, axis: Axis) -> DVec3 {
        self.number_to_point(axis, self.range(axis).max)
    }

    /// Corners of the rectangle spanned by both axes: top-left, bottom-left,
    /// bottom-right, top-right.
    #[must_use]
    pub fn window_corners(&self) -> Vec<DVec3> {
        let left = self.axis_start(Axis::X).x;
        let right = self.axis_end(Axis::X).x;
        let bottom = self.axis_start(Axis::Y).y;
        let top = self.axis_end(Axis::Y).y;
        vec![
            DVec3::new(left, top, 0.0),
            DVec3::new(left, bottom, 0.0),
            DVec3::new(right, bottom, 0.0),
            DVec3::new(right, top, 0.0),
        ]
    }

    /// Grid-line endpoint pairs: one vertical line per x tick, then one
    /// horizontal line per y tick.
    #[must_use]
    pub fn grid_lines(&self) -> Vec<DVec3> {
        let (x, y) = (self.x_range, self.y_range);
        let vertical = x
            .ticks()
            .flat_map(|v| [self.coords_to_point(v, y.min), self.coords_to_point(v, y.max)]);
        let horizontal = y
            .ticks()
            .flat_map(|v| [self.coords_to_point(x.min, v), self.coords_to_point(x.max, v)]);
        vertical.chain(horizontal).collect()
    }

    /// Renderable descriptor of the grid.
    #[must_use]
    pub fn to_object(&self, coordinates: bool) -> VisualObject {
        VisualObject::new(
            Shape::Plane {
                x_lines: self.x_range.ticks().count(),
                y_lines: self.y_range.ticks().count(),
                coordinates,
            },
            self.grid_lines(),
        )
    }
}
