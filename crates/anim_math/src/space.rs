//! Vector space: a number plane plus the objects that move with it.
//!
//! [`VectorSpace`] owns the mapping between logical coordinates and screen
//! points for one plane, and builds the [`PendingTransform`]s that carry the
//! plane and every registered object through a linear map. Transforms are
//! affine about the space's own origin, not the screen origin. Objects that
//! were never registered are never touched.

use anim_object::{Color, ObjectId, ObjectStore, Shape, Style, VisualObject};
use glam::{DVec2, DVec3};
use tracing::debug;

use crate::error::SpaceError;
use crate::plane::{Axis, AxisRange, NumberPlane};
use crate::transform::{AffineMap, LinearMatrix, PendingTransform};

/// Construction options for a [`VectorSpace`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SpaceOptions {
    /// Draw coordinate labels at each tick.
    pub add_coordinates: bool,
    /// Style of the grid lines.
    pub plane_style: Style,
}

impl Default for SpaceOptions {
    fn default() -> Self {
        Self {
            add_coordinates: false,
            plane_style: Style::stroked(Color::BLUE).with_stroke_width(2.0),
        }
    }
}

/// Arrow settings for vectors drawn in a space.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ArrowStyle {
    pub color: Color,
    pub buff: f64,
    pub max_stroke_width_to_length_ratio: f64,
    pub max_tip_length_to_length_ratio: f64,
}

impl ArrowStyle {
    /// Tip and stroke ratios tuned for a space drawn at `scale`.
    #[must_use]
    pub fn for_scale(scale: f64) -> Self {
        Self {
            color: Color::YELLOW,
            buff: 0.0,
            max_stroke_width_to_length_ratio: 5.0 * scale,
            max_tip_length_to_length_ratio: scale / 4.0,
        }
    }

    #[must_use]
    pub fn with_color(mut self, color: Color) -> Self {
        self.color = color;
        self
    }

    fn arrow(&self, start: DVec3, end: DVec3) -> VisualObject {
        VisualObject::new(
            Shape::Arrow {
                buff: self.buff,
                max_tip_length_to_length_ratio: self.max_tip_length_to_length_ratio,
                max_stroke_width_to_length_ratio: self.max_stroke_width_to_length_ratio,
            },
            vec![start, end],
        )
        .with_color(self.color)
    }
}

impl Default for ArrowStyle {
    fn default() -> Self {
        Self::for_scale(1.0)
    }
}

/// Logical coordinates: one `(x, y)` pair or a row-major batch of pairs.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct CoordBatch(Vec<DVec2>);

impl CoordBatch {
    /// Interpret flat `data` by `shape`: `[2]` is one pair, `[n, 2]` is `n`
    /// rows of pairs.
    ///
    /// # Errors
    ///
    /// Returns [`SpaceError::Shape`] for any other shape, or when `data` does
    /// not hold exactly the number of values the shape implies.
    pub fn from_shape(data: &[f64], shape: &[usize]) -> Result<Self, SpaceError> {
        match *shape {
            [2] if data.len() == 2 => Ok(Self(vec![DVec2::new(data[0], data[1])])),
            [n, 2] if data.len() == n * 2 => Ok(Self(
                data.chunks_exact(2)
                    .map(|pair| DVec2::new(pair[0], pair[1]))
                    .collect(),
            )),
            _ => Err(SpaceError::Shape(shape.to_vec())),
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = &DVec2> {
        self.0.iter()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl From<DVec2> for CoordBatch {
    fn from(c: DVec2) -> Self {
        Self(vec![c])
    }
}

impl From<[f64; 2]> for CoordBatch {
    fn from(c: [f64; 2]) -> Self {
        Self(vec![DVec2::from_array(c)])
    }
}

impl From<Vec<DVec2>> for CoordBatch {
    fn from(coords: Vec<DVec2>) -> Self {
        Self(coords)
    }
}

impl From<&[[f64; 2]]> for CoordBatch {
    fn from(rows: &[[f64; 2]]) -> Self {
        Self(rows.iter().copied().map(DVec2::from_array).collect())
    }
}

impl<const N: usize> From<[[f64; 2]; N]> for CoordBatch {
    fn from(rows: [[f64; 2]; N]) -> Self {
        Self::from(&rows[..])
    }
}

/// The clipping window's objects.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Mask {
    /// The visible polygon.
    pub mask: ObjectId,
    /// Opaque fill covering the mask outside the plane's window.
    pub shade: ObjectId,
}

/// A coordinate space drawn on screen.
#[derive(Debug, Clone)]
pub struct VectorSpace {
    origin: DVec3,
    scale: f64,
    plane: NumberPlane,
    plane_id: ObjectId,
    window_id: ObjectId,
    mask: Option<Mask>,
    transformable: Vec<ObjectId>,
}

impl VectorSpace {
    /// Create the plane and its window polygon in `store`, centred on `origin`.
    pub fn new(
        store: &mut ObjectStore,
        origin: DVec3,
        scale: f64,
        x_range: impl Into<AxisRange>,
        y_range: impl Into<AxisRange>,
        options: SpaceOptions,
    ) -> Self {
        let plane = NumberPlane::new(origin, scale, x_range.into(), y_range.into());
        let plane_id = store.insert(
            plane
                .to_object(options.add_coordinates)
                .with_style(options.plane_style),
        );
        let window_id = store.insert(
            VisualObject::polygon(plane.window_corners())
                .with_style(Style::default().with_stroke_width(0.0)),
        );

        debug!(
            origin = ?origin,
            scale,
            x_length = plane.x_length(),
            y_length = plane.y_length(),
            plane = %plane_id,
            "vector space created"
        );

        Self {
            origin,
            scale,
            plane,
            plane_id,
            window_id,
            mask: None,
            transformable: Vec::new(),
        }
    }

    #[must_use]
    pub fn origin(&self) -> DVec3 {
        self.origin
    }

    #[must_use]
    pub fn scale(&self) -> f64 {
        self.scale
    }

    #[must_use]
    pub fn plane(&self) -> &NumberPlane {
        &self.plane
    }

    #[must_use]
    pub fn plane_id(&self) -> ObjectId {
        self.plane_id
    }

    #[must_use]
    pub fn window_id(&self) -> ObjectId {
        self.window_id
    }

    #[must_use]
    pub fn mask(&self) -> Option<Mask> {
        self.mask
    }

    /// Clip the visible area to the polygon through `points`, replacing any
    /// earlier mask.
    pub fn set_mask(&mut self, store: &mut ObjectStore, points: Vec<DVec3>) {
        if let Some(old) = self.mask.take() {
            store.remove(old.mask);
            store.remove(old.shade);
        }
        let invisible = Style::default().with_stroke_width(0.0);
        let shade = VisualObject::new(
            Shape::Difference {
                subtract: self.plane.window_corners(),
            },
            points.clone(),
        )
        .with_style(invisible.filled(Color::BLACK, 1.0));
        let mask = store.insert(VisualObject::polygon(points).with_style(invisible));
        let shade = store.insert(shade);
        self.mask = Some(Mask { mask, shade });
    }

    /// The window followed by the mask and its shade, if a mask is set.
    #[must_use]
    pub fn mask_group(&self) -> Vec<ObjectId> {
        let mut group = vec![self.window_id];
        if let Some(mask) = self.mask {
            group.extend([mask.mask, mask.shade]);
        }
        group
    }

    /// Screen distance of one logical unit along `axis`, sampled between the
    /// first two integers of the axis range.
    #[must_use]
    pub fn unit_shift(&self, axis: Axis) -> f64 {
        let start = self.plane.range(axis).min;
        let p1 = self.plane.number_to_point(axis, start);
        let p2 = self.plane.number_to_point(axis, start + 1.0);
        match axis {
            Axis::X => p2.x - p1.x,
            Axis::Y => p2.y - p1.y,
        }
    }

    /// [`unit_shift`](Self::unit_shift) for an axis named `"x"` or `"y"`.
    ///
    /// # Errors
    ///
    /// Returns [`SpaceError::InvalidAxis`] for any other name.
    pub fn axis_unit_shift(&self, axis: &str) -> Result<f64, SpaceError> {
        Ok(self.unit_shift(axis.parse()?))
    }

    /// One arrow per screen point, each starting at the space origin.
    pub fn point_to_vector(
        &self,
        store: &mut ObjectStore,
        points: &[DVec3],
        style: &ArrowStyle,
    ) -> Vec<ObjectId> {
        store.insert_all(points.iter().map(|&p| style.arrow(self.origin, p)))
    }

    /// One arrow per logical coordinate, each starting at the space origin.
    pub fn coord_to_vector(
        &self,
        store: &mut ObjectStore,
        coords: impl Into<CoordBatch>,
        style: &ArrowStyle,
    ) -> Vec<ObjectId> {
        let coords: CoordBatch = coords.into();
        let points: Vec<DVec3> = coords
            .iter()
            .map(|c| self.plane.coords_to_point(c.x, c.y))
            .collect();
        self.point_to_vector(store, &points, style)
    }

    /// Add objects to the set that follows the space through transforms.
    /// Already registered objects are skipped.
    pub fn register_transformable(&mut self, ids: impl IntoIterator<Item = ObjectId>) {
        for id in ids {
            if !self.transformable.contains(&id) {
                self.transformable.push(id);
            }
        }
    }

    /// Registered objects in registration order.
    #[must_use]
    pub fn transformable_objects(&self) -> &[ObjectId] {
        &self.transformable
    }

    /// The map `p ↦ (p − origin)·M + origin` for this space.
    #[must_use]
    pub fn linear_map(&self, matrix: impl Into<LinearMatrix>) -> AffineMap {
        AffineMap::about(self.origin, matrix)
    }

    /// Build the transforms that carry the plane and every registered object
    /// through `matrix`. Nothing is moved until the caller applies them.
    #[must_use]
    pub fn apply_linear_transform(&self, matrix: impl Into<LinearMatrix>) -> Vec<PendingTransform> {
        let map = self.linear_map(matrix);
        let pending: Vec<PendingTransform> = std::iter::once(self.plane_id)
            .chain(self.transformable.iter().copied())
            .map(|target| PendingTransform { target, map })
            .collect();
        debug!(targets = pending.len(), "built linear transform");
        pending
    }

    /// The unit square spanned by the basis vectors, as a filled polygon.
    pub fn unit_square(&self, store: &mut ObjectStore, style: Style) -> ObjectId {
        let corners = [(0.0, 0.0), (1.0, 0.0), (1.0, 1.0), (0.0, 1.0)]
            .into_iter()
            .map(|(x, y)| self.plane.coords_to_point(x, y))
            .collect();
        store.insert(VisualObject::polygon(corners).with_style(style))
    }
}
