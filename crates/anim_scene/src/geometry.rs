//! Scenes built on a coordinate space: vectors drawn on a plane that the
//! whole space is then carried through a matrix.

use anim_math::{ArrowStyle, AxisRange, CoordBatch, DMat3, LinearMatrix, SpaceOptions, VectorSpace};
use anim_object::{Color, FRAME_HALF, ORIGIN, ObjectId, Style};
use glam::DVec3;
use tracing::debug;

use crate::error::SceneError;
use crate::script::SceneContext;
use crate::step::Animation;

/// The matrix the geometry scenes transform by, row-major.
pub const EXAMPLE_MATRIX: [[f64; 2]; 2] = [[1.0, 1.0], [-1.0, 2.0]];

/// The vector drawn before a transform, in plane coordinates.
pub const EXAMPLE_VECTOR: [f64; 2] = [1.0, 2.0];

/// A mask covering the whole frame.
#[must_use]
pub fn full_frame_mask() -> Vec<DVec3> {
    let (w, h) = (FRAME_HALF.x, FRAME_HALF.y);
    vec![
        DVec3::new(-w, h, 0.0),
        DVec3::new(-w, -h, 0.0),
        DVec3::new(w, -h, 0.0),
        DVec3::new(w, h, 0.0),
    ]
}

/// Where and how big the space is drawn.
#[derive(Debug, Clone, PartialEq)]
pub struct GeometrySetup {
    pub origin: DVec3,
    pub scale: f64,
    pub x_range: AxisRange,
    pub y_range: AxisRange,
    /// Screen polygon the space is visible through.
    pub mask: Vec<DVec3>,
    /// Draw the green `i` and red `j` basis vectors.
    pub add_bases: bool,
}

impl Default for GeometrySetup {
    fn default() -> Self {
        Self {
            origin: ORIGIN,
            scale: 1.0,
            x_range: AxisRange::default(),
            y_range: AxisRange::default(),
            mask: full_frame_mask(),
            add_bases: true,
        }
    }
}

/// A vector space on screen plus the scripting verbs the matrix scenes use.
#[derive(Debug, Clone)]
pub struct MatrixGeometry {
    space: VectorSpace,
    /// Product of every transform scripted so far, as a column operator.
    applied: DMat3,
}

impl MatrixGeometry {
    /// Create the space, clip it to `setup.mask` and put it on screen.
    pub fn setup(ctx: &mut SceneContext, setup: GeometrySetup) -> Self {
        let mut space = VectorSpace::new(
            ctx.store_mut(),
            setup.origin,
            setup.scale,
            setup.x_range,
            setup.y_range,
            SpaceOptions::default(),
        );
        space.set_mask(ctx.store_mut(), setup.mask);
        ctx.add([space.plane_id()]);
        ctx.add(space.mask_group());

        let mut geometry = Self {
            space,
            applied: DMat3::IDENTITY,
        };
        if setup.add_bases {
            geometry.add_vectors(ctx, [1.0, 0.0], Color::GREEN);
            geometry.add_vectors(ctx, [0.0, 1.0], Color::RED);
        }
        geometry
    }

    #[must_use]
    pub fn space(&self) -> &VectorSpace {
        &self.space
    }

    /// Create arrows for `coords` and register them with the space, without
    /// showing them.
    pub fn vectors(
        &mut self,
        ctx: &mut SceneContext,
        coords: impl Into<CoordBatch>,
        color: Color,
    ) -> Vec<ObjectId> {
        let style = ArrowStyle::for_scale(self.space.scale()).with_color(color);
        let ids = self.space.coord_to_vector(ctx.store_mut(), coords, &style);
        self.space.register_transformable(ids.iter().copied());
        ids
    }

    /// Arrows for `coords`, shown at once.
    pub fn add_vectors(
        &mut self,
        ctx: &mut SceneContext,
        coords: impl Into<CoordBatch>,
        color: Color,
    ) -> Vec<ObjectId> {
        let ids = self.vectors(ctx, coords, color);
        ctx.add(ids.iter().copied());
        ids
    }

    /// Arrows for `coords`, grown out of the origin, then a wait.
    pub fn draw_vectors(
        &mut self,
        ctx: &mut SceneContext,
        coords: impl Into<CoordBatch>,
        color: Color,
    ) -> Vec<ObjectId> {
        let ids = self.vectors(ctx, coords, color);
        ctx.play(
            ids.iter()
                .map(|&target| Animation::GrowArrow { target })
                .collect(),
        );
        ctx.wait();
        ids
    }

    /// Carry the plane and every registered object through `matrix`, then
    /// wait. `run_time` defaults to the configured play time.
    pub fn transform_space(
        &mut self,
        ctx: &mut SceneContext,
        matrix: impl Into<LinearMatrix>,
        run_time: Option<f64>,
    ) {
        let matrix = matrix.into();
        self.applied = matrix.homogeneous() * self.applied;
        let pending = self.space.apply_linear_transform(matrix);
        debug!(targets = pending.len(), "scripting space transform");
        let run_time = run_time.unwrap_or(ctx.config().default_run_time);
        ctx.play_for(Animation::pointwise(pending), run_time);
        ctx.wait();
    }

    /// Shade the image of the unit square under every transform scripted so
    /// far, then hold it for two seconds. Its area is the determinant.
    ///
    /// # Errors
    ///
    /// Returns [`SceneError::Object`] if the square was lost from the store.
    pub fn determinant_area(&self, ctx: &mut SceneContext) -> Result<ObjectId, SceneError> {
        let style = Style::stroked(Color::YELLOW)
            .with_stroke_width(0.0)
            .filled(Color::YELLOW, 0.5);
        let square = self.space.unit_square(ctx.store_mut(), style);
        let map = self.space.linear_map(self.applied);
        ctx.object_mut(square)?.apply_pointwise(|p| map.apply(p));
        ctx.add([square]);
        ctx.wait_for(2.0);
        Ok(square)
    }

    /// Fade out the plane and everything that moves with it.
    pub fn fade_out(&self, ctx: &mut SceneContext) {
        let animations = std::iter::once(self.space.plane_id())
            .chain(self.space.transformable_objects().iter().copied())
            .map(|target| Animation::FadeOut { target })
            .collect();
        ctx.play(animations);
    }
}
