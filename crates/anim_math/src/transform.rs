//! Origin-relative linear transforms.
//!
//! [`AffineMap`] applies a linear map about a fixed origin:
//! `p ↦ (p − origin)·M + origin`. This is what keeps "transform the space"
//! geometrically consistent wherever the space sits on screen.
//!
//! Matrices given as row-major arrays follow the row-vector convention
//! (`p·M`), so `[[a, b], [c, d]]` sends `(1, 0)` to `(a, b)`. A `glam` matrix
//! passed directly is used as the column-vector operator, i.e. it is already
//! `Mᵀ`.

use anim_object::{ObjectError, ObjectId, ObjectStore};
use glam::{DMat2, DMat3, DVec3};
use serde::{Deserialize, Serialize};

/// A 2×2 linear part or an already-homogeneous 3×3 one.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum LinearMatrix {
    Mat2(DMat2),
    Mat3(DMat3),
}

impl LinearMatrix {
    /// Row-major 2×2 matrix applied to row vectors.
    #[must_use]
    pub fn from_rows_2x2(rows: [[f64; 2]; 2]) -> Self {
        Self::Mat2(DMat2::from_cols_array_2d(&rows))
    }

    /// Row-major 3×3 matrix applied to row vectors.
    #[must_use]
    pub fn from_rows_3x3(rows: [[f64; 3]; 3]) -> Self {
        Self::Mat3(DMat3::from_cols_array_2d(&rows))
    }

    /// The 3×3 operator; a 2×2 part gets an identity third row and column.
    #[must_use]
    pub fn homogeneous(self) -> DMat3 {
        match self {
            Self::Mat2(m) => DMat3::from_mat2(m),
            Self::Mat3(m) => m,
        }
    }
}

impl From<DMat2> for LinearMatrix {
    fn from(m: DMat2) -> Self {
        Self::Mat2(m)
    }
}

impl From<DMat3> for LinearMatrix {
    fn from(m: DMat3) -> Self {
        Self::Mat3(m)
    }
}

impl From<[[f64; 2]; 2]> for LinearMatrix {
    fn from(rows: [[f64; 2]; 2]) -> Self {
        Self::from_rows_2x2(rows)
    }
}

impl From<[[f64; 3]; 3]> for LinearMatrix {
    fn from(rows: [[f64; 3]; 3]) -> Self {
        Self::from_rows_3x3(rows)
    }
}

/// A linear map applied about `origin`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AffineMap {
    /// Fixed point of the map.
    pub origin: DVec3,
    /// Column-vector operator.
    pub linear: DMat3,
}

impl AffineMap {
    /// Build the map `p ↦ (p − origin)·M + origin`.
    #[must_use]
    pub fn about(origin: DVec3, matrix: impl Into<LinearMatrix>) -> Self {
        Self {
            origin,
            linear: matrix.into().homogeneous(),
        }
    }

    /// The map that leaves every point where it is.
    #[must_use]
    pub fn identity(origin: DVec3) -> Self {
        Self {
            origin,
            linear: DMat3::IDENTITY,
        }
    }

    #[must_use]
    pub fn apply(&self, point: DVec3) -> DVec3 {
        self.origin + self.linear * (point - self.origin)
    }

    #[must_use]
    pub fn is_identity(&self) -> bool {
        self.linear == DMat3::IDENTITY
    }
}

/// A transform built but not yet executed on its target.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PendingTransform {
    pub target: ObjectId,
    pub map: AffineMap,
}

impl PendingTransform {
    /// Move every control point of the target object.
    ///
    /// # Errors
    ///
    /// Returns [`ObjectError::Unknown`] if the target is not in `store`.
    pub fn apply(&self, store: &mut ObjectStore) -> Result<(), ObjectError> {
        let map = self.map;
        store
            .try_get_mut(self.target)?
            .apply_pointwise(|p| map.apply(p));
        Ok(())
    }
}
