//! This module defines the volume geometry types.
//!
//! A [`VolumeSpace`] holds the voxel grid dimensions and the voxel-to-world
//! affine, laid out as the three `srow` rows of a NIfTI header. Sparse voxel
//! indexing is only supported on "plumb" volumes, whose axes are aligned to
//! the world axes; [`VolumeSpace::plumb`] validates this and produces a
//! [`PlumbGeometry`].

use crate::error::{IndexError, Result};
use approx::abs_diff_eq;
use num_traits::ToPrimitive;
use std::convert::TryFrom;

/// Absolute tolerance under which an off-diagonal affine term counts as zero.
const PLUMB_EPSILON: f32 = 1e-6;

/// Voxel grid dimensions and voxel-to-world affine of a volume.
///
/// The translation column of `sform` is the world coordinate of the centre
/// of voxel `(0, 0, 0)`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct VolumeSpace {
    /// Number of voxels along I, J and K.
    pub dims: [i64; 3],
    /// The first three rows of the 4x4 voxel-to-world affine.
    pub sform: [[f32; 4]; 3],
}

impl VolumeSpace {
    /// Create a volume space from its dimensions and affine rows.
    pub fn new(dims: [i64; 3], sform: [[f32; 4]; 3]) -> Self {
        VolumeSpace { dims, sform }
    }

    /// Create an axis-aligned volume space from the centre of the first
    /// voxel and the voxel spacing along each axis.
    pub fn from_plumb(dims: [i64; 3], center_origin: [f32; 3], spacing: [f32; 3]) -> Self {
        #[rustfmt::skip]
        let sform = [
            [spacing[0], 0.0, 0.0, center_origin[0]],
            [0.0, spacing[1], 0.0, center_origin[1]],
            [0.0, 0.0, spacing[2], center_origin[2]],
        ];
        VolumeSpace { dims, sform }
    }

    /// Whether the affine has no rotation or shear.
    pub fn is_plumb(&self) -> bool {
        self.plumb().is_ok()
    }

    /// Extract the origin and spacing of an axis-aligned volume.
    ///
    /// # Errors
    ///
    /// - `IndexError::NonPlumbGeometry` if an off-diagonal term of the 3x3
    /// part of the affine is not zero.
    /// - `IndexError::DegenerateSpacing` if a diagonal term is zero or not
    /// finite.
    pub fn plumb(&self) -> Result<PlumbGeometry> {
        for (row, values) in self.sform.iter().enumerate() {
            for (col, value) in values[..3].iter().enumerate() {
                if row != col && !abs_diff_eq!(*value, 0.0, epsilon = PLUMB_EPSILON) {
                    return Err(IndexError::NonPlumbGeometry);
                }
            }
        }

        let mut spacing = [0.0; 3];
        let mut center_origin = [0.0; 3];
        for axis in 0..3 {
            let s = self.sform[axis][axis];
            if s == 0.0 || !s.is_finite() {
                return Err(IndexError::DegenerateSpacing(axis, s));
            }
            spacing[axis] = s;
            center_origin[axis] = self.sform[axis][3];
        }

        Ok(PlumbGeometry {
            dims: self.dims,
            center_origin,
            spacing,
        })
    }
}

/// Validated geometry of an axis-aligned ("plumb") volume.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PlumbGeometry {
    dims: [i64; 3],
    center_origin: [f32; 3],
    spacing: [f32; 3],
}

impl PlumbGeometry {
    /// Number of voxels along I, J and K.
    pub fn dims(&self) -> [i64; 3] {
        self.dims
    }

    /// World coordinate of the centre of voxel `(0, 0, 0)`.
    pub fn center_origin(&self) -> [f32; 3] {
        self.center_origin
    }

    /// Voxel spacing along each axis. May be negative for flipped axes.
    pub fn spacing(&self) -> [f32; 3] {
        self.spacing
    }

    /// World coordinate of the corner of voxel `(0, 0, 0)`, half a voxel
    /// away from its centre. Voxel `i` spans `[corner + i * s, corner + (i + 1) * s)`.
    pub fn corner_origin(&self) -> [f32; 3] {
        [
            self.center_origin[0] - self.spacing[0] / 2.0,
            self.center_origin[1] - self.spacing[1] / 2.0,
            self.center_origin[2] - self.spacing[2] / 2.0,
        ]
    }

    /// Total number of voxels in the grid, zero if any dimension is not
    /// positive. `None` if the count does not fit in a `usize`.
    pub fn voxel_count(&self) -> Option<usize> {
        if self.is_empty() {
            return Some(0);
        }
        self.dims.iter().try_fold(1usize, |acc, &d| {
            usize::try_from(d).ok().and_then(|d| acc.checked_mul(d))
        })
    }

    /// Whether the grid holds no voxels.
    pub fn is_empty(&self) -> bool {
        self.dims.iter().any(|&d| d <= 0)
    }

    /// Whether the given indices lie within the grid dimensions.
    pub fn contains_indices(&self, i: i64, j: i64, k: i64) -> bool {
        Iterator::zip([i, j, k].iter(), self.dims.iter()).all(|(&v, &d)| v >= 0 && v < d)
    }

    /// Convert voxel indices to the world coordinate of the voxel centre.
    /// Fractional indices are allowed.
    pub fn index_to_space(&self, i: f32, j: f32, k: f32) -> [f32; 3] {
        [
            self.center_origin[0] + i * self.spacing[0],
            self.center_origin[1] + j * self.spacing[1],
            self.center_origin[2] + k * self.spacing[2],
        ]
    }

    /// Convert a world coordinate to the indices of the voxel enclosing it.
    ///
    /// The resulting indices may lie outside the grid dimensions. `None` is
    /// returned if a coordinate is not finite or its index does not fit in
    /// an `i64`.
    pub fn enclosing_voxel(&self, x: f32, y: f32, z: f32) -> Option<[i64; 3]> {
        let corner = self.corner_origin();
        let index = |coord: f32, axis: usize| -> Option<i64> {
            let relative = (f64::from(coord) - f64::from(corner[axis])) / f64::from(self.spacing[axis]);
            relative.floor().to_i64()
        };
        Some([index(x, 0)?, index(y, 1)?, index(z, 2)?])
    }

    /// Minimum and maximum voxel-centre coordinates over the grid, or
    /// `None` for an empty grid.
    pub fn bounding_box(&self) -> Option<([f32; 3], [f32; 3])> {
        if self.is_empty() {
            return None;
        }
        let first = self.index_to_space(0.0, 0.0, 0.0);
        let last = self.index_to_space(
            (self.dims[0] - 1) as f32,
            (self.dims[1] - 1) as f32,
            (self.dims[2] - 1) as f32,
        );
        let mut min = [0.0; 3];
        let mut max = [0.0; 3];
        for axis in 0..3 {
            min[axis] = first[axis].min(last[axis]);
            max[axis] = first[axis].max(last[axis]);
        }
        Some((min, max))
    }
}

#[cfg(test)]
mod tests {
    use super::VolumeSpace;
    use crate::error::IndexError;
    use approx::assert_abs_diff_eq;

    #[test]
    fn plumb_geometry() {
        let space = VolumeSpace::from_plumb([91, 109, 91], [-90., -126., -72.], [2., 2., 2.]);
        let geometry = space.plumb().unwrap();
        assert_eq!(geometry.dims(), [91, 109, 91]);
        assert_eq!(geometry.spacing(), [2., 2., 2.]);
        assert_eq!(geometry.center_origin(), [-90., -126., -72.]);
        assert_eq!(geometry.corner_origin(), [-91., -127., -73.]);
        assert_eq!(geometry.voxel_count(), Some(91 * 109 * 91));
    }

    #[test]
    fn huge_grid_has_no_voxel_count() {
        let geometry = VolumeSpace::from_plumb([1 << 32; 3], [0.; 3], [1.; 3]).plumb().unwrap();
        assert_eq!(geometry.voxel_count(), None);
        assert!(!geometry.is_empty());
        assert!(geometry.contains_indices((1 << 32) - 1, 0, 0));
        assert!(!geometry.contains_indices(1 << 32, 0, 0));
    }

    #[test]
    #[rustfmt::skip]
    fn rotated_space_is_not_plumb() {
        let space = VolumeSpace::new([10, 10, 10], [
            [0.0, -1.0, 0.0, 0.0],
            [1.0,  0.0, 0.0, 0.0],
            [0.0,  0.0, 1.0, 0.0],
        ]);
        assert_eq!(space.plumb(), Err(IndexError::NonPlumbGeometry));
        assert!(!space.is_plumb());
    }

    #[test]
    fn tiny_shear_is_tolerated() {
        let mut space = VolumeSpace::from_plumb([4, 4, 4], [0.; 3], [1.; 3]);
        space.sform[0][1] = 1e-8;
        assert!(space.is_plumb());
        space.sform[0][1] = 1e-3;
        assert!(!space.is_plumb());
    }

    #[test]
    fn zero_spacing_is_degenerate() {
        let space = VolumeSpace::from_plumb([4, 4, 4], [0.; 3], [1., 0., 1.]);
        assert_eq!(space.plumb(), Err(IndexError::DegenerateSpacing(1, 0.)));
        let space = VolumeSpace::from_plumb([4, 4, 4], [0.; 3], [1., 1., f32::NAN]);
        assert!(matches!(space.plumb(), Err(IndexError::DegenerateSpacing(2, _))));
    }

    #[test]
    fn enclosing_voxel_uses_corner_origin() {
        let geometry = VolumeSpace::from_plumb([10, 10, 10], [10., 20., 30.], [2., 2., 2.])
            .plumb()
            .unwrap();
        assert_eq!(geometry.enclosing_voxel(10., 20., 30.), Some([0, 0, 0]));
        assert_eq!(geometry.enclosing_voxel(9., 19., 29.), Some([0, 0, 0]));
        assert_eq!(geometry.enclosing_voxel(8.9, 18.9, 28.9), Some([-1, -1, -1]));
        assert_eq!(geometry.enclosing_voxel(11., 21., 31.), Some([1, 1, 1]));
        assert_eq!(geometry.enclosing_voxel(f32::NAN, 0., 0.), None);
        assert_eq!(geometry.enclosing_voxel(0., f32::INFINITY, 0.), None);
    }

    #[test]
    fn negative_spacing_flips_axis() {
        let geometry = VolumeSpace::from_plumb([10, 10, 10], [0., 0., 0.], [-2., 2., 2.])
            .plumb()
            .unwrap();
        assert_eq!(geometry.enclosing_voxel(-6., 0., 0.), Some([3, 0, 0]));
        assert_eq!(geometry.index_to_space(3., 0., 0.), [-6., 0., 0.]);
        let (min, max) = geometry.bounding_box().unwrap();
        assert_abs_diff_eq!(min[0], -18.);
        assert_abs_diff_eq!(max[0], 0.);
        assert_abs_diff_eq!(max[2], 18.);
    }

    #[test]
    fn empty_grid() {
        let geometry = VolumeSpace::from_plumb([0, 5, 5], [0.; 3], [1.; 3]).plumb().unwrap();
        assert_eq!(geometry.voxel_count(), Some(0));
        assert!(geometry.is_empty());
        assert_eq!(geometry.bounding_box(), None);
        assert!(!geometry.contains_indices(0, 0, 0));
    }
}
