//! Interfaces and implementations specific to integration with `ndarray`.
//!
//! This module introduces the trait [`IntoOffsetVolume`], which expands the
//! offset table of a [`SparseVolumeIndexer`] into a dense three-dimensional
//! [`Array3`], with [`NO_OFFSET`] wherever a voxel has no data. This is
//! handy for handing the voxel-to-data mapping to array based processing.
//!
//! #### Note on memory order
//!
//! Like NIfTI volumes, the resulting array is in column major order
//! (Fortran order), so that the I axis varies fastest in memory.
use super::{SparseVolumeIndexer, NO_OFFSET};
use ::ndarray::{Array3, ShapeBuilder};

/// Trait for indexers whose offsets can be laid out as an ndarray.
///
/// Please see the [module-level documentation](self) for more details.
pub trait IntoOffsetVolume {
    /// Create an array of shape `(dim_i, dim_j, dim_k)` holding the data
    /// offset of each voxel.
    ///
    /// # Panics
    ///
    /// Panics if the grid is too large to be allocated as a dense array.
    fn to_offset_array(&self) -> Array3<i64>;
}

impl IntoOffsetVolume for SparseVolumeIndexer {
    fn to_offset_array(&self) -> Array3<i64> {
        let [di, dj, dk] = self.dims();
        let shape = (di.max(0) as usize, dj.max(0) as usize, dk.max(0) as usize);
        let mut array = Array3::from_elem(shape.f(), NO_OFFSET);
        for ([i, j, k], offset) in self.iter() {
            array[[i as usize, j as usize, k as usize]] = offset;
        }
        array
    }
}
