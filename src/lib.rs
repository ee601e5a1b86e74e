//! Sparse voxel indexing and coordinate transforms for CIFTI volume mappings.
//!
//! A CIFTI file stores data only for the voxels listed in its brain-model
//! volume maps. This crate provides the structures used to go from dense
//! voxel space (IJK indices or XYZ world coordinates) to the offset of a
//! voxel's data within such a sparse array.
//!
//! - [`CompactLookup`] is a chunked sparse map over `i64` keys, and
//!   [`Sparse3DMap`] extends it to `(i, j, k)` triples.
//! - [`SparseVolumeIndexer`] maps voxel indices or coordinates of a plumb
//!   volume to sparse data offsets, with `-1` meaning "no data".
//! - [`LinearEquationTransform`] and [`RectangleTransform`] map points
//!   between rectangles of different origin conventions.
//!
//! # Example
//!
//! ```
//! use cifti_index::{SparseVolumeIndexer, VolumeSpace, VoxelMapping};
//!
//! let space = VolumeSpace::from_plumb([10, 10, 10], [0., 0., 0.], [2., 2., 2.]);
//! let mapping = vec![
//!     VoxelMapping::new([1, 2, 3], 0),
//!     VoxelMapping::new([4, 5, 6], 1),
//! ];
//! let indexer = SparseVolumeIndexer::new(&space, &mapping);
//! assert!(indexer.is_valid());
//! assert_eq!(indexer.offset_for_indices(4, 5, 6), 1);
//! assert_eq!(indexer.offset_for_coordinate(2., 4., 6.), 0);
//! assert_eq!(indexer.offset_for_indices(0, 0, 0), -1);
//! ```
#![deny(missing_debug_implementations)]
#![warn(missing_docs, unused_extern_crates, trivial_casts, unused_results)]

#[macro_use]
extern crate quick_error;

#[cfg(feature = "nalgebra_affine")]
pub mod affine;
pub mod error;
pub mod indexer;
pub mod lookup;
pub mod space;
pub mod transform;

pub use crate::error::{IndexError, Result};
pub use crate::indexer::{OffsetStorage, SparseVolumeIndexer, VoxelMapping, NO_OFFSET};
#[cfg(feature = "ndarray_volumes")]
pub use crate::indexer::IntoOffsetVolume;
pub use crate::lookup::{CompactLookup, Sparse3DMap};
pub use crate::space::{PlumbGeometry, VolumeSpace};
pub use crate::transform::{LinearEquationTransform, Origin, Rect, RectangleTransform};
