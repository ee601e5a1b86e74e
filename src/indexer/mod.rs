//! This module defines the sparse volume indexer, which maps voxels of a
//! dense volume grid to offsets into sparse per-voxel data.
//!
//! A CIFTI brain-models map lists the voxels for which a file holds data,
//! each with the position of that voxel's data in the file. The
//! [`SparseVolumeIndexer`] is built from that list once, and then answers
//! "which data offset belongs to this voxel (or coordinate)?" queries.
//! The sentinel [`NO_OFFSET`] (`-1`) is returned wherever there is no data.
//!
//! With the `ndarray_volumes` feature, the offset table can also be
//! exported as a dense array through [`IntoOffsetVolume`].

#[cfg(feature = "ndarray_volumes")]
pub mod ndarray;
mod util;

#[cfg(feature = "ndarray_volumes")]
pub use self::ndarray::IntoOffsetVolume;

use self::util::{indices_to_linear, linear_to_indices};
use crate::error::IndexError;
use crate::lookup::Sparse3DMap;
use crate::space::{PlumbGeometry, VolumeSpace};
use either::Either;
use once_cell::sync::OnceCell;
use tracing::{debug, warn};

/// Offset returned for voxels without data.
pub const NO_OFFSET: i64 = -1;

/// Grids with fewer voxels than this always use dense storage.
const DENSE_MIN_VOXELS: usize = 4096;

/// Dense storage is used when at least `1 / DENSE_FILL_RATIO` of the grid
/// is populated.
const DENSE_FILL_RATIO: usize = 8;

/// A voxel listed in a sparse data source, with the offset of its data.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct VoxelMapping {
    /// Voxel indices along I, J and K.
    pub ijk: [i64; 3],
    /// Offset of the voxel's data in the sparse source.
    pub offset: i64,
}

impl VoxelMapping {
    /// Create a new voxel mapping.
    pub fn new(ijk: [i64; 3], offset: i64) -> Self {
        VoxelMapping { ijk, offset }
    }
}

impl From<([i64; 3], i64)> for VoxelMapping {
    fn from((ijk, offset): ([i64; 3], i64)) -> Self {
        VoxelMapping::new(ijk, offset)
    }
}

/// How an indexer stores its offset table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OffsetStorage {
    /// One slot per voxel of the grid.
    Dense,
    /// Only populated voxels are stored, in a [`Sparse3DMap`].
    Compact,
}

impl OffsetStorage {
    /// Choose a storage for `populated` mapped voxels in a grid of
    /// `voxel_count` voxels. A grid too large to count is always compact.
    pub fn for_density(populated: usize, voxel_count: Option<usize>) -> Self {
        match voxel_count {
            Some(count)
                if count < DENSE_MIN_VOXELS
                    || populated.saturating_mul(DENSE_FILL_RATIO) >= count =>
            {
                OffsetStorage::Dense
            }
            _ => OffsetStorage::Compact,
        }
    }
}

#[derive(Debug, Clone)]
enum OffsetTable {
    Dense(Vec<i64>),
    Compact(Sparse3DMap<i64>),
}

impl OffsetTable {
    fn storage(&self) -> OffsetStorage {
        match self {
            OffsetTable::Dense(_) => OffsetStorage::Dense,
            OffsetTable::Compact(_) => OffsetStorage::Compact,
        }
    }
}

/// Maps voxel indices and coordinates of a plumb volume to offsets in
/// sparse per-voxel data.
///
/// The indexer is built once and never modified afterwards. Queries never
/// fail: out-of-range voxels and voxels without data both resolve to
/// [`NO_OFFSET`]. If the volume geometry is not plumb, the indexer is
/// still created but is invalid (see [`is_valid`](Self::is_valid)) and
/// every query resolves to [`NO_OFFSET`].
#[derive(Debug, Clone)]
pub struct SparseVolumeIndexer {
    geometry: Option<PlumbGeometry>,
    error: Option<IndexError>,
    table: OffsetTable,
    populated: usize,
    extent: OnceCell<Option<([i64; 3], [i64; 3])>>,
}

impl SparseVolumeIndexer {
    /// Build an indexer for the given volume space and voxel mapping.
    ///
    /// The storage is chosen according to how much of the grid the mapping
    /// fills. Mapping entries outside the grid, or with a negative offset,
    /// are ignored. When a voxel is listed more than once, the last entry
    /// wins.
    pub fn new(space: &VolumeSpace, mapping: &[VoxelMapping]) -> Self {
        match space.plumb() {
            Ok(geometry) => Self::from_plumb(geometry, mapping),
            Err(e) => {
                warn!(dims = ?space.dims, error = %e, "cannot index voxels of volume space");
                SparseVolumeIndexer {
                    geometry: None,
                    error: Some(e),
                    table: OffsetTable::Dense(Vec::new()),
                    populated: 0,
                    extent: OnceCell::new(),
                }
            }
        }
    }

    /// Build an indexer from an already validated geometry.
    pub fn from_plumb(geometry: PlumbGeometry, mapping: &[VoxelMapping]) -> Self {
        let storage = OffsetStorage::for_density(mapping.len(), geometry.voxel_count());
        Self::from_plumb_with_storage(geometry, mapping, storage)
    }

    /// Build an indexer from an already validated geometry, using the given
    /// storage regardless of the mapping density.
    ///
    /// Dense storage is only possible when the voxel count of the grid fits
    /// in a `usize`; otherwise compact storage is used instead.
    pub fn from_plumb_with_storage(
        geometry: PlumbGeometry,
        mapping: &[VoxelMapping],
        storage: OffsetStorage,
    ) -> Self {
        let dims = geometry.dims();
        let mut table = match (storage, geometry.voxel_count()) {
            (OffsetStorage::Dense, Some(count)) => OffsetTable::Dense(vec![NO_OFFSET; count]),
            (OffsetStorage::Dense, None) => {
                warn!(?dims, "voxel count overflows, using compact offset storage");
                OffsetTable::Compact(Sparse3DMap::new())
            }
            (OffsetStorage::Compact, _) => OffsetTable::Compact(Sparse3DMap::new()),
        };

        let mut outside = 0usize;
        let mut negative = 0usize;
        for entry in mapping {
            let [i, j, k] = entry.ijk;
            if !geometry.contains_indices(i, j, k) {
                outside += 1;
                continue;
            }
            if entry.offset < 0 {
                negative += 1;
                continue;
            }
            match &mut table {
                OffsetTable::Dense(offsets) => {
                    if let Some(slot) =
                        indices_to_linear(entry.ijk, dims).and_then(|index| offsets.get_mut(index))
                    {
                        *slot = entry.offset;
                    }
                }
                OffsetTable::Compact(map) => map.insert(i, j, k, entry.offset),
            }
        }
        if outside > 0 {
            warn!(
                outside,
                total = mapping.len(),
                ?dims,
                "ignored voxel mappings outside the volume grid"
            );
        }
        if negative > 0 {
            warn!(negative, total = mapping.len(), "ignored voxel mappings with a negative data offset");
        }

        let populated = match &table {
            OffsetTable::Dense(offsets) => offsets.iter().filter(|&&o| o != NO_OFFSET).count(),
            OffsetTable::Compact(map) => map.len(),
        };
        debug!(?dims, storage = ?table.storage(), populated, "built sparse volume indexer");

        SparseVolumeIndexer {
            geometry: Some(geometry),
            error: None,
            table,
            populated,
            extent: OnceCell::new(),
        }
    }

    /// Whether the volume geometry could be indexed. An invalid indexer
    /// answers every query with [`NO_OFFSET`].
    pub fn is_valid(&self) -> bool {
        self.geometry.is_some()
    }

    /// The reason this indexer is invalid, if it is.
    pub fn error(&self) -> Option<&IndexError> {
        self.error.as_ref()
    }

    /// A human readable description of why this indexer is invalid.
    pub fn error_message(&self) -> Option<String> {
        self.error.as_ref().map(ToString::to_string)
    }

    /// The validated volume geometry, if valid.
    pub fn geometry(&self) -> Option<&PlumbGeometry> {
        self.geometry.as_ref()
    }

    /// Dimensions of the indexed grid (all zero if invalid).
    pub fn dims(&self) -> [i64; 3] {
        self.geometry.map_or([0; 3], |g| g.dims())
    }

    /// The storage used for the offset table.
    pub fn storage(&self) -> OffsetStorage {
        self.table.storage()
    }

    /// Number of voxels with a data offset.
    pub fn voxel_count(&self) -> usize {
        self.populated
    }

    /// Whether no voxel has a data offset.
    pub fn is_empty(&self) -> bool {
        self.populated == 0
    }

    /// Whether the given indices lie within the grid dimensions.
    pub fn indices_valid(&self, i: i64, j: i64, k: i64) -> bool {
        self.geometry.map_or(false, |g| g.contains_indices(i, j, k))
    }

    /// Get the data offset of the voxel at the given indices, or
    /// [`NO_OFFSET`] if the indices are out of range or the voxel has no
    /// data.
    pub fn offset_for_indices(&self, i: i64, j: i64, k: i64) -> i64 {
        match &self.table {
            OffsetTable::Dense(offsets) => indices_to_linear([i, j, k], self.dims())
                .and_then(|index| offsets.get(index).copied())
                .unwrap_or(NO_OFFSET),
            OffsetTable::Compact(map) => {
                if self.indices_valid(i, j, k) {
                    map.find(i, j, k).copied().unwrap_or(NO_OFFSET)
                } else {
                    NO_OFFSET
                }
            }
        }
    }

    /// Get the data offset of the voxel enclosing the given coordinate, or
    /// [`NO_OFFSET`] if there is none.
    pub fn offset_for_coordinate(&self, x: f32, y: f32, z: f32) -> i64 {
        self.coordinate_to_indices(x, y, z)
            .map_or(NO_OFFSET, |[i, j, k]| self.offset_for_indices(i, j, k))
    }

    /// Convert a coordinate to the indices of the enclosing voxel. The
    /// indices may lie outside the grid dimensions.
    pub fn coordinate_to_indices(&self, x: f32, y: f32, z: f32) -> Option<[i64; 3]> {
        self.geometry?.enclosing_voxel(x, y, z)
    }

    /// Convert a coordinate to the indices of the enclosing voxel, if that
    /// voxel lies within the grid.
    pub fn voxel_index_for_coordinate(&self, x: f32, y: f32, z: f32) -> Option<[i64; 3]> {
        self.coordinate_to_indices(x, y, z)
            .filter(|&[i, j, k]| self.indices_valid(i, j, k))
    }

    /// Convert (possibly fractional) voxel indices to the coordinate of the
    /// voxel centre.
    pub fn indices_to_coordinate(&self, i: f32, j: f32, k: f32) -> Option<[f32; 3]> {
        self.geometry.map(|g| g.index_to_space(i, j, k))
    }

    /// Minimum and maximum voxel-centre coordinates of the whole grid.
    pub fn bounding_box(&self) -> Option<([f32; 3], [f32; 3])> {
        self.geometry?.bounding_box()
    }

    /// Minimum and maximum indices over the voxels with data. Computed on
    /// first use.
    pub fn populated_extent(&self) -> Option<([i64; 3], [i64; 3])> {
        *self.extent.get_or_init(|| {
            self.iter().fold(None, |extent, (ijk, _)| {
                let (mut min, mut max) = extent.unwrap_or((ijk, ijk));
                for axis in 0..3 {
                    min[axis] = min[axis].min(ijk[axis]);
                    max[axis] = max[axis].max(ijk[axis]);
                }
                Some((min, max))
            })
        })
    }

    /// Iterate over the voxels with data and their offsets. Dense tables
    /// are visited in column-major order, compact ones by K, then J, then I;
    /// both yield the same sequence.
    pub fn iter<'a>(&'a self) -> impl Iterator<Item = ([i64; 3], i64)> + 'a {
        let dims = self.dims();
        match &self.table {
            OffsetTable::Dense(offsets) => Either::Left(
                offsets
                    .iter()
                    .enumerate()
                    .filter(|&(_, &offset)| offset != NO_OFFSET)
                    .map(move |(index, &offset)| (linear_to_indices(index, dims), offset)),
            ),
            OffsetTable::Compact(map) => Either::Right(map.iter().map(|(ijk, &offset)| (ijk, offset))),
        }
    }
}
