//! Module holding the sparse three-dimensional voxel map.

use super::compact::{self, CompactLookup};
use std::collections::btree_map::{self, BTreeMap};

/// A sparse map from `(i, j, k)` voxel indices to values.
///
/// Entries are grouped into scanlines sharing the same `(j, k)` pair. Each
/// scanline is a [`CompactLookup`] along the I axis, so runs of neighbouring
/// voxels cost one chunk rather than one node each. Any `i64` triple is
/// accepted, including negative indices. Entries are never removed
/// individually.
///
/// # Example
///
/// ```
/// # use cifti_index::Sparse3DMap;
/// let mut map = Sparse3DMap::new();
/// map.insert(1, 2, 3, 42_i64);
/// *map.at(-4, 0, 9) += 7;
/// assert_eq!(map.find(1, 2, 3), Some(&42));
/// assert_eq!(map.find(-4, 0, 9), Some(&7));
/// assert_eq!(map.find(1, 2, 4), None);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct Sparse3DMap<T> {
    scanlines: BTreeMap<(i64, i64), CompactLookup<T>>,
}

impl<T> Default for Sparse3DMap<T> {
    fn default() -> Self {
        Sparse3DMap {
            scanlines: BTreeMap::new(),
        }
    }
}

impl<T> Sparse3DMap<T> {
    /// Create an empty map.
    pub fn new() -> Self {
        Self::default()
    }

    /// Fetch the value at the given indices, or `None` if it was never
    /// written. Nothing is created.
    pub fn find(&self, i: i64, j: i64, k: i64) -> Option<&T> {
        self.scanlines.get(&(k, j))?.find(i)
    }

    /// Fetch a mutable reference to the value at the given indices, without
    /// creating it.
    pub fn find_mut(&mut self, i: i64, j: i64, k: i64) -> Option<&mut T> {
        self.scanlines.get_mut(&(k, j))?.find_mut(i)
    }

    /// Whether a value was written at the given indices.
    pub fn contains(&self, i: i64, j: i64, k: i64) -> bool {
        self.find(i, j, k).is_some()
    }

    /// Remove every entry.
    pub fn clear(&mut self) {
        self.scanlines.clear();
    }

    /// Total number of stored voxels.
    pub fn len(&self) -> usize {
        self.scanlines.values().map(CompactLookup::len).sum()
    }

    /// Whether the map holds no voxels.
    pub fn is_empty(&self) -> bool {
        self.scanlines.is_empty()
    }

    /// Iterate over all entries, ordered by K, then J, then I.
    pub fn iter(&self) -> Iter<'_, T> {
        Iter {
            scanlines: self.scanlines.iter(),
            current: None,
        }
    }
}

impl<T: Default> Sparse3DMap<T> {
    /// Obtain a mutable reference to the value at the given indices,
    /// inserting a default value first if absent.
    pub fn at(&mut self, i: i64, j: i64, k: i64) -> &mut T {
        self.scanlines
            .entry((k, j))
            .or_insert_with(CompactLookup::new)
            .at_or_create(i)
    }

    /// Store `value` at the given indices, replacing any previous value.
    pub fn insert(&mut self, i: i64, j: i64, k: i64, value: T) {
        *self.at(i, j, k) = value;
    }
}

/// Iterator over the entries of a [`Sparse3DMap`].
#[derive(Debug, Clone)]
pub struct Iter<'a, T> {
    scanlines: btree_map::Iter<'a, (i64, i64), CompactLookup<T>>,
    current: Option<((i64, i64), compact::Iter<'a, T>)>,
}

impl<'a, T> Iterator for Iter<'a, T> {
    type Item = ([i64; 3], &'a T);

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            if let Some(((k, j), voxels)) = &mut self.current {
                if let Some((i, value)) = voxels.next() {
                    return Some(([i, *j, *k], value));
                }
            }
            let (&key, scanline) = self.scanlines.next()?;
            self.current = Some((key, scanline.iter()));
        }
    }
}

impl<'a, T> IntoIterator for &'a Sparse3DMap<T> {
    type Item = ([i64; 3], &'a T);
    type IntoIter = Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<T: Default> Extend<([i64; 3], T)> for Sparse3DMap<T> {
    fn extend<I: IntoIterator<Item = ([i64; 3], T)>>(&mut self, iter: I) {
        for ([i, j, k], value) in iter {
            self.insert(i, j, k, value);
        }
    }
}
