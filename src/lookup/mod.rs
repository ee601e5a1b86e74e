//! Sparse associative containers for voxel data.
//!
//! [`CompactLookup`] stores values under `i64` keys as a sorted list of
//! contiguous runs, which suits keys written in roughly ascending order in a
//! few clusters. [`Sparse3DMap`] builds on it to index voxels by `(i, j, k)`.
//!
//! In both containers, absence of a key is reported by `find` returning
//! `None`, and entries are created only through `at_or_create` / `at` (or
//! the `insert` shorthands).

pub mod compact;
pub mod sparse3d;

pub use self::compact::CompactLookup;
pub use self::sparse3d::Sparse3DMap;
