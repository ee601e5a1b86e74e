//! Module holding the chunked one-dimensional sparse lookup.

use std::ops::RangeInclusive;

/// A contiguous run of present keys, stored as one block.
#[derive(Debug, Clone, PartialEq)]
struct Chunk<T> {
    start: i64,
    elements: Vec<T>,
}

impl<T> Chunk<T> {
    /// Key of the last element. Chunks are never empty.
    fn last(&self) -> i64 {
        self.start + (self.elements.len() - 1) as i64
    }

    fn contains(&self, key: i64) -> bool {
        key >= self.start && key <= self.last()
    }
}

/// A sparse map from `i64` keys to values, optimized for keys that come in
/// a small number of contiguous runs (such as voxel linear offsets written
/// in scan order).
///
/// Keys are stored in chunks sorted by their first key. Chunks never touch:
/// a write at the boundary of a chunk extends it, and a write filling the
/// single-key gap between two chunks merges them. Entries are never removed
/// individually.
///
/// # Example
///
/// ```
/// # use cifti_index::CompactLookup;
/// let mut lookup = CompactLookup::new();
/// *lookup.at_or_create(10) = 'a';
/// *lookup.at_or_create(12) = 'c';
/// assert_eq!(lookup.chunk_count(), 2);
/// *lookup.at_or_create(11) = 'b';
/// assert_eq!(lookup.chunk_count(), 1);
/// assert_eq!(lookup.find(11), Some(&'b'));
/// assert_eq!(lookup.find(13), None);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct CompactLookup<T> {
    chunks: Vec<Chunk<T>>,
}

impl<T> Default for CompactLookup<T> {
    fn default() -> Self {
        CompactLookup { chunks: Vec::new() }
    }
}

impl<T> CompactLookup<T> {
    /// Create an empty lookup.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of chunks with a `start` not greater than `key`. The chunk
    /// that may contain `key` is the one just before this position.
    fn upper_bound(&self, key: i64) -> usize {
        self.chunks.partition_point(|c| c.start <= key)
    }

    /// Fetch the value stored at `key`, or `None` if it was never written.
    pub fn find(&self, key: i64) -> Option<&T> {
        let high = self.upper_bound(key);
        if high == 0 {
            return None;
        }
        let chunk = &self.chunks[high - 1];
        if chunk.contains(key) {
            Some(&chunk.elements[(key - chunk.start) as usize])
        } else {
            None
        }
    }

    /// Fetch a mutable reference to the value stored at `key`, without
    /// creating it.
    pub fn find_mut(&mut self, key: i64) -> Option<&mut T> {
        let high = self.upper_bound(key);
        if high == 0 {
            return None;
        }
        let chunk = &mut self.chunks[high - 1];
        if chunk.contains(key) {
            let offset = (key - chunk.start) as usize;
            Some(&mut chunk.elements[offset])
        } else {
            None
        }
    }

    /// Whether a value was ever written at `key`.
    pub fn contains_key(&self, key: i64) -> bool {
        self.find(key).is_some()
    }

    /// Remove every entry.
    pub fn clear(&mut self) {
        self.chunks.clear();
    }

    /// Total number of stored keys.
    pub fn len(&self) -> usize {
        self.chunks.iter().map(|c| c.elements.len()).sum()
    }

    /// Whether no key was written since creation or the last `clear`.
    pub fn is_empty(&self) -> bool {
        self.chunks.is_empty()
    }

    /// Number of contiguous runs currently stored.
    pub fn chunk_count(&self) -> usize {
        self.chunks.len()
    }

    /// The key range covered by each chunk, in ascending order.
    pub fn chunk_ranges(&self) -> Vec<RangeInclusive<i64>> {
        self.chunks.iter().map(|c| c.start..=c.last()).collect()
    }

    /// Iterate over all entries in ascending key order.
    pub fn iter(&self) -> Iter<'_, T> {
        Iter {
            chunks: self.chunks.iter(),
            current: None,
        }
    }

    /// Iterate over all stored keys in ascending order.
    pub fn keys<'a>(&'a self) -> impl Iterator<Item = i64> + 'a {
        self.iter().map(|(k, _)| k)
    }

    fn debug_check_chunks(&self) {
        debug_assert!(self.chunks.iter().all(|c| !c.elements.is_empty()));
        debug_assert!(self
            .chunks
            .windows(2)
            .all(|w| i128::from(w[1].start) - i128::from(w[0].last()) > 1));
    }
}

impl<T: Default> CompactLookup<T> {
    /// Obtain a mutable reference to the value at `key`, inserting a
    /// default value first if the key is not present.
    pub fn at_or_create(&mut self, key: i64) -> &mut T {
        let high = self.upper_bound(key);

        let mut attach_low = false;
        if high > 0 {
            let low_chunk = &self.chunks[high - 1];
            if low_chunk.contains(key) {
                let offset = (key - low_chunk.start) as usize;
                return &mut self.chunks[high - 1].elements[offset];
            }
            attach_low = low_chunk.last().checked_add(1) == Some(key);
        }
        let attach_high = high < self.chunks.len()
            && key.checked_add(1) == Some(self.chunks[high].start);

        let (chunk, offset) = match (attach_low, attach_high) {
            (true, true) => {
                let next = self.chunks.remove(high);
                let low_chunk = &mut self.chunks[high - 1];
                low_chunk.elements.push(T::default());
                let joint = low_chunk.elements.len() - 1;
                low_chunk.elements.extend(next.elements);
                (high - 1, joint)
            }
            (true, false) => {
                let low_chunk = &mut self.chunks[high - 1];
                low_chunk.elements.push(T::default());
                (high - 1, low_chunk.elements.len() - 1)
            }
            (false, true) => {
                let high_chunk = &mut self.chunks[high];
                high_chunk.elements.insert(0, T::default());
                high_chunk.start -= 1;
                (high, 0)
            }
            (false, false) => {
                self.chunks.insert(
                    high,
                    Chunk {
                        start: key,
                        elements: vec![T::default()],
                    },
                );
                (high, 0)
            }
        };
        self.debug_check_chunks();
        &mut self.chunks[chunk].elements[offset]
    }

    /// Store `value` at `key`, replacing any previous value.
    pub fn insert(&mut self, key: i64, value: T) {
        *self.at_or_create(key) = value;
    }
}

/// Iterator over the entries of a [`CompactLookup`], in ascending key order.
#[derive(Debug, Clone)]
pub struct Iter<'a, T> {
    chunks: std::slice::Iter<'a, Chunk<T>>,
    current: Option<(i64, std::iter::Enumerate<std::slice::Iter<'a, T>>)>,
}

impl<'a, T> Iterator for Iter<'a, T> {
    type Item = (i64, &'a T);

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            if let Some((start, elements)) = &mut self.current {
                if let Some((offset, value)) = elements.next() {
                    return Some((*start + offset as i64, value));
                }
            }
            let chunk = self.chunks.next()?;
            self.current = Some((chunk.start, chunk.elements.iter().enumerate()));
        }
    }
}

impl<'a, T> IntoIterator for &'a CompactLookup<T> {
    type Item = (i64, &'a T);
    type IntoIter = Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<T: Default> Extend<(i64, T)> for CompactLookup<T> {
    fn extend<I: IntoIterator<Item = (i64, T)>>(&mut self, iter: I) {
        for (key, value) in iter {
            self.insert(key, value);
        }
    }
}

impl<T: Default> std::iter::FromIterator<(i64, T)> for CompactLookup<T> {
    fn from_iter<I: IntoIterator<Item = (i64, T)>>(iter: I) -> Self {
        let mut lookup = CompactLookup::new();
        lookup.extend(iter);
        lookup
    }
}
