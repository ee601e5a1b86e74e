//! Miscellaneous indexing functions

use std::convert::TryFrom;

/// Linear offset of a voxel in a dense grid, in column-major order (I
/// varies fastest). Returns `None` when the indices are outside `dims` or
/// the offset does not fit in a `usize`.
pub fn indices_to_linear(ijk: [i64; 3], dims: [i64; 3]) -> Option<usize> {
    if !Iterator::zip(ijk.iter(), dims.iter()).all(|(&v, &d)| v >= 0 && v < d) {
        return None;
    }

    Iterator::zip(ijk.iter(), dims.iter())
        .rev()
        .try_fold(0usize, |acc, (&v, &d)| {
            let d = usize::try_from(d).ok()?;
            let v = usize::try_from(v).ok()?;
            acc.checked_mul(d)?.checked_add(v)
        })
}

/// Inverse of [`indices_to_linear`].
pub fn linear_to_indices(index: usize, dims: [i64; 3]) -> [i64; 3] {
    let di = dims[0] as usize;
    let dj = dims[1] as usize;
    [
        (index % di) as i64,
        ((index / di) % dj) as i64,
        (index / (di * dj)) as i64,
    ]
}
