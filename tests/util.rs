use cifti_index::{VolumeSpace, VoxelMapping};

/// Space of a 2mm MNI152 grid, as used by standard CIFTI dense files.
#[allow(dead_code)]
pub fn mni_2mm_space() -> VolumeSpace {
    VolumeSpace::from_plumb([91, 109, 91], [90., -126., -72.], [-2., 2., 2.])
}

/// Small grid with distinct origin and spacing on every axis.
#[allow(dead_code)]
pub fn anisotropic_space() -> VolumeSpace {
    VolumeSpace::from_plumb([12, 9, 7], [-30.5, 14.0, 101.25], [1.5, 2.0, 3.25])
}

/// A cortical-ribbon-like mapping: a few runs of voxels along I on
/// scattered scanlines, numbered in scan order.
#[allow(dead_code)]
pub fn ribbon_mapping(dims: [i64; 3]) -> Vec<VoxelMapping> {
    let mut mapping = Vec::new();
    for k in (1..dims[2] - 1).step_by(3) {
        for j in (0..dims[1]).step_by(4) {
            let start = (j + k) % (dims[0] / 2);
            for i in start..(start + dims[0] / 3).min(dims[0]) {
                let offset = mapping.len() as i64;
                mapping.push(VoxelMapping::new([i, j, k], offset));
            }
        }
    }
    mapping
}

/// Every voxel of the grid, in column-major order.
#[allow(dead_code)]
pub fn full_mapping(dims: [i64; 3]) -> Vec<VoxelMapping> {
    let mut mapping = Vec::new();
    for k in 0..dims[2] {
        for j in 0..dims[1] {
            for i in 0..dims[0] {
                let offset = mapping.len() as i64;
                mapping.push(VoxelMapping::new([i, j, k], offset));
            }
        }
    }
    mapping
}
