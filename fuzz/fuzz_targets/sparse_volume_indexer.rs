#![no_main]
use cifti_index::{OffsetStorage, SparseVolumeIndexer, VolumeSpace, VoxelMapping, NO_OFFSET};
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    if data.len() < 3 {
        return;
    }
    let dims = [
        i64::from(data[0] % 32),
        i64::from(data[1] % 32),
        i64::from(data[2] % 32),
    ];
    let mapping: Vec<VoxelMapping> = data[3..]
        .chunks_exact(3)
        .enumerate()
        .map(|(n, c)| {
            VoxelMapping::new(
                [i64::from(c[0] as i8), i64::from(c[1] as i8), i64::from(c[2] as i8)],
                n as i64,
            )
        })
        .collect();
    let geometry = VolumeSpace::from_plumb(dims, [-1.5, 2.0, 7.25], [1.0, -2.0, 0.5])
        .plumb()
        .unwrap();
    let dense = SparseVolumeIndexer::from_plumb_with_storage(geometry, &mapping, OffsetStorage::Dense);
    let compact =
        SparseVolumeIndexer::from_plumb_with_storage(geometry, &mapping, OffsetStorage::Compact);
    assert_eq!(dense.voxel_count(), compact.voxel_count());
    for entry in &mapping {
        let [i, j, k] = entry.ijk;
        let offset = dense.offset_for_indices(i, j, k);
        assert_eq!(offset, compact.offset_for_indices(i, j, k));
        if !dense.indices_valid(i, j, k) {
            assert_eq!(offset, NO_OFFSET);
        }
    }
});
