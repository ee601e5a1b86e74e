#![no_main]
use cifti_index::{CompactLookup, Sparse3DMap};
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    let mut lookup = CompactLookup::new();
    let mut map = Sparse3DMap::new();
    for (n, pair) in data.chunks_exact(2).enumerate() {
        let key = i64::from(i16::from_le_bytes([pair[0], pair[1]]));
        *lookup.at_or_create(key) = n;
        map.insert(key, key >> 3, key & 7, n);
        assert_eq!(lookup.find(key), Some(&n));
        assert_eq!(map.find(key, key >> 3, key & 7), Some(&n));
    }
    let ranges = lookup.chunk_ranges();
    for pair in ranges.windows(2) {
        assert!(*pair[0].end() + 1 < *pair[1].start());
    }
    assert_eq!(lookup.len(), map.len());
});
