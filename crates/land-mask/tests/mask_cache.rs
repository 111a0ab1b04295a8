//! Contract tests for mask computation and the on-disk cache.

use land_mask::{compute_mask, load_mask, store_mask, MaskCache, MaskError, Polygon};
use tempmap_common::{BoundingBox, GridSpec};

fn grid(resolution: usize) -> GridSpec {
    GridSpec::new(BoundingBox::new(0.0, 0.0, 3.0, 3.0), resolution).unwrap()
}

fn left_half() -> Vec<Polygon> {
    vec![Polygon::new(vec![[-0.1, -0.1], [1.5, -0.1], [1.5, 3.1], [-0.1, 3.1]]).unwrap()]
}

#[test]
fn stored_mask_loads_bit_identical() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("mask.bin");
    let g = grid(17);
    let polys = vec![
        Polygon::new(vec![[0.2, 0.2], [1.4, 0.3], [1.1, 1.8], [0.1, 1.2]]).unwrap(),
        Polygon::new(vec![[2.0, 2.0], [2.9, 2.1], [2.5, 2.9]]).unwrap(),
    ];
    let mask = compute_mask(&polys, &g);
    store_mask(&mask, &path).unwrap();
    assert_eq!(load_mask(&path, &g).unwrap(), mask);
}

#[test]
fn half_plane_polygon_masks_expected_columns() {
    let mask = compute_mask(&left_half(), &grid(4));
    for row in 0..4 {
        for col in 0..4 {
            assert_eq!(mask.get(col, row), col < 2, "cell ({col}, {row})");
        }
    }
}

#[test]
fn repeated_gets_compute_at_most_once() {
    let dir = tempfile::tempdir().unwrap();
    let cache = MaskCache::new(dir.path().join("mask.bin"));
    let g = grid(8);
    let polys = left_half();

    let first = cache.get(&polys, &g).unwrap();
    let second = cache.get(&polys, &g).unwrap();
    let third = cache.get(&polys, &g).unwrap();

    assert_eq!(first, second);
    assert_eq!(second, third);
    assert_eq!(cache.computations(), 1);
    assert_eq!(cache.hits(), 2);
}

#[test]
fn stale_cache_for_other_grid_is_recomputed() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("mask.bin");
    let polys = left_half();

    store_mask(&compute_mask(&polys, &grid(8)), &path).unwrap();
    assert!(matches!(
        load_mask(&path, &grid(4)),
        Err(MaskError::DimensionMismatch {
            expected: 4,
            found: 8
        })
    ));

    // the cache front end recovers by recomputing and overwriting
    let cache = MaskCache::new(&path);
    let mask = cache.get(&polys, &grid(4)).unwrap();
    assert_eq!(mask.resolution(), 4);
    assert_eq!(cache.computations(), 1);
    assert_eq!(load_mask(&path, &grid(4)).unwrap(), mask);
}
