use ndarray::{arr1, arr2, arr3};

use blobsieve::label::{generate_structure, Structure};

// ---------------------------------------------------------------------------
// Structure::generate
// ---------------------------------------------------------------------------

#[test]
fn test_structure_2d_cross() {
    let s = Structure::generate(2, 1);
    let expected = arr2(&[[false, true, false], [true, true, true], [false, true, false]]);
    assert_eq!(s.mask(), &expected.into_dyn());
    assert_eq!(s.offsets().len(), 4);
}

#[test]
fn test_structure_2d_full() {
    let s = Structure::generate(2, 2);
    assert!(s.mask().iter().all(|&v| v));
    assert_eq!(s.offsets().len(), 8);
}

#[test]
fn test_structure_1d() {
    let s = generate_structure(1, 1);
    assert_eq!(s.mask(), &arr1(&[true, true, true]).into_dyn());
}

#[test]
fn test_structure_3d_neighbor_counts() {
    assert_eq!(Structure::generate(3, 1).offsets().len(), 6);
    assert_eq!(Structure::generate(3, 2).offsets().len(), 18);
    assert_eq!(Structure::generate(3, 3).offsets().len(), 26);
}

#[test]
fn test_structure_3d_cross_layout() {
    let s = Structure::generate(3, 1);
    let f = false;
    let t = true;
    let expected = arr3(&[
        [[f, f, f], [f, t, f], [f, f, f]],
        [[f, t, f], [t, t, t], [f, t, f]],
        [[f, f, f], [f, t, f], [f, f, f]],
    ]);
    assert_eq!(s.mask(), &expected.into_dyn());
}

#[test]
fn test_structure_connectivity_clamped() {
    // Below 1 behaves as face adjacency, above ndim as full adjacency.
    assert_eq!(Structure::generate(2, 0), Structure::generate(2, 1));
    assert_eq!(Structure::generate(2, 5), Structure::generate(2, 2));
}

#[test]
fn test_structure_zero_dimensional() {
    let s = Structure::generate(0, 1);
    assert_eq!(s.ndim(), 0);
    assert_eq!(s.mask().len(), 1);
    assert!(s.offsets().is_empty());
}

// ---------------------------------------------------------------------------
// backward_offsets
// ---------------------------------------------------------------------------

#[test]
fn test_backward_offsets_2d() {
    let mut cross = Structure::generate(2, 1).backward_offsets();
    cross.sort();
    assert_eq!(cross, vec![vec![-1, 0], vec![0, -1]]);

    let mut full = Structure::generate(2, 2).backward_offsets();
    full.sort();
    assert_eq!(full, vec![vec![-1, -1], vec![-1, 0], vec![-1, 1], vec![0, -1]]);
}

#[test]
fn test_backward_offsets_half_of_neighbors() {
    for ndim in 1..=4 {
        for connectivity in 1..=ndim {
            let s = Structure::generate(ndim, connectivity);
            assert_eq!(s.backward_offsets().len() * 2, s.offsets().len());
        }
    }
}
