//! Region processing regression test
//!
//! Labels, fills, filters, expands and measures regions of a thresholded
//! test stack, and checks the results against direct voxel counts.
//!
//! Run with:
//! ```
//! cargo test -p spotfishing-region --test region_reg
//! ```

use ndarray::Array3;
use spotfishing_core::LabelMap;
use spotfishing_region::{
    Connectivity, component_sizes, count_labels, distance_transform_edt, expand_labels,
    fill_holes, label_components, regionprops, regionprops_table, remove_small_objects,
    select_by_size,
};
use spotfishing_test::{RegParams, load_test_volume};

fn labeled_count(labels: &LabelMap) -> usize {
    labels.iter().filter(|&&l| l != 0).count()
}

#[test]
fn region_reg() {
    let mut rp = RegParams::new("region");

    let volume = load_test_volume("spots_small.npy").expect("load spots_small.npy");
    let mask = volume.mapv(|v| v > 300.0);

    // --- Test 1: connectivity never increases the region count ---
    let (face, n_face) = label_components(&mask, Connectivity::Face).expect("face");
    let (edge, n_edge) = label_components(&mask, Connectivity::Edge).expect("edge");
    let (full, n_full) = label_components(&mask, Connectivity::Full).expect("full");
    eprintln!("regions: face {n_face}, edge {n_edge}, full {n_full}");
    rp.compare_values(1.0, f64::from(u8::from(n_face >= n_edge && n_edge >= n_full)), 0.0);
    rp.compare_values(4.0, n_full as f64, 0.0);
    for labels in [&face, &edge, &full] {
        rp.compare_values(
            mask.iter().filter(|&&m| m).count() as f64,
            labeled_count(labels) as f64,
            0.0,
        );
    }
    rp.compare_values(n_full as f64, count_labels(&full) as f64, 0.0);

    // --- Test 2: sizes sum to the foreground ---
    let sizes = component_sizes(&full);
    rp.compare_values(
        labeled_count(&full) as f64,
        sizes.values().sum::<usize>() as f64,
        0.0,
    );

    // --- Test 3: solid blobs have no holes to fill ---
    let filled = fill_holes(&mask, Connectivity::Face);
    rp.compare_values(1.0, f64::from(u8::from(filled == mask)), 0.0);

    // --- Test 4: size selection ---
    let big = remove_small_objects(&full, 20);
    let kept = sizes.values().filter(|&&s| s >= 20).count();
    rp.compare_values(kept as f64, count_labels(&big) as f64, 0.0);
    let band = select_by_size(&full, 1, usize::MAX);
    rp.compare_labels(&full, &band);

    // --- Test 5: expansion grows without merging ---
    let mut previous = labeled_count(&full);
    for distance in [1.0, 2.0, 3.0, 5.0] {
        let grown = expand_labels(&full, distance).expect("expand");
        let now = labeled_count(&grown);
        rp.compare_values(1.0, f64::from(u8::from(now >= previous)), 0.0);
        rp.compare_values(n_full as f64, count_labels(&grown) as f64, 0.0);
        for (g, &o) in grown.iter().zip(full.iter()) {
            if o != 0 && *g != o {
                rp.compare_values(o as f64, *g as f64, 0.0);
            }
        }
        previous = now;
    }

    // --- Test 6: measurement agrees with direct sums ---
    let props = regionprops(&full, &volume).expect("regionprops");
    let table = regionprops_table(&full, &volume).expect("regionprops_table");
    rp.compare_values(n_full as f64, props.len() as f64, 0.0);
    rp.compare_values(props.len() as f64, table.n_rows() as f64, 0.0);
    for p in &props {
        let voxels: Vec<_> = full
            .indexed_iter()
            .filter(|(_, l)| **l == p.label)
            .map(|(pos, _)| pos)
            .collect();
        let n = voxels.len() as f64;
        rp.compare_values(n, p.area as f64, 0.0);
        let mean: f64 = voxels.iter().map(|&(z, y, x)| volume[[z, y, x]]).sum::<f64>() / n;
        rp.compare_values(mean, p.intensity_mean, 1e-9);
        let zc: f64 = voxels.iter().map(|&(z, _, _)| z as f64).sum::<f64>() / n;
        rp.compare_values(zc, p.centroid[0], 1e-9);
    }

    assert!(rp.cleanup(), "region regression test failed");
}

#[test]
fn distance_reg() {
    let mut rp = RegParams::new("distance");

    // Two seed voxels in an otherwise empty volume
    let mut seeds = Array3::from_elem((7, 9, 11), true);
    seeds[[1, 1, 1]] = false;
    seeds[[5, 7, 9]] = false;
    let ft = distance_transform_edt(&seeds).expect("edt");

    // --- Test 1: distances match the nearer seed ---
    for ((z, y, x), &d) in ft.distances.indexed_iter() {
        let a = ((z as f64 - 1.0).powi(2) + (y as f64 - 1.0).powi(2) + (x as f64 - 1.0).powi(2))
            .sqrt();
        let b = ((z as f64 - 5.0).powi(2) + (y as f64 - 7.0).powi(2) + (x as f64 - 9.0).powi(2))
            .sqrt();
        rp.compare_values(a.min(b), d, 1e-12);
    }

    // --- Test 2: nearest indices point at a seed ---
    let on_seed = ft
        .indices
        .iter()
        .all(|idx| *idx == [1, 1, 1] || *idx == [5, 7, 9]);
    rp.compare_values(1.0, f64::from(u8::from(on_seed)), 0.0);

    // --- Test 3: a mask without background has no features ---
    rp.compare_values(
        1.0,
        f64::from(u8::from(
            distance_transform_edt(&Array3::from_elem((2, 2, 2), true)).is_err(),
        )),
        0.0,
    );

    assert!(rp.cleanup(), "distance regression test failed");
}

#[test]
fn fill_holes_reg() {
    let mut rp = RegParams::new("fill_holes");

    // Hollow 5x5x5 shell with a 3x3x3 cavity
    let mut shell = Array3::from_elem((9, 9, 9), false);
    for z in 2..7 {
        for y in 2..7 {
            for x in 2..7 {
                let inner = (3..6).contains(&z) && (3..6).contains(&y) && (3..6).contains(&x);
                shell[[z, y, x]] = !inner;
            }
        }
    }

    // --- Test 1: the cavity is filled ---
    let filled = fill_holes(&shell, Connectivity::Face);
    rp.compare_values(125.0, filled.iter().filter(|&&m| m).count() as f64, 0.0);

    // --- Test 2: an opened shell keeps its cavity ---
    let mut open = shell.clone();
    open[[4, 4, 2]] = false;
    let filled = fill_holes(&open, Connectivity::Face);
    rp.compare_values(1.0, f64::from(u8::from(filled == open)), 0.0);

    // --- Test 3: the filled shell is a single component ---
    let (_, n) = label_components(&fill_holes(&shell, Connectivity::Face), Connectivity::Full)
        .expect("label");
    rp.compare_values(1.0, n as f64, 0.0);

    assert!(rp.cleanup(), "fill_holes regression test failed");
}
