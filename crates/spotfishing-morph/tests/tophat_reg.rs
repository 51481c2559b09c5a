//! Grayscale morphology regression test
//!
//! Run with:
//! ```
//! cargo test -p spotfishing-morph --test tophat_reg
//! ```

use ndarray::{Array3, s};
use spotfishing_morph::{
    Sel3d, bottom_hat_gray, close_gray, dilate_gray, erode_gray, open_gray, top_hat_gray,
};
use spotfishing_test::{RegParams, load_test_volume};

fn flag(b: bool) -> f64 {
    f64::from(u8::from(b))
}

#[test]
fn tophat_reg() {
    let mut rp = RegParams::new("tophat");

    let volume = load_test_volume("spots_small.npy").expect("load spots_small.npy");
    let ball = Sel3d::create_ball(2);
    rp.compare_values(33.0, ball.hit_count() as f64, 0.0);

    // --- Test 1: erosion <= input <= dilation ---
    let eroded = erode_gray(&volume, &ball).expect("erode");
    let dilated = dilate_gray(&volume, &ball).expect("dilate");
    let ordered = eroded
        .iter()
        .zip(volume.iter())
        .zip(dilated.iter())
        .all(|((e, v), d)| e <= v && v <= d);
    rp.compare_values(1.0, flag(ordered), 0.0);

    // --- Test 2: opening <= input <= closing away from the border ---
    let opened = open_gray(&volume, &ball).expect("open");
    let closed = close_gray(&volume, &ball).expect("close");
    let inner = s![2..-2, 2..-2, 2..-2];
    let bounded = opened
        .slice(inner)
        .iter()
        .zip(volume.slice(inner).iter())
        .zip(closed.slice(inner).iter())
        .all(|((o, v), c)| o <= v && v <= c);
    rp.compare_values(1.0, flag(bounded), 0.0);

    // --- Test 3: top-hat is non-negative and peaks at the brightest blob ---
    let tophat = top_hat_gray(&volume, &ball).expect("tophat");
    rp.compare_values(1.0, flag(tophat.slice(inner).iter().all(|&v| v >= 0.0)), 0.0);
    let (argmax, _) = tophat
        .indexed_iter()
        .fold(((0, 0, 0), f64::NEG_INFINITY), |best, (p, &v)| {
            if v > best.1 { (p, v) } else { best }
        });
    eprintln!("top-hat maximum at {argmax:?}");
    rp.compare_values(4.0, argmax.0 as f64, 1.0);
    rp.compare_values(16.0, argmax.1 as f64, 1.0);
    rp.compare_values(16.0, argmax.2 as f64, 1.0);

    // --- Test 4: black top-hat is the white top-hat of the negative ---
    let bottom = bottom_hat_gray(&volume, &ball).expect("bottom hat");
    let negated = top_hat_gray(&volume.mapv(|v| -v), &ball).expect("negated tophat");
    rp.compare_volumes(&bottom, &negated, 0.0);

    assert!(rp.cleanup(), "tophat regression test failed");
}

#[test]
fn tophat_features_reg() {
    let mut rp = RegParams::new("tophat_features");
    let ball = Sel3d::create_ball(2);

    // --- Test 1: a single bright voxel is kept whole ---
    let mut bump = Array3::from_elem((9, 9, 9), 10.0);
    bump[[4, 4, 4]] = 50.0;
    let tophat = top_hat_gray(&bump, &ball).expect("tophat");
    rp.compare_values(40.0, tophat[[4, 4, 4]], 0.0);
    rp.compare_values(40.0, tophat.sum(), 0.0);

    // --- Test 2: a block wider than the ball loses only its corners ---
    let mut block = Array3::from_elem((15, 15, 15), 10.0);
    block.slice_mut(s![4..11, 4..11, 4..11]).fill(30.0);
    let tophat = top_hat_gray(&block, &ball).expect("tophat");
    rp.compare_values(0.0, tophat[[7, 7, 7]], 0.0);
    rp.compare_values(0.0, tophat[[4, 7, 7]], 0.0);
    rp.compare_values(0.0, tophat[[7, 10, 7]], 0.0);
    rp.compare_values(20.0, tophat[[4, 4, 4]], 0.0);
    rp.compare_values(0.0, tophat[[1, 1, 1]], 0.0);

    // --- Test 3: element sizes ---
    let cube = Sel3d::create_cube(3).expect("cube");
    rp.compare_values(27.0, cube.hit_count() as f64, 0.0);
    rp.compare_values(7.0, Sel3d::create_ball(1).hit_count() as f64, 0.0);
    rp.compare_values(1.0, flag(Sel3d::create_cube(2).is_err()), 0.0);

    assert!(rp.cleanup(), "tophat_features regression test failed");
}
