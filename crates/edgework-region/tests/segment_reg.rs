//! Intensity-band and marker segmentation regression test

use edgework_core::Raster;
use edgework_region::{
    BOUNDARY_VALUE, DEFAULT_BANDS, IntensityBand, MarkerSegmentationOptions, intensity_stats,
    marker_segmentation, posterize,
};
use edgework_test::{RegParams, disk};

#[test]
fn segment_reg() {
    let mut rp = RegParams::new("segment");

    // --- Test 1: a full ramp collapses to five levels ---
    let ramp = Raster::from_data(256, 1, (0..256).map(|v| v as f64).collect()).expect("ramp");
    let before = intensity_stats(&ramp);
    let levels = posterize(&ramp, &DEFAULT_BANDS).expect("posterize");
    let after = intensity_stats(&levels);
    rp.compare_values(256.0, before.unique_levels as f64, 0.0);
    rp.compare_values(5.0, after.unique_levels as f64, 0.0);
    rp.compare_values(25.0, after.min, 0.0);
    rp.compare_values(255.0, after.max, 0.0);
    rp.compare_values(127.5, before.mean, 1e-12);
    eprintln!(
        "  before: mean {:.2} std {:.2}; after: mean {:.2} std {:.2}",
        before.mean, before.std_dev, after.mean, after.std_dev
    );

    // Band edges
    for &(input, expected) in &[(50.0, 25.0), (51.0, 75.0), (150.0, 125.0), (201.0, 255.0)] {
        rp.compare_values(expected, levels.get_pixel(input as u32, 0).expect("get"), 0.0);
    }

    // --- Test 2: custom two-band table ---
    let bands = [
        IntensityBand::new(0.0, 127.0, 0.0),
        IntensityBand::new(128.0, 255.0, 255.0),
    ];
    let binary = posterize(&ramp, &bands).expect("posterize");
    rp.compare_values(128.0, binary.count_foreground() as f64, 0.0);
    rp.compare_values(1.0, binary.is_binary() as u8 as f64, 0.0);

    // --- Test 3: marker segmentation of a bright disk ---
    let scene = disk(40, 40, (20.0, 20.0), 10.0, 220.0).expect("disk");
    let seg = marker_segmentation(&scene, None, &MarkerSegmentationOptions::default())
        .expect("marker_segmentation");
    rp.compare_values(BOUNDARY_VALUE, seg.get_pixel(30, 20).expect("get"), 0.0);
    rp.compare_values(255.0, seg.get_pixel(20, 20).expect("get"), 0.0);
    rp.compare_values(0.0, seg.get_pixel(2, 2).expect("get"), 0.0);
    let boundary = seg.data().iter().filter(|&&v| v == BOUNDARY_VALUE).count();
    eprintln!("  marker segmentation: {} boundary pixels", boundary);
    rp.compare_values(1.0, (boundary > 0 && boundary < 1600 * 15 / 100 + 1) as u8 as f64, 0.0);
    rp.write_raster(&seg, "markers").expect("write");

    assert!(rp.cleanup());
}
