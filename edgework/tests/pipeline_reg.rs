//! End-to-end pipeline regression test
//!
//! Runs the detectors and region operations one after another through the
//! facade crate, the way an application would.

use edgework::Point;
use edgework::filter::{CannyOptions, MarrHildrethOptions, canny, compare_detectors};
use edgework::region::{binarize, count_components, extract_chain, threshold_otsu};
use edgework_test::{RegParams, blank, with_rect};

#[test]
fn pipeline_reg() {
    let mut rp = RegParams::new("pipeline");

    // --- Test 1: a single bright pixel ---
    let mut dot = blank(5, 5).expect("blank");
    dot.set_pixel(2, 2, 255.0).expect("set");

    let (binary, t) = threshold_otsu(&dot);
    eprintln!("  dot: otsu threshold {}", t);
    rp.compare_values(0.0, t as f64, 0.0);
    rp.compare_values(25.0, binary.count_foreground() as f64, 0.0);

    rp.compare_values(1.0, count_components(&dot) as f64, 0.0);

    let chain = extract_chain(&dot).expect("chain");
    rp.compare_sequences(&[Point::new(2, 2)], &chain.contour.points);
    rp.compare_values(0.0, chain.contour.closed as u8 as f64, 0.0);
    rp.compare_values(0.0, chain.code.len() as f64, 0.0);
    rp.compare_values(0.0, chain.first_difference.len() as f64, 0.0);

    // --- Test 2: rectangle boundary through binarize and the tracer ---
    let scene = with_rect(20, 20, (5, 5, 8, 6), 200.0).expect("rect");
    let binary = binarize(&scene, 128.0);
    rp.compare_values(1.0, count_components(&binary) as f64, 0.0);

    let chain = extract_chain(&binary).expect("chain");
    rp.compare_values(1.0, chain.contour.closed as u8 as f64, 0.0);
    rp.compare_values(24.0, chain.contour.points.len() as f64, 0.0);

    let mut expected = vec![6u8; 5];
    expected.extend([0u8; 7]);
    expected.extend([2u8; 5]);
    expected.extend([4u8; 7]);
    rp.compare_sequences(&expected, &chain.code);

    let mut normalized = vec![0u8; 7];
    normalized.extend([2u8; 5]);
    normalized.extend([4u8; 7]);
    normalized.extend([6u8; 5]);
    rp.compare_sequences(&normalized, &chain.normalized);

    // Four left turns close a convex outline.
    let turns: u32 = chain.first_difference.iter().map(|&d| d as u32).sum();
    rp.compare_values(8.0, turns as f64, 0.0);

    // --- Test 3: both detectors find the rectangle outline ---
    let edges = canny(&scene, &CannyOptions::default()).expect("canny");
    rp.compare_values(1.0, edges.is_binary() as u8 as f64, 0.0);
    rp.compare_values(0.0, edges.get_pixel(0, 0).expect("get"), 0.0);
    let rings = count_components(&edges);
    eprintln!("  canny components on rectangle: {}", rings);
    rp.compare_values(1.0, (rings >= 1) as u8 as f64, 0.0);

    let comparison = compare_detectors(
        &scene,
        &MarrHildrethOptions::default(),
        &CannyOptions::default(),
    )
    .expect("compare");
    let (mh_count, canny_count) = comparison.edge_counts();
    eprintln!("  edge pixels: marr-hildreth {}, canny {}", mh_count, canny_count);
    rp.compare_values(1.0, (mh_count > 0 && canny_count > 0) as u8 as f64, 0.0);
    rp.compare_rasters(&edges, &comparison.canny);

    if rp.display() {
        rp.write_raster(&edges, "canny").expect("write");
    }

    assert!(rp.cleanup(), "pipeline regression test failed");
}
