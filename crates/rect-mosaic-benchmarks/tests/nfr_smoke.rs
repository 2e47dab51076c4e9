//! Benchmark smoke test for the mosaic, template and history loop.

use std::time::Instant;

use rect_mosaic_benchmarks::patterned_image;
use rect_mosaic_core::MosaicParams;
use rect_mosaic_engine::apply_mosaic_regions;
use rect_mosaic_history::EditHistory;
use rect_mosaic_template::RegionTemplate;

#[test]
fn benchmark_edit_loop_smoke_prints_latency() {
    let mut image = patterned_image(512, 384);
    let mut template = RegionTemplate::new();
    template.add_rect(0.1, 0.1, 0.5, 0.5);
    template.add_rect(0.4, 0.3, 0.5, 0.6);
    let params = MosaicParams::with_intensity_level(12, 7);
    let mut history = EditHistory::default();

    let start = Instant::now();
    for _ in 0..50 {
        let rects = template.resolve(image.width, image.height);
        image = apply_mosaic_regions(&image, &rects, &params);
        history.push(&image);
    }
    while history.undo().is_some() {}

    let elapsed_ms = start.elapsed().as_millis();
    println!("benchmark_edit_loop_elapsed_ms={elapsed_ms}");
    println!("benchmark_history_len={}", history.len());

    // This is a lightweight guardrail; strict NFR checks are environment-specific.
    assert!(
        elapsed_ms < 10_000,
        "edit loop smoke benchmark should stay bounded"
    );
    assert_eq!(history.len(), 20);
}
