//! Tests display -> image -> display round trips for letterboxed layouts.

use rect_mosaic_core::PixelRect;
use rect_mosaic_viewport::{DisplayPoint, DisplayRect, ViewTransform, ViewportSize};

fn assert_within_one_pixel(actual: DisplayRect, expected: DisplayRect) {
    let pairs = [
        (actual.x, expected.x),
        (actual.y, expected.y),
        (actual.x + actual.width, expected.x + expected.width),
        (actual.y + actual.height, expected.y + expected.height),
    ];
    for (got, want) in pairs {
        assert!((got - want).abs() <= 1.0, "got {actual:?}, expected {expected:?}");
    }
}

#[test]
fn coordinate_round_trip_tests_recover_selection_when_downscaled() {
    let transform = ViewTransform::fit(ViewportSize::new(400, 300), 800, 400);
    let start = DisplayPoint::new(100.3, 80.7);
    let end = DisplayPoint::new(250.2, 170.1);

    let image_rect = transform
        .selection_to_image(start, end)
        .expect("selection inside the image should map");
    assert_eq!(image_rect, PixelRect::new(201, 61, 299, 179));

    let back = transform.image_rect_to_display(image_rect);
    assert_within_one_pixel(back, DisplayRect::from_corners(start, end));
}

#[test]
fn coordinate_round_trip_tests_recover_selection_across_layouts() {
    let layouts = [
        (ViewportSize::new(1000, 700), 4000, 3000),
        (ViewportSize::new(640, 480), 1920, 1080),
        (ViewportSize::new(300, 900), 1200, 1600),
        (ViewportSize::new(512, 512), 512, 512),
    ];

    for (viewport, width, height) in layouts {
        let transform = ViewTransform::fit(viewport, width, height);
        let shown = transform.displayed_rect();

        for (fx1, fy1, fx2, fy2) in [(0.1, 0.2, 0.6, 0.7), (0.9, 0.8, 0.3, 0.05), (0.0, 0.0, 1.0, 1.0)] {
            let start = DisplayPoint::new(shown.x + shown.width * fx1, shown.y + shown.height * fy1);
            let end = DisplayPoint::new(shown.x + shown.width * fx2, shown.y + shown.height * fy2);

            let image_rect = transform
                .selection_to_image(start, end)
                .expect("selection inside the image should map");
            assert!(image_rect.clip_to(width, height) == Some(image_rect));

            let back = transform.image_rect_to_display(image_rect);
            assert_within_one_pixel(back, DisplayRect::from_corners(start, end));
        }
    }
}

#[test]
fn coordinate_round_trip_tests_overlay_follows_resize() {
    let rect = PixelRect::new(100, 50, 200, 100);

    let small = ViewTransform::fit(ViewportSize::new(400, 400), 400, 200);
    assert_eq!(
        small.image_rect_to_display(rect),
        DisplayRect {
            x: 100.0,
            y: 150.0,
            width: 200.0,
            height: 100.0
        }
    );

    let large = ViewTransform::fit(ViewportSize::new(800, 800), 400, 200);
    assert_eq!(
        large.image_rect_to_display(rect),
        DisplayRect {
            x: 200.0,
            y: 300.0,
            width: 400.0,
            height: 200.0
        }
    );
}
