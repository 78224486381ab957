//! End-to-end tests: encoded file -> decoder -> raster -> canvas.

mod common;

use cell_raster::{Palette, Quantizer, Rgb, Strategy, Viewport};
use common::fixtures::quadrant::{BLUE, GREEN, RED, WHITE};
use common::{ImageDir, RecordingCanvas};
use pretty_assertions::assert_eq;
use termimg::error::DecodeError;
use termimg::services::{StreamCanvas, Viewer, ViewerOptions};

fn viewer(strategy: Strategy, wait_for_key: bool) -> Viewer {
    Viewer::new(
        Quantizer::new(strategy, Palette::XTERM),
        ViewerOptions { wait_for_key },
    )
}

#[test]
fn test_quadrant_png_renders_each_quadrant() {
    let dir = ImageDir::new();
    let path = dir.quadrant_png();

    for strategy in [
        Strategy::Cube,
        Strategy::Nearest {
            system_colors: false,
        },
    ] {
        let mut canvas = RecordingCanvas::new(4, 2);
        let report = viewer(strategy, false)
            .show_all(&[&path], &mut canvas)
            .unwrap();

        assert!(report.is_success());
        assert_eq!(canvas.frames.len(), 1);
        assert_eq!(
            canvas.frames[0].cells,
            vec![
                (0, 0, RED),
                (0, 1, RED),
                (0, 2, GREEN),
                (0, 3, GREEN),
                (1, 0, BLUE),
                (1, 1, BLUE),
                (1, 2, WHITE),
                (1, 3, WHITE),
            ],
            "{strategy:?}"
        );
    }
}

#[test]
fn test_quadrant_png_stream_output() {
    let dir = ImageDir::new();
    let path = dir.quadrant_png();

    let mut canvas = StreamCanvas::new(Vec::new(), Viewport::new(4, 2));
    viewer(Strategy::Cube, false)
        .show_all(&[&path], &mut canvas)
        .unwrap();
    let output = String::from_utf8(canvas.into_inner()).unwrap();

    assert_eq!(
        output,
        "\x1b[48;5;196m  \x1b[48;5;46m  \x1b[0m\n\x1b[48;5;21m  \x1b[48;5;231m  \x1b[0m\n"
    );
}

#[test]
fn test_small_image_is_centered() {
    let dir = ImageDir::new();
    let path = dir.gray_png(1, 1, 0);

    let mut canvas = RecordingCanvas::new(80, 24);
    viewer(Strategy::Cube, false)
        .show_all(&[&path], &mut canvas)
        .unwrap();

    // term aspect (80/24)/2 > 1, so rows fill: 24 rows x 48 columns
    let cells = &canvas.frames[0].cells;
    assert_eq!(cells.len(), 48 * 24);
    let min_col = cells.iter().map(|c| c.1).min().unwrap();
    let max_col = cells.iter().map(|c| c.1).max().unwrap();
    assert_eq!(min_col, (80 - 48 - 1) / 2);
    assert_eq!(max_col, min_col + 47);
}

#[test]
fn test_grayscale_png_matches_rgb_gray() {
    let dir = ImageDir::new();
    let path = dir.gray_png(3, 3, 128);

    for strategy in [
        Strategy::Cube,
        Strategy::Nearest {
            system_colors: true,
        },
    ] {
        let expected = Quantizer::new(strategy, Palette::XTERM).quantize(Rgb::gray(128));
        let mut canvas = RecordingCanvas::new(12, 6);
        viewer(strategy, false)
            .show_all(&[&path], &mut canvas)
            .unwrap();

        let cells = &canvas.frames[0].cells;
        assert!(!cells.is_empty());
        assert!(cells.iter().all(|&(_, _, idx)| idx == expected));
    }
}

#[test]
fn test_solid_jpeg_maps_to_one_cube_entry() {
    let dir = ImageDir::new();
    let path = dir.solid_jpeg(8, 4, [200, 100, 50]);

    let mut canvas = RecordingCanvas::new(40, 20);
    viewer(Strategy::Cube, false)
        .show_all(&[&path], &mut canvas)
        .unwrap();

    // levels: 200 -> 4, 100 -> 2, 50 -> 1
    let expected = 16 + 36 * 4 + 6 * 2 + 1;
    let cells = &canvas.frames[0].cells;
    assert!(!cells.is_empty());
    assert!(cells.iter().all(|&(_, _, idx)| idx == expected));
}

#[test]
fn test_bad_file_does_not_stop_the_run() {
    let dir = ImageDir::new();
    let good = dir.quadrant_png();
    let bad = dir.garbage();
    let missing = dir.path("missing.png");

    let mut canvas = RecordingCanvas::new(4, 2);
    let report = viewer(Strategy::Cube, true)
        .show_all(&[&bad, &good, &missing, &good], &mut canvas)
        .unwrap();

    assert_eq!(report.rendered, vec![good.clone(), good.clone()]);
    assert_eq!(report.failed.len(), 2);
    assert!(matches!(report.failed[0].1, DecodeError::Image(_)));
    assert!(matches!(report.failed[1].1, DecodeError::Read { .. }));
    assert_eq!(canvas.frames.len(), 2);
    assert_eq!(canvas.waits, 2);
}

#[test]
fn test_degenerate_viewport_draws_nothing() {
    let dir = ImageDir::new();
    let path = dir.quadrant_png();

    let mut canvas = RecordingCanvas::new(80, 0);
    let report = viewer(Strategy::Cube, false)
        .show_all(&[&path], &mut canvas)
        .unwrap();

    assert!(report.is_success());
    assert_eq!(report.empty, vec![path]);
    assert_eq!(canvas.frames.len(), 1);
    assert!(canvas.frames[0].cells.is_empty());
}
