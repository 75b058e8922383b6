// Allow deprecated APIs (assert_cmd::cargo_bin is deprecated but still works)
#![allow(deprecated)]

use assert_cmd::prelude::*; // Add methods on commands
use predicates::prelude::*; // Used for writing assertions
use rstest::rstest;
use std::path::{Path, PathBuf};
use std::process::Command; // Run programs
use tempfile::{tempdir, TempDir};

fn demo() -> Command {
    Command::cargo_bin("canvas-demo").unwrap()
}

fn output_in(dir: &TempDir, name: &str) -> PathBuf {
    dir.path().join(name)
}

fn load_rgba(path: &Path) -> image::RgbaImage {
    image::open(path).unwrap().to_rgba8()
}

fn write_solid_png(path: &Path, width: u32, height: u32, rgba: [u8; 4]) {
    image::RgbaImage::from_pixel(width, height, image::Rgba(rgba))
        .save(path)
        .unwrap();
}

#[test]
fn test_draw_line() {
    let dir = tempdir().unwrap();
    let output = output_in(&dir, "line.png");

    demo()
        .arg("draw-line")
        .arg("--output")
        .arg(&output)
        .assert()
        .success()
        .stdout(predicate::str::contains("Wrote"));

    let img = load_rgba(&output);
    assert_eq!(img.dimensions(), (320, 280));
    assert_eq!(img.get_pixel(100, 20).0, [0, 0, 0, 255]);
    assert_eq!(img.get_pixel(100, 40).0, [255, 255, 255, 255]);
}

#[rstest]
#[case::fixed(&["--flatten", "fixed"])]
#[case::adaptive(&["--flatten", "adaptive", "--tolerance", "0.1"])]
fn test_draw_bezier(#[case] flatten_args: &[&str]) {
    let dir = tempdir().unwrap();
    let output = output_in(&dir, "bezier.png");

    demo()
        .arg("draw-bezier")
        .args(flatten_args)
        .arg("--output")
        .arg(&output)
        .assert()
        .success();

    let img = load_rgba(&output);
    // The curve's lowest point is (110, 80).
    assert!(img.get_pixel(110, 80).0[0] < 200);
    assert_eq!(img.get_pixel(110, 40).0, [255, 255, 255, 255]);
}

#[test]
fn test_draw_quadratic() {
    let dir = tempdir().unwrap();
    let output = output_in(&dir, "quadratic.png");

    demo()
        .args(["--width", "240", "--height", "160"])
        .arg("draw-quadratic")
        .arg("--output")
        .arg(&output)
        .assert()
        .success();

    let img = load_rgba(&output);
    assert_eq!(img.dimensions(), (240, 160));
    // Apex of the curve at t = 0.5 is (110, 70).
    let [r, g, _, _] = img.get_pixel(110, 70).0;
    assert!(r > g);
}

#[test]
fn test_gradient() {
    let dir = tempdir().unwrap();
    let output = output_in(&dir, "gradient.png");

    demo()
        .arg("gradient")
        .arg("--output")
        .arg(&output)
        .assert()
        .success();

    let img = load_rgba(&output);
    let left = img.get_pixel(0, 100).0;
    assert!(left[0] > 240 && left[1] < 10 && left[2] > 240);
    let middle = img.get_pixel(160, 100).0;
    assert!(middle[0] < 20 && middle[2] > 235);
    let right = img.get_pixel(319, 100).0;
    assert!(right[0] > 240 && right[2] < 10);
}

#[rstest]
#[case::fill(&[])]
#[case::outline(&["--outline"])]
fn test_display_text(#[case] extra: &[&str]) {
    let dir = tempdir().unwrap();
    let output = output_in(&dir, "text.png");

    demo()
        .arg("display-text")
        .args(extra)
        .arg("--output")
        .arg(&output)
        .assert()
        .success()
        .stdout(predicate::str::contains("Wrote"));

    let img = load_rgba(&output);
    assert_eq!(img.dimensions(), (320, 280));
    // Both lines sit between y=20 and y=100; the rest stays white.
    for (x, y, pixel) in img.enumerate_pixels() {
        if !(20..100).contains(&y) {
            assert_eq!(pixel.0, [255, 255, 255, 255], "pixel ({}, {})", x, y);
        }
    }
}

#[test]
fn test_display_image() {
    let dir = tempdir().unwrap();
    let input = output_in(&dir, "green.png");
    write_solid_png(&input, 4, 4, [0, 200, 0, 255]);
    let output = output_in(&dir, "display.png");

    demo()
        .arg("display-image")
        .arg("--input")
        .arg(&input)
        .arg("--output")
        .arg(&output)
        .assert()
        .success();

    let img = load_rgba(&output);
    assert_eq!(img.get_pixel(11, 11).0, [0, 200, 0, 255]);
    assert_eq!(img.get_pixel(5, 5).0, [255, 255, 255, 255]);
    assert_eq!(img.get_pixel(14, 14).0, [255, 255, 255, 255]);
}

#[test]
fn test_display_image_missing_input() {
    let dir = tempdir().unwrap();
    let output = output_in(&dir, "missing.png");

    demo()
        .arg("display-image")
        .arg("--input")
        .arg(dir.path().join("does-not-exist.png"))
        .arg("--output")
        .arg(&output)
        .assert()
        .failure()
        .stderr(predicate::str::contains("Failed to draw image"));

    assert!(!output.exists());
}

#[test]
fn test_copy_region() {
    let dir = tempdir().unwrap();
    let output = output_in(&dir, "copy.png");

    demo()
        .arg("copy-region")
        .arg("--output")
        .arg(&output)
        .assert()
        .success();

    let img = load_rgba(&output);
    // Original region
    assert_eq!(img.get_pixel(15, 15).0, [255, 0, 0, 255]);
    assert_eq!(img.get_pixel(35, 35).0, [70, 130, 180, 255]);
    // Copy placed 70 pixels to the right
    assert_eq!(img.get_pixel(85, 15).0, [255, 0, 0, 255]);
    assert_eq!(img.get_pixel(105, 35).0, [70, 130, 180, 255]);
    assert_eq!(img.get_pixel(140, 35).0, [255, 255, 255, 255]);
}

#[rstest]
#[case("repeat", [255, 255, 0, 255])]
#[case("no-repeat", [255, 255, 255, 255])]
fn test_pattern(#[case] repetition: &str, #[case] far_pixel: [u8; 4]) {
    let dir = tempdir().unwrap();
    let input = output_in(&dir, "tile.png");
    write_solid_png(&input, 8, 8, [255, 255, 0, 255]);
    let output = output_in(&dir, "pattern.png");

    demo()
        .arg("pattern")
        .arg("--input")
        .arg(&input)
        .arg("--repetition")
        .arg(repetition)
        .arg("--output")
        .arg(&output)
        .assert()
        .success();

    let img = load_rgba(&output);
    assert_eq!(img.get_pixel(3, 3).0, [255, 255, 0, 255]);
    assert_eq!(img.get_pixel(100, 100).0, far_pixel);
}

#[rstest]
#[case::zero_tolerance(&["--flatten", "adaptive", "--tolerance", "0", "draw-bezier"], "Tolerance")]
#[case::zero_width(&["--width", "0", "draw-line"], "Failed to create")]
fn test_invalid_options(#[case] args: &[&str], #[case] message: &str) {
    let dir = tempdir().unwrap();

    demo()
        .args(args)
        .arg("--output")
        .arg(output_in(&dir, "invalid.png"))
        .assert()
        .failure()
        .stderr(predicate::str::contains(message));
}

#[test]
fn test_unknown_repetition_rejected() {
    demo()
        .args(["pattern", "--input", "tile.png", "--repetition", "sideways"])
        .assert()
        .failure();
}
