//! Integration tests for canvas-facade.

use canvas_facade::curve::{flatten_to_vec, FIXED_STEP_SAMPLES};
use canvas_facade::transfer::{get_image_data, put_image_data};
use canvas_facade::{
    resolve_color, Canvas, ColorRgba, CubicBezierParams, ErrorKind, FlatteningMode, PixelBuffer,
    PixelFormat, Point, Rect, RectParams,
};
use rstest::rstest;

fn pixel(ctx: &Canvas, x: i32, y: i32) -> [u8; 4] {
    ctx.get_image_data(x, y, 1, 1).unwrap().pixel(0, 0).unwrap()
}

/// Fill a buffer with a distinct value per byte.
fn patterned_buffer(width: u32, height: u32) -> PixelBuffer {
    let data = (0..width * height * 4)
        .map(|i| if i % 4 == 3 { 255 } else { (i * 7 % 251) as u8 })
        .collect();
    PixelBuffer::from_vec(width, height, PixelFormat::RGBA8, data).unwrap()
}

/// Test rgba() truncates instead of rounding.
#[rstest]
#[case("rgba(1.0, 0.0, 0.0, 1.0)", [255, 0, 0, 255])]
#[case("rgba(0.5, 0.5, 0.5, 0.5)", [127, 127, 127, 127])]
#[case("rgba(0 0.2 1 0)", [0, 51, 255, 0])]
fn test_rgba_truncation(#[case] input: &str, #[case] expected: [u8; 4]) {
    assert_eq!(resolve_color(input).unwrap().to_array(), expected);
}

/// Test keywords resolve like their hex value, case-insensitively.
#[rstest]
#[case("red", "#FF0000")]
#[case("Red", "#ff0000")]
#[case("CornflowerBlue", "#6495ED")]
#[case("transparent", "#00000000")]
fn test_keyword_matches_hex(#[case] keyword: &str, #[case] hex: &str) {
    assert_eq!(resolve_color(keyword).unwrap(), resolve_color(hex).unwrap());
}

/// Test hex colors survive a resolve and re-encode.
#[rstest]
#[case("#1A2B3C")]
#[case("#80FF8000")]
#[case("#000000")]
fn test_hex_round_trip(#[case] hex: &str) {
    assert_eq!(resolve_color(hex).unwrap().to_hex(), hex);
}

/// Test unknown keywords are reported, not defaulted.
#[test]
fn test_unknown_color_name() {
    let err = resolve_color("notacolor").unwrap_err();
    assert_eq!(err.kind(), ErrorKind::UnknownColorName);

    let mut ctx = Canvas::new(10, 10).unwrap();
    let err = ctx.set_fill_style("notacolor").unwrap_err();
    assert_eq!(err.kind(), ErrorKind::UnknownColorName);
}

/// Test packed ARGB input bypasses text parsing.
#[test]
fn test_packed_color_fill() {
    let mut ctx = Canvas::new(10, 10).unwrap();
    ctx.set_fill_style_argb(0xFF00_80FF);
    ctx.fill_rect(&RectParams::new(0.0, 0.0, 10.0, 10.0));
    assert_eq!(pixel(&ctx, 5, 5), [0x00, 0x80, 0xFF, 0xFF]);
    assert_eq!(ColorRgba::from(0xFF00_80FFu32).to_argb_u32(), 0xFF00_80FF);
}

/// Test getImageData followed by putImageData at the same spot is lossless.
#[rstest]
#[case(0, 0, 10, 10)]
#[case(3, 4, 5, 2)]
#[case(9, 9, 1, 1)]
fn test_get_put_round_trip(#[case] x: i32, #[case] y: i32, #[case] w: u32, #[case] h: u32) {
    let mut ctx = Canvas::builder(10, 10).background(None).build().unwrap();
    ctx.put_image_data(&patterned_buffer(10, 10), 0, 0);
    let before = ctx.get_image_data(0, 0, 10, 10).unwrap();

    let region = ctx.get_image_data(x, y, w, h).unwrap();
    ctx.put_image_data(&region, x, y);

    let after = ctx.get_image_data(0, 0, 10, 10).unwrap();
    assert_eq!(before.data(), after.data());
}

/// Test round trips between buffers with different channel orders.
#[test]
fn test_transfer_between_formats() {
    let src = patterned_buffer(6, 4);
    let mut bgra = PixelBuffer::new(6, 4, PixelFormat::BGRA8).unwrap();
    assert_eq!(put_image_data(&mut bgra, &src, 0, 0, None), 24);
    assert_eq!(bgra.pixel(1, 1).map(|[b, g, r, a]| [r, g, b, a]), src.pixel(1, 1));

    let back = get_image_data(&bgra, Rect::new(0, 0, 6, 4), PixelFormat::RGBA8).unwrap();
    assert_eq!(back.data(), src.data());
}

/// Test buffer sizes that overflow are rejected instead of panicking.
#[test]
fn test_oversized_buffers_are_errors() {
    let err = PixelBuffer::new(u32::MAX, u32::MAX, PixelFormat::RGBA8).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::InvalidDimensions);

    let ctx = Canvas::new(10, 10).unwrap();
    let err = ctx.get_image_data(0, 0, u32::MAX, u32::MAX).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::InvalidDimensions);
    let err = ctx.create_image_data(u32::MAX, u32::MAX).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::InvalidDimensions);
}

/// Test a put placed entirely outside the canvas writes nothing.
#[rstest]
#[case(10, 0)]
#[case(0, 10)]
#[case(-4, 0)]
#[case(0, -4)]
#[case(i32::MAX, i32::MAX)]
#[case(i32::MIN, i32::MIN)]
fn test_put_all_outside(#[case] dx: i32, #[case] dy: i32) {
    let mut dest = PixelBuffer::new(10, 10, PixelFormat::RGBA8).unwrap();
    let src = patterned_buffer(4, 4);
    assert_eq!(put_image_data(&mut dest, &src, dx, dy, None), 0);
    assert!(dest.data().iter().all(|&b| b == 0));
}

/// Test a partially overlapping put is clipped to the destination.
#[test]
fn test_put_partial_overlap() {
    let mut dest = PixelBuffer::new(10, 10, PixelFormat::RGBA8).unwrap();
    let src = patterned_buffer(4, 4);
    assert_eq!(put_image_data(&mut dest, &src, -2, 8, None), 4);
    assert_eq!(dest.pixel(0, 8), src.pixel(2, 0));
    assert_eq!(dest.pixel(1, 9), src.pixel(3, 1));
    assert_eq!(dest.pixel(2, 8), Some([0, 0, 0, 0]));
}

/// Test a degenerate cubic collapses to its single point.
#[test]
fn test_degenerate_bezier() {
    let zero = Point::new(0.0, 0.0);
    let samples = flatten_to_vec(&[zero; 4], FlatteningMode::FixedStep);
    assert_eq!(samples.len(), FIXED_STEP_SAMPLES);
    assert!(samples.iter().all(|&p| p == zero));

    let mut ctx = Canvas::new(10, 10).unwrap();
    ctx.move_to(0.0, 0.0);
    ctx.bezier_curve_to(&CubicBezierParams {
        cp1x: 0.0,
        cp1y: 0.0,
        cp2x: 0.0,
        cp2y: 0.0,
        x: 0.0,
        y: 0.0,
    })
    .unwrap();
    assert_eq!(ctx.current_point(), Some(zero));
    ctx.stroke();
}

/// Test both flattening modes produce the same visible curve.
#[rstest]
#[case(FlatteningMode::FixedStep)]
#[case(FlatteningMode::adaptive(0.1))]
fn test_bezier_flattening_modes(#[case] mode: FlatteningMode) {
    let mut ctx = Canvas::builder(220, 120)
        .background(None)
        .flattening(mode)
        .build()
        .unwrap();
    ctx.set_line_width(4.0);
    ctx.begin_path();
    ctx.move_to(20.0, 20.0);
    ctx.bezier_curve_to(&CubicBezierParams {
        cp1x: 20.0,
        cp1y: 100.0,
        cp2x: 200.0,
        cp2y: 100.0,
        x: 200.0,
        y: 20.0,
    })
    .unwrap();
    ctx.stroke();

    assert_eq!(pixel(&ctx, 110, 79)[3], 255);
    assert_eq!(pixel(&ctx, 110, 60)[3], 0);
}

/// Test drawImage from an encoded PNG file.
#[test]
fn test_draw_image_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("tile.png");
    image::RgbaImage::from_pixel(3, 2, image::Rgba([40, 80, 120, 255]))
        .save(&path)
        .unwrap();

    let mut ctx = Canvas::new(10, 10).unwrap();
    ctx.draw_image_file(&path, 6, 6).unwrap();
    assert_eq!(pixel(&ctx, 6, 6), [40, 80, 120, 255]);
    assert_eq!(pixel(&ctx, 8, 7), [40, 80, 120, 255]);
    assert_eq!(pixel(&ctx, 9, 8), [255, 255, 255, 255]);

    let err = ctx
        .draw_image_file(dir.path().join("missing.png"), 0, 0)
        .unwrap_err();
    assert!(matches!(err.kind(), ErrorKind::Io | ErrorKind::ImageDecode));
}

/// Test saving to PNG and reading the file back.
#[test]
fn test_save_png() {
    let mut ctx = Canvas::new(16, 12).unwrap();
    ctx.set_fill_style("rgba(0.0, 1.0, 0.0, 1.0)").unwrap();
    ctx.fill_rect(&RectParams::new(4.0, 4.0, 8.0, 4.0));

    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("out.png");
    ctx.save_png(&path).unwrap();

    let img = image::open(&path).unwrap().to_rgba8();
    assert_eq!(img.dimensions(), (16, 12));
    assert_eq!(img.get_pixel(6, 5).0, [0, 255, 0, 255]);
    assert_eq!(img.get_pixel(0, 0).0, [255, 255, 255, 255]);
}
