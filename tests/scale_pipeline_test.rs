// End-to-end runs of the scaling pipeline against real files on disk.
use std::path::{Path, PathBuf};
use std::time::{SystemTime, UNIX_EPOCH};

use image::{DynamicImage, GenericImageView, ImageBuffer, ImageFormat, Rgb};
use image_scale::scaler::{Dimensions, ImageConfig, ImageError, ImageScaler, ScaleRequest};

fn unique_temp_dir(prefix: &str) -> PathBuf {
    let nanos = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_nanos())
        .unwrap_or(0);
    let dir = std::env::temp_dir().join(format!("{}_{}", prefix, nanos));
    std::fs::create_dir_all(&dir).expect("create temp dir failed");
    dir
}

fn write_png(path: &Path, width: u32, height: u32) {
    let img = ImageBuffer::from_fn(width, height, |x, y| {
        Rgb([(x % 256) as u8, (y % 256) as u8, 128])
    });
    DynamicImage::ImageRgb8(img)
        .save_with_format(path, ImageFormat::Png)
        .expect("failed to write test png");
}

fn scaler() -> ImageScaler {
    ImageScaler::new(ImageConfig::default())
}

#[test]
fn full_hd_width_only_halves() {
    let dir = unique_temp_dir("imgscale_e2e_fullhd");
    let input = dir.join("in.png");
    let output = dir.join("out.png");
    write_png(&input, 1920, 1080);

    let summary = scaler()
        .run(&input, &output, ScaleRequest::from_cli(960, 0))
        .expect("pipeline should succeed");

    assert_eq!(summary.output, Dimensions::new(960, 540));
    let decoded = image::open(&output).expect("output should decode");
    assert_eq!(decoded.dimensions(), (960, 540));
}

#[test]
fn larger_box_keeps_native_size() {
    let dir = unique_temp_dir("imgscale_e2e_noupscale");
    let input = dir.join("in.png");
    let output = dir.join("out.png");
    write_png(&input, 800, 600);

    let summary = scaler()
        .run(&input, &output, ScaleRequest::from_cli(1000, 1000))
        .expect("pipeline should succeed");

    assert_eq!(summary.native, Dimensions::new(800, 600));
    assert_eq!(summary.output, Dimensions::new(800, 600));
    let decoded = image::open(&output).expect("output should decode");
    assert_eq!(decoded.dimensions(), (800, 600));
}

#[test]
fn missing_input_fails_without_output() {
    let dir = unique_temp_dir("imgscale_e2e_missing");
    let input = dir.join("does-not-exist.png");
    let output = dir.join("out.png");

    let result = scaler().run(&input, &output, ScaleRequest::from_cli(100, 100));

    assert!(matches!(result, Err(ImageError::InputOpen(_))));
    assert!(!output.exists());
}

#[test]
fn quarter_scale_round_trips_through_disk() {
    let dir = unique_temp_dir("imgscale_e2e_quarter");
    let input = dir.join("in.png");
    let output = dir.join("out.png");
    write_png(&input, 1600, 1200);

    let summary = scaler()
        .run(&input, &output, ScaleRequest::from_cli(400, 300))
        .expect("pipeline should succeed");

    assert_eq!(summary.output, Dimensions::new(400, 300));
    assert!(output.exists());

    let bytes = std::fs::read(&output).expect("read output");
    assert_eq!(bytes.len() as u64, summary.bytes_written);
    let decoded = image::load_from_memory(&bytes).expect("output should decode");
    assert_eq!(decoded.dimensions(), (400, 300));
}

#[test]
fn no_constraint_is_a_noop_copy() {
    let dir = unique_temp_dir("imgscale_e2e_noop");
    let input = dir.join("in.png");
    let output = dir.join("out.png");
    write_png(&input, 33, 17);

    let summary = scaler()
        .run(&input, &output, ScaleRequest::from_cli(0, 0))
        .expect("pipeline should succeed");

    assert_eq!(summary.output, Dimensions::new(33, 17));
    let original = image::open(&input).expect("input decodes");
    let copied = image::open(&output).expect("output decodes");
    assert_eq!(original, copied);
}

#[test]
fn non_image_input_is_rejected() {
    let dir = unique_temp_dir("imgscale_e2e_text");
    let input = dir.join("readme.txt");
    let output = dir.join("out.png");
    std::fs::write(&input, "plain text").expect("write input");

    let result = scaler().run(&input, &output, ScaleRequest::from_cli(10, 10));

    assert!(matches!(result, Err(ImageError::InputOpen(_))));
    assert!(!output.exists());
}

#[test]
fn unwritable_output_path_is_output_write_error() {
    let dir = unique_temp_dir("imgscale_e2e_unwritable");
    let input = dir.join("in.png");
    write_png(&input, 20, 20);
    let output = dir.join("missing-subdir").join("out.png");

    let result = scaler().run(&input, &output, ScaleRequest::from_cli(10, 0));

    assert!(matches!(result, Err(ImageError::OutputWrite(_))));
}

#[test]
fn pixel_limit_is_resource_limit() {
    let dir = unique_temp_dir("imgscale_e2e_limit");
    let input = dir.join("in.png");
    let output = dir.join("out.png");
    write_png(&input, 300, 300);

    let mut config = ImageConfig::default();
    config.max_decoded_pixels = 50_000;

    let result = ImageScaler::new(config).run(&input, &output, ScaleRequest::from_cli(100, 0));

    assert!(matches!(result, Err(ImageError::ResourceLimit(_))));
    assert!(!output.exists());
}

#[test]
fn input_file_is_left_untouched() {
    let dir = unique_temp_dir("imgscale_e2e_input_untouched");
    let input = dir.join("in.png");
    let output = dir.join("out.png");
    write_png(&input, 64, 48);
    let before = std::fs::read(&input).expect("read input");

    scaler()
        .run(&input, &output, ScaleRequest::from_cli(32, 0))
        .expect("pipeline should succeed");

    let after = std::fs::read(&input).expect("read input again");
    assert_eq!(before, after);
}

#[test]
fn tga_input_without_signature_is_scaled() {
    let dir = unique_temp_dir("imgscale_e2e_tga");
    let input = dir.join("in.tga");
    let output = dir.join("out.png");
    let img = ImageBuffer::from_fn(100, 60, |x, y| Rgb([(x * 2) as u8, (y * 4) as u8, 64]));
    DynamicImage::ImageRgb8(img)
        .save_with_format(&input, ImageFormat::Tga)
        .expect("failed to write test tga");

    let summary = scaler()
        .run(&input, &output, ScaleRequest::from_cli(37, 0))
        .expect("tga input should be accepted");

    assert_eq!(summary.input_format, ImageFormat::Tga);
    assert_eq!(summary.output, Dimensions::new(37, 22));
    let decoded = image::open(&output).expect("output should decode");
    assert_eq!(decoded.dimensions(), (37, 22));
}
