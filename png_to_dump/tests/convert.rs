/*
    Copyright (C) 2025 bugo07
    Released under EUPL 1.2 License
*/

use std::fs;
use std::path::PathBuf;

use image::{GrayImage, ImageBuffer, Luma, Rgb, RgbImage, Rgba, RgbaImage};
use png_to_dump::cli::{self, CliError};
use png_to_dump::{DumpConfig, DumpError, convert_file};

fn scratch_dir(name: &str) -> PathBuf {
    let _ = env_logger::builder().is_test(true).try_init();
    let dir = std::env::temp_dir().join(format!("png_to_dump_{}_{}", name, std::process::id()));
    let _ = fs::remove_dir_all(&dir);
    fs::create_dir_all(&dir).unwrap();
    dir
}

#[test]
fn rgb_png_gets_sentinel_alpha() {
    let dir = scratch_dir("rgb");
    let input = dir.join("pipe.png");
    RgbImage::from_raw(2, 1, vec![1, 2, 3, 4, 5, 6])
        .unwrap()
        .save(&input)
        .unwrap();

    let report = convert_file(&input, &DumpConfig::default()).unwrap();

    assert_eq!(report.output, dir.join("pipe.dump"));
    assert_eq!((report.width, report.height, report.channels), (2, 1, 3));
    assert_eq!(report.bytes, 8);
    assert_eq!(fs::read(&report.output).unwrap(), [1, 2, 3, 42, 4, 5, 6, 42]);
    assert!(!dir.join("pipe.dump.partial").exists());

    fs::remove_dir_all(&dir).unwrap();
}

#[test]
fn rgba_png_keeps_alpha_in_row_major_order() {
    let dir = scratch_dir("rgba");
    let input = dir.join("bird.png");
    let img = RgbaImage::from_fn(3, 2, |x, y| Rgba([x as u8, y as u8, 7, (10 * x + y) as u8]));
    img.save(&input).unwrap();

    let report = convert_file(&input, &DumpConfig::default()).unwrap();
    let bytes = fs::read(&report.output).unwrap();

    assert_eq!(bytes.len(), 4 * 3 * 2);
    let expected: Vec<u8> = img.pixels().flat_map(|p| p.0).collect();
    assert_eq!(bytes, expected);
    // second row starts at record 3
    assert_eq!(&bytes[12..16], [0, 1, 7, 1]);

    fs::remove_dir_all(&dir).unwrap();
}

#[test]
fn explicit_output_path_is_used() {
    let dir = scratch_dir("override");
    let input = dir.join("start.png");
    RgbImage::from_pixel(1, 1, Rgb([10, 20, 30])).save(&input).unwrap();
    let output = dir.join("custom.bin");

    let report = convert_file(&input, &DumpConfig::default().with_output(&output)).unwrap();

    assert_eq!(report.output, output);
    assert_eq!(fs::read(&output).unwrap(), [10, 20, 30, 42]);
    assert!(!dir.join("start.dump").exists());

    fs::remove_dir_all(&dir).unwrap();
}

#[test]
fn corrupt_input_writes_nothing() {
    let dir = scratch_dir("corrupt");
    let input = dir.join("broken.png");
    fs::write(&input, b"\x89PNG\r\n\x1a\nthis is not a png").unwrap();

    let err = convert_file(&input, &DumpConfig::default()).unwrap_err();

    assert!(matches!(err, DumpError::Decode(_)));
    assert!(!dir.join("broken.dump").exists());
    assert!(!dir.join("broken.dump.partial").exists());

    fs::remove_dir_all(&dir).unwrap();
}

#[test]
fn failed_stream_leaves_no_partial_file() {
    let dir = scratch_dir("deep");
    let input = dir.join("deep.png");
    // wide enough that earlier records reach the file before the bad pixel
    let width = 2000;
    let img: ImageBuffer<Rgb<u16>, Vec<u16>> = ImageBuffer::from_fn(width, 1, |x, _| {
        if x == width - 1 { Rgb([300, 0, 0]) } else { Rgb([1, 2, 3]) }
    });
    img.save(&input).unwrap();

    let err = convert_file(&input, &DumpConfig::default()).unwrap_err();

    assert!(matches!(
        err,
        DumpError::ChannelOutOfRange { pixel: 1999, channel: 0, value: 300, depth: 16 }
    ));
    assert!(err.to_string().contains("16-bit source"));
    assert!(!dir.join("deep.dump").exists());
    assert!(!dir.join("deep.dump.partial").exists());

    fs::remove_dir_all(&dir).unwrap();
}

#[test]
fn missing_input_is_an_io_error() {
    let dir = scratch_dir("missing");
    let err = convert_file(&dir.join("nope.png"), &DumpConfig::default()).unwrap_err();

    assert!(matches!(err, DumpError::Io(_)));
    assert!(!dir.join("nope.dump").exists());

    fs::remove_dir_all(&dir).unwrap();
}

#[test]
fn grayscale_png_is_rejected_without_output() {
    let dir = scratch_dir("gray");
    let input = dir.join("gray.png");
    GrayImage::from_pixel(4, 4, Luma([128])).save(&input).unwrap();

    let err = convert_file(&input, &DumpConfig::default()).unwrap_err();

    assert!(matches!(
        err,
        DumpError::UnsupportedChannelCount { channels: 1 }
    ));
    assert!(!dir.join("gray.dump").exists());

    fs::remove_dir_all(&dir).unwrap();
}

#[test]
fn oversized_image_is_refused_before_decode() {
    let dir = scratch_dir("limit");
    let input = dir.join("big.png");
    RgbImage::new(20, 20).save(&input).unwrap();

    let config = DumpConfig::default().with_max_pixels(399);
    let err = convert_file(&input, &config).unwrap_err();

    assert!(matches!(
        err,
        DumpError::TooLarge { pixels: 400, limit: 399 }
    ));
    assert!(!dir.join("big.dump").exists());

    fs::remove_dir_all(&dir).unwrap();
}

#[test]
fn existing_dump_is_replaced_whole() {
    let dir = scratch_dir("replace");
    let input = dir.join("target.png");
    RgbaImage::from_pixel(1, 1, Rgba([1, 2, 3, 4])).save(&input).unwrap();
    fs::write(dir.join("target.dump"), vec![0xAA; 64]).unwrap();

    convert_file(&input, &DumpConfig::default()).unwrap();

    assert_eq!(fs::read(dir.join("target.dump")).unwrap(), [1, 2, 3, 4]);

    fs::remove_dir_all(&dir).unwrap();
}

#[test]
fn cli_runs_end_to_end() {
    let dir = scratch_dir("cli");
    let input = dir.join("background.png");
    RgbImage::from_pixel(2, 2, Rgb([9, 9, 9])).save(&input).unwrap();

    let report = cli::parse_args([input.as_os_str()])
        .and_then(cli::run)
        .unwrap();

    assert_eq!(report.bytes, 16);
    assert_eq!(fs::read(dir.join("background.dump")).unwrap(), [9u8, 9, 9, 42].repeat(4));

    fs::remove_dir_all(&dir).unwrap();
}

#[test]
fn cli_reports_decode_failures_with_exit_one() {
    let dir = scratch_dir("cli_fail");
    let input = dir.join("empty.png");
    fs::write(&input, b"").unwrap();

    let err = cli::parse_args([input.as_os_str()])
        .and_then(cli::run)
        .unwrap_err();

    assert!(matches!(err, CliError::Conversion(_)));
    assert_eq!(err.exit_code(), 1);

    fs::remove_dir_all(&dir).unwrap();
}
