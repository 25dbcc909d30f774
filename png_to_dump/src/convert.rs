/*
    Copyright (C) 2025 bugo07
    Released under EUPL 1.2 License
*/

//! File-level conversion: decode with `image`, stream the dump into a
//! temporary sibling, then move it into place.

use std::ffi::OsString;
use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use image::{ColorType, DynamicImage, ImageReader};

use crate::config::DumpConfig;
use crate::dump::dump_pixels;
use crate::error::DumpError;
use crate::pixel::{MIN_CHANNELS, PixelGrid};

/// What a successful conversion produced.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConversionReport {
    pub input: PathBuf,
    pub output: PathBuf,
    pub width: u32,
    pub height: u32,
    pub channels: usize,
    pub bytes: u64,
}

/// Decodes `input`, refusing images over `config.max_pixels` before the
/// pixel data is read.
pub fn decode_image(input: &Path, config: &DumpConfig) -> Result<DynamicImage, DumpError> {
    let (width, height) = ImageReader::open(input)?
        .with_guessed_format()?
        .into_dimensions()?;
    check_pixel_limit(width, height, config.max_pixels)?;

    let image = ImageReader::open(input)?.with_guessed_format()?.decode()?;
    log::debug!(
        "decoded {} as {:?} {}x{}",
        input.display(),
        image.color(),
        image.width(),
        image.height()
    );

    Ok(image)
}

/// Streams the dump of an already decoded image into `sink`.
pub fn dump_image<W: Write>(image: &DynamicImage, sink: &mut W) -> Result<u64, DumpError> {
    let (width, height) = (image.width(), image.height());

    match image {
        DynamicImage::ImageRgb8(buf) => {
            dump_pixels(&PixelGrid::new(width, height, 3, buf.as_raw().as_slice())?, sink)
        }
        DynamicImage::ImageRgba8(buf) => {
            dump_pixels(&PixelGrid::new(width, height, 4, buf.as_raw().as_slice())?, sink)
        }
        DynamicImage::ImageRgb16(buf) => {
            dump_pixels(&PixelGrid::new(width, height, 3, buf.as_raw().as_slice())?, sink)
        }
        DynamicImage::ImageRgba16(buf) => {
            dump_pixels(&PixelGrid::new(width, height, 4, buf.as_raw().as_slice())?, sink)
        }
        other => Err(unsupported(other.color())),
    }
}

/// Converts `input` into a `.dump` file and reports what was written.
///
/// The output is either complete or absent: decode errors happen before any
/// file is created, and a failed or rejected write removes its temporary file.
pub fn convert_file(input: &Path, config: &DumpConfig) -> Result<ConversionReport, DumpError> {
    let output = config.output_for(input);
    let image = decode_image(input, config)?;

    let bytes = write_dump(&image, &output)?;

    let report = ConversionReport {
        input: input.to_path_buf(),
        output,
        width: image.width(),
        height: image.height(),
        channels: image.color().channel_count() as usize,
        bytes,
    };
    log::info!(
        "wrote {}x{} image data ({} bytes) to {}",
        report.width,
        report.height,
        report.bytes,
        report.output.display()
    );

    Ok(report)
}

fn check_pixel_limit(width: u32, height: u32, limit: u64) -> Result<(), DumpError> {
    let pixels = width as u64 * height as u64;
    if pixels > limit {
        return Err(DumpError::TooLarge { pixels, limit });
    }
    Ok(())
}

fn unsupported(color: ColorType) -> DumpError {
    let channels = color.channel_count() as usize;
    if channels < MIN_CHANNELS {
        DumpError::UnsupportedChannelCount { channels }
    } else {
        DumpError::UnsupportedSampleFormat(format!("{color:?}"))
    }
}

fn partial_path(output: &Path) -> PathBuf {
    let mut name = OsString::from(output.as_os_str());
    name.push(".partial");
    PathBuf::from(name)
}

fn write_dump(image: &DynamicImage, output: &Path) -> Result<u64, DumpError> {
    let partial = partial_path(output);

    let result = stream_to(image, &partial).and_then(|bytes| {
        fs::rename(&partial, output)?;
        Ok(bytes)
    });

    if result.is_err() {
        discard(&partial);
    }
    result
}

fn stream_to(image: &DynamicImage, path: &Path) -> Result<u64, DumpError> {
    let mut writer = BufWriter::new(File::create(path)?);
    let bytes = dump_image(image, &mut writer)?;
    writer.flush()?;
    Ok(bytes)
}

fn discard(partial: &Path) {
    if let Err(err) = fs::remove_file(partial) {
        if err.kind() != std::io::ErrorKind::NotFound {
            log::warn!("could not remove {}: {}", partial.display(), err);
        }
    }
}
