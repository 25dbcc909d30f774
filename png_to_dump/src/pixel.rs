/*
    Copyright (C) 2025 bugo07
    Released under EUPL 1.2 License
*/

use crate::error::DumpError;

/// Filler written in place of alpha when the source only has RGB.
///
/// Existing `.dump` readers rely on this exact value.
pub const SENTINEL: u8 = 42;

/// Bytes per output record.
pub const RECORD_SIZE: usize = 4;

/// Smallest channel count the dumper accepts (RGB).
pub const MIN_CHANNELS: usize = 3;

/// One serialized pixel: R, G, B, then alpha or [`SENTINEL`].
pub type Record = [u8; RECORD_SIZE];

/// A decoded channel value.
///
/// Decoders hand out samples wider than a byte for deep images, so the
/// narrowing is checked instead of truncated.
pub trait Sample: Copy {
    /// Bit depth of the decoded sample type.
    const DEPTH: u32;

    fn to_byte(self) -> Option<u8>;

    /// Lossless widening, used for error reporting.
    fn widen(self) -> u64;
}

impl Sample for u8 {
    const DEPTH: u32 = 8;

    #[inline]
    fn to_byte(self) -> Option<u8> {
        Some(self)
    }

    #[inline]
    fn widen(self) -> u64 {
        self as u64
    }
}

impl Sample for u16 {
    const DEPTH: u32 = 16;

    #[inline]
    fn to_byte(self) -> Option<u8> {
        u8::try_from(self).ok()
    }

    #[inline]
    fn widen(self) -> u64 {
        self as u64
    }
}

/// Read-only view over a decoded image: interleaved samples in row-major
/// order, `channels` samples per pixel.
#[derive(Debug, Clone, Copy)]
pub struct PixelGrid<'a, S = u8> {
    width: u32,
    height: u32,
    channels: usize,
    samples: &'a [S],
}

impl<'a, S: Sample> PixelGrid<'a, S> {
    pub fn new(
        width: u32,
        height: u32,
        channels: usize,
        samples: &'a [S],
    ) -> Result<Self, DumpError> {
        if channels < MIN_CHANNELS {
            return Err(DumpError::UnsupportedChannelCount { channels });
        }

        let overflow = || DumpError::DimensionOverflow { width, height };
        let pixels = (width as usize)
            .checked_mul(height as usize)
            .ok_or_else(overflow)?;
        let expected = pixels.checked_mul(channels).ok_or_else(overflow)?;
        // the dump itself must be addressable too
        pixels.checked_mul(RECORD_SIZE).ok_or_else(overflow)?;

        if samples.len() != expected {
            return Err(DumpError::SampleCountMismatch {
                expected,
                actual: samples.len(),
            });
        }

        Ok(Self {
            width,
            height,
            channels,
            samples,
        })
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn channels(&self) -> usize {
        self.channels
    }

    pub fn pixel_count(&self) -> usize {
        self.samples.len() / self.channels
    }

    /// Size in bytes of the dump this grid serializes to.
    pub fn dump_len(&self) -> usize {
        self.pixel_count() * RECORD_SIZE
    }

    /// Pixel tuples in row-major order.
    pub fn pixels(&self) -> std::slice::ChunksExact<'a, S> {
        self.samples.chunks_exact(self.channels)
    }
}

/// Turns one pixel tuple into its output record.
///
/// `pixel` is the row-major index and only shows up in errors. Channels past
/// alpha are ignored.
pub fn normalize_pixel<S: Sample>(pixel: usize, channels: &[S]) -> Result<Record, DumpError> {
    if channels.len() < MIN_CHANNELS {
        return Err(DumpError::UnsupportedChannelCount {
            channels: channels.len(),
        });
    }

    let byte = |channel: usize| {
        let value = channels[channel];
        value.to_byte().ok_or(DumpError::ChannelOutOfRange {
            pixel,
            channel,
            value: value.widen(),
            depth: S::DEPTH,
        })
    };

    let (r, g, b) = (byte(0)?, byte(1)?, byte(2)?);
    let a = if channels.len() > MIN_CHANNELS {
        byte(3)?
    } else {
        SENTINEL
    };

    Ok([r, g, b, a])
}
