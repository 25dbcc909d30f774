/*
    Copyright (C) 2025 bugo07
    Released under EUPL 1.2 License
*/

//! Error type shared by the dumper and the conversion glue.

/// Everything that can stop a dump.
///
/// All variants are fatal: a conversion is a one-shot batch job and nothing
/// is retried.
#[derive(Debug, thiserror::Error)]
pub enum DumpError {
    #[error("unsupported channel count {channels}, at least 3 (RGB) are required")]
    UnsupportedChannelCount { channels: usize },

    #[error("unsupported sample format {0}")]
    UnsupportedSampleFormat(String),

    #[error(
        "pixel {pixel} channel {channel} has value {value}, which does not fit in a byte \
         ({depth}-bit source, only 8-bit range values can be dumped)"
    )]
    ChannelOutOfRange {
        pixel: usize,
        channel: usize,
        value: u64,
        depth: u32,
    },

    #[error("expected {expected} samples, got {actual}")]
    SampleCountMismatch { expected: usize, actual: usize },

    #[error("image dimensions {width}x{height} overflow the address space")]
    DimensionOverflow { width: u32, height: u32 },

    #[error("image has {pixels} pixels, limit is {limit}")]
    TooLarge { pixels: u64, limit: u64 },

    #[error("failed to decode image: {0}")]
    Decode(#[from] image::ImageError),

    #[error("i/o error: {0}")]
    Io(#[from] std::io::Error),
}
