/*
    Copyright (C) 2025 bugo07
    Released under EUPL 1.2 License
*/

//! Converts decoded images into headerless `.dump` files: one 4-byte
//! R, G, B, A record per pixel in row-major order, with `42` standing in
//! for alpha when the source is plain RGB.

pub mod cli;
pub mod config;
pub mod convert;
pub mod dump;
pub mod error;
pub mod path;
pub mod pixel;

pub use config::DumpConfig;
pub use convert::{ConversionReport, convert_file, decode_image, dump_image};
pub use dump::{dump_pixels, encode_records, records_as_bytes};
pub use error::DumpError;
pub use path::dump_path_for;
pub use pixel::{PixelGrid, RECORD_SIZE, Record, SENTINEL, Sample, normalize_pixel};
