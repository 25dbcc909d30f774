/*
    Copyright (C) 2025 bugo07
    Released under EUPL 1.2 License
*/

//! The pixel dumper: serializes a [`PixelGrid`] as one fixed 4-byte record
//! per pixel, with no header.

use std::io::Write;

use crate::error::DumpError;
use crate::pixel::{PixelGrid, RECORD_SIZE, Record, Sample, normalize_pixel};

/// Records buffered before each `write_all` on the sink.
const BATCH_RECORDS: usize = 1024;

/// Views records as the raw dump byte stream.
pub fn records_as_bytes(records: &[Record]) -> &[u8] {
    bytemuck::cast_slice(records)
}

/// Serializes every pixel up front.
///
/// Nothing is returned unless all pixels are valid, so callers can validate
/// before touching the destination.
pub fn encode_records<S: Sample>(grid: &PixelGrid<'_, S>) -> Result<Vec<Record>, DumpError> {
    grid.pixels()
        .enumerate()
        .map(|(i, px)| normalize_pixel(i, px))
        .collect()
}

/// Appends the dump of `grid` to `sink`, returning the number of bytes
/// written (always `4 * width * height` on success).
///
/// A failing pixel or write aborts the pass; whatever was already flushed
/// stays in the sink.
pub fn dump_pixels<S: Sample, W: Write>(
    grid: &PixelGrid<'_, S>,
    sink: &mut W,
) -> Result<u64, DumpError> {
    let mut batch: Vec<Record> = Vec::with_capacity(BATCH_RECORDS.min(grid.pixel_count()));
    let mut written = 0u64;

    for (i, px) in grid.pixels().enumerate() {
        batch.push(normalize_pixel(i, px)?);
        if batch.len() == BATCH_RECORDS {
            sink.write_all(records_as_bytes(&batch))?;
            written += (batch.len() * RECORD_SIZE) as u64;
            batch.clear();
        }
    }

    if !batch.is_empty() {
        sink.write_all(records_as_bytes(&batch))?;
        written += (batch.len() * RECORD_SIZE) as u64;
    }

    debug_assert_eq!(written, grid.dump_len() as u64);
    log::debug!(
        "dumped {}x{} ({} channels), {} bytes",
        grid.width(),
        grid.height(),
        grid.channels(),
        written
    );

    Ok(written)
}
