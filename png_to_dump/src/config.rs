/*
    Copyright (C) 2025 bugo07
    Released under EUPL 1.2 License
*/

use std::path::{Path, PathBuf};

use crate::path::dump_path_for;

/// Default ceiling on `width * height`, checked against the image header
/// before the full decode.
pub const DEFAULT_MAX_PIXELS: u64 = 40_000_000;

/// Knobs for a single conversion.
#[derive(Debug, Clone)]
pub struct DumpConfig {
    /// Explicit destination. When unset the dump lands next to the input.
    pub output: Option<PathBuf>,
    pub max_pixels: u64,
}

impl Default for DumpConfig {
    fn default() -> Self {
        Self {
            output: None,
            max_pixels: DEFAULT_MAX_PIXELS,
        }
    }
}

impl DumpConfig {
    pub fn with_output(mut self, output: impl Into<PathBuf>) -> Self {
        self.output = Some(output.into());
        self
    }

    pub fn with_max_pixels(mut self, max_pixels: u64) -> Self {
        self.max_pixels = max_pixels;
        self
    }

    /// Where the dump of `input` gets written.
    pub fn output_for(&self, input: &Path) -> PathBuf {
        match &self.output {
            Some(path) => path.clone(),
            None => dump_path_for(input),
        }
    }
}
