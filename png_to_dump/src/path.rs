/*
    Copyright (C) 2025 bugo07
    Released under EUPL 1.2 License
*/

use std::path::{Path, PathBuf};

pub const DUMP_EXTENSION: &str = "dump";

/// `pics/bird.png` -> `pics/bird.dump`. Works for extensions of any length,
/// and a path without one just gains `.dump`.
pub fn dump_path_for(input: &Path) -> PathBuf {
    input.with_extension(DUMP_EXTENSION)
}
