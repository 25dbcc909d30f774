/*
    Copyright (C) 2025 bugo07
    Released under EUPL 1.2 License
*/

//! Argument checks and exit codes for the `png_to_dump` binary.

use std::ffi::OsString;
use std::path::PathBuf;

use crate::config::DumpConfig;
use crate::convert::{ConversionReport, convert_file};
use crate::error::DumpError;

pub const USAGE: &str = "Usage: png_to_dump <image> [output.dump]";

#[derive(Debug, thiserror::Error)]
pub enum CliError {
    #[error("ERROR: no file provided")]
    MissingArgument,

    #[error("ERROR: Provided argument is not a valid file: {}", .0.display())]
    InvalidPath(PathBuf),

    #[error("ERROR: {0}")]
    Conversion(#[from] DumpError),
}

impl CliError {
    pub fn exit_code(&self) -> i32 {
        match self {
            CliError::MissingArgument => 404,
            CliError::InvalidPath(_) => 403,
            CliError::Conversion(_) => 1,
        }
    }
}

/// A validated request: the input exists and is a regular file.
#[derive(Debug)]
pub struct Invocation {
    pub input: PathBuf,
    pub config: DumpConfig,
}

/// Validates the arguments that follow the program name.
pub fn parse_args<I, A>(args: I) -> Result<Invocation, CliError>
where
    I: IntoIterator<Item = A>,
    A: Into<OsString>,
{
    let mut args = args.into_iter().map(Into::into);

    let input = PathBuf::from(args.next().ok_or(CliError::MissingArgument)?);
    if !input.is_file() {
        return Err(CliError::InvalidPath(input));
    }

    let mut config = DumpConfig::default();
    if let Some(output) = args.next() {
        config = config.with_output(output);
    }

    let extra = args.count();
    if extra > 0 {
        log::warn!("ignoring {extra} extra argument(s)");
    }

    Ok(Invocation { input, config })
}

pub fn run(invocation: Invocation) -> Result<ConversionReport, CliError> {
    Ok(convert_file(&invocation.input, &invocation.config)?)
}
