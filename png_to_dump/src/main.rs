/*
    Copyright (C) 2025 bugo07
    Released under EUPL 1.2 License
*/

use png_to_dump::cli::{self, CliError};

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let result = cli::parse_args(std::env::args_os().skip(1)).and_then(cli::run);

    match result {
        Ok(report) => {
            log::debug!("{report:?}");
            println!("Done");
        }
        Err(err) => {
            eprintln!("{err}");
            if matches!(err, CliError::MissingArgument) {
                eprintln!("{}", cli::USAGE);
            }
            std::process::exit(err.exit_code());
        }
    }
}
