//! Tabpage CLI Binary
//!
//! Command-line interface for uploading and paging tabular files.

use clap::Parser;
use std::process;
use tabpage::logging::init_logging;
use tabpage::tooling::cli::{Cli, CliContext};

fn main() {
    let cli = Cli::parse();

    let context = match CliContext::new(cli.data_dir.clone(), cli.config.clone()) {
        Ok(ctx) => ctx,
        Err(e) => {
            eprintln!("Error initializing tabpage: {}", e);
            process::exit(1);
        }
    };

    let logging = cli.logging_config(&context.config().logging);
    if let Err(e) = init_logging(Some(&logging)) {
        eprintln!("Error initializing logging: {}", e);
        process::exit(1);
    }

    match context.execute(&cli.command) {
        Ok(output) => {
            println!("{}", output);
        }
        Err(e) => {
            eprintln!("Error [{}]: {}", e.kind(), e);
            process::exit(1);
        }
    }
}
