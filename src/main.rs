//! detect-file-type CLI: classify files (and `-` for stdin) by content.

use anyhow::Result;
use clap::Parser;
use detect_file_type::engine::arg_parser::Cli;
use detect_file_type::engine::handle_run;
use std::time::Instant;

fn main() -> Result<()> {
    let start_time = Instant::now();
    let cli = Cli::parse();
    let status = handle_run(&cli)?;
    log::debug!("Total time: {:?}", start_time.elapsed());
    std::process::exit(status.code());
}
