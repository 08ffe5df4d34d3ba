mod cli;
mod logging;
mod output;

use std::io::{self, Write};
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::Parser;
use logfind::{FindResult, Finder};
use logfind_input::CsvSource;
use tracing::info;

use crate::cli::Args;
use crate::logging::init_logging;

fn main() -> ExitCode {
    let args = Args::parse();
    init_logging();

    match run(&args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("lf: {err:#}");
            ExitCode::FAILURE
        }
    }
}

fn run(args: &Args) -> Result<()> {
    let result = find(args)?;
    info!(count = result.count, matched = result.events.len(), "query complete");

    let rendered = output::render(&result, args.format, args.verbose)?;
    io::stdout()
        .lock()
        .write_all(rendered.as_bytes())
        .context("failed to write results")?;
    Ok(())
}

fn find(args: &Args) -> Result<FindResult> {
    let options = args.to_options();

    if args.reads_stdin() {
        let source = CsvSource::from_reader(io::stdin().lock());
        return Finder::new(source)
            .find(options)
            .context("failed to query stdin");
    }

    let path = &args.file;
    let source = CsvSource::from_path(path)
        .with_context(|| format!("failed to open {}", path.display()))?;
    Finder::new(source)
        .find(options)
        .with_context(|| format!("failed to query {}", path.display()))
}
