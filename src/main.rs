//! `wikicat` — configuration toolkit for the wiki comment categorization
//! pipeline

use clap::Parser;

use wikicat::cli::args::Cli;
use wikicat::cli::commands;
use wikicat::error::ExitCode;
use wikicat::observability::{LogFormat, init_logging};

fn main() {
    let cli = Cli::parse();

    if !cli.quiet {
        init_logging(LogFormat::Human, cli.verbose, cli.color);
    }

    match commands::dispatch(cli) {
        Ok(()) => std::process::exit(ExitCode::SUCCESS),
        Err(e) => {
            eprintln!("error: {e}");
            std::process::exit(e.exit_code());
        }
    }
}
