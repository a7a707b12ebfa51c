//! repomod CLI Binary
//!
//! Command-line interface for the repomod transformation engine.

use clap::Parser;
use repomod::logging::init_logging;
use repomod::tooling::cli::{Cli, CliContext};
use std::process;

#[tokio::main]
async fn main() {
    let cli = Cli::parse();
    let root = cli.command.target().root.clone();

    let context = match CliContext::new(&root, cli.config.as_deref()) {
        Ok(ctx) => ctx,
        Err(e) => {
            eprintln!("Error initializing: {}", e);
            process::exit(1);
        }
    };

    // CLI flags win over the config file; REPOMOD_LOG* env vars win over both
    let mut logging = context.config().logging.clone();
    if let Some(level) = &cli.log_level {
        logging.level = level.clone();
    }
    if let Some(format) = &cli.log_format {
        logging.format = format.clone();
    }
    if let Some(output) = &cli.log_output {
        logging.output = output.clone();
    }
    if cli.log_file.is_some() {
        logging.file = cli.log_file.clone();
    }
    if let Err(e) = init_logging(Some(&logging)) {
        eprintln!("Error initializing logging: {}", e);
        process::exit(1);
    }

    match context.execute(&cli.command).await {
        Ok(output) => {
            print!("{}", output.stdout);
            if !output.stdout.ends_with('\n') {
                println!();
            }
            eprint!("{}", output.stderr);
        }
        Err(e) => {
            eprintln!("Error: {}", e);
            process::exit(1);
        }
    }
}
