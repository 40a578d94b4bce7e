#![allow(clippy::print_stderr)]

use anyhow::{Context, Result};
use clap::Parser;
use std::io::IsTerminal;
use std::process::ExitCode;

use loopguard_cli::args::CliArgs;
use loopguard_cli::driver::{self, EXIT_FAILURE};
use loopguard_cli::tracing_config;

fn main() -> ExitCode {
    // Initialize tracing if LOOPGUARD_LOG or RUST_LOG is set
    tracing_config::init_tracing();

    let args = CliArgs::parse();
    match run(&args) {
        Ok(code) => ExitCode::from(code),
        Err(err) => {
            eprintln!("loopguard: {err:#}");
            ExitCode::from(EXIT_FAILURE)
        }
    }
}

fn run(args: &CliArgs) -> Result<u8> {
    let cwd = std::env::current_dir().context("failed to resolve current directory")?;
    let color = !args.no_color && std::io::stdout().is_terminal();
    if !color {
        colored::control::set_override(false);
    }

    let summary = driver::run(args, &cwd, color)?;
    if !summary.output.is_empty() {
        print!("{}", summary.output);
        if !summary.output.ends_with('\n') {
            println!();
        }
    }
    Ok(summary.exit_code)
}
