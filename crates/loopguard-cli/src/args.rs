use clap::{Parser, ValueEnum};
use std::path::PathBuf;

/// CLI arguments for the loopguard binary.
#[derive(Parser, Debug)]
#[command(
    name = "loopguard",
    version,
    about = "Find closures created in loops that capture loop-varying variables"
)]
pub struct CliArgs {
    /// Files and directories to lint. Defaults to the current directory.
    pub paths: Vec<PathBuf>,

    /// Path to a loopguard.json file. Looked up from the current directory
    /// upward when omitted.
    #[arg(short = 'c', long)]
    pub config: Option<PathBuf>,

    /// Output format.
    #[arg(short = 'f', long, value_enum, default_value_t = OutputFormat::Text)]
    pub format: OutputFormat,

    /// Disable colored output.
    #[arg(long = "no-color")]
    pub no_color: bool,

    /// Exit with status 1 when there are more warnings than this.
    #[arg(long = "max-warnings", value_name = "N")]
    pub max_warnings: Option<usize>,

    /// Report errors only.
    #[arg(short = 'q', long)]
    pub quiet: bool,

    /// Declare a global variable, optionally `NAME:writable` or `NAME:off`.
    #[arg(long = "global", value_name = "NAME[:ACCESS]")]
    pub globals: Vec<String>,

    /// Print the scope graph of each file as JSON instead of linting.
    #[arg(long = "print-scopes")]
    pub print_scopes: bool,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Text,
    Json,
}
