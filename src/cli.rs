use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};

use crate::output::{ColorMode, OutputFormat};

/// Color output control
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum ColorChoice {
    /// Auto-detect terminal capability
    #[default]
    Auto,
    /// Always use colors
    Always,
    /// Never use colors
    Never,
}

impl From<ColorChoice> for ColorMode {
    fn from(choice: ColorChoice) -> Self {
        match choice {
            ColorChoice::Auto => Self::Auto,
            ColorChoice::Always => Self::Always,
            ColorChoice::Never => Self::Never,
        }
    }
}

#[derive(Parser, Debug)]
#[command(name = "doc-doctor")]
#[command(author, version, about = "Find C/C++ functions with incomplete Doxygen comments")]
#[command(long_about = "Scans C/C++ sources for function definitions and reports \
    missing @brief, @param and @return documentation.\n\n\
    Exit codes:\n  \
    0 - Check completed\n  \
    1 - Problems found (with --fail-on-problems)\n  \
    2 - Configuration or runtime error")]
pub struct Cli {
    /// Increase output verbosity (-v, -vv for more)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress non-essential output
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Control color output
    #[arg(long, value_enum, default_value = "auto", global = true)]
    pub color: ColorChoice,

    /// Skip loading configuration file
    #[arg(long, global = true)]
    pub no_config: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Check every C/C++ file under a workspace root
    Check(CheckArgs),

    /// Check a single C/C++ file
    File(FileArgs),

    /// Generate a default configuration file
    Init(InitArgs),

    /// Inspect and triage problems saved by the last check
    Problems(ProblemsArgs),
}

#[derive(Args, Debug)]
#[allow(clippy::struct_excessive_bools)]
pub struct CheckArgs {
    /// Workspace root to check
    #[arg(default_value = ".")]
    pub root: PathBuf,

    /// Path to configuration file
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Output format [possible values: text, json, sarif]
    #[arg(short, long, default_value = "text")]
    pub format: OutputFormat,

    /// Write output to file instead of stdout
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// JSON file of compiler diagnostics; files with errors are reported as syntax errors
    #[arg(long)]
    pub diagnostics: Option<PathBuf>,

    /// Report unbalanced braces, brackets and parentheses as syntax errors
    #[arg(long)]
    pub syntax_check: bool,

    /// Do not save problems to the workspace problem store
    #[arg(long)]
    pub no_store: bool,

    /// Check `main` like any other function (overrides config)
    #[arg(long)]
    pub check_main: bool,

    /// Exit with code 1 when any problem is found
    #[arg(long)]
    pub fail_on_problems: bool,
}

#[derive(Args, Debug)]
pub struct FileArgs {
    /// Source file to check
    pub path: PathBuf,

    /// Path to configuration file
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Output format [possible values: text, json, sarif]
    #[arg(short, long, default_value = "text")]
    pub format: OutputFormat,

    /// Check `main` like any other function (overrides config)
    #[arg(long)]
    pub check_main: bool,
}

#[derive(Args, Debug)]
pub struct InitArgs {
    /// Output path for the configuration file
    #[arg(short, long, default_value = ".doc-doctor.toml")]
    pub output: PathBuf,

    /// Overwrite existing configuration file
    #[arg(long)]
    pub force: bool,
}

#[derive(Args, Debug)]
pub struct ProblemsArgs {
    /// Workspace root holding the problem store
    #[arg(long, default_value = ".", global = true)]
    pub root: PathBuf,

    #[command(subcommand)]
    pub action: ProblemsAction,
}

#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum ProblemsAction {
    /// List saved problems
    List {
        /// Include ignored problems
        #[arg(long)]
        all: bool,
    },

    /// Mark a problem as ignored
    Ignore {
        /// Problem id, as shown by `problems list`
        id: u64,
    },

    /// Mark an ignored problem as normal again
    Restore {
        /// Problem id, as shown by `problems list`
        id: u64,
    },

    /// Remove every saved problem
    Clear,
}

#[cfg(test)]
#[path = "cli_tests.rs"]
mod tests;
