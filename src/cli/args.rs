//! CLI argument definitions.
//!
//! This module defines all CLI arguments using clap's derive macros.
//! The main entry point is the [`Cli`] struct.

use clap::{Args, FromArgMatches, Parser, Subcommand};
use clap_complete::Shell;
use std::path::PathBuf;

use crate::error::{InfoError, Result};

/// Interpreter used when `--python` is not given.
pub const DEFAULT_PYTHON: &str = if cfg!(windows) { "python" } else { "python3" };

/// python-info - Python interpreter and environment diagnostics for CI logs.
#[derive(Debug, Parser)]
#[command(name = "python-info")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Only print errors
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,

    /// Enable debug logging
    #[arg(long, global = true)]
    pub debug: bool,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Available subcommands.
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Print the diagnostic report (default if no command specified)
    Report(ReportArgs),

    /// Check a saved report for expected facts
    Verify(VerifyArgs),

    /// Generate shell completions
    Completions(CompletionsArgs),
}

/// Arguments for the `report` command.
#[derive(Debug, Clone, PartialEq, Eq, clap::Args)]
pub struct ReportArgs {
    /// Python interpreter to describe
    #[arg(long, env = "PYTHON_INFO_PYTHON", default_value = DEFAULT_PYTHON)]
    pub python: String,

    /// Also write the report to this file
    #[arg(short, long, env = "ACTION_FILE_PATH")]
    pub output: Option<PathBuf>,

    /// Add a workflow context section (repeatable)
    #[arg(long, value_name = "NAME=JSON")]
    pub context: Vec<String>,

    /// Leave this environment variable out of the report (repeatable)
    #[arg(long, value_name = "NAME")]
    pub exclude_env: Vec<String>,
}

impl Default for ReportArgs {
    fn default() -> Self {
        Self {
            python: DEFAULT_PYTHON.to_string(),
            output: None,
            context: Vec::new(),
            exclude_env: Vec::new(),
        }
    }
}

impl ReportArgs {
    /// Arguments for `report` given no flags, with defaults and environment
    /// fallbacks resolved by clap.
    pub fn from_env() -> Result<Self> {
        let invalid = |e: clap::Error| InfoError::InvalidArgument {
            message: e.to_string(),
        };
        let matches = Self::augment_args(clap::Command::new("report"))
            .try_get_matches_from(["report"])
            .map_err(invalid)?;
        Self::from_arg_matches(&matches).map_err(invalid)
    }

    /// The output path, treating an empty value as unset.
    pub fn output_path(&self) -> Option<&PathBuf> {
        self.output
            .as_ref()
            .filter(|path| !path.as_os_str().is_empty())
    }
}

/// Arguments for the `verify` command.
#[derive(Debug, Clone, Default, clap::Args)]
pub struct VerifyArgs {
    /// Path to the saved report
    #[arg(long)]
    pub path: PathBuf,

    /// Expected package and version; `*` matches any version (repeatable)
    #[arg(long, num_args = 2, value_names = ["NAME", "VERSION"])]
    pub package: Vec<String>,

    /// Expected sys.prefix (defaults to the prefix of --python)
    #[arg(long)]
    pub sys_prefix: Option<String>,

    /// Environment variable whose value must not appear in the report (repeatable)
    #[arg(long, value_name = "NAME")]
    pub secret_env: Vec<String>,

    /// Python interpreter used to discover the default sys.prefix
    #[arg(long, env = "PYTHON_INFO_PYTHON", default_value = DEFAULT_PYTHON)]
    pub python: String,
}

/// Arguments for the `completions` command.
#[derive(Debug, Clone, clap::Args)]
pub struct CompletionsArgs {
    /// Shell to generate completions for
    #[arg(value_enum)]
    pub shell: Shell,
}
