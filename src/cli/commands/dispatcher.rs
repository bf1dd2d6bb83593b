//! Command dispatching.
//!
//! This module provides the core command infrastructure:
//! - [`Command`] trait for implementing commands
//! - [`CommandResult`] for uniform result reporting
//! - [`CommandDispatcher`] for routing CLI subcommands

use std::path::PathBuf;

use crate::cli::args::{Cli, Commands, ReportArgs};
use crate::error::Result;
use crate::facts::{CommandRunner, EnvSnapshot, OsCommandRunner};
use crate::ui::UserInterface;

/// Trait for command implementations.
///
/// Each CLI subcommand implements this trait to provide its execution logic.
pub trait Command {
    /// Execute the command.
    ///
    /// # Arguments
    ///
    /// * `ui` - User interface for status and error messages
    ///
    /// # Returns
    ///
    /// A [`CommandResult`] indicating success/failure and exit code.
    fn execute(&self, ui: &mut dyn UserInterface) -> Result<CommandResult>;
}

/// Result of command execution.
#[derive(Debug)]
pub struct CommandResult {
    /// Whether the command succeeded.
    pub success: bool,

    /// Exit code to use (0 for success, non-zero for failure).
    pub exit_code: i32,
}

impl CommandResult {
    /// Create a successful result.
    pub fn success() -> Self {
        Self {
            success: true,
            exit_code: 0,
        }
    }
}

/// Dispatches CLI commands to their implementations.
pub struct CommandDispatcher {
    working_dir: PathBuf,
    env: EnvSnapshot,
    runner: Box<dyn CommandRunner>,
}

impl CommandDispatcher {
    /// Create a dispatcher that runs real processes.
    pub fn new(working_dir: PathBuf, env: EnvSnapshot) -> Self {
        Self::with_runner(working_dir, env, Box::new(OsCommandRunner))
    }

    /// Create a dispatcher with a custom command runner.
    pub fn with_runner(
        working_dir: PathBuf,
        env: EnvSnapshot,
        runner: Box<dyn CommandRunner>,
    ) -> Self {
        Self {
            working_dir,
            env,
            runner,
        }
    }

    /// Dispatch and execute a command.
    ///
    /// Routes the CLI subcommand to the appropriate command implementation
    /// and executes it.
    pub fn dispatch(&self, cli: &Cli, ui: &mut dyn UserInterface) -> Result<CommandResult> {
        match &cli.command {
            Some(Commands::Report(args)) => self.report(args.clone(), ui),
            Some(Commands::Verify(args)) => {
                let cmd = super::verify::VerifyCommand::new(
                    &self.working_dir,
                    &self.env,
                    self.runner.as_ref(),
                    args.clone(),
                );
                cmd.execute(ui)
            }
            Some(Commands::Completions(args)) => {
                let cmd = super::completions::CompletionsCommand::new(args.clone());
                cmd.execute(ui)
            }
            // Default to report; flags still come from the environment
            None => self.report(ReportArgs::from_env()?, ui),
        }
    }

    fn report(&self, args: ReportArgs, ui: &mut dyn UserInterface) -> Result<CommandResult> {
        let cmd = super::report::ReportCommand::new(
            &self.working_dir,
            &self.env,
            self.runner.as_ref(),
            args,
        );
        cmd.execute(ui)
    }
}
