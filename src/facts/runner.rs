//! External command execution.
//!
//! Gathering runs the interpreter directly (no shell) and captures its
//! output. The [`CommandRunner`] trait is the seam that lets tests feed
//! canned interpreter output without a Python installation.

use std::process::{Command, Stdio};
use std::time::{Duration, Instant};

use crate::error::{InfoError, Result};

/// Result of running an external command.
#[derive(Debug, Clone)]
pub struct CmdOutput {
    /// Exit code (None if killed by signal).
    pub exit_code: Option<i32>,

    /// Standard output.
    pub stdout: String,

    /// Standard error.
    pub stderr: String,

    /// Execution duration.
    pub duration: Duration,

    /// Whether the command succeeded (exit code 0).
    pub success: bool,
}

impl CmdOutput {
    /// Create a success result.
    pub fn success(stdout: impl Into<String>) -> Self {
        Self {
            exit_code: Some(0),
            stdout: stdout.into(),
            stderr: String::new(),
            duration: Duration::ZERO,
            success: true,
        }
    }

    /// Create a failure result.
    pub fn failure(exit_code: Option<i32>, stderr: impl Into<String>) -> Self {
        Self {
            exit_code,
            stdout: String::new(),
            stderr: stderr.into(),
            duration: Duration::ZERO,
            success: false,
        }
    }
}

/// Runs a program given as an argv vector.
pub trait CommandRunner {
    /// Run `argv[0]` with the remaining arguments and wait for it to exit.
    ///
    /// A non-zero exit is reported through [`CmdOutput::success`], not as an
    /// error. Only a failure to start the process is an error.
    fn run(&self, argv: &[String]) -> Result<CmdOutput>;
}

/// [`CommandRunner`] backed by [`std::process::Command`].
#[derive(Debug, Clone, Copy, Default)]
pub struct OsCommandRunner;

impl CommandRunner for OsCommandRunner {
    fn run(&self, argv: &[String]) -> Result<CmdOutput> {
        let Some((program, args)) = argv.split_first() else {
            return Err(InfoError::InvalidArgument {
                message: "empty command line".to_string(),
            });
        };

        tracing::debug!("Running: {}", display_argv(argv));
        let start = Instant::now();

        let output = Command::new(program)
            .args(args)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .output()
            .map_err(|e| {
                tracing::debug!("Failed to start {}: {}", program, e);
                InfoError::CommandFailed {
                    command: display_argv(argv),
                    code: None,
                }
            })?;

        let result = CmdOutput {
            exit_code: output.status.code(),
            stdout: String::from_utf8_lossy(&output.stdout).to_string(),
            stderr: String::from_utf8_lossy(&output.stderr).to_string(),
            duration: start.elapsed(),
            success: output.status.success(),
        };

        tracing::debug!(
            "{} exited with {:?} in {:?}",
            program,
            result.exit_code,
            result.duration
        );
        Ok(result)
    }
}

/// [`CommandRunner`] that replays canned results, for tests.
///
/// Commands are matched on their space-joined argv. Unknown commands behave
/// like a program that cannot be started.
///
/// # Example
///
/// ```
/// use python_info::facts::{CmdOutput, CommandRunner, ScriptedRunner};
///
/// let runner = ScriptedRunner::new().with("python3 -m pip freeze --all", CmdOutput::success("pip==24.0\n"));
/// let argv: Vec<String> = ["python3", "-m", "pip", "freeze", "--all"].iter().map(|s| s.to_string()).collect();
/// assert!(runner.run(&argv).unwrap().success);
/// assert_eq!(runner.calls().len(), 1);
/// ```
#[derive(Debug, Default)]
pub struct ScriptedRunner {
    responses: std::collections::HashMap<String, CmdOutput>,
    calls: std::cell::RefCell<Vec<String>>,
}

impl ScriptedRunner {
    /// Create a runner with no scripted commands.
    pub fn new() -> Self {
        Self::default()
    }

    /// Script the result for a command line.
    pub fn with(mut self, command: &str, output: CmdOutput) -> Self {
        self.responses.insert(command.to_string(), output);
        self
    }

    /// Command lines run so far, in order.
    pub fn calls(&self) -> Vec<String> {
        self.calls.borrow().clone()
    }
}

impl CommandRunner for ScriptedRunner {
    fn run(&self, argv: &[String]) -> Result<CmdOutput> {
        let command = display_argv(argv);
        self.calls.borrow_mut().push(command.clone());
        self.responses
            .get(&command)
            .cloned()
            .ok_or(InfoError::CommandFailed {
                command,
                code: None,
            })
    }
}

/// Run a best-effort capability probe.
///
/// Returns `true` only if the command started and exited with status 0.
pub fn probe(runner: &dyn CommandRunner, argv: &[String]) -> bool {
    runner.run(argv).map(|r| r.success).unwrap_or(false)
}

/// Run a command that must succeed, returning its captured stdout.
pub fn run_checked(runner: &dyn CommandRunner, argv: &[String]) -> Result<String> {
    let output = runner.run(argv)?;
    if output.success {
        Ok(output.stdout)
    } else {
        if !output.stderr.trim().is_empty() {
            tracing::debug!("stderr from {}: {}", display_argv(argv), output.stderr.trim());
        }
        Err(InfoError::CommandFailed {
            command: display_argv(argv),
            code: output.exit_code,
        })
    }
}

/// Join an argv vector for display in logs and errors.
pub fn display_argv(argv: &[String]) -> String {
    argv.join(" ")
}
