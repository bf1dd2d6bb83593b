//! Fact gathering.
//!
//! Everything the report shows comes from here: the interpreter probe, the
//! package listing, the environment snapshot and workflow contexts. These are
//! collaborators of the report; none of them know how facts are formatted.

pub mod context;
pub mod environment;
pub mod interpreter;
pub mod packages;
pub mod runner;

pub use context::{WorkflowContext, CONTEXT_PREFIX};
pub use environment::{record_output_path, EnvSnapshot, OUTPUT_PATH_VAR};
pub use interpreter::{probe_interpreter, InterpreterFacts};
pub use packages::list_packages;
pub use runner::{CmdOutput, CommandRunner, OsCommandRunner, ScriptedRunner};

use std::collections::BTreeMap;

/// Everything needed to render one report.
#[derive(Debug, Clone)]
pub struct Facts {
    /// Interpreter self-description.
    pub interpreter: InterpreterFacts,
    /// Filtered environment variables.
    pub environment: BTreeMap<String, String>,
    /// `pip freeze` output, possibly empty.
    pub packages: String,
    /// Workflow contexts in display order.
    pub contexts: Vec<WorkflowContext>,
}
