//! Interpreter metadata probe.
//!
//! A short script is run inside the target interpreter; it prints a single
//! JSON object describing `sys`, `struct` and `sysconfig` facts, which is
//! deserialized into [`InterpreterFacts`].

use std::collections::BTreeMap;

use serde::Deserialize;

use crate::error::{InfoError, Result};
use crate::report::Scalar;

use super::runner::{run_checked, CommandRunner};

/// Script executed with `python -c`.
///
/// Config values that are not JSON scalars (or ints outside 64 bits) are
/// converted to `str` inside the interpreter.
pub const PROBE_SCRIPT: &str = r#"import json, struct, sys, sysconfig

def scalar(value):
    if value is None or isinstance(value, bool) or isinstance(value, str):
        return value
    if isinstance(value, int) and -2**63 <= value < 2**63:
        return value
    return str(value)

json.dump({
    "version": sys.version,
    "prefix": sys.prefix,
    "exec_prefix": sys.exec_prefix,
    "executable": sys.executable,
    "pointer_bits": struct.calcsize("P") * 8,
    "platform": sysconfig.get_platform(),
    "python_version": sysconfig.get_python_version(),
    "paths": sysconfig.get_paths(),
    "config_vars": {str(k): scalar(v) for k, v in sysconfig.get_config_vars().items()},
}, sys.stdout)
"#;

/// Facts reported by the interpreter about itself.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct InterpreterFacts {
    /// `sys.version`.
    pub version: String,
    /// `sys.prefix`.
    pub prefix: String,
    /// `sys.exec_prefix`.
    pub exec_prefix: String,
    /// `sys.executable`.
    pub executable: String,
    /// `struct.calcsize("P") * 8`.
    pub pointer_bits: u32,
    /// `sysconfig.get_platform()`.
    pub platform: String,
    /// `sysconfig.get_python_version()`.
    pub python_version: String,
    /// `sysconfig.get_paths()`.
    #[serde(default)]
    pub paths: BTreeMap<String, String>,
    /// `sysconfig.get_config_vars()`.
    #[serde(default)]
    pub config_vars: BTreeMap<String, Scalar>,
}

/// The argv used to probe `python`.
pub fn probe_argv(python: &str) -> Vec<String> {
    vec![python.to_string(), "-c".to_string(), PROBE_SCRIPT.to_string()]
}

/// Run the probe script in `python` and parse its output.
pub fn probe_interpreter(runner: &dyn CommandRunner, python: &str) -> Result<InterpreterFacts> {
    let stdout = run_checked(runner, &probe_argv(python))?;
    parse_probe_output(python, &stdout)
}

/// Parse the JSON printed by [`PROBE_SCRIPT`].
pub fn parse_probe_output(python: &str, stdout: &str) -> Result<InterpreterFacts> {
    let facts: InterpreterFacts =
        serde_json::from_str(stdout.trim()).map_err(|e| InfoError::InterpreterProbe {
            python: python.to_string(),
            message: e.to_string(),
        })?;

    tracing::debug!(
        "Probed {} ({}): {} paths, {} config vars",
        python,
        facts.python_version,
        facts.paths.len(),
        facts.config_vars.len()
    );
    Ok(facts)
}
