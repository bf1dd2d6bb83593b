//! Installed package listing via `pip freeze`.

use crate::error::Result;

use super::runner::{probe, run_checked, CommandRunner};

/// Flag that silences pip's deprecation notice on old interpreters.
pub const NO_VERSION_WARNING: &str = "--no-python-version-warning";

/// Check whether the interpreter's pip accepts [`NO_VERSION_WARNING`].
///
/// Any failure (including pip not being installed) counts as unsupported.
pub fn supports_no_version_warning(runner: &dyn CommandRunner, python: &str) -> bool {
    let argv = vec![
        python.to_string(),
        "-m".to_string(),
        "pip".to_string(),
        NO_VERSION_WARNING.to_string(),
    ];
    let supported = probe(runner, &argv);
    tracing::debug!("pip {} supported: {}", NO_VERSION_WARNING, supported);
    supported
}

/// The argv for listing every installed distribution.
pub fn freeze_argv(python: &str, no_version_warning: bool) -> Vec<String> {
    let mut argv: Vec<String> = [python, "-m", "pip", "freeze", "--all"]
        .iter()
        .map(|s| s.to_string())
        .collect();
    if no_version_warning {
        argv.push(NO_VERSION_WARNING.to_string());
    }
    argv
}

/// List installed packages as `name==version` lines.
///
/// A failing listing is fatal, unlike the capability probe before it.
pub fn list_packages(runner: &dyn CommandRunner, python: &str) -> Result<String> {
    let quiet = supports_no_version_warning(runner, python);
    let stdout = run_checked(runner, &freeze_argv(python, quiet))?;
    Ok(normalize_listing(&stdout))
}

/// Trim surrounding whitespace and normalize line endings.
pub fn normalize_listing(raw: &str) -> String {
    raw.trim().replace("\r\n", "\n")
}
