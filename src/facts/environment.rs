//! Process environment snapshot.
//!
//! The environment is captured once at startup and handed around as an
//! immutable value. Workflow contexts are split out of it here, at the
//! boundary, so nothing downstream scans variable names by prefix.

use std::collections::BTreeMap;
use std::path::Path;

use crate::error::Result;
use crate::paths::display_relative;
use crate::secrets::SecretMatcher;

use super::context::{WorkflowContext, CONTEXT_PREFIX};

/// Variable naming the report output file.
pub const OUTPUT_PATH_VAR: &str = "ACTION_FILE_PATH";

/// An immutable copy of environment variables.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EnvSnapshot {
    vars: BTreeMap<String, String>,
}

impl EnvSnapshot {
    /// Capture the current process environment.
    ///
    /// Names and values that are not valid Unicode are converted lossily.
    pub fn capture() -> Self {
        let vars = std::env::vars_os()
            .map(|(k, v)| {
                (
                    k.to_string_lossy().into_owned(),
                    v.to_string_lossy().into_owned(),
                )
            })
            .collect();
        Self { vars }
    }

    /// Build a snapshot from explicit pairs.
    pub fn from_pairs<I, K, V>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        Self {
            vars: pairs
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }

    /// Look up a variable.
    pub fn get(&self, key: &str) -> Option<&str> {
        self.vars.get(key).map(String::as_str)
    }

    /// Parse every context-prefixed variable, sorted by context name.
    pub fn contexts(&self) -> Result<Vec<WorkflowContext>> {
        self.vars
            .iter()
            .filter_map(|(key, value)| {
                key.strip_prefix(CONTEXT_PREFIX)
                    .map(|name| WorkflowContext::parse(name, value))
            })
            .collect()
    }

    /// Variables suitable for the report.
    ///
    /// Context-prefixed and secret-named variables are dropped.
    pub fn reportable(&self, matcher: &SecretMatcher) -> BTreeMap<String, String> {
        let mut excluded = 0usize;
        let vars: BTreeMap<String, String> = self
            .vars
            .iter()
            .filter(|(key, _)| {
                if key.starts_with(CONTEXT_PREFIX) {
                    excluded += 1;
                    return false;
                }
                match matcher.matching_pattern(key) {
                    Some(pattern) => {
                        tracing::debug!("Excluding {} (matches {})", key, pattern);
                        excluded += 1;
                        false
                    }
                    None => true,
                }
            })
            .map(|(k, v)| (k.clone(), v.clone()))
            .collect();

        tracing::debug!(
            "Reporting {} environment variables ({} excluded)",
            vars.len(),
            excluded
        );
        vars
    }
}

/// Record the output path, relative to `cwd`, under [`OUTPUT_PATH_VAR`].
pub fn record_output_path(vars: &mut BTreeMap<String, String>, output: &Path, cwd: &Path) {
    vars.insert(OUTPUT_PATH_VAR.to_string(), display_relative(output, cwd));
}
