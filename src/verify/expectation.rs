//! Expectations checked against a rendered report.

use std::fmt;

use crate::error::{InfoError, Result};
use crate::report::quote_str;

use super::checks::{check_anchor, check_secret_absent};

/// Version argument that matches any version.
pub const ANY_VERSION: &str = "*";

/// One fact the report must (or must not) contain.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Expectation {
    /// Some line must match `pattern` in full.
    Anchor {
        /// Human-readable summary.
        description: String,
        /// Unanchored regular expression.
        pattern: String,
    },
    /// The value must not appear anywhere in the report.
    SecretAbsent {
        /// Variable the secret came from.
        source_name: String,
        /// The secret value.
        value: String,
    },
}

impl Expectation {
    /// An anchored-line expectation.
    pub fn anchor(description: impl Into<String>, pattern: impl Into<String>) -> Self {
        Self::Anchor {
            description: description.into(),
            pattern: pattern.into(),
        }
    }

    /// The `ACTION_FILE_PATH` entry holding `relative_path`.
    pub fn output_path(relative_path: &str) -> Self {
        Self::anchor(
            format!("ACTION_FILE_PATH, {}", relative_path),
            format!(
                "'ACTION_FILE_PATH' +: {}",
                regex::escape(&quote_str(relative_path))
            ),
        )
    }

    /// The `sys.prefix` details line.
    pub fn sys_prefix(prefix: &str) -> Self {
        Self::anchor(
            format!("sys.prefix, {}", prefix),
            format!(r"sys\.prefix +: {}", regex::escape(prefix)),
        )
    }

    /// A key in one of the quoted mappings.
    pub fn mapping_key(key: &str) -> Self {
        Self::anchor(
            key.to_string(),
            format!("{} +: .*", regex::escape(&quote_str(key))),
        )
    }

    /// Check this expectation against `report`.
    pub fn check(&self, report: &str) -> Result<()> {
        match self {
            Self::Anchor { pattern, .. } => check_anchor(report, pattern),
            Self::SecretAbsent { source_name, value } => {
                check_secret_absent(report, source_name, value)
            }
        }
    }
}

impl fmt::Display for Expectation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Anchor { description, .. } => write!(f, "{}", description),
            Self::SecretAbsent { source_name, .. } => write!(f, "absence of {}", source_name),
        }
    }
}

/// An expected `name==version` line in the package listing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PackageExpectation {
    /// Distribution name as printed by `pip freeze`.
    pub name: String,
    /// Exact version, or `None` for any version.
    pub version: Option<String>,
}

impl PackageExpectation {
    /// Expect `name` at `version`; [`ANY_VERSION`] is a wildcard.
    pub fn new(name: impl Into<String>, version: &str) -> Self {
        let version = if version == ANY_VERSION {
            None
        } else {
            Some(version.to_string())
        };
        Self {
            name: name.into(),
            version,
        }
    }

    /// Expect `name` at any version.
    pub fn any(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            version: None,
        }
    }

    /// The package manager itself, which every listing includes.
    pub fn pip() -> Self {
        Self::any("pip")
    }

    /// Build expectations from flat `NAME VERSION NAME VERSION ...` values.
    pub fn from_pairs(values: &[String]) -> Result<Vec<Self>> {
        if values.len() % 2 != 0 {
            return Err(InfoError::InvalidArgument {
                message: "--package takes a NAME and a VERSION".to_string(),
            });
        }
        Ok(values
            .chunks(2)
            .map(|pair| Self::new(pair[0].clone(), &pair[1]))
            .collect())
    }

    /// The unanchored pattern for this package line.
    pub fn pattern(&self) -> String {
        let version = match &self.version {
            Some(v) => regex::escape(v),
            None => ".*".to_string(),
        };
        format!("{}=={}", regex::escape(&self.name), version)
    }

    /// Convert to an [`Expectation`].
    pub fn to_expectation(&self) -> Expectation {
        let version = self.version.as_deref().unwrap_or("None");
        Expectation::anchor(format!("{}, {}", self.name, version), self.pattern())
    }
}

/// Expectations for `packages`, with `pip` (any version) always appended.
pub fn package_expectations(packages: &[PackageExpectation]) -> Vec<Expectation> {
    let pip = PackageExpectation::pip();
    packages
        .iter()
        .chain(std::iter::once(&pip))
        .map(PackageExpectation::to_expectation)
        .collect()
}

/// Check every package pair (plus `pip`) against `report`.
pub fn check_package_versions(report: &str, packages: &[PackageExpectation]) -> Result<()> {
    for expectation in package_expectations(packages) {
        expectation.check(report)?;
    }
    Ok(())
}
