//! Report verification.
//!
//! A smoke test over a persisted report: it confirms a handful of known
//! facts are present (and secrets absent) using line-anchored regular
//! expressions. It does not re-derive or fully compare the report.
//!
//! - [`check_anchor`] / [`check_secret_absent`] - single checks
//! - [`Expectation`] / [`PackageExpectation`] - what to look for
//! - [`ReportVerifier`] - an ordered list of expectations run fail-fast

pub mod checks;
pub mod expectation;

pub use checks::{check_anchor, check_secret_absent};
pub use expectation::{
    check_package_versions, package_expectations, Expectation, PackageExpectation, ANY_VERSION,
};

use crate::error::Result;

/// Inputs for the standard set of report checks.
#[derive(Debug, Clone, Default)]
pub struct VerifyPlan {
    /// Output path relative to the working directory.
    pub relative_path: String,
    /// Expected `sys.prefix`.
    pub sys_prefix: String,
    /// `(variable name, value)` of secrets that must not leak.
    pub secrets: Vec<(String, String)>,
    /// Packages expected in the listing; `pip` is added automatically.
    pub packages: Vec<PackageExpectation>,
}

/// Runs expectations against a report, stopping at the first failure.
#[derive(Debug, Clone, Default)]
pub struct ReportVerifier {
    expectations: Vec<Expectation>,
}

impl ReportVerifier {
    /// Create an empty verifier.
    pub fn new() -> Self {
        Self::default()
    }

    /// The standard checks for a report produced by the `report` command.
    pub fn from_plan(plan: &VerifyPlan) -> Self {
        let mut verifier = Self::new();

        for (name, value) in &plan.secrets {
            verifier.push(Expectation::SecretAbsent {
                source_name: name.clone(),
                value: value.clone(),
            });
        }

        verifier.push(Expectation::output_path(&plan.relative_path));
        verifier.push(Expectation::sys_prefix(&plan.sys_prefix));
        verifier.push(Expectation::mapping_key("platstdlib"));
        verifier.push(Expectation::anchor("Py_DEBUG", "'Py_DEBUG' +: [01]"));

        for expectation in package_expectations(&plan.packages) {
            verifier.push(expectation);
        }

        verifier
    }

    /// Append an expectation.
    pub fn push(&mut self, expectation: Expectation) {
        self.expectations.push(expectation);
    }

    /// Expectations in check order.
    pub fn expectations(&self) -> &[Expectation] {
        &self.expectations
    }

    /// Check every expectation in order.
    ///
    /// `on_check` is called before each check. The first failure is returned.
    pub fn verify(&self, report: &str, mut on_check: impl FnMut(&Expectation)) -> Result<()> {
        for expectation in &self.expectations {
            on_check(expectation);
            expectation.check(report)?;
        }
        tracing::debug!("{} report checks passed", self.expectations.len());
        Ok(())
    }
}
