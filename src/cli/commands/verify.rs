//! Verify command implementation.
//!
//! The `python-info verify` command re-reads a saved report and checks that
//! it contains the expected facts. The first failing check aborts with a
//! non-zero exit.

use std::path::{Path, PathBuf};

use crate::cli::args::VerifyArgs;
use crate::error::{InfoError, Result};
use crate::facts::{probe_interpreter, CommandRunner, EnvSnapshot};
use crate::paths::display_relative;
use crate::report::load;
use crate::ui::UserInterface;
use crate::verify::{PackageExpectation, ReportVerifier, VerifyPlan};

use super::dispatcher::{Command, CommandResult};

/// The verify command implementation.
pub struct VerifyCommand<'a> {
    working_dir: PathBuf,
    env: &'a EnvSnapshot,
    runner: &'a dyn CommandRunner,
    args: VerifyArgs,
}

impl<'a> VerifyCommand<'a> {
    /// Create a new verify command.
    pub fn new(
        working_dir: &Path,
        env: &'a EnvSnapshot,
        runner: &'a dyn CommandRunner,
        args: VerifyArgs,
    ) -> Self {
        Self {
            working_dir: working_dir.to_path_buf(),
            env,
            runner,
            args,
        }
    }

    /// Resolve arguments into the checks to run.
    pub fn plan(&self) -> Result<VerifyPlan> {
        let secrets = self
            .args
            .secret_env
            .iter()
            .map(|name| match self.env.get(name) {
                Some(value) if !value.is_empty() => Ok((name.clone(), value.to_string())),
                _ => Err(InfoError::MissingSecret { name: name.clone() }),
            })
            .collect::<Result<Vec<_>>>()?;

        let sys_prefix = match &self.args.sys_prefix {
            Some(prefix) => prefix.clone(),
            None => probe_interpreter(self.runner, &self.args.python)?.prefix,
        };

        Ok(VerifyPlan {
            relative_path: display_relative(&self.args.path, &self.working_dir),
            sys_prefix,
            secrets,
            packages: PackageExpectation::from_pairs(&self.args.package)?,
        })
    }
}

impl Command for VerifyCommand<'_> {
    fn execute(&self, ui: &mut dyn UserInterface) -> Result<CommandResult> {
        let report = load(&self.working_dir.join(&self.args.path))?;
        let plan = self.plan()?;

        ReportVerifier::from_plan(&plan)
            .verify(&report, |expectation| {
                ui.message(&format!("checking for: {}", expectation));
            })?;

        ui.success(&format!("{} verified", self.args.path.display()));
        Ok(CommandResult::success())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::facts::interpreter::probe_argv;
    use crate::facts::runner::{display_argv, CmdOutput, ScriptedRunner};
    use crate::ui::MockUI;
    use tempfile::TempDir;

    const REPORT: &str = "
Python Details
==============

sys.prefix               : /opt/py

'platstdlib' : '/opt/py/lib/python3.12'
'Py_DEBUG' : 0

'ACTION_FILE_PATH' : 'out.txt'
'FOO'              : 'bar'

pip==24.0
requests==2.31.0
";

    fn setup() -> TempDir {
        let temp = TempDir::new().unwrap();
        std::fs::write(temp.path().join("out.txt"), REPORT).unwrap();
        temp
    }

    fn args() -> VerifyArgs {
        VerifyArgs {
            path: PathBuf::from("out.txt"),
            sys_prefix: Some("/opt/py".to_string()),
            python: "python3".to_string(),
            ..Default::default()
        }
    }

    #[test]
    fn verify_passes_and_reports_checks() {
        let temp = setup();
        let env = EnvSnapshot::from_pairs([("A_SECRET", "neverseethis")]);
        let runner = ScriptedRunner::new();
        let mut a = args();
        a.secret_env = vec!["A_SECRET".to_string()];
        a.package = vec!["requests".to_string(), "2.31.0".to_string()];

        let mut ui = MockUI::new();
        let result = VerifyCommand::new(temp.path(), &env, &runner, a)
            .execute(&mut ui)
            .unwrap();

        assert!(result.success);
        assert!(ui
            .messages()
            .contains(&"checking for: requests, 2.31.0".to_string()));
        assert!(ui.messages().contains(&"checking for: pip, None".to_string()));
        assert_eq!(ui.successes().len(), 1);
    }

    #[test]
    fn wrong_package_version_fails() {
        let temp = setup();
        let env = EnvSnapshot::default();
        let runner = ScriptedRunner::new();
        let mut a = args();
        a.package = vec!["requests".to_string(), "2.0".to_string()];

        let mut ui = MockUI::new();
        let err = VerifyCommand::new(temp.path(), &env, &runner, a)
            .execute(&mut ui)
            .unwrap_err();
        assert!(matches!(err, InfoError::CheckFailed { .. }));
        assert!(ui.successes().is_empty());
    }

    #[test]
    fn unset_secret_variable_fails() {
        let temp = setup();
        let env = EnvSnapshot::default();
        let runner = ScriptedRunner::new();
        let mut a = args();
        a.secret_env = vec!["A_SECRET".to_string()];

        let mut ui = MockUI::new();
        let err = VerifyCommand::new(temp.path(), &env, &runner, a)
            .execute(&mut ui)
            .unwrap_err();
        assert!(matches!(err, InfoError::MissingSecret { .. }));
    }

    #[test]
    fn leaked_secret_fails() {
        let temp = setup();
        let env = EnvSnapshot::from_pairs([("A_SECRET", "bar")]);
        let runner = ScriptedRunner::new();
        let mut a = args();
        a.secret_env = vec!["A_SECRET".to_string()];

        let mut ui = MockUI::new();
        let err = VerifyCommand::new(temp.path(), &env, &runner, a)
            .execute(&mut ui)
            .unwrap_err();
        assert!(matches!(err, InfoError::SecretLeaked { .. }));
    }

    #[test]
    fn sys_prefix_defaults_to_interpreter_prefix() {
        let temp = setup();
        let env = EnvSnapshot::default();
        let probe = r#"{"version": "3.12.1", "prefix": "/opt/py", "exec_prefix": "/opt/py",
            "executable": "/opt/py/bin/python", "pointer_bits": 64,
            "platform": "linux-x86_64", "python_version": "3.12"}"#;
        let runner = ScriptedRunner::new().with(
            &display_argv(&probe_argv("python3")),
            CmdOutput::success(probe),
        );
        let mut a = args();
        a.sys_prefix = None;

        let plan = VerifyCommand::new(temp.path(), &env, &runner, a)
            .plan()
            .unwrap();
        assert_eq!(plan.sys_prefix, "/opt/py");
        assert_eq!(runner.calls().len(), 1);
    }

    #[test]
    fn missing_report_is_io_error() {
        let temp = TempDir::new().unwrap();
        let env = EnvSnapshot::default();
        let runner = ScriptedRunner::new();

        let mut ui = MockUI::new();
        let err = VerifyCommand::new(temp.path(), &env, &runner, args())
            .execute(&mut ui)
            .unwrap_err();
        assert!(matches!(err, InfoError::Io(_)));
    }
}
