//! Report command implementation.
//!
//! The `python-info report` command gathers interpreter, environment and
//! package facts, streams the rendered report to stdout, and optionally
//! saves it to a file.

use std::io::Write;
use std::path::{Path, PathBuf};

use crate::cli::args::ReportArgs;
use crate::error::Result;
use crate::facts::{
    list_packages, probe_interpreter, record_output_path, CommandRunner, EnvSnapshot, Facts,
    WorkflowContext,
};
use crate::report::{persist, render_report, ReportBuilder};
use crate::secrets::SecretMatcher;
use crate::ui::UserInterface;

use super::dispatcher::{Command, CommandResult};

/// The report command implementation.
pub struct ReportCommand<'a> {
    working_dir: PathBuf,
    env: &'a EnvSnapshot,
    runner: &'a dyn CommandRunner,
    args: ReportArgs,
}

impl<'a> ReportCommand<'a> {
    /// Create a new report command.
    pub fn new(
        working_dir: &Path,
        env: &'a EnvSnapshot,
        runner: &'a dyn CommandRunner,
        args: ReportArgs,
    ) -> Self {
        Self {
            working_dir: working_dir.to_path_buf(),
            env,
            runner,
            args,
        }
    }

    /// Contexts from `--context` first, then from the environment.
    fn contexts(&self) -> Result<Vec<WorkflowContext>> {
        let mut contexts = self
            .args
            .context
            .iter()
            .map(|arg| WorkflowContext::from_arg(arg))
            .collect::<Result<Vec<_>>>()?;
        contexts.extend(self.env.contexts()?);
        Ok(contexts)
    }

    /// Gather every fact the report needs.
    pub fn gather(&self) -> Result<Facts> {
        let contexts = self.contexts()?;

        let matcher = SecretMatcher::with_builtins_and_custom(&self.args.exclude_env);
        let mut environment = self.env.reportable(&matcher);
        if let Some(output) = self.args.output_path() {
            record_output_path(&mut environment, output, &self.working_dir);
        }

        let interpreter = probe_interpreter(self.runner, &self.args.python)?;
        let packages = list_packages(self.runner, &self.args.python)?;

        Ok(Facts {
            interpreter,
            environment,
            packages,
            contexts,
        })
    }

    /// Gather, render to `live`, and persist if configured.
    ///
    /// Returns the report text.
    pub fn run<W: Write>(&self, live: W) -> Result<String> {
        let facts = self.gather()?;

        let mut builder = ReportBuilder::new(live);
        render_report(&mut builder, &facts)?;
        builder.flush();

        let text = builder.finalize().to_string();
        if let Some(output) = self.args.output_path() {
            let path = self.working_dir.join(output);
            persist(&path, &text)?;
            tracing::info!("Report saved to {}", path.display());
        }

        Ok(text)
    }
}

impl Command for ReportCommand<'_> {
    fn execute(&self, _ui: &mut dyn UserInterface) -> Result<CommandResult> {
        self.run(std::io::stdout())?;
        Ok(CommandResult::success())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::InfoError;
    use crate::facts::interpreter::probe_argv;
    use crate::facts::runner::{display_argv, CmdOutput, ScriptedRunner};
    use crate::ui::MockUI;
    use tempfile::TempDir;

    const PROBE: &str = r#"{
        "version": "3.12.1", "prefix": "/opt/py", "exec_prefix": "/opt/py",
        "executable": "/opt/py/bin/python", "pointer_bits": 64,
        "platform": "linux-x86_64", "python_version": "3.12",
        "paths": {"platstdlib": "/opt/py/lib/python3.12"},
        "config_vars": {"Py_DEBUG": 0}
    }"#;

    fn runner(freeze: &str) -> ScriptedRunner {
        ScriptedRunner::new()
            .with(&display_argv(&probe_argv("python3")), CmdOutput::success(PROBE))
            .with("python3 -m pip --no-python-version-warning", CmdOutput::success(""))
            .with(
                "python3 -m pip freeze --all --no-python-version-warning",
                CmdOutput::success(freeze),
            )
    }

    fn args(output: Option<&str>) -> ReportArgs {
        ReportArgs {
            python: "python3".to_string(),
            output: output.map(PathBuf::from),
            ..Default::default()
        }
    }

    #[test]
    fn report_with_output_path_is_saved_and_matches() {
        let temp = TempDir::new().unwrap();
        let env = EnvSnapshot::from_pairs([
            ("FOO", "bar"),
            ("_PYTHON_INFO_ACTION_CONTEXT_job", r#"{"id": 1}"#),
        ]);
        let runner = runner("pip==24.0\n");
        let cmd = ReportCommand::new(temp.path(), &env, &runner, args(Some("out.txt")));

        let text = cmd.run(Vec::new()).unwrap();

        let saved = std::fs::read_to_string(temp.path().join("out.txt")).unwrap();
        assert_eq!(saved, text);
        assert_eq!(
            text.lines()
                .filter(|l| l.starts_with("'ACTION_FILE_PATH'"))
                .collect::<Vec<_>>(),
            vec!["'ACTION_FILE_PATH' : 'out.txt'"]
        );
        assert!(text.contains("\nWorkflow Details\n================\n\n\njob\n---\n\n{\n    \"id\": 1\n}\n"));
        assert!(text.contains("\n'FOO'              : 'bar'\n"));
    }

    #[test]
    fn report_without_output_path_writes_nothing() {
        let temp = TempDir::new().unwrap();
        let env = EnvSnapshot::from_pairs([("FOO", "bar")]);
        let runner = runner("pip==24.0\n");
        let cmd = ReportCommand::new(temp.path(), &env, &runner, args(None));

        let text = cmd.run(Vec::new()).unwrap();
        assert!(!text.contains("ACTION_FILE_PATH"));
        assert_eq!(std::fs::read_dir(temp.path()).unwrap().count(), 0);
    }

    #[test]
    fn secrets_are_filtered_but_siblings_kept() {
        let temp = TempDir::new().unwrap();
        let env = EnvSnapshot::from_pairs([
            ("A_SECRET", "neverseethis"),
            ("DEPLOY_HOOK", "hook-value"),
            ("SECRET_WEBHOOK", "webhook-value"),
            ("FOO", "bar"),
        ]);
        let runner = runner("pip==24.0\n");
        let mut a = args(None);
        a.exclude_env = vec!["DEPLOY_HOOK".to_string()];
        let cmd = ReportCommand::new(temp.path(), &env, &runner, a);

        let text = cmd.run(Vec::new()).unwrap();
        assert!(!text.contains("neverseethis"));
        assert!(!text.contains("hook-value"));
        assert!(!text.contains("webhook-value"));
        assert!(text.contains("'FOO' : 'bar'"));
    }

    #[test]
    fn cli_contexts_come_before_environment_contexts() {
        let temp = TempDir::new().unwrap();
        let env = EnvSnapshot::from_pairs([("_PYTHON_INFO_ACTION_CONTEXT_aaa", "{}")]);
        let runner = runner("pip==24.0\n");
        let mut a = args(None);
        a.context = vec![r#"zzz={"x": true}"#.to_string()];
        let cmd = ReportCommand::new(temp.path(), &env, &runner, a);

        let text = cmd.run(Vec::new()).unwrap();
        assert!(text.find("\nzzz\n---\n").unwrap() < text.find("\naaa\n---\n").unwrap());
    }

    #[test]
    fn live_stream_gets_fold_markers() {
        let temp = TempDir::new().unwrap();
        let env = EnvSnapshot::from_pairs([("FOO", "bar")]);
        let runner = runner("pip==24.0\n");
        let cmd = ReportCommand::new(temp.path(), &env, &runner, args(None));

        let mut live = Vec::new();
        let text = cmd.run(&mut live).unwrap();
        let live = String::from_utf8(live).unwrap();

        assert!(live.contains("::group::Python Details\n"));
        assert_eq!(live.matches("::endgroup::").count(), 4);
        assert!(!text.contains("::group::"));
    }

    #[test]
    fn failed_package_listing_aborts() {
        let temp = TempDir::new().unwrap();
        let env = EnvSnapshot::default();
        let runner = ScriptedRunner::new()
            .with(&display_argv(&probe_argv("python3")), CmdOutput::success(PROBE))
            .with(
                "python3 -m pip freeze --all",
                CmdOutput::failure(Some(1), "No module named pip"),
            );
        let cmd = ReportCommand::new(temp.path(), &env, &runner, args(Some("out.txt")));

        let mut ui = MockUI::new();
        let err = cmd.execute(&mut ui).unwrap_err();
        assert!(matches!(err, InfoError::CommandFailed { .. }));
        assert!(!temp.path().join("out.txt").exists());
    }

    #[test]
    fn bad_context_argument_aborts_before_probing() {
        let temp = TempDir::new().unwrap();
        let env = EnvSnapshot::default();
        let runner = ScriptedRunner::new();
        let mut a = args(None);
        a.context = vec!["job={".to_string()];
        let cmd = ReportCommand::new(temp.path(), &env, &runner, a);

        assert!(matches!(
            cmd.run(Vec::new()),
            Err(InfoError::ContextParse { .. })
        ));
        assert!(runner.calls().is_empty());
    }
}
