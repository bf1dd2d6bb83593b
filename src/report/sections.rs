//! The fixed report schema.

use std::io::Write;

use crate::error::Result;
use crate::facts::Facts;

use super::builder::{HeadingLevel, ReportBuilder};

/// Section titles, in report order.
pub const PYTHON_DETAILS: &str = "Python Details";
pub const PYTHON_CONFIGURATION: &str = "Python Configuration";
pub const PATHS: &str = "Paths";
pub const VARIABLES: &str = "Variables";
pub const ENVIRONMENT_VARIABLES: &str = "Environment Variables";
pub const INSTALLED_PACKAGES: &str = "Installed Packages";
pub const WORKFLOW_DETAILS: &str = "Workflow Details";

/// Render every section of the report into `builder`.
pub fn render_report<W: Write>(builder: &mut ReportBuilder<W>, facts: &Facts) -> Result<()> {
    let python = &facts.interpreter;

    builder.heading(PYTHON_DETAILS, HeadingLevel::Section);
    builder.fields(&[
        ("sys.version", python.version.clone()),
        ("sys.prefix", python.prefix.clone()),
        ("sys.exec_prefix", python.exec_prefix.clone()),
        ("sys.executable", python.executable.clone()),
        ("struct.calcsize(\"P\") * 8", python.pointer_bits.to_string()),
    ]);

    builder.heading(PYTHON_CONFIGURATION, HeadingLevel::Section);
    builder.fields(&[
        ("sysconfig.get_platform()", python.platform.clone()),
        ("sysconfig.get_python_version()", python.python_version.clone()),
    ]);

    builder.heading(PATHS, HeadingLevel::Subsection);
    if !python.paths.is_empty() {
        builder.render_mapping(&python.paths)?;
    }

    builder.heading(VARIABLES, HeadingLevel::Subsection);
    if !python.config_vars.is_empty() {
        builder.render_mapping(&python.config_vars)?;
    }

    builder.heading(ENVIRONMENT_VARIABLES, HeadingLevel::Section);
    if !facts.environment.is_empty() {
        builder.render_mapping(&facts.environment)?;
    }

    builder.heading(INSTALLED_PACKAGES, HeadingLevel::Section);
    if facts.packages.is_empty() {
        builder.emit_line("None");
    } else {
        builder.emit_block(&facts.packages);
    }

    builder.heading(WORKFLOW_DETAILS, HeadingLevel::Section);
    for context in &facts.contexts {
        builder.heading(&context.name, HeadingLevel::Subsection);
        builder.emit_block(&context.pretty()?);
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::facts::{InterpreterFacts, WorkflowContext};
    use crate::report::Scalar;
    use std::collections::BTreeMap;

    fn facts() -> Facts {
        let mut paths = BTreeMap::new();
        paths.insert("stdlib".to_string(), "/py/lib/python3.12".to_string());
        paths.insert("platstdlib".to_string(), "/py/lib/python3.12".to_string());

        let mut config_vars = BTreeMap::new();
        config_vars.insert("Py_DEBUG".to_string(), Scalar::Int(0));
        config_vars.insert("SOABI".to_string(), Scalar::from("cpython-312"));

        let mut environment = BTreeMap::new();
        environment.insert("FOO".to_string(), "bar".to_string());

        Facts {
            interpreter: InterpreterFacts {
                version: "3.12.1 (main) [GCC 11.4.0]".to_string(),
                prefix: "/py".to_string(),
                exec_prefix: "/py".to_string(),
                executable: "/py/bin/python".to_string(),
                pointer_bits: 64,
                platform: "linux-x86_64".to_string(),
                python_version: "3.12".to_string(),
                paths,
                config_vars,
            },
            environment,
            packages: "pip==24.0\nsetuptools==69.0.3".to_string(),
            contexts: vec![WorkflowContext::parse("job", r#"{"id": 1}"#).unwrap()],
        }
    }

    fn render(facts: &Facts) -> String {
        let mut builder = ReportBuilder::new(Vec::new());
        render_report(&mut builder, facts).unwrap();
        builder.finalize().to_string()
    }

    #[test]
    fn sections_appear_in_order() {
        let text = render(&facts());
        let positions: Vec<usize> = [
            "\nPython Details\n==============\n",
            "\nPython Configuration\n====================\n",
            "\nPaths\n-----\n",
            "\nVariables\n---------\n",
            "\nEnvironment Variables\n=====================\n",
            "\nInstalled Packages\n==================\n",
            "\nWorkflow Details\n================\n",
        ]
        .iter()
        .map(|h| text.find(h).unwrap_or_else(|| panic!("missing {:?}", h)))
        .collect();

        let mut sorted = positions.clone();
        sorted.sort_unstable();
        assert_eq!(positions, sorted);
    }

    #[test]
    fn details_lines_are_aligned() {
        let text = render(&facts());
        assert!(text.contains("\nsys.prefix               : /py\n"));
        assert!(text.contains("\nstruct.calcsize(\"P\") * 8 : 64\n"));
        assert!(text.contains("\nsysconfig.get_python_version() : 3.12\n"));
        assert!(text.contains("\nsysconfig.get_platform()       : linux-x86_64\n"));
    }

    #[test]
    fn config_vars_render_unquoted_ints() {
        let text = render(&facts());
        assert!(text.contains("\n'Py_DEBUG' : 0\n"));
        assert!(text.contains("\n'SOABI'    : 'cpython-312'\n"));
    }

    #[test]
    fn packages_render_one_per_line() {
        let text = render(&facts());
        assert!(text.contains("\n\npip==24.0\nsetuptools==69.0.3\n"));
    }

    #[test]
    fn empty_package_listing_renders_none() {
        let mut f = facts();
        f.packages.clear();
        let text = render(&f);
        assert!(text.contains("\nInstalled Packages\n==================\n\nNone\n"));
    }

    #[test]
    fn workflow_context_is_pretty_printed() {
        let text = render(&facts());
        assert!(text.ends_with("\njob\n---\n\n{\n    \"id\": 1\n}\n"));
    }

    #[test]
    fn empty_mappings_are_skipped_not_fatal() {
        let mut f = facts();
        f.environment.clear();
        f.interpreter.paths.clear();
        f.interpreter.config_vars.clear();
        let text = render(&f);
        assert!(text.contains("\nEnvironment Variables\n=====================\n\n\nInstalled Packages"));
    }

    #[test]
    fn workflow_section_present_without_contexts() {
        let mut f = facts();
        f.contexts.clear();
        let text = render(&f);
        assert!(text.ends_with("\nWorkflow Details\n================\n\n"));
    }
}
