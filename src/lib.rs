//! python-info - Python interpreter and environment diagnostics for CI logs.
//!
//! python-info prints a sectioned, line-oriented report describing a Python
//! interpreter, its build configuration, the process environment and the
//! installed packages. The report can be saved and later checked with
//! line-anchored expectations.
//!
//! # Modules
//!
//! - [`cli`] - Command-line interface and argument parsing
//! - [`error`] - Error types and result aliases
//! - [`facts`] - Interpreter, package and environment gathering
//! - [`paths`] - Lexical relative-path helpers
//! - [`report`] - Report rendering and persistence
//! - [`secrets`] - Secret variable detection
//! - [`ui`] - Status and error output
//! - [`verify`] - Checks against a saved report
//!
//! # Example
//!
//! ```
//! use python_info::report::{HeadingLevel, ReportBuilder};
//! use python_info::verify::check_anchor;
//!
//! let mut builder = ReportBuilder::new(std::io::sink());
//! builder.heading("Environment Variables", HeadingLevel::Section);
//! builder.render_mapping([("FOO", "bar"), ("ACTION_FILE_PATH", "out.txt")]).unwrap();
//!
//! let report = builder.finalize();
//! check_anchor(report, r"'ACTION_FILE_PATH' +: 'out\.txt'").unwrap();
//! check_anchor(report, r"'FOO' +: 'bar'").unwrap();
//! ```

pub mod cli;
pub mod error;
pub mod facts;
pub mod paths;
pub mod report;
pub mod secrets;
pub mod ui;
pub mod verify;

pub use error::{InfoError, Result};
