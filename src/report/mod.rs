//! Report rendering and persistence.
//!
//! - [`ReportBuilder`] - append-only, line-oriented renderer
//! - [`Repr`] / [`Scalar`] - canonical single-line quoting
//! - [`render_report`] - the fixed section layout
//! - [`persist`] / [`load`] - write a finished report and read it back

pub mod builder;
pub mod repr;
pub mod sections;

pub use builder::{HeadingLevel, ReportBuilder};
pub use repr::{quote_str, Repr, Scalar};
pub use sections::render_report;

use std::fs;
use std::path::Path;

use crate::error::Result;

/// Write the report text verbatim to `path`.
pub fn persist(path: &Path, text: &str) -> Result<()> {
    fs::write(path, text.as_bytes())?;
    tracing::debug!("Wrote {} bytes to {}", text.len(), path.display());
    Ok(())
}

/// Read a previously persisted report.
pub fn load(path: &Path) -> Result<String> {
    Ok(fs::read_to_string(path)?)
}
