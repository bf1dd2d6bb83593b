//! Line-oriented report rendering.
//!
//! [`ReportBuilder`] is the only place formatting rules live. Every line is
//! appended to an in-memory buffer and mirrored to a live stream (normally
//! stdout) as it is produced. Level-0 headings also write `::group::` /
//! `::endgroup::` fold markers to the live stream so CI log viewers can
//! collapse each top-level section; those markers are not part of the report
//! text.

use std::io::Write;

use crate::error::{InfoError, Result};

use super::repr::Repr;

/// Nesting level of a heading.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HeadingLevel {
    /// Top-level, foldable section.
    Section,
    /// Nested section, never folded.
    Subsection,
}

impl HeadingLevel {
    /// Character repeated under the title.
    pub fn marker(&self) -> char {
        match self {
            Self::Section => '=',
            Self::Subsection => '-',
        }
    }
}

/// Accumulates report lines and mirrors them to a live stream.
///
/// # Example
///
/// ```
/// use python_info::report::{HeadingLevel, ReportBuilder};
///
/// let mut builder = ReportBuilder::new(Vec::new());
/// builder.heading("Paths", HeadingLevel::Subsection);
/// builder.render_mapping([("stdlib", "/usr/lib/python3.12")]).unwrap();
/// assert_eq!(
///     builder.finalize(),
///     "\nPaths\n-----\n\n'stdlib' : '/usr/lib/python3.12'\n"
/// );
/// ```
pub struct ReportBuilder<W: Write> {
    buffer: String,
    live: W,
    group_open: bool,
}

impl<W: Write> ReportBuilder<W> {
    /// Create a builder mirroring to the given stream.
    pub fn new(live: W) -> Self {
        Self {
            buffer: String::new(),
            live,
            group_open: false,
        }
    }

    /// Append a line of text.
    ///
    /// Never fails: a write error on the live stream is logged and the line
    /// is still recorded in the report.
    pub fn emit_line(&mut self, text: &str) {
        self.buffer.push_str(text);
        self.buffer.push('\n');
        self.mirror(&format!("{}\n", text));
    }

    /// Append an empty line.
    pub fn blank(&mut self) {
        self.emit_line("");
    }

    /// Append a multi-line block, one report line per input line.
    pub fn emit_block(&mut self, text: &str) {
        for line in text.lines() {
            self.emit_line(line);
        }
    }

    /// Emit a titled, underlined heading.
    pub fn heading(&mut self, title: &str, level: HeadingLevel) {
        self.blank();

        if level == HeadingLevel::Section {
            if self.group_open {
                self.mirror("::endgroup::\n");
            }
            self.mirror(&format!("::group::{}\n", title));
        }

        let underline = level.marker().to_string().repeat(title.chars().count());
        self.emit_line(title);
        self.emit_line(&underline);
        self.blank();

        self.group_open = true;
    }

    /// Emit labelled lines with the labels padded to a shared width.
    ///
    /// Values are written raw, exactly as given.
    pub fn fields(&mut self, fields: &[(&str, String)]) {
        let width = fields
            .iter()
            .map(|(label, _)| label.chars().count())
            .max()
            .unwrap_or(0);

        for (label, value) in fields {
            self.emit_line(&format!("{:<width$} : {}", label, value, width = width));
        }
    }

    /// Emit one aligned `key : value` line per entry, sorted by key.
    ///
    /// The key column is as wide as the widest quoted key in this mapping.
    ///
    /// # Errors
    ///
    /// Returns [`InfoError::EmptyMapping`] when the mapping has no entries.
    pub fn render_mapping<I, K, V>(&mut self, mapping: I) -> Result<()>
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: Repr,
    {
        let mut entries: Vec<(String, String, String)> = mapping
            .into_iter()
            .map(|(key, value)| {
                let key = key.as_ref().to_string();
                let quoted = key.repr();
                (key, quoted, value.repr())
            })
            .collect();

        let width = entries
            .iter()
            .map(|(_, quoted, _)| quoted.chars().count())
            .max()
            .ok_or(InfoError::EmptyMapping)?;

        entries.sort_by(|a, b| a.0.cmp(&b.0));

        for (_, quoted, value) in &entries {
            self.emit_line(&format!("{:<width$} : {}", quoted, value, width = width));
        }

        Ok(())
    }

    /// The full report text accumulated so far.
    pub fn finalize(&self) -> &str {
        &self.buffer
    }

    /// Flush the live stream.
    pub fn flush(&mut self) {
        if let Err(e) = self.live.flush() {
            tracing::debug!("Failed to flush report output: {}", e);
        }
    }

    fn mirror(&mut self, text: &str) {
        if let Err(e) = self.live.write_all(text.as_bytes()) {
            tracing::debug!("Failed to mirror report output: {}", e);
        }
    }
}
