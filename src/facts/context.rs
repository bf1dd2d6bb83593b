//! Workflow context payloads.
//!
//! A workflow context is a named JSON document (for example the CI job or
//! runner context) rendered verbatim, pretty-printed, in the
//! "Workflow Details" section.

use serde::Serialize;
use serde_json::ser::{PrettyFormatter, Serializer};

use crate::error::{InfoError, Result};

/// Environment prefix that marks a variable as a workflow context.
pub const CONTEXT_PREFIX: &str = "_PYTHON_INFO_ACTION_CONTEXT_";

/// A named JSON payload.
#[derive(Debug, Clone, PartialEq)]
pub struct WorkflowContext {
    /// Heading shown above the payload.
    pub name: String,
    /// Parsed payload.
    pub payload: serde_json::Value,
}

impl WorkflowContext {
    /// Parse a JSON document into a context.
    pub fn parse(name: &str, json: &str) -> Result<Self> {
        let payload = serde_json::from_str(json).map_err(|e| InfoError::ContextParse {
            name: name.to_string(),
            message: e.to_string(),
        })?;
        Ok(Self {
            name: name.to_string(),
            payload,
        })
    }

    /// Parse a `NAME=JSON` command-line argument.
    ///
    /// # Example
    ///
    /// ```
    /// use python_info::facts::WorkflowContext;
    ///
    /// let ctx = WorkflowContext::from_arg(r#"job={"status": "success"}"#).unwrap();
    /// assert_eq!(ctx.name, "job");
    /// assert_eq!(ctx.payload["status"], "success");
    /// ```
    pub fn from_arg(arg: &str) -> Result<Self> {
        match arg.split_once('=') {
            Some((name, json)) if !name.is_empty() => Self::parse(name, json),
            _ => Err(InfoError::InvalidArgument {
                message: format!("expected NAME=JSON for --context, got '{}'", arg),
            }),
        }
    }

    /// Render the payload as JSON indented by four spaces.
    ///
    /// Non-ASCII text is written as UTF-8, not as `\uXXXX` escapes.
    pub fn pretty(&self) -> Result<String> {
        let mut buf = Vec::new();
        let formatter = PrettyFormatter::with_indent(b"    ");
        let mut serializer = Serializer::with_formatter(&mut buf, formatter);
        self.payload
            .serialize(&mut serializer)
            .map_err(|e| anyhow::anyhow!("failed to serialize context '{}': {}", self.name, e))?;
        String::from_utf8(buf)
            .map_err(|e| anyhow::anyhow!("context '{}' is not UTF-8: {}", self.name, e).into())
    }
}
