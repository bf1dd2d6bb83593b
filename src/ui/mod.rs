//! Terminal output for commands.
//!
//! This module provides:
//! - [`UserInterface`] trait for UI abstraction
//! - [`TerminalUI`] for real terminal usage
//! - [`MockUI`] for capturing output in tests
//!
//! The report body itself is streamed by the report builder, not through
//! this trait.
//!
//! # Example
//!
//! ```
//! use python_info::ui::{MockUI, UserInterface};
//!
//! let mut ui = MockUI::new();
//! ui.message("checking for: pip, None");
//! ui.success("Report verified");
//! assert_eq!(ui.messages(), &["checking for: pip, None".to_string()]);
//! ```

pub mod mock;
pub mod output;
pub mod terminal;
pub mod theme;

pub use mock::MockUI;
pub use output::OutputMode;
pub use terminal::{create_ui, TerminalUI};
pub use theme::{should_use_colors, InfoTheme};

/// Trait for user-facing messages.
///
/// This trait allows mocking the UI in tests.
pub trait UserInterface {
    /// Display a message to the user.
    fn message(&mut self, msg: &str);

    /// Display a success message.
    fn success(&mut self, msg: &str);

    /// Display an error message.
    fn error(&mut self, msg: &str);
}
