//! Secret detection for environment filtering.
//!
//! - [`SecretPattern`] - Defines a pattern for identifying secret variable names
//! - [`SecretMatcher`] - Matches environment variable names against secret patterns
//! - [`BUILTIN_PATTERNS`] - Built-in patterns for common secrets
//!
//! # Example
//!
//! ```
//! use python_info::secrets::SecretMatcher;
//!
//! let matcher = SecretMatcher::with_builtins_and_custom(&["DEPLOY_HOOK".to_string()]);
//! assert!(matcher.is_secret("GITHUB_TOKEN"));
//! assert!(matcher.is_secret("DEPLOY_HOOK"));
//! assert!(!matcher.is_secret("PATH"));
//! ```

pub mod pattern;

pub use pattern::{SecretMatcher, SecretPattern, BUILTIN_PATTERNS};
