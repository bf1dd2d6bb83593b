//! Secret key matching.
//!
//! Environment variables whose names look like credentials are kept out of
//! the report entirely. Matching is done on names only; values are never
//! inspected.

use regex::Regex;

/// A pattern that identifies secret variable names.
#[derive(Debug, Clone)]
pub struct SecretPattern {
    /// Name of this pattern (for debugging).
    pub name: String,
    /// Regex pattern to match environment variable names.
    pub env_pattern: Regex,
}

/// Built-in patterns for common secrets.
///
/// Each tuple contains (name, regex_pattern).
pub const BUILTIN_PATTERNS: &[(&str, &str)] = &[
    ("api_key", r"(?i)^.*_?(API_?KEY|APIKEY)$"),
    ("secret", r"(?i)^.*SECRET(_KEY)?$"),
    ("secret_prefix", r"(?i)(^|_)SECRET_"),
    ("token", r"(?i)^.*TOKEN$"),
    ("password", r"(?i)^.*(PASSWORD|PASSWD)$"),
    ("credential", r"(?i)^.*CREDENTIALS?$"),
    ("private_key", r"(?i)^.*PRIVATE_KEY$"),
];

/// Matches environment variable names against secret patterns.
///
/// # Example
///
/// ```
/// use python_info::secrets::SecretMatcher;
///
/// let matcher = SecretMatcher::with_builtins();
///
/// assert!(matcher.is_secret("A_SECRET"));
/// assert!(matcher.is_secret("SECRET_WEBHOOK"));
/// assert!(matcher.is_secret("ACTIONS_RUNTIME_TOKEN"));
/// assert!(matcher.is_secret("PYPI_PASSWORD"));
///
/// assert!(!matcher.is_secret("PATH"));
/// assert!(!matcher.is_secret("ACTION_FILE_PATH"));
/// ```
#[derive(Debug, Clone)]
pub struct SecretMatcher {
    patterns: Vec<SecretPattern>,
}

impl SecretMatcher {
    /// Create a matcher with built-in patterns.
    pub fn with_builtins() -> Self {
        let patterns = BUILTIN_PATTERNS
            .iter()
            .map(|(name, pattern)| SecretPattern {
                name: name.to_string(),
                env_pattern: Regex::new(pattern).expect("built-in secret patterns are valid"),
            })
            .collect();

        Self { patterns }
    }

    /// Create a matcher with built-in patterns plus custom exact matches.
    pub fn with_builtins_and_custom(custom_names: &[String]) -> Self {
        let mut matcher = Self::with_builtins();

        for name in custom_names {
            if let Ok(pattern) = Regex::new(&format!("^{}$", regex::escape(name))) {
                matcher.add_pattern(SecretPattern {
                    name: format!("custom:{}", name),
                    env_pattern: pattern,
                });
            }
        }

        matcher
    }

    fn add_pattern(&mut self, pattern: SecretPattern) {
        self.patterns.push(pattern);
    }

    /// Name of the first pattern matching `env_name`, if any.
    pub fn matching_pattern(&self, env_name: &str) -> Option<&str> {
        self.patterns
            .iter()
            .find(|p| p.env_pattern.is_match(env_name))
            .map(|p| p.name.as_str())
    }

    /// Check if an environment variable name matches any secret pattern.
    pub fn is_secret(&self, env_name: &str) -> bool {
        self.matching_pattern(env_name).is_some()
    }
}

impl Default for SecretMatcher {
    fn default() -> Self {
        Self::with_builtins()
    }
}
