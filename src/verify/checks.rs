//! Line-anchored report checks.

use regex::Regex;

use crate::error::{InfoError, Result};

/// Fail unless some physical line of `report` matches `pattern` entirely.
///
/// `pattern` is anchored at both ends; callers should not add `^` or `$`.
///
/// # Example
///
/// ```
/// use python_info::verify::check_anchor;
///
/// let report = "'Py_DEBUG' : 0\n'SOABI'    : 'cpython-312'\n";
/// assert!(check_anchor(report, r"'Py_DEBUG' +: [01]").is_ok());
/// assert!(check_anchor(report, r"'Py_DEBUG'").is_err());
/// ```
pub fn check_anchor(report: &str, pattern: &str) -> Result<()> {
    let anchored = format!("^(?:{})$", pattern);
    let regex = Regex::new(&anchored).map_err(|e| InfoError::InvalidArgument {
        message: format!("bad pattern {}: {}", anchored, e),
    })?;

    if report.lines().any(|line| regex.is_match(line)) {
        Ok(())
    } else {
        Err(InfoError::CheckFailed { pattern: anchored })
    }
}

/// Fail if the secret value from `source_name` occurs anywhere in `report`.
///
/// An empty secret is treated as unset, since it trivially occurs in any text.
pub fn check_secret_absent(report: &str, source_name: &str, secret: &str) -> Result<()> {
    if secret.is_empty() {
        return Err(InfoError::MissingSecret {
            name: source_name.to_string(),
        });
    }
    if report.contains(secret) {
        return Err(InfoError::SecretLeaked {
            source_name: source_name.to_string(),
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    const REPORT: &str = "\
sys.prefix               : /opt/py
'ACTION_FILE_PATH' : 'out.txt'
'FOO'              : 'bar'
pip==24.0
";

    #[test]
    fn anchor_matches_whole_line() {
        check_anchor(REPORT, r"sys\.prefix +: /opt/py").unwrap();
        check_anchor(REPORT, r"pip==.*").unwrap();
    }

    #[test]
    fn anchor_rejects_partial_line() {
        let err = check_anchor(REPORT, r"sys\.prefix +: /opt").unwrap_err();
        assert!(matches!(err, InfoError::CheckFailed { .. }));
        assert!(check_anchor(REPORT, r"ip==24\.0").is_err());
    }

    #[test]
    fn anchor_does_not_span_lines() {
        assert!(check_anchor(REPORT, r"'FOO' +: 'bar'\npip==24\.0").is_err());
    }

    #[test]
    fn anchor_handles_crlf_reports() {
        check_anchor("a\r\npip==24.0\r\n", r"pip==24\.0").unwrap();
    }

    #[test]
    fn alternation_stays_anchored() {
        assert!(check_anchor(REPORT, r"nothing|pip").is_err());
    }

    #[test]
    fn invalid_pattern_is_reported() {
        let err = check_anchor(REPORT, r"(unclosed").unwrap_err();
        assert!(matches!(err, InfoError::InvalidArgument { .. }));
    }

    #[test]
    fn failure_names_anchored_pattern() {
        let err = check_anchor(REPORT, "missing").unwrap_err();
        assert!(err.to_string().contains("^(?:missing)$"));
    }

    #[test]
    fn secret_absent_passes() {
        check_secret_absent(REPORT, "A_SECRET", "neverseethis").unwrap();
    }

    #[test]
    fn secret_present_fails_without_echoing_value() {
        let report = format!("{}'LEAK' : 'neverseethis'\n", REPORT);
        let err = check_secret_absent(&report, "A_SECRET", "neverseethis").unwrap_err();
        assert!(matches!(err, InfoError::SecretLeaked { .. }));
        assert!(!err.to_string().contains("neverseethis"));
    }

    #[test]
    fn empty_secret_is_missing() {
        let err = check_secret_absent(REPORT, "A_SECRET", "").unwrap_err();
        assert!(matches!(err, InfoError::MissingSecret { .. }));
    }
}
