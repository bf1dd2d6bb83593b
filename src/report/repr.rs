//! Canonical quoting for report keys and values.
//!
//! Every key and value in a rendered mapping passes through [`Repr`], so an
//! entry always occupies exactly one physical line regardless of what the
//! underlying environment variable or config value contains.

use serde::Deserialize;

/// A scalar value that can appear on the right-hand side of a mapping entry.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(untagged)]
pub enum Scalar {
    Bool(bool),
    Int(i64),
    Str(String),
    /// An undefined config variable.
    None,
}

impl From<&str> for Scalar {
    fn from(value: &str) -> Self {
        Self::Str(value.to_string())
    }
}

impl From<String> for Scalar {
    fn from(value: String) -> Self {
        Self::Str(value)
    }
}

impl From<i64> for Scalar {
    fn from(value: i64) -> Self {
        Self::Int(value)
    }
}

impl From<bool> for Scalar {
    fn from(value: bool) -> Self {
        Self::Bool(value)
    }
}

impl From<&serde_json::Value> for Scalar {
    fn from(value: &serde_json::Value) -> Self {
        match value {
            serde_json::Value::Null => Self::None,
            serde_json::Value::Bool(b) => Self::Bool(*b),
            serde_json::Value::String(s) => Self::Str(s.clone()),
            serde_json::Value::Number(n) => match n.as_i64() {
                Some(i) => Self::Int(i),
                None => Self::Str(n.to_string()),
            },
            other => Self::Str(other.to_string()),
        }
    }
}

/// Types with a canonical single-line representation.
pub trait Repr {
    /// Render the canonical representation.
    fn repr(&self) -> String;
}

impl Repr for str {
    fn repr(&self) -> String {
        quote_str(self)
    }
}

impl Repr for String {
    fn repr(&self) -> String {
        quote_str(self)
    }
}

impl Repr for i64 {
    fn repr(&self) -> String {
        self.to_string()
    }
}

impl Repr for bool {
    fn repr(&self) -> String {
        if *self { "True" } else { "False" }.to_string()
    }
}

impl Repr for Scalar {
    fn repr(&self) -> String {
        match self {
            Self::Bool(b) => b.repr(),
            Self::Int(i) => i.repr(),
            Self::Str(s) => quote_str(s),
            Self::None => "None".to_string(),
        }
    }
}

impl<T: Repr + ?Sized> Repr for &T {
    fn repr(&self) -> String {
        (**self).repr()
    }
}

/// Quote a string the way a Python `repr` does.
///
/// Single quotes are preferred; double quotes are used only when the text
/// contains a single quote and no double quote. Control, format, separator
/// (other than the ASCII space) and private-use characters are escaped as
/// `\xNN`, `\uNNNN` or `\UNNNNNNNN`. Unassigned code points are kept
/// verbatim since no category table is consulted.
pub fn quote_str(text: &str) -> String {
    let quote = if text.contains('\'') && !text.contains('"') {
        '"'
    } else {
        '\''
    };

    let mut out = String::with_capacity(text.len() + 2);
    out.push(quote);
    for c in text.chars() {
        match c {
            '\\' => out.push_str("\\\\"),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\t' => out.push_str("\\t"),
            c if c == quote => {
                out.push('\\');
                out.push(c);
            }
            c if is_unprintable(c) => out.push_str(&escape_code_point(c)),
            c => out.push(c),
        }
    }
    out.push(quote);
    out
}

fn escape_code_point(c: char) -> String {
    match c as u32 {
        n @ 0..=0xff => format!("\\x{:02x}", n),
        n @ 0x100..=0xffff => format!("\\u{:04x}", n),
        n => format!("\\U{:08x}", n),
    }
}

fn is_unprintable(c: char) -> bool {
    matches!(c,
        // Cc
        '\u{0}'..='\u{1f}' | '\u{7f}'..='\u{9f}'
        // Zs other than ' ', Zl, Zp
        | '\u{a0}' | '\u{1680}' | '\u{2000}'..='\u{200a}' | '\u{2028}' | '\u{2029}'
        | '\u{202f}' | '\u{205f}' | '\u{3000}'
        // Cf
        | '\u{ad}' | '\u{600}'..='\u{605}' | '\u{61c}' | '\u{6dd}' | '\u{70f}'
        | '\u{890}' | '\u{891}' | '\u{8e2}' | '\u{180e}' | '\u{200b}'..='\u{200f}'
        | '\u{202a}'..='\u{202e}' | '\u{2060}'..='\u{2064}' | '\u{2066}'..='\u{206f}'
        | '\u{feff}' | '\u{fff9}'..='\u{fffb}' | '\u{110bd}' | '\u{110cd}'
        | '\u{13430}'..='\u{1343f}' | '\u{1bca0}'..='\u{1bca3}' | '\u{1d173}'..='\u{1d17a}'
        | '\u{e0001}' | '\u{e0020}'..='\u{e007f}'
        // Co
        | '\u{e000}'..='\u{f8ff}' | '\u{f0000}'..='\u{ffffd}' | '\u{100000}'..='\u{10fffd}'
    )
}
