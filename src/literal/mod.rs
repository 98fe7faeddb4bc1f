//! Conversion between JSON literals and Python literals.
//!
//! The forward direction writes a `Value` straight into Python syntax
//! (`True`/`False`/`None`, single-quoted strings). The reverse direction
//! parses text in either dialect back into a `Value`. Both walk the
//! structure, so string contents such as `"None"` or `"it's"` survive
//! the trip untouched.
pub mod lexer;
pub mod parser;

use serde_json::Value;
use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq)]
pub enum LiteralError {
    #[error("unexpected character `{found}` at offset {offset}")]
    UnexpectedChar { found: char, offset: usize },

    #[error("unterminated string starting at offset {offset}")]
    UnterminatedString { offset: usize },

    #[error("invalid escape `\\{found}` at offset {offset}")]
    InvalidEscape { found: char, offset: usize },

    #[error("invalid number `{text}` at offset {offset}")]
    InvalidNumber { text: String, offset: usize },

    #[error("unknown identifier `{name}` at offset {offset}")]
    UnknownIdent { name: String, offset: usize },

    #[error("expected {expected} at offset {offset}")]
    Expected {
        expected: &'static str,
        offset: usize,
    },

    #[error("nesting too deep at offset {offset}")]
    TooDeep { offset: usize },

    #[error("unexpected trailing input at offset {offset}")]
    TrailingInput { offset: usize },
}

/// Render `value` as a compact Python literal.
///
/// Layout mirrors compact JSON (no spaces), so
/// `normalize(&to_python_literal(v)) == v.to_string()`.
pub fn to_python_literal(value: &Value) -> String {
    let mut out = String::new();
    write_value(&mut out, value);
    out
}

/// Parse a JSON or Python flavoured literal.
pub fn from_python_literal(src: &str) -> Result<Value, LiteralError> {
    parser::Parser::new(src).parse()
}

/// Canonical compact JSON for a literal in either dialect.
pub fn normalize(src: &str) -> Result<String, LiteralError> {
    from_python_literal(src).map(|value| value.to_string())
}

fn write_value(out: &mut String, value: &Value) {
    match value {
        Value::Null => out.push_str("None"),
        Value::Bool(true) => out.push_str("True"),
        Value::Bool(false) => out.push_str("False"),
        Value::Number(n) => out.push_str(&n.to_string()),
        Value::String(s) => write_str(out, s),
        Value::Array(items) => {
            out.push('[');
            for (i, item) in items.iter().enumerate() {
                if i > 0 {
                    out.push(',');
                }
                write_value(out, item);
            }
            out.push(']');
        }
        Value::Object(map) => {
            out.push('{');
            for (i, (key, item)) in map.iter().enumerate() {
                if i > 0 {
                    out.push(',');
                }
                write_str(out, key);
                out.push(':');
                write_value(out, item);
            }
            out.push('}');
        }
    }
}

fn write_str(out: &mut String, s: &str) {
    out.push('\'');
    for c in s.chars() {
        match c {
            '\\' => out.push_str("\\\\"),
            '\'' => out.push_str("\\'"),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\t' => out.push_str("\\t"),
            c if c.is_control() => out.push_str(&format!("\\x{:02x}", c as u32)),
            c => out.push(c),
        }
    }
    out.push('\'');
}
