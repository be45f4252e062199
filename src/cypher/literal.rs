//! Literal rendering: quoting, escaping, number formatting.

use std::borrow::Cow;

use crate::model::Value;
use super::token::{Render, Token, Tokens};

#[inline]
fn needs_escaping(s: &str) -> bool {
    s.chars().any(|c| matches!(c, '\\' | '\'' | '"' | '\n' | '\r' | '\t' | '\u{8}' | '\u{c}' | '\0'))
}

/// Escape `s` for use inside a single-quoted Cypher string.
pub fn escape_string(s: &str) -> Cow<'_, str> {
    if !needs_escaping(s) {
        return Cow::Borrowed(s);
    }

    let mut escaped = String::with_capacity(s.len() + 8);
    for c in s.chars() {
        match c {
            '\\' => escaped.push_str("\\\\"),
            '\'' => escaped.push_str("\\'"),
            '"' => escaped.push_str("\\\""),
            '\n' => escaped.push_str("\\n"),
            '\r' => escaped.push_str("\\r"),
            '\t' => escaped.push_str("\\t"),
            '\u{8}' => escaped.push_str("\\b"),
            '\u{c}' => escaped.push_str("\\f"),
            '\0' => escaped.push_str("\\u0000"),
            c => escaped.push(c),
        }
    }
    Cow::Owned(escaped)
}

/// Quote `s` as a single-quoted Cypher string literal.
pub fn quote_string(s: &str) -> String {
    format!("'{}'", escape_string(s))
}

/// Canonical float text. Whole numbers keep a `.0` so they stay floats
/// when read back by the database.
pub fn format_float(f: f64) -> String {
    if f.is_nan() {
        return "NaN".into();
    }
    if f.is_infinite() {
        return if f > 0.0 { "Infinity".into() } else { "-Infinity".into() };
    }
    let s = f.to_string();
    if s.contains(['.', 'e', 'E']) { s } else { format!("{s}.0") }
}

/// A value embedded in a query.
///
/// Normally escaped; a raw literal is emitted verbatim and is meant for
/// pre-rendered fragments such as `timestamp()` or `$param`.
#[derive(Debug, Clone, PartialEq)]
pub struct Literal {
    value: Value,
    raw: bool,
}

impl Literal {
    pub fn new(value: impl Into<Value>) -> Self {
        Self { value: value.into(), raw: false }
    }

    /// Verbatim fragment. The caller is responsible for its validity.
    pub fn raw(fragment: impl Into<String>) -> Self {
        Self { value: Value::String(fragment.into()), raw: true }
    }

    pub fn value(&self) -> &Value { &self.value }
    pub fn is_raw(&self) -> bool { self.raw }

    pub fn into_value(self) -> Value { self.value }
}

impl Render for Literal {
    fn tokens(&self) -> Tokens<'_> {
        match &self.value {
            Value::String(s) if self.raw => smallvec::smallvec![Token::text(s)],
            value => value.tokens(),
        }
    }

    fn reference(&self) -> Option<&super::Identifier> {
        self.value.reference()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_escape_string() {
        assert!(matches!(escape_string("plain"), Cow::Borrowed(_)));
        assert_eq!(escape_string("it's"), "it\\'s");
        assert_eq!(escape_string("a\\b"), "a\\\\b");
        assert_eq!(escape_string("line\nbreak\ttab"), "line\\nbreak\\ttab");
        assert_eq!(escape_string("nul\0"), "nul\\u0000");
    }

    #[test]
    fn test_quote_string() {
        assert_eq!(quote_string("Bob"), "'Bob'");
        assert_eq!(quote_string("O'Brien"), "'O\\'Brien'");
        assert_eq!(quote_string(""), "''");
    }

    #[test]
    fn test_format_float() {
        assert_eq!(format_float(3.0), "3.0");
        assert_eq!(format_float(3.25), "3.25");
        assert_eq!(format_float(-0.5), "-0.5");
        assert!(format_float(1e20).ends_with("00000.0"));
        assert_eq!(format_float(f64::NAN), "NaN");
        assert_eq!(format_float(f64::NEG_INFINITY), "-Infinity");
    }

    #[test]
    fn test_raw_literal_is_verbatim() {
        assert_eq!(Literal::raw("timestamp()").render(), "timestamp()");
        assert_eq!(Literal::new("timestamp()").render(), "'timestamp()'");
        assert_eq!(Literal::raw("$name").render(), "$name");
    }
}
