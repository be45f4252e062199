//! Host values embeddable as Cypher literals.

use chrono::{DateTime, NaiveDate, NaiveDateTime, NaiveTime, SecondsFormat, Utc};

use crate::cypher::expr::{collection_tokens, map_tokens};
use crate::cypher::literal::{format_float, quote_string};
use crate::cypher::token::{Render, Token, Tokens};
use crate::cypher::{Expr, Identifier};
use crate::{Error, Result};
use super::PropertyMap;

/// A value that can be written into a query.
///
/// Closed and recursive: lists and maps hold further values, and `Expr`
/// embeds any already-built query node, which renders as itself.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    Null,
    Bool(bool),
    Int(i64),
    Float(f64),
    String(String),
    List(Vec<Value>),
    Map(PropertyMap),

    // Temporal types
    Date(NaiveDate),
    LocalTime(NaiveTime),
    LocalDateTime(NaiveDateTime),
    DateTime(DateTime<Utc>),

    /// An already-built query node.
    Expr(Box<Expr>),
}

// ============================================================================
// Type checking
// ============================================================================

impl Value {
    pub fn type_name(&self) -> &'static str {
        match self {
            Value::Null => "NULL",
            Value::Bool(_) => "BOOLEAN",
            Value::Int(_) => "INTEGER",
            Value::Float(_) => "FLOAT",
            Value::String(_) => "STRING",
            Value::List(_) => "LIST",
            Value::Map(_) => "MAP",
            Value::Date(_) => "DATE",
            Value::LocalTime(_) => "LOCAL_TIME",
            Value::LocalDateTime(_) => "LOCAL_DATETIME",
            Value::DateTime(_) => "DATETIME",
            Value::Expr(_) => "EXPRESSION",
        }
    }

    /// Text from raw bytes. Fails unless the bytes are valid UTF-8.
    pub fn bytes(bytes: Vec<u8>) -> Result<Value> {
        String::from_utf8(bytes).map(Value::String).map_err(|e| {
            tracing::debug!(valid_up_to = e.utf8_error().valid_up_to(), "rejected non-UTF-8 bytes");
            Error::TypeConstraint {
                expected: "UTF-8 encoded bytes".into(),
                got: "invalid UTF-8".into(),
            }
        })
    }

    pub fn is_null(&self) -> bool { matches!(self, Value::Null) }

    pub fn as_int(&self) -> Option<i64> {
        match self {
            Value::Int(i) => Some(*i),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::String(s) => Some(s),
            _ => None,
        }
    }
}

// ============================================================================
// Rendering
// ============================================================================

impl Render for Value {
    fn tokens(&self) -> Tokens<'_> {
        match self {
            Value::Null => smallvec::smallvec![Token::text("NULL")],
            Value::Bool(true) => smallvec::smallvec![Token::text("TRUE")],
            Value::Bool(false) => smallvec::smallvec![Token::text("FALSE")],
            Value::Int(i) => smallvec::smallvec![Token::owned(i.to_string())],
            Value::Float(f) => smallvec::smallvec![Token::owned(format_float(*f))],
            Value::String(s) => smallvec::smallvec![Token::owned(quote_string(s))],
            Value::List(items) => collection_tokens(items),
            Value::Map(props) => map_tokens(props),
            Value::Date(d) => smallvec::smallvec![Token::owned(format!("date('{d}')"))],
            Value::LocalTime(t) => smallvec::smallvec![Token::owned(format!("localtime('{t}')"))],
            Value::LocalDateTime(dt) => smallvec::smallvec![Token::owned(format!(
                "localdatetime('{}')",
                dt.format("%Y-%m-%dT%H:%M:%S%.f")
            ))],
            Value::DateTime(dt) => smallvec::smallvec![Token::owned(format!(
                "datetime('{}')",
                dt.to_rfc3339_opts(SecondsFormat::AutoSi, true)
            ))],
            Value::Expr(expr) => expr.tokens(),
        }
    }

    fn reference(&self) -> Option<&Identifier> {
        match self {
            Value::Expr(expr) => expr.reference(),
            _ => None,
        }
    }
}

crate::cypher::token::impl_display_via_render!(Value);

// ============================================================================
// Conversions (From impls)
// ============================================================================

impl From<bool> for Value { fn from(v: bool) -> Self { Value::Bool(v) } }
impl From<i32> for Value { fn from(v: i32) -> Self { Value::Int(v as i64) } }
impl From<i64> for Value { fn from(v: i64) -> Self { Value::Int(v) } }
impl From<u32> for Value { fn from(v: u32) -> Self { Value::Int(v as i64) } }
impl From<f32> for Value { fn from(v: f32) -> Self { Value::Float(v as f64) } }
impl From<f64> for Value { fn from(v: f64) -> Self { Value::Float(v) } }
impl From<String> for Value { fn from(v: String) -> Self { Value::String(v) } }
impl From<&str> for Value { fn from(v: &str) -> Self { Value::String(v.to_owned()) } }
impl From<PropertyMap> for Value { fn from(v: PropertyMap) -> Self { Value::Map(v) } }
impl From<NaiveDate> for Value { fn from(v: NaiveDate) -> Self { Value::Date(v) } }
impl From<NaiveTime> for Value { fn from(v: NaiveTime) -> Self { Value::LocalTime(v) } }
impl From<NaiveDateTime> for Value { fn from(v: NaiveDateTime) -> Self { Value::LocalDateTime(v) } }
impl From<DateTime<Utc>> for Value { fn from(v: DateTime<Utc>) -> Self { Value::DateTime(v) } }
impl<T: Into<Value>> From<Vec<T>> for Value {
    fn from(v: Vec<T>) -> Self { Value::List(v.into_iter().map(Into::into).collect()) }
}
impl<T: Into<Value>> From<Option<T>> for Value {
    fn from(v: Option<T>) -> Self { v.map(Into::into).unwrap_or(Value::Null) }
}

/// Escaped literals unwrap back to their value; every other node is
/// embedded as-is.
impl From<Expr> for Value {
    fn from(expr: Expr) -> Self {
        match expr {
            Expr::Literal(lit) if !lit.is_raw() => lit.into_value(),
            other => Value::Expr(Box::new(other)),
        }
    }
}

/// JSON objects keep the iteration order of the parsed map.
impl From<serde_json::Value> for Value {
    fn from(json: serde_json::Value) -> Self {
        use serde_json::Value as Json;
        match json {
            Json::Null => Value::Null,
            Json::Bool(b) => Value::Bool(b),
            Json::Number(n) => match n.as_i64() {
                Some(i) => Value::Int(i),
                None => Value::Float(n.as_f64().unwrap_or(f64::NAN)),
            },
            Json::String(s) => Value::String(s),
            Json::Array(items) => Value::List(items.into_iter().map(Value::from).collect()),
            Json::Object(map) => Value::Map(map.into_iter().collect()),
        }
    }
}
