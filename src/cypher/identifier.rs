//! Identifiers: variable names, labels, property keys.

use std::borrow::Cow;

use crate::model::Value;
use crate::{Error, Result};
use super::token::{Render, Token, Tokens};

/// True if `name` matches `^[_A-Za-z][_A-Za-z0-9]*$` and can be emitted
/// without backticks.
pub fn is_bare_identifier(name: &str) -> bool {
    let mut chars = name.chars();
    match chars.next() {
        Some(c) if c == '_' || c.is_ascii_alphabetic() => {}
        _ => return false,
    }
    chars.all(|c| c == '_' || c.is_ascii_alphanumeric())
}

/// Quote `name` with backticks unless it is a bare identifier.
///
/// Embedded backticks are doubled, so every string has a valid quoted form.
pub fn quote_identifier(name: &str) -> Cow<'_, str> {
    if is_bare_identifier(name) {
        Cow::Borrowed(name)
    } else {
        Cow::Owned(format!("`{}`", name.replace('`', "``")))
    }
}

/// A name reference: `name`, `owner.name`, `name AS alias`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Identifier {
    name: String,
    owner: Option<String>,
    alias: Option<String>,
}

impl Identifier {
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into(), owner: None, alias: None }
    }

    /// Qualify with an owning identifier: `owner.name`.
    pub fn of(mut self, owner: impl Into<String>) -> Self {
        self.owner = Some(owner.into());
        self
    }

    /// Alias the identifier: `name AS alias`.
    pub fn alias(mut self, alias: impl Into<String>) -> Self {
        self.alias = Some(alias.into());
        self
    }

    pub fn name(&self) -> &str { &self.name }
    pub fn owner(&self) -> Option<&str> { self.owner.as_deref() }
    pub fn alias_name(&self) -> Option<&str> { self.alias.as_deref() }
}

impl Render for Identifier {
    fn tokens(&self) -> Tokens<'_> {
        let mut toks = Tokens::new();
        if let Some(owner) = &self.owner {
            toks.push(Token::Text(quote_identifier(owner)));
            toks.push(Token::text("."));
        }
        toks.push(Token::Text(quote_identifier(&self.name)));
        if let Some(alias) = &self.alias {
            toks.push(Token::text(" AS "));
            toks.push(Token::Text(quote_identifier(alias)));
        }
        toks
    }
}

impl From<&str> for Identifier {
    fn from(name: &str) -> Self { Identifier::new(name) }
}

impl From<String> for Identifier {
    fn from(name: String) -> Self { Identifier::new(name) }
}

/// Only text values can name things.
impl TryFrom<Value> for Identifier {
    type Error = Error;

    fn try_from(value: Value) -> Result<Self> {
        match value {
            Value::String(name) => Ok(Identifier::new(name)),
            other => {
                tracing::debug!(got = other.type_name(), "rejected non-text identifier");
                Err(Error::TypeConstraint {
                    expected: "STRING identifier".into(),
                    got: other.type_name().into(),
                })
            }
        }
    }
}
