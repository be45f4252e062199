//! Predicates: conditions and AND/OR trees of conditions.

use super::expr::Expr;
use super::identifier::quote_identifier;
use super::token::{delimit, impl_display_via_render, Render, Token, Tokens};

/// A single condition: `subject [operator [value]] [AS alias]`.
///
/// The operator is opaque text (`=`, `<>`, `IN`, `IS NOT NULL`, ...). A
/// subject that is a named pattern renders as its bare identifier.
#[derive(Debug, Clone, PartialEq)]
pub struct Predicate {
    subject: Expr,
    operator: Option<String>,
    value: Option<Expr>,
    alias: Option<String>,
}

impl Predicate {
    pub fn new(subject: impl Into<Expr>) -> Self {
        Self { subject: subject.into(), operator: None, value: None, alias: None }
    }

    /// `subject operator value`
    pub fn compare(subject: impl Into<Expr>, operator: impl Into<String>, value: impl Into<Expr>) -> Self {
        let mut predicate = Self::new(subject).op(operator);
        predicate.value = Some(value.into());
        predicate
    }

    /// `subject operator`, e.g. `n.email IS NULL`.
    pub fn unary(subject: impl Into<Expr>, operator: impl Into<String>) -> Self {
        Self::new(subject).op(operator)
    }

    /// Set or replace the operator. A value is only ever attached through
    /// [`compare`](Self::compare), so it never renders without one.
    pub fn op(mut self, operator: impl Into<String>) -> Self {
        self.operator = Some(operator.into());
        self
    }

    pub fn alias(mut self, alias: impl Into<String>) -> Self {
        self.alias = Some(alias.into());
        self
    }
}

impl Render for Predicate {
    fn tokens(&self) -> Tokens<'_> {
        let mut toks = Tokens::new();
        toks.push(Token::reference_or_node(&self.subject));
        if let Some(op) = &self.operator {
            toks.push(Token::text(" "));
            toks.push(Token::text(op));
            if let Some(value) = &self.value {
                toks.push(Token::text(" "));
                toks.push(Token::reference_or_node(value));
            }
        }
        if let Some(alias) = &self.alias {
            toks.push(Token::text(" AS "));
            toks.push(Token::Text(quote_identifier(alias)));
        }
        toks
    }
}

/// Conditions joined by a boolean operator (AND by default).
///
/// One member renders bare; two or more are parenthesized, so lists nest
/// into arbitrary AND/OR trees.
#[derive(Debug, Clone, PartialEq)]
pub struct PredicateList {
    predicates: Vec<Expr>,
    operator: String,
}

impl PredicateList {
    pub fn new<I, E>(predicates: I) -> Self
    where
        I: IntoIterator<Item = E>,
        E: Into<Expr>,
    {
        Self::with_operator(predicates, "AND")
    }

    pub fn all<I, E>(predicates: I) -> Self
    where
        I: IntoIterator<Item = E>,
        E: Into<Expr>,
    {
        Self::with_operator(predicates, "AND")
    }

    pub fn any<I, E>(predicates: I) -> Self
    where
        I: IntoIterator<Item = E>,
        E: Into<Expr>,
    {
        Self::with_operator(predicates, "OR")
    }

    pub fn with_operator<I, E>(predicates: I, operator: impl Into<String>) -> Self
    where
        I: IntoIterator<Item = E>,
        E: Into<Expr>,
    {
        Self {
            predicates: predicates.into_iter().map(Into::into).collect(),
            operator: operator.into(),
        }
    }

    pub fn push(mut self, predicate: impl Into<Expr>) -> Self {
        self.predicates.push(predicate.into());
        self
    }

    pub fn len(&self) -> usize { self.predicates.len() }
    pub fn is_empty(&self) -> bool { self.predicates.is_empty() }
}

impl Render for PredicateList {
    fn tokens(&self) -> Tokens<'_> {
        match self.predicates.as_slice() {
            [] => Tokens::new(),
            [only] => smallvec::smallvec![Token::node(only)],
            many => {
                let delimiter = vec![Token::text(" "), Token::text(&self.operator), Token::text(" ")];
                let mut toks = Tokens::new();
                toks.push(Token::text("("));
                toks.extend(delimit(many.iter().map(|p| Token::node(p)), delimiter));
                toks.push(Token::text(")"));
                toks
            }
        }
    }
}

/// `NOT expr`
#[derive(Debug, Clone, PartialEq)]
pub struct Not(Box<Expr>);

impl Not {
    pub fn new(expr: impl Into<Expr>) -> Self {
        Not(Box::new(expr.into()))
    }
}

impl Render for Not {
    fn tokens(&self) -> Tokens<'_> {
        smallvec::smallvec![Token::text("NOT "), Token::node(self.0.as_ref())]
    }
}

impl_display_via_render!(Predicate, PredicateList, Not);
