//! Query clauses: one variant per keyword.
//!
//! Every clause pairs a fixed keyword with its payload:
//!
//! | Clause | Renders |
//! |--------|---------|
//! | list clauses | `MATCH a, b` |
//! | `Create { unique }` | `CREATE [UNIQUE] a, b` |
//! | `Delete { detach }` | `[DETACH] DELETE a, b` |
//! | `Return` / `With` | `RETURN [DISTINCT] items [ORDER BY ...] [SKIP n] [LIMIT n]` |
//! | `Skip` / `Limit` | `SKIP n` |
//! | `Merge` | `MERGE expr [ON CREATE SET ...] [ON MATCH SET ...]` |
//! | index DDL | `CREATE INDEX ON :Label(prop)` |
//! | constraint DDL | `CREATE CONSTRAINT ON (n:Label) ASSERT n.prop IS UNIQUE` |
//! | `Union` / `UnionAll` | `UNION [ALL]` |

use crate::model::Value;
use crate::{Error, Result};
use super::expr::Expr;
use super::identifier::quote_identifier;
use super::token::{delimit, impl_display_via_render, Render, Token, Tokens};

/// Identifier bound by constraint DDL.
const CONSTRAINT_VAR: &str = "n";

fn exprs<I, E>(items: I) -> Vec<Expr>
where
    I: IntoIterator<Item = E>,
    E: Into<Expr>,
{
    items.into_iter().map(Into::into).collect()
}

/// `a, b, c`, optionally referring to named patterns by identifier.
fn list_tokens(items: &[Expr], by_reference: bool) -> Tokens<'_> {
    delimit(
        items.iter().map(|e| if by_reference { Token::reference_or_node(e) } else { Token::node(e) }),
        ", ",
    )
}

/// SKIP and LIMIT only accept non-negative integers.
fn count_value(keyword: &'static str, value: Value) -> Result<u64> {
    match value {
        Value::Int(n) if n >= 0 => Ok(n as u64),
        other => {
            let got = match other {
                Value::Int(n) => format!("INTEGER {n}"),
                ref v => v.type_name().to_string(),
            };
            tracing::debug!(keyword, %got, "rejected row count");
            Err(Error::TypeConstraint {
                expected: format!("non-negative INTEGER for {keyword}"),
                got,
            })
        }
    }
}

// ============================================================================
// Projection (RETURN / WITH payload)
// ============================================================================

/// Items plus the DISTINCT / ORDER BY / SKIP / LIMIT options of RETURN and WITH.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Projection {
    items: Vec<Expr>,
    distinct: bool,
    order_by: Vec<Expr>,
    skip: Option<u64>,
    limit: Option<u64>,
}

impl Projection {
    pub fn new<I, E>(items: I) -> Self
    where
        I: IntoIterator<Item = E>,
        E: Into<Expr>,
    {
        Self { items: exprs(items), ..Self::default() }
    }

    pub fn distinct(mut self) -> Self {
        self.distinct = true;
        self
    }

    pub fn order_by<I, E>(mut self, items: I) -> Self
    where
        I: IntoIterator<Item = E>,
        E: Into<Expr>,
    {
        self.order_by.extend(items.into_iter().map(Into::into));
        self
    }

    pub fn skip(mut self, n: u64) -> Self {
        self.skip = Some(n);
        self
    }

    pub fn limit(mut self, n: u64) -> Self {
        self.limit = Some(n);
        self
    }

    fn tokens_with<'a>(&'a self, keyword: &'static str) -> Tokens<'a> {
        let mut toks = Tokens::new();
        toks.push(Token::text(keyword));
        if self.distinct {
            toks.push(Token::text(" DISTINCT"));
        }
        if !self.items.is_empty() {
            toks.push(Token::text(" "));
            toks.extend(list_tokens(&self.items, true));
        }
        if !self.order_by.is_empty() {
            toks.push(Token::text(" ORDER BY "));
            toks.extend(list_tokens(&self.order_by, true));
        }
        if let Some(n) = self.skip {
            toks.push(Token::owned(format!(" SKIP {n}")));
        }
        if let Some(n) = self.limit {
            toks.push(Token::owned(format!(" LIMIT {n}")));
        }
        toks
    }
}

// ============================================================================
// Merge
// ============================================================================

/// `MERGE pattern [ON CREATE SET ...] [ON MATCH SET ...]`
#[derive(Debug, Clone, PartialEq)]
pub struct Merge {
    pattern: Box<Expr>,
    on_create: Vec<Expr>,
    on_match: Vec<Expr>,
}

impl Merge {
    pub fn new(pattern: impl Into<Expr>) -> Self {
        Self { pattern: Box::new(pattern.into()), on_create: Vec::new(), on_match: Vec::new() }
    }

    pub fn on_create(mut self, assignment: impl Into<Expr>) -> Self {
        self.on_create.push(assignment.into());
        self
    }

    pub fn on_match(mut self, assignment: impl Into<Expr>) -> Self {
        self.on_match.push(assignment.into());
        self
    }
}

impl Render for Merge {
    fn tokens(&self) -> Tokens<'_> {
        let mut toks = Tokens::new();
        toks.push(Token::text("MERGE "));
        toks.push(Token::node(self.pattern.as_ref()));
        if !self.on_create.is_empty() {
            toks.push(Token::text(" ON CREATE SET "));
            toks.extend(list_tokens(&self.on_create, false));
        }
        if !self.on_match.is_empty() {
            toks.push(Token::text(" ON MATCH SET "));
            toks.extend(list_tokens(&self.on_match, false));
        }
        toks
    }
}

// ============================================================================
// Schema DDL target
// ============================================================================

/// A `(label, property)` pair addressed by index and constraint DDL.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct SchemaTarget {
    pub label: String,
    pub property: String,
}

impl SchemaTarget {
    pub fn new(label: impl Into<String>, property: impl Into<String>) -> Self {
        Self { label: label.into(), property: property.into() }
    }

    /// `:Label(prop)`
    fn index_tokens(&self) -> Tokens<'_> {
        smallvec::smallvec![
            Token::text(":"),
            Token::Text(quote_identifier(&self.label)),
            Token::text("("),
            Token::Text(quote_identifier(&self.property)),
            Token::text(")"),
        ]
    }

    /// `(n:Label) ASSERT n.prop IS UNIQUE`
    fn constraint_tokens(&self) -> Tokens<'_> {
        smallvec::smallvec![
            Token::text("("),
            Token::text(CONSTRAINT_VAR),
            Token::text(":"),
            Token::Text(quote_identifier(&self.label)),
            Token::text(") ASSERT "),
            Token::text(CONSTRAINT_VAR),
            Token::text("."),
            Token::Text(quote_identifier(&self.property)),
            Token::text(" IS UNIQUE"),
        ]
    }
}

// ============================================================================
// Clause
// ============================================================================

/// One top-level section of a query.
#[derive(Debug, Clone, PartialEq)]
pub enum Clause {
    Start(Vec<Expr>),
    Match(Vec<Expr>),
    OptionalMatch(Vec<Expr>),
    Where(Vec<Expr>),
    Create { unique: bool, items: Vec<Expr> },
    Delete { detach: bool, items: Vec<Expr> },
    Set(Vec<Expr>),
    OnCreate(Vec<Expr>),
    OnMatch(Vec<Expr>),
    OrderBy(Vec<Expr>),
    With(Projection),
    Return(Projection),
    Skip(u64),
    Limit(u64),
    Merge(Merge),
    CreateIndex(SchemaTarget),
    DropIndex(SchemaTarget),
    CreateConstraint(SchemaTarget),
    DropConstraint(SchemaTarget),
    Union,
    UnionAll,
}

impl Clause {
    pub fn start<I: IntoIterator<Item = E>, E: Into<Expr>>(items: I) -> Self { Clause::Start(exprs(items)) }
    pub fn match_<I: IntoIterator<Item = E>, E: Into<Expr>>(items: I) -> Self { Clause::Match(exprs(items)) }
    pub fn optional_match<I: IntoIterator<Item = E>, E: Into<Expr>>(items: I) -> Self { Clause::OptionalMatch(exprs(items)) }
    pub fn where_<I: IntoIterator<Item = E>, E: Into<Expr>>(items: I) -> Self { Clause::Where(exprs(items)) }
    pub fn set<I: IntoIterator<Item = E>, E: Into<Expr>>(items: I) -> Self { Clause::Set(exprs(items)) }
    pub fn on_create<I: IntoIterator<Item = E>, E: Into<Expr>>(items: I) -> Self { Clause::OnCreate(exprs(items)) }
    pub fn on_match<I: IntoIterator<Item = E>, E: Into<Expr>>(items: I) -> Self { Clause::OnMatch(exprs(items)) }
    pub fn order_by<I: IntoIterator<Item = E>, E: Into<Expr>>(items: I) -> Self { Clause::OrderBy(exprs(items)) }

    pub fn create<I: IntoIterator<Item = E>, E: Into<Expr>>(items: I) -> Self {
        Clause::Create { unique: false, items: exprs(items) }
    }

    pub fn create_unique<I: IntoIterator<Item = E>, E: Into<Expr>>(items: I) -> Self {
        Clause::Create { unique: true, items: exprs(items) }
    }

    pub fn delete<I: IntoIterator<Item = E>, E: Into<Expr>>(items: I) -> Self {
        Clause::Delete { detach: false, items: exprs(items) }
    }

    pub fn detach_delete<I: IntoIterator<Item = E>, E: Into<Expr>>(items: I) -> Self {
        Clause::Delete { detach: true, items: exprs(items) }
    }

    pub fn return_(projection: Projection) -> Self { Clause::Return(projection) }
    pub fn with(projection: Projection) -> Self { Clause::With(projection) }
    pub fn merge(merge: Merge) -> Self { Clause::Merge(merge) }

    /// `SKIP n`. Fails unless `value` is a non-negative integer.
    pub fn skip(value: impl Into<Value>) -> Result<Self> {
        count_value("SKIP", value.into()).map(Clause::Skip)
    }

    /// `LIMIT n`. Fails unless `value` is a non-negative integer.
    pub fn limit(value: impl Into<Value>) -> Result<Self> {
        count_value("LIMIT", value.into()).map(Clause::Limit)
    }

    pub fn create_index(label: impl Into<String>, property: impl Into<String>) -> Self {
        Clause::CreateIndex(SchemaTarget::new(label, property))
    }

    pub fn drop_index(label: impl Into<String>, property: impl Into<String>) -> Self {
        Clause::DropIndex(SchemaTarget::new(label, property))
    }

    pub fn create_constraint(label: impl Into<String>, property: impl Into<String>) -> Self {
        Clause::CreateConstraint(SchemaTarget::new(label, property))
    }

    pub fn drop_constraint(label: impl Into<String>, property: impl Into<String>) -> Self {
        Clause::DropConstraint(SchemaTarget::new(label, property))
    }

    /// The clause keyword, without payload.
    pub fn keyword(&self) -> &'static str {
        match self {
            Clause::Start(_) => "START",
            Clause::Match(_) => "MATCH",
            Clause::OptionalMatch(_) => "OPTIONAL MATCH",
            Clause::Where(_) => "WHERE",
            Clause::Create { unique: false, .. } => "CREATE",
            Clause::Create { unique: true, .. } => "CREATE UNIQUE",
            Clause::Delete { detach: false, .. } => "DELETE",
            Clause::Delete { detach: true, .. } => "DETACH DELETE",
            Clause::Set(_) => "SET",
            Clause::OnCreate(_) => "ON CREATE SET",
            Clause::OnMatch(_) => "ON MATCH SET",
            Clause::OrderBy(_) => "ORDER BY",
            Clause::With(_) => "WITH",
            Clause::Return(_) => "RETURN",
            Clause::Skip(_) => "SKIP",
            Clause::Limit(_) => "LIMIT",
            Clause::Merge(_) => "MERGE",
            Clause::CreateIndex(_) => "CREATE INDEX ON",
            Clause::DropIndex(_) => "DROP INDEX ON",
            Clause::CreateConstraint(_) => "CREATE CONSTRAINT ON",
            Clause::DropConstraint(_) => "DROP CONSTRAINT ON",
            Clause::Union => "UNION",
            Clause::UnionAll => "UNION ALL",
        }
    }

    fn keyword_and<'a>(&'a self, payload: Tokens<'a>) -> Tokens<'a> {
        let mut toks = Tokens::new();
        toks.push(Token::text(self.keyword()));
        if !payload.is_empty() {
            toks.push(Token::text(" "));
            toks.extend(payload);
        }
        toks
    }
}

impl Render for Clause {
    fn tokens(&self) -> Tokens<'_> {
        match self {
            Clause::Start(items)
            | Clause::Match(items)
            | Clause::OptionalMatch(items)
            | Clause::Where(items)
            | Clause::Create { items, .. }
            | Clause::Set(items)
            | Clause::OnCreate(items)
            | Clause::OnMatch(items) => self.keyword_and(list_tokens(items, false)),
            // Named patterns can only be deleted or sorted by name.
            Clause::Delete { items, .. } | Clause::OrderBy(items) => self.keyword_and(list_tokens(items, true)),
            Clause::With(projection) | Clause::Return(projection) => projection.tokens_with(self.keyword()),
            Clause::Skip(n) | Clause::Limit(n) => self.keyword_and(smallvec::smallvec![Token::owned(n.to_string())]),
            Clause::Merge(merge) => merge.tokens(),
            Clause::CreateIndex(target) | Clause::DropIndex(target) => self.keyword_and(target.index_tokens()),
            Clause::CreateConstraint(target) | Clause::DropConstraint(target) => {
                self.keyword_and(target.constraint_tokens())
            }
            Clause::Union | Clause::UnionAll => smallvec::smallvec![Token::text(self.keyword())],
        }
    }
}

impl_display_via_render!(Clause, Merge);
