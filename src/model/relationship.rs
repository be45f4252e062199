//! Relationship pattern: `(a)-[r:TYPE {prop: value}]->(b)`.

use smallvec::SmallVec;

use crate::cypher::expr::map_tokens;
use crate::cypher::identifier::quote_identifier;
use crate::cypher::token::{impl_display_via_render, Render, Token, Tokens};
use crate::cypher::{Expr, Identifier};
use crate::{Error, Result};
use super::{Node, PropertyMap, Value};

/// Traversal direction, as written left to right.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    /// `-->`
    Outgoing,
    /// `<--`
    Incoming,
    /// `--`
    Both,
}

impl Direction {
    /// Left and right arrow halves.
    pub fn arrows(self) -> (&'static str, &'static str) {
        match self {
            Direction::Outgoing => ("-", "->"),
            Direction::Incoming => ("<-", "-"),
            Direction::Both => ("-", "-"),
        }
    }
}

// ============================================================================
// Endpoint
// ============================================================================

/// One end of a relationship: a bare identifier or a node pattern.
#[derive(Debug, Clone, PartialEq)]
pub enum Endpoint {
    Identifier(Identifier),
    Node(Node),
}

impl Render for Endpoint {
    fn tokens(&self) -> Tokens<'_> {
        match self {
            Endpoint::Identifier(ident) => ident.tokens(),
            Endpoint::Node(node) => node.tokens(),
        }
    }

    fn reference(&self) -> Option<&Identifier> {
        match self {
            Endpoint::Identifier(ident) => Some(ident),
            Endpoint::Node(node) => node.reference(),
        }
    }
}

/// A plain name becomes an unlabeled node: `"a"` → `(a)`.
impl From<&str> for Endpoint {
    fn from(name: &str) -> Self { Endpoint::Node(Node::named(name)) }
}

impl From<String> for Endpoint {
    fn from(name: String) -> Self { Endpoint::Node(Node::named(name)) }
}

impl From<Identifier> for Endpoint {
    fn from(ident: Identifier) -> Self { Endpoint::Identifier(ident) }
}

impl From<Node> for Endpoint {
    fn from(node: Node) -> Self { Endpoint::Node(node) }
}

impl TryFrom<Expr> for Endpoint {
    type Error = Error;

    fn try_from(expr: Expr) -> Result<Self> {
        match expr {
            Expr::Identifier(ident) => Ok(Endpoint::Identifier(ident)),
            Expr::Node(node) => Ok(Endpoint::Node(node)),
            Expr::Literal(lit) if !lit.is_raw() => match lit.into_value() {
                Value::String(name) => Ok(Endpoint::from(name)),
                other => Err(endpoint_error(other.type_name())),
            },
            other => Err(endpoint_error(other.kind_name())),
        }
    }
}

fn endpoint_error(got: &str) -> Error {
    tracing::debug!(got, "rejected relationship endpoint");
    Error::TypeConstraint {
        expected: "endpoint must be an identifier or node".into(),
        got: got.into(),
    }
}

// ============================================================================
// Rel
// ============================================================================

/// A graph-edge pattern between two endpoints.
///
/// Directed left-to-right by default. Types starting with `*` are
/// variable-length specs and are emitted verbatim after the type list.
#[derive(Debug, Clone, PartialEq)]
pub struct Rel {
    start: Endpoint,
    end: Endpoint,
    identifier: Option<Identifier>,
    types: SmallVec<[String; 2]>,
    props: Option<PropertyMap>,
    reverse: bool,
    directed: bool,
}

impl Rel {
    pub fn new(start: impl Into<Endpoint>, end: impl Into<Endpoint>) -> Self {
        Self {
            start: start.into(),
            end: end.into(),
            identifier: None,
            types: SmallVec::new(),
            props: None,
            reverse: false,
            directed: true,
        }
    }

    /// Build from arbitrary expressions, rejecting endpoints that are not an
    /// identifier, a node, or a plain name.
    pub fn try_new(start: impl Into<Expr>, end: impl Into<Expr>) -> Result<Self> {
        Ok(Self::new(Endpoint::try_from(start.into())?, Endpoint::try_from(end.into())?))
    }

    pub fn with_identifier(mut self, name: impl Into<String>) -> Self {
        self.identifier = Some(Identifier::new(name));
        self
    }

    pub fn rel_type(mut self, rel_type: impl Into<String>) -> Self {
        self.types.push(rel_type.into());
        self
    }

    /// Alternatives joined with `|`.
    pub fn rel_types(mut self, types: impl IntoIterator<Item = impl Into<String>>) -> Self {
        self.types.extend(types.into_iter().map(Into::into));
        self
    }

    pub fn props(mut self, props: impl Into<PropertyMap>) -> Self {
        self.props = Some(props.into());
        self
    }

    pub fn prop(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.props.get_or_insert_with(PropertyMap::new).insert(key, value);
        self
    }

    /// Point the arrow right-to-left: `(a)<-[]-(b)`.
    pub fn reverse(mut self) -> Self {
        self.reverse = true;
        self
    }

    /// Drop the arrow head: `(a)-[]-(b)`.
    pub fn undirected(mut self) -> Self {
        self.directed = false;
        self
    }

    pub fn start(&self) -> &Endpoint { &self.start }
    pub fn end(&self) -> &Endpoint { &self.end }
    pub fn identifier(&self) -> Option<&Identifier> { self.identifier.as_ref() }
    pub fn type_names(&self) -> &[String] { &self.types }

    pub fn direction(&self) -> Direction {
        match (self.directed, self.reverse) {
            (false, _) => Direction::Both,
            (true, true) => Direction::Incoming,
            (true, false) => Direction::Outgoing,
        }
    }

    /// Everything after the start endpoint: arrows, bracket and end.
    ///
    /// Paths use this to chain segments without repeating shared endpoints.
    pub(crate) fn segment_tokens(&self) -> Tokens<'_> {
        let (left, right) = self.direction().arrows();
        let props = self.props.as_ref().filter(|p| !p.is_empty());

        let mut toks = Tokens::new();
        toks.push(Token::text(left));

        if self.identifier.is_some() || !self.types.is_empty() || props.is_some() {
            toks.push(Token::text("["));
            if let Some(ident) = &self.identifier {
                toks.push(Token::node(ident));
            }

            let (var_length, named): (Vec<&String>, Vec<&String>) =
                self.types.iter().partition(|t| t.starts_with('*'));
            for (i, t) in named.into_iter().enumerate() {
                toks.push(Token::text(if i == 0 { ":" } else { "|" }));
                toks.push(Token::Text(quote_identifier(t)));
            }
            for t in var_length {
                toks.push(Token::text(t));
            }

            if let Some(props) = props {
                if self.identifier.is_some() || !self.types.is_empty() {
                    toks.push(Token::text(" "));
                }
                toks.extend(map_tokens(props));
            }
            toks.push(Token::text("]"));
        }

        toks.push(Token::text(right));
        toks.push(Token::node(&self.end));
        toks
    }
}

impl Render for Rel {
    fn tokens(&self) -> Tokens<'_> {
        let mut toks = Tokens::new();
        toks.push(Token::node(&self.start));
        toks.extend(self.segment_tokens());
        toks
    }

    fn reference(&self) -> Option<&Identifier> {
        self.identifier.as_ref()
    }
}

impl_display_via_render!(Endpoint, Rel);

#[cfg(test)]
mod tests {
    use super::*;
    use crate::props;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_plain_names_become_nodes() {
        assert_eq!(Rel::new("a", "b").render(), "(a)-->(b)");
    }

    #[test]
    fn test_identifier_endpoints_stay_bare() {
        let rel = Rel::new(Identifier::new("a"), Identifier::new("b"));
        assert_eq!(rel.render(), "a-->b");
    }

    #[test]
    fn test_directions() {
        assert_eq!(Rel::new("a", "b").rel_type("KNOWS").render(), "(a)-[:KNOWS]->(b)");
        assert_eq!(Rel::new("a", "b").rel_type("KNOWS").reverse().render(), "(a)<-[:KNOWS]-(b)");
        assert_eq!(Rel::new("a", "b").rel_type("KNOWS").undirected().render(), "(a)-[:KNOWS]-(b)");
        assert_eq!(Rel::new("a", "b").reverse().undirected().render(), "(a)--(b)");
    }

    #[test]
    fn test_bracket_contents() {
        let rel = Rel::new(Node::named("a").label("Person"), "b")
            .with_identifier("r")
            .rel_types(["KNOWS", "LIKES"])
            .props(props! { "since" => 2020 });
        assert_eq!(rel.render(), "(a:Person)-[r:KNOWS|LIKES {since: 2020}]->(b)");

        assert_eq!(Rel::new("a", "b").with_identifier("r").render(), "(a)-[r]->(b)");
        assert_eq!(Rel::new("a", "b").prop("w", 1.5).render(), "(a)-[{w: 1.5}]->(b)");
    }

    #[test]
    fn test_variable_length_types_verbatim() {
        assert_eq!(Rel::new("a", "b").rel_type("*").render(), "(a)-[*]->(b)");
        assert_eq!(Rel::new("a", "b").rel_type("*1..3").render(), "(a)-[*1..3]->(b)");
        assert_eq!(
            Rel::new("a", "b").rel_types(["KNOWS", "*..5"]).render(),
            "(a)-[:KNOWS*..5]->(b)"
        );
    }

    #[test]
    fn test_type_names_quoted() {
        assert_eq!(Rel::new("a", "b").rel_type("WORKS AT").render(), "(a)-[:`WORKS AT`]->(b)");
    }

    #[test]
    fn test_try_new_rejects_non_endpoints() {
        let err = Rel::try_new(Expr::from(42), "b").unwrap_err();
        match err {
            Error::TypeConstraint { expected, got } => {
                assert!(expected.contains("identifier or node"));
                assert_eq!(got, "INTEGER");
            }
            other => panic!("unexpected error: {other}"),
        }

        let err = Rel::try_new(Node::named("a"), crate::cypher::Property::new("x")).unwrap_err();
        assert!(matches!(err, Error::TypeConstraint { .. }));
    }

    #[test]
    fn test_try_new_accepts_names_identifiers_and_nodes() {
        let rel = Rel::try_new("a", Node::named("b").label("City")).unwrap();
        assert_eq!(rel.render(), "(a)-->(b:City)");
        let rel = Rel::try_new(Identifier::new("a"), "b").unwrap();
        assert_eq!(rel.render(), "a-->(b)");
    }
}
