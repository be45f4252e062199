//! Canned queries built from a single pattern.
//!
//! ```text
//! exists((:Person {name: 'Ada'}))
//!   → OPTIONAL MATCH (v:Person {name: 'Ada'})
//!     RETURN v IS NOT NULL
//!     LIMIT 1
//! ```

use crate::cypher::{Clause, Expr, Identifier, Predicate, Projection, Query, Render};
use crate::{Error, Result};

/// Identifier given to unnamed patterns.
pub const TEMPLATE_VAR: &str = "v";

/// Query testing whether `pattern` matches anything.
pub fn exists(pattern: impl Into<Expr>) -> Result<Query> {
    let (pattern, ident) = named_pattern(pattern.into())?;
    Ok(Query::new([
        Clause::optional_match([pattern]),
        Clause::return_(Projection::new([Predicate::unary(ident, "IS NOT NULL")])),
        Clause::Limit(1),
    ]))
}

/// Query returning everything `pattern` matches.
pub fn get(pattern: impl Into<Expr>) -> Result<Query> {
    let (pattern, ident) = named_pattern(pattern.into())?;
    Ok(Query::new([
        Clause::match_([pattern]),
        Clause::return_(Projection::new([ident])),
    ]))
}

/// Ensure the pattern carries an identifier, naming it [`TEMPLATE_VAR`] if
/// it has none.
fn named_pattern(pattern: Expr) -> Result<(Expr, Identifier)> {
    let pattern = match pattern {
        Expr::Node(node) if node.identifier().is_none() => Expr::Node(node.with_identifier(TEMPLATE_VAR)),
        Expr::Rel(rel) if rel.identifier().is_none() => Expr::Rel(Box::new((*rel).with_identifier(TEMPLATE_VAR))),
        Expr::Path(path) if path.identifier().is_none() => Expr::Path(path.with_identifier(TEMPLATE_VAR)),
        named if named.is_pattern() => named,
        other => {
            tracing::debug!(got = other.kind_name(), "template requires a pattern");
            return Err(Error::TypeConstraint {
                expected: "pattern (node, relationship or path)".into(),
                got: other.kind_name().into(),
            });
        }
    };
    let ident = match pattern.reference() {
        Some(ident) => Identifier::new(ident.name()),
        None => Identifier::new(TEMPLATE_VAR),
    };
    Ok((pattern, ident))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Node, Path, Rel};
    use pretty_assertions::assert_eq;

    #[test]
    fn test_exists_names_anonymous_node() {
        let q = exists(Node::new().label("Person").prop("name", "Ada")).unwrap();
        assert_eq!(
            q.render(),
            "OPTIONAL MATCH (v:Person {name: 'Ada'})\nRETURN v IS NOT NULL\nLIMIT 1"
        );
    }

    #[test]
    fn test_get_keeps_existing_identifier() {
        let q = get(Node::named("p").label("Person")).unwrap();
        assert_eq!(q.render(), "MATCH (p:Person)\nRETURN p");
    }

    #[test]
    fn test_get_relationship_and_path() {
        let q = get(Rel::new("a", "b").rel_type("KNOWS")).unwrap();
        assert_eq!(q.render(), "MATCH (a)-[v:KNOWS]->(b)\nRETURN v");

        let path = Path::new([Rel::new("a", "b")]).unwrap();
        assert_eq!(get(path).unwrap().render(), "MATCH v = (a)-->(b)\nRETURN v");
    }

    #[test]
    fn test_non_pattern_rejected() {
        assert!(matches!(exists(42), Err(Error::TypeConstraint { .. })));
        assert!(matches!(get(Expr::ident("n")), Err(Error::TypeConstraint { .. })));
    }
}
