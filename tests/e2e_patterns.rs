//! End-to-end tests for graph patterns: nodes, relationships and paths.

use cypher_builder::{
    props, Clause, Direction, Error, Expr, Identifier, MapLiteral, Node, Path, Rel, Render,
};
use pretty_assertions::assert_eq;

// ============================================================================
// 1. Path continuity
// ============================================================================

#[test]
fn test_path_shares_endpoint_once() {
    let path = Path::new([
        Rel::new("A", "B").with_identifier("r1"),
        Rel::new("B", "C").with_identifier("r2"),
    ])
    .unwrap();
    assert_eq!(path.render(), "(A)-[r1]->(B)-[r2]->(C)");
    assert_eq!(path.render().matches("(B)").count(), 1);
}

#[test]
fn test_path_without_shared_endpoint_fails() {
    let result = Path::new([
        Rel::new("A", "B").with_identifier("r1"),
        Rel::new("C", "D").with_identifier("r2"),
    ]);
    assert!(matches!(result, Err(Error::StructuralConstraint(_))));
}

#[test]
fn test_long_mixed_direction_path() {
    let hub = || Node::named("h").label("Hub");
    let path = Path::new([
        Rel::new("a", hub()).rel_type("IN"),
        Rel::new(hub(), "b").rel_type("OUT").reverse(),
        Rel::new("b", "c").undirected(),
    ])
    .unwrap()
    .with_identifier("p");

    assert_eq!(path.render(), "p = (a)-[:IN]->(h:Hub)<-[:OUT]-(b)--(c)");

    let query = Clause::match_([path]);
    assert_eq!(query.render(), "MATCH p = (a)-[:IN]->(h:Hub)<-[:OUT]-(b)--(c)");
}

// ============================================================================
// 2. Relationship endpoints
// ============================================================================

#[test]
fn test_endpoint_must_be_identifier_or_node() {
    for bad in [Expr::from(1), Expr::from(MapLiteral::new(props! { "a" => 1 })), Expr::raw("x")] {
        let err = Rel::try_new(bad, "b").unwrap_err();
        match err {
            Error::TypeConstraint { expected, .. } => {
                assert_eq!(expected, "endpoint must be an identifier or node")
            }
            other => panic!("unexpected error: {other}"),
        }
    }
}

#[test]
fn test_endpoint_forms() {
    let rel = Rel::try_new(Expr::ident("a"), Node::new().label("City")).unwrap();
    assert_eq!(rel.render(), "a-->(:City)");
    assert_eq!(rel.direction(), Direction::Outgoing);

    let rel = Rel::new(Identifier::new("a"), "b").reverse();
    assert_eq!(rel.render(), "a<--(b)");
    assert_eq!(rel.direction(), Direction::Incoming);
}

// ============================================================================
// 3. Relationship detail
// ============================================================================

#[test]
fn test_relationship_everything() {
    let rel = Rel::new(Node::named("a").label("Person"), Node::named("b").label("Person"))
        .with_identifier("r")
        .rel_types(["KNOWS", "WORKS_WITH"])
        .props(props! { "since" => 2019, "strength" => 0.75 });
    assert_eq!(
        rel.render(),
        "(a:Person)-[r:KNOWS|WORKS_WITH {since: 2019, strength: 0.75}]->(b:Person)"
    );
}

#[test]
fn test_variable_length_traversal() {
    let rel = Rel::new("a", "b").with_identifier("r").rel_type("*2..4").undirected();
    assert_eq!(rel.render(), "(a)-[r*2..4]-(b)");
}

#[test]
fn test_return_relationship_by_name() {
    let rel = Rel::new("a", "b").with_identifier("r").rel_type("KNOWS");
    let ret = Clause::return_(cypher_builder::Projection::new([rel]));
    assert_eq!(ret.render(), "RETURN r");
}

// ============================================================================
// 4. Node detail
// ============================================================================

#[test]
fn test_node_escaping() {
    let node = Node::named("my node")
        .labels(["Person", "Big-Label"])
        .props(props! { "it's" => "O'Brien", "list" => vec![1, 2] });
    assert_eq!(
        node.render(),
        "(`my node`:Person:`Big-Label` {`it's`: 'O\\'Brien', list: [1, 2]})"
    );
}
