//! End-to-end tests for full query assembly.
//!
//! Each test builds a query tree through the public API and checks the
//! exact Cypher text it renders to.

use cypher_builder::{
    props, templates, Clause, Error, Expr, Function, Merge, Node, Predicate, PredicateList,
    Projection, Properties, Property, Query, QueryConfig, Rel, Render, SortItem, Value,
};
use pretty_assertions::assert_eq;

fn person(name: &str) -> Node {
    Node::named(name).label("Person")
}

// ============================================================================
// 1. MATCH ... WHERE ... RETURN ... ORDER BY ... SKIP ... LIMIT
// ============================================================================

#[test]
fn test_read_query() {
    let query = Query::new([
        Clause::match_([Rel::new(person("a"), person("b")).rel_type("KNOWS")]),
        Clause::where_([PredicateList::all([
            Predicate::compare(Property::new("age").of("a"), ">=", 18),
            Predicate::compare(Property::new("name").of("b"), "=~", "A.*"),
        ])]),
        Clause::return_(
            Projection::new([
                Expr::from(person("a")),
                Function::new("count").arg(Expr::ident("b")).into(),
            ])
            .order_by([SortItem::desc(Property::new("age").of("a"))])
            .skip(5)
            .limit(10),
        ),
    ]);

    assert_eq!(
        query.render(),
        "MATCH (a:Person)-[:KNOWS]->(b:Person)\n\
         WHERE (a.age >= 18 AND b.name =~ 'A.*')\n\
         RETURN a, count(b) ORDER BY a.age DESC SKIP 5 LIMIT 10"
    );
}

// ============================================================================
// 2. RETURN DISTINCT with a named node payload
// ============================================================================

#[test]
fn test_return_distinct_named_node() {
    let ret = Clause::return_(Projection::new([Node::named("n")]).distinct());
    assert_eq!(ret.render(), "RETURN DISTINCT n");
}

// ============================================================================
// 3. Standalone ORDER BY / SKIP / LIMIT clauses
// ============================================================================

#[test]
fn test_standalone_paging_clauses() -> cypher_builder::Result<()> {
    let query = Query::new([
        Clause::match_([person("n")]),
        Clause::return_(Projection::new([person("n")])),
        Clause::order_by([SortItem::asc(Property::new("name").of("n"))]),
        Clause::skip(20)?,
        Clause::limit(10)?,
    ])
    .with_delimiter(" ");

    assert_eq!(
        query.render(),
        "MATCH (n:Person) RETURN n ORDER BY n.name ASC SKIP 20 LIMIT 10"
    );
    Ok(())
}

#[test]
fn test_skip_rejects_non_integer_before_rendering() {
    let err = Clause::skip("ten").unwrap_err();
    match err {
        Error::TypeConstraint { expected, got } => {
            assert!(expected.contains("SKIP"));
            assert_eq!(got, "STRING");
        }
        other => panic!("unexpected error: {other}"),
    }
    assert!(Clause::limit(Value::Float(2.0)).is_err());
}

// ============================================================================
// 4. Write queries: CREATE, SET, MERGE, DELETE
// ============================================================================

#[test]
fn test_create_and_set() {
    let query = Query::new([
        Clause::create([person("n").props(props! { "name" => "Ada", "age" => 36 })]),
        Clause::set([Properties::new(props! { "verified" => true, "score" => 0.5 }).of("n")]),
        Clause::return_(Projection::new([person("n")])),
    ]);

    assert_eq!(
        query.render(),
        "CREATE (n:Person {name: 'Ada', age: 36})\n\
         SET n.verified = TRUE, n.score = 0.5\n\
         RETURN n"
    );
}

#[test]
fn test_set_map_assignment() {
    let set = Clause::set([cypher_builder::MapLiteral::new(props! { "name" => "Bob" }).assign_to("n")]);
    assert_eq!(set.render(), "SET n = {name: 'Bob'}");
}

#[test]
fn test_merge_upsert() {
    let query = Query::new([
        Clause::merge(
            Merge::new(person("n").prop("email", "ada@example.com"))
                .on_create(Property::new("created").of("n").assign(Expr::raw("timestamp()")))
                .on_match(Property::new("visits").of("n").assign(Expr::raw("n.visits + 1"))),
        ),
        Clause::return_(Projection::new([person("n")])),
    ]);

    assert_eq!(
        query.render(),
        "MERGE (n:Person {email: 'ada@example.com'}) \
         ON CREATE SET n.created = timestamp() \
         ON MATCH SET n.visits = n.visits + 1\n\
         RETURN n"
    );
}

#[test]
fn test_match_detach_delete() {
    let query = Query::new([
        Clause::match_([person("n").prop("name", "Eve")]),
        Clause::detach_delete([person("n")]),
    ]);
    assert_eq!(query.render(), "MATCH (n:Person {name: 'Eve'})\nDETACH DELETE n");
}

// ============================================================================
// 5. WITH pipelines and UNION
// ============================================================================

#[test]
fn test_with_pipeline() {
    let query = Query::new([
        Clause::match_([Rel::new(person("a"), "f").rel_type("FOLLOWS")]),
        Clause::with(Projection::new([
            Expr::from(person("a")),
            Function::new("count").arg(Expr::ident("f")).into(),
        ])),
        Clause::where_([Predicate::compare(Expr::raw("count(f)"), ">", 100)]),
        Clause::return_(Projection::new([Property::new("name").of("a")])),
    ]);

    assert_eq!(
        query.render(),
        "MATCH (a:Person)-[:FOLLOWS]->(f)\n\
         WITH a, count(f)\n\
         WHERE count(f) > 100\n\
         RETURN a.name"
    );
}

#[test]
fn test_union_all() {
    let people = Query::new([
        Clause::match_([person("n")]),
        Clause::return_(Projection::new([Property::new("name").of("n")])),
    ]);
    let robots = Query::new([
        Clause::match_([Node::named("n").label("Robot")]),
        Clause::return_(Projection::new([Property::new("name").of("n")])),
    ]);

    let query = people.union(robots, true).with_config(&QueryConfig::single_line());
    assert_eq!(
        query.render(),
        "MATCH (n:Person) RETURN n.name UNION ALL MATCH (n:Robot) RETURN n.name"
    );
}

// ============================================================================
// 6. Schema DDL
// ============================================================================

#[test]
fn test_schema_statements() {
    let query = Query::new([
        Clause::create_index("Person", "name"),
        Clause::create_constraint("Person", "email"),
    ]);
    assert_eq!(
        query.render(),
        "CREATE INDEX ON :Person(name)\n\
         CREATE CONSTRAINT ON (n:Person) ASSERT n.email IS UNIQUE"
    );
}

// ============================================================================
// 7. Templates
// ============================================================================

#[test]
fn test_exists_template() {
    let query = templates::exists(Node::new().label("Person").prop("name", "Ada")).unwrap();
    assert_eq!(
        query.render(),
        "OPTIONAL MATCH (v:Person {name: 'Ada'})\nRETURN v IS NOT NULL\nLIMIT 1"
    );
}

#[test]
fn test_get_template() {
    let query = templates::get(person("p")).unwrap();
    assert_eq!(query.render(), "MATCH (p:Person)\nRETURN p");
}

// ============================================================================
// 8. Rendering is idempotent and thread-safe
// ============================================================================

#[test]
fn test_render_twice_and_across_threads() {
    let query = Query::new([
        Clause::match_([person("n")]),
        Clause::return_(Projection::new([person("n")])),
    ]);
    let first = query.render();
    assert_eq!(first, query.render());

    let shared = std::sync::Arc::new(query);
    let handles: Vec<_> = (0..4)
        .map(|_| {
            let q = std::sync::Arc::clone(&shared);
            std::thread::spawn(move || q.render())
        })
        .collect();
    for handle in handles {
        assert_eq!(handle.join().unwrap(), first);
    }
}
