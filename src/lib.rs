//! # cypher-builder: Compositional Cypher Query Builder
//!
//! Build a tree of typed query nodes and render it into Cypher text.
//! The builder never parses or executes queries; it only emits them.
//!
//! ## Design Principles
//!
//! 1. **Render-first**: every node implements [`Render`] and decides its own text
//! 2. **Escaping is total**: any string is representable as a literal or identifier
//! 3. **Validate at construction**: invalid shapes fail in constructors, rendering never fails
//! 4. **Owned trees**: nodes are plain data, `Send + Sync`, renderable from any thread
//!
//! ## Quick Start
//!
//! ```rust
//! use cypher_builder::{props, Clause, Node, Projection, Query, Rel, Render};
//!
//! # fn example() -> cypher_builder::Result<()> {
//! let ada = Node::named("a").label("Person").props(props! { "name" => "Ada" });
//! let knows = Rel::new(ada, Node::named("b").label("Person")).rel_type("KNOWS");
//!
//! let query = Query::new([
//!     Clause::match_([knows]),
//!     Clause::return_(Projection::new([cypher_builder::Expr::ident("b")]).distinct()),
//!     Clause::limit(10)?,
//! ]);
//!
//! assert_eq!(
//!     query.render(),
//!     "MATCH (a:Person {name: 'Ada'})-[:KNOWS]->(b:Person)\nRETURN DISTINCT b\nLIMIT 10"
//! );
//! # Ok(())
//! # }
//! # example().unwrap();
//! ```
//!
//! ## Layers
//!
//! | Layer | Module | Contents |
//! |-------|--------|----------|
//! | Values & patterns | `model` | `Value`, `PropertyMap`, `Node`, `Rel`, `Path` |
//! | Expressions | `cypher` | `Identifier`, `Literal`, maps, predicates, functions |
//! | Statements | `cypher` | `Clause`, `Projection`, `Merge`, `Query` |
//! | Templates | `templates` | `exists`, `get` |

// ============================================================================
// Modules
// ============================================================================

pub mod model;
pub mod cypher;
pub mod templates;

// ============================================================================
// Re-exports: Model
// ============================================================================

pub use model::{
    Node, Rel, Path, Endpoint, Direction, Value, PropertyMap,
};

// ============================================================================
// Re-exports: Rendering
// ============================================================================

pub use cypher::{
    Render, Token, Tokens, Delimiter, delimit,
    Identifier, Literal, Expr,
    MapLiteral, Collection, Property, Properties, Function, SortItem, SortOrder,
    Predicate, PredicateList, Not,
};

// ============================================================================
// Re-exports: Statements
// ============================================================================

pub use cypher::{Clause, Projection, Merge, SchemaTarget, Query, QueryConfig};

// ============================================================================
// Error Types
// ============================================================================

#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// A value has the wrong shape for where it is used.
    #[error("Type constraint violated: expected {expected}, got {got}")]
    TypeConstraint { expected: String, got: String },

    /// A composite's parts do not fit together.
    #[error("Structural constraint violated: {0}")]
    StructuralConstraint(String),

    #[error("Config error: {0}")]
    Config(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, Error>;

macro_rules! assert_send_sync {
    ($($t:ty),+ $(,)?) => {
        $(const _: () = {
            const fn _assert_send<T: ?Sized + Send>() {}
            const fn _assert_sync<T: ?Sized + Sync>() {}
            _assert_send::<$t>();
            _assert_sync::<$t>();
        };)+
    };
}

assert_send_sync!(Value, Node, Rel, Path, Expr, Clause, Query, Error);
