//! # Cypher Rendering
//!
//! Query nodes and the clause/query layer on top of them.
//! Pure functions: no I/O, no state; every node renders itself on demand.

pub mod token;
pub mod identifier;
pub mod literal;
pub mod expr;
pub mod predicate;
pub mod clause;
pub mod query;

pub use token::{delimit, Delimiter, Render, Token, Tokens};
pub use identifier::{is_bare_identifier, quote_identifier, Identifier};
pub use literal::{escape_string, quote_string, Literal};
pub use expr::{Collection, Expr, Function, MapLiteral, Properties, Property, SortItem, SortOrder};
pub use predicate::{Not, Predicate, PredicateList};
pub use clause::{Clause, Merge, Projection, SchemaTarget};
pub use query::{Query, QueryConfig, DEFAULT_DELIMITER};
