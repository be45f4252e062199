//! # Values and Graph Patterns
//!
//! The data half of the query tree: host values that become literals, and
//! the node / relationship / path patterns that describe graph shapes.
//! Everything here is plain owned data and renders itself through
//! [`Render`](crate::cypher::Render).

pub mod node;
pub mod relationship;
pub mod path;
pub mod value;
pub mod property_map;

pub use node::Node;
pub use relationship::{Direction, Endpoint, Rel};
pub use path::Path;
pub use value::Value;
pub use property_map::PropertyMap;
