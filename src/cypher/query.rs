//! Query assembly: an ordered list of clauses joined into one statement.

use serde::{Deserialize, Serialize};

use crate::Result;
use super::clause::Clause;
use super::token::{delimit, impl_display_via_render, Render, Token, Tokens};

/// Default text placed between clauses.
pub const DEFAULT_DELIMITER: &str = "\n";

// ============================================================================
// Configuration
// ============================================================================

/// Rendering options for [`Query`].
///
/// ```
/// use cypher_builder::QueryConfig;
///
/// let config = QueryConfig::from_json(r#"{"delimiter": " "}"#).unwrap();
/// assert_eq!(config.delimiter, " ");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct QueryConfig {
    /// Placed between consecutive clauses.
    pub delimiter: String,
}

impl Default for QueryConfig {
    fn default() -> Self {
        Self { delimiter: DEFAULT_DELIMITER.to_string() }
    }
}

impl QueryConfig {
    /// Parse a JSON configuration; missing fields take their defaults.
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Single-line output: clauses separated by one space.
    pub fn single_line() -> Self {
        Self { delimiter: " ".to_string() }
    }
}

// ============================================================================
// Query
// ============================================================================

/// A full statement: clauses in caller order.
///
/// Clause order is not validated; the caller is responsible for producing
/// a sensible sequence.
#[derive(Debug, Clone, PartialEq)]
pub struct Query {
    clauses: Vec<Clause>,
    delimiter: String,
}

impl Query {
    pub fn new(clauses: impl IntoIterator<Item = Clause>) -> Self {
        Self { clauses: clauses.into_iter().collect(), delimiter: DEFAULT_DELIMITER.to_string() }
    }

    /// Append a clause.
    pub fn then(mut self, clause: Clause) -> Self {
        self.clauses.push(clause);
        self
    }

    pub fn with_delimiter(mut self, delimiter: impl Into<String>) -> Self {
        self.delimiter = delimiter.into();
        self
    }

    pub fn with_config(mut self, config: &QueryConfig) -> Self {
        self.delimiter.clone_from(&config.delimiter);
        self
    }

    /// `self UNION [ALL] other`. Keeps this query's delimiter.
    pub fn union(mut self, other: Query, all: bool) -> Self {
        self.clauses.push(if all { Clause::UnionAll } else { Clause::Union });
        self.clauses.extend(other.clauses);
        self
    }

    pub fn clauses(&self) -> &[Clause] { &self.clauses }
    pub fn delimiter(&self) -> &str { &self.delimiter }
}

impl Render for Query {
    fn tokens(&self) -> Tokens<'_> {
        tracing::trace!(clauses = self.clauses.len(), "assembling query");
        delimit(self.clauses.iter().map(|c| Token::node(c)), self.delimiter.as_str())
    }
}

impl FromIterator<Clause> for Query {
    fn from_iter<I: IntoIterator<Item = Clause>>(iter: I) -> Self {
        Query::new(iter)
    }
}

impl_display_via_render!(Query);

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cypher::{Expr, Projection};
    use crate::model::Node;
    use crate::Error;
    use pretty_assertions::assert_eq;

    fn match_return(label: &str) -> Query {
        Query::new([
            Clause::match_([Node::named("n").label(label)]),
            Clause::return_(Projection::new([Expr::ident("n")])),
        ])
    }

    #[test]
    fn test_default_newline_delimiter() {
        assert_eq!(match_return("Person").render(), "MATCH (n:Person)\nRETURN n");
    }

    #[test]
    fn test_custom_delimiter() {
        let q = match_return("Person").with_delimiter(" ");
        assert_eq!(q.render(), "MATCH (n:Person) RETURN n");
        let q = match_return("Person").with_config(&QueryConfig::single_line());
        assert_eq!(q.to_string(), "MATCH (n:Person) RETURN n");
    }

    #[test]
    fn test_empty_query() {
        assert_eq!(Query::new(Vec::<Clause>::new()).render(), "");
    }

    #[test]
    fn test_then_appends() {
        let q = match_return("Person").then(Clause::limit(3).unwrap());
        assert_eq!(q.render(), "MATCH (n:Person)\nRETURN n\nLIMIT 3");
    }

    #[test]
    fn test_union() {
        let q = match_return("Person").union(match_return("Robot"), false);
        assert_eq!(q.render(), "MATCH (n:Person)\nRETURN n\nUNION\nMATCH (n:Robot)\nRETURN n");
        let q = match_return("A").union(match_return("B"), true).with_delimiter(" ");
        assert_eq!(q.render(), "MATCH (n:A) RETURN n UNION ALL MATCH (n:B) RETURN n");
    }

    #[test]
    fn test_config_from_json() {
        assert_eq!(QueryConfig::from_json("{}").unwrap(), QueryConfig::default());
        assert_eq!(QueryConfig::from_json(r#"{"delimiter": "; "}"#).unwrap().delimiter, "; ");
        assert!(matches!(QueryConfig::from_json("{"), Err(Error::Config(_))));
    }
}
