//! Path: a chain of relationship segments forming one pattern.

use crate::cypher::token::{impl_display_via_render, Render, Token, Tokens};
use crate::cypher::Identifier;
use crate::{Error, Result};
use super::Rel;

/// A path pattern: `p = (a)-[:R]->(b)<-[:S]-(c) ...`
///
/// Each segment must start where the previous one ended (compared by
/// rendered text). Shared endpoints are written once.
#[derive(Debug, Clone, PartialEq)]
pub struct Path {
    segments: Vec<Rel>,
    identifier: Option<Identifier>,
}

impl Path {
    /// Build a path from one or more segments.
    pub fn new(segments: impl IntoIterator<Item = Rel>) -> Result<Self> {
        let segments: Vec<Rel> = segments.into_iter().collect();
        if segments.is_empty() {
            tracing::debug!("rejected empty path");
            return Err(Error::StructuralConstraint("path requires at least one relationship".into()));
        }
        for (i, pair) in segments.windows(2).enumerate() {
            check_continuity(i, &pair[0], &pair[1])?;
        }
        Ok(Self { segments, identifier: None })
    }

    /// Append a segment that starts where this path ends.
    pub fn then(mut self, rel: Rel) -> Result<Self> {
        if let Some(last) = self.segments.last() {
            check_continuity(self.segments.len() - 1, last, &rel)?;
        }
        self.segments.push(rel);
        Ok(self)
    }

    pub fn with_identifier(mut self, name: impl Into<String>) -> Self {
        self.identifier = Some(Identifier::new(name));
        self
    }

    pub fn identifier(&self) -> Option<&Identifier> { self.identifier.as_ref() }
    pub fn segments(&self) -> &[Rel] { &self.segments }

    pub fn len(&self) -> usize { self.segments.len() }
    pub fn is_empty(&self) -> bool { self.segments.is_empty() }
}

fn check_continuity(index: usize, prev: &Rel, next: &Rel) -> Result<()> {
    let end = prev.end().render();
    let start = next.start().render();
    if end == start {
        return Ok(());
    }
    tracing::debug!(segment = index + 1, %end, %start, "path segments do not connect");
    Err(Error::StructuralConstraint(format!(
        "start is not the end: segment {} starts at {start} but segment {index} ends at {end}",
        index + 1,
    )))
}

impl Render for Path {
    fn tokens(&self) -> Tokens<'_> {
        let mut toks = Tokens::new();
        if let Some(ident) = &self.identifier {
            toks.push(Token::node(ident));
            toks.push(Token::text(" = "));
        }
        for (i, rel) in self.segments.iter().enumerate() {
            if i == 0 {
                toks.push(Token::node(rel.start()));
            }
            toks.extend(rel.segment_tokens());
        }
        toks
    }

    fn reference(&self) -> Option<&Identifier> {
        self.identifier.as_ref()
    }
}

impl_display_via_render!(Path);

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Node;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_shared_endpoint_written_once() {
        let path = Path::new([
            Rel::new("A", "B").with_identifier("r1"),
            Rel::new("B", "C").with_identifier("r2"),
        ])
        .unwrap();
        assert_eq!(path.render(), "(A)-[r1]->(B)-[r2]->(C)");
    }

    #[test]
    fn test_disconnected_segments_rejected() {
        let err = Path::new([
            Rel::new("A", "B").with_identifier("r1"),
            Rel::new("C", "D").with_identifier("r2"),
        ])
        .unwrap_err();
        match err {
            Error::StructuralConstraint(msg) => assert!(msg.contains("start is not the end")),
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_endpoints_compared_by_rendering() {
        // (B) and a bare B render differently, so they do not connect.
        let err = Path::new([
            Rel::new("A", "B"),
            Rel::new(Identifier::new("B"), "C"),
        ]);
        assert!(err.is_err());

        let ok = Path::new([
            Rel::new("A", Node::named("B").label("Hub")),
            Rel::new(Node::named("B").label("Hub"), "C").reverse(),
        ])
        .unwrap();
        assert_eq!(ok.render(), "(A)-->(B:Hub)<--(C)");
    }

    #[test]
    fn test_empty_path_rejected() {
        assert!(matches!(Path::new(Vec::new()), Err(Error::StructuralConstraint(_))));
    }

    #[test]
    fn test_named_path_and_then() {
        let path = Path::new([Rel::new("a", "b").rel_type("R")])
            .unwrap()
            .then(Rel::new("b", "c").rel_type("S").undirected())
            .unwrap()
            .with_identifier("p");
        assert_eq!(path.render(), "p = (a)-[:R]->(b)-[:S]-(c)");
        assert_eq!(path.reference().map(|i| i.name()), Some("p"));

        assert!(path.then(Rel::new("x", "y")).is_err());
    }
}
