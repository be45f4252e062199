//! Node pattern: `(alias:Label1:Label2 {prop: value})`.

use smallvec::SmallVec;

use crate::cypher::expr::map_tokens;
use crate::cypher::identifier::quote_identifier;
use crate::cypher::token::{impl_display_via_render, Render, Token, Tokens};
use crate::cypher::Identifier;
use super::{PropertyMap, Value};

/// A graph-vertex pattern.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Node {
    identifier: Option<Identifier>,
    labels: SmallVec<[String; 2]>,
    props: Option<PropertyMap>,
}

impl Node {
    /// Anonymous node: `()`.
    pub fn new() -> Self {
        Self::default()
    }

    /// Named node: `(name)`.
    pub fn named(name: impl Into<String>) -> Self {
        Self::new().with_identifier(name)
    }

    pub fn with_identifier(mut self, name: impl Into<String>) -> Self {
        self.identifier = Some(Identifier::new(name));
        self
    }

    pub fn label(mut self, label: impl Into<String>) -> Self {
        self.labels.push(label.into());
        self
    }

    pub fn labels(mut self, labels: impl IntoIterator<Item = impl Into<String>>) -> Self {
        self.labels.extend(labels.into_iter().map(Into::into));
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

    pub fn identifier(&self) -> Option<&Identifier> { self.identifier.as_ref() }
    pub fn label_names(&self) -> &[String] { &self.labels }
    pub fn properties(&self) -> Option<&PropertyMap> { self.props.as_ref() }

    pub fn has_label(&self, label: &str) -> bool {
        self.labels.iter().any(|l| l == label)
    }
}

/// Colon-prefixed label list: `:A:B`.
pub(crate) fn label_tokens<'a>(labels: &'a [String], toks: &mut Tokens<'a>) {
    for label in labels {
        toks.push(Token::text(":"));
        toks.push(Token::Text(quote_identifier(label)));
    }
}

impl Render for Node {
    fn tokens(&self) -> Tokens<'_> {
        let mut toks = Tokens::new();
        toks.push(Token::text("("));
        if let Some(ident) = &self.identifier {
            toks.push(Token::node(ident));
        }
        label_tokens(&self.labels, &mut toks);
        if let Some(props) = self.props.as_ref().filter(|p| !p.is_empty()) {
            if self.identifier.is_some() || !self.labels.is_empty() {
                toks.push(Token::text(" "));
            }
            toks.extend(map_tokens(props));
        }
        toks.push(Token::text(")"));
        toks
    }

    fn reference(&self) -> Option<&Identifier> {
        self.identifier.as_ref()
    }
}

impl_display_via_render!(Node);

#[cfg(test)]
mod tests {
    use super::*;
    use crate::props;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_node_forms() {
        assert_eq!(Node::new().render(), "()");
        assert_eq!(Node::named("n").render(), "(n)");
        assert_eq!(Node::new().label("Person").render(), "(:Person)");
        assert_eq!(Node::named("n").labels(["Person", "Admin"]).render(), "(n:Person:Admin)");
    }

    #[test]
    fn test_node_with_props() {
        let n = Node::named("n").label("Person").props(props! { "name" => "Ada" });
        assert_eq!(n.render(), "(n:Person {name: 'Ada'})");
        assert_eq!(Node::new().prop("age", 3).render(), "({age: 3})");
    }

    #[test]
    fn test_empty_props_omitted() {
        assert_eq!(Node::named("n").props(PropertyMap::new()).render(), "(n)");
    }

    #[test]
    fn test_labels_are_quoted() {
        assert_eq!(Node::named("n").label("Big Cat").render(), "(n:`Big Cat`)");
    }

    #[test]
    fn test_reference_is_identifier() {
        assert_eq!(Node::named("n").reference().map(|i| i.render()), Some("n".to_string()));
        assert!(Node::new().label("X").reference().is_none());
    }
}
