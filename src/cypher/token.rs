//! Rendering primitive: tokens, the `Render` trait, and `delimit`.
//!
//! Every node in the query tree renders itself as an ordered sequence of
//! tokens. A token is either a text fragment or a nested node; nested nodes
//! are expanded lazily when the stream is flattened.
//!
//! ```text
//! Node { identifier: n, labels: [Person] }
//!   → ["(", <Identifier n>, ":", "Person", ")"]
//!   → ["(", "n", ":", "Person", ")"]
//!   → "(n:Person)"
//! ```

use std::borrow::Cow;
use std::fmt;

use smallvec::SmallVec;

use super::identifier::Identifier;

/// Token stream produced by a single node. Most nodes emit only a handful
/// of tokens, so the stream lives inline until it grows past eight.
pub type Tokens<'a> = SmallVec<[Token<'a>; 8]>;

/// One element of a rendered token stream.
#[derive(Clone)]
pub enum Token<'a> {
    /// Literal text, emitted as-is.
    Text(Cow<'a, str>),
    /// A nested node, expanded when the stream is flattened.
    Node(&'a dyn Render),
}

impl<'a> Token<'a> {
    /// Borrowed text token.
    pub const fn text(s: &'a str) -> Self {
        Token::Text(Cow::Borrowed(s))
    }

    /// Owned text token.
    pub fn owned(s: String) -> Self {
        Token::Text(Cow::Owned(s))
    }

    /// Nested node token.
    pub fn node(node: &'a dyn Render) -> Self {
        Token::Node(node)
    }

    /// Nested node token, substituting the node's reference when it has one.
    ///
    /// Used wherever a named pattern should be referred to by name rather
    /// than redefined (RETURN/WITH payloads, predicate subjects).
    pub fn reference_or_node(node: &'a dyn Render) -> Self {
        match node.reference() {
            Some(ident) => Token::Node(ident),
            None => Token::Node(node),
        }
    }
}

impl<'a> From<&'a str> for Token<'a> {
    fn from(s: &'a str) -> Self { Token::text(s) }
}

impl From<String> for Token<'_> {
    fn from(s: String) -> Self { Token::owned(s) }
}

impl<'a> From<Cow<'a, str>> for Token<'a> {
    fn from(s: Cow<'a, str>) -> Self { Token::Text(s) }
}

impl fmt::Debug for Token<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Token::Text(s) => write!(f, "Text({s:?})"),
            Token::Node(n) => write!(f, "Node({:?})", n.render()),
        }
    }
}

// ============================================================================
// Render trait
// ============================================================================

/// The capability every query node implements.
pub trait Render {
    /// Produce this node's token stream.
    fn tokens(&self) -> Tokens<'_>;

    /// The bare identifier this node can be referred to by, if any.
    ///
    /// Named graph patterns return their identifier so that clauses such as
    /// RETURN emit `n` instead of the full `(n:Person)` definition.
    fn reference(&self) -> Option<&Identifier> {
        None
    }

    /// Flatten the token stream down to text fragments.
    fn flatten(&self) -> Vec<Cow<'_, str>> {
        let mut out = Vec::new();
        flatten_into(self.tokens(), &mut out);
        out
    }

    /// Render the node as Cypher text.
    fn render(&self) -> String {
        self.flatten().concat()
    }
}

fn flatten_into<'a>(tokens: Tokens<'a>, out: &mut Vec<Cow<'a, str>>) {
    for token in tokens {
        match token {
            Token::Text(s) => out.push(s),
            Token::Node(node) => flatten_into(node.tokens(), out),
        }
    }
}

impl<T: Render + ?Sized> Render for Box<T> {
    fn tokens(&self) -> Tokens<'_> { (**self).tokens() }
    fn reference(&self) -> Option<&Identifier> { (**self).reference() }
}

/// Implement `Display` in terms of `Render::render`.
macro_rules! impl_display_via_render {
    ($($ty:ty),* $(,)?) => {
        $(
            impl std::fmt::Display for $ty {
                fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                    f.write_str(&$crate::cypher::token::Render::render(self))
                }
            }
        )*
    };
}
pub(crate) use impl_display_via_render;

// ============================================================================
// Delimiter utility
// ============================================================================

/// A delimiter placed between items by [`delimit`]: plain text or a token
/// sequence.
#[derive(Debug, Clone)]
pub struct Delimiter<'a>(SmallVec<[Token<'a>; 3]>);

impl<'a> From<&'a str> for Delimiter<'a> {
    fn from(s: &'a str) -> Self { Delimiter(smallvec::smallvec![Token::text(s)]) }
}

impl<'a> From<Token<'a>> for Delimiter<'a> {
    fn from(t: Token<'a>) -> Self { Delimiter(smallvec::smallvec![t]) }
}

impl<'a> From<Vec<Token<'a>>> for Delimiter<'a> {
    fn from(v: Vec<Token<'a>>) -> Self { Delimiter(v.into_iter().collect()) }
}

/// Interleave `items` with `delimiter`.
///
/// No leading or trailing delimiter is emitted: `n` items produce exactly
/// `n - 1` delimiter occurrences, and an empty input produces nothing.
pub fn delimit<'a, I>(items: I, delimiter: impl Into<Delimiter<'a>>) -> Tokens<'a>
where
    I: IntoIterator<Item = Token<'a>>,
{
    let delimiter = delimiter.into();
    let mut toks = Tokens::new();
    for (i, item) in items.into_iter().enumerate() {
        if i > 0 {
            toks.extend(delimiter.0.iter().cloned());
        }
        toks.push(item);
    }
    toks
}

/// Render a bare token stream (not owned by any node) to text.
pub fn render_tokens(tokens: Tokens<'_>) -> String {
    let mut out = Vec::new();
    flatten_into(tokens, &mut out);
    out.concat()
}
