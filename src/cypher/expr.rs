//! Expressions: the closed set of query nodes, plus the structural
//! composites (maps, collections, property assignments, function calls).

use crate::model::{Node, Path, PropertyMap, Rel, Value};
use super::identifier::{quote_identifier, Identifier};
use super::literal::Literal;
use super::predicate::{Not, Predicate, PredicateList};
use super::token::{delimit, impl_display_via_render, Render, Token, Tokens};

/// Any node that can appear inside a clause payload.
#[derive(Debug, Clone, PartialEq)]
pub enum Expr {
    Literal(Literal),
    Identifier(Identifier),
    Map(MapLiteral),
    Collection(Collection),
    Property(Property),
    Properties(Properties),
    Function(Function),
    Predicate(Box<Predicate>),
    PredicateList(PredicateList),
    Not(Not),
    Sort(Box<SortItem>),
    Node(Node),
    Rel(Box<Rel>),
    Path(Path),
}

impl Expr {
    /// Identifier reference: `Expr::ident("n")` renders `n`.
    pub fn ident(name: impl Into<String>) -> Self {
        Expr::Identifier(Identifier::new(name))
    }

    /// Escaped literal.
    pub fn literal(value: impl Into<Value>) -> Self {
        Expr::Literal(Literal::new(value))
    }

    /// Verbatim fragment, e.g. `Expr::raw("count(*)")`.
    pub fn raw(fragment: impl Into<String>) -> Self {
        Expr::Literal(Literal::raw(fragment))
    }

    /// True for Node, Rel and Path.
    pub fn is_pattern(&self) -> bool {
        matches!(self, Expr::Node(_) | Expr::Rel(_) | Expr::Path(_))
    }

    /// Short uppercase name of the node kind, used in error messages.
    pub fn kind_name(&self) -> &'static str {
        match self {
            Expr::Literal(lit) => lit.value().type_name(),
            Expr::Identifier(_) => "IDENTIFIER",
            Expr::Map(_) => "MAP",
            Expr::Collection(_) => "LIST",
            Expr::Property(_) | Expr::Properties(_) => "PROPERTY",
            Expr::Function(_) => "FUNCTION",
            Expr::Predicate(_) | Expr::PredicateList(_) | Expr::Not(_) => "PREDICATE",
            Expr::Sort(_) => "SORT_ITEM",
            Expr::Node(_) => "NODE",
            Expr::Rel(_) => "RELATIONSHIP",
            Expr::Path(_) => "PATH",
        }
    }

    fn inner(&self) -> &dyn Render {
        match self {
            Expr::Literal(e) => e,
            Expr::Identifier(e) => e,
            Expr::Map(e) => e,
            Expr::Collection(e) => e,
            Expr::Property(e) => e,
            Expr::Properties(e) => e,
            Expr::Function(e) => e,
            Expr::Predicate(e) => e.as_ref(),
            Expr::PredicateList(e) => e,
            Expr::Not(e) => e,
            Expr::Sort(e) => e.as_ref(),
            Expr::Node(e) => e,
            Expr::Rel(e) => e.as_ref(),
            Expr::Path(e) => e,
        }
    }
}

impl Render for Expr {
    fn tokens(&self) -> Tokens<'_> {
        self.inner().tokens()
    }

    fn reference(&self) -> Option<&Identifier> {
        self.inner().reference()
    }
}

impl From<Literal> for Expr { fn from(v: Literal) -> Self { Expr::Literal(v) } }
impl From<Value> for Expr { fn from(v: Value) -> Self { Expr::Literal(Literal::new(v)) } }
impl From<bool> for Expr { fn from(v: bool) -> Self { Expr::literal(v) } }
impl From<i32> for Expr { fn from(v: i32) -> Self { Expr::literal(v) } }
impl From<i64> for Expr { fn from(v: i64) -> Self { Expr::literal(v) } }
impl From<f64> for Expr { fn from(v: f64) -> Self { Expr::literal(v) } }
/// Strings convert to escaped text literals; use [`Expr::ident`] for names.
impl From<&str> for Expr { fn from(v: &str) -> Self { Expr::literal(v) } }
impl From<String> for Expr { fn from(v: String) -> Self { Expr::literal(v) } }
impl From<Identifier> for Expr { fn from(v: Identifier) -> Self { Expr::Identifier(v) } }
impl From<MapLiteral> for Expr { fn from(v: MapLiteral) -> Self { Expr::Map(v) } }
impl From<Collection> for Expr { fn from(v: Collection) -> Self { Expr::Collection(v) } }
impl From<Property> for Expr { fn from(v: Property) -> Self { Expr::Property(v) } }
impl From<Properties> for Expr { fn from(v: Properties) -> Self { Expr::Properties(v) } }
impl From<Function> for Expr { fn from(v: Function) -> Self { Expr::Function(v) } }
impl From<Predicate> for Expr { fn from(v: Predicate) -> Self { Expr::Predicate(Box::new(v)) } }
impl From<PredicateList> for Expr { fn from(v: PredicateList) -> Self { Expr::PredicateList(v) } }
impl From<Not> for Expr { fn from(v: Not) -> Self { Expr::Not(v) } }
impl From<SortItem> for Expr { fn from(v: SortItem) -> Self { Expr::Sort(Box::new(v)) } }
impl From<Node> for Expr { fn from(v: Node) -> Self { Expr::Node(v) } }
impl From<Rel> for Expr { fn from(v: Rel) -> Self { Expr::Rel(Box::new(v)) } }
impl From<Path> for Expr { fn from(v: Path) -> Self { Expr::Path(v) } }

// ============================================================================
// Shared token builders
// ============================================================================

/// `{key: value, ...}` with keys quoted as identifiers.
pub(crate) fn map_tokens(props: &PropertyMap) -> Tokens<'_> {
    let mut toks = Tokens::new();
    toks.push(Token::text("{"));
    for (i, (key, value)) in props.iter().enumerate() {
        if i > 0 {
            toks.push(Token::text(", "));
        }
        toks.push(Token::Text(quote_identifier(key)));
        toks.push(Token::text(": "));
        toks.push(Token::node(value));
    }
    toks.push(Token::text("}"));
    toks
}

/// `[value, ...]`
pub(crate) fn collection_tokens(items: &[Value]) -> Tokens<'_> {
    let mut toks = Tokens::new();
    toks.push(Token::text("["));
    toks.extend(delimit(items.iter().map(|v| Token::node(v)), ", "));
    toks.push(Token::text("]"));
    toks
}

/// `[owner.]key[ = value]`
fn property_tokens<'a>(owner: Option<&'a str>, key: &'a str, value: Option<&'a Value>) -> Tokens<'a> {
    let mut toks = Tokens::new();
    if let Some(owner) = owner {
        toks.push(Token::Text(quote_identifier(owner)));
        toks.push(Token::text("."));
    }
    toks.push(Token::Text(quote_identifier(key)));
    if let Some(value) = value {
        toks.push(Token::text(" = "));
        toks.push(Token::node(value));
    }
    toks
}

fn assignment_prefix<'a>(identifier: Option<&'a Identifier>, toks: &mut Tokens<'a>) {
    if let Some(ident) = identifier {
        toks.push(Token::node(ident));
        toks.push(Token::text(" = "));
    }
}

// ============================================================================
// Map
// ============================================================================

/// A map literal, optionally as the right-hand side of `ident = {...}`.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MapLiteral {
    props: PropertyMap,
    identifier: Option<Identifier>,
}

impl MapLiteral {
    pub fn new(props: impl Into<PropertyMap>) -> Self {
        Self { props: props.into(), identifier: None }
    }

    /// Render as `identifier = {...}`, the `SET n = {map}` form.
    pub fn assign_to(mut self, identifier: impl Into<Identifier>) -> Self {
        self.identifier = Some(identifier.into());
        self
    }

    pub fn props(&self) -> &PropertyMap { &self.props }
}

impl Render for MapLiteral {
    fn tokens(&self) -> Tokens<'_> {
        let mut toks = Tokens::new();
        assignment_prefix(self.identifier.as_ref(), &mut toks);
        toks.extend(map_tokens(&self.props));
        toks
    }
}

// ============================================================================
// Collection
// ============================================================================

/// A list literal, optionally as the right-hand side of `ident = [...]`.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Collection {
    items: Vec<Value>,
    identifier: Option<Identifier>,
}

impl Collection {
    pub fn new<I, V>(items: I) -> Self
    where
        I: IntoIterator<Item = V>,
        V: Into<Value>,
    {
        Self { items: items.into_iter().map(Into::into).collect(), identifier: None }
    }

    pub fn assign_to(mut self, identifier: impl Into<Identifier>) -> Self {
        self.identifier = Some(identifier.into());
        self
    }

    pub fn items(&self) -> &[Value] { &self.items }
}

impl Render for Collection {
    fn tokens(&self) -> Tokens<'_> {
        let mut toks = Tokens::new();
        assignment_prefix(self.identifier.as_ref(), &mut toks);
        toks.extend(collection_tokens(&self.items));
        toks
    }
}

// ============================================================================
// Property / Properties
// ============================================================================

/// A property reference `n.key`, or an assignment `n.key = value`.
#[derive(Debug, Clone, PartialEq)]
pub struct Property {
    key: String,
    owner: Option<String>,
    value: Option<Value>,
}

impl Property {
    pub fn new(key: impl Into<String>) -> Self {
        Self { key: key.into(), owner: None, value: None }
    }

    /// Qualify with the owning identifier.
    pub fn of(mut self, owner: impl Into<String>) -> Self {
        self.owner = Some(owner.into());
        self
    }

    /// Turn the reference into an assignment.
    pub fn assign(mut self, value: impl Into<Value>) -> Self {
        self.value = Some(value.into());
        self
    }

    pub fn key(&self) -> &str { &self.key }
    pub fn owner(&self) -> Option<&str> { self.owner.as_deref() }
}

impl Render for Property {
    fn tokens(&self) -> Tokens<'_> {
        property_tokens(self.owner.as_deref(), &self.key, self.value.as_ref())
    }
}

/// A batch of assignments for one owner: `n.a = 1, n.b = 2`.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Properties {
    props: PropertyMap,
    owner: Option<String>,
}

impl Properties {
    pub fn new(props: impl Into<PropertyMap>) -> Self {
        Self { props: props.into(), owner: None }
    }

    pub fn of(mut self, owner: impl Into<String>) -> Self {
        self.owner = Some(owner.into());
        self
    }
}

impl Render for Properties {
    fn tokens(&self) -> Tokens<'_> {
        let mut toks = Tokens::new();
        for (i, (key, value)) in self.props.iter().enumerate() {
            if i > 0 {
                toks.push(Token::text(", "));
            }
            toks.extend(property_tokens(self.owner.as_deref(), key, Some(value)));
        }
        toks
    }
}

// ============================================================================
// Function call
// ============================================================================

/// A function call `name(arg, ...)`. The name is emitted verbatim.
#[derive(Debug, Clone, PartialEq)]
pub struct Function {
    name: String,
    args: Vec<Expr>,
    distinct: bool,
}

impl Function {
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into(), args: Vec::new(), distinct: false }
    }

    pub fn arg(mut self, arg: impl Into<Expr>) -> Self {
        self.args.push(arg.into());
        self
    }

    /// `count(DISTINCT x)`
    pub fn distinct(mut self) -> Self {
        self.distinct = true;
        self
    }

    pub fn name(&self) -> &str { &self.name }
}

impl Render for Function {
    fn tokens(&self) -> Tokens<'_> {
        let mut toks = Tokens::new();
        toks.push(Token::text(&self.name));
        toks.push(Token::text("("));
        if self.distinct {
            toks.push(Token::text("DISTINCT "));
        }
        toks.extend(delimit(self.args.iter().map(|a| Token::reference_or_node(a)), ", "));
        toks.push(Token::text(")"));
        toks
    }
}

// ============================================================================
// ORDER BY items
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortOrder {
    Asc,
    Desc,
}

impl SortOrder {
    pub fn keyword(self) -> &'static str {
        match self {
            SortOrder::Asc => "ASC",
            SortOrder::Desc => "DESC",
        }
    }
}

/// `expr [ASC|DESC]`
#[derive(Debug, Clone, PartialEq)]
pub struct SortItem {
    expr: Expr,
    order: Option<SortOrder>,
}

impl SortItem {
    pub fn new(expr: impl Into<Expr>) -> Self {
        Self { expr: expr.into(), order: None }
    }

    pub fn asc(expr: impl Into<Expr>) -> Self {
        Self { expr: expr.into(), order: Some(SortOrder::Asc) }
    }

    pub fn desc(expr: impl Into<Expr>) -> Self {
        Self { expr: expr.into(), order: Some(SortOrder::Desc) }
    }
}

impl Render for SortItem {
    fn tokens(&self) -> Tokens<'_> {
        let mut toks = Tokens::new();
        toks.push(Token::reference_or_node(&self.expr));
        if let Some(order) = self.order {
            toks.push(Token::text(" "));
            toks.push(Token::text(order.keyword()));
        }
        toks
    }
}

impl_display_via_render!(Expr, MapLiteral, Collection, Property, Properties, Function, SortItem);
