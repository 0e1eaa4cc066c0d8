/// Node Kinds
///
/// Flat discriminant of [`SyntaxNode`], used for dispatch and diagnostics.
#[derive(PartialEq, Eq, Clone, Copy, Debug)]
pub enum NodeKind {
    Keyword,
    LiteralSymbol,
    DataTypeRef,
    Numeric,
    FunctionTerm,
    Sequence,
    OneOf,
    AnyOrder,
    AllRequiredAnyOrder,
    Group,
    Multiplied,
}

/// Separator between repetitions of a multiplied term.
#[derive(PartialEq, Eq, Clone, Copy, Debug)]
pub enum Separator {
    Space,
    Comma,
}

/// Numeric range constraint of a data type reference, e.g. `<number [0,∞]>`.
///
/// `None` bounds are infinite.
#[derive(PartialEq, Clone, Copy, Debug)]
pub struct RangeConstraint {
    pub min: Option<f64>,
    pub max: Option<f64>,
}

/// Syntax Node
///
/// The abstract syntax tree of a value definition. Nodes are immutable once
/// the parser has built them.
#[derive(PartialEq, Clone, Debug)]
pub enum SyntaxNode {
    /// A bare keyword such as `auto`.
    Keyword(String),
    /// A literal symbol. `quoted` is false for bare `,` and `/` separators.
    LiteralSymbol { value: String, quoted: bool },
    /// `<name>`, `<name()>` or, with `property_ref`, `<'name'>`.
    DataTypeRef {
        name: String,
        range: Option<RangeConstraint>,
        property_ref: bool,
    },
    /// A numeric term such as `0` or `1px`.
    Numeric { value: String, unit: Option<String> },
    /// `name( args )`.
    FunctionTerm { name: String, args: Box<SyntaxNode> },
    /// Juxtaposed terms, in order.
    Sequence(Vec<SyntaxNode>),
    /// `a | b`
    OneOf(Vec<SyntaxNode>),
    /// `a || b`
    AnyOrder(Vec<SyntaxNode>),
    /// `a && b`
    AllRequiredAnyOrder(Vec<SyntaxNode>),
    /// `[ inner ]`, or a literal `( inner )` when not bracketed.
    Group { inner: Box<SyntaxNode>, bracketed: bool },
    /// A term followed by a multiplier. `max` of `None` is unbounded.
    Multiplied {
        inner: Box<SyntaxNode>,
        min: u32,
        max: Option<u32>,
        separator: Separator,
    },
}

impl SyntaxNode {
    pub fn get_node_kind(&self) -> NodeKind {
        match self {
            SyntaxNode::Keyword(_) => NodeKind::Keyword,
            SyntaxNode::LiteralSymbol { .. } => NodeKind::LiteralSymbol,
            SyntaxNode::DataTypeRef { .. } => NodeKind::DataTypeRef,
            SyntaxNode::Numeric { .. } => NodeKind::Numeric,
            SyntaxNode::FunctionTerm { .. } => NodeKind::FunctionTerm,
            SyntaxNode::Sequence(_) => NodeKind::Sequence,
            SyntaxNode::OneOf(_) => NodeKind::OneOf,
            SyntaxNode::AnyOrder(_) => NodeKind::AnyOrder,
            SyntaxNode::AllRequiredAnyOrder(_) => NodeKind::AllRequiredAnyOrder,
            SyntaxNode::Group { .. } => NodeKind::Group,
            SyntaxNode::Multiplied { .. } => NodeKind::Multiplied,
        }
    }

    pub fn keyword(value: &str) -> Self {
        SyntaxNode::Keyword(String::from(value))
    }

    pub fn data_type(name: &str) -> Self {
        SyntaxNode::DataTypeRef {
            name: String::from(name),
            range: None,
            property_ref: false,
        }
    }

    /// Whether a multiplier wrapping this node allows at most one occurrence.
    ///
    /// `{0}` allows none and counts as non-repeating too.
    pub fn is_non_repeating(&self) -> bool {
        match self {
            SyntaxNode::Multiplied { max, .. } => matches!(max, Some(0) | Some(1)),
            _ => true,
        }
    }
}
