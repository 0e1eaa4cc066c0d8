use lazy_static::lazy_static;
use std::{collections::HashMap, fmt::Display};

use crate::Span;

lazy_static! {
    /// Tokens that are multipliers. Used to report a multiplier with no operand.
    pub static ref MULTIPLIER_LOOKUP: HashMap<TokenKind, &'static str> = {
        let mut map = HashMap::new();
        map.insert(TokenKind::Star, "*");
        map.insert(TokenKind::Plus, "+");
        map.insert(TokenKind::Question, "?");
        map.insert(TokenKind::Hash, "#");
        map.insert(TokenKind::Exclamation, "!");
        map.insert(TokenKind::OpenCurly, "{");
        map
    };
}

#[derive(Debug, PartialEq, Eq, Clone, Copy, Hash)]
pub enum TokenKind {
    EOF,
    Number,
    String,
    Identifier,
    /// `name(` with the name as value
    Function,
    /// `<name>`, `<name()>`, `<'name'>` or `<name [min,max]>` with the inner text as value
    DataType,

    OpenBracket,
    CloseBracket,
    OpenCurly,
    CloseCurly,
    OpenParen,
    CloseParen,

    Bar,       // |
    DoubleBar, // ||
    DoubleAmpersand, // &&

    Comma,
    Slash,

    Star,
    Plus,
    Question,
    Hash,
    Exclamation,
}

impl Display for TokenKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:?}", self)
    }
}

#[derive(Debug, Clone)]
pub struct Token {
    pub kind: TokenKind,
    pub value: String,
    pub span: Span,
}

impl Display for Token {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Token {{\nkind: {},\nvalue: {}}}", self.kind, self.value)
    }
}
