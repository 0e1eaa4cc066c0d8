use std::collections::HashMap;

use crate::{ast::ast::SyntaxNode, errors::errors::Error, lexer::tokens::TokenKind};

use super::{combinators::*, parser::Parser, terms::*};

/// Operator precedence, lowest first.
#[derive(PartialEq, PartialOrd, Clone, Copy, Debug)]
pub enum BindingPower {
    Default,
    OneOf,
    AnyOrder,
    AllRequired,
    Juxtaposition,
    Multiplier,
    Primary,
}

pub type NUDHandler = fn(&mut Parser) -> Result<SyntaxNode, Error>;
pub type LEDHandler = fn(&mut Parser, SyntaxNode, BindingPower) -> Result<SyntaxNode, Error>;

/// Token kinds that start a term. A term following another term juxtaposes.
const TERM_STARTS: [TokenKind; 9] = [
    TokenKind::Identifier,
    TokenKind::String,
    TokenKind::Comma,
    TokenKind::Slash,
    TokenKind::DataType,
    TokenKind::Number,
    TokenKind::Function,
    TokenKind::OpenBracket,
    TokenKind::OpenParen,
];

pub fn create_token_lookups(parser: &mut Parser) {
    // Combinators
    parser.led(TokenKind::Bar, BindingPower::OneOf, parse_one_of);
    parser.led(TokenKind::DoubleBar, BindingPower::AnyOrder, parse_any_order);
    parser.led(TokenKind::DoubleAmpersand, BindingPower::AllRequired, parse_all_required);

    // Multipliers
    parser.led(TokenKind::Star, BindingPower::Multiplier, parse_multiplier);
    parser.led(TokenKind::Plus, BindingPower::Multiplier, parse_multiplier);
    parser.led(TokenKind::Question, BindingPower::Multiplier, parse_multiplier);
    parser.led(TokenKind::Hash, BindingPower::Multiplier, parse_multiplier);
    parser.led(TokenKind::Exclamation, BindingPower::Multiplier, parse_multiplier);
    parser.led(TokenKind::OpenCurly, BindingPower::Multiplier, parse_multiplier);

    // Terms
    parser.nud(TokenKind::Identifier, parse_keyword);
    parser.nud(TokenKind::String, parse_literal_symbol);
    parser.nud(TokenKind::Comma, parse_separator);
    parser.nud(TokenKind::Slash, parse_separator);
    parser.nud(TokenKind::DataType, parse_data_type_ref);
    parser.nud(TokenKind::Number, parse_numeric);
    parser.nud(TokenKind::Function, parse_function_term);
    parser.nud(TokenKind::OpenBracket, parse_bracketed_group);
    parser.nud(TokenKind::OpenParen, parse_parenthesized_group);

    for kind in TERM_STARTS {
        parser.led(kind, BindingPower::Juxtaposition, parse_juxtaposition);
    }
}

// Lookup tables owned by the parser
pub type NUDLookup = HashMap<TokenKind, NUDHandler>;
pub type LEDLookup = HashMap<TokenKind, LEDHandler>;
pub type BPLookup = HashMap<TokenKind, BindingPower>;
