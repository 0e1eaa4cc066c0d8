//! Parser implementation for building value definition syntax trees.
//!
//! This module contains the main Parser struct and the parsing entry points.
//! The parser is a Pratt parser: NUD handlers build terms, LED handlers
//! extend the left-hand side with combinators, juxtaposition and multipliers.
//!
//! It maintains lookup tables for:
//! - NUD (null denotation) handlers for terms
//! - LED (left denotation) handlers for combinators and multipliers
//! - Binding powers for operator precedence

use std::{collections::HashMap, rc::Rc};

use crate::{
    ast::ast::SyntaxNode,
    errors::errors::{Error, ErrorImpl},
    lexer::{
        lexer::tokenize,
        tokens::{Token, TokenKind, MULTIPLIER_LOOKUP},
    },
    Position, Source,
};

use super::{
    lookups::{
        create_token_lookups, BPLookup, BindingPower, LEDHandler, LEDLookup, NUDHandler,
        NUDLookup,
    },
    terms::parse_node,
};

/// The main parser structure that maintains parsing state.
///
/// This struct holds the token stream and the lookup tables for terms and
/// operators. It tracks the current position in the token stream and
/// provides methods for token consumption.
pub struct Parser {
    /// The list of tokens to parse
    tokens: Vec<Token>,
    /// Current position in the token stream
    pos: usize,
    /// The identifier and syntax string being parsed
    source: Rc<Source>,
    /// Lookup table for null denotation (term) handlers
    nud_lookup: NUDLookup,
    /// Lookup table for left denotation (operator) handlers
    led_lookup: LEDLookup,
    /// Lookup table for binding powers (precedence)
    binding_power_lookup: BPLookup,
}

impl Parser {
    /// Creates a new Parser instance.
    ///
    /// # Arguments
    ///
    /// * `tokens` - Vector of tokens to parse, terminated by `EOF`
    /// * `source` - The identifier and syntax string the tokens came from
    pub fn new(tokens: Vec<Token>, source: Rc<Source>) -> Self {
        Parser {
            tokens,
            pos: 0,
            source,
            nud_lookup: HashMap::new(),
            led_lookup: HashMap::new(),
            binding_power_lookup: HashMap::new(),
        }
    }

    /// Returns the current token without advancing.
    ///
    /// Past the end of the stream this keeps returning the final `EOF` token.
    pub fn current_token(&self) -> &Token {
        let index = self.pos.min(self.tokens.len().saturating_sub(1));
        &self.tokens[index]
    }

    /// Returns the kind of the current token.
    pub fn current_token_kind(&self) -> TokenKind {
        self.current_token().kind
    }

    /// Advances to the next token and returns the previous token.
    pub fn advance(&mut self) -> Token {
        let token = self.current_token().clone();
        if self.pos < self.tokens.len() {
            self.pos += 1;
        }
        token
    }

    /// Expects a token of the specified kind, with optional custom error.
    ///
    /// # Returns
    ///
    /// Returns Ok(Token) if the current token matches, otherwise returns an Error.
    pub fn expect_error(
        &mut self,
        expected_kind: TokenKind,
        error: Option<Error>,
    ) -> Result<Token, Error> {
        if self.current_token_kind() == expected_kind {
            return Ok(self.advance());
        }

        match error {
            Some(error) => Err(error),
            None => Err(self.unexpected_token()),
        }
    }

    /// Expects a token of the specified kind with default error message.
    pub fn expect(&mut self, expected_kind: TokenKind) -> Result<Token, Error> {
        self.expect_error(expected_kind, None)
    }

    /// Expects the bracket closing one opened at `opened_at`.
    ///
    /// Running out of tokens is reported as an unbalanced bracket at the
    /// opening position, anything else as an unexpected token.
    pub fn expect_closing(
        &mut self,
        closing: TokenKind,
        opening: &str,
        opened_at: Position,
    ) -> Result<Token, Error> {
        if self.current_token_kind() == TokenKind::EOF {
            return Err(Error::new(
                ErrorImpl::UnbalancedBracket {
                    bracket: String::from(opening),
                },
                opened_at,
            ));
        }

        self.expect(closing)
    }

    /// Builds the error for a token that cannot appear where it is.
    pub fn unexpected_token(&self) -> Error {
        let token = self.current_token();

        let error = match token.kind {
            TokenKind::EOF => ErrorImpl::UnexpectedTokenDetailed {
                token: token.value.clone(),
                message: String::from("expected a term before the end of the syntax"),
            },
            kind if MULTIPLIER_LOOKUP.contains_key(&kind) => ErrorImpl::DanglingMultiplier {
                multiplier: token.value.clone(),
            },
            _ => ErrorImpl::UnexpectedToken {
                token: token.value.clone(),
            },
        };

        Error::new(error, self.get_position())
    }

    /// Checks if there are more tokens to parse.
    pub fn has_tokens(&self) -> bool {
        self.current_token_kind() != TokenKind::EOF
    }

    /// Returns a reference to the NUD (null denotation) lookup table.
    pub fn get_nud_lookup(&self) -> &NUDLookup {
        &self.nud_lookup
    }

    /// Returns a reference to the LED (left denotation) lookup table.
    pub fn get_led_lookup(&self) -> &LEDLookup {
        &self.led_lookup
    }

    /// Binding power of the current token, `Default` when it binds nothing.
    pub fn current_binding_power(&self) -> BindingPower {
        *self
            .binding_power_lookup
            .get(&self.current_token_kind())
            .unwrap_or(&BindingPower::Default)
    }

    /// Registers a left denotation (operator) handler for a token.
    ///
    /// # Arguments
    ///
    /// * `kind` - The token kind to register
    /// * `binding_power` - The precedence/binding power for this operator
    /// * `led_fn` - The handler function for this operator
    pub fn led(&mut self, kind: TokenKind, binding_power: BindingPower, led_fn: LEDHandler) {
        self.binding_power_lookup.insert(kind, binding_power);
        self.led_lookup.insert(kind, led_fn);
    }

    /// Registers a null denotation (term) handler for a token.
    ///
    /// Terms bind nothing by themselves; juxtaposition is registered
    /// separately as an operator on the same token kinds.
    pub fn nud(&mut self, kind: TokenKind, nud_fn: NUDHandler) {
        self.nud_lookup.insert(kind, nud_fn);
    }

    /// Returns the source position of the current token.
    pub fn get_position(&self) -> Position {
        self.current_token().span.start.clone()
    }
}

/// Parses a stream of tokens into a syntax tree.
///
/// This is the main parsing entry point. It creates a parser instance,
/// initializes the lookup tables and parses a single value definition that
/// must span the whole stream.
///
/// # Arguments
///
/// * `tokens` - Vector of tokens to parse
/// * `source` - The identifier and syntax string the tokens came from
pub fn parse(tokens: Vec<Token>, source: Rc<Source>) -> Result<SyntaxNode, Error> {
    let mut parser = Parser::new(tokens, source);
    create_token_lookups(&mut parser);

    if parser.tokens.is_empty() || !parser.has_tokens() {
        return Err(Error::new(
            ErrorImpl::EmptySyntax,
            Position(0, Rc::clone(&parser.source)),
        ));
    }

    let node = parse_node(&mut parser, BindingPower::Default)?;

    match parser.current_token_kind() {
        TokenKind::EOF => Ok(node),
        TokenKind::CloseBracket | TokenKind::CloseParen => Err(Error::new(
            ErrorImpl::UnbalancedBracket {
                bracket: parser.current_token().value.clone(),
            },
            parser.get_position(),
        )),
        _ => Err(parser.unexpected_token()),
    }
}

/// Tokenizes and parses the syntax of the named property or data type.
pub fn parse_syntax(name: &str, syntax: &str) -> Result<SyntaxNode, Error> {
    let source = Rc::new(Source::new(name, syntax));
    let tokens = tokenize(Rc::clone(&source))?;
    parse(tokens, source)
}
