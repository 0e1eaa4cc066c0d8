use std::rc::Rc;

use lazy_static::lazy_static;
use regex::Regex;

use crate::{
    errors::errors::{Error, ErrorImpl},
    Position, Source, Span, MK_DEFAULT_HANDLER, MK_TOKEN,
};

use super::tokens::{Token, TokenKind};

pub type RegexHandler = fn(&mut Lexer, &Regex);

pub struct RegexPattern {
    regex: Regex,
    handler: RegexHandler,
}

lazy_static! {
    // Order matters: the first pattern matching at the cursor wins.
    static ref PATTERNS: Vec<RegexPattern> = vec![
        RegexPattern { regex: Regex::new(r"^\s+").unwrap(), handler: skip_handler },
        RegexPattern { regex: Regex::new(r"^<(?:'-{0,2}[a-zA-Z_][a-zA-Z0-9_-]*'|-{0,2}[a-zA-Z_][a-zA-Z0-9_-]*(?:\(\))?)(?:\s*\[[^\]]*\])?>").unwrap(), handler: data_type_handler },
        RegexPattern { regex: Regex::new(r"^'[^']*'").unwrap(), handler: string_handler },
        RegexPattern { regex: Regex::new(r"^-?[0-9]+(\.[0-9]+)?([a-zA-Z]+|%)?").unwrap(), handler: number_handler },
        RegexPattern { regex: Regex::new(r"^-{0,2}[a-zA-Z_][a-zA-Z0-9_-]*\(").unwrap(), handler: function_handler },
        RegexPattern { regex: Regex::new(r"^-{0,2}[a-zA-Z_][a-zA-Z0-9_-]*").unwrap(), handler: symbol_handler },
        RegexPattern { regex: Regex::new(r"^\|\|").unwrap(), handler: MK_DEFAULT_HANDLER!(TokenKind::DoubleBar, "||") },
        RegexPattern { regex: Regex::new(r"^\|").unwrap(), handler: MK_DEFAULT_HANDLER!(TokenKind::Bar, "|") },
        RegexPattern { regex: Regex::new(r"^&&").unwrap(), handler: MK_DEFAULT_HANDLER!(TokenKind::DoubleAmpersand, "&&") },
        RegexPattern { regex: Regex::new(r"^\[").unwrap(), handler: MK_DEFAULT_HANDLER!(TokenKind::OpenBracket, "[") },
        RegexPattern { regex: Regex::new(r"^\]").unwrap(), handler: MK_DEFAULT_HANDLER!(TokenKind::CloseBracket, "]") },
        RegexPattern { regex: Regex::new(r"^\{").unwrap(), handler: MK_DEFAULT_HANDLER!(TokenKind::OpenCurly, "{") },
        RegexPattern { regex: Regex::new(r"^\}").unwrap(), handler: MK_DEFAULT_HANDLER!(TokenKind::CloseCurly, "}") },
        RegexPattern { regex: Regex::new(r"^\(").unwrap(), handler: MK_DEFAULT_HANDLER!(TokenKind::OpenParen, "(") },
        RegexPattern { regex: Regex::new(r"^\)").unwrap(), handler: MK_DEFAULT_HANDLER!(TokenKind::CloseParen, ")") },
        RegexPattern { regex: Regex::new(r"^,").unwrap(), handler: MK_DEFAULT_HANDLER!(TokenKind::Comma, ",") },
        RegexPattern { regex: Regex::new(r"^/").unwrap(), handler: MK_DEFAULT_HANDLER!(TokenKind::Slash, "/") },
        RegexPattern { regex: Regex::new(r"^\*").unwrap(), handler: MK_DEFAULT_HANDLER!(TokenKind::Star, "*") },
        RegexPattern { regex: Regex::new(r"^\+").unwrap(), handler: MK_DEFAULT_HANDLER!(TokenKind::Plus, "+") },
        RegexPattern { regex: Regex::new(r"^\?").unwrap(), handler: MK_DEFAULT_HANDLER!(TokenKind::Question, "?") },
        RegexPattern { regex: Regex::new(r"^#").unwrap(), handler: MK_DEFAULT_HANDLER!(TokenKind::Hash, "#") },
        RegexPattern { regex: Regex::new(r"^!").unwrap(), handler: MK_DEFAULT_HANDLER!(TokenKind::Exclamation, "!") },
    ];
}

pub struct Lexer {
    tokens: Vec<Token>,
    source: Rc<Source>,
    pos: usize,
}

impl Lexer {
    pub fn new(source: Rc<Source>) -> Lexer {
        Lexer {
            tokens: vec![],
            source,
            pos: 0,
        }
    }

    pub fn advance_n(&mut self, n: usize) {
        self.pos += n;
    }

    pub fn push(&mut self, token: Token) {
        self.tokens.push(token);
    }

    pub fn at(&self) -> char {
        self.remainder().chars().next().unwrap_or('\0')
    }

    pub fn remainder(&self) -> &str {
        &self.source.syntax[self.pos..]
    }

    pub fn at_eof(&self) -> bool {
        self.pos >= self.source.syntax.len()
    }

    pub fn position(&self) -> Position {
        Position(self.pos as u32, Rc::clone(&self.source))
    }

    /// Span covering the next `len` bytes.
    pub fn span_of(&self, len: usize) -> Span {
        Span {
            start: self.position(),
            end: Position((self.pos + len) as u32, Rc::clone(&self.source)),
        }
    }

    fn matched(&self, regex: &Regex) -> String {
        regex
            .find(self.remainder())
            .map(|m| m.as_str().to_string())
            .unwrap_or_default()
    }
}

fn skip_handler(lexer: &mut Lexer, regex: &Regex) {
    let matched = lexer.matched(regex);
    lexer.advance_n(matched.len());
}

fn data_type_handler(lexer: &mut Lexer, regex: &Regex) {
    let matched = lexer.matched(regex);
    let inner = matched[1..matched.len() - 1].to_string();

    let span = lexer.span_of(matched.len());
    lexer.push(MK_TOKEN!(TokenKind::DataType, inner, span));
    lexer.advance_n(matched.len());
}

fn string_handler(lexer: &mut Lexer, regex: &Regex) {
    let matched = lexer.matched(regex);
    let literal = matched[1..matched.len() - 1].to_string();

    let span = lexer.span_of(matched.len());
    lexer.push(MK_TOKEN!(TokenKind::String, literal, span));
    lexer.advance_n(matched.len());
}

fn number_handler(lexer: &mut Lexer, regex: &Regex) {
    let matched = lexer.matched(regex);

    let span = lexer.span_of(matched.len());
    lexer.push(MK_TOKEN!(TokenKind::Number, matched.clone(), span));
    lexer.advance_n(matched.len());
}

fn function_handler(lexer: &mut Lexer, regex: &Regex) {
    let matched = lexer.matched(regex);
    let name = matched[..matched.len() - 1].to_string();

    let span = lexer.span_of(matched.len());
    lexer.push(MK_TOKEN!(TokenKind::Function, name, span));
    lexer.advance_n(matched.len());
}

fn symbol_handler(lexer: &mut Lexer, regex: &Regex) {
    let matched = lexer.matched(regex);

    let span = lexer.span_of(matched.len());
    lexer.push(MK_TOKEN!(TokenKind::Identifier, matched.clone(), span));
    lexer.advance_n(matched.len());
}

/// Splits a value definition syntax string into tokens.
///
/// The returned stream always ends with an `EOF` token.
pub fn tokenize(source: Rc<Source>) -> Result<Vec<Token>, Error> {
    let mut lex = Lexer::new(source);

    while !lex.at_eof() {
        let pattern = PATTERNS
            .iter()
            .find(|pattern| pattern.regex.is_match(lex.remainder()));

        match pattern {
            Some(pattern) => (pattern.handler)(&mut lex, &pattern.regex),
            None => {
                return Err(Error::new(
                    ErrorImpl::UnrecognisedToken {
                        token: lex.at().to_string(),
                    },
                    lex.position(),
                ))
            }
        }
    }

    let span = lex.span_of(0);
    lex.push(MK_TOKEN!(TokenKind::EOF, String::from("EOF"), span));
    Ok(lex.tokens)
}
