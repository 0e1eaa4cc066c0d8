#![allow(clippy::module_inception)]

use std::rc::Rc;

use crate::errors::errors::{Error, ErrorTip};

pub mod ast;
pub mod config;
pub mod errors;
pub mod lexer;
pub mod macros;
pub mod parser;
pub mod tables;
pub mod typer;

extern crate regex;

/// The identifier and raw syntax string a token or error belongs to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Source {
    pub name: String,
    pub syntax: String,
}

impl Source {
    pub fn new(name: impl Into<String>, syntax: impl Into<String>) -> Self {
        Source {
            name: name.into(),
            syntax: syntax.into(),
        }
    }
}

/// A byte offset into a [`Source`] syntax string.
#[derive(Debug, Clone)]
pub struct Position(pub u32, pub Rc<Source>);

#[derive(Debug, Clone)]
pub struct Span {
    pub start: Position,
    pub end: Position,
}

/// Renders an error with the syntax string and a caret under the offset.
pub fn render_error(error: &Error) -> String {
    /*
        Error: UnbalancedBracket (Bracket `[` is never matched)
        -> box-shadow
           |
           | [ inset? && <length>{2,4}
           | ^
    */

    let position = error.get_position();
    let syntax = error.get_syntax();
    let offset = (position.0 as usize).min(syntax.len());
    let column = syntax[..offset].chars().count() + 1;

    let mut rendered = String::new();

    if let ErrorTip::None = error.get_tip() {
        rendered.push_str(&format!("Error: {}\n", error.get_error_name()));
    } else {
        rendered.push_str(&format!(
            "Error: {} ({})\n",
            error.get_error_name(),
            error.get_tip()
        ));
    }
    rendered.push_str(&format!("-> {}\n", error.get_identifier()));
    rendered.push_str("   |\n");
    rendered.push_str(&format!("   | {}\n", syntax));
    rendered.push_str(&format!("   | {:>column$}", "^"));

    rendered
}

pub fn display_error(error: &Error) {
    eprintln!("{}", render_error(error));
}
