//! Lexical analysis of value definition syntax.
//!
//! This module contains the lexer (tokenizer) that converts a syntax string
//! into a stream of tokens for parsing. It handles:
//!
//! - Keywords, vendor-prefixed keywords and function names
//! - Data type references (`<length>`, `<'margin'>`, `<number [0,∞]>`)
//! - Quoted literal symbols and numeric terms
//! - Combinators, multipliers and brackets
//! - Byte offsets for error reporting

pub mod lexer;
pub mod tokens;
