//! Parser module for building value definition syntax trees.
//!
//! This module contains the parser that transforms a stream of tokens into a
//! [`SyntaxNode`](crate::ast::ast::SyntaxNode). It uses a Pratt parser with
//! binding powers for the precedence of the syntax notation:
//!
//! `|` < `||` < `&&` < juxtaposition < postfix multipliers
//!
//! Brackets override precedence. Terms are NUD (null denotation) handlers;
//! combinators, juxtaposition and multipliers are LED (left denotation)
//! handlers.

pub mod combinators;
pub mod lookups;
pub mod parser;
pub mod terms;
