//! Resolution of syntax trees into type lists.
//!
//! The typer walks a [`SyntaxNode`](crate::ast::ast::SyntaxNode) and
//! produces the canonical list of value shapes it accepts:
//!
//! - Keywords and quoted symbols become string literals
//! - Unitless integers become numeric literals
//! - Known data types become placeholders, unknown ones widen to string
//! - Combinators are expanded over their operands, up to a configured bound
//!
//! Resolutions are memoized per name and per syntax string for the lifetime
//! of a [`Typer`](typer::Typer).

pub mod combinatorics;
pub mod registry;
pub mod typer;
pub mod types;

#[cfg(test)]
mod tests;
