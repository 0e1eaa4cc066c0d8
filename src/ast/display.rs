//! Canonical rendering of syntax trees back into value definition syntax.

use std::fmt::{Display, Formatter, Result};

use super::ast::{RangeConstraint, Separator, SyntaxNode};

fn join(f: &mut Formatter<'_>, items: &[SyntaxNode], separator: &str) -> Result {
    for (index, item) in items.iter().enumerate() {
        if index > 0 {
            write!(f, "{}", separator)?;
        }
        write!(f, "{}", item)?;
    }
    Ok(())
}

impl Display for RangeConstraint {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result {
        match self.min {
            Some(min) => write!(f, "[{},", min)?,
            None => write!(f, "[-∞,")?,
        }
        match self.max {
            Some(max) => write!(f, "{}]", max),
            None => write!(f, "∞]"),
        }
    }
}

impl Display for SyntaxNode {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result {
        match self {
            SyntaxNode::Keyword(value) => write!(f, "{}", value),
            SyntaxNode::LiteralSymbol { value, quoted: true } => write!(f, "'{}'", value),
            SyntaxNode::LiteralSymbol { value, quoted: false } => write!(f, "{}", value),
            SyntaxNode::DataTypeRef {
                name,
                range,
                property_ref,
            } => {
                write!(f, "<")?;
                if *property_ref {
                    write!(f, "'{}'", name)?;
                } else {
                    write!(f, "{}", name)?;
                }
                if let Some(range) = range {
                    write!(f, " {}", range)?;
                }
                write!(f, ">")
            }
            SyntaxNode::Numeric { value, unit } => {
                write!(f, "{}{}", value, unit.as_deref().unwrap_or(""))
            }
            SyntaxNode::FunctionTerm { name, args } => match args.as_ref() {
                SyntaxNode::Sequence(items) if items.is_empty() => write!(f, "{}()", name),
                args => write!(f, "{}( {} )", name, args),
            },
            SyntaxNode::Sequence(items) => join(f, items, " "),
            SyntaxNode::OneOf(items) => join(f, items, " | "),
            SyntaxNode::AnyOrder(items) => join(f, items, " || "),
            SyntaxNode::AllRequiredAnyOrder(items) => join(f, items, " && "),
            SyntaxNode::Group {
                inner,
                bracketed: true,
            } => write!(f, "[ {} ]", inner),
            SyntaxNode::Group {
                inner,
                bracketed: false,
            } => write!(f, "( {} )", inner),
            SyntaxNode::Multiplied {
                inner,
                min,
                max,
                separator,
            } => {
                write!(f, "{}", inner)?;
                match (separator, min, max) {
                    (Separator::Space, 0, Some(1)) => write!(f, "?"),
                    (Separator::Space, 0, None) => write!(f, "*"),
                    (Separator::Space, 1, None) => write!(f, "+"),
                    (Separator::Space, 1, Some(1))
                        if matches!(inner.as_ref(), SyntaxNode::Group { .. }) =>
                    {
                        write!(f, "!")
                    }
                    (Separator::Comma, 1, None) => write!(f, "#"),
                    (Separator::Comma, min, max) => {
                        write!(f, "#")?;
                        write_range(f, *min, *max)
                    }
                    (Separator::Space, min, max) => write_range(f, *min, *max),
                }
            }
        }
    }
}

fn write_range(f: &mut Formatter<'_>, min: u32, max: Option<u32>) -> Result {
    match max {
        Some(max) if max == min => write!(f, "{{{}}}", min),
        Some(max) => write!(f, "{{{},{}}}", min, max),
        None => write!(f, "{{{},}}", min),
    }
}
