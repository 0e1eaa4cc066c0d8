use crate::{
    ast::ast::{RangeConstraint, SyntaxNode},
    errors::errors::{Error, ErrorImpl},
    lexer::tokens::TokenKind,
    Position,
};

use super::{lookups::BindingPower, parser::Parser};

pub fn parse_node(parser: &mut Parser, bp: BindingPower) -> Result<SyntaxNode, Error> {
    // First parse NUD
    let token_kind = parser.current_token_kind();
    let nud = match parser.get_nud_lookup().get(&token_kind) {
        Some(nud) => *nud,
        None => return Err(parser.unexpected_token()),
    };

    let mut left = nud(parser)?;

    // While the next operator binds tighter than the caller, keep extending lhs
    while parser.current_binding_power() > bp {
        let token_kind = parser.current_token_kind();
        let led = match parser.get_led_lookup().get(&token_kind) {
            Some(led) => *led,
            None => return Err(parser.unexpected_token()),
        };

        let binding_power = parser.current_binding_power();
        left = led(parser, left, binding_power)?;
    }

    Ok(left)
}

pub fn parse_keyword(parser: &mut Parser) -> Result<SyntaxNode, Error> {
    Ok(SyntaxNode::Keyword(parser.advance().value))
}

pub fn parse_literal_symbol(parser: &mut Parser) -> Result<SyntaxNode, Error> {
    Ok(SyntaxNode::LiteralSymbol {
        value: parser.advance().value,
        quoted: true,
    })
}

pub fn parse_separator(parser: &mut Parser) -> Result<SyntaxNode, Error> {
    Ok(SyntaxNode::LiteralSymbol {
        value: parser.advance().value,
        quoted: false,
    })
}

pub fn parse_numeric(parser: &mut Parser) -> Result<SyntaxNode, Error> {
    let position = parser.get_position();
    let token = parser.advance().value;

    let split = token
        .find(|c: char| c.is_ascii_alphabetic() || c == '%')
        .unwrap_or(token.len());
    let (value, unit) = token.split_at(split);

    if value.parse::<f64>().is_err() {
        return Err(Error::new(ErrorImpl::NumberParseError { token }, position));
    }

    Ok(SyntaxNode::Numeric {
        value: String::from(value),
        unit: (!unit.is_empty()).then(|| String::from(unit)),
    })
}

/// Parses the inside of `<...>`: `name`, `name()`, `'name'` or `name [min,max]`.
pub fn parse_data_type_ref(parser: &mut Parser) -> Result<SyntaxNode, Error> {
    let position = parser.get_position();
    let inner = parser.advance().value;

    let (name, range) = match inner.find('[') {
        Some(index) => (
            inner[..index].trim(),
            Some(parse_range_constraint(&inner[index..], position)?),
        ),
        None => (inner.trim(), None),
    };

    let property_ref = name.len() >= 2 && name.starts_with('\'') && name.ends_with('\'');
    let name = if property_ref {
        &name[1..name.len() - 1]
    } else {
        name
    };

    Ok(SyntaxNode::DataTypeRef {
        name: String::from(name),
        range,
        property_ref,
    })
}

fn parse_range_constraint(text: &str, position: Position) -> Result<RangeConstraint, Error> {
    let invalid = || {
        Error::new(
            ErrorImpl::InvalidRangeConstraint {
                constraint: String::from(text),
            },
            position.clone(),
        )
    };

    let body = text
        .trim()
        .strip_prefix('[')
        .and_then(|body| body.strip_suffix(']'))
        .ok_or_else(invalid)?;

    let bounds: Vec<&str> = body.split(',').map(str::trim).collect();
    if bounds.len() != 2 {
        return Err(invalid());
    }

    // An infinite bound is only valid on its own side: `-∞` below, `∞`/`+∞` above
    let parse_bound = |bound: &str, infinity: &[&str]| -> Result<Option<f64>, Error> {
        if infinity.contains(&bound) {
            return Ok(None);
        }
        if bound.ends_with('∞') {
            return Err(invalid());
        }
        bound.parse::<f64>().map(Some).map_err(|_| invalid())
    };

    let min = parse_bound(bounds[0], &["-∞"])?;
    let max = parse_bound(bounds[1], &["∞", "+∞"])?;

    if let (Some(min), Some(max)) = (min, max) {
        if min > max {
            return Err(invalid());
        }
    }

    Ok(RangeConstraint { min, max })
}

pub fn parse_function_term(parser: &mut Parser) -> Result<SyntaxNode, Error> {
    let opened_at = parser.get_position();
    let name = parser.advance().value;

    let args = if parser.current_token_kind() == TokenKind::CloseParen {
        SyntaxNode::Sequence(vec![])
    } else {
        parse_node(parser, BindingPower::Default)?
    };

    parser.expect_closing(TokenKind::CloseParen, "(", opened_at)?;

    Ok(SyntaxNode::FunctionTerm {
        name,
        args: Box::new(args),
    })
}

pub fn parse_bracketed_group(parser: &mut Parser) -> Result<SyntaxNode, Error> {
    let opened_at = parser.get_position();
    parser.advance();

    let inner = parse_node(parser, BindingPower::Default)?;
    parser.expect_closing(TokenKind::CloseBracket, "[", opened_at)?;

    Ok(SyntaxNode::Group {
        inner: Box::new(inner),
        bracketed: true,
    })
}

pub fn parse_parenthesized_group(parser: &mut Parser) -> Result<SyntaxNode, Error> {
    let opened_at = parser.get_position();
    parser.advance();

    let inner = parse_node(parser, BindingPower::Default)?;
    parser.expect_closing(TokenKind::CloseParen, "(", opened_at)?;

    Ok(SyntaxNode::Group {
        inner: Box::new(inner),
        bracketed: false,
    })
}
