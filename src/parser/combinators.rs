use crate::{
    ast::ast::{Separator, SyntaxNode},
    errors::errors::{Error, ErrorImpl},
    lexer::tokens::TokenKind,
};

use super::{lookups::BindingPower, parser::Parser, terms::parse_node};

pub fn parse_one_of(
    parser: &mut Parser,
    left: SyntaxNode,
    bp: BindingPower,
) -> Result<SyntaxNode, Error> {
    parser.advance();
    let right = parse_node(parser, bp)?;

    Ok(match left {
        SyntaxNode::OneOf(mut items) => {
            items.push(right);
            SyntaxNode::OneOf(items)
        }
        left => SyntaxNode::OneOf(vec![left, right]),
    })
}

pub fn parse_any_order(
    parser: &mut Parser,
    left: SyntaxNode,
    bp: BindingPower,
) -> Result<SyntaxNode, Error> {
    parser.advance();
    let right = parse_node(parser, bp)?;

    Ok(match left {
        SyntaxNode::AnyOrder(mut items) => {
            items.push(right);
            SyntaxNode::AnyOrder(items)
        }
        left => SyntaxNode::AnyOrder(vec![left, right]),
    })
}

pub fn parse_all_required(
    parser: &mut Parser,
    left: SyntaxNode,
    bp: BindingPower,
) -> Result<SyntaxNode, Error> {
    parser.advance();
    let right = parse_node(parser, bp)?;

    Ok(match left {
        SyntaxNode::AllRequiredAnyOrder(mut items) => {
            items.push(right);
            SyntaxNode::AllRequiredAnyOrder(items)
        }
        left => SyntaxNode::AllRequiredAnyOrder(vec![left, right]),
    })
}

/// Juxtaposition has no operator token: the next term is the right operand.
pub fn parse_juxtaposition(
    parser: &mut Parser,
    left: SyntaxNode,
    bp: BindingPower,
) -> Result<SyntaxNode, Error> {
    let right = parse_node(parser, bp)?;

    Ok(match left {
        SyntaxNode::Sequence(mut items) => {
            items.push(right);
            SyntaxNode::Sequence(items)
        }
        left => SyntaxNode::Sequence(vec![left, right]),
    })
}

pub fn parse_multiplier(
    parser: &mut Parser,
    left: SyntaxNode,
    _bp: BindingPower,
) -> Result<SyntaxNode, Error> {
    let (min, max, separator) = match parser.current_token_kind() {
        TokenKind::Star => {
            parser.advance();
            (0, None, Separator::Space)
        }
        TokenKind::Plus => {
            parser.advance();
            (1, None, Separator::Space)
        }
        TokenKind::Question => {
            parser.advance();
            (0, Some(1), Separator::Space)
        }
        TokenKind::Exclamation => {
            if !matches!(left, SyntaxNode::Group { bracketed: true, .. }) {
                return Err(Error::new(
                    ErrorImpl::UnexpectedTokenDetailed {
                        token: String::from("!"),
                        message: String::from("`!` must follow a bracketed group"),
                    },
                    parser.get_position(),
                ));
            }
            parser.advance();
            (1, Some(1), Separator::Space)
        }
        TokenKind::Hash => {
            parser.advance();
            if parser.current_token_kind() == TokenKind::OpenCurly {
                let (min, max) = parse_repeat_range(parser)?;
                (min, max, Separator::Comma)
            } else {
                (1, None, Separator::Comma)
            }
        }
        TokenKind::OpenCurly => {
            let (min, max) = parse_repeat_range(parser)?;
            (min, max, Separator::Space)
        }
        _ => return Err(parser.unexpected_token()),
    };

    Ok(SyntaxNode::Multiplied {
        inner: Box::new(left),
        min,
        max,
        separator,
    })
}

/// Parses `{A}`, `{A,}` or `{A,B}`.
fn parse_repeat_range(parser: &mut Parser) -> Result<(u32, Option<u32>), Error> {
    let opened_at = parser.get_position();
    parser.expect(TokenKind::OpenCurly)?;

    let min = parse_repeat_count(parser)?;

    let max = if parser.current_token_kind() == TokenKind::Comma {
        parser.advance();
        if parser.current_token_kind() == TokenKind::Number {
            Some(parse_repeat_count(parser)?)
        } else {
            None
        }
    } else {
        Some(min)
    };

    parser.expect_closing(TokenKind::CloseCurly, "{", opened_at.clone())?;

    if let Some(max) = max {
        if min > max {
            return Err(Error::new(
                ErrorImpl::InvalidMultiplierRange { min, max },
                opened_at,
            ));
        }
    }

    Ok((min, max))
}

fn parse_repeat_count(parser: &mut Parser) -> Result<u32, Error> {
    let position = parser.get_position();
    let error = Error::new(
        ErrorImpl::UnexpectedTokenDetailed {
            token: parser.current_token().value.clone(),
            message: String::from("expected a repeat count"),
        },
        position.clone(),
    );
    let token = parser.expect_error(TokenKind::Number, Some(error))?;

    token
        .value
        .parse::<u32>()
        .map_err(|_| Error::new(ErrorImpl::NumberParseError { token: token.value }, position))
}
