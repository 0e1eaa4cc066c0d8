use std::fmt::Display;

use thiserror::Error;

use crate::Position;

/// A fatal error raised while lexing, parsing or resolving a syntax string.
#[derive(Debug, Clone)]
pub struct Error {
    internal_error: ErrorImpl,
    position: Position,
}

impl Error {
    pub fn new(error_impl: ErrorImpl, position: Position) -> Self {
        Error {
            internal_error: error_impl,
            position,
        }
    }

    pub fn get_position(&self) -> &Position {
        &self.position
    }

    pub fn get_kind(&self) -> &ErrorImpl {
        &self.internal_error
    }

    /// Name of the identifier whose syntax failed.
    pub fn get_identifier(&self) -> &str {
        &self.position.1.name
    }

    /// The raw syntax string that failed.
    pub fn get_syntax(&self) -> &str {
        &self.position.1.syntax
    }

    pub fn is_syntax_error(&self) -> bool {
        !matches!(self.internal_error, ErrorImpl::InternalConsistency { .. })
    }

    pub fn get_error_name(&self) -> &str {
        match &self.internal_error {
            ErrorImpl::UnrecognisedToken { .. } => "UnrecognisedToken",
            ErrorImpl::UnexpectedToken { .. } => "UnexpectedToken",
            ErrorImpl::UnexpectedTokenDetailed { .. } => "UnexpectedTokenDetailed",
            ErrorImpl::UnbalancedBracket { .. } => "UnbalancedBracket",
            ErrorImpl::DanglingMultiplier { .. } => "DanglingMultiplier",
            ErrorImpl::InvalidMultiplierRange { .. } => "InvalidMultiplierRange",
            ErrorImpl::InvalidRangeConstraint { .. } => "InvalidRangeConstraint",
            ErrorImpl::NumberParseError { .. } => "NumberParseError",
            ErrorImpl::EmptySyntax => "EmptySyntax",
            ErrorImpl::InternalConsistency { .. } => "InternalConsistency",
        }
    }

    pub fn get_tip(&self) -> ErrorTip {
        match &self.internal_error {
            ErrorImpl::UnrecognisedToken { .. } => ErrorTip::None,
            ErrorImpl::UnexpectedToken { token } => ErrorTip::Suggestion(format!(
                "Unexpected token: `{}`, is an operand missing?",
                token
            )),
            ErrorImpl::UnexpectedTokenDetailed { token, message } => {
                ErrorTip::Suggestion(format!("Unexpected token: `{}`, {}", token, message))
            }
            ErrorImpl::UnbalancedBracket { bracket } => ErrorTip::Suggestion(format!(
                "Bracket `{}` is never matched",
                bracket
            )),
            ErrorImpl::DanglingMultiplier { multiplier } => ErrorTip::Suggestion(format!(
                "Multiplier `{}` must follow a term or a bracketed group",
                multiplier
            )),
            ErrorImpl::InvalidMultiplierRange { min, max } => ErrorTip::Suggestion(format!(
                "Range `{{{},{}}}` has a lower bound above its upper bound",
                min, max
            )),
            ErrorImpl::InvalidRangeConstraint { constraint } => ErrorTip::Suggestion(format!(
                "Range constraint `{}` should look like `[min,max]`",
                constraint
            )),
            ErrorImpl::NumberParseError { token } => ErrorTip::Suggestion(format!(
                "Invalid number: `{}`, is it above the integer limit?",
                token
            )),
            ErrorImpl::EmptySyntax => {
                ErrorTip::Suggestion(String::from("A value definition needs at least one term"))
            }
            ErrorImpl::InternalConsistency { message } => ErrorTip::Suggestion(format!(
                "The syntax tree is malformed: {}",
                message
            )),
        }
    }
}

impl Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{} in `{}` at offset {}: {} (syntax: `{}`)",
            self.get_error_name(),
            self.get_identifier(),
            self.position.0,
            self.internal_error,
            self.get_syntax()
        )
    }
}

impl std::error::Error for Error {}

pub enum ErrorTip {
    None,
    Suggestion(String),
}

impl Display for ErrorTip {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ErrorTip::None => write!(f, ""),
            ErrorTip::Suggestion(suggestion) => write!(f, "{}", suggestion),
        }
    }
}

#[derive(Error, Debug, Clone, PartialEq)]
pub enum ErrorImpl {
    #[error("unrecognised token: {token:?}")]
    UnrecognisedToken { token: String },
    #[error("unexpected token: {token:?}")]
    UnexpectedToken { token: String },
    #[error("unexpected token ({message:?}): {token:?}")]
    UnexpectedTokenDetailed { token: String, message: String },
    #[error("unbalanced bracket: {bracket:?}")]
    UnbalancedBracket { bracket: String },
    #[error("multiplier {multiplier:?} applied to nothing")]
    DanglingMultiplier { multiplier: String },
    #[error("invalid multiplier range {{{min},{max}}}")]
    InvalidMultiplierRange { min: u32, max: u32 },
    #[error("invalid range constraint {constraint:?}")]
    InvalidRangeConstraint { constraint: String },
    #[error("error parsing number: {token:?}")]
    NumberParseError { token: String },
    #[error("empty syntax")]
    EmptySyntax,
    #[error("internal consistency violation: {message}")]
    InternalConsistency { message: String },
}

/// Recoverable conditions. Resolution continues with a widened type.
#[derive(Error, Debug, Clone, PartialEq, Eq, Hash)]
pub enum Warning {
    #[error("unknown data type <{name}> referenced from `{referrer}`, widened to string")]
    UnknownDataTypeReference { name: String, referrer: String },
    #[error("unknown property <'{name}'> referenced from `{referrer}`, widened to string")]
    UnknownPropertyReference { name: String, referrer: String },
    #[error("cyclic property reference <'{name}'> from `{referrer}`, widened to string")]
    CyclicPropertyReference { name: String, referrer: String },
    #[error("`{combinator}` with {operands} operands in `{referrer}` exceeds the limit of {limit}, widened to string")]
    CombinatorOverflow {
        combinator: String,
        operands: usize,
        limit: usize,
        referrer: String,
    },
}
