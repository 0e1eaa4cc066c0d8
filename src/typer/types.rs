//! Semantic value shapes produced by the typer.
//!
//! Both enums derive `Ord` with their variants in canonical order, so a
//! `BTreeSet` of types is deduplicated and canonically sorted at once:
//! string literals lexicographically, numeric literals numerically, and
//! references by name.

use std::{collections::BTreeSet, fmt::Display};

/// Resolver output. May still reference other named type lists.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum MixedType {
    StringLiteral(String),
    NumericLiteral(i64),
    GenericString,
    GenericNumber,
    /// Needs a length generic parameter at the declaration site.
    Length,
    /// Placeholder for the type list of a named data type.
    DataType(String),
}

/// Generic parameters a declaration can require.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Generic {
    Length,
}

/// A type after normalization, with data types rewritten to aliases.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum DeclarableType {
    StringLiteral(String),
    NumericLiteral(i64),
    GenericString,
    GenericNumber,
    Length,
    Alias { name: String, generics: Vec<Generic> },
}

pub type TypeSet = BTreeSet<MixedType>;

impl MixedType {
    pub fn string_literal(value: &str) -> Self {
        MixedType::StringLiteral(String::from(value))
    }

    pub fn data_type(name: &str) -> Self {
        MixedType::DataType(String::from(name))
    }

    pub fn data_type_name(&self) -> Option<&str> {
        match self {
            MixedType::DataType(name) => Some(name),
            _ => None,
        }
    }
}

/// Deduplicates and sorts a list of types into canonical order.
pub fn canonicalize<T: Ord>(types: impl IntoIterator<Item = T>) -> Vec<T> {
    types.into_iter().collect::<BTreeSet<T>>().into_iter().collect()
}

impl Display for MixedType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            MixedType::StringLiteral(value) => write!(f, "{:?}", value),
            MixedType::NumericLiteral(value) => write!(f, "{}", value),
            MixedType::GenericString => write!(f, "string"),
            MixedType::GenericNumber => write!(f, "number"),
            MixedType::Length => write!(f, "TLength"),
            MixedType::DataType(name) => write!(f, "<{}>", name),
        }
    }
}

impl Display for Generic {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Generic::Length => write!(f, "TLength"),
        }
    }
}

impl Display for DeclarableType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DeclarableType::StringLiteral(value) => write!(f, "{:?}", value),
            DeclarableType::NumericLiteral(value) => write!(f, "{}", value),
            DeclarableType::GenericString => write!(f, "string"),
            DeclarableType::GenericNumber => write!(f, "number"),
            DeclarableType::Length => write!(f, "TLength"),
            DeclarableType::Alias { name, generics } if generics.is_empty() => {
                write!(f, "{}", name)
            }
            DeclarableType::Alias { name, generics } => {
                let generics: Vec<String> = generics.iter().map(Generic::to_string).collect();
                write!(f, "{}<{}>", name, generics.join(", "))
            }
        }
    }
}

/// Joins a type list as a union, e.g. `"auto" | <length>`.
pub fn display_union<T: Display>(types: &[T]) -> String {
    types
        .iter()
        .map(|ty| ty.to_string())
        .collect::<Vec<String>>()
        .join(" | ")
}
