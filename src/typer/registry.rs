use lazy_static::lazy_static;
use std::collections::{HashMap, HashSet};

use super::types::{DeclarableType, MixedType};

lazy_static! {
    /// Data types built into every registry. Their type lists are fixed.
    pub static ref BASIC_DATA_TYPES: HashMap<&'static str, BasicDataType> = {
        let mut map = HashMap::new();
        map.insert("length", BasicDataType::Length);
        map.insert("number", BasicDataType::Number);
        map.insert("integer", BasicDataType::Number);
        for name in [
            "string",
            "url",
            "percentage",
            "time",
            "angle",
            "frequency",
            "resolution",
            "flex",
            "ident",
            "custom-ident",
            "dashed-ident",
            "hex-color",
            "custom-property-name",
            "declaration-value",
            "any-value",
        ] {
            map.insert(name, BasicDataType::String);
        }
        map
    };

    /// Units of dimensioned numeric terms that are lengths.
    pub static ref LENGTH_UNITS: HashSet<&'static str> = [
        "px", "em", "rem", "ex", "rex", "ch", "rch", "cap", "rcap", "ic", "ric", "lh", "rlh",
        "vw", "vh", "vi", "vb", "vmin", "vmax", "svw", "svh", "lvw", "lvh", "dvw", "dvh",
        "cqw", "cqh", "cqi", "cqb", "cqmin", "cqmax", "cm", "mm", "q", "in", "pt", "pc",
    ]
    .into_iter()
    .collect();
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BasicDataType {
    Length,
    Number,
    String,
}

impl BasicDataType {
    pub fn lookup(name: &str) -> Option<BasicDataType> {
        BASIC_DATA_TYPES.get(name).copied()
    }

    pub fn as_mixed(&self) -> MixedType {
        match self {
            BasicDataType::Length => MixedType::Length,
            BasicDataType::Number => MixedType::GenericNumber,
            BasicDataType::String => MixedType::GenericString,
        }
    }

    pub fn as_declarable(&self) -> DeclarableType {
        match self {
            BasicDataType::Length => DeclarableType::Length,
            BasicDataType::Number => DeclarableType::GenericNumber,
            BasicDataType::String => DeclarableType::GenericString,
        }
    }
}

/// Name → syntax string table that remembers insertion order.
///
/// Used both as the data type registry and as the property table.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SyntaxTable {
    entries: Vec<(String, String)>,
    lookup: HashMap<String, usize>,
}

impl SyntaxTable {
    pub fn new() -> Self {
        SyntaxTable::default()
    }

    /// Inserts or replaces an entry. A replaced entry keeps its position.
    pub fn insert(&mut self, name: impl Into<String>, syntax: impl Into<String>) -> Option<String> {
        let name = name.into();
        let syntax = syntax.into();

        match self.lookup.get(&name) {
            Some(&index) => Some(std::mem::replace(&mut self.entries[index].1, syntax)),
            None => {
                self.lookup.insert(name.clone(), self.entries.len());
                self.entries.push((name, syntax));
                None
            }
        }
    }

    pub fn get(&self, name: &str) -> Option<&str> {
        self.lookup
            .get(name)
            .map(|&index| self.entries[index].1.as_str())
    }

    pub fn contains(&self, name: &str) -> bool {
        self.lookup.contains_key(name)
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(name, _)| name.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries
            .iter()
            .map(|(name, syntax)| (name.as_str(), syntax.as_str()))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for SyntaxTable {
    fn from_iter<T: IntoIterator<Item = (K, V)>>(iter: T) -> Self {
        let mut table = SyntaxTable::new();
        for (name, syntax) in iter {
            table.insert(name, syntax);
        }
        table
    }
}
