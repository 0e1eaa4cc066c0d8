//! Loading of the syntax tables a generation run starts from.
//!
//! ```json
//! {
//!   "properties": { "width": "auto | <length>" },
//!   "syntaxes": { "line-style": { "syntax": "none | solid" } },
//!   "atRules": { "@font-face": { "descriptors": { "font-display": "auto | swap" } } },
//!   "pseudoClasses": [":hover", ":focus"]
//! }
//! ```
//!
//! Table entries keep their source order.

use std::{
    fmt,
    path::{Path, PathBuf},
};

use serde::{
    de::{MapAccess, Visitor},
    Deserialize, Deserializer,
};
use thiserror::Error;
use tracing::debug;

use crate::{
    config::TyperConfig,
    errors::errors::Error,
    typer::{
        registry::SyntaxTable,
        typer::{Resolution, Typer},
        types::{canonicalize, MixedType},
    },
};

#[derive(Error, Debug)]
pub enum TablesError {
    #[error("failed to read {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("malformed syntax tables: {0}")]
    Json(#[from] serde_json::Error),
}

/// An entry is either the syntax string itself or an object holding it.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum SyntaxEntry {
    Plain(String),
    Detailed { syntax: String },
}

impl SyntaxEntry {
    fn into_syntax(self) -> String {
        match self {
            SyntaxEntry::Plain(syntax) | SyntaxEntry::Detailed { syntax } => syntax,
        }
    }
}

impl<'de> Deserialize<'de> for SyntaxTable {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct TableVisitor;

        impl<'de> Visitor<'de> for TableVisitor {
            type Value = SyntaxTable;

            fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
                f.write_str("a map of names to syntax strings")
            }

            fn visit_map<A: MapAccess<'de>>(self, mut map: A) -> Result<SyntaxTable, A::Error> {
                let mut table = SyntaxTable::new();
                while let Some((name, entry)) = map.next_entry::<String, SyntaxEntry>()? {
                    table.insert(name, entry.into_syntax());
                }
                Ok(table)
            }
        }

        deserializer.deserialize_map(TableVisitor)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct AtRule {
    #[serde(default)]
    pub descriptors: SyntaxTable,
}

/// At-rules in source order. A repeated at-rule replaces the earlier one in place.
fn ordered_at_rules<'de, D: Deserializer<'de>>(
    deserializer: D,
) -> Result<Vec<(String, AtRule)>, D::Error> {
    struct AtRulesVisitor;

    impl<'de> Visitor<'de> for AtRulesVisitor {
        type Value = Vec<(String, AtRule)>;

        fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
            f.write_str("a map of at-rule names to descriptor tables")
        }

        fn visit_map<A: MapAccess<'de>>(self, mut map: A) -> Result<Self::Value, A::Error> {
            let mut rules: Vec<(String, AtRule)> = vec![];
            while let Some((name, rule)) = map.next_entry::<String, AtRule>()? {
                match rules.iter_mut().find(|(existing, _)| *existing == name) {
                    Some(entry) => entry.1 = rule,
                    None => rules.push((name, rule)),
                }
            }
            Ok(rules)
        }
    }

    deserializer.deserialize_map(AtRulesVisitor)
}

#[derive(Debug, Clone, PartialEq)]
pub struct DescriptorResolution {
    pub at_rule: String,
    pub descriptor: String,
    pub resolution: Resolution,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SourceTables {
    #[serde(default)]
    pub properties: SyntaxTable,
    /// The data type registry.
    #[serde(default)]
    pub syntaxes: SyntaxTable,
    #[serde(default, deserialize_with = "ordered_at_rules")]
    pub at_rules: Vec<(String, AtRule)>,
    #[serde(default)]
    pub pseudo_classes: Vec<String>,
}

impl SourceTables {
    pub fn from_json(json: &str) -> Result<Self, TablesError> {
        let tables: SourceTables = serde_json::from_str(json)?;
        debug!(
            properties = tables.properties.len(),
            syntaxes = tables.syntaxes.len(),
            at_rules = tables.at_rules.len(),
            "loaded syntax tables"
        );
        Ok(tables)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self, TablesError> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path).map_err(|source| TablesError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        SourceTables::from_json(&json)
    }

    /// A typer over these tables' registry and properties.
    pub fn typer(&self, config: TyperConfig) -> Typer {
        Typer::new(self.syntaxes.clone(), self.properties.clone(), config)
    }

    /// Resolves every at-rule descriptor in source order.
    ///
    /// Descriptors are identified as `@rule descriptor` in errors and warnings.
    pub fn resolve_descriptors(&self, typer: &mut Typer) -> Result<Vec<DescriptorResolution>, Error> {
        let mut resolved = vec![];

        for (at_rule, rule) in &self.at_rules {
            for (descriptor, syntax) in rule.descriptors.iter() {
                let name = format!("{} {}", at_rule, descriptor);
                resolved.push(DescriptorResolution {
                    at_rule: at_rule.clone(),
                    descriptor: String::from(descriptor),
                    resolution: typer.resolve_syntax(&name, syntax)?,
                });
            }
        }

        Ok(resolved)
    }

    /// The pseudo-class names as a canonical string literal union.
    pub fn pseudo_class_types(&self) -> Vec<MixedType> {
        canonicalize(
            self.pseudo_classes
                .iter()
                .map(|name| MixedType::string_literal(name)),
        )
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use crate::{config::TyperConfig, typer::types::MixedType};

    use super::{SourceTables, TablesError};

    const TABLES: &str = r#"{
        "properties": {
            "width": "auto | <length>",
            "border-style": { "syntax": "<line-style>{1,4}" },
            "accent": "auto | <color>"
        },
        "syntaxes": {
            "line-style": "none | solid | dashed",
            "color": "<hex-color> | currentcolor"
        },
        "atRules": {
            "@page": { "descriptors": { "size": "<length>{1,2} | auto" } },
            "@font-face": { "descriptors": { "font-display": "auto | block | swap" } }
        },
        "pseudoClasses": [":hover", ":active", ":focus", ":hover"]
    }"#;

    #[test]
    fn test_tables_keep_source_order() {
        let tables = SourceTables::from_json(TABLES).unwrap();

        assert_eq!(
            tables.properties.names().collect::<Vec<_>>(),
            vec!["width", "border-style", "accent"]
        );
        assert_eq!(tables.properties.get("border-style"), Some("<line-style>{1,4}"));
        assert_eq!(
            tables.syntaxes.names().collect::<Vec<_>>(),
            vec!["line-style", "color"]
        );
    }

    #[test]
    fn test_missing_sections_default_to_empty() {
        let tables = SourceTables::from_json(r#"{ "properties": { "color": "red" } }"#).unwrap();

        assert!(tables.syntaxes.is_empty());
        assert!(tables.at_rules.is_empty());
        assert!(tables.pseudo_classes.is_empty());
    }

    #[test]
    fn test_malformed_tables() {
        assert!(matches!(
            SourceTables::from_json(r#"{ "properties": ["width"] }"#),
            Err(TablesError::Json(_))
        ));
        assert!(matches!(
            SourceTables::load("/nonexistent/tables.json"),
            Err(TablesError::Io { .. })
        ));
    }

    #[test]
    fn test_typer_from_tables() {
        let tables = SourceTables::from_json(TABLES).unwrap();
        let mut typer = tables.typer(TyperConfig::default());

        let accent = typer.resolve_property("accent").unwrap().unwrap();
        assert_eq!(
            accent.types,
            vec![
                MixedType::string_literal("auto"),
                MixedType::data_type("color")
            ]
        );
        assert!(!accent.needs_length);
    }

    #[test]
    fn test_resolve_descriptors() {
        let tables = SourceTables::from_json(TABLES).unwrap();
        let mut typer = tables.typer(TyperConfig::default());

        let descriptors = tables.resolve_descriptors(&mut typer).unwrap();
        let names: Vec<(&str, &str)> = descriptors
            .iter()
            .map(|resolved| (resolved.at_rule.as_str(), resolved.descriptor.as_str()))
            .collect();

        assert_eq!(names, vec![("@page", "size"), ("@font-face", "font-display")]);
        assert_eq!(
            descriptors[0].resolution.types,
            vec![MixedType::string_literal("auto"), MixedType::GenericString]
        );
    }

    #[test]
    fn test_at_rules_keep_source_order() {
        let tables = SourceTables::from_json(
            r#"{ "atRules": {
                "@page": { "descriptors": { "size": "auto" } },
                "@font-face": {},
                "@counter-style": { "descriptors": { "system": "cyclic" } },
                "@page": { "descriptors": { "bleed": "auto" } }
            } }"#,
        )
        .unwrap();

        let names: Vec<&str> = tables.at_rules.iter().map(|(name, _)| name.as_str()).collect();
        assert_eq!(names, vec!["@page", "@font-face", "@counter-style"]);
        assert_eq!(tables.at_rules[0].1.descriptors.get("bleed"), Some("auto"));
        assert!(tables.at_rules[1].1.descriptors.is_empty());
    }

    #[test]
    fn test_pseudo_class_types() {
        let tables = SourceTables::from_json(TABLES).unwrap();

        assert_eq!(
            tables.pseudo_class_types(),
            vec![
                MixedType::string_literal(":active"),
                MixedType::string_literal(":focus"),
                MixedType::string_literal(":hover"),
            ]
        );
    }
}
