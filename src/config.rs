//! Typer configuration and command line options.

use std::path::PathBuf;

use thiserror::Error;

/// Largest number of operands a `||` or `&&` combinator is expanded over.
///
/// `||` enumerates `2^n - 1` subsets and `&&` enumerates `n!` permutations.
/// Above this bound the whole combinator resolves to a generic string and a
/// `CombinatorOverflow` warning is recorded.
pub const DEFAULT_MAX_COMBINATOR_OPERANDS: usize = 8;

/// Upper bound for the configured operand limit.
///
/// `10!` permutations is the largest `&&` expansion the typer will attempt.
/// Larger configured limits are rejected on the command line and clamped by
/// [`TyperConfig::operand_limit`].
pub const MAX_COMBINATOR_OPERANDS_LIMIT: usize = 10;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TyperConfig {
    /// See [`DEFAULT_MAX_COMBINATOR_OPERANDS`].
    pub max_combinator_operands: usize,
    /// Inline the types of `<'property'>` references instead of widening them.
    pub inline_property_references: bool,
    /// Resolve a syntax with no representable shape to a generic string.
    pub fallback_on_empty: bool,
}

impl TyperConfig {
    /// The effective operand limit, never above [`MAX_COMBINATOR_OPERANDS_LIMIT`].
    pub fn operand_limit(&self) -> usize {
        self.max_combinator_operands.min(MAX_COMBINATOR_OPERANDS_LIMIT)
    }
}

impl Default for TyperConfig {
    fn default() -> Self {
        TyperConfig {
            max_combinator_operands: DEFAULT_MAX_COMBINATOR_OPERANDS,
            inline_property_references: true,
            fallback_on_empty: true,
        }
    }
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    #[error("missing path to the syntax tables")]
    MissingTables,
    #[error("option {option} expects a value")]
    MissingValue { option: String },
    #[error("invalid value {value:?} for option {option}")]
    InvalidValue { option: String, value: String },
    #[error("unknown option {option}")]
    UnknownOption { option: String },
}

/// Options of the `csstyper` binary.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CliOptions {
    pub tables: PathBuf,
    pub config: TyperConfig,
    pub normalize: bool,
}

pub const USAGE: &str =
    "usage: csstyper <tables.json> [--max-operands N] [--no-property-refs] [--normalize]";

impl CliOptions {
    /// Parses `env::args()`-style arguments, skipping the program name.
    pub fn from_args(args: &[String]) -> Result<Self, ConfigError> {
        let mut tables = None;
        let mut config = TyperConfig::default();
        let mut normalize = false;

        let mut args = args.iter().skip(1);
        while let Some(arg) = args.next() {
            match arg.as_str() {
                "--max-operands" => {
                    let value = args.next().ok_or_else(|| ConfigError::MissingValue {
                        option: arg.clone(),
                    })?;
                    let invalid = || ConfigError::InvalidValue {
                        option: arg.clone(),
                        value: value.clone(),
                    };
                    let limit: usize = value.parse().map_err(|_| invalid())?;
                    if limit > MAX_COMBINATOR_OPERANDS_LIMIT {
                        return Err(invalid());
                    }
                    config.max_combinator_operands = limit;
                }
                "--no-property-refs" => config.inline_property_references = false,
                "--normalize" => normalize = true,
                option if option.starts_with("--") => {
                    return Err(ConfigError::UnknownOption {
                        option: String::from(option),
                    })
                }
                path => tables = Some(PathBuf::from(path)),
            }
        }

        Ok(CliOptions {
            tables: tables.ok_or(ConfigError::MissingTables)?,
            config,
            normalize,
        })
    }
}

#[cfg(test)]
mod tests {
    use std::path::PathBuf;

    use super::{
        CliOptions, ConfigError, TyperConfig, DEFAULT_MAX_COMBINATOR_OPERANDS,
        MAX_COMBINATOR_OPERANDS_LIMIT,
    };

    fn args(list: &[&str]) -> Vec<String> {
        list.iter().map(|arg| arg.to_string()).collect()
    }

    #[test]
    fn test_defaults() {
        let options = CliOptions::from_args(&args(&["csstyper", "tables.json"])).unwrap();

        assert_eq!(options.tables, PathBuf::from("tables.json"));
        assert_eq!(options.config, TyperConfig::default());
        assert_eq!(
            options.config.max_combinator_operands,
            DEFAULT_MAX_COMBINATOR_OPERANDS
        );
        assert!(!options.normalize);
    }

    #[test]
    fn test_options() {
        let options = CliOptions::from_args(&args(&[
            "csstyper",
            "--max-operands",
            "4",
            "--no-property-refs",
            "--normalize",
            "data.json",
        ]))
        .unwrap();

        assert_eq!(options.config.max_combinator_operands, 4);
        assert!(!options.config.inline_property_references);
        assert!(options.normalize);
        assert_eq!(options.tables, PathBuf::from("data.json"));
    }

    #[test]
    fn test_errors() {
        assert_eq!(
            CliOptions::from_args(&args(&["csstyper"])),
            Err(ConfigError::MissingTables)
        );
        assert_eq!(
            CliOptions::from_args(&args(&["csstyper", "t.json", "--max-operands"])),
            Err(ConfigError::MissingValue {
                option: String::from("--max-operands")
            })
        );
        assert_eq!(
            CliOptions::from_args(&args(&["csstyper", "t.json", "--max-operands", "x"])),
            Err(ConfigError::InvalidValue {
                option: String::from("--max-operands"),
                value: String::from("x")
            })
        );
        assert_eq!(
            CliOptions::from_args(&args(&["csstyper", "--verbose"])),
            Err(ConfigError::UnknownOption {
                option: String::from("--verbose")
            })
        );
    }

    #[test]
    fn test_operand_limit_is_bounded() {
        assert_eq!(
            CliOptions::from_args(&args(&["csstyper", "t.json", "--max-operands", "11"])),
            Err(ConfigError::InvalidValue {
                option: String::from("--max-operands"),
                value: String::from("11")
            })
        );

        let options =
            CliOptions::from_args(&args(&["csstyper", "t.json", "--max-operands", "10"])).unwrap();
        assert_eq!(options.config.operand_limit(), MAX_COMBINATOR_OPERANDS_LIMIT);

        let config = TyperConfig {
            max_combinator_operands: 64,
            ..TyperConfig::default()
        };
        assert_eq!(config.operand_limit(), MAX_COMBINATOR_OPERANDS_LIMIT);
        assert_eq!(
            TyperConfig::default().operand_limit(),
            DEFAULT_MAX_COMBINATOR_OPERANDS
        );
    }
}
