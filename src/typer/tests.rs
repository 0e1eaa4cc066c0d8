//! Unit tests for the typer.
//!
//! This module contains tests for type resolution including:
//! - Terms, numbers and data type placeholders
//! - `|`, `||` and `&&` expansion and the operand bound
//! - Canonical ordering and determinism
//! - Length propagation through data types
//! - Property references, cycles and normalization

use pretty_assertions::assert_eq;

use crate::{
    ast::ast::SyntaxNode,
    config::TyperConfig,
    errors::errors::{ErrorImpl, Warning},
    parser::parser::parse_syntax,
};

use super::{
    registry::SyntaxTable,
    typer::{resolve, ResolvedName, Typer},
    types::{canonicalize, DeclarableType, Generic, MixedType},
};

fn lit(value: &str) -> MixedType {
    MixedType::string_literal(value)
}

fn dt(name: &str) -> MixedType {
    MixedType::data_type(name)
}

fn registry() -> SyntaxTable {
    SyntaxTable::from_iter([
        ("size", "<length> | auto"),
        ("wrapper", "<size> | none"),
        ("plain", "a | b"),
        ("line-style", "none | solid | dashed"),
    ])
}

fn types_of(syntax: &str) -> Vec<MixedType> {
    Typer::with_registry(registry())
        .resolve_syntax("test", syntax)
        .unwrap()
        .types
}

fn typer_with(properties: &[(&str, &str)]) -> Typer {
    Typer::new(
        registry(),
        properties.iter().copied().collect(),
        TyperConfig::default(),
    )
}

#[test]
fn test_keyword() {
    let resolution = Typer::with_registry(registry())
        .resolve_syntax("test", "auto")
        .unwrap();

    assert_eq!(resolution.types, vec![lit("auto")]);
    assert!(!resolution.needs_length);
}

#[test]
fn test_keyword_or_length() {
    let resolution = Typer::with_registry(SyntaxTable::new())
        .resolve_syntax("width", "auto | <length>")
        .unwrap();

    assert_eq!(resolution.types, vec![lit("auto"), dt("length")]);
    assert!(resolution.needs_length);
}

#[test]
fn test_any_order_keywords() {
    assert_eq!(
        types_of("left || center || right"),
        vec![
            lit("center"),
            lit("left"),
            lit("right"),
            MixedType::GenericString
        ]
    );
}

#[test]
fn test_any_order_with_data_type() {
    assert_eq!(
        types_of("<length> || auto"),
        vec![lit("auto"), MixedType::GenericString, dt("length")]
    );
}

#[test]
fn test_unknown_data_type_is_widened() {
    let mut typer = Typer::with_registry(registry());
    let resolution = typer.resolve_syntax("color", "<unknown-type> | red").unwrap();

    assert_eq!(resolution.types, vec![lit("red"), MixedType::GenericString]);
    assert_eq!(
        typer.warnings(),
        &[Warning::UnknownDataTypeReference {
            name: String::from("unknown-type"),
            referrer: String::from("color"),
        }]
    );
    assert_eq!(typer.stats().unknown_references, 1);
}

#[test]
fn test_only_unknown_reference() {
    assert_eq!(types_of("<nope>"), vec![MixedType::GenericString]);
}

#[test]
fn test_all_required_collapses() {
    assert_eq!(types_of("a && b"), vec![MixedType::GenericString]);
    assert_eq!(types_of("a && b && c"), vec![MixedType::GenericString]);
}

#[test]
fn test_optional_is_transparent() {
    assert_eq!(types_of("a?"), types_of("a"));
    assert_eq!(types_of("[ a | b ]?"), vec![lit("a"), lit("b")]);
    assert_eq!(types_of("a{0,1}"), vec![lit("a")]);
    assert_eq!(types_of("a{1}"), vec![lit("a")]);
}

#[test]
fn test_repetition_collapses() {
    assert_eq!(types_of("a*"), vec![MixedType::GenericString]);
    assert_eq!(types_of("a+"), vec![MixedType::GenericString]);
    assert_eq!(types_of("a#"), vec![MixedType::GenericString]);
    assert_eq!(types_of("a{2}"), vec![MixedType::GenericString]);
    assert_eq!(types_of("<length>{1,4}"), vec![MixedType::GenericString]);
}

#[test]
fn test_required_group() {
    assert_eq!(types_of("[ a ]!"), vec![lit("a")]);
    assert_eq!(types_of("[ a b ]!"), vec![MixedType::GenericString]);
}

#[test]
fn test_canonical_order() {
    assert_eq!(types_of("c | a | b"), vec![lit("a"), lit("b"), lit("c")]);
    assert_eq!(
        types_of("3 | 1 | 2"),
        vec![
            MixedType::NumericLiteral(1),
            MixedType::NumericLiteral(2),
            MixedType::NumericLiteral(3)
        ]
    );
    assert_eq!(
        types_of("10px | auto | 0"),
        vec![lit("auto"), MixedType::NumericLiteral(0), MixedType::Length]
    );
}

#[test]
fn test_one_of_is_order_independent() {
    assert_eq!(types_of("a | <length> | b"), types_of("b | a | <length>"));
}

#[test]
fn test_duplicates_are_removed() {
    assert_eq!(types_of("a | a | [ a ]"), vec![lit("a")]);
}

#[test]
fn test_resolution_is_idempotent() {
    let mut typer = Typer::with_registry(registry());

    let first = typer.resolve_syntax("test", "none | <line-style> | 2").unwrap();
    let second = typer.resolve_syntax("test", "none | <line-style> | 2").unwrap();

    assert_eq!(first, second);
    assert_eq!(canonicalize(first.types.clone()), first.types);
    assert_eq!(typer.stats().syntax_cache_hits, 1);
}

#[test]
fn test_numeric_terms() {
    assert_eq!(types_of("0"), vec![MixedType::NumericLiteral(0)]);
    assert_eq!(types_of("-1"), vec![MixedType::NumericLiteral(-1)]);
    assert_eq!(types_of("1.5"), vec![MixedType::GenericNumber]);
    assert_eq!(types_of("10px"), vec![MixedType::Length]);
    assert_eq!(types_of("45deg"), vec![MixedType::GenericString]);
}

#[test]
fn test_function_and_sequences() {
    assert_eq!(types_of("rgb( <number>{3} )"), vec![MixedType::GenericString]);
    assert_eq!(
        types_of("<length> / <length>"),
        vec![MixedType::GenericString]
    );
    assert_eq!(types_of("( a )"), vec![MixedType::GenericString]);
}

#[test]
fn test_literal_symbols() {
    assert_eq!(types_of("','"), vec![lit(",")]);
    assert_eq!(types_of("/"), vec![MixedType::GenericString]);
}

#[test]
fn test_empty_resolution_without_fallback() {
    let config = TyperConfig {
        fallback_on_empty: false,
        ..TyperConfig::default()
    };
    let mut typer = Typer::new(registry(), SyntaxTable::new(), config);

    assert_eq!(
        typer.resolve_syntax("test", "/").unwrap().types,
        Vec::<MixedType>::new()
    );
}

#[test]
fn test_combinator_overflow() {
    let mut typer = Typer::with_registry(registry());
    let resolution = typer
        .resolve_syntax("test", "a || b || c || d || e || f || g || h || i")
        .unwrap();

    assert_eq!(resolution.types, vec![MixedType::GenericString]);
    assert_eq!(
        typer.warnings(),
        &[Warning::CombinatorOverflow {
            combinator: String::from("||"),
            operands: 9,
            limit: 8,
            referrer: String::from("test"),
        }]
    );
}

#[test]
fn test_combinator_limit_is_configurable() {
    let config = TyperConfig {
        max_combinator_operands: 2,
        ..TyperConfig::default()
    };
    let mut typer = Typer::new(registry(), SyntaxTable::new(), config);

    assert_eq!(
        typer.resolve_syntax("test", "a || b").unwrap().types,
        vec![lit("a"), lit("b"), MixedType::GenericString]
    );
    assert_eq!(
        typer.resolve_syntax("test", "a && b && c").unwrap().types,
        vec![MixedType::GenericString]
    );
    assert_eq!(typer.stats().combinator_overflows, 1);
}

#[test]
fn test_length_propagates_through_data_types() {
    let mut typer = Typer::with_registry(registry());

    assert!(typer.resolve_syntax("test", "<wrapper>").unwrap().needs_length);
    assert!(typer.resolve_syntax("test", "<size>").unwrap().needs_length);
    assert!(!typer.resolve_syntax("test", "<plain>").unwrap().needs_length);
    assert!(!typer.resolve_syntax("test", "<number>").unwrap().needs_length);
}

#[test]
fn test_length_propagation_terminates_on_cycles() {
    let cyclic = SyntaxTable::from_iter([
        ("a-type", "<b-type> | x"),
        ("b-type", "<a-type> | y"),
    ]);
    let mut typer = Typer::with_registry(cyclic);
    assert!(!typer.data_type_needs_length("a-type").unwrap());
    assert!(!typer.data_type_needs_length("b-type").unwrap());

    let cyclic_with_length = SyntaxTable::from_iter([
        ("a-type", "<b-type> | x"),
        ("b-type", "<c-type> | <a-type>"),
        ("c-type", "<a-type> | <length>"),
    ]);
    let mut typer = Typer::with_registry(cyclic_with_length);
    assert!(typer.data_type_needs_length("a-type").unwrap());
    assert!(typer.data_type_needs_length("b-type").unwrap());
    assert!(typer.data_type_needs_length("c-type").unwrap());
}

#[test]
fn test_data_type_resolution() {
    let mut typer = Typer::with_registry(registry());

    let size = typer.resolve_data_type("size").unwrap();
    assert_eq!(size.types, vec![lit("auto"), dt("length")]);
    assert!(size.needs_length);

    let length = typer.resolve_data_type("length").unwrap();
    assert_eq!(length.types, vec![MixedType::Length]);
}

#[test]
fn test_property_reference_is_inlined() {
    let mut typer = typer_with(&[("margin", "<length> | auto"), ("margin-top", "<'margin'>")]);

    let resolution = typer.resolve_property("margin-top").unwrap().unwrap();

    assert_eq!(resolution.types, vec![lit("auto"), dt("length")]);
    assert!(resolution.needs_length);
    assert_eq!(
        typer.resolved_names(),
        &[
            ResolvedName::property("margin"),
            ResolvedName::property("margin-top")
        ]
    );
}

#[test]
fn test_property_reference_can_be_disabled() {
    let config = TyperConfig {
        inline_property_references: false,
        ..TyperConfig::default()
    };
    let mut typer = Typer::new(
        registry(),
        SyntaxTable::from_iter([("margin", "auto"), ("margin-top", "<'margin'>")]),
        config,
    );

    assert_eq!(
        typer.resolve_property("margin-top").unwrap().unwrap().types,
        vec![MixedType::GenericString]
    );
}

#[test]
fn test_unknown_property_reference() {
    let mut typer = typer_with(&[("inset", "<'missing'> | auto")]);

    assert_eq!(
        typer.resolve_property("inset").unwrap().unwrap().types,
        vec![lit("auto"), MixedType::GenericString]
    );
    assert_eq!(
        typer.warnings(),
        &[Warning::UnknownPropertyReference {
            name: String::from("missing"),
            referrer: String::from("inset"),
        }]
    );
}

#[test]
fn test_unknown_property() {
    let mut typer = typer_with(&[]);
    assert_eq!(typer.resolve_property("nope").unwrap(), None);
}

#[test]
fn test_cyclic_property_references() {
    let properties = [("a", "<'b'> | x"), ("b", "<'a'> | y")];
    let expected = vec![lit("x"), lit("y"), MixedType::GenericString];

    let mut forward = typer_with(&properties);
    let a = forward.resolve_property("a").unwrap().unwrap();
    let b = forward.resolve_property("b").unwrap().unwrap();

    let mut backward = typer_with(&properties);
    let b_first = backward.resolve_property("b").unwrap().unwrap();
    let a_second = backward.resolve_property("a").unwrap().unwrap();

    assert_eq!(a.types, expected);
    assert_eq!(b.types, expected);
    assert_eq!(a, a_second);
    assert_eq!(b, b_first);
    assert_eq!(forward.stats().ast_cache_hits, 1);
    assert!(forward
        .warnings()
        .iter()
        .any(|warning| matches!(warning, Warning::CyclicPropertyReference { .. })));
}

#[test]
fn test_call_order_does_not_change_results() {
    let properties = [
        ("border-style", "<line-style>{1,4}"),
        ("outline-style", "auto | <line-style>"),
        ("column-rule-style", "<'outline-style'>"),
        ("width", "<size> | fit-content"),
    ];

    let mut forward = typer_with(&properties);
    let forward_results = forward.resolve_all_properties().unwrap();

    let mut backward = typer_with(&properties);
    let mut backward_results = vec![];
    for (name, _) in properties.iter().rev() {
        let resolution = backward.resolve_property(name).unwrap().unwrap();
        backward_results.push((name.to_string(), resolution));
    }
    backward_results.reverse();

    assert_eq!(forward_results, backward_results);
}

#[test]
fn test_identical_syntaxes_are_parsed_once() {
    let mut typer = typer_with(&[("overflow-x", "visible | hidden"), ("overflow-y", "visible | hidden")]);

    let results = typer.resolve_all_properties().unwrap();

    assert_eq!(results[0].1, results[1].1);
    assert_eq!(typer.stats().parsed_syntaxes, 1);
    assert_eq!(typer.stats().resolved_names, 2);
}

#[test]
fn test_reset_clears_caches() {
    let mut typer = Typer::with_registry(registry());
    typer.resolve_syntax("test", "<unknown>").unwrap();
    typer.resolve_data_type("size").unwrap();

    typer.reset();

    assert!(typer.warnings().is_empty());
    assert!(typer.resolved_names().is_empty());
    assert_eq!(typer.stats().parsed_syntaxes, 0);
}

#[test]
fn test_syntax_errors_are_fatal() {
    let mut typer = Typer::with_registry(registry());
    let error = typer.resolve_syntax("broken", "[ a | b").err().unwrap();

    assert_eq!(error.get_identifier(), "broken");
    assert!(error.is_syntax_error());
}

#[test]
fn test_empty_combinator_is_inconsistent() {
    let mut typer = Typer::with_registry(registry());
    let error = typer
        .resolve_tree(&SyntaxNode::OneOf(vec![]), "broken")
        .err()
        .unwrap();

    assert!(matches!(
        error.get_kind(),
        ErrorImpl::InternalConsistency { .. }
    ));
    assert!(!error.is_syntax_error());
}

#[test]
fn test_resolve_parsed_tree() {
    let node = parse_syntax("test", "<size> | none").unwrap();
    let resolution = resolve(&node, &registry()).unwrap();

    assert_eq!(resolution.types, vec![lit("none"), dt("size")]);
    assert!(resolution.needs_length);
}

#[test]
fn test_normalize() {
    let mut typer = Typer::with_registry(registry());
    let normalized = typer
        .normalize(&[
            dt("size"),
            dt("length"),
            lit("x"),
            dt("plain"),
            dt("number"),
            dt("string"),
        ])
        .unwrap();

    assert_eq!(
        normalized,
        vec![
            DeclarableType::StringLiteral(String::from("x")),
            DeclarableType::GenericString,
            DeclarableType::GenericNumber,
            DeclarableType::Length,
            DeclarableType::Alias {
                name: String::from("plain"),
                generics: vec![],
            },
            DeclarableType::Alias {
                name: String::from("size"),
                generics: vec![Generic::Length],
            },
        ]
    );
    assert_eq!(normalized[5].to_string(), "size<TLength>");
}

#[test]
fn test_zero_occurrences_contribute_nothing() {
    assert_eq!(types_of("a{0} | b"), vec![lit("b")]);
    assert_eq!(types_of("a{0,0} | b"), vec![lit("b")]);
    assert_eq!(types_of("<length>{0}"), vec![MixedType::GenericString]);
    assert!(!Typer::with_registry(registry())
        .resolve_syntax("test", "<length>{0} | auto")
        .unwrap()
        .needs_length);
}

#[test]
fn test_configured_limit_is_clamped() {
    let config = TyperConfig {
        max_combinator_operands: 64,
        ..TyperConfig::default()
    };
    let keywords: Vec<String> = (0..64).map(|index| format!("k{}", index)).collect();
    let mut typer = Typer::new(
        registry(),
        SyntaxTable::from_iter([
            ("wide", keywords.join(" || ")),
            ("all", keywords[..11].join(" && ")),
        ]),
        config,
    );

    assert_eq!(
        typer.resolve_property("wide").unwrap().unwrap().types,
        vec![MixedType::GenericString]
    );
    assert_eq!(
        typer.resolve_property("all").unwrap().unwrap().types,
        vec![MixedType::GenericString]
    );
    assert_eq!(
        typer.warnings()[1],
        Warning::CombinatorOverflow {
            combinator: String::from("&&"),
            operands: 11,
            limit: 10,
            referrer: String::from("all"),
        }
    );
    assert_eq!(typer.stats().combinator_overflows, 2);
}
