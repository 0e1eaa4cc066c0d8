use std::{
    collections::{BTreeSet, HashMap, HashSet},
    rc::Rc,
};

use tracing::{debug, warn};

use crate::{
    ast::ast::SyntaxNode,
    config::TyperConfig,
    errors::errors::{Error, ErrorImpl, Warning},
    parser::parser::parse_syntax,
    Position, Source,
};

use super::{
    combinatorics::{non_empty_subsets, permutations},
    registry::{BasicDataType, SyntaxTable, LENGTH_UNITS},
    types::{DeclarableType, Generic, MixedType, TypeSet},
};

/// The resolved type list of one name or syntax string.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Resolution {
    pub types: Vec<MixedType>,
    pub needs_length: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NameKind {
    DataType,
    Property,
}

/// A name in the order it was first resolved.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ResolvedName {
    pub kind: NameKind,
    pub name: String,
}

impl ResolvedName {
    pub fn data_type(name: &str) -> Self {
        ResolvedName {
            kind: NameKind::DataType,
            name: String::from(name),
        }
    }

    pub fn property(name: &str) -> Self {
        ResolvedName {
            kind: NameKind::Property,
            name: String::from(name),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TyperStats {
    pub resolved_names: usize,
    pub parsed_syntaxes: usize,
    pub ast_cache_hits: usize,
    pub syntax_cache_hits: usize,
    pub unknown_references: usize,
    pub combinator_overflows: usize,
    pub cyclic_references: usize,
}

/// Run-scoped resolution context.
///
/// Holds the registries and every cache of a generation run. Names are
/// resolved lazily and memoized; a name being resolved is marked in
/// progress so that cyclic `<'property'>` references terminate.
#[derive(Debug)]
pub struct Typer {
    config: TyperConfig,
    data_types: SyntaxTable,
    properties: SyntaxTable,
    ast_cache: HashMap<String, Rc<SyntaxNode>>,
    syntax_lookup: HashMap<String, Rc<Vec<MixedType>>>,
    name_lookup: HashMap<ResolvedName, Rc<Vec<MixedType>>>,
    resolved_order: Vec<ResolvedName>,
    in_progress: HashSet<ResolvedName>,
    /// In-progress names hit by a reference; results computed meanwhile are not cached
    cycle_refs: HashSet<ResolvedName>,
    length_lookup: HashMap<String, bool>,
    warnings: Vec<Warning>,
    stats: TyperStats,
}

impl Typer {
    pub fn new(data_types: SyntaxTable, properties: SyntaxTable, config: TyperConfig) -> Self {
        Typer {
            config,
            data_types,
            properties,
            ast_cache: HashMap::new(),
            syntax_lookup: HashMap::new(),
            name_lookup: HashMap::new(),
            resolved_order: vec![],
            in_progress: HashSet::new(),
            cycle_refs: HashSet::new(),
            length_lookup: HashMap::new(),
            warnings: vec![],
            stats: TyperStats::default(),
        }
    }

    pub fn with_registry(data_types: SyntaxTable) -> Self {
        Typer::new(data_types, SyntaxTable::new(), TyperConfig::default())
    }

    /// Clears every cache so the typer can serve a new run.
    pub fn reset(&mut self) {
        self.ast_cache.clear();
        self.syntax_lookup.clear();
        self.name_lookup.clear();
        self.resolved_order.clear();
        self.in_progress.clear();
        self.cycle_refs.clear();
        self.length_lookup.clear();
        self.warnings.clear();
        self.stats = TyperStats::default();
    }

    pub fn warnings(&self) -> &[Warning] {
        &self.warnings
    }

    pub fn stats(&self) -> &TyperStats {
        &self.stats
    }

    /// Names in the order they were first resolved.
    pub fn resolved_names(&self) -> &[ResolvedName] {
        &self.resolved_order
    }

    pub fn is_known_data_type(&self, name: &str) -> bool {
        BasicDataType::lookup(name).is_some() || self.data_types.contains(name)
    }

    /// Parses a syntax string, reusing the tree of an identical string.
    pub fn parse_cached(&mut self, name: &str, syntax: &str) -> Result<Rc<SyntaxNode>, Error> {
        if let Some(node) = self.ast_cache.get(syntax) {
            self.stats.ast_cache_hits += 1;
            return Ok(Rc::clone(node));
        }

        let node = Rc::new(parse_syntax(name, syntax)?);
        self.stats.parsed_syntaxes += 1;
        self.ast_cache.insert(String::from(syntax), Rc::clone(&node));

        Ok(node)
    }

    /// Resolves a property from the property table.
    ///
    /// Returns `None` when the table has no such property.
    #[tracing::instrument(level = "debug", skip(self))]
    pub fn resolve_property(&mut self, name: &str) -> Result<Option<Resolution>, Error> {
        let syntax = match self.properties.get(name) {
            Some(syntax) => String::from(syntax),
            None => return Ok(None),
        };

        let types = self.resolve_entry(ResolvedName::property(name), &syntax)?;
        self.resolution_of(&types).map(Some)
    }

    /// Resolves a data type from the registry or the basic data types.
    #[tracing::instrument(level = "debug", skip(self))]
    pub fn resolve_data_type(&mut self, name: &str) -> Result<Resolution, Error> {
        let types = self.data_type_types(name)?;
        self.resolution_of(&types)
    }

    /// Resolves a syntax that is not in any table, e.g. an at-rule descriptor.
    ///
    /// Identical syntax strings share one resolution.
    #[tracing::instrument(level = "debug", skip(self))]
    pub fn resolve_syntax(&mut self, name: &str, syntax: &str) -> Result<Resolution, Error> {
        let types = match self.syntax_lookup.get(syntax) {
            Some(types) => {
                self.stats.syntax_cache_hits += 1;
                Rc::clone(types)
            }
            None => {
                let types = Rc::new(self.resolve_syntax_uncached(name, syntax)?);
                if self.cycle_refs.is_empty() {
                    self.syntax_lookup
                        .insert(String::from(syntax), Rc::clone(&types));
                }
                types
            }
        };

        self.resolution_of(&types)
    }

    /// Resolves an already parsed tree. Nothing is memoized by name.
    pub fn resolve_tree(&mut self, node: &SyntaxNode, referrer: &str) -> Result<Resolution, Error> {
        let set = self.resolve_node(node, referrer)?;
        let types = Rc::new(self.finish(set));
        self.resolution_of(&types)
    }

    /// Resolves every property of the table, in table order.
    pub fn resolve_all_properties(&mut self) -> Result<Vec<(String, Resolution)>, Error> {
        let names: Vec<String> = self.properties.names().map(String::from).collect();

        let mut resolved = Vec::with_capacity(names.len());
        for name in names {
            if let Some(resolution) = self.resolve_property(&name)? {
                resolved.push((name, resolution));
            }
        }

        Ok(resolved)
    }

    /// Resolves every registry data type, in registry order.
    pub fn resolve_all_data_types(&mut self) -> Result<Vec<(String, Resolution)>, Error> {
        let names: Vec<String> = self.data_types.names().map(String::from).collect();

        let mut resolved = Vec::with_capacity(names.len());
        for name in names {
            let resolution = self.resolve_data_type(&name)?;
            resolved.push((name, resolution));
        }

        Ok(resolved)
    }

    /// Whether a type list needs a length generic, directly or through data types.
    pub fn needs_length(&mut self, types: &[MixedType]) -> Result<bool, Error> {
        if types.contains(&MixedType::Length) {
            return Ok(true);
        }

        for name in types.iter().filter_map(MixedType::data_type_name) {
            if self.data_type_needs_length(name)? {
                return Ok(true);
            }
        }

        Ok(false)
    }

    /// Whether `Length` is reachable from a data type through `DataType` references.
    ///
    /// Each data type is visited once, so cycles contribute nothing.
    pub fn data_type_needs_length(&mut self, name: &str) -> Result<bool, Error> {
        if let Some(&needs_length) = self.length_lookup.get(name) {
            return Ok(needs_length);
        }

        let mut visited = HashSet::new();
        let mut stack = vec![String::from(name)];
        let mut found = false;

        while let Some(current) = stack.pop() {
            if !visited.insert(current.clone()) {
                continue;
            }

            if let Some(&known) = self.length_lookup.get(&current) {
                if known {
                    found = true;
                    break;
                }
                continue;
            }

            let types = self.data_type_types(&current)?;
            if types.contains(&MixedType::Length) {
                found = true;
                break;
            }

            stack.extend(
                types
                    .iter()
                    .filter_map(MixedType::data_type_name)
                    .map(String::from),
            );
        }

        if found {
            self.length_lookup.insert(String::from(name), true);
        } else {
            // Nothing reachable from any visited name needs a length
            for visited_name in visited {
                self.length_lookup.insert(visited_name, false);
            }
        }

        Ok(found)
    }

    /// Rewrites data type placeholders into declarable aliases.
    ///
    /// Basic data types are inlined; other data types become aliases that
    /// carry a length generic when their own type list needs one.
    pub fn normalize(&mut self, types: &[MixedType]) -> Result<Vec<DeclarableType>, Error> {
        let mut normalized = BTreeSet::new();

        for ty in types {
            normalized.insert(match ty {
                MixedType::StringLiteral(value) => DeclarableType::StringLiteral(value.clone()),
                MixedType::NumericLiteral(value) => DeclarableType::NumericLiteral(*value),
                MixedType::GenericString => DeclarableType::GenericString,
                MixedType::GenericNumber => DeclarableType::GenericNumber,
                MixedType::Length => DeclarableType::Length,
                MixedType::DataType(name) => match BasicDataType::lookup(name) {
                    Some(basic) => basic.as_declarable(),
                    None => DeclarableType::Alias {
                        name: name.clone(),
                        generics: if self.data_type_needs_length(name)? {
                            vec![Generic::Length]
                        } else {
                            vec![]
                        },
                    },
                },
            });
        }

        Ok(normalized.into_iter().collect())
    }

    fn data_type_types(&mut self, name: &str) -> Result<Rc<Vec<MixedType>>, Error> {
        let key = ResolvedName::data_type(name);
        if let Some(types) = self.name_lookup.get(&key) {
            return Ok(Rc::clone(types));
        }

        if let Some(basic) = BasicDataType::lookup(name) {
            let types = Rc::new(vec![basic.as_mixed()]);
            self.name_lookup.insert(key, Rc::clone(&types));
            return Ok(types);
        }

        match self.data_types.get(name) {
            Some(syntax) => {
                let syntax = String::from(syntax);
                self.resolve_entry(key, &syntax)
            }
            None => {
                self.report(Warning::UnknownDataTypeReference {
                    name: String::from(name),
                    referrer: String::from(name),
                });
                Ok(Rc::new(vec![MixedType::GenericString]))
            }
        }
    }

    fn resolve_entry(&mut self, key: ResolvedName, syntax: &str) -> Result<Rc<Vec<MixedType>>, Error> {
        if let Some(types) = self.name_lookup.get(&key) {
            return Ok(Rc::clone(types));
        }

        if let Some(types) = self.syntax_lookup.get(syntax) {
            let types = Rc::clone(types);
            self.stats.syntax_cache_hits += 1;
            debug!(name = %key.name, "reusing resolution of an identical syntax");
            self.record(key, Rc::clone(&types));
            return Ok(types);
        }

        self.in_progress.insert(key.clone());
        let result = self.resolve_syntax_uncached(&key.name, syntax);
        self.in_progress.remove(&key);
        self.cycle_refs.remove(&key);

        let types = Rc::new(result?);

        if self.cycle_refs.is_empty() {
            self.syntax_lookup
                .insert(String::from(syntax), Rc::clone(&types));
            self.record(key, Rc::clone(&types));
        }

        Ok(types)
    }

    fn record(&mut self, key: ResolvedName, types: Rc<Vec<MixedType>>) {
        debug!(name = %key.name, kind = ?key.kind, types = types.len(), "resolved");
        self.stats.resolved_names += 1;
        self.resolved_order.push(key.clone());
        self.name_lookup.insert(key, types);
    }

    fn resolution_of(&mut self, types: &Rc<Vec<MixedType>>) -> Result<Resolution, Error> {
        Ok(Resolution {
            needs_length: self.needs_length(types)?,
            types: types.as_ref().clone(),
        })
    }

    fn resolve_syntax_uncached(&mut self, name: &str, syntax: &str) -> Result<Vec<MixedType>, Error> {
        let node = self.parse_cached(name, syntax)?;
        let set = self.resolve_node(&node, name)?;
        Ok(self.finish(set))
    }

    fn finish(&self, set: TypeSet) -> Vec<MixedType> {
        if set.is_empty() && self.config.fallback_on_empty {
            return vec![MixedType::GenericString];
        }
        set.into_iter().collect()
    }

    fn report(&mut self, warning: Warning) {
        warn!("{}", warning);

        match &warning {
            Warning::UnknownDataTypeReference { .. } | Warning::UnknownPropertyReference { .. } => {
                self.stats.unknown_references += 1
            }
            Warning::CyclicPropertyReference { .. } => self.stats.cyclic_references += 1,
            Warning::CombinatorOverflow { .. } => self.stats.combinator_overflows += 1,
        }

        self.warnings.push(warning);
    }

    fn internal_error(&self, node: &SyntaxNode, referrer: &str, message: &str) -> Error {
        Error::new(
            ErrorImpl::InternalConsistency {
                message: format!("{:?} {}", node.get_node_kind(), message),
            },
            Position(0, Rc::new(Source::new(referrer, node.to_string()))),
        )
    }

    fn resolve_node(&mut self, node: &SyntaxNode, referrer: &str) -> Result<TypeSet, Error> {
        match node {
            SyntaxNode::Keyword(value) => Ok(single(MixedType::StringLiteral(value.clone()))),
            SyntaxNode::LiteralSymbol {
                value,
                quoted: true,
            } => Ok(single(MixedType::StringLiteral(value.clone()))),
            SyntaxNode::LiteralSymbol { quoted: false, .. } => Ok(TypeSet::new()),
            SyntaxNode::Numeric { value, unit } => Ok(single(numeric_type(value, unit.as_deref()))),
            SyntaxNode::DataTypeRef {
                name,
                property_ref: true,
                ..
            } => self.resolve_property_ref(name, referrer),
            SyntaxNode::DataTypeRef { name, .. } => {
                if self.is_known_data_type(name) {
                    Ok(single(MixedType::DataType(name.clone())))
                } else {
                    self.report(Warning::UnknownDataTypeReference {
                        name: name.clone(),
                        referrer: String::from(referrer),
                    });
                    Ok(single(MixedType::GenericString))
                }
            }
            SyntaxNode::FunctionTerm { .. } => Ok(single(MixedType::GenericString)),
            SyntaxNode::Sequence(items) => match items.as_slice() {
                [] => Ok(TypeSet::new()),
                [item] => self.resolve_node(item, referrer),
                _ => Ok(single(MixedType::GenericString)),
            },
            SyntaxNode::OneOf(items) => {
                if items.is_empty() {
                    return Err(self.internal_error(node, referrer, "`|` without operands"));
                }

                let mut set = TypeSet::new();
                for item in items {
                    set.extend(self.resolve_node(item, referrer)?);
                }
                Ok(set)
            }
            SyntaxNode::AnyOrder(items) => {
                if items.is_empty() {
                    return Err(self.internal_error(node, referrer, "`||` without operands"));
                }
                if self.overflows("||", items.len(), referrer) {
                    return Ok(single(MixedType::GenericString));
                }

                let parts = self.resolve_operands(items, referrer)?;

                let mut set = TypeSet::new();
                for subset in non_empty_subsets(parts.len()) {
                    let sequence: Vec<&TypeSet> = subset.iter().map(|&index| &parts[index]).collect();
                    set.extend(sequence_of(&sequence));
                }
                Ok(set)
            }
            SyntaxNode::AllRequiredAnyOrder(items) => {
                if items.is_empty() {
                    return Err(self.internal_error(node, referrer, "`&&` without operands"));
                }
                if self.overflows("&&", items.len(), referrer) {
                    return Ok(single(MixedType::GenericString));
                }

                let parts = self.resolve_operands(items, referrer)?;

                let mut set = TypeSet::new();
                for permutation in permutations(parts.len()) {
                    let sequence: Vec<&TypeSet> =
                        permutation.iter().map(|&index| &parts[index]).collect();
                    set.extend(sequence_of(&sequence));
                }
                Ok(set)
            }
            SyntaxNode::Group {
                inner,
                bracketed: true,
            } => self.resolve_node(inner, referrer),
            SyntaxNode::Group {
                bracketed: false, ..
            } => Ok(single(MixedType::GenericString)),
            SyntaxNode::Multiplied { max: Some(0), .. } => Ok(TypeSet::new()),
            SyntaxNode::Multiplied { inner, .. } => {
                if node.is_non_repeating() {
                    self.resolve_node(inner, referrer)
                } else {
                    Ok(single(MixedType::GenericString))
                }
            }
        }
    }

    fn resolve_operands(&mut self, items: &[SyntaxNode], referrer: &str) -> Result<Vec<TypeSet>, Error> {
        items
            .iter()
            .map(|item| self.resolve_node(item, referrer))
            .collect()
    }

    fn resolve_property_ref(&mut self, name: &str, referrer: &str) -> Result<TypeSet, Error> {
        if !self.config.inline_property_references {
            return Ok(single(MixedType::GenericString));
        }

        let syntax = match self.properties.get(name) {
            Some(syntax) => String::from(syntax),
            None => {
                self.report(Warning::UnknownPropertyReference {
                    name: String::from(name),
                    referrer: String::from(referrer),
                });
                return Ok(single(MixedType::GenericString));
            }
        };

        let key = ResolvedName::property(name);
        if self.in_progress.contains(&key) {
            self.report(Warning::CyclicPropertyReference {
                name: String::from(name),
                referrer: String::from(referrer),
            });
            self.cycle_refs.insert(key);
            return Ok(single(MixedType::GenericString));
        }

        let types = self.resolve_entry(key, &syntax)?;
        Ok(types.iter().cloned().collect())
    }

    fn overflows(&mut self, combinator: &str, operands: usize, referrer: &str) -> bool {
        let limit = self.config.operand_limit();
        if operands <= limit {
            return false;
        }

        self.report(Warning::CombinatorOverflow {
            combinator: String::from(combinator),
            operands,
            limit,
            referrer: String::from(referrer),
        });
        true
    }
}

fn single(ty: MixedType) -> TypeSet {
    TypeSet::from([ty])
}

/// An ordered sequence of operands: one operand keeps its shapes, more collapse.
fn sequence_of(parts: &[&TypeSet]) -> TypeSet {
    match parts {
        [] => TypeSet::new(),
        [part] => (*part).clone(),
        _ => single(MixedType::GenericString),
    }
}

fn numeric_type(value: &str, unit: Option<&str>) -> MixedType {
    match unit {
        None => match value.parse::<i64>() {
            Ok(number) => MixedType::NumericLiteral(number),
            Err(_) => MixedType::GenericNumber,
        },
        Some(unit) if LENGTH_UNITS.contains(unit.to_ascii_lowercase().as_str()) => MixedType::Length,
        Some(_) => MixedType::GenericString,
    }
}

/// Resolves a tree against a data type registry with a fresh, default typer.
pub fn resolve(node: &SyntaxNode, registry: &SyntaxTable) -> Result<Resolution, Error> {
    let mut typer = Typer::with_registry(registry.clone());
    typer.resolve_tree(node, "<anonymous>")
}
