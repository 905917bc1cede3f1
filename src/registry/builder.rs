use std::{collections::HashMap, sync::Arc};

use thiserror::Error;

use super::{
    units_file::{PrefixEntry, SiPrefix, UnitEntry, UnitsFile},
    Registry,
};
use crate::{
    lexer::{Cursor, TokenKind},
    maker::Maker,
    parser::{self, ParseError, ParseFlags, UnitLookup},
    quantity::Quantity,
    unit::{Prefix, PrefixError},
};

/// Builder to create a custom [`Registry`]
///
/// Units can be added one by one or with a [`UnitsFile`]. More than one file
/// can be added, and units from one file can be used in the definitions of
/// the next ones.
///
/// A unit can only be defined from units that already exist, so registries
/// built in code never have cyclic definitions. Definitions in a
/// [`UnitsFile`] are sorted by their dependencies before being added, and
/// cycles are an error.
#[derive(Debug, Default)]
pub struct RegistryBuilder {
    inner: Registry,
}

impl RegistryBuilder {
    /// New empty builder
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the name of the registry
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.inner.name = Some(name.into());
        self
    }

    /// Set the parent registry
    ///
    /// Units not found in the new registry are looked up in the parent, and
    /// units of the parent can be used in definitions.
    pub fn with_parent(mut self, parent: Arc<Registry>) -> Self {
        self.inner.parent = Some(parent);
        self
    }

    /// Add a [`UnitsFile`] to the builder
    pub fn with_units_file(mut self, file: UnitsFile) -> Result<Self, RegistryBuilderError> {
        self.add_units_file(file)?;
        Ok(self)
    }

    /// Add a [`UnitsFile`] to the builder
    ///
    /// The name of the file, if any, replaces the name of the registry.
    pub fn add_units_file(&mut self, file: UnitsFile) -> Result<&mut Self, RegistryBuilderError> {
        let UnitsFile {
            name,
            si,
            prefix,
            unit,
        } = file;
        tracing::debug!(
            name = name.as_deref().unwrap_or("-"),
            prefixes = prefix.len(),
            units = unit.len(),
            "adding units file"
        );

        if let Some(name) = name {
            self.inner.name = Some(name);
        }

        if let Some(prefixes) = si.and_then(|si| si.prefixes) {
            for (si_prefix, symbols) in prefixes {
                let Some((symbol, aliases)) = symbols.split_first() else {
                    continue;
                };
                let aliases = aliases.iter().map(String::as_str).collect::<Vec<_>>();
                self.add_prefix(Prefix::new(symbol.as_str(), si_prefix.ratio()), &aliases)?;
            }
        }

        for PrefixEntry {
            symbol,
            aliases,
            multiplier,
        } in prefix
        {
            let aliases = aliases.iter().map(String::as_str).collect::<Vec<_>>();
            self.add_prefix(Prefix::new(symbol, multiplier), &aliases)?;
        }

        for entry in sort_units(unit, &self.inner)? {
            let aliases = entry.aliases.iter().map(String::as_str).collect::<Vec<_>>();
            match &entry.definition {
                None => {
                    self.add_primitive(entry.symbol.as_str(), &aliases)?;
                }
                Some(definition) => {
                    let quantity = parser::parse(definition, &*self, ParseFlags::default())
                        .map_err(|source| RegistryBuilderError::InvalidDefinition {
                            symbol: entry.symbol.clone(),
                            definition: definition.clone(),
                            source,
                        })?;
                    self.add_derived(entry.symbol.as_str(), &aliases, quantity)?;
                }
            }
        }

        Ok(self)
    }

    /// Add a new primitive unit
    ///
    /// Returns the [`Maker`] of the unit.
    pub fn add_primitive(
        &mut self,
        symbol: &str,
        aliases: &[&str],
    ) -> Result<Maker, RegistryBuilderError> {
        let maker = Maker::primitive(symbol);
        self.add_maker(&maker, aliases)?;
        Ok(maker)
    }

    /// Add a new unit defined from other units
    ///
    /// Returns the [`Maker`] of the unit.
    pub fn add_derived(
        &mut self,
        symbol: &str,
        aliases: &[&str],
        definition: impl Into<Quantity>,
    ) -> Result<Maker, RegistryBuilderError> {
        let maker = Maker::derive(symbol, definition);
        self.add_maker(&maker, aliases)?;
        Ok(maker)
    }

    /// Add an existing unit
    ///
    /// The maker has to be a single unit, like the ones returned by
    /// [`Maker::primitive`] or [`Maker::derive`].
    pub fn add_unit(
        &mut self,
        maker: &Maker,
        aliases: &[&str],
    ) -> Result<&mut Self, RegistryBuilderError> {
        self.add_maker(maker, aliases)?;
        Ok(self)
    }

    /// Add a prefix
    pub fn add_prefix(
        &mut self,
        prefix: Prefix,
        aliases: &[&str],
    ) -> Result<&mut Self, RegistryBuilderError> {
        tracing::debug!(
            prefix = prefix.symbol(),
            multiplier = prefix.multiplier(),
            "new prefix"
        );
        self.inner.insert_prefix(prefix, aliases)?;
        Ok(self)
    }

    /// Add the 20 SI prefixes from `Y` to `y`
    ///
    /// `µ` also gets `u` as an alias.
    pub fn add_si_prefixes(&mut self) -> Result<&mut Self, RegistryBuilderError> {
        for p in SiPrefix::ALL {
            let aliases: &[&str] = match p {
                SiPrefix::Micro => &["u"],
                _ => &[],
            };
            self.add_prefix(Prefix::new(p.symbol(), p.ratio()), aliases)?;
        }
        Ok(self)
    }

    /// Finds a unit added to the builder or in the parent
    pub fn find(&self, symbol: &str) -> Option<Maker> {
        self.inner.find(symbol)
    }

    /// Consume the builder and return the new [`Registry`]
    pub fn finish(self) -> Registry {
        tracing::debug!(
            name = self.inner.name(),
            units = self.inner.unit_count(),
            prefixes = self.inner.all_prefixes.len(),
            "registry built"
        );
        self.inner
    }

    fn add_maker(&mut self, maker: &Maker, aliases: &[&str]) -> Result<(), RegistryBuilderError> {
        let unit = maker.unit().ok_or_else(|| RegistryBuilderError::NotNamedUnit {
            units: maker.to_string(),
        })?;
        tracing::debug!(unit = unit.symbol(), ?aliases, "new unit");
        self.inner.insert_unit(Arc::clone(unit), aliases)?;
        Ok(())
    }
}

impl UnitLookup for RegistryBuilder {
    fn find(&self, symbol: &str) -> Option<Maker> {
        self.inner.find(symbol)
    }
}

/// Sorts the entries so every unit comes after the units in its definition
fn sort_units(
    units: Vec<UnitEntry>,
    registry: &Registry,
) -> Result<Vec<UnitEntry>, RegistryBuilderError> {
    let mut index = HashMap::<&str, usize>::new();
    for (id, entry) in units.iter().enumerate() {
        for key in std::iter::once(&entry.symbol).chain(&entry.aliases) {
            // duplicates are reported when the units are added
            index.entry(key.as_str()).or_insert(id);
        }
    }

    let dependencies = units
        .iter()
        .map(|entry| {
            let Some(definition) = &entry.definition else {
                return Vec::new();
            };
            words(definition)
                .filter_map(|word| resolve(word, &index, registry))
                .collect::<Vec<_>>()
        })
        .collect::<Vec<_>>();

    #[derive(Clone, Copy, PartialEq)]
    enum Mark {
        New,
        Visiting,
        Done,
    }

    fn visit(
        id: usize,
        dependencies: &[Vec<usize>],
        marks: &mut [Mark],
        path: &mut Vec<usize>,
        order: &mut Vec<usize>,
    ) -> Result<(), Vec<usize>> {
        match marks[id] {
            Mark::Done => return Ok(()),
            Mark::Visiting => {
                let start = path.iter().position(|&p| p == id).unwrap_or(0);
                let mut cycle = path[start..].to_vec();
                cycle.push(id);
                return Err(cycle);
            }
            Mark::New => {}
        }
        marks[id] = Mark::Visiting;
        path.push(id);
        for &dep in &dependencies[id] {
            visit(dep, dependencies, marks, path, order)?;
        }
        path.pop();
        marks[id] = Mark::Done;
        order.push(id);
        Ok(())
    }

    let mut marks = vec![Mark::New; units.len()];
    let mut order = Vec::with_capacity(units.len());
    let mut path = Vec::new();
    for id in 0..units.len() {
        visit(id, &dependencies, &mut marks, &mut path, &mut order).map_err(|cycle| {
            RegistryBuilderError::CyclicDefinition {
                cycle: cycle.iter().map(|&id| units[id].symbol.clone()).collect(),
            }
        })?;
    }

    let mut units = units.into_iter().map(Some).collect::<Vec<_>>();
    Ok(order
        .into_iter()
        .filter_map(|id| units[id].take())
        .collect())
}

/// Unit words of a definition
fn words(definition: &str) -> impl Iterator<Item = &str> {
    let mut cursor = Cursor::new(definition);
    let mut offset = 0;
    std::iter::from_fn(move || loop {
        let token = cursor.advance_token();
        let start = offset;
        offset += token.len as usize;
        match token.kind {
            TokenKind::Eof => return None,
            TokenKind::Word => return Some(&definition[start..offset]),
            _ => {}
        }
    })
}

/// Entry of the file a word of a definition refers to, if any
fn resolve(word: &str, index: &HashMap<&str, usize>, registry: &Registry) -> Option<usize> {
    if let Some(&id) = index.get(word) {
        return Some(id);
    }
    registry
        .prefix_index
        .keys()
        .map(|key| &**key)
        .filter(|key| key.len() < word.len() && word.starts_with(*key))
        .find_map(|key| index.get(&word[key.len()..]).copied())
}

/// Errors generated by [`RegistryBuilder`]
#[derive(Debug, Error)]
pub enum RegistryBuilderError {
    #[error("Duplicate unit: {name}")]
    DuplicateUnit { name: String },

    #[error("Duplicate prefix: {name}")]
    DuplicatePrefix { name: String },

    #[error("Unit or prefix where a symbol or alias is empty: {symbol}")]
    EmptyUnitKey { symbol: String },

    #[error("Invalid definition of '{symbol}': '{definition}'")]
    InvalidDefinition {
        symbol: String,
        definition: String,
        source: ParseError,
    },

    #[error(transparent)]
    Prefix(#[from] PrefixError),

    #[error("Cyclic unit definitions: {}", cycle.join(" -> "))]
    CyclicDefinition { cycle: Vec<String> },

    #[error("Only single units can be added to a registry, got '{units}'")]
    NotNamedUnit { units: String },
}
