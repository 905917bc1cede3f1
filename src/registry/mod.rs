//! Symbol lookup for units and prefixes
//!
//! A [`Registry`] maps unit symbols and aliases to [`Maker`]s and prefix
//! symbols to [`Prefix`]es. Registries can be chained: a child registry
//! consults its parent after its own units, so it can shadow units of the
//! parent, like the US survey mile over the international mile.

use std::sync::Arc;

use indexmap::IndexMap;
use thiserror::Error;

pub use builder::{RegistryBuilder, RegistryBuilderError};
pub use units_file::UnitsFile;

use crate::{
    maker::Maker,
    parser::{self, ParseError, ParseFlags, UnitLookup},
    quantity::Quantity,
    unit::{Prefix, Unit},
};

mod builder;
pub mod units_file;

/// Lookup table of units and prefixes
///
/// Lookup of a symbol is done in order:
/// 1. An exact symbol or alias of this registry.
/// 2. A prefix of this registry (longest first) followed by an exact symbol
///    known to this registry or its parents. Prefixes are not stacked.
/// 3. The parent registry.
#[derive(Debug, Clone, Default)]
pub struct Registry {
    name: Option<String>,
    all_units: Vec<Arc<Unit>>,
    unit_index: IndexMap<Arc<str>, usize>,
    all_prefixes: Vec<Prefix>,
    prefix_index: IndexMap<Arc<str>, usize>,
    parent: Option<Arc<Registry>>,
}

impl Registry {
    /// Start to create a new [`Registry`]
    pub fn builder() -> RegistryBuilder {
        RegistryBuilder::new()
    }

    /// Registry without units
    ///
    /// Parsing anything but plain numbers with it fails unless
    /// [`ParseFlags::ALLOW_UNKNOWN`] is used.
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    pub fn parent(&self) -> Option<&Arc<Registry>> {
        self.parent.as_ref()
    }

    /// Get the number of units defined in this registry
    ///
    /// This does not count the parent units, prefixed units nor aliases.
    pub fn unit_count(&self) -> usize {
        self.all_units.len()
    }

    /// Get an iterator of all the units defined in this registry
    pub fn all_units(&self) -> impl Iterator<Item = &Arc<Unit>> {
        self.all_units.iter()
    }

    /// Get an iterator of all the prefixes defined in this registry
    pub fn all_prefixes(&self) -> impl Iterator<Item = &Prefix> {
        self.all_prefixes.iter()
    }

    /// Finds a unit by symbol, alias or prefixed symbol
    ///
    /// ```
    /// # use dimensional::{Maker, Registry, Prefix};
    /// let mut builder = Registry::builder();
    /// let g = builder.add_primitive("g", &["gram"])?;
    /// builder.add_prefix(Prefix::new("k", 1000.0), &[])?;
    /// let registry = builder.finish();
    ///
    /// assert_eq!(registry.find("gram"), Some(g.clone()));
    /// let kg = registry.find("kg").unwrap();
    /// assert_eq!(kg.make(1.0).reduce(), g.make(1000.0));
    /// assert!(registry.find("kgram").is_none());
    /// # Ok::<(), dimensional::registry::RegistryBuilderError>(())
    /// ```
    pub fn find(&self, symbol: &str) -> Option<Maker> {
        self.find_unit(symbol).map(Maker::from_unit)
    }

    /// Same as [`Registry::find`] but returns the [`Unit`]
    pub fn find_unit(&self, symbol: &str) -> Option<Arc<Unit>> {
        if let Some(&id) = self.unit_index.get(symbol) {
            return Some(Arc::clone(&self.all_units[id]));
        }
        if let Some(unit) = self.find_prefixed(symbol) {
            return Some(unit);
        }
        self.parent.as_ref().and_then(|p| p.find_unit(symbol))
    }

    /// Finds a prefix of this registry by symbol or alias
    pub fn find_prefix(&self, symbol: &str) -> Option<&Prefix> {
        self.prefix_index
            .get(symbol)
            .map(|&id| &self.all_prefixes[id])
    }

    /// Same as [`Registry::find`] but returns an error when not found
    pub fn get(&self, symbol: &str) -> Result<Maker, UnknownUnit> {
        self.find(symbol)
            .ok_or_else(|| UnknownUnit(symbol.to_string()))
    }

    /// Parses a quantity with the units of this registry
    ///
    /// Uses [`ParseFlags::default`].
    pub fn parse(&self, input: &str) -> Result<Quantity, ParseError> {
        self.parse_with(input, ParseFlags::default())
    }

    /// Parses a quantity with the units of this registry
    pub fn parse_with(&self, input: &str, flags: ParseFlags) -> Result<Quantity, ParseError> {
        parser::parse(input, self, flags)
    }

    /// Exact symbol or alias here or in a parent
    fn find_exact(&self, symbol: &str) -> Option<Arc<Unit>> {
        let mut registry = Some(self);
        while let Some(r) = registry {
            if let Some(&id) = r.unit_index.get(symbol) {
                return Some(Arc::clone(&r.all_units[id]));
            }
            registry = r.parent.as_deref();
        }
        None
    }

    fn find_prefixed(&self, symbol: &str) -> Option<Arc<Unit>> {
        let mut candidates = self
            .prefix_index
            .iter()
            .map(|(key, &id)| (&**key, id))
            .filter(|(key, _)| key.len() < symbol.len() && symbol.starts_with(key))
            .collect::<Vec<_>>();
        // longest prefix first
        candidates.sort_by_key(|(key, _)| std::cmp::Reverse(key.len()));

        for (key, id) in candidates {
            let rest = &symbol[key.len()..];
            let Some(unit) = self.find_exact(rest) else {
                continue;
            };
            let prefix = &self.all_prefixes[id];
            if let Ok(maker) = prefix.apply(&Maker::from_unit(unit)) {
                return maker.unit().cloned();
            }
        }
        None
    }

    fn insert_unit(
        &mut self,
        unit: Arc<Unit>,
        aliases: &[&str],
    ) -> Result<usize, RegistryBuilderError> {
        let id = self.all_units.len();
        let keys = std::iter::once(unit.symbol())
            .chain(aliases.iter().copied())
            .collect::<Vec<_>>();
        for (i, key) in keys.iter().enumerate() {
            if key.trim().is_empty() {
                return Err(RegistryBuilderError::EmptyUnitKey {
                    symbol: unit.symbol().to_string(),
                });
            }
            if self.unit_index.contains_key(*key) || keys[..i].contains(key) {
                return Err(RegistryBuilderError::DuplicateUnit {
                    name: key.to_string(),
                });
            }
        }
        for key in keys {
            self.unit_index.insert(key.into(), id);
        }
        self.all_units.push(unit);
        Ok(id)
    }

    fn insert_prefix(
        &mut self,
        prefix: Prefix,
        aliases: &[&str],
    ) -> Result<usize, RegistryBuilderError> {
        let id = self.all_prefixes.len();
        let keys = std::iter::once(prefix.symbol())
            .chain(aliases.iter().copied())
            .collect::<Vec<_>>();
        for (i, key) in keys.iter().enumerate() {
            if key.trim().is_empty() {
                return Err(RegistryBuilderError::EmptyUnitKey {
                    symbol: prefix.symbol().to_string(),
                });
            }
            if self.prefix_index.contains_key(*key) || keys[..i].contains(key) {
                return Err(RegistryBuilderError::DuplicatePrefix {
                    name: key.to_string(),
                });
            }
        }
        for key in keys {
            self.prefix_index.insert(key.into(), id);
        }
        self.all_prefixes.push(prefix);
        Ok(id)
    }
}

impl UnitLookup for Registry {
    fn find(&self, symbol: &str) -> Option<Maker> {
        Registry::find(self, symbol)
    }
}

/// Error when a symbol is not known to a [`Registry`]
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("Unknown unit: '{0}'")]
pub struct UnknownUnit(pub String);
