//! Named units and unit prefixes

use std::{borrow::Cow, fmt, sync::Arc};

use thiserror::Error;

use crate::{maker::Maker, quantity::Quantity, ratio::UnitRatio};

/// A single named unit
///
/// Units are immutable once built and shared with [`Arc`] by every
/// [`UnitRatio`] that uses them. Two units are equal when their symbols match
/// and their definitions are (recursively) equal, so two different `"mi"`
/// units are distinct.
///
/// To create units use [`Maker::primitive`], [`Maker::derive`] or a
/// [`Prefix`].
#[derive(Debug, Clone)]
pub struct Unit {
    symbol: Arc<str>,
    kind: UnitKind,
}

/// How a [`Unit`] is defined
#[derive(Debug, Clone)]
pub enum UnitKind {
    /// Irreducible basis unit.
    Primitive,
    /// Unit defined as a quantity of other units.
    Derived(Quantity),
    /// A prefix multiplier applied to another unit, like `k` + `g`.
    Prefixed {
        prefix: Arc<str>,
        multiplier: f64,
        inner: Arc<Unit>,
    },
}

impl Unit {
    pub(crate) fn primitive(symbol: impl Into<Arc<str>>) -> Arc<Self> {
        Arc::new(Self {
            symbol: symbol.into(),
            kind: UnitKind::Primitive,
        })
    }

    pub(crate) fn derived(symbol: impl Into<Arc<str>>, definition: Quantity) -> Arc<Self> {
        Arc::new(Self {
            symbol: symbol.into(),
            kind: UnitKind::Derived(definition),
        })
    }

    pub(crate) fn prefixed(prefix: &Prefix, inner: Arc<Unit>) -> Arc<Self> {
        let symbol = format!("{}{}", prefix.symbol, inner.symbol);
        Arc::new(Self {
            symbol: symbol.into(),
            kind: UnitKind::Prefixed {
                prefix: Arc::clone(&prefix.symbol),
                multiplier: prefix.multiplier,
                inner,
            },
        })
    }

    /// Symbol of the unit
    pub fn symbol(&self) -> &str {
        &self.symbol
    }

    /// How the unit is defined, see [`UnitKind`]
    pub fn kind(&self) -> &UnitKind {
        &self.kind
    }

    /// What one of this unit equals
    ///
    /// For primitive units this is the unitless scalar 1.
    pub fn definition(&self) -> Cow<'_, Quantity> {
        match &self.kind {
            UnitKind::Primitive => Cow::Owned(Quantity::unitless(1.0)),
            UnitKind::Derived(q) => Cow::Borrowed(q),
            UnitKind::Prefixed {
                multiplier, inner, ..
            } => Cow::Owned(Quantity::new(
                *multiplier,
                UnitRatio::from_unit(Arc::clone(inner)),
            )),
        }
    }

    /// Checks if the unit can not be reduced any further
    ///
    /// A derived unit whose definition is the unitless 1 is also primitive.
    pub fn is_primitive(&self) -> bool {
        match &self.kind {
            UnitKind::Primitive => true,
            UnitKind::Derived(q) => q.scalar() == 1.0 && q.is_unitless(),
            UnitKind::Prefixed { .. } => false,
        }
    }
}

impl PartialEq for Unit {
    fn eq(&self, other: &Self) -> bool {
        if std::ptr::eq(self, other) {
            return true;
        }
        self.symbol == other.symbol && self.definition() == other.definition()
    }
}

impl fmt::Display for Unit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.symbol)
    }
}

/// A unit prefix, like `k` (1000) or `µ` (1e-6)
///
/// A prefix wraps a singular unit and creates a new unit whose symbol is the
/// concatenation of both and whose definition is the inner unit scaled by the
/// multiplier.
#[derive(Debug, Clone, PartialEq)]
pub struct Prefix {
    symbol: Arc<str>,
    multiplier: f64,
}

impl Prefix {
    /// Creates a prefix that scales units by `multiplier`
    pub fn new(symbol: impl Into<Arc<str>>, multiplier: f64) -> Self {
        Self {
            symbol: symbol.into(),
            multiplier,
        }
    }

    /// Text put before the unit symbol, like `k` in `km`
    pub fn symbol(&self) -> &str {
        &self.symbol
    }

    /// Factor the prefixed unit is scaled by
    pub fn multiplier(&self) -> f64 {
        self.multiplier
    }

    /// Applies the prefix to a maker of a single unit
    ///
    /// ```
    /// # use dimensional::{Maker, Prefix};
    /// let g = Maker::primitive("g");
    /// let kg = Prefix::new("k", 1000.0).apply(&g)?;
    /// assert_eq!(kg.make(2.0).reduce(), g.make(2000.0));
    /// # Ok::<(), dimensional::unit::PrefixError>(())
    /// ```
    pub fn apply(&self, inner: &Maker) -> Result<Maker, PrefixError> {
        let unit = inner.unit().ok_or_else(|| PrefixError::NotSingular {
            prefix: self.symbol.to_string(),
            units: inner.units().to_string(),
        })?;
        Ok(Maker::from_unit(Unit::prefixed(self, Arc::clone(unit))))
    }
}

/// Errors from [`Prefix::apply`]
#[derive(Debug, Error, Clone, PartialEq)]
pub enum PrefixError {
    #[error("prefix '{prefix}' must wrap a singular unit, got '{units}'")]
    NotSingular { prefix: String, units: String },
}
