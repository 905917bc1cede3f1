//! Building quantities and units

use std::sync::Arc;

use crate::{
    quantity::{Qualified, Quantity},
    ratio::UnitRatio,
    unit::Unit,
};

/// Turns numbers into [`Quantity`]s with fixed units
///
/// A maker is a factor and a [`UnitRatio`]. Makers compose with `*`, `/`,
/// [`Maker::pow`] and [`Maker::recip`] to build unit expressions before any
/// value is attached to them, which is how derived units are defined:
///
/// ```
/// # use dimensional::Maker;
/// let m = Maker::primitive("m");
/// let s = Maker::primitive("s");
/// let speed = &m / &s;
/// assert_eq!(speed.make(3.0).to_string(), "3 m/s");
///
/// let km = Maker::derive("km", m.make(1000.0));
/// assert_eq!(km.make(1.0).reduce(), m.make(1000.0));
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct Maker {
    factor: f64,
    units: UnitRatio,
}

impl Maker {
    pub fn new(factor: f64, units: UnitRatio) -> Self {
        Self { factor, units }
    }

    /// Maker of unitless values multiplied by `factor`
    pub fn scalar(factor: f64) -> Self {
        Self::new(factor, UnitRatio::empty())
    }

    /// Maker of unitless values
    pub fn unity() -> Self {
        Self::scalar(1.0)
    }

    /// Creates a new primitive unit
    ///
    /// Primitive units can not be reduced. In unit systems they should be the
    /// base units or unitless fundamental constants.
    pub fn primitive(symbol: impl Into<Arc<str>>) -> Self {
        Self::from_unit(Unit::primitive(symbol))
    }

    /// Creates a new unit defined as `definition`
    pub fn derive(symbol: impl Into<Arc<str>>, definition: impl Into<Quantity>) -> Self {
        Self::from_unit(Unit::derived(symbol, definition.into()))
    }

    pub fn from_unit(unit: Arc<Unit>) -> Self {
        Self::new(1.0, UnitRatio::from_unit(unit))
    }

    /// Creates a quantity of `value` in the units of the maker
    pub fn make(&self, value: f64) -> Quantity {
        Quantity::new(self.factor * value, self.units.clone())
    }

    pub fn factor(&self) -> f64 {
        self.factor
    }

    pub fn units(&self) -> &UnitRatio {
        &self.units
    }

    pub fn into_units(self) -> UnitRatio {
        self.units
    }

    /// The unit when this maker is exactly a single unit
    pub fn unit(&self) -> Option<&Arc<Unit>> {
        if self.factor != 1.0 {
            return None;
        }
        self.units.singular()
    }

    pub fn pow(&self, n: i32) -> Self {
        Self::new(self.factor.powi(n), self.units.pow(n))
    }

    pub fn recip(&self) -> Self {
        Self::new(1.0 / self.factor, self.units.recip())
    }
}

impl Qualified for Maker {
    fn scalar(&self) -> f64 {
        self.factor
    }

    fn units(&self) -> &UnitRatio {
        &self.units
    }
}

impl From<Maker> for Quantity {
    fn from(value: Maker) -> Self {
        Quantity::new(value.factor, value.units)
    }
}

impl From<&Maker> for Quantity {
    fn from(value: &Maker) -> Self {
        value.make(1.0)
    }
}

impl From<Quantity> for Maker {
    fn from(value: Quantity) -> Self {
        let (factor, units) = value.into_parts();
        Self::new(factor, units)
    }
}

impl From<UnitRatio> for Maker {
    fn from(value: UnitRatio) -> Self {
        Self::new(1.0, value)
    }
}

impl std::ops::Mul<&Maker> for &Maker {
    type Output = Maker;

    fn mul(self, rhs: &Maker) -> Maker {
        Maker::new(self.factor * rhs.factor, &self.units * &rhs.units)
    }
}

impl std::ops::Div<&Maker> for &Maker {
    type Output = Maker;

    fn div(self, rhs: &Maker) -> Maker {
        Maker::new(self.factor / rhs.factor, &self.units / &rhs.units)
    }
}

forward_binop!(Mul, mul, Maker, Maker, Maker);
forward_binop!(Div, div, Maker, Maker, Maker);
