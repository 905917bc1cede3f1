//! Quantity model

use std::cmp::Ordering;

use crate::{convert::ConvertError, ratio::UnitRatio};

/// Something with a scalar and units
///
/// Implemented by [`Quantity`], [`Maker`](crate::Maker) and [`UnitRatio`]
/// (scalar 1) so any of them can be used as a conversion target or a
/// comparison operand.
pub trait Qualified {
    fn scalar(&self) -> f64;
    fn units(&self) -> &UnitRatio;

    fn to_quantity(&self) -> Quantity {
        Quantity::new(self.scalar(), self.units().clone())
    }
}

/// A measured value: a scalar in some units
///
/// Quantities are values; every operation returns a new one.
///
/// `==` is strict: units must be equal (not only equivalent) and so must the
/// scalars. To compare quantities in different but conformable units use
/// [`Quantity::equivalent`] or [`Quantity::approx_eq`].
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Quantity {
    scalar: f64,
    units: UnitRatio,
}

impl Quantity {
    pub fn new(scalar: f64, units: UnitRatio) -> Self {
        Self { scalar, units }
    }

    /// Quantity without units
    pub fn unitless(scalar: f64) -> Self {
        Self {
            scalar,
            units: UnitRatio::empty(),
        }
    }

    pub fn scalar(&self) -> f64 {
        self.scalar
    }

    pub fn units(&self) -> &UnitRatio {
        &self.units
    }

    pub fn into_units(self) -> UnitRatio {
        self.units
    }

    pub fn into_parts(self) -> (f64, UnitRatio) {
        (self.scalar, self.units)
    }

    pub fn is_unitless(&self) -> bool {
        self.units.is_empty()
    }

    /// Multiplies only the scalar, keeping the units
    pub fn mul_scalar(&self, n: f64) -> Self {
        Self::new(self.scalar * n, self.units.clone())
    }

    /// Divides only the scalar, keeping the units
    pub fn div_scalar(&self, n: f64) -> Self {
        Self::new(self.scalar / n, self.units.clone())
    }

    /// Adds to the scalar, keeping the units
    pub fn add_scalar(&self, n: f64) -> Self {
        Self::new(self.scalar + n, self.units.clone())
    }

    /// Subtracts from the scalar, keeping the units
    pub fn sub_scalar(&self, n: f64) -> Self {
        Self::new(self.scalar - n, self.units.clone())
    }

    /// Raises scalar and units to an integer power
    pub fn pow(&self, n: i32) -> Self {
        Self::new(self.scalar.powi(n), self.units.pow(n))
    }

    pub fn recip(&self) -> Self {
        Self::new(1.0 / self.scalar, self.units.recip())
    }

    /// Same quantity in primitive units
    pub fn reduce(&self) -> Self {
        let reduced = self.units.reduce();
        reduced.mul_scalar(self.scalar)
    }

    /// Adds two quantities
    ///
    /// `rhs` is converted to the units of `self`. The result keeps the units
    /// of `self`. Fails if the units are not conformable.
    pub fn try_add(&self, rhs: &impl Qualified) -> Result<Self, ConvertError> {
        let rhs = self.conform(rhs)?;
        Ok(self.add_scalar(rhs.scalar))
    }

    /// Subtracts two quantities
    ///
    /// Same rules as [`Quantity::try_add`].
    pub fn try_sub(&self, rhs: &impl Qualified) -> Result<Self, ConvertError> {
        let rhs = self.conform(rhs)?;
        Ok(self.sub_scalar(rhs.scalar))
    }

    /// Checks if both are the same amount, converting `other` to the units
    /// of `self` if needed
    pub fn equivalent(&self, other: &impl Qualified) -> Result<bool, ConvertError> {
        let other = self.conform(other)?;
        Ok(self.scalar == other.scalar)
    }

    /// Like [`Quantity::equivalent`] but allowing an absolute difference up to
    /// `tolerance` (in the units of `self`)
    pub fn approx_eq(&self, other: &impl Qualified, tolerance: f64) -> Result<bool, ConvertError> {
        let other = self.conform(other)?;
        Ok((self.scalar - other.scalar).abs() <= tolerance)
    }

    /// Orders both quantities, converting `other` to the units of `self` if
    /// needed
    ///
    /// The inner [`None`] comes from comparing NaN scalars.
    pub fn try_cmp(&self, other: &impl Qualified) -> Result<Option<Ordering>, ConvertError> {
        let other = self.conform(other)?;
        Ok(self.scalar.partial_cmp(&other.scalar))
    }
}

impl Qualified for Quantity {
    fn scalar(&self) -> f64 {
        self.scalar
    }

    fn units(&self) -> &UnitRatio {
        &self.units
    }
}

impl Qualified for UnitRatio {
    fn scalar(&self) -> f64 {
        1.0
    }

    fn units(&self) -> &UnitRatio {
        self
    }
}

impl From<f64> for Quantity {
    fn from(value: f64) -> Self {
        Self::unitless(value)
    }
}

impl From<UnitRatio> for Quantity {
    fn from(value: UnitRatio) -> Self {
        Self::new(1.0, value)
    }
}

impl std::ops::Mul<&Quantity> for &Quantity {
    type Output = Quantity;

    fn mul(self, rhs: &Quantity) -> Quantity {
        Quantity::new(self.scalar * rhs.scalar, &self.units * &rhs.units)
    }
}

impl std::ops::Div<&Quantity> for &Quantity {
    type Output = Quantity;

    fn div(self, rhs: &Quantity) -> Quantity {
        Quantity::new(self.scalar / rhs.scalar, &self.units / &rhs.units)
    }
}

impl std::ops::Mul<f64> for &Quantity {
    type Output = Quantity;

    fn mul(self, rhs: f64) -> Quantity {
        self.mul_scalar(rhs)
    }
}

impl std::ops::Mul<f64> for Quantity {
    type Output = Quantity;

    fn mul(self, rhs: f64) -> Quantity {
        self.mul_scalar(rhs)
    }
}

impl std::ops::Div<f64> for &Quantity {
    type Output = Quantity;

    fn div(self, rhs: f64) -> Quantity {
        self.div_scalar(rhs)
    }
}

impl std::ops::Div<f64> for Quantity {
    type Output = Quantity;

    fn div(self, rhs: f64) -> Quantity {
        self.div_scalar(rhs)
    }
}

impl std::ops::Neg for Quantity {
    type Output = Quantity;

    fn neg(self) -> Quantity {
        Quantity::new(-self.scalar, self.units)
    }
}

forward_binop!(Mul, mul, Quantity, Quantity, Quantity);
forward_binop!(Div, div, Quantity, Quantity, Quantity);

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Maker;

    #[test]
    fn arithmetic() {
        let m = Maker::primitive("m");
        let s = Maker::primitive("s");

        let distance = m.make(10.0);
        let time = s.make(4.0);
        let speed = &distance / &time;
        assert_eq!(speed, (&m / &s).make(2.5));

        let area = &distance * &distance;
        assert_eq!(area, m.pow(2).make(100.0));
        assert_eq!(area.recip(), m.pow(-2).make(0.01));
        assert_eq!(speed.pow(2), (&m / &s).pow(2).make(6.25));
        assert_eq!(speed.pow(0), Quantity::unitless(1.0));

        assert_eq!(&distance * 2.0, m.make(20.0));
        assert_eq!(distance.div_scalar(4.0), m.make(2.5));
        assert_eq!(distance.add_scalar(1.0), m.make(11.0));
        assert_eq!(distance.sub_scalar(1.0), m.make(9.0));
        assert_eq!(-distance, m.make(-10.0));
    }

    #[test]
    fn add_same_units() {
        let m = Maker::primitive("m");
        let sum = m.make(1.5).try_add(&m.make(2.0)).unwrap();
        assert_eq!(sum, m.make(3.5));
        let diff = m.make(1.5).try_sub(&m.make(2.0)).unwrap();
        assert_eq!(diff, m.make(-0.5));
    }

    #[test]
    fn add_converts_rhs() {
        let m = Maker::primitive("m");
        let km = Maker::derive("km", m.make(1000.0));
        let sum = km.make(1.0).try_add(&m.make(500.0)).unwrap();
        assert_eq!(sum, km.make(1.5));
    }

    #[test]
    fn add_non_conformable() {
        let m = Maker::primitive("m");
        let s = Maker::primitive("s");
        let err = m.make(1.0).try_add(&s.make(1.0)).unwrap_err();
        assert!(matches!(err, ConvertError::NonConformable { .. }));
        assert!(m.make(1.0).try_sub(&s.make(1.0)).is_err());
    }

    #[test]
    fn comparisons() {
        let m = Maker::primitive("m");
        let s = Maker::primitive("s");
        let cm = Maker::derive("cm", m.make(0.01));

        assert!(m.make(1.0).equivalent(&cm.make(100.0)).unwrap());
        assert!(!m.make(1.0).equivalent(&cm.make(99.0)).unwrap());
        assert!(m.make(1.0).approx_eq(&cm.make(99.9), 0.01).unwrap());
        assert_eq!(
            m.make(1.0).try_cmp(&cm.make(50.0)).unwrap(),
            Some(Ordering::Greater)
        );
        assert_eq!(
            m.make(f64::NAN).try_cmp(&cm.make(50.0)).unwrap(),
            None
        );
        assert!(m.make(1.0).equivalent(&s.make(1.0)).is_err());
    }

    #[test]
    fn reduce_scales() {
        let m = Maker::primitive("m");
        let km = Maker::derive("km", m.make(1000.0));
        assert_eq!(km.make(2.5).reduce(), m.make(2500.0));
    }
}
