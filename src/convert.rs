//! Conversion between unit expressions
//!
//! Converting never fails by itself: whatever part of the units could not be
//! converted is returned as a remainder. [`Quantity::try_convert`] and
//! [`Quantity::must_convert`] are the strict versions.

use thiserror::Error;

use crate::{
    quantity::{Qualified, Quantity},
    ratio::UnitRatio,
};

/// Result of [`Quantity::convert`]
#[derive(Debug, Clone, PartialEq)]
pub struct Conversion {
    /// Converted value, always in the target units
    pub value: Quantity,
    /// Primitive units that did not cancel against the target
    ///
    /// Converting `5 m/s` to `m` leaves `1/s`.
    pub remainder: UnitRatio,
}

impl Conversion {
    /// The remainder is empty, so the value is an exact conversion
    pub fn is_exact(&self) -> bool {
        self.remainder.is_empty()
    }

    /// Turns the conversion into a result
    pub fn into_result(self, from: &UnitRatio) -> Result<Quantity, ConvertError> {
        if self.is_exact() {
            Ok(self.value)
        } else {
            Err(ConvertError::NonConformable {
                from: from.clone(),
                to: self.value.into_units(),
                remainder: self.remainder,
            })
        }
    }
}

#[derive(Debug, Error, Clone, PartialEq)]
pub enum ConvertError {
    #[error("units '{from}' can not be converted to '{to}' (remainder '{remainder}')")]
    NonConformable {
        from: UnitRatio,
        to: UnitRatio,
        remainder: UnitRatio,
    },
}

impl Quantity {
    /// Converts the quantity to the units of `target`
    ///
    /// The value is divided by the target units and the result reduced to
    /// primitive units. The scalar of the reduction is the conversion factor
    /// and its units are the remainder.
    ///
    /// The scalar of `target` is ignored, only its units are used. The value
    /// is not expressed as a multiple of the target: converting `1 h` to
    /// `60 s` gives `3600 s`, not `60 (60 s)`.
    ///
    /// ```
    /// # use dimensional::Maker;
    /// let m = Maker::primitive("m");
    /// let s = Maker::primitive("s");
    /// let conversion = (&m / &s).make(5.0).convert(&m);
    /// assert_eq!(conversion.value, m.make(5.0));
    /// assert_eq!(conversion.remainder, s.units().recip());
    /// ```
    #[tracing::instrument(level = "trace", skip_all, fields(from = %self, to = %target.units()))]
    pub fn convert(&self, target: &impl Qualified) -> Conversion {
        let to = target.units();
        if self.units() == to {
            return Conversion {
                value: self.clone(),
                remainder: UnitRatio::empty(),
            };
        }
        let factor = (self.units() / to).reduce();
        let (factor, remainder) = factor.into_parts();
        let value = Quantity::new(self.scalar() * factor, to.clone());
        tracing::trace!(%value, %remainder, "converted");
        Conversion { value, remainder }
    }

    /// Converts the quantity or fails if there is any remainder
    pub fn try_convert(&self, target: &impl Qualified) -> Result<Quantity, ConvertError> {
        self.convert(target).into_result(self.units())
    }

    /// Converts the quantity
    ///
    /// # Panics
    /// If the units are not conformable.
    pub fn must_convert(&self, target: &impl Qualified) -> Quantity {
        match self.try_convert(target) {
            Ok(q) => q,
            Err(e) => panic!("{e}"),
        }
    }

    /// Brings `other` to the units of `self`
    pub(crate) fn conform(&self, other: &impl Qualified) -> Result<Quantity, ConvertError> {
        other.to_quantity().try_convert(self)
    }
}
