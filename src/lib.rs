//! Physical quantities with unit algebra.
//!
//! A [`Quantity`] is a scalar paired with a [`UnitRatio`], the product of the
//! units in its numerator divided by the product of the units in its
//! denominator. Units are named and shared ([`Unit`]); they are either
//! primitive, derived from a quantity in other units, or a prefix applied to
//! another unit.
//!
//! Also includes:
//! - Reduction of any unit expression to primitive units.
//! - Conversion between unit expressions, reporting what could not be
//!   converted as a *remainder*.
//! - A parser for the text form `"1.234 kg m/s^2"` (and `"1.234 kg⋅m⋅s⁻²"`).
//! - A configurable formatter: plain text, Unicode, MathML and LaTeX.
//! - Layered unit registries, configurable with [`UnitsFile`](registry::UnitsFile)s.
//! - Bundled SI, US customary and natural constants unit systems.
//!
//! # Basic usage
//!
//! Units are created with a [`Maker`], which turns a number into a quantity.
//! Makers compose to build new unit expressions.
//!
//! ```rust
//! use dimensional::Maker;
//!
//! let kg = Maker::primitive("kg");
//! let m = Maker::primitive("m");
//! let s = Maker::primitive("s");
//! let newton = Maker::derive("N", &kg * &m / s.pow(2));
//!
//! let force = newton.make(10.0);
//! let reduced = force.reduce();
//! assert_eq!(reduced.scalar(), 10.0);
//! assert_eq!(reduced.to_string(), "10 kg m/s^2");
//! ```
//!
//! Quantities with different units can be converted when they reduce to the
//! same primitive units. Whatever is left is returned as the remainder.
//!
//! ```rust
//! # use dimensional::Maker;
//! let m = Maker::primitive("m");
//! let s = Maker::primitive("s");
//! let km = Maker::derive("km", m.make(1000.0));
//!
//! let speed = (&km / &s).make(2.0);
//! let conversion = speed.convert(&m);
//! assert_eq!(conversion.value.scalar(), 2000.0);
//! assert_eq!(conversion.remainder.to_string(), "1/s");
//! ```
//!
//! With the `bundled_units` feature the standard systems are available:
//!
//! ```rust
//! # #[cfg(feature = "bundled_units")]
//! # {
//! use dimensional::systems;
//!
//! let si = systems::si();
//! let speed = si.parse("36 km/h")?;
//! let target = si.parse("m/s")?;
//! let converted = speed.try_convert(&target)?;
//! assert!((converted.scalar() - 10.0).abs() < 1e-12);
//! # }
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

#[cfg(doc)]
pub mod _features {
    //! Features of the crate
    //!
    //! - `bundled_units` (default). Includes the SI, US customary, US survey
    //!   and natural constants unit systems in the [`systems`](crate::systems)
    //!   module. Enables `toml`.
    //!
    //! - `toml`. Enables [`UnitsFile::from_toml`](crate::registry::UnitsFile::from_toml).
}

macro_rules! forward_binop {
    ($imp:ident, $method:ident, $t:ty, $u:ty, $out:ty) => {
        impl std::ops::$imp<$u> for $t {
            type Output = $out;

            fn $method(self, rhs: $u) -> $out {
                std::ops::$imp::$method(&self, &rhs)
            }
        }

        impl std::ops::$imp<&$u> for $t {
            type Output = $out;

            fn $method(self, rhs: &$u) -> $out {
                std::ops::$imp::$method(&self, rhs)
            }
        }

        impl std::ops::$imp<$u> for &$t {
            type Output = $out;

            fn $method(self, rhs: $u) -> $out {
                std::ops::$imp::$method(self, &rhs)
            }
        }
    };
}

pub mod convert;
pub mod error;
pub mod format;
pub mod maker;
pub mod parser;
pub mod quantity;
pub mod ratio;
pub mod registry;
pub mod span;
#[cfg(feature = "bundled_units")]
pub mod systems;
pub mod unit;

mod lexer;

pub use convert::{ConvertError, Conversion};
pub use format::{FormatStyle, Formatter};
pub use maker::Maker;
pub use parser::{ParseError, ParseFlags};
pub use quantity::{Qualified, Quantity};
pub use ratio::UnitRatio;
pub use registry::{Registry, RegistryBuilder};
pub use span::Span;
pub use unit::{Prefix, Unit, UnitKind};
