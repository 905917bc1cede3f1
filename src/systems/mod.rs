//! Bundled unit systems
//!
//! Each system is a [`Registry`] loaded from a units file bundled with the
//! crate the first time it is used. Systems are chained:
//!
//! - [`si()`]: SI base and derived units with the 20 SI prefixes.
//! - [`us()`]: US customary units, parent SI.
//! - [`survey()`]: US survey foot and mile, parent US.
//! - [`natural()`]: fundamental physical constants as units, parent SI.
//!
//! This is only available with the `bundled_units` feature.

use std::sync::Arc;

use once_cell::sync::Lazy;

use crate::registry::{Registry, UnitsFile};

pub mod natural;
pub mod si;
pub mod us;

static SI: Lazy<Arc<Registry>> = Lazy::new(|| load(include_str!("../../units/si.toml"), None));
static US: Lazy<Arc<Registry>> =
    Lazy::new(|| load(include_str!("../../units/us.toml"), Some(si())));
static SURVEY: Lazy<Arc<Registry>> =
    Lazy::new(|| load(include_str!("../../units/survey.toml"), Some(us())));
static NATURAL: Lazy<Arc<Registry>> =
    Lazy::new(|| load(include_str!("../../units/natural.toml"), Some(si())));

/// International System of Units
///
/// ```
/// let si = dimensional::systems::si();
/// let force = si.parse("2 kN")?;
/// assert_eq!(force.reduce().to_string(), "2000000 g m/s^2");
/// # Ok::<(), dimensional::ParseError>(())
/// ```
pub fn si() -> Arc<Registry> {
    Arc::clone(&SI)
}

/// US customary units
///
/// Symbols not found here are looked up in [`si()`].
pub fn us() -> Arc<Registry> {
    Arc::clone(&US)
}

/// US survey units
///
/// The survey foot and mile shadow the ones in [`us()`].
pub fn survey() -> Arc<Registry> {
    Arc::clone(&SURVEY)
}

/// Fundamental physical constants
///
/// `c`, `h`, `ħ`, `e`, `k_B`, `ΔνCs`, `Kcd`, `G` and `N_A`. Note that `h`
/// is the Planck constant here and shadows the hour of [`si()`].
pub fn natural() -> Arc<Registry> {
    Arc::clone(&NATURAL)
}

fn load(text: &str, parent: Option<Arc<Registry>>) -> Arc<Registry> {
    let file = UnitsFile::from_toml(text).expect("bundled units file");
    let mut builder = Registry::builder();
    if let Some(parent) = parent {
        builder = builder.with_parent(parent);
    }
    let registry = builder
        .with_units_file(file)
        .expect("bundled units definitions")
        .finish();
    Arc::new(registry)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn load_all() {
        assert_eq!(si().name(), Some("si"));
        assert_eq!(us().name(), Some("us"));
        assert_eq!(survey().name(), Some("survey"));
        assert_eq!(natural().name(), Some("natural"));
        assert_eq!(si().all_prefixes().count(), 20);
    }

    #[test]
    fn shared() {
        assert!(Arc::ptr_eq(&si(), us().parent().unwrap()));
        assert!(Arc::ptr_eq(&us(), survey().parent().unwrap()));
    }
}
