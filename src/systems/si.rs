//! Helpers for the [`si`](super::si()) system

use std::time::Duration;

use once_cell::sync::Lazy;
use thiserror::Error;

use crate::{convert::ConvertError, maker::Maker, quantity::Quantity};

static SECOND: Lazy<Maker> = Lazy::new(|| unit("s"));
static KELVIN: Lazy<Maker> = Lazy::new(|| unit("K"));
static CELSIUS: Lazy<Maker> = Lazy::new(|| unit("°C"));

/// Difference between the Kelvin and Celsius scales
pub const ZERO_CELSIUS: f64 = 273.15;

fn unit(symbol: &str) -> Maker {
    super::si().find(symbol).expect("bundled SI unit")
}

/// Quantity of seconds of a [`Duration`]
pub fn from_duration(duration: Duration) -> Quantity {
    SECOND.make(duration.as_secs_f64())
}

/// Converts a time quantity to a [`Duration`]
///
/// ```
/// # use std::time::Duration;
/// use dimensional::systems::{self, si};
///
/// let q = systems::si().parse("1.5 min")?;
/// assert_eq!(si::to_duration(&q)?, Duration::from_secs(90));
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
pub fn to_duration(quantity: &Quantity) -> Result<Duration, DurationError> {
    let seconds = quantity.try_convert(&*SECOND)?;
    Ok(Duration::try_from_secs_f64(seconds.scalar())?)
}

/// Converts a temperature on the Celsius scale to the Kelvin scale
///
/// Unlike [`Quantity::convert`], this takes into account the different zero
/// of each scale, so it is only valid for temperatures, not differences.
pub fn celsius_to_kelvin(quantity: &Quantity) -> Result<Quantity, ConvertError> {
    let celsius = quantity.try_convert(&*CELSIUS)?;
    Ok(KELVIN.make(celsius.scalar() + ZERO_CELSIUS))
}

/// Converts a temperature on the Kelvin scale to the Celsius scale
///
/// See [`celsius_to_kelvin`].
pub fn kelvin_to_celsius(quantity: &Quantity) -> Result<Quantity, ConvertError> {
    let kelvin = quantity.try_convert(&*KELVIN)?;
    Ok(CELSIUS.make(kelvin.scalar() - ZERO_CELSIUS))
}

/// Errors from [`to_duration`]
#[derive(Debug, Error)]
pub enum DurationError {
    #[error(transparent)]
    Convert(#[from] ConvertError),
    #[error("Duration out of range")]
    OutOfRange(#[from] std::time::TryFromFloatSecsError),
}
