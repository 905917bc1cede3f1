//! Helpers for the [`us`](super::us()) system

use once_cell::sync::Lazy;

use crate::{convert::ConvertError, maker::Maker, quantity::Quantity};

static DEGREE: Lazy<Maker> = Lazy::new(|| unit("°"));
static ARCMIN: Lazy<Maker> = Lazy::new(|| unit("arcmin"));
static ARCSEC: Lazy<Maker> = Lazy::new(|| unit("arcsec"));
static FAHRENHEIT: Lazy<Maker> = Lazy::new(|| unit("°F"));
static CELSIUS: Lazy<Maker> = Lazy::new(|| unit("°C"));

fn unit(symbol: &str) -> Maker {
    super::us().find(symbol).expect("bundled US unit")
}

/// Splits an angle in degrees, minutes and seconds of arc
///
/// Degrees and minutes are whole numbers, the seconds keep the fraction.
///
/// ```
/// use dimensional::systems::{self, us};
///
/// let angle = systems::us().parse("30.5125 deg")?;
/// let (d, m, s) = us::to_dms(&angle)?;
/// assert_eq!(d.to_string(), "30 °");
/// assert_eq!(m.to_string(), "30 arcmin");
/// assert!((s.scalar() - 45.0).abs() < 1e-6);
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
pub fn to_dms(angle: &Quantity) -> Result<(Quantity, Quantity, Quantity), ConvertError> {
    let degrees = angle.try_convert(&*DEGREE)?.scalar();
    let d = degrees.trunc();
    let minutes = (degrees - d) * 60.0;
    let m = minutes.trunc();
    let s = (minutes - m) * 60.0;
    Ok((DEGREE.make(d), ARCMIN.make(m), ARCSEC.make(s)))
}

/// Converts a temperature on the Fahrenheit scale to the Celsius scale
///
/// Only valid for temperatures, not differences.
pub fn fahrenheit_to_celsius(quantity: &Quantity) -> Result<Quantity, ConvertError> {
    let f = quantity.try_convert(&*FAHRENHEIT)?;
    FAHRENHEIT.make(f.scalar() - 32.0).try_convert(&*CELSIUS)
}

/// Converts a temperature on the Celsius scale to the Fahrenheit scale
///
/// Only valid for temperatures, not differences.
pub fn celsius_to_fahrenheit(quantity: &Quantity) -> Result<Quantity, ConvertError> {
    let f = quantity.try_convert(&*FAHRENHEIT)?;
    Ok(f.add_scalar(32.0))
}
