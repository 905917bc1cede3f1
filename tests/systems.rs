#![cfg(feature = "bundled_units")]

use dimensional::{
    systems::{self, si, us},
    Quantity, Registry,
};
use test_case::test_case;

fn convert(registry: &Registry, from: &str, to: &str) -> f64 {
    let from = registry.parse(from).unwrap();
    let to = registry.parse(to).unwrap();
    from.try_convert(&to).unwrap().scalar()
}

#[test_case("36 km/h", "m/s" => 10.0; "speed")]
#[test_case("1 kW h", "MJ" => 3.6; "energy")]
#[test_case("1 L", "cm^3" => 1000.0; "litre")]
#[test_case("1 d", "s" => 86400.0; "day")]
#[test_case("1 kg", "g" => 1000.0; "kilogram")]
#[test_case("1 Ω A", "V" => 1.0; "ohm")]
#[test_case("2 W s", "J" => 2.0; "watt second")]
#[test_case("1 Hz", "1/s" => 1.0; "hertz")]
#[test_case("5 µm", "nm" => 5000.0; "micro")]
#[test_case("5 um", "nm" => 5000.0; "micro alias")]
#[test_case("1 mmol/L", "mol/m^3" => 1.0; "concentration")]
fn si_conversions(from: &str, to: &str) -> f64 {
    let value = convert(&systems::si(), from, to);
    // rounded to compare floats
    (value * 1e9).round() / 1e9
}

#[test_case("1 mi", "km" => 1.609344; "mile")]
#[test_case("1 ft", "in" => 12.0; "foot")]
#[test_case("1 yd", "ft" => 3.0; "yard")]
#[test_case("1 ftm", "ft" => 6.0; "fathom")]
#[test_case("1 NM", "m" => 1852.0; "nautical mile")]
#[test_case("1 acre", "ft^2" => 43560.0; "acre")]
#[test_case("1 gal", "L" => 3.785411784; "gallon")]
#[test_case("1 cp", "Tbsp" => 16.0; "cup")]
#[test_case("1 lb", "g" => 453.59237; "pound")]
#[test_case("1 ton", "kg" => 907.18474; "ton")]
#[test_case("1 kcal", "cal" => 1000.0; "kilocalorie")]
#[test_case("1 lbf", "N" => 4.448221615; "pound force")]
#[test_case("180 °", "rad" => 3.141592654; "degrees")]
#[test_case("1 °", "arcsec" => 3600.0; "arcseconds")]
#[test_case("1 h", "min" => 60.0; "hour from parent")]
fn us_conversions(from: &str, to: &str) -> f64 {
    let value = convert(&systems::us(), from, to);
    (value * 1e9).round() / 1e9
}

#[test]
fn survey_shadows_us() {
    let survey = systems::survey();
    let us = systems::us();

    let survey_mi = survey.parse("1 mi").unwrap();
    let us_mi = us.parse("1 mi").unwrap();
    assert_ne!(survey_mi, us_mi);
    assert_eq!(survey_mi.to_string(), us_mi.to_string());

    let ratio = survey_mi.try_convert(&us_mi).unwrap().scalar();
    assert!((ratio - 1.000002).abs() < 1e-9);

    // yards are not redefined
    assert_eq!(survey.parse("1 yd").unwrap(), us.parse("1 yd").unwrap());

    let mixed = &survey_mi * &us_mi;
    assert_eq!(mixed.units().numerator().len(), 2);
}

#[test]
fn natural_constants() {
    let natural = systems::natural();
    let si = systems::si();
    let energy = natural.parse("1 h ΔνCs").unwrap();
    let joules = energy.try_convert(&si.parse("J").unwrap()).unwrap();
    assert!((joules.scalar() - 6.62607015e-34 * 9192631770.0).abs() < 1e-36);

    let rest = natural.parse("1 kg c^2").unwrap();
    let joules = rest.try_convert(&si.parse("J").unwrap()).unwrap();
    assert!((joules.scalar() / 8.987551787368176e16 - 1.0).abs() < 1e-12);

    // the hour is shadowed by the Planck constant
    assert!(natural.parse("1 h").unwrap().try_convert(&si.parse("s").unwrap()).is_err());
}

#[test]
fn temperatures() {
    let si = systems::si();
    let us = systems::us();

    let body = us.parse("98.6 °F").unwrap();
    let celsius = us::fahrenheit_to_celsius(&body).unwrap();
    assert!((celsius.scalar() - 37.0).abs() < 1e-9);
    let kelvin = si::celsius_to_kelvin(&celsius).unwrap();
    assert!((kelvin.scalar() - 310.15).abs() < 1e-9);
    assert_eq!(kelvin.units(), si.parse("K").unwrap().units());

    // differences convert by scale only
    let delta = us.parse("9 °F").unwrap().try_convert(&si.parse("K").unwrap()).unwrap();
    assert!((delta.scalar() - 5.0).abs() < 1e-9);

    let back = si::kelvin_to_celsius(&kelvin).unwrap();
    let f = us::celsius_to_fahrenheit(&back).unwrap();
    assert!((f.scalar() - 98.6).abs() < 1e-9);
}

#[test]
fn durations() {
    let si = systems::si();
    let q = si.parse("250 ms").unwrap();
    let d = si::to_duration(&q).unwrap();
    assert_eq!(d, std::time::Duration::from_millis(250));
    let back = si::from_duration(d);
    assert!(back.approx_eq(&q, 1e-12).unwrap());
    assert!(si::to_duration(&si.parse("3 kg").unwrap()).is_err());
}

#[test]
fn remainder_in_error() {
    let si = systems::si();
    let err = si
        .parse("3 N")
        .unwrap()
        .try_convert(&si.parse("J").unwrap())
        .unwrap_err();
    assert_eq!(
        err.to_string(),
        "units 'N' can not be converted to 'J' (remainder '1/m')"
    );
}

#[test]
fn reduce_prints_primitives() {
    let si = systems::si();
    let q: Quantity = si.parse("1 kN m").unwrap().reduce();
    assert_eq!(q.to_string(), "1000000 g m^2/s^2");
}
