use dimensional::{ConvertError, Maker, Quantity, UnitRatio};
use test_case::test_case;

struct Units {
    kg: Maker,
    m: Maker,
    s: Maker,
    n: Maker,
    j: Maker,
    km: Maker,
    ks: Maker,
    ft: Maker,
    mi: Maker,
    survey_mi: Maker,
}

fn units() -> Units {
    let kg = Maker::primitive("kg");
    let m = Maker::primitive("m");
    let s = Maker::primitive("s");
    let n = Maker::derive("N", &kg * &m / s.pow(2));
    let j = Maker::derive("J", &n * &m);
    let km = Maker::derive("km", m.make(1000.0));
    let ks = Maker::derive("ks", s.make(1000.0));
    let ft = Maker::derive("ft", m.make(0.3048));
    let mi = Maker::derive("mi", ft.make(5280.0));
    let survey_mi = Maker::derive("mi", m.make(6336000.0 / 3937.0));
    Units {
        kg,
        m,
        s,
        n,
        j,
        km,
        ks,
        ft,
        mi,
        survey_mi,
    }
}

fn ratios(u: &Units) -> Vec<UnitRatio> {
    vec![
        UnitRatio::empty(),
        u.m.units().clone(),
        (&u.kg * &u.m / u.s.pow(2)).into_units(),
        (&u.n / &u.km).into_units(),
        (&u.mi * &u.survey_mi).into_units(),
        (&u.j / &u.ks).into_units(),
    ]
}

#[test]
fn primitive_reduces_to_itself() {
    let u = units();
    for p in [&u.kg, &u.m, &u.s] {
        let reduced = p.units().reduce();
        assert_eq!(reduced.scalar(), 1.0);
        assert_eq!(reduced.units(), p.units());
    }
}

#[test]
fn commutative_and_inverse() {
    let u = units();
    let all = ratios(&u);
    for a in &all {
        for b in &all {
            assert_eq!(a * b, b * a, "{a} * {b}");
            assert_eq!(&(a * b) / b, *a, "({a} * {b}) / {b}");
        }
    }
}

#[test]
fn powers() {
    let u = units();
    for a in ratios(&u) {
        assert!(a.pow(0).is_empty());
        assert_eq!(a.pow(1), a);
        for n in 1..5 {
            assert_eq!(a.pow(n), &a.pow(n - 1) * &a, "{a}^{n}");
        }
    }
}

#[test_case(2.0, "J", "N m")]
#[test_case(1.5, "N", "kg m/s^2")]
#[test_case(12.0, "mi", "km")]
#[test_case(-3.0, "km/ks", "m/s")]
fn conversion_round_trip(value: f64, from: &str, to: &str) {
    let u = units();
    let lookup = |symbol: &str| -> Option<Maker> {
        let m = match symbol {
            "kg" => &u.kg,
            "m" => &u.m,
            "s" => &u.s,
            "N" => &u.n,
            "J" => &u.j,
            "km" => &u.km,
            "ks" => &u.ks,
            "ft" => &u.ft,
            "mi" => &u.mi,
            _ => return None,
        };
        Some(m.clone())
    };
    let parse = |s: &str| dimensional::parser::parse(s, &lookup, Default::default()).unwrap();

    let v = parse(from).mul_scalar(value);
    let target = parse(to);
    let there = v.convert(&target);
    assert!(there.is_exact());
    let back = there.value.try_convert(&v).unwrap();
    assert!((back.scalar() - value).abs() < 1e-9 * value.abs());
    assert_eq!(back.units(), v.units());
}

#[test]
fn same_symbol_distinct_units() {
    let u = units();
    assert_ne!(u.mi, u.survey_mi);
    assert_ne!(u.mi.units(), u.survey_mi.units());

    let r = &u.mi / &u.survey_mi;
    assert_eq!(r.units().numerator().len(), 1);
    assert_eq!(r.units().denominator().len(), 1);

    let a = u.survey_mi.make(3.0);
    let b = u.mi.make(2.0);
    assert_eq!(&(&a * &b) / &a, b);
    assert_ne!(u.survey_mi.make(2.0).pow(2), &a * &b);
}

#[test]
fn scenario_reduce_force() {
    let u = units();
    let force = &u.kg * &u.m / u.s.pow(2);
    let reduced = force.units().reduce();
    assert_eq!(reduced.scalar(), 1.0);
    assert_eq!(reduced.units(), force.units());

    let squared = force.pow(2);
    assert_eq!(squared.units() / force.units(), *force.units());
}

#[test]
fn scenario_joule_to_newton_metre() {
    let u = units();
    let energy = u.j.make(1.234);

    let conversion = energy.convert(&(&u.n * &u.m));
    assert!(conversion.is_exact());
    assert_eq!(conversion.value.scalar(), 1.234);

    let conversion = energy.convert(&u.n);
    assert!(!conversion.is_exact());
    assert_eq!(conversion.remainder, *u.m.units());
    assert_eq!(conversion.value.units(), u.n.units());
}

#[test]
fn scenario_mixed_miles() {
    let u = units();
    let q = &u.mi.make(2.0) * &u.survey_mi.make(3.0);
    assert_eq!(q.scalar(), 6.0);
    let numerator = q.units().numerator();
    assert_eq!(numerator.len(), 2);
    assert!(numerator.iter().all(|unit| unit.symbol() == "mi"));
    assert_ne!(*q.units(), u.mi.units().pow(2));
    assert_ne!(numerator[0], numerator[1]);
}

#[test]
fn scenario_prefixes_cancel() {
    let u = units();
    let speed = &u.km.make(1.0) / &u.ks.make(1.0);
    let conversion = speed.convert(&(&u.m / &u.s));
    assert!(conversion.is_exact());
    assert_eq!(conversion.value.scalar(), 1.0);
}

#[test]
fn scenario_add_feet_to_metres() {
    let u = units();
    let total = u.m.make(5.0).try_add(&u.ft.make(3.0)).unwrap();
    assert_eq!(total.units(), u.m.units());
    assert!((total.scalar() - (5.0 + 3.0 * 0.3048)).abs() < 1e-12);
}

#[test]
fn non_conformable() {
    let u = units();
    let err = u.m.make(1.0).try_add(&u.s.make(1.0)).unwrap_err();
    let ConvertError::NonConformable { remainder, .. } = &err;
    assert!(!remainder.is_empty());
    assert!(u.m.make(1.0).try_cmp(&u.s).is_err());
    assert!(u.j.make(1.0).approx_eq(&u.n, 1e-9).is_err());
}

#[test]
fn comparisons_convert() {
    let u = units();
    let a = u.km.make(1.5);
    let b = u.m.make(1500.0);
    assert!(a.equivalent(&b).unwrap());
    assert_eq!(a.try_cmp(&u.m.make(2000.0)).unwrap(), Some(std::cmp::Ordering::Less));
    assert!(u.mi.make(1.0).approx_eq(&u.survey_mi.make(1.0), 1e-5).unwrap());
    assert!(!u.mi.make(1.0).equivalent(&u.survey_mi.make(1.0)).unwrap());
}

#[test]
fn unitless_arithmetic() {
    let q = Quantity::unitless(3.0);
    assert!(q.is_unitless());
    assert_eq!((&q * &Quantity::unitless(2.0)).scalar(), 6.0);
    assert_eq!(q.try_add(&Quantity::unitless(1.0)).unwrap().scalar(), 4.0);
}
