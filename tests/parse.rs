use dimensional::{
    error::RichError, parser, FormatStyle, Formatter, Maker, ParseError, ParseFlags, Registry,
};
use test_case::test_case;

fn registry() -> Registry {
    let mut builder = Registry::builder();
    builder.add_primitive("kg", &[]).unwrap();
    builder.add_primitive("m", &["metre"]).unwrap();
    builder.add_primitive("s", &[]).unwrap();
    builder.add_primitive("°C", &["degC"]).unwrap();
    builder.add_primitive("k_B", &[]).unwrap();
    builder.finish()
}

#[test_case("1.234 kg m/s^2" => "1.234 kg m/s^2"; "plain")]
#[test_case("1.234 kg⋅m⋅s⁻²" => "1.234 kg m/s^2"; "unicode")]
#[test_case("1.234 kg·m⁄s²" => "1.234 kg m/s^2"; "middle dot and fraction slash")]
#[test_case("1.234 kg*m*s^-2" => "1.234 kg m/s^2"; "stars")]
#[test_case("  -3e2 metre  " => "-300 m"; "alias and spaces")]
#[test_case("m/s" => "1 m/s"; "no number")]
#[test_case("5 /s" => "5 1/s"; "only denominator")]
#[test_case("2 m/s^-1" => "2 m s"; "negative exponent in denominator")]
#[test_case("2 s m s" => "2 m s^2"; "sorted and grouped")]
#[test_case("23." => "23"; "trailing dot")]
#[test_case("+.5 °C" => "0.5 °C"; "symbol char")]
#[test_case("1 k_B" => "1 k_B"; "underscore")]
#[test_case("Inf m" => "Inf m"; "infinity")]
fn parse_and_format(input: &str) -> String {
    registry().parse(input).unwrap().to_string()
}

#[test_case("3 m^0" => (3, 5); "zero exponent")]
#[test_case("3 m^" => (3, 4); "missing exponent")]
#[test_case("3 m^1.5" => (3, 7); "fractional exponent")]
#[test_case("3 m/" => (3, 4); "missing denominator")]
#[test_case("3 furlong" => (2, 9); "unknown")]
#[test_case("3 m @" => (4, 5); "unexpected")]
#[test_case("- m" => (0, 1); "sign without number")]
fn error_spans(input: &str) -> (usize, usize) {
    let err = registry().parse(input).unwrap_err();
    let span = err.span();
    assert_eq!(err.labels()[0].0, span);
    (span.start(), span.end())
}

#[test]
fn ascii_only() {
    let r = registry();
    let flags = ParseFlags::empty();
    assert!(r.parse_with("1 m/s^2", flags).is_ok());
    assert!(matches!(
        r.parse_with("1 m²", flags),
        Err(ParseError::Unexpected { .. })
    ));
    assert!(r.parse_with("1 kg⋅m", flags).is_err());
}

#[test]
fn allow_unknown() {
    let r = registry();
    let q = r
        .parse_with("3 furlong/fortnight", ParseFlags::ALLOW_UNKNOWN)
        .unwrap();
    let expected = (Maker::primitive("furlong") / Maker::primitive("fortnight")).make(3.0);
    assert_eq!(q, expected);
    // the registry is not changed
    assert!(r.find("furlong").is_none());
}

#[test]
fn closure_lookup() {
    let m = Maker::primitive("m");
    let lookup = |symbol: &str| (symbol == "m").then(|| m.clone());
    let q = parser::parse("2 m^3", &lookup, ParseFlags::default()).unwrap();
    assert_eq!(q, m.pow(3).make(2.0));
}

#[test]
fn format_round_trip() {
    let r = registry();
    let q = r.parse("-1.5 kg m^2/s^3").unwrap();
    for style in [FormatStyle::Plain, FormatStyle::Unicode] {
        let text = Formatter::default().with_style(style).format(&q);
        assert_eq!(r.parse(&text).unwrap(), q, "{text}");
    }
}
