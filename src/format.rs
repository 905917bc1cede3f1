//! Text rendering of quantities and units
//!
//! A [`Formatter`] is a plain value configured with builder methods. The
//! [`Display`](std::fmt::Display) implementations of the crate types use
//! [`Formatter::default`], which renders `"1.234 kg m/s^2"`.

use std::fmt::{self, Write};

use crate::{
    maker::Maker,
    quantity::{Qualified, Quantity},
    ratio::UnitRatio,
};

const DOT_OPERATOR: char = '\u{22C5}';
const FRACTION_SLASH: char = '\u{2044}';
const SUPERSCRIPT_DIGITS: [char; 10] = ['⁰', '¹', '²', '³', '⁴', '⁵', '⁶', '⁷', '⁸', '⁹'];
const SUPERSCRIPT_MINUS: char = '⁻';

/// Markup used by a [`Formatter`]
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Default, strum::Display, strum::EnumString, strum::AsRefStr,
)]
#[strum(serialize_all = "lowercase")]
pub enum FormatStyle {
    /// `1.234 kg m/s^2`
    #[default]
    Plain,
    /// `1.234 kg⋅m⁄s²`
    Unicode,
    /// MathML elements, without the enclosing `<math>` tag
    MathMl,
    /// `1.234 \frac{\mathrm{kg} \cdot \mathrm{m}}{\mathrm{s}^{2}}`
    Latex,
}

/// Formats quantities and units
///
/// ```
/// # use dimensional::{Formatter, Maker};
/// let kg = Maker::primitive("kg");
/// let m = Maker::primitive("m");
/// let s = Maker::primitive("s");
/// let q = (&kg * &m / s.pow(2)).make(1.234);
///
/// assert_eq!(Formatter::default().format(&q), "1.234 kg m/s^2");
/// assert_eq!(Formatter::default().with_unicode().format(&q), "1.234 kg⋅m⁄s²");
/// assert_eq!(Formatter::default().with_no_fraction().format(&q), "1.234 kg m s^-2");
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct Formatter {
    style: FormatStyle,
    unit_sep: Option<String>,
    fraction_sep: Option<String>,
    negative_powers: bool,
    gap: bool,
    no_gap_for: Vec<UnitRatio>,
    precision: Option<usize>,
}

impl Default for Formatter {
    fn default() -> Self {
        Self {
            style: FormatStyle::Plain,
            unit_sep: None,
            fraction_sep: None,
            negative_powers: false,
            gap: true,
            no_gap_for: Vec::new(),
            precision: None,
        }
    }
}

impl Formatter {
    pub fn new(style: FormatStyle) -> Self {
        Self::default().with_style(style)
    }

    pub fn style(&self) -> FormatStyle {
        self.style
    }

    pub fn with_style(mut self, style: FormatStyle) -> Self {
        self.style = style;
        self
    }

    /// Dot operator between units, fraction slash and superscript exponents
    pub fn with_unicode(self) -> Self {
        self.with_style(FormatStyle::Unicode)
    }

    pub fn with_mathml(self) -> Self {
        self.with_style(FormatStyle::MathMl)
    }

    pub fn with_latex(self) -> Self {
        self.with_style(FormatStyle::Latex)
    }

    /// Text between numerator and denominator, instead of the style's own
    /// fraction
    pub fn with_fraction(mut self, sep: impl Into<String>) -> Self {
        self.fraction_sep = Some(sep.into());
        self
    }

    /// Text between units
    pub fn with_unit_sep(mut self, sep: impl Into<String>) -> Self {
        self.unit_sep = Some(sep.into());
        self
    }

    /// No space between the scalar and the units
    pub fn with_no_gap(mut self) -> Self {
        self.gap = false;
        self
    }

    /// No space between the scalar and the units when the units are equal to
    /// the given ones, like `°` in `45°`
    pub fn with_no_gap_for(mut self, units: &impl Qualified) -> Self {
        self.no_gap_for.push(units.units().clone());
        self
    }

    /// Render denominator units with negative exponents
    pub fn with_no_fraction(mut self) -> Self {
        self.negative_powers = true;
        self
    }

    /// Fixed number of decimals for the scalar
    pub fn with_precision(mut self, precision: Option<usize>) -> Self {
        self.precision = precision;
        self
    }

    /// Formats the scalar and the units
    pub fn format(&self, value: &impl Qualified) -> String {
        let mut out = self.format_scalar(value.scalar());
        let units = value.units();
        if !units.is_empty() {
            if self.gap && !self.no_gap_for.iter().any(|u| u == units) {
                out.push(' ');
            }
            out += &self.format_units(units);
        }
        out
    }

    /// Formats only the units
    ///
    /// Empty units are an empty string.
    pub fn format_units(&self, units: &UnitRatio) -> String {
        if units.is_empty() {
            return String::new();
        }
        let (num, den): (Vec<_>, Vec<_>) = units.powers().into_iter().partition(|(_, p)| *p > 0);

        if self.negative_powers || den.is_empty() {
            let parts: Vec<String> = num
                .iter()
                .chain(&den)
                .map(|(u, p)| self.power(u.symbol(), *p))
                .collect();
            return self.row(&parts);
        }

        let numerator = if num.is_empty() {
            self.one()
        } else {
            let parts: Vec<String> = num.iter().map(|(u, p)| self.power(u.symbol(), *p)).collect();
            self.row(&parts)
        };
        let parts: Vec<String> = den.iter().map(|(u, p)| self.power(u.symbol(), -p)).collect();
        let denominator = self.row(&parts);
        self.fraction(&numerator, &denominator)
    }

    fn format_scalar(&self, value: f64) -> String {
        let text = if value.is_nan() {
            "NaN".to_string()
        } else if value.is_infinite() {
            let sign = if value < 0.0 { "-" } else { "" };
            format!("{sign}Inf")
        } else if let Some(precision) = self.precision {
            format!("{value:.precision$}")
        } else if value != 0.0 && (value.abs() >= 1e16 || value.abs() < 1e-5) {
            format!("{value:e}")
        } else {
            format!("{value}")
        };
        match self.style {
            FormatStyle::MathMl => format!("<mn>{text}</mn>"),
            _ => text,
        }
    }

    fn unit_sep(&self) -> &str {
        if let Some(sep) = &self.unit_sep {
            return sep;
        }
        match self.style {
            FormatStyle::Plain => " ",
            FormatStyle::Unicode => "\u{22C5}",
            FormatStyle::MathMl => "<mo>\u{22C5}</mo>",
            FormatStyle::Latex => " \\cdot ",
        }
    }

    fn power(&self, symbol: &str, p: i32) -> String {
        match (self.style, p) {
            (FormatStyle::Plain, 1) | (FormatStyle::Unicode, 1) => symbol.to_string(),
            (FormatStyle::Plain, _) => format!("{symbol}^{p}"),
            (FormatStyle::Unicode, _) => format!("{symbol}{}", superscript(p)),
            (FormatStyle::MathMl, 1) => format!("<mi>{symbol}</mi>"),
            (FormatStyle::MathMl, _) => {
                format!("<msup><mi>{symbol}</mi><mn>{p}</mn></msup>")
            }
            (FormatStyle::Latex, 1) => format!("\\mathrm{{{symbol}}}"),
            (FormatStyle::Latex, _) => format!("\\mathrm{{{symbol}}}^{{{p}}}"),
        }
    }

    fn row(&self, parts: &[String]) -> String {
        let joined = parts.join(self.unit_sep());
        match self.style {
            FormatStyle::MathMl => format!("<mrow>{joined}</mrow>"),
            _ => joined,
        }
    }

    fn one(&self) -> String {
        match self.style {
            FormatStyle::MathMl => "<mn>1</mn>".to_string(),
            _ => "1".to_string(),
        }
    }

    fn fraction(&self, numerator: &str, denominator: &str) -> String {
        if let Some(sep) = &self.fraction_sep {
            return format!("{numerator}{sep}{denominator}");
        }
        match self.style {
            FormatStyle::Plain => format!("{numerator}/{denominator}"),
            FormatStyle::Unicode => format!("{numerator}{FRACTION_SLASH}{denominator}"),
            FormatStyle::MathMl => format!("<mfrac>{numerator}{denominator}</mfrac>"),
            FormatStyle::Latex => format!("\\frac{{{numerator}}}{{{denominator}}}"),
        }
    }
}

/// Exponent as Unicode superscript characters
pub(crate) fn superscript(p: i32) -> String {
    let mut s = String::new();
    if p < 0 {
        s.push(SUPERSCRIPT_MINUS);
    }
    for digit in p.unsigned_abs().to_string().bytes() {
        s.push(SUPERSCRIPT_DIGITS[(digit - b'0') as usize]);
    }
    s
}

/// Value of a superscript digit
pub(crate) fn superscript_digit(c: char) -> Option<u32> {
    SUPERSCRIPT_DIGITS
        .iter()
        .position(|&d| d == c)
        .map(|d| d as u32)
}

pub(crate) fn is_superscript(c: char) -> bool {
    c == SUPERSCRIPT_MINUS || superscript_digit(c).is_some()
}

pub(crate) fn is_unit_separator(c: char) -> bool {
    c == DOT_OPERATOR || c == '\u{B7}'
}

pub(crate) fn is_fraction_slash(c: char) -> bool {
    c == FRACTION_SLASH
}

impl fmt::Display for Quantity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let formatter = Formatter::default().with_precision(f.precision());
        f.write_str(&formatter.format(self))
    }
}

impl fmt::Display for UnitRatio {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&Formatter::default().format_units(self))
    }
}

impl fmt::Display for Maker {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let formatter = Formatter::default().with_precision(f.precision());
        if self.factor() == 1.0 && !self.units().is_empty() {
            f.write_str(&formatter.format_units(self.units()))
        } else {
            f.write_char('*')?;
            f.write_str(&formatter.format(self))
        }
    }
}
