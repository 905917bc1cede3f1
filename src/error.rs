//! Error type, formatting and utilities.

use std::{borrow::Cow, ops::Range};

use thiserror::Error;

use crate::span::Span;

/// Trait to enhace errors with rich metadata
pub trait RichError: std::error::Error {
    fn labels(&self) -> Vec<(Span, Option<Cow<'static, str>>)> {
        vec![]
    }
    fn help(&self) -> Option<Cow<'static, str>> {
        None
    }
    fn note(&self) -> Option<Cow<'static, str>> {
        None
    }
    fn code(&self) -> Option<&'static str> {
        None
    }
    fn kind(&self) -> ariadne::ReportKind {
        ariadne::ReportKind::Error
    }
}

/// Writes a rich error report
///
/// `input` is the text the error spans point into, for example the
/// text given to [`Registry::parse`](crate::Registry::parse).
pub fn write_rich_error(
    error: &dyn RichError,
    name: &str,
    input: &str,
    color: bool,
    w: impl std::io::Write,
) -> std::io::Result<()> {
    let report = build_report(error, name, input, color);
    report.write((name.to_string(), ariadne::Source::from(input)), w)
}

/// Prints a rich error report to stderr
pub fn eprint_rich_error(
    error: &dyn RichError,
    name: &str,
    input: &str,
    color: bool,
) -> std::io::Result<()> {
    write_rich_error(error, name, input, color, std::io::stderr())
}

type ReportSpan = (String, Range<usize>);

fn build_report<'a>(
    err: &'a dyn RichError,
    name: &str,
    input: &str,
    color: bool,
) -> ariadne::Report<'a, ReportSpan> {
    use ariadne::{ColorGenerator, Label, Report};

    let labels = err
        .labels()
        .into_iter()
        .map(|(span, text)| (char_range(input, span), text))
        .collect::<Vec<_>>();
    let offset = labels.iter().map(|l| l.0.start).min().unwrap_or_default();

    let mut r = Report::<ReportSpan>::build(err.kind(), name.to_string(), offset)
        .with_config(ariadne::Config::default().with_color(color));

    if let Some(code) = err.code() {
        r = r.with_code(code);
    }

    match err.source() {
        Some(source) => r.set_message(format!("{err}: {source}")),
        None => r.set_message(err),
    }

    let mut colors = ColorGenerator::new();
    r.add_labels(labels.into_iter().enumerate().map(|(order, (range, text))| {
        let label = Label::new((name.to_string(), range))
            .with_order(order as i32)
            .with_color(colors.next());
        match text {
            Some(text) => label.with_message(text),
            None => label,
        }
    }));

    if let Some(help) = err.help() {
        r.set_help(help);
    }
    if let Some(note) = err.note() {
        r.set_note(note);
    }

    r.finish()
}

// ariadne counts chars, spans count bytes
fn char_range(input: &str, span: Span) -> Range<usize> {
    let chars_before = |byte: usize| input.get(..byte).map_or(0, |s| s.chars().count());
    chars_before(span.start())..chars_before(span.end())
}

/// General error type of the crate
#[derive(Debug, Error)]
pub enum DimensionalError {
    /// Error parsing a quantity
    #[error(transparent)]
    Parse(#[from] crate::parser::ParseError),
    /// Units are not conformable
    #[error(transparent)]
    Convert(#[from] crate::convert::ConvertError),
    /// Error building a registry
    #[error(transparent)]
    Registry(#[from] crate::registry::RegistryBuilderError),
    /// Error using a prefix
    #[error(transparent)]
    Prefix(#[from] crate::unit::PrefixError),
}

impl RichError for DimensionalError {
    fn labels(&self) -> Vec<(Span, Option<Cow<'static, str>>)> {
        match self {
            DimensionalError::Parse(e) => e.labels(),
            _ => vec![],
        }
    }

    fn help(&self) -> Option<Cow<'static, str>> {
        match self {
            DimensionalError::Parse(e) => e.help(),
            _ => None,
        }
    }

    fn code(&self) -> Option<&'static str> {
        match self {
            DimensionalError::Parse(e) => e.code(),
            DimensionalError::Convert(_) => Some("convert"),
            DimensionalError::Registry(_) => Some("registry"),
            DimensionalError::Prefix(_) => Some("prefix"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{parser::ParseFlags, registry::Registry};

    #[test]
    fn rich_report() {
        let mut builder = Registry::builder();
        builder.add_primitive("m", &[]).unwrap();
        let registry = builder.finish();
        let input = "3 m^0";
        let err = registry.parse_with(input, ParseFlags::empty()).unwrap_err();

        let mut out = Vec::new();
        write_rich_error(&err, "input", input, false, &mut out).unwrap();
        let out = String::from_utf8(out).unwrap();
        assert!(out.contains("Error"));
        assert!(out.contains("exponent"));
        assert!(out.contains("input"));
    }

    #[test]
    fn report_points_at_chars() {
        let mut builder = Registry::builder();
        builder.add_primitive("µm", &[]).unwrap();
        let registry = builder.finish();
        let input = "5 µm^0";
        let err = registry.parse_with(input, ParseFlags::empty()).unwrap_err();
        assert_eq!(err.span(), Span::new(5, 7));
        assert_eq!(char_range(input, err.span()), 4..6);

        let mut out = Vec::new();
        write_rich_error(&err, "input", input, false, &mut out).unwrap();
        let out = String::from_utf8(out).unwrap();
        assert!(out.contains("input:1:5"), "{out}");
        assert!(out.contains("must not be 0"), "{out}");
    }

    #[test]
    fn char_range_out_of_bounds() {
        assert_eq!(char_range("µm", Span::new(0, 2)), 0..1);
        assert_eq!(char_range("µm", Span::new(0, 30)), 0..0);
    }

    #[test]
    fn general_error() {
        let registry = Registry::builder().finish();
        let err: DimensionalError = registry.parse("3 furlong").unwrap_err().into();
        assert_eq!(err.code(), Some("parser"));
        assert_eq!(err.labels().len(), 1);
    }
}
