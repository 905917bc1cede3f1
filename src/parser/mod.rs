//! Quantity parser
//!
//! Grammar:
//! ```txt
//! quantity  = Whitespace? (sign? number)? sep* units Whitespace? Eof
//! number    = Number | "Inf" | "NaN"
//! sign      = Plus | Minus
//!
//! units     = line (fraction sep* line)?
//! fraction  = Slash | FractionSlash
//! line      = (Word exponent? sep*)*
//! exponent  = Caret Minus? Number | Superscript
//! sep       = Whitespace | Star | DotOperator
//! ```
//! `FractionSlash`, `DotOperator` and `Superscript` are only valid with
//! [`ParseFlags::UNICODE`].

use std::borrow::Cow;

use bitflags::bitflags;
use thiserror::Error;

use crate::{
    error::RichError,
    format::superscript_digit,
    lexer::{Cursor, TokenKind, T},
    maker::Maker,
    quantity::Quantity,
    span::Span,
};

bitflags! {
    /// Parser options
    ///
    /// [`ParseFlags::default`] is [`ParseFlags::UNICODE`].
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct ParseFlags: u32 {
        /// Unknown symbols become new primitive units instead of an error
        const ALLOW_UNKNOWN = 1 << 0;
        /// Accept `⋅` and `·` between units, `⁄` as fraction and
        /// superscript exponents
        const UNICODE       = 1 << 1;
    }
}

impl Default for ParseFlags {
    fn default() -> Self {
        Self::UNICODE
    }
}

/// Source of units for the parser
///
/// Implemented by [`Registry`](crate::Registry),
/// [`RegistryBuilder`](crate::RegistryBuilder) and any
/// `Fn(&str) -> Option<Maker>`.
pub trait UnitLookup {
    /// Finds the unit for a symbol
    fn find(&self, symbol: &str) -> Option<Maker>;
}

impl<F> UnitLookup for F
where
    F: Fn(&str) -> Option<Maker>,
{
    fn find(&self, symbol: &str) -> Option<Maker> {
        self(symbol)
    }
}

/// Parses a quantity like `"1.234 kg m/s^2"` or `"1.234 kg⋅m⋅s⁻²"`
///
/// Without a number, the scalar is 1. Units in the denominator or with a
/// negative exponent go to the other side of the ratio.
#[tracing::instrument(level = "trace", skip(lookup), ret)]
pub fn parse(
    input: &str,
    lookup: &(impl UnitLookup + ?Sized),
    flags: ParseFlags,
) -> Result<Quantity, ParseError> {
    QuantityParser::new(input, lookup, flags).quantity()
}

#[derive(Debug, Clone, Copy)]
struct Token {
    kind: TokenKind,
    span: Span,
}

fn tokenize(input: &str) -> Vec<Token> {
    let mut cursor = Cursor::new(input);
    let mut offset = 0;
    let mut tokens = Vec::new();
    loop {
        let token = cursor.advance_token();
        let span = Span::new(offset, offset + token.len as usize);
        offset = span.end();
        tokens.push(Token {
            kind: token.kind,
            span,
        });
        if token.kind == T![eof] {
            break;
        }
    }
    tokens
}

struct QuantityParser<'i, 'l, L: ?Sized> {
    input: &'i str,
    tokens: Vec<Token>,
    current: usize,
    lookup: &'l L,
    flags: ParseFlags,
}

impl<'i, 'l, L> QuantityParser<'i, 'l, L>
where
    L: UnitLookup + ?Sized,
{
    fn new(input: &'i str, lookup: &'l L, flags: ParseFlags) -> Self {
        Self {
            input,
            tokens: tokenize(input),
            current: 0,
            lookup,
            flags,
        }
    }

    fn peek(&self) -> Token {
        // the last token is always eof
        self.tokens[self.current.min(self.tokens.len() - 1)]
    }

    fn at(&self, kind: TokenKind) -> bool {
        self.peek().kind == kind
    }

    fn bump(&mut self) -> Token {
        let token = self.peek();
        if token.kind != T![eof] {
            self.current += 1;
        }
        token
    }

    fn text(&self, token: Token) -> &'i str {
        token.span.slice(self.input)
    }

    fn unicode(&self) -> bool {
        self.flags.contains(ParseFlags::UNICODE)
    }

    fn unexpected(&self, token: Token) -> ParseError {
        ParseError::Unexpected {
            text: self.text(token).to_string(),
            span: token.span,
        }
    }

    fn skip_ws(&mut self) {
        while self.at(T![ws]) {
            self.bump();
        }
    }

    fn skip_separators(&mut self) -> Result<(), ParseError> {
        loop {
            let token = self.peek();
            match token.kind {
                T![ws] | T![*] => {}
                TokenKind::DotOperator if self.unicode() => {}
                TokenKind::DotOperator => return Err(self.unexpected(token)),
                _ => return Ok(()),
            }
            self.bump();
        }
    }

    fn quantity(mut self) -> Result<Quantity, ParseError> {
        self.skip_ws();
        let scalar = self.scalar()?.unwrap_or(1.0);
        self.skip_separators()?;

        let (mut units, _) = self.line()?;
        let token = self.peek();
        let is_fraction = match token.kind {
            T![/] => true,
            TokenKind::FractionSlash if self.unicode() => true,
            _ => false,
        };
        if is_fraction {
            self.bump();
            self.skip_separators()?;
            let (denominator, count) = self.line()?;
            if count == 0 {
                return Err(ParseError::MissingDenominator { span: token.span });
            }
            units = &units / &denominator;
        }

        self.skip_ws();
        let token = self.peek();
        if token.kind != T![eof] {
            return Err(self.unexpected(token));
        }
        Ok(units.make(scalar))
    }

    fn scalar(&mut self) -> Result<Option<f64>, ParseError> {
        let sign_token = self.peek();
        let sign = match sign_token.kind {
            T![+] => Some(1.0),
            T![-] => Some(-1.0),
            _ => None,
        };
        if sign.is_some() {
            self.bump();
        }

        let token = self.peek();
        let value = match token.kind {
            T![number] => {
                let text = self.text(token);
                text.parse::<f64>()
                    .map_err(|source| ParseError::InvalidNumber {
                        span: token.span,
                        source,
                    })?
            }
            T![word] if self.text(token) == "Inf" => f64::INFINITY,
            T![word] if self.text(token) == "NaN" => f64::NAN,
            _ if sign.is_some() => {
                return Err(ParseError::ExpectedNumber {
                    span: sign_token.span,
                })
            }
            _ => return Ok(None),
        };
        self.bump();
        Ok(Some(value * sign.unwrap_or(1.0)))
    }

    /// Parses units until something that is not a unit, returns the
    /// product and how many symbols were found
    fn line(&mut self) -> Result<(Maker, usize), ParseError> {
        let mut units = Maker::unity();
        let mut count = 0;
        while self.at(T![word]) {
            let token = self.bump();
            let maker = self.unit(token)?;
            let exponent = self.exponent()?;
            units = &units * &maker.pow(exponent);
            count += 1;
            self.skip_separators()?;
        }
        let token = self.peek();
        if token.kind == TokenKind::Superscript || token.kind == T![^] {
            return Err(ParseError::InvalidExponent {
                reason: "an exponent must follow a unit",
                span: token.span,
            });
        }
        Ok((units, count))
    }

    fn unit(&self, token: Token) -> Result<Maker, ParseError> {
        let name = self.text(token);
        if let Some(maker) = self.lookup.find(name) {
            return Ok(maker);
        }
        if self.flags.contains(ParseFlags::ALLOW_UNKNOWN) {
            tracing::trace!(name, "unknown unit as primitive");
            return Ok(Maker::primitive(name));
        }
        Err(ParseError::UnknownUnit {
            name: name.to_string(),
            span: token.span,
        })
    }

    fn exponent(&mut self) -> Result<i32, ParseError> {
        let token = self.peek();
        let exponent = match token.kind {
            T![^] => {
                self.bump();
                let negative = self.at(T![-]);
                if negative {
                    self.bump();
                }
                let number = self.peek();
                if number.kind != T![number] {
                    return Err(ParseError::InvalidExponent {
                        reason: "expected an integer after '^'",
                        span: token.span.merge(number.span),
                    });
                }
                self.bump();
                let span = token.span.merge(number.span);
                let text = self.text(number);
                if !text.bytes().all(|b| b.is_ascii_digit()) {
                    return Err(ParseError::InvalidExponent {
                        reason: "exponents must be integers",
                        span,
                    });
                }
                let value = parse_exponent(text.bytes().map(|b| (b - b'0') as u32), span)?;
                if negative {
                    -value
                } else {
                    value
                }
            }
            TokenKind::Superscript if self.unicode() => {
                self.bump();
                let text = self.text(token);
                let negative = text.starts_with('⁻');
                let digits: Vec<u32> = text.chars().filter_map(superscript_digit).collect();
                if digits.is_empty() {
                    return Err(ParseError::InvalidExponent {
                        reason: "expected digits after '⁻'",
                        span: token.span,
                    });
                }
                let value = parse_exponent(digits.into_iter(), token.span)?;
                if negative {
                    -value
                } else {
                    value
                }
            }
            TokenKind::Superscript => return Err(self.unexpected(token)),
            _ => return Ok(1),
        };
        if exponent == 0 {
            return Err(ParseError::InvalidExponent {
                reason: "exponent must not be 0",
                span: token.span.merge(self.tokens[self.current - 1].span),
            });
        }
        Ok(exponent)
    }
}

/// Largest exponent accepted by the parser
///
/// A power is stored as repeated units, so `m^1000` holds a thousand `m`.
pub const MAX_EXPONENT: i32 = 1000;

fn parse_exponent(digits: impl Iterator<Item = u32>, span: Span) -> Result<i32, ParseError> {
    let mut value: i32 = 0;
    for d in digits {
        value = value
            .checked_mul(10)
            .and_then(|v| v.checked_add(d as i32))
            .filter(|&v| v <= MAX_EXPONENT)
            .ok_or(ParseError::InvalidExponent {
                reason: "exponent is too large",
                span,
            })?;
    }
    Ok(value)
}

/// Errors generated by [`parse`].
#[derive(Debug, Error, Clone, PartialEq)]
pub enum ParseError {
    #[error("Error parsing decimal number")]
    InvalidNumber {
        span: Span,
        source: std::num::ParseFloatError,
    },

    #[error("Expected a number after the sign")]
    ExpectedNumber { span: Span },

    #[error("Unknown unit: '{name}'")]
    UnknownUnit { name: String, span: Span },

    #[error("Invalid exponent: {reason}")]
    InvalidExponent { reason: &'static str, span: Span },

    #[error("Missing units after the fraction slash")]
    MissingDenominator { span: Span },

    #[error("Unexpected '{text}'")]
    Unexpected { text: String, span: Span },
}

impl ParseError {
    /// Location of the error in the input
    pub fn span(&self) -> Span {
        match self {
            ParseError::InvalidNumber { span, .. }
            | ParseError::ExpectedNumber { span }
            | ParseError::UnknownUnit { span, .. }
            | ParseError::InvalidExponent { span, .. }
            | ParseError::MissingDenominator { span }
            | ParseError::Unexpected { span, .. } => *span,
        }
    }
}

impl RichError for ParseError {
    fn labels(&self) -> Vec<(Span, Option<Cow<'static, str>>)> {
        let text = match self {
            ParseError::ExpectedNumber { .. } => Some("expected number"),
            ParseError::UnknownUnit { .. } => Some("unknown symbol"),
            ParseError::MissingDenominator { .. } => Some("nothing after this"),
            _ => None,
        };
        vec![(self.span(), text.map(Cow::from))]
    }

    fn help(&self) -> Option<Cow<'static, str>> {
        match self {
            ParseError::InvalidExponent { .. } => Some(
                format!(
                    "Exponents are non zero integers up to {MAX_EXPONENT}: m^2, s^-1, m², s⁻¹"
                )
                .into(),
            ),
            ParseError::MissingDenominator { .. } => {
                Some("Add units after the slash or remove it".into())
            }
            _ => None,
        }
    }

    fn note(&self) -> Option<Cow<'static, str>> {
        match self {
            ParseError::UnknownUnit { .. } => {
                Some("Unknown symbols can be allowed with ParseFlags::ALLOW_UNKNOWN".into())
            }
            _ => None,
        }
    }

    fn code(&self) -> Option<&'static str> {
        Some("parser")
    }
}
