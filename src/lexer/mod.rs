mod cursor;

pub use cursor::Cursor;

use finl_unicode::categories::CharacterCategories;

use crate::format::{is_fraction_slash, is_superscript, is_unit_separator};

#[derive(Debug)]
pub struct Token {
    pub kind: TokenKind,
    pub len: u32,
}

impl Token {
    fn new(kind: TokenKind, len: u32) -> Token {
        Token { kind, len }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenKind {
    /// "^"
    Caret,
    /// "/"
    Slash,
    /// "⁄" (U+2044)
    FractionSlash,
    /// "*"
    Star,
    /// "⋅" (U+22C5) and "·" (U+00B7)
    DotOperator,
    /// "+"
    Plus,
    /// "-"
    Minus,

    /// "14", "1.5", ".5", "5.", "6.02e23", "1E-3"
    Number,
    /// "⁻²", "³"
    Superscript,
    /// Unit symbol: "kg", "°C", "Ω", "k_B"
    Word,

    /// Any whitespace
    Whitespace,
    /// Everything else
    Unknown,

    /// End of input
    Eof,
}

fn is_whitespace(c: char) -> bool {
    c.is_separator_space() || matches!(c, '\t' | '\n' | '\r')
}

fn is_word_start(c: char) -> bool {
    c.is_alphabetic() || c.is_symbol_other() || matches!(c, '′' | '″' | '%')
}

fn is_word_char(c: char) -> bool {
    is_word_start(c) || c.is_ascii_digit() || c == '_'
}

impl Cursor<'_> {
    pub fn advance_token(&mut self) -> Token {
        let current = match self.bump() {
            Some(c) => c,
            None => return Token::new(TokenKind::Eof, 0),
        };

        let token_kind = match current {
            '^' => TokenKind::Caret,
            '/' => TokenKind::Slash,
            '*' => TokenKind::Star,
            '+' => TokenKind::Plus,
            '-' => TokenKind::Minus,
            '0'..='9' => self.number(),
            '.' if self.first().is_ascii_digit() => self.number(),

            c if is_fraction_slash(c) => TokenKind::FractionSlash,
            c if is_unit_separator(c) => TokenKind::DotOperator,
            c if is_superscript(c) => self.superscript(),
            c if is_whitespace(c) => self.whitespace(),
            c if is_word_start(c) => self.word(),

            _ => TokenKind::Unknown,
        };
        let token = Token::new(token_kind, self.pos_within_token());
        self.reset_pos_within_token();
        token
    }

    fn word(&mut self) -> TokenKind {
        debug_assert!(self.pos_within_token() > 0);
        self.eat_while(is_word_char);
        TokenKind::Word
    }

    fn whitespace(&mut self) -> TokenKind {
        debug_assert!(is_whitespace(self.prev()));
        self.eat_while(is_whitespace);
        TokenKind::Whitespace
    }

    fn superscript(&mut self) -> TokenKind {
        self.eat_while(|c| is_superscript(c) && c != '⁻');
        TokenKind::Superscript
    }

    fn number(&mut self) -> TokenKind {
        debug_assert!(self.prev().is_ascii_digit() || self.prev() == '.');
        let mut seen_dot = self.prev() == '.';
        loop {
            match self.first() {
                '0'..='9' => {
                    self.bump();
                }
                '.' if !seen_dot => {
                    seen_dot = true;
                    self.bump();
                }
                _ => break,
            }
        }
        if matches!(self.first(), 'e' | 'E') {
            let exponent = match self.second() {
                '0'..='9' => true,
                '+' | '-' => self.third().is_ascii_digit(),
                _ => false,
            };
            if exponent {
                self.bump(); // e
                self.bump(); // sign or first digit
                self.eat_while(|c| c.is_ascii_digit());
            }
        }
        TokenKind::Number
    }
}

/// Shorthand macro for [`TokenKind`]
macro_rules! T {
    [^] => {
        $crate::lexer::TokenKind::Caret
    };
    [/] => {
        $crate::lexer::TokenKind::Slash
    };
    [*] => {
        $crate::lexer::TokenKind::Star
    };
    [+] => {
        $crate::lexer::TokenKind::Plus
    };
    [-] => {
        $crate::lexer::TokenKind::Minus
    };
    [number] => {
        $crate::lexer::TokenKind::Number
    };
    [word] => {
        $crate::lexer::TokenKind::Word
    };
    [ws] => {
        $crate::lexer::TokenKind::Whitespace
    };
    [eof] => {
        $crate::lexer::TokenKind::Eof
    };
}
pub(crate) use T;
