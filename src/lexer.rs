use std::num::ParseIntError;

use crate::{
    source::Source,
    token::{Span, Token, TokenKind, KEYWORDS},
};

/// The TINY lexer.
///
/// Tokens are produced on demand: the compiler never holds more than one of
/// them. Separators (whitespace, line breaks and commas) are insignificant and
/// are skipped both before and after every token, so the underlying source is
/// always positioned at the start of the next token.
pub struct Lexer<'src> {
    source: Source<'src>,
    current_lo: usize,
    finished: bool,
}

impl<'src> Lexer<'src> {
    pub fn new(src: &'src str) -> Lexer<'src> {
        let mut lexer = Lexer {
            source: Source::new(src),
            current_lo: 0,
            finished: false,
        };
        lexer.skip_separators();
        lexer
    }

    /// Scans the next token. Once the input is exhausted, every call returns
    /// an [`TokenKind::Eof`] token.
    pub fn next_token(&mut self) -> Token {
        let kind = self.scan_token_kind();
        let token = Token::new(kind, self.span());
        self.skip_separators();
        token
    }

    /// Tries to scan the current character.
    fn scan_token_kind(&mut self) -> TokenKind {
        use TokenKind::*;
        if self.source.current().is_none() {
            self.current_lo = self.source.offset();
            return Eof;
        }
        match self.mark_advance() {
            '+' => Plus,
            '-' => Minus,
            '*' => Star,
            '/' => Slash,
            '=' => Eq,
            '#' => Hash,
            '<' => match self.peek() {
                '=' => self.advance_with(LessEq),
                '>' => self.advance_with(LessGreater),
                _ => Less,
            },
            '>' => match self.peek() {
                '=' => self.advance_with(GreaterEq),
                _ => Greater,
            },
            '!' => Bang,
            '&' => Amp,
            '|' => Pipe,
            '~' => Tilde,
            '(' => LParen,
            ')' => RParen,
            '.' => Dot,
            c if c.is_ascii_alphabetic() => self.identifier_or_keyword(),
            c if c.is_ascii_digit() => self.number(),
            _ => Unknown,
        }
    }

    fn identifier_or_keyword(&mut self) -> TokenKind {
        while self.peek().is_ascii_alphanumeric() {
            self.advance();
        }
        let upper = self.substr().to_ascii_uppercase();
        KEYWORDS
            .get(upper.as_str())
            .copied()
            .unwrap_or(TokenKind::Ident)
    }

    fn number(&mut self) -> TokenKind {
        while self.peek().is_ascii_digit() {
            self.advance();
        }
        TokenKind::Number
    }

    fn skip_separators(&mut self) {
        while is_separator(self.peek()) {
            self.advance();
        }
    }
}

impl Lexer<'_> {
    /// Starts a new token "mark" and advances the source.
    fn mark_advance(&mut self) -> char {
        self.current_lo = self.source.offset();
        self.advance()
    }

    /// Returns the current character and advances the source.
    fn advance(&mut self) -> char {
        let c = self.peek();
        self.source.advance();
        c
    }

    /// Advances and returns the provided value.
    fn advance_with<T>(&mut self, value: T) -> T {
        self.advance();
        value
    }

    /// Returns the current character without advancing, or NUL at the end.
    fn peek(&self) -> char {
        self.source.current().unwrap_or('\0')
    }

    /// Returns the current span.
    fn span(&self) -> Span {
        Span::new_of_bounds(self.current_lo..self.source.offset())
    }

    /// Returns the substring of the current marked bounds.
    fn substr(&self) -> &str {
        self.span().substr(self.source.src())
    }
}

/// Yields every token up to and including the end-of-input token.
impl Iterator for Lexer<'_> {
    type Item = Token;

    fn next(&mut self) -> Option<Token> {
        if self.finished {
            return None;
        }
        let token = self.next_token();
        self.finished = token.is_eof();
        Some(token)
    }
}

fn is_separator(c: char) -> bool {
    matches!(c, ' ' | '\t' | '\r' | '\n' | ',')
}

pub mod extract {
    use super::*;

    pub fn int(token: Token, src: &str) -> Result<i64, ParseIntError> {
        debug_assert_eq!(token.kind, TokenKind::Number);
        token.span().substr(src).parse()
    }

    /// Names are case-insensitive; their canonical form is uppercase.
    pub fn ident(token: Token, src: &str) -> String {
        debug_assert_eq!(token.kind, TokenKind::Ident);
        token.span().substr(src).to_ascii_uppercase()
    }
}
