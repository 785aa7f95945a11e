use std::{fmt, ops::Range};

#[derive(Copy, Clone, PartialEq, Eq)]
pub struct Token {
    pub kind: TokenKind,
    lo: usize,
    len: u32,
}

impl Token {
    pub fn new(kind: TokenKind, span: Span) -> Token {
        Token {
            kind,
            len: span.len,
            lo: span.lo,
        }
    }

    pub fn span(&self) -> Span {
        Span {
            len: self.len,
            lo: self.lo,
        }
    }

    pub fn is_eof(&self) -> bool {
        self.kind == TokenKind::Eof
    }
}

impl fmt::Debug for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Token({:?}, {})", self.kind, self.span())
    }
}

#[derive(Copy, Clone, PartialEq, Eq)]
pub struct Span {
    pub len: u32,
    pub lo: usize,
}

impl Span {
    pub fn new_of_bounds(Range { start: lo, end: hi }: Range<usize>) -> Span {
        debug_assert!(hi >= lo);
        let len = u32::try_from(hi - lo).unwrap_or(u32::MAX);
        Self::new_of_length(lo, len)
    }

    pub fn new_of_length(lo: usize, len: u32) -> Span {
        Span { len, lo }
    }

    pub fn hi(&self) -> usize {
        self.lo + self.len as usize
    }

    /// Returns the slice of `src` covered by this span.
    pub fn substr<'src>(&self, src: &'src str) -> &'src str {
        &src[self.lo..self.hi()]
    }

    pub fn wrap<T>(self, inner: T) -> Spanned<T> {
        Spanned { span: self, inner }
    }
}

impl fmt::Debug for Span {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Span({self}, len: {})", self.len)
    }
}

impl fmt::Display for Span {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let lo = self.lo;
        let hi = self.hi();
        write!(f, "{lo}..{hi}")
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Spanned<T> {
    pub span: Span,
    pub inner: T,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum TokenKind {
    Program,
    Var,
    Begin,
    End,
    If,
    Then,
    Else,
    EndIf,
    While,
    EndWhile,
    Loop,
    EndLoop,
    Repeat,
    Until,
    For,
    To,
    EndFor,
    Do,
    EndDo,

    True,
    False,

    Plus,
    Minus,
    Star,
    Slash,
    /// `=`, both assignment and equality.
    Eq,
    /// `#`
    Hash,
    /// `<>`, an alias of `#`.
    LessGreater,
    Less,
    LessEq,
    Greater,
    GreaterEq,
    /// `!`
    Bang,
    /// `&`
    Amp,
    /// `|`
    Pipe,
    /// `~`, exclusive or.
    Tilde,
    LParen,
    RParen,
    Dot,

    Ident,
    Number,

    /// Any character the lexer doesn't know about.
    Unknown,
    Eof,
}

impl TokenKind {
    /// Whether this token closes a block.
    pub fn is_block_terminator(self) -> bool {
        use TokenKind::*;
        matches!(
            self,
            Else | EndIf | EndWhile | EndLoop | Until | EndFor | EndDo | End | Eof
        )
    }
}

/// Keywords are matched against the uppercased identifier.
pub static KEYWORDS: phf::Map<&'static str, TokenKind> = phf::phf_map! {
    "PROGRAM" => TokenKind::Program,
    "VAR" => TokenKind::Var,
    "BEGIN" => TokenKind::Begin,
    "END" => TokenKind::End,
    "IF" => TokenKind::If,
    "THEN" => TokenKind::Then,
    "ELSE" => TokenKind::Else,
    "ENDIF" => TokenKind::EndIf,
    "WHILE" => TokenKind::While,
    "ENDWHILE" => TokenKind::EndWhile,
    "LOOP" => TokenKind::Loop,
    "ENDLOOP" => TokenKind::EndLoop,
    "REPEAT" => TokenKind::Repeat,
    "UNTIL" => TokenKind::Until,
    "FOR" => TokenKind::For,
    "TO" => TokenKind::To,
    "ENDFOR" => TokenKind::EndFor,
    "DO" => TokenKind::Do,
    "ENDDO" => TokenKind::EndDo,
    "T" => TokenKind::True,
    "TRUE" => TokenKind::True,
    "F" => TokenKind::False,
    "FALSE" => TokenKind::False,
};
