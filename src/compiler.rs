//! The single-pass compiler.
//!
//! There is no syntax tree: every grammar rule is a method which consumes
//! tokens from the lexer and emits code as it goes. The only state is held by
//! [`Compiler`]: one token of lookahead, the symbol table, the label counter
//! and the code generator.

use std::fmt;

use crate::{
    codegen::{m68k::M68k, ops::Ops, Generator, Isa, Labels, Listing, Op, Target},
    lexer::{extract, Lexer},
    symbols::SymbolTable,
    token::{Span, Spanned, Token, TokenKind},
    util::intern::Name,
};

mod boolean;
mod control;
mod decl;
mod expr;

type Result<T, E = CompileError> = std::result::Result<T, E>;

pub type CompileError = Spanned<Error>;

pub type CompileResult<T> = std::result::Result<T, CompileError>;

/// Compiles a whole TINY program.
pub fn compile_program(src: &str, target: Target) -> CompileResult<Listing> {
    compile(src, target, &[], Unit::Program)
}

/// Compiles an arithmetic expression. The `declared` variables may be
/// referenced.
pub fn compile_expr(src: &str, target: Target, declared: &[&str]) -> CompileResult<Listing> {
    compile(src, target, declared, Unit::Expr)
}

/// Compiles a boolean expression. The `declared` variables may be referenced.
pub fn compile_condition(src: &str, target: Target, declared: &[&str]) -> CompileResult<Listing> {
    compile(src, target, declared, Unit::Condition)
}

/// Compiles a sequence of statements. The `declared` variables may be
/// referenced.
pub fn compile_block(src: &str, target: Target, declared: &[&str]) -> CompileResult<Listing> {
    compile(src, target, declared, Unit::Block)
}

/// What a source text is expected to contain.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Unit {
    Program,
    Block,
    Condition,
    Expr,
}

pub fn compile(
    src: &str,
    target: Target,
    declared: &[&str],
    unit: Unit,
) -> CompileResult<Listing> {
    match target {
        Target::m68k => Compiler::<M68k>::new(src).run(declared, unit),
        Target::ops => Compiler::<Ops>::new(src).run(declared, unit),
    }
}

#[derive(Copy, Clone)]
enum VarOp {
    Load,
    Store,
}

pub(crate) struct Compiler<'src, I> {
    src: &'src str,
    lexer: Lexer<'src>,
    look: Token,
    symbols: SymbolTable,
    labels: Labels,
    gen: Generator<I>,
}

impl<I: Isa> Compiler<'_, I> {
    fn run(mut self, declared: &[&str], unit: Unit) -> CompileResult<Listing> {
        self.predeclare(declared)?;
        match unit {
            Unit::Program => self.program()?,
            Unit::Block => self.block()?,
            Unit::Condition => self.bool_expression()?,
            Unit::Expr => self.expression()?,
        }
        self.consume(TokenKind::Eof)?;
        Ok(self.gen.finish())
    }

    /// Declares names given alongside the source. Each one must lex as a
    /// single identifier.
    fn predeclare(&mut self, declared: &[&str]) -> Result<()> {
        // These don't come from the source, so there is no meaningful span.
        let nowhere = Span::new_of_length(0, 0);
        for &raw in declared {
            let mut lexer = Lexer::new(raw);
            let token = lexer.next_token();
            if token.kind != TokenKind::Ident || !lexer.next_token().is_eof() {
                return Err(nowhere.wrap(Error::InvalidDeclaredName(raw.into())));
            }
            let name = extract::ident(token, raw);
            if self.symbols.declare(&name).is_err() {
                return Err(nowhere.wrap(Error::DuplicateDeclaredName(name.into())));
            }
        }
        Ok(())
    }
}

impl<I: Isa> Compiler<'_, I> {
    pub fn new(src: &str) -> Compiler<'_, I> {
        let mut lexer = Lexer::new(src);
        let look = lexer.next_token();
        Compiler {
            src,
            lexer,
            look,
            symbols: SymbolTable::with_capacity(32),
            labels: Labels::default(),
            gen: Generator::new(),
        }
    }

    fn emit(&mut self, op: Op<'_>) {
        self.gen.generate(op);
    }

    /// Returns the current token.
    fn peek(&self) -> Token {
        self.look
    }

    /// Returns the current token and advances.
    fn advance(&mut self) -> Token {
        let c = self.look;
        self.look = self.lexer.next_token();
        c
    }

    /// Checks whether the current token matches the given one.
    fn is(&self, expect: TokenKind) -> bool {
        self.look.kind == expect
    }

    /// Advances if the current token matches the provided one, returning true.
    /// If not, returns false and doesn't advance.
    fn take(&mut self, expect: TokenKind) -> bool {
        if self.is(expect) {
            self.advance();
            true
        } else {
            false
        }
    }

    /// Advances if the current token matches the provided one.
    /// If not, fails naming the expected token.
    fn consume(&mut self, expect: TokenKind) -> Result<Token> {
        self.consume_any(&[expect])
    }

    /// Advances if the current token matches any of the provided tokens.
    fn consume_any(&mut self, expect: &[TokenKind]) -> Result<Token> {
        if expect.contains(&self.look.kind) {
            return Ok(self.advance());
        }
        Err(self.unexpected(expect))
    }

    /// Builds the error for a lookahead which is none of `expected`.
    fn unexpected(&self, expected: &[TokenKind]) -> CompileError {
        let c = self.peek();
        let expected = Box::from(expected);
        let error = if c.is_eof() {
            Error::UnexpectedEndOfInput { expected }
        } else {
            Error::UnexpectedToken {
                actual: c.kind,
                expected,
            }
        };
        c.span().wrap(error)
    }

    /// Consumes a name, in its canonical form.
    fn name(&mut self) -> Result<(String, Span)> {
        let token = self.consume(TokenKind::Ident)?;
        Ok((extract::ident(token, self.src), token.span()))
    }

    /// Consumes the name of a declared variable.
    fn declared_name(&mut self) -> Result<Name> {
        let (name, span) = self.name()?;
        self.symbols.resolve(&name).map_err(|e| span.wrap(e))
    }

    /// Emits an operation on a declared variable.
    fn emit_var(&mut self, op: VarOp, name: Name) {
        let name = self.symbols.name(name);
        self.gen.generate(match op {
            VarOp::Load => Op::LoadVar(name),
            VarOp::Store => Op::Store(name),
        });
    }

    /// Consumes an unsigned integer literal.
    fn number(&mut self) -> Result<i64> {
        let token = self.consume(TokenKind::Number)?;
        extract::int(token, self.src).map_err(|e| token.span().wrap(Error::from(e)))
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Error {
    UnexpectedToken {
        actual: TokenKind,
        expected: Box<[TokenKind]>,
    },
    UnexpectedEndOfInput {
        expected: Box<[TokenKind]>,
    },
    DuplicateDeclaration(Box<str>),
    UndefinedIdentifier(Box<str>),
    ParseInt,
    /// A pre-declared name which is not an identifier.
    InvalidDeclaredName(Box<str>),
    DuplicateDeclaredName(Box<str>),
}

impl Error {
    /// Whether the error is about the source text, as opposed to the names
    /// declared alongside it.
    pub fn is_in_source(&self) -> bool {
        !matches!(
            self,
            Error::InvalidDeclaredName(_) | Error::DuplicateDeclaredName(_)
        )
    }
}

impl From<std::num::ParseIntError> for Error {
    fn from(_: std::num::ParseIntError) -> Self {
        Error::ParseInt
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::UnexpectedToken { actual, expected } => match &**expected {
                [expected] => write!(f, "expected token {expected:?}, but got {actual:?}"),
                expected => write!(f, "expected one of {expected:?}, but got {actual:?}"),
            },
            Error::UnexpectedEndOfInput { expected } => match &**expected {
                [expected] => write!(f, "expected token {expected:?}, but input ended"),
                expected => write!(f, "expected one of {expected:?}, but input ended"),
            },
            Error::DuplicateDeclaration(name) => write!(f, "duplicate variable name {name}"),
            Error::UndefinedIdentifier(name) => write!(f, "undefined identifier {name}"),
            Error::ParseInt => write!(f, "parse int error, out of bounds"),
            Error::InvalidDeclaredName(name) => {
                write!(f, "declared name {name:?} is not an identifier")
            }
            Error::DuplicateDeclaredName(name) => {
                write!(f, "name {name} is declared more than once")
            }
        }
    }
}

/// The alternate form (`{:#}`) prefixes the span of errors in the source.
impl fmt::Display for Spanned<Error> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let Spanned { span, inner: error } = self;
        if f.alternate() && error.is_in_source() {
            write!(f, "{span}: ")?;
        }
        write!(f, "{error}")
    }
}

impl std::error::Error for Spanned<Error> {}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::util::test_utils::listing_tests;
    use pretty_assertions::assert_eq;

    #[test]
    fn errors_are_values() {
        let error = compile_expr("1 +", Target::ops, &[]).unwrap_err();
        assert_eq!(
            error.inner,
            Error::UnexpectedEndOfInput {
                expected: Box::from([TokenKind::LParen, TokenKind::Ident, TokenKind::Number]),
            }
        );
        assert_eq!(error.span, Span::new_of_length(3, 0));
    }

    #[test]
    fn declared_names_are_case_insensitive() {
        let listing = compile_expr("count", Target::ops, &["Count"]).unwrap();
        assert_eq!(listing.to_string(), "    load_var COUNT\n");
    }

    #[test]
    fn duplicate_predeclared_names() {
        let error = compile_expr("a", Target::ops, &["a", "A"]).unwrap_err();
        assert_eq!(error.inner, Error::DuplicateDeclaredName("A".into()));
        assert_eq!(format!("{error:#}"), "name A is declared more than once");
    }

    #[test]
    fn predeclared_names_must_be_identifiers() {
        for raw in ["", "1x", "if", "a b", "a+b", "t"] {
            let error = compile_expr("1", Target::ops, &[raw]).unwrap_err();
            assert_eq!(error.inner, Error::InvalidDeclaredName(raw.into()));
        }
        let error = compile_block("x = 1", Target::ops, &["x", "a b"]).unwrap_err();
        assert_eq!(
            format!("{error:#}"),
            "declared name \"a b\" is not an identifier"
        );
    }

    #[test]
    fn predeclared_names_may_carry_separators() {
        let listing = compile_expr("count", Target::ops, &[" count,"]).unwrap();
        assert_eq!(listing.to_string(), "    load_var COUNT\n");
    }

    #[test]
    fn compile_dispatches_on_unit() {
        let block = compile_block("x = 1", Target::m68k, &["x"]).unwrap();
        let via_compile = compile("x = 1", Target::m68k, &["x"], Unit::Block).unwrap();
        assert_eq!(block, via_compile);
    }

    listing_tests!(
        use expr, ops;

        fn test_trailing_input() {
            let source = "1 2";
            let expected_error = "2..3: expected token Eof, but got Number";
        }

        fn test_unclosed_paren() {
            let source = "(1";
            let expected_error = "2..2: expected token RParen, but input ended";
        }
    );
}
