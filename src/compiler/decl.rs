//! Whole programs and their variable declarations.
//!
//! ```text
//! program := [PROGRAM] {VAR var {var}} BEGIN block END ['.']
//! var     := name ['=' ['-'] number]
//! ```

use crate::{
    codegen::{Isa, Op},
    token::TokenKind,
};

use super::{Compiler, Result};

impl<I: Isa> Compiler<'_, I> {
    pub(super) fn program(&mut self) -> Result<()> {
        self.take(TokenKind::Program);
        self.emit(Op::Header);
        self.top_decls()?;
        self.consume(TokenKind::Begin)?;
        self.emit(Op::Prolog);
        self.block()?;
        self.consume(TokenKind::End)?;
        self.take(TokenKind::Dot);
        self.emit(Op::Epilog);
        Ok(())
    }

    fn top_decls(&mut self) -> Result<()> {
        loop {
            match self.peek().kind {
                TokenKind::Var => {
                    self.advance();
                    self.alloc()?;
                    while self.is(TokenKind::Ident) {
                        self.alloc()?;
                    }
                }
                TokenKind::Begin => return Ok(()),
                _ => return Err(self.unexpected(&[TokenKind::Var, TokenKind::Begin])),
            }
        }
    }

    /// Declares a variable and reserves its storage.
    fn alloc(&mut self) -> Result<()> {
        let (name, span) = self.name()?;
        let handle = self.symbols.declare(&name).map_err(|e| span.wrap(e))?;
        let value = if self.take(TokenKind::Eq) {
            let negative = self.take(TokenKind::Minus);
            let n = self.number()?;
            if negative {
                -n
            } else {
                n
            }
        } else {
            0
        };
        let name = self.symbols.name(handle);
        self.gen.generate(Op::Allocate { name, value });
        Ok(())
    }
}
