//! Arithmetic expressions.
//!
//! ```text
//! factor       := '(' expression ')' | name | number
//! signed       := ['+'] factor | '-' factor
//! term         := signed {('*' | '/') factor}
//! expression   := ['+' | '-'] term {('+' | '-') term}
//! ```
//!
//! Precedence comes from the shape of the grammar alone: terms nest inside
//! expressions, so products are always combined before sums.

use crate::{
    codegen::{Isa, Op},
    token::TokenKind,
};

use super::{Compiler, Result, VarOp};

impl<I: Isa> Compiler<'_, I> {
    pub(super) fn expression(&mut self) -> Result<()> {
        // A leading sign applies to an implicit zero: `-a` is `0 - a`.
        if self.is_add_op() {
            self.emit(Op::Clear);
        } else {
            self.term()?;
        }
        while self.is_add_op() {
            self.emit(Op::Push);
            match self.advance().kind {
                TokenKind::Plus => {
                    self.term()?;
                    self.emit(Op::PopAdd);
                }
                TokenKind::Minus => {
                    self.term()?;
                    self.emit(Op::PopSub);
                }
                _ => unreachable!(),
            }
        }
        Ok(())
    }

    fn term(&mut self) -> Result<()> {
        self.signed_factor()?;
        while self.is_mul_op() {
            self.emit(Op::Push);
            match self.advance().kind {
                TokenKind::Star => {
                    self.factor()?;
                    self.emit(Op::PopMul);
                }
                TokenKind::Slash => {
                    self.factor()?;
                    self.emit(Op::PopDiv);
                }
                _ => unreachable!(),
            }
        }
        Ok(())
    }

    fn signed_factor(&mut self) -> Result<()> {
        if self.take(TokenKind::Plus) {
            return self.factor();
        }
        if !self.take(TokenKind::Minus) {
            return self.factor();
        }
        // Negative literals are folded.
        if self.is(TokenKind::Number) {
            let n = self.number()?;
            self.emit(Op::LoadConst(-n));
        } else {
            self.factor()?;
            self.emit(Op::Negate);
        }
        Ok(())
    }

    fn factor(&mut self) -> Result<()> {
        match self.peek().kind {
            TokenKind::LParen => {
                self.advance();
                self.expression()?;
                self.consume(TokenKind::RParen)?;
            }
            TokenKind::Ident => {
                let name = self.declared_name()?;
                self.emit_var(VarOp::Load, name);
            }
            TokenKind::Number => {
                let n = self.number()?;
                self.emit(Op::LoadConst(n));
            }
            _ => {
                return Err(self.unexpected(&[
                    TokenKind::LParen,
                    TokenKind::Ident,
                    TokenKind::Number,
                ]))
            }
        }
        Ok(())
    }

    fn is_add_op(&self) -> bool {
        matches!(self.peek().kind, TokenKind::Plus | TokenKind::Minus)
    }

    fn is_mul_op(&self) -> bool {
        matches!(self.peek().kind, TokenKind::Star | TokenKind::Slash)
    }
}
