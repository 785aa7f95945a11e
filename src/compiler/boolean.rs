//! Boolean expressions, and the relations bridging arithmetic into them.
//!
//! ```text
//! bool_factor     := 'T' | 'F' | relation
//! not_factor      := ['!'] bool_factor
//! bool_term       := not_factor {'&' not_factor}
//! bool_expression := bool_term {('|' | '~') bool_term}
//! relation        := expression [relop expression]
//! ```

use crate::{
    codegen::{Isa, Op, Relation},
    token::TokenKind,
};

use super::{Compiler, Result};

impl<I: Isa> Compiler<'_, I> {
    pub(super) fn bool_expression(&mut self) -> Result<()> {
        self.bool_term()?;
        while let Some(op) = self.or_op() {
            self.emit(Op::Push);
            self.advance();
            self.bool_term()?;
            self.emit(op);
        }
        Ok(())
    }

    fn bool_term(&mut self) -> Result<()> {
        self.not_factor()?;
        while self.is(TokenKind::Amp) {
            self.emit(Op::Push);
            self.advance();
            self.not_factor()?;
            self.emit(Op::PopAnd);
        }
        Ok(())
    }

    fn not_factor(&mut self) -> Result<()> {
        if self.take(TokenKind::Bang) {
            self.bool_factor()?;
            self.emit(Op::Not);
            Ok(())
        } else {
            self.bool_factor()
        }
    }

    fn bool_factor(&mut self) -> Result<()> {
        match self.peek().kind {
            TokenKind::True => {
                self.advance();
                self.emit(Op::LoadBool(true));
                Ok(())
            }
            TokenKind::False => {
                self.advance();
                self.emit(Op::LoadBool(false));
                Ok(())
            }
            _ => self.relation(),
        }
    }

    fn relation(&mut self) -> Result<()> {
        self.expression()?;
        let Some(relation) = self.relop() else {
            return Ok(());
        };
        self.advance();
        self.emit(Op::Push);
        self.expression()?;
        self.emit(Op::PopCompare(relation));
        Ok(())
    }

    fn or_op(&self) -> Option<Op<'static>> {
        match self.peek().kind {
            TokenKind::Pipe => Some(Op::PopOr),
            TokenKind::Tilde => Some(Op::PopXor),
            _ => None,
        }
    }

    fn relop(&self) -> Option<Relation> {
        Some(match self.peek().kind {
            TokenKind::Eq => Relation::Eq,
            TokenKind::Hash | TokenKind::LessGreater => Relation::NotEq,
            TokenKind::Less => Relation::Less,
            TokenKind::LessEq => Relation::LessEq,
            TokenKind::Greater => Relation::Greater,
            TokenKind::GreaterEq => Relation::GreaterEq,
            _ => return None,
        })
    }
}

#[cfg(test)]
mod tests {
    use crate::{
        codegen::{truth_word, Target},
        compiler::compile_condition,
        util::test_utils::listing_tests,
    };
    use pretty_assertions::assert_eq;

    #[test]
    fn truth_words_are_complements() {
        assert_eq!(truth_word(true), !truth_word(false));
        assert_eq!(truth_word(false), 0);
    }

    #[test]
    fn hash_and_less_greater_are_the_same_relation() {
        let declared = &["a", "b"];
        assert_eq!(
            compile_condition("a # b", Target::m68k, declared),
            compile_condition("a <> b", Target::m68k, declared),
        );
    }

    listing_tests!(
        use condition, ops, declared ["a", "b", "c"];

        fn test_not_true() {
            let source = "!T";
            let listing_ok = "
                load_true
                not
            ";
        }

        fn test_long_literals() {
            let source = "TRUE | false";
            let listing_ok = "
                load_true
                push
                load_false
                pop_or
            ";
        }

        fn test_bare_expression_is_a_condition() {
            let source = "a";
            let listing_ok = "load_var A";
        }

        fn test_relation() {
            let source = "a+1 <= b";
            let listing_ok = "
                load_var A
                push
                load_const 1
                pop_add
                push
                load_var B
                pop_compare le
            ";
        }

        fn test_and_binds_tighter_than_or() {
            let source = "a | b & c";
            let listing_ok = "
                load_var A
                push
                load_var B
                push
                load_var C
                pop_and
                pop_or
            ";
        }

        fn test_xor() {
            let source = "a ~ !b";
            let listing_ok = "
                load_var A
                push
                load_var B
                not
                pop_xor
            ";
        }

        fn test_not_applies_to_the_relation() {
            let source = "!a=b";
            let listing_ok = "
                load_var A
                push
                load_var B
                pop_compare eq
                not
            ";
        }

        fn test_all_relations() {
            let source = "a<b & a>b & a>=b & a#b";
            let listing_ok = "
                load_var A
                push
                load_var B
                pop_compare lt
                push
                load_var A
                push
                load_var B
                pop_compare gt
                pop_and
                push
                load_var A
                push
                load_var B
                pop_compare ge
                pop_and
                push
                load_var A
                push
                load_var B
                pop_compare ne
                pop_and
            ";
        }

        fn test_relations_do_not_chain() {
            let source = "a < b < c";
            let expected_error = "6..7: expected token Eof, but got Less";
        }

        fn test_missing_right_operand() {
            let source = "a & ";
            let expected_error = "4..4: expected one of [LParen, Ident, Number], but input ended";
        }

        fn test_t_is_reserved() {
            let source = "t = 1";
            let expected_error = "2..3: expected token Eof, but got Eq";
        }
    );

    listing_tests!(
        use condition, m68k, declared ["x"];

        fn test_m68k_relation() {
            let source = "x > 0";
            let listing_ok = "
                MOVE V_X(PC),D0
                MOVE D0,-(SP)
                MOVE #0,D0
                CMP (SP)+,D0
                SLT D0
                EXT D0
            ";
        }
    );
}
