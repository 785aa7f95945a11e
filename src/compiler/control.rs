//! Statements and control constructs.
//!
//! ```text
//! block      := {statement}
//! statement  := if | while | loop | repeat | for | do | assignment
//! if         := IF bool_expression [THEN] block [ELSE block] ENDIF
//! while      := WHILE bool_expression block ENDWHILE
//! loop       := LOOP block ENDLOOP
//! repeat     := REPEAT block UNTIL bool_expression
//! for        := FOR name '=' expression TO expression block ENDFOR
//! do         := DO expression block ENDDO
//! assignment := name '=' bool_expression
//! ```
//!
//! A block runs until one of the keywords closing a construct (or the end of
//! input), which is left for the enclosing construct to consume.

use crate::{
    codegen::{Isa, Op},
    token::TokenKind,
};

use super::{Compiler, Result, VarOp};

impl<I: Isa> Compiler<'_, I> {
    pub(super) fn block(&mut self) -> Result<()> {
        while !self.peek().kind.is_block_terminator() {
            match self.peek().kind {
                TokenKind::If => self.do_if()?,
                TokenKind::While => self.do_while()?,
                TokenKind::Loop => self.do_loop()?,
                TokenKind::Repeat => self.do_repeat()?,
                TokenKind::For => self.do_for()?,
                TokenKind::Do => self.do_do()?,
                _ => self.assignment()?,
            }
        }
        Ok(())
    }

    fn assignment(&mut self) -> Result<()> {
        let name = self.declared_name()?;
        self.consume(TokenKind::Eq)?;
        self.bool_expression()?;
        self.emit_var(VarOp::Store, name);
        Ok(())
    }

    fn do_if(&mut self) -> Result<()> {
        self.consume(TokenKind::If)?;
        self.bool_expression()?;
        let otherwise = self.labels.fresh();
        let mut end = otherwise;
        self.emit(Op::BranchIfFalse(otherwise));
        self.take(TokenKind::Then);
        self.block()?;
        if self.take(TokenKind::Else) {
            end = self.labels.fresh();
            self.emit(Op::Branch(end));
            self.emit(Op::PostLabel(otherwise));
            self.block()?;
        }
        self.consume(TokenKind::EndIf)?;
        self.emit(Op::PostLabel(end));
        Ok(())
    }

    fn do_while(&mut self) -> Result<()> {
        self.consume(TokenKind::While)?;
        let top = self.labels.fresh();
        let exit = self.labels.fresh();
        self.emit(Op::PostLabel(top));
        self.bool_expression()?;
        self.emit(Op::BranchIfFalse(exit));
        self.block()?;
        self.consume(TokenKind::EndWhile)?;
        self.emit(Op::Branch(top));
        self.emit(Op::PostLabel(exit));
        Ok(())
    }

    fn do_loop(&mut self) -> Result<()> {
        self.consume(TokenKind::Loop)?;
        let top = self.labels.fresh();
        self.emit(Op::PostLabel(top));
        self.block()?;
        self.consume(TokenKind::EndLoop)?;
        self.emit(Op::Branch(top));
        Ok(())
    }

    fn do_repeat(&mut self) -> Result<()> {
        self.consume(TokenKind::Repeat)?;
        let top = self.labels.fresh();
        self.emit(Op::PostLabel(top));
        self.block()?;
        self.consume(TokenKind::Until)?;
        self.bool_expression()?;
        self.emit(Op::BranchIfFalse(top));
        Ok(())
    }

    /// The counter is stored one below its initial value and incremented at
    /// the top of each iteration, with the upper bound kept on the stack.
    fn do_for(&mut self) -> Result<()> {
        self.consume(TokenKind::For)?;
        let counter = self.declared_name()?;
        self.consume(TokenKind::Eq)?;
        self.expression()?;
        self.emit(Op::Decrement);
        self.emit_var(VarOp::Store, counter);
        self.consume(TokenKind::To)?;
        self.expression()?;
        self.emit(Op::Push);

        let top = self.labels.fresh();
        let exit = self.labels.fresh();
        self.emit(Op::PostLabel(top));
        self.emit_var(VarOp::Load, counter);
        self.emit(Op::Increment);
        self.emit_var(VarOp::Store, counter);
        self.emit(Op::CompareTop);
        self.emit(Op::BranchIfGreater(exit));
        self.block()?;
        self.consume(TokenKind::EndFor)?;
        self.emit(Op::Branch(top));
        self.emit(Op::PostLabel(exit));
        self.emit(Op::Drop);
        Ok(())
    }

    /// Runs the block a fixed number of times, keeping the remaining count on
    /// the stack while the block runs.
    fn do_do(&mut self) -> Result<()> {
        self.consume(TokenKind::Do)?;
        self.expression()?;
        self.emit(Op::Decrement);
        let top = self.labels.fresh();
        self.emit(Op::PostLabel(top));
        self.emit(Op::Push);
        self.block()?;
        self.consume(TokenKind::EndDo)?;
        self.emit(Op::Pop);
        self.emit(Op::DecrementAndBranch(top));
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use crate::{codegen::Target, compiler::compile_block, util::test_utils::listing_tests};
    use pretty_assertions::assert_eq;

    fn posted_labels(src: &str) -> Vec<String> {
        compile_block(src, Target::ops, &["a", "b", "x", "y"])
            .unwrap()
            .lines()
            .filter(|line| line.ends_with(':'))
            .map(str::to_owned)
            .collect()
    }

    #[test]
    fn if_posts_one_label_per_branch() {
        assert_eq!(posted_labels("IF a x=1 ENDIF"), ["L0:"]);
        assert_eq!(posted_labels("IF a x=1 ELSE y=2 ENDIF"), ["L0:", "L1:"]);
    }

    #[test]
    fn labels_are_never_reused() {
        let labels = posted_labels("WHILE a LOOP x=1 ENDLOOP ENDWHILE REPEAT y=2 UNTIL b");
        assert_eq!(labels, ["L0:", "L2:", "L1:", "L3:"]);
    }

    listing_tests!(
        use block, ops, declared ["a", "b", "i", "n", "x", "y"];

        fn test_empty_block() {
            let source = "";
            let listing_ok = "";
        }

        fn test_assignment() {
            let source = "x = a & b";
            let listing_ok = "
                load_var A
                push
                load_var B
                pop_and
                store X
            ";
        }

        fn test_if_else() {
            let source = "IF a=b THEN x=1 ELSE y=2 ENDIF";
            let listing_ok = "
                load_var A
                push
                load_var B
                pop_compare eq
                branch_if_false L0
                load_const 1
                store X
                branch L1
                L0:
                load_const 2
                store Y
                L1:
            ";
        }

        fn test_if_without_else() {
            let source = "IF a x=1 ENDIF";
            let listing_ok = "
                load_var A
                branch_if_false L0
                load_const 1
                store X
                L0:
            ";
        }

        fn test_while() {
            let source = "WHILE a < 10 a = a + 1 ENDWHILE";
            let listing_ok = "
                L0:
                load_var A
                push
                load_const 10
                pop_compare lt
                branch_if_false L1
                load_var A
                push
                load_const 1
                pop_add
                store A
                branch L0
                L1:
            ";
        }

        fn test_loop() {
            let source = "LOOP x = x ENDLOOP";
            let listing_ok = "
                L0:
                load_var X
                store X
                branch L0
            ";
        }

        fn test_repeat() {
            let source = "REPEAT x = 1 UNTIL T";
            let listing_ok = "
                L0:
                load_const 1
                store X
                load_true
                branch_if_false L0
            ";
        }

        fn test_for() {
            let source = "FOR i = 1 TO n x = i ENDFOR";
            let listing_ok = "
                load_const 1
                decrement
                store I
                load_var N
                push
                L0:
                load_var I
                increment
                store I
                compare_top
                branch_if_greater L1
                load_var I
                store X
                branch L0
                L1:
                drop
            ";
        }

        fn test_do() {
            let source = "DO 3 x = x + 1 ENDDO";
            let listing_ok = "
                load_const 3
                decrement
                L0:
                push
                load_var X
                push
                load_const 1
                pop_add
                store X
                pop
                decrement_and_branch L0
            ";
        }

        fn test_nested_if_in_while() {
            let source = "WHILE a IF b x=1 ENDIF ENDWHILE";
            let listing_ok = "
                L0:
                load_var A
                branch_if_false L1
                load_var B
                branch_if_false L2
                load_const 1
                store X
                L2:
                branch L0
                L1:
            ";
        }

        fn test_undeclared_target() {
            let source = "z = 1";
            let expected_error = "0..1: undefined identifier Z";
        }

        fn test_undeclared_counter() {
            let source = "FOR k = 1 TO 2 ENDFOR";
            let expected_error = "4..5: undefined identifier K";
        }

        fn test_missing_assignment_operator() {
            let source = "x 1";
            let expected_error = "2..3: expected token Eq, but got Number";
        }

        fn test_mismatched_terminator() {
            let source = "WHILE a x=1 ENDIF";
            let expected_error = "12..17: expected token EndWhile, but got EndIf";
        }

        fn test_unterminated_loop() {
            let source = "LOOP x=1";
            let expected_error = "8..8: expected token EndLoop, but input ended";
        }

        fn test_stray_terminator() {
            let source = "x=1 ENDDO";
            let expected_error = "4..9: expected token Eof, but got EndDo";
        }

        fn test_statement_cannot_start_with_number() {
            let source = "1 = x";
            let expected_error = "0..1: expected token Ident, but got Number";
        }
    );
}
