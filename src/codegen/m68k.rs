//! Motorola 68000 pseudo-assembly.
//!
//! `D0` is the accumulator and `SP` the value stack. Variables live in the
//! program's data area and are addressed relative to the program counter.
//! Their symbols carry a `V_` prefix, so that no variable name can clash with
//! a generated label, the entry point or a register.

use std::{fmt, format_args as f};

use crate::codegen::{truth_word, Isa, Listing, Op, Relation};

pub struct M68k;

impl Isa for M68k {
    fn lower(op: &Op<'_>, out: &mut Listing) {
        match *op {
            Op::Header => out.line("WARMST EQU $A01E"),
            Op::Allocate { name, value } => out.line(f!("{}: DC {value}", Var(name))),
            Op::Prolog => out.label("MAIN"),
            Op::Epilog => {
                out.instr("DC WARMST");
                out.instr("END MAIN");
            }

            Op::Clear => out.instr("CLR D0"),
            Op::Negate => out.instr("NEG D0"),
            Op::Not => out.instr("NOT D0"),
            Op::LoadConst(n) => out.instr(f!("MOVE #{n},D0")),
            Op::LoadBool(true) => out.instr(f!("MOVE #{},D0", truth_word(true))),
            Op::LoadBool(false) => out.instr("CLR D0"),
            Op::LoadVar(name) => out.instr(f!("MOVE {}(PC),D0", Var(name))),
            Op::Store(name) => {
                out.instr(f!("LEA {}(PC),A0", Var(name)));
                out.instr("MOVE D0,(A0)");
            }

            Op::Push => out.instr("MOVE D0,-(SP)"),
            Op::Pop => out.instr("MOVE (SP)+,D0"),
            Op::Drop => out.instr("ADDQ #2,SP"),

            Op::PopAdd => out.instr("ADD (SP)+,D0"),
            // D0 holds the subtrahend, so the difference comes out negated.
            Op::PopSub => {
                out.instr("SUB (SP)+,D0");
                out.instr("NEG D0");
            }
            Op::PopMul => out.instr("MULS (SP)+,D0"),
            // DIVS wants a long dividend in the destination register.
            Op::PopDiv => {
                out.instr("MOVE (SP)+,D7");
                out.instr("EXT.L D7");
                out.instr("DIVS D0,D7");
                out.instr("MOVE D7,D0");
            }
            Op::PopAnd => out.instr("AND (SP)+,D0"),
            Op::PopOr => out.instr("OR (SP)+,D0"),
            // EOR only takes a data register as its source.
            Op::PopXor => {
                out.instr("MOVE (SP)+,D1");
                out.instr("EOR D1,D0");
            }
            Op::PopCompare(relation) => {
                out.instr("CMP (SP)+,D0");
                out.instr(f!("S{} D0", condition_code(relation)));
                out.instr("EXT D0");
            }

            Op::Decrement => out.instr("SUBQ #1,D0"),
            Op::Increment => out.instr("ADDQ #1,D0"),
            Op::CompareTop => out.instr("CMP (SP),D0"),

            Op::Branch(label) => out.instr(f!("BRA {label}")),
            Op::BranchIfFalse(label) => {
                out.instr("TST D0");
                out.instr(f!("BEQ {label}"));
            }
            Op::BranchIfGreater(label) => out.instr(f!("BGT {label}")),
            Op::DecrementAndBranch(label) => out.instr(f!("DBRA D0,{label}")),
            Op::PostLabel(label) => out.label(label),
        }
    }
}

/// The assembler symbol of a variable.
struct Var<'a>(&'a str);

impl fmt::Display for Var<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "V_{}", self.0)
    }
}

/// `CMP (SP)+,D0` sets the flags for `D0 - (SP)`, that is, right operand
/// minus left operand. Hence the ordering relations are mirrored.
fn condition_code(relation: Relation) -> &'static str {
    match relation {
        Relation::Eq => "EQ",
        Relation::NotEq => "NE",
        Relation::Less => "GT",
        Relation::LessEq => "GE",
        Relation::Greater => "LT",
        Relation::GreaterEq => "LE",
    }
}
