//! The abstract operation stream, written out by name.
//!
//! Useful to inspect what the front end asks for, independently of any
//! instruction set.

use std::fmt;

use crate::codegen::{Isa, Listing, Op, Relation};

pub struct Ops;

impl Isa for Ops {
    fn lower(op: &Op<'_>, out: &mut Listing) {
        match op {
            Op::PostLabel(label) => out.label(label),
            op => out.instr(op),
        }
    }
}

impl fmt::Display for Op<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Op::Header => f.write_str("header"),
            Op::Allocate { name, value } => write!(f, "allocate {name} {value}"),
            Op::Prolog => f.write_str("prolog"),
            Op::Epilog => f.write_str("epilog"),
            Op::Clear => f.write_str("clear"),
            Op::Negate => f.write_str("negate"),
            Op::Not => f.write_str("not"),
            Op::LoadConst(n) => write!(f, "load_const {n}"),
            Op::LoadBool(true) => f.write_str("load_true"),
            Op::LoadBool(false) => f.write_str("load_false"),
            Op::LoadVar(name) => write!(f, "load_var {name}"),
            Op::Store(name) => write!(f, "store {name}"),
            Op::Push => f.write_str("push"),
            Op::Pop => f.write_str("pop"),
            Op::Drop => f.write_str("drop"),
            Op::PopAdd => f.write_str("pop_add"),
            Op::PopSub => f.write_str("pop_sub"),
            Op::PopMul => f.write_str("pop_mul"),
            Op::PopDiv => f.write_str("pop_div"),
            Op::PopAnd => f.write_str("pop_and"),
            Op::PopOr => f.write_str("pop_or"),
            Op::PopXor => f.write_str("pop_xor"),
            Op::PopCompare(relation) => write!(f, "pop_compare {relation}"),
            Op::Decrement => f.write_str("decrement"),
            Op::Increment => f.write_str("increment"),
            Op::CompareTop => f.write_str("compare_top"),
            Op::Branch(label) => write!(f, "branch {label}"),
            Op::BranchIfFalse(label) => write!(f, "branch_if_false {label}"),
            Op::BranchIfGreater(label) => write!(f, "branch_if_greater {label}"),
            Op::DecrementAndBranch(label) => write!(f, "decrement_and_branch {label}"),
            Op::PostLabel(label) => write!(f, "{label}:"),
        }
    }
}

impl fmt::Display for Relation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Relation::Eq => "eq",
            Relation::NotEq => "ne",
            Relation::Less => "lt",
            Relation::LessEq => "le",
            Relation::Greater => "gt",
            Relation::GreaterEq => "ge",
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::codegen::{Generator, Labels};

    #[test]
    fn labels_stay_flush_left() {
        let mut labels = Labels::default();
        let l = labels.fresh();
        let mut g = Generator::<Ops>::new();
        g.generate(Op::PostLabel(l));
        g.generate(Op::PopCompare(Relation::LessEq));
        g.generate(Op::BranchIfFalse(l));
        g.generate(Op::Store("X"));
        assert_eq!(
            g.finish().to_string(),
            "L0:\n    pop_compare le\n    branch_if_false L0\n    store X\n"
        );
    }
}
