//! Code generation.
//!
//! The compiler never writes instruction text itself. It hands [`Op`]s to a
//! [`Generator`], which asks its [`Isa`] to lower them into a [`Listing`].
//! Retargeting the compiler means providing another [`Isa`].

use std::{fmt, marker::PhantomData};

pub mod interface;
pub mod m68k;
pub mod ops;

pub use interface::Target;

/// A target-independent instruction.
///
/// The code being generated is for a machine with one primary register (the
/// "accumulator") and a value stack. Binary operators find their left operand
/// on the stack and their right operand in the accumulator; `Pop*` operations
/// consume the stack slot and leave the result in the accumulator.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Op<'a> {
    /// Start of the program.
    Header,
    /// Storage for a variable, with its initial value.
    Allocate { name: &'a str, value: i64 },
    /// Entry point of the main program.
    Prolog,
    /// Return to the operating system.
    Epilog,

    /// Sets the accumulator to zero.
    Clear,
    /// Arithmetic negation of the accumulator.
    Negate,
    /// Bitwise (and thus boolean) complement of the accumulator.
    Not,
    LoadConst(i64),
    LoadBool(bool),
    LoadVar(&'a str),
    Store(&'a str),

    Push,
    /// Pops the top of the stack into the accumulator.
    Pop,
    /// Discards the top of the stack.
    Drop,

    PopAdd,
    PopSub,
    PopMul,
    PopDiv,
    PopAnd,
    PopOr,
    PopXor,
    /// Compares the popped left operand against the accumulator, leaving the
    /// truth value of the relation in the accumulator.
    PopCompare(Relation),

    Decrement,
    Increment,
    /// Compares the accumulator against the top of the stack, without popping.
    CompareTop,

    Branch(Label),
    BranchIfFalse(Label),
    /// Branches if the last [`Op::CompareTop`] found the accumulator greater.
    BranchIfGreater(Label),
    /// Decrements the accumulator and branches unless it ran out.
    DecrementAndBranch(Label),
    PostLabel(Label),
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Relation {
    Eq,
    NotEq,
    Less,
    LessEq,
    Greater,
    GreaterEq,
}

/// Returns the machine representation of a boolean.
///
/// True is all ones and false is all zeros, so that a bitwise complement is
/// also a boolean negation.
pub const fn truth_word(value: bool) -> i64 {
    if value {
        -1
    } else {
        0
    }
}

/// A branch target. Rendered as `L<n>`.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct Label(u32);

impl fmt::Display for Label {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "L{}", self.0)
    }
}

/// Hands out labels. Labels are never reused within a compilation.
#[derive(Debug, Default)]
pub struct Labels {
    next: u32,
}

impl Labels {
    pub fn fresh(&mut self) -> Label {
        let label = Label(self.next);
        self.next += 1;
        label
    }
}

const INDENT: &str = "    ";

/// The emitted instruction stream.
///
/// Labels are written flush left; everything else is indented.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Listing {
    lines: Vec<String>,
}

impl Listing {
    pub fn with_capacity(capacity: usize) -> Listing {
        Listing {
            lines: Vec::with_capacity(capacity),
        }
    }

    /// Writes an indented instruction.
    pub fn instr(&mut self, instr: impl fmt::Display) {
        self.lines.push(format!("{INDENT}{instr}"));
    }

    /// Writes a label line.
    pub fn label(&mut self, label: impl fmt::Display) {
        self.lines.push(format!("{label}:"));
    }

    /// Writes a line as is.
    pub fn line(&mut self, line: impl fmt::Display) {
        self.lines.push(line.to_string());
    }

    pub fn lines(&self) -> impl Iterator<Item = &str> {
        self.lines.iter().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.lines.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }
}

impl fmt::Display for Listing {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for line in &self.lines {
            writeln!(f, "{line}")?;
        }
        Ok(())
    }
}

/// An instruction set: the single place which knows target mnemonics.
pub trait Isa {
    fn lower(op: &Op<'_>, out: &mut Listing);
}

pub struct Generator<I> {
    listing: Listing,
    _isa: PhantomData<I>,
}

impl<I: Isa> Generator<I> {
    pub fn new() -> Generator<I> {
        Generator {
            listing: Listing::with_capacity(256),
            _isa: PhantomData,
        }
    }

    pub fn generate(&mut self, op: Op<'_>) {
        I::lower(&op, &mut self.listing);
    }

    pub fn finish(self) -> Listing {
        self.listing
    }
}

impl<I: Isa> Default for Generator<I> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn truth_words_are_complementary() {
        assert_eq!(!truth_word(true), truth_word(false));
        assert_eq!(!truth_word(false), truth_word(true));
    }

    #[test]
    fn labels_are_monotonic() {
        let mut labels = Labels::default();
        let rendered: Vec<_> = (0..3).map(|_| labels.fresh().to_string()).collect();
        assert_eq!(rendered, ["L0", "L1", "L2"]);
    }

    #[test]
    fn listing_layout() {
        let mut listing = Listing::default();
        listing.line("HEADER");
        listing.label(Label(7));
        listing.instr(format_args!("MOVE #{},D0", 3));
        assert_eq!(listing.len(), 3);
        assert_eq!(listing.to_string(), "HEADER\nL7:\n    MOVE #3,D0\n");
    }
}
