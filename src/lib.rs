/// The character source hands the lexer one character of lookahead.
pub mod source;

/// The lexer takes the source input, mapping it into a sequence of tokens.
pub mod lexer;

/// The compiler takes a sequence of tokens and, in a single pass, emits code
/// for them through the code generator.
pub mod compiler;

/// The code generator lowers target-independent operations into the text of a
/// given instruction set.
pub mod codegen;

pub mod symbols;
pub mod token;

pub mod util {
    pub mod intern;
    #[cfg(test)]
    pub(crate) mod test_utils;
}

pub use compiler::{
    compile, compile_block, compile_condition, compile_expr, compile_program, CompileError,
    CompileResult, Unit,
};
