use std::{
    error::Error,
    fs,
    io::{self, Read, Write},
    path::PathBuf,
    process::ExitCode,
};

use clap::Parser;
use tiny::{codegen, compiler, lexer::Lexer};

/// Compiles TINY source into pseudo-assembly.
#[derive(Parser)]
#[command(name = "tinyc", version)]
struct Args {
    /// Source file to compile. Reads standard input when omitted.
    file: Option<PathBuf>,

    /// Instruction set of the emitted listing.
    #[arg(long, value_enum, default_value_t = Target::m68k)]
    target: Target,

    /// What the input contains.
    #[arg(long, value_enum, default_value_t = Unit::program)]
    unit: Unit,

    /// Variables to declare before compiling a block, condition or
    /// expression.
    #[arg(long = "declare", short = 'd', value_name = "NAME")]
    declared: Vec<String>,

    /// Prints the tokens instead of compiling.
    #[arg(long)]
    tokens: bool,
}

#[allow(non_camel_case_types)]
#[derive(Copy, Clone, PartialEq, Eq, clap::ValueEnum)]
#[clap(rename_all = "snake_case")]
enum Target {
    m68k,
    ops,
}

impl From<Target> for codegen::Target {
    fn from(value: Target) -> Self {
        match value {
            Target::m68k => codegen::Target::m68k,
            Target::ops => codegen::Target::ops,
        }
    }
}

#[allow(non_camel_case_types)]
#[derive(Copy, Clone, PartialEq, Eq, clap::ValueEnum)]
#[clap(rename_all = "snake_case")]
enum Unit {
    program,
    block,
    condition,
    expr,
}

impl From<Unit> for compiler::Unit {
    fn from(value: Unit) -> Self {
        match value {
            Unit::program => compiler::Unit::Program,
            Unit::block => compiler::Unit::Block,
            Unit::condition => compiler::Unit::Condition,
            Unit::expr => compiler::Unit::Expr,
        }
    }
}

fn main() -> ExitCode {
    let args = Args::parse();
    match run(&args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(error) => {
            eprintln!("error: {error:#}");
            ExitCode::FAILURE
        }
    }
}

fn run(args: &Args) -> Result<(), Box<dyn Error>> {
    let input = match &args.file {
        Some(path) => fs::read_to_string(path)?,
        None => {
            let mut buf = String::new();
            io::stdin().read_to_string(&mut buf)?;
            buf
        }
    };

    let mut stdout = io::stdout().lock();
    if args.tokens {
        for token in Lexer::new(&input) {
            writeln!(stdout, "{token:?} {:?}", token.span().substr(&input))?;
        }
        return Ok(());
    }

    let declared: Vec<&str> = args.declared.iter().map(String::as_str).collect();
    let listing = compiler::compile(
        &input,
        args.target.into(),
        &declared,
        args.unit.into(),
    )?;
    write!(stdout, "{listing}")?;
    Ok(())
}
