use criterion::{criterion_group, criterion_main, Criterion};
use std::{collections::HashSet, hint::black_box};
use tiny::{
    lexer::{extract, Lexer},
    token::TokenKind,
};

static PROGRAM: &str = include_str!("../../samples/big.tiny");

/// The distinct variable names of a source, in canonical form.
fn names(input: &str) -> HashSet<String> {
    Lexer::new(input)
        .filter(|token| token.kind == TokenKind::Ident)
        .map(|token| extract::ident(token, input))
        .collect()
}

/// A long, operator-dense condition, exercising the two-character operators.
fn relations(n: usize) -> String {
    let mut src = String::with_capacity(n * 24);
    for i in 0..n {
        if i > 0 {
            src.push_str(" | ");
        }
        src.push_str("a<=b & -(c*2)<>d & e>=10");
    }
    src
}

fn criterion_benchmark(c: &mut Criterion) {
    c.bench_function("lexer_names", |b| b.iter(|| names(black_box(PROGRAM))));

    let dense = relations(1000);
    c.bench_function("lexer_operators", |b| {
        b.iter(|| Lexer::new(black_box(dense.as_str())).filter(|t| t.kind != TokenKind::Ident).count());
    });
}

criterion_group!(benches, criterion_benchmark);
criterion_main!(benches);
