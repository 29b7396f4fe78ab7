//! Arithmetic expression grammar: `1+1`, `10*(2+1)`, `329842498274982`, ...
//!
//! `Operation = Sum End`, `Sum = Term (('+'|'-') Term)*`,
//! `Term = Factor (('*'|'/') Factor)*`, `Factor = Number | '(' Sum ')'`,
//! `Number = [0-9]+`.

use crate::{new_parser, Builder, ExprId, Parser};

fn number(b: &Builder) -> ExprId {
    b.rule("Number", |b| b.one_or_more(vec![b.range('0', '9')]))
}

fn factor(b: &Builder) -> ExprId {
    b.rule("Factor", |b| {
        let parenthesized = b.sequence(vec![b.rune('('), sum(b), b.rune(')')]);
        b.choice(vec![number(b), parenthesized])
    })
}

fn term(b: &Builder) -> ExprId {
    b.rule("Term", |b| {
        b.sequence(vec![
            factor(b),
            b.zero_or_more(vec![b.any_of("*/"), factor(b)]),
        ])
    })
}

fn sum(b: &Builder) -> ExprId {
    b.rule("Sum", |b| {
        b.sequence(vec![
            term(b),
            b.zero_or_more(vec![b.any_of("+-"), term(b)]),
        ])
    })
}

fn operation(b: &Builder) -> ExprId {
    b.rule("Operation", |b| b.sequence(vec![sum(b), b.end()]))
}

/// Build a fresh calculator parser.
pub fn calculator() -> Parser {
    new_parser("Operation", operation)
}
