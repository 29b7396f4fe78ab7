//! Boolean expression grammar: `T`, `T|F`, `T&F|T`, with optional whitespace
//! around operators. Demonstrates `drop_node()` on a whitespace rule so
//! `Space` never shows up in the produced AST.

use crate::{new_parser, Builder, ExprId, Parser};

fn space(b: &Builder) -> ExprId {
    b.rule_with("Space", &[b.drop_node()], |b| {
        b.one_or_more(vec![b.any_of(" \t\n")])
    })
}

fn value(b: &Builder) -> ExprId {
    b.rule("Value", |b| {
        b.sequence(vec![
            b.choice(vec![b.rune('T'), b.rune('F')]),
            b.optional(vec![space(b)]),
        ])
    })
}

fn conjunction(b: &Builder) -> ExprId {
    b.rule("Conjunction", |b| {
        b.sequence(vec![
            value(b),
            b.zero_or_more(vec![b.rune('&'), b.optional(vec![space(b)]), value(b)]),
        ])
    })
}

fn disjunction(b: &Builder) -> ExprId {
    b.rule("Disjunction", |b| {
        b.sequence(vec![
            conjunction(b),
            b.zero_or_more(vec![
                b.rune('|'),
                b.optional(vec![space(b)]),
                conjunction(b),
            ]),
        ])
    })
}

fn boolean_expression(b: &Builder) -> ExprId {
    b.rule("BooleanExpression", |b| {
        b.sequence(vec![disjunction(b), b.end()])
    })
}

/// Build a fresh boolean-logic parser.
pub fn boolean_logic() -> Parser {
    new_parser("BooleanExpression", boolean_expression)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn recognizes_boolean_expressions() {
        let parser = boolean_logic();
        assert!(parser.recognize("T"));
        assert!(parser.recognize("T|F"));
        assert!(parser.recognize("T & F | T"));
        assert!(!parser.recognize("T|"));
        assert!(!parser.recognize(""));
        assert!(!parser.recognize("X"));
    }

    #[test]
    fn dropped_space_rule_contributes_no_nodes() {
        let parser = boolean_logic();
        let result = parser.parse("T & F");
        assert!(result.success_flag());
        let tree = result.format_node_tree();
        assert!(!tree.contains("Space"));
    }
}
