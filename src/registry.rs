use crate::expression::{ExprId, Expression};
use std::collections::HashMap;

/// Frozen grammar: the expression arena plus the name-keyed map of rules
/// interned into it during construction.
///
/// Built once by a [`Builder`](crate::Builder) and then owned read-only by
/// a [`Parser`](crate::Parser) for the lifetime of every parse it runs —
/// mirrors `lang_pt`'s `Concat`/`Union` symbol lists, which are likewise
/// assigned once during grammar assembly and only ever read during
/// matching.
pub struct Registry {
    arena: Vec<Expression>,
    rules: HashMap<&'static str, ExprId>,
}

impl Registry {
    pub(crate) fn new(arena: Vec<Expression>, rules: HashMap<&'static str, ExprId>) -> Self {
        Self { arena, rules }
    }

    pub fn get(&self, id: ExprId) -> &Expression {
        &self.arena[id]
    }

    /// Number of distinct `Rule`s interned during construction.
    pub fn rule_count(&self) -> usize {
        self.rules.len()
    }

    pub fn kind_name(&self, id: ExprId) -> &'static str {
        self.get(id).kind_name()
    }

    /// Human-readable, PEG-like description of what `id` expects.
    pub fn expectation(&self, id: ExprId) -> String {
        match self.get(id) {
            Expression::Empty => "EMPTY".to_string(),
            Expression::End => "END".to_string(),
            Expression::Rune(c) => format!("'{}'", c),
            Expression::Literal(s) => format!("'{}'", s),
            Expression::Range(a, b) => format!("[{}-{}]", a, b),
            Expression::Any => ".".to_string(),
            Expression::AnyOf(chars) => {
                format!("[{}]", chars.iter().collect::<String>())
            }
            Expression::Sequence(ids) => ids
                .iter()
                .map(|&i| self.expectation(i))
                .collect::<Vec<_>>()
                .join(" "),
            Expression::Choice(ids) => ids
                .iter()
                .map(|&i| self.expectation(i))
                .collect::<Vec<_>>()
                .join("/"),
            Expression::ZeroOrMore(inner) => format!("{}*", self.parenthesized(*inner)),
            Expression::OneOrMore(inner) => format!("{}+", self.parenthesized(*inner)),
            Expression::Optional(inner) => format!("{}?", self.parenthesized(*inner)),
            Expression::Test(inner) => format!("&{}", self.parenthesized(*inner)),
            Expression::TestNot(inner) => format!("!{}", self.parenthesized(*inner)),
            Expression::Rule(data) => data.name.to_string(),
        }
    }

    fn parenthesized(&self, id: ExprId) -> String {
        let needs_parens = matches!(
            self.get(id),
            Expression::Sequence(ids) | Expression::Choice(ids) if ids.len() > 1
        );
        if needs_parens {
            format!("({})", self.expectation(id))
        } else {
            self.expectation(id)
        }
    }
}
