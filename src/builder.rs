use crate::expression::{ExprId, Expression, NodeMode, RuleData};
use crate::registry::Registry;
use std::cell::RefCell;
use std::collections::HashMap;

/// A mutator applied to a freshly interned [`Rule`](Expression::Rule)'s
/// [`NodeMode`]. Returned by [`Builder::drop_node`] / [`Builder::omit_node`]
/// and passed to [`Builder::rule`].
pub struct RuleOption(NodeMode);

/// Grammar factory: constructs [`Expression`]s into an arena and interns
/// named [`Rule`](Expression::Rule)s so that self- and mutually-recursive
/// grammars terminate.
///
/// A `Builder` is only ever used during grammar construction, inside the
/// closure passed to [`new_parser`](crate::new_parser); once that closure
/// returns, its arena is frozen into a [`Registry`] and the `Builder` itself
/// is discarded.
pub struct Builder {
    arena: RefCell<Vec<Expression>>,
    rules: RefCell<HashMap<&'static str, ExprId>>,
}

impl Builder {
    pub(crate) fn new() -> Self {
        Self {
            arena: RefCell::new(Vec::new()),
            rules: RefCell::new(HashMap::new()),
        }
    }

    pub(crate) fn freeze(self) -> Registry {
        Registry::new(self.arena.into_inner(), self.rules.into_inner())
    }

    fn push(&self, expr: Expression) -> ExprId {
        let mut arena = self.arena.borrow_mut();
        arena.push(expr);
        arena.len() - 1
    }

    fn fold(&self, mut exprs: Vec<ExprId>, kind: &str) -> ExprId {
        if exprs.is_empty() {
            panic!("{} must have at least one inner expression", kind);
        }
        if exprs.len() == 1 {
            exprs.pop().unwrap()
        } else {
            self.push(Expression::Sequence(exprs))
        }
    }

    // --- terminals -------------------------------------------------------

    pub fn empty(&self) -> ExprId {
        self.push(Expression::Empty)
    }

    pub fn end(&self) -> ExprId {
        self.push(Expression::End)
    }

    pub fn rune(&self, r: char) -> ExprId {
        self.push(Expression::Rune(r))
    }

    pub fn literal(&self, s: impl Into<String>) -> ExprId {
        self.push(Expression::Literal(s.into()))
    }

    pub fn range(&self, a: char, b: char) -> ExprId {
        self.push(Expression::Range(a, b))
    }

    pub fn any(&self) -> ExprId {
        self.push(Expression::Any)
    }

    pub fn any_of(&self, chars: &str) -> ExprId {
        if chars.is_empty() {
            panic!("AnyOf must have at least one character");
        }
        self.push(Expression::AnyOf(chars.chars().collect()))
    }

    // --- combinators -------------------------------------------------------

    pub fn sequence(&self, exprs: Vec<ExprId>) -> ExprId {
        if exprs.is_empty() {
            panic!("Sequence must have at least one inner expression");
        }
        self.push(Expression::Sequence(exprs))
    }

    pub fn choice(&self, exprs: Vec<ExprId>) -> ExprId {
        if exprs.is_empty() {
            panic!("Choice must have at least one inner expression");
        }
        self.push(Expression::Choice(exprs))
    }

    pub fn zero_or_more(&self, exprs: Vec<ExprId>) -> ExprId {
        let inner = self.fold(exprs, "ZeroOrMore");
        self.push(Expression::ZeroOrMore(inner))
    }

    pub fn one_or_more(&self, exprs: Vec<ExprId>) -> ExprId {
        let inner = self.fold(exprs, "OneOrMore");
        self.push(Expression::OneOrMore(inner))
    }

    pub fn optional(&self, exprs: Vec<ExprId>) -> ExprId {
        let inner = self.fold(exprs, "Optional");
        self.push(Expression::Optional(inner))
    }

    pub fn test(&self, exprs: Vec<ExprId>) -> ExprId {
        let inner = self.fold(exprs, "Test");
        self.push(Expression::Test(inner))
    }

    pub fn test_not(&self, exprs: Vec<ExprId>) -> ExprId {
        let inner = self.fold(exprs, "TestNot");
        self.push(Expression::TestNot(inner))
    }

    // --- rules -------------------------------------------------------

    pub fn drop_node(&self) -> RuleOption {
        RuleOption(NodeMode::Drop)
    }

    pub fn omit_node(&self) -> RuleOption {
        RuleOption(NodeMode::Omit)
    }

    /// Construct or return the interned `Rule` named `name`.
    ///
    /// `name` is the construction-site key: the first
    /// call for a given name creates an empty `Rule`, interns it, then runs
    /// `factory` — which may itself call `rule(name, ...)` again and get
    /// the still-empty `Rule` back, breaking what would otherwise be
    /// infinite recursion through the grammar definition. Every later call
    /// for the same name returns the already-built `Rule` without invoking
    /// `factory` again.
    pub fn rule(
        &self,
        name: &'static str,
        factory: impl FnOnce(&Builder) -> ExprId,
    ) -> ExprId {
        self.rule_with(name, &[], factory)
    }

    pub fn rule_with(
        &self,
        name: &'static str,
        options: &[RuleOption],
        factory: impl FnOnce(&Builder) -> ExprId,
    ) -> ExprId {
        if let Some(&id) = self.rules.borrow().get(name) {
            return id;
        }

        // If both are passed, drop wins over omit; a well-formed grammar
        // only ever passes one.
        let mode = if options.iter().any(|o| o.0 == NodeMode::Drop) {
            NodeMode::Drop
        } else if options.iter().any(|o| o.0 == NodeMode::Omit) {
            NodeMode::Omit
        } else {
            NodeMode::Keep
        };
        let id = self.push(Expression::Rule(RuleData::new(name, mode)));
        self.rules.borrow_mut().insert(name, id);

        let inner = factory(self);

        match &self.arena.borrow()[id] {
            Expression::Rule(data) => data
                .inner
                .set(inner)
                .unwrap_or_else(|_| panic!("rule \"{}\" was assigned an inner expression twice", name)),
            _ => unreachable!(),
        }

        id
    }
}
