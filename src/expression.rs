use once_cell::unsync::OnceCell;

/// Index of an [`Expression`] inside a [`Registry`](crate::Registry)'s arena.
///
/// Expressions reference their inner expressions by `ExprId` rather than by
/// pointer so that a `Rule` can legally reference itself or a sibling rule
/// defined later — the graph is cyclic, but the arena that owns it is not.
pub type ExprId = usize;

/// How a [`Rule`](Expression::Rule)'s match result contributes to the AST of
/// its enclosing rule.
///
/// Replaces a pair of independent `drop_node`/`omit_node` booleans: the two
/// options are mutually exclusive, so a two-variant-plus-default enum rules
/// out the meaningless "both at once" state a pair of booleans would allow.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum NodeMode {
    /// Wrap the inner nodes in one `NonTerminal(name, inner.nodes)`.
    #[default]
    Keep,
    /// Pass the inner nodes through unwrapped.
    Omit,
    /// Contribute no nodes at all.
    Drop,
}

/// State backing a named [`Rule`](Expression::Rule): its node-construction
/// mode and its lazily-assigned inner expression.
///
/// `inner` starts empty the moment the rule is interned in the registry and
/// is filled once the rule's factory closure finishes running — this is the
/// "insert-empty-then-fill" step that lets the factory's right-hand side
/// mention the rule currently being built.
pub struct RuleData {
    pub name: &'static str,
    pub mode: NodeMode,
    pub inner: OnceCell<ExprId>,
}

impl RuleData {
    pub fn new(name: &'static str, mode: NodeMode) -> Self {
        Self {
            name,
            mode,
            inner: OnceCell::new(),
        }
    }

    pub fn inner(&self) -> ExprId {
        *self
            .inner
            .get()
            .unwrap_or_else(|| panic!("rule \"{}\" was never assigned an inner expression", self.name))
    }
}

/// One node of the expression algebra.
///
/// Modeled as a single tagged enum rather than a trait-object hierarchy: the
/// set of kinds is closed, dispatch stays in one exhaustive `match`, and
/// adding a new kind is a compile error everywhere it isn't handled yet.
pub enum Expression {
    Empty,
    End,
    Rune(char),
    Literal(String),
    Range(char, char),
    Any,
    AnyOf(Vec<char>),
    Sequence(Vec<ExprId>),
    Choice(Vec<ExprId>),
    ZeroOrMore(ExprId),
    OneOrMore(ExprId),
    Optional(ExprId),
    Test(ExprId),
    TestNot(ExprId),
    Rule(RuleData),
}

impl Expression {
    /// Stable kind name, e.g. `"Rune"`, `"Sequence"`, `"Rule"`.
    pub fn kind_name(&self) -> &'static str {
        match self {
            Expression::Empty => "Empty",
            Expression::End => "End",
            Expression::Rune(_) => "Rune",
            Expression::Literal(_) => "Literal",
            Expression::Range(_, _) => "Range",
            Expression::Any => "Any",
            Expression::AnyOf(_) => "AnyOf",
            Expression::Sequence(_) => "Sequence",
            Expression::Choice(_) => "Choice",
            Expression::ZeroOrMore(_) => "ZeroOrMore",
            Expression::OneOrMore(_) => "OneOrMore",
            Expression::Optional(_) => "Optional",
            Expression::Test(_) => "Test",
            Expression::TestNot(_) => "TestNot",
            Expression::Rule(_) => "Rule",
        }
    }
}
