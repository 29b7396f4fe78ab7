use crate::builder::Builder;
use crate::buffer::{Buffer, Code};
use crate::expression::{ExprId, Expression, NodeMode};
use crate::log::{Log, StandardLog};
use crate::node::{results_nodes, Node};
use crate::registry::Registry;
use crate::result::MatchResult;
use std::cell::{Cell, RefCell};
use std::rc::Rc;

/// Owns a grammar's registry and root expression and applies it to input.
///
/// Construction runs the grammar factory once, up front; every later
/// `recognize`/`parse` call just walks the already-frozen [`Registry`].
pub struct Parser {
    name: &'static str,
    registry: Rc<Registry>,
    root: ExprId,
    debug: Cell<bool>,
    log: RefCell<Rc<dyn Log>>,
}

/// Build a `Parser` from a grammar factory.
///
/// `name` identifies the parser for debug output; it plays the same role
/// for the parser as the construction-site key plays for each `Rule` — an
/// explicit string rather than caller introspection, since Rust has no
/// stable way to observe a closure's call site.
pub fn new_parser(name: &'static str, root_factory: impl FnOnce(&Builder) -> ExprId) -> Parser {
    let builder = Builder::new();
    let root = root_factory(&builder);
    let registry = Rc::new(builder.freeze());
    Parser {
        name,
        registry,
        root,
        debug: Cell::new(false),
        log: RefCell::new(Rc::new(StandardLog)),
    }
}

impl Parser {
    pub fn name(&self) -> &'static str {
        self.name
    }

    pub fn set_debug(&self, debug: bool) {
        self.debug.set(debug);
    }

    pub fn set_log(&self, log: Rc<dyn Log>) {
        *self.log.borrow_mut() = log;
    }

    /// Number of distinct `Rule`s interned while building this parser's
    /// grammar. Mostly useful in tests of mutually-recursive grammars.
    pub fn rule_count(&self) -> usize {
        self.registry.rule_count()
    }

    pub fn recognize(&self, input: &str) -> bool {
        self.parse(input).success_flag()
    }

    pub fn parse(&self, input: &str) -> Rc<MatchResult> {
        let buffer: Rc<dyn Buffer> = Rc::new(Code::new(input));
        let log = self.log.borrow();
        apply(&self.registry, &buffer, self.root, 0, self.debug.get(), log.as_ref())
    }
}

fn apply(
    registry: &Rc<Registry>,
    buffer: &Rc<dyn Buffer>,
    expr: ExprId,
    start: usize,
    debug: bool,
    log: &dyn Log,
) -> Rc<MatchResult> {
    match registry.get(expr) {
        Expression::Empty => MatchResult::success(registry, buffer, expr, start, start, Vec::new(), Vec::new()),

        Expression::End => {
            if start >= buffer.length() {
                MatchResult::success(registry, buffer, expr, start, start, Vec::new(), Vec::new())
            } else {
                MatchResult::failure(registry, buffer, expr, start, start, Vec::new())
            }
        }

        Expression::Rune(r) => {
            if start < buffer.length() && buffer.char_at(start) == *r {
                let nodes = vec![Node::terminal(r.to_string())];
                MatchResult::success(registry, buffer, expr, start, start + 1, Vec::new(), nodes)
            } else {
                MatchResult::failure(registry, buffer, expr, start, start, Vec::new())
            }
        }

        Expression::Literal(s) => {
            let len = s.chars().count();
            if start + len <= buffer.length() && buffer.substring(start, start + len) == *s {
                let nodes = vec![Node::terminal(s.clone())];
                MatchResult::success(registry, buffer, expr, start, start + len, Vec::new(), nodes)
            } else {
                MatchResult::failure(registry, buffer, expr, start, start, Vec::new())
            }
        }

        Expression::Range(a, b) => {
            let c = buffer.char_at(start);
            if start < buffer.length() && *a <= c && c <= *b {
                let nodes = vec![Node::terminal(c.to_string())];
                MatchResult::success(registry, buffer, expr, start, start + 1, Vec::new(), nodes)
            } else {
                MatchResult::failure(registry, buffer, expr, start, start, Vec::new())
            }
        }

        Expression::Any => {
            if start < buffer.length() {
                let c = buffer.char_at(start);
                let nodes = vec![Node::terminal(c.to_string())];
                MatchResult::success(registry, buffer, expr, start, start + 1, Vec::new(), nodes)
            } else {
                MatchResult::failure(registry, buffer, expr, start, start, Vec::new())
            }
        }

        Expression::AnyOf(chars) => {
            let c = buffer.char_at(start);
            if start < buffer.length() && chars.contains(&c) {
                let nodes = vec![Node::terminal(c.to_string())];
                MatchResult::success(registry, buffer, expr, start, start + 1, Vec::new(), nodes)
            } else {
                MatchResult::failure(registry, buffer, expr, start, start, Vec::new())
            }
        }

        Expression::Sequence(ids) => {
            let mut pos = start;
            let mut children = Vec::with_capacity(ids.len());
            for &id in ids {
                let r = apply(registry, buffer, id, pos, debug, log);
                let ok = r.success_flag();
                let end = r.end();
                children.push(r);
                if !ok {
                    return MatchResult::failure(registry, buffer, expr, start, end, children);
                }
                pos = end;
            }
            let nodes = results_nodes(children.iter().map(|c| c.nodes()));
            MatchResult::success(registry, buffer, expr, start, pos, children, nodes)
        }

        Expression::Choice(ids) => {
            let mut children = Vec::with_capacity(ids.len());
            for &id in ids {
                let r = apply(registry, buffer, id, start, debug, log);
                if r.success_flag() {
                    let end = r.end();
                    let nodes = results_nodes([r.nodes()]);
                    children.push(r);
                    return MatchResult::success(registry, buffer, expr, start, end, children, nodes);
                }
                children.push(r);
            }
            let end = children.last().map(|c| c.end()).unwrap_or(start);
            MatchResult::failure(registry, buffer, expr, start, end, children)
        }

        Expression::ZeroOrMore(inner) => {
            let outcome = repeat(registry, buffer, *inner, start, debug, log);
            MatchResult::success(registry, buffer, expr, start, outcome.end, outcome.children, outcome.nodes)
        }

        Expression::OneOrMore(inner) => {
            let outcome = repeat(registry, buffer, *inner, start, debug, log);
            if outcome.count == 0 {
                let failure = outcome.last_failure.expect("zero iterations means the first probe failed");
                let end = failure.end();
                MatchResult::failure(registry, buffer, expr, start, end, vec![failure])
            } else {
                MatchResult::success(registry, buffer, expr, start, outcome.end, outcome.children, outcome.nodes)
            }
        }

        Expression::Optional(inner) => {
            let r = apply(registry, buffer, *inner, start, debug, log);
            if r.success_flag() {
                let end = r.end();
                let nodes = results_nodes([r.nodes()]);
                MatchResult::success(registry, buffer, expr, start, end, vec![r], nodes)
            } else {
                MatchResult::success(registry, buffer, expr, start, start, vec![r], Vec::new())
            }
        }

        Expression::Test(inner) => {
            let r = apply(registry, buffer, *inner, start, debug, log);
            if r.success_flag() {
                MatchResult::success(registry, buffer, expr, start, start, vec![r], Vec::new())
            } else {
                let end = r.end();
                MatchResult::failure(registry, buffer, expr, start, end, vec![r])
            }
        }

        Expression::TestNot(inner) => {
            let r = apply(registry, buffer, *inner, start, debug, log);
            if !r.success_flag() {
                MatchResult::success(registry, buffer, expr, start, start, vec![r], Vec::new())
            } else {
                let end = r.end();
                MatchResult::failure(registry, buffer, expr, start, end, vec![r])
            }
        }

        Expression::Rule(data) => {
            let name = data.name;
            let debug_ctx = if debug {
                Some((buffer.location(start), buffer.substring(0, buffer.length())))
            } else {
                None
            };
            if let Some((loc, input)) = &debug_ctx {
                log.debugf(&format!("Trying {:?} at {} of {:?}", name, loc, input));
            }

            let inner_id = data.inner();
            let inner_result = apply(registry, buffer, inner_id, start, debug, log);
            let result = if inner_result.success_flag() {
                let end = inner_result.end();
                let nodes = match data.mode {
                    NodeMode::Drop => Vec::new(),
                    NodeMode::Omit => results_nodes([inner_result.nodes()]),
                    NodeMode::Keep => {
                        vec![Node::non_terminal(name, results_nodes([inner_result.nodes()]))]
                    }
                };
                MatchResult::success(registry, buffer, expr, start, end, vec![inner_result], nodes)
            } else {
                let end = inner_result.end();
                MatchResult::failure(registry, buffer, expr, start, end, vec![inner_result])
            };

            if let Some((loc, input)) = &debug_ctx {
                if result.success_flag() {
                    log.debugf(&format!(
                        "Result of {:?} at {} of {:?}: succeed consuming {:?}",
                        name,
                        loc,
                        input,
                        result.matched_text()
                    ));
                } else {
                    log.debugf(&format!(
                        "Result of {:?} at {} of {:?}: failed to consume: {}",
                        name,
                        loc,
                        input,
                        registry.expectation(inner_id)
                    ));
                }
            }

            result
        }
    }
}

struct RepeatOutcome {
    children: Vec<Rc<MatchResult>>,
    nodes: Vec<Node>,
    end: usize,
    count: usize,
    last_failure: Option<Rc<MatchResult>>,
}

/// Shared iteration for `ZeroOrMore`/`OneOrMore`: applies `inner` repeatedly
/// until it fails, stopping early on a zero-width success so a nullable
/// inner expression can never loop forever.
fn repeat(
    registry: &Rc<Registry>,
    buffer: &Rc<dyn Buffer>,
    inner: ExprId,
    start: usize,
    debug: bool,
    log: &dyn Log,
) -> RepeatOutcome {
    let mut pos = start;
    let mut children = Vec::new();
    let mut nodes = Vec::new();
    let mut count = 0;
    let mut last_failure = None;
    loop {
        let r = apply(registry, buffer, inner, pos, debug, log);
        if !r.success_flag() {
            last_failure = Some(r);
            break;
        }
        let end = r.end();
        let zero_width = end == pos;
        nodes.extend(r.nodes().iter().cloned());
        children.push(r);
        count += 1;
        pos = end;
        if zero_width {
            break;
        }
    }
    RepeatOutcome {
        children,
        nodes,
        end: pos,
        count,
        last_failure,
    }
}
