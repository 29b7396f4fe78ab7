use crate::buffer::Buffer;
use crate::expression::{ExprId, Expression};
use crate::node::Node;
use crate::registry::Registry;
use std::cell::RefCell;
use std::rc::{Rc, Weak};

/// The outcome of applying one [`Expression`] at one position.
///
/// Carries enough of the match to answer every diagnostic query in
/// [`MatchResult`]'s own methods without re-walking the grammar: the
/// expression it came from (via `registry` + `expr`), the span it covers,
/// every sub-result that was attempted along the way, and the AST nodes, if
/// any, it contributed.
pub struct MatchResult {
    registry: Rc<Registry>,
    expr: ExprId,
    success: bool,
    buffer: Rc<dyn Buffer>,
    start: usize,
    end: usize,
    children: Vec<Rc<MatchResult>>,
    nodes: Vec<Node>,
    parent: RefCell<Weak<MatchResult>>,
}

impl MatchResult {
    fn build(
        registry: &Rc<Registry>,
        buffer: &Rc<dyn Buffer>,
        expr: ExprId,
        success: bool,
        start: usize,
        end: usize,
        children: Vec<Rc<MatchResult>>,
        nodes: Vec<Node>,
    ) -> Rc<MatchResult> {
        let result = Rc::new(MatchResult {
            registry: registry.clone(),
            expr,
            success,
            buffer: buffer.clone(),
            start,
            end,
            children,
            nodes,
            parent: RefCell::new(Weak::new()),
        });
        for child in &result.children {
            *child.parent.borrow_mut() = Rc::downgrade(&result);
        }
        result
    }

    pub(crate) fn success(
        registry: &Rc<Registry>,
        buffer: &Rc<dyn Buffer>,
        expr: ExprId,
        start: usize,
        end: usize,
        children: Vec<Rc<MatchResult>>,
        nodes: Vec<Node>,
    ) -> Rc<MatchResult> {
        Self::build(registry, buffer, expr, true, start, end, children, nodes)
    }

    pub(crate) fn failure(
        registry: &Rc<Registry>,
        buffer: &Rc<dyn Buffer>,
        expr: ExprId,
        start: usize,
        end: usize,
        children: Vec<Rc<MatchResult>>,
    ) -> Rc<MatchResult> {
        Self::build(registry, buffer, expr, false, start, end, children, Vec::new())
    }

    pub fn expression(&self) -> &Expression {
        self.registry.get(self.expr)
    }

    pub fn success_flag(&self) -> bool {
        self.success
    }

    pub fn start(&self) -> usize {
        self.start
    }

    pub fn end(&self) -> usize {
        self.end
    }

    pub fn children(&self) -> &[Rc<MatchResult>] {
        &self.children
    }

    pub fn nodes(&self) -> &[Node] {
        &self.nodes
    }

    pub fn parent(&self) -> Option<Rc<MatchResult>> {
        self.parent.borrow().upgrade()
    }

    /// `buffer.substring(start, end)`.
    pub fn matched_text(&self) -> String {
        self.buffer.substring(self.start, self.end)
    }

    pub fn length(&self) -> usize {
        self.end - self.start
    }

    /// Distance to the root via `parent` links; the root has depth 0.
    pub fn depth(&self) -> usize {
        match self.parent() {
            Some(parent) => parent.depth() + 1,
            None => 0,
        }
    }

    /// Nearest ancestor (not including `self`) whose expression is a `Rule`.
    pub fn first_rule_ancestor(&self) -> Option<Rc<MatchResult>> {
        let mut current = self.parent();
        while let Some(node) = current {
            if matches!(node.expression(), Expression::Rule(_)) {
                return Some(node);
            }
            current = node.parent();
        }
        None
    }

    /// Post-order collection of results with no children: the leaves.
    ///
    /// Takes `self` by `Rc` (rather than `&self`) because the result itself
    /// may be a leaf, and the only way to hand a leaf back out as an
    /// `Rc<MatchResult>` is to already be holding one.
    pub fn childless_results(self: Rc<Self>) -> Vec<Rc<MatchResult>> {
        let mut out = Vec::new();
        collect_childless(&self, &mut out);
        out
    }

    /// [`childless_results`](Self::childless_results) filtered to failures.
    pub fn failed_childless_results(self: Rc<Self>) -> Vec<Rc<MatchResult>> {
        self.childless_results()
            .into_iter()
            .filter(|r| !r.success)
            .collect()
    }

    /// The result, reachable from `self`, at maximum depth such that it has
    /// no children or is itself failed; ties go to the first encountered in
    /// depth-first order.
    pub fn deepest_failed_result(self: Rc<Self>) -> Rc<MatchResult> {
        let mut best: Option<(usize, Rc<MatchResult>)> = None;
        collect_deepest(&self, 0, &mut best);
        best.expect("a result tree always contains itself").1
    }

    /// Among [`failed_childless_results`](Self::failed_childless_results),
    /// the one with the largest `start`; ties go to the first encountered.
    pub fn farthest_failed_result(self: Rc<Self>) -> Option<Rc<MatchResult>> {
        let mut best: Option<Rc<MatchResult>> = None;
        for candidate in self.failed_childless_results() {
            match &best {
                Some(current) if current.start >= candidate.start => {}
                _ => best = Some(candidate),
            }
        }
        best
    }

    /// Single-expectation diagnostic: uses the farthest failed leaf, or
    /// falls back to this result's own expectation if the tree has no
    /// failing leaf at all (e.g. a failing `End` with nothing underneath).
    pub fn error(self: Rc<Self>) -> String {
        match self.clone().farthest_failed_result() {
            Some(ffr) => ffr.single_expectation_message(),
            None => self.single_expectation_message(),
        }
    }

    fn single_expectation_message(&self) -> String {
        format!(
            "Invalid input '{}' at {}, expected {}",
            self.buffer.char_at(self.start),
            self.buffer.location(self.start),
            self.registry.expectation(self.expr)
        )
    }

    /// Diagnostic joining every expectation tied for the farthest failure.
    pub fn better_error(self: Rc<Self>) -> String {
        let Some(ffr) = self.clone().farthest_failed_result() else {
            return self.error();
        };
        let expectations: Vec<String> = self
            .failed_childless_results()
            .into_iter()
            .filter(|r| r.start == ffr.start)
            .map(|r| r.registry.expectation(r.expr))
            .collect();
        format!(
            "Invalid input '{}' at {}, expected {}",
            ffr.buffer.char_at(ffr.start),
            ffr.buffer.location(ffr.start),
            expectations.join(" or ")
        )
    }

    /// `  `-indented tree: rule name then `: matched '<text>'` or `: <error()>`.
    pub fn format_result_tree(self: Rc<Self>) -> String {
        let mut out = String::new();
        write_result_tree(&self, &mut out, 0);
        out
    }

    /// Joined `format_tree()` of every node this result (and its subtree)
    /// contributed, one per line.
    pub fn format_node_tree(&self) -> String {
        self.nodes
            .iter()
            .map(Node::format_tree)
            .collect::<Vec<_>>()
            .join("\n")
    }
}

fn write_result_tree(node: &Rc<MatchResult>, out: &mut String, depth: usize) {
    let indent = "  ".repeat(depth);
    let label = match node.expression() {
        Expression::Rule(data) => data.name,
        other => other.kind_name(),
    };
    if node.success {
        out.push_str(&format!("{}{}: matched '{}'\n", indent, label, node.matched_text()));
    } else {
        out.push_str(&format!("{}{}: {}\n", indent, label, node.clone().error()));
    }
    for child in &node.children {
        write_result_tree(child, out, depth + 1);
    }
}

fn collect_childless(node: &Rc<MatchResult>, out: &mut Vec<Rc<MatchResult>>) {
    if node.children.is_empty() {
        out.push(node.clone());
    } else {
        for child in &node.children {
            collect_childless(child, out);
        }
    }
}

fn collect_deepest(node: &Rc<MatchResult>, depth: usize, best: &mut Option<(usize, Rc<MatchResult>)>) {
    if node.children.is_empty() || !node.success {
        let better = match best {
            Some((best_depth, _)) => depth > *best_depth,
            None => true,
        };
        if better {
            *best = Some((depth, node.clone()));
        }
    }
    for child in &node.children {
        collect_deepest(child, depth + 1, best);
    }
}
