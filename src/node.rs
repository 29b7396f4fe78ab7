use ptree::TreeItem;
use std::borrow::Cow;
use std::io;

/// An element of the abstract syntax tree produced by a parse.
///
/// Nodes are immutable once built: a [`Terminal`](Node::Terminal) carries
/// the matched text, a [`NonTerminal`](Node::NonTerminal) carries an
/// ordered list of children under a rule name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Node {
    Terminal { text: String },
    NonTerminal { name: &'static str, children: Vec<Node> },
}

impl Node {
    pub fn terminal(text: impl Into<String>) -> Self {
        Node::Terminal { text: text.into() }
    }

    pub fn non_terminal(name: &'static str, children: Vec<Node>) -> Self {
        Node::NonTerminal { name, children }
    }

    /// Render as `name { child, child, ... }` for non-terminals, or the raw
    /// text for terminals. Consumer-facing format, not meant to be parsed.
    pub fn format_tree(&self) -> String {
        match self {
            Node::Terminal { text } => text.clone(),
            Node::NonTerminal { name, children } => {
                let inner = children
                    .iter()
                    .map(Node::format_tree)
                    .collect::<Vec<_>>()
                    .join(", ");
                format!("{} {{ {} }}", name, inner)
            }
        }
    }

    /// Pretty-print the node tree, one node per line, via `ptree`.
    pub fn print_tree(&self) -> io::Result<()> {
        ptree::print_tree(self)
    }
}

impl TreeItem for Node {
    type Child = Node;

    fn write_self<W: io::Write>(&self, f: &mut W, style: &ptree::Style) -> io::Result<()> {
        match self {
            Node::Terminal { text } => write!(f, "{}", style.paint(text)),
            Node::NonTerminal { name, .. } => write!(f, "{}", style.paint(name)),
        }
    }

    fn children(&self) -> Cow<[Self::Child]> {
        match self {
            Node::Terminal { .. } => Cow::Borrowed(&[]),
            Node::NonTerminal { children, .. } => Cow::Borrowed(children),
        }
    }
}

/// Concatenate the `nodes` of a list of results, preserving order.
pub fn results_nodes<'a, I: IntoIterator<Item = &'a [Node]>>(lists: I) -> Vec<Node> {
    lists.into_iter().flat_map(|n| n.iter().cloned()).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn results_nodes_concatenates_in_order() {
        let first = vec![Node::terminal("a"), Node::terminal("b")];
        let second = vec![Node::terminal("c")];
        let joined = results_nodes([first.as_slice(), second.as_slice()]);
        assert_eq!(
            joined,
            vec![Node::terminal("a"), Node::terminal("b"), Node::terminal("c")]
        );
    }

    #[test]
    fn results_nodes_of_no_lists_is_empty() {
        let empty: Vec<&[Node]> = Vec::new();
        assert!(results_nodes(empty).is_empty());
    }
}
