//! `peggy` is a library for describing formal grammars as composable
//! parsing expressions and applying them to text to get back (a) a boolean
//! recognition result, (b) a detailed result tree annotated with source
//! positions, and (c) an optional abstract syntax tree of typed nodes.
//!
//! # Overview
//!
//! Grammars are Parsing Expression Grammars (PEG): ordered-choice,
//! deterministic, with no backtracking past a choice that already
//! committed. A grammar is built once, through a [`Builder`], by composing
//! [terminal matchers](Builder::rune) and [combinators](Builder::sequence)
//! into named, possibly self- or mutually-recursive [`Rule`](Expression::Rule)s,
//! then wrapped in a [`Parser`] via [`new_parser`].
//!
//! # Design
//!
//! Every expression kind — `Empty`, `End`, `Rune`, `Literal`, `Range`,
//! `Any`, `AnyOf`, `Sequence`, `Choice`, `ZeroOrMore`, `OneOrMore`,
//! `Optional`, `Test`, `TestNot`, and the named `Rule` wrapper — is one
//! variant of a single tagged [`Expression`] enum, stored in a [`Registry`]
//! arena and referenced by index rather than by pointer. This is what lets
//! a grammar be cyclic (a rule legally refers to itself or a sibling rule
//! defined after it) without the arena itself containing a reference cycle.
//!
//! Applying a rule to input produces a [`MatchResult`]: a span, the list of
//! sub-results that were attempted along the way, and any AST [`Node`]s it
//! contributed. Consumers interrogate a `MatchResult` tree after the fact —
//! to get the matched text, to find the deepest or farthest-reaching
//! failure, or to render a human-readable diagnostic — rather than the
//! engine raising exceptions on parse failure.
//!
//! # Example
//!
//! ```
//! use peggy::{new_parser, Builder, ExprId};
//!
//! fn digit(b: &Builder) -> ExprId {
//!     b.range('0', '9')
//! }
//!
//! fn number(b: &Builder) -> ExprId {
//!     b.rule("Number", |b| b.one_or_more(vec![digit(b)]))
//! }
//!
//! let parser = new_parser("Number", number);
//! assert!(parser.recognize("42"));
//! assert!(!parser.recognize("abc"));
//! ```

mod builder;
mod buffer;
mod expression;
mod location;
mod log;
mod node;
mod parser;
mod registry;
mod result;

pub mod demos;

#[cfg(test)]
mod __tests__;

pub use builder::{Builder, RuleOption};
pub use buffer::{Buffer, CharReader, Code};
pub use expression::{ExprId, Expression, NodeMode, RuleData};
pub use location::Location;
pub use log::{Log, StandardLog, VecLog};
pub use node::{results_nodes, Node};
pub use parser::{new_parser, Parser};
pub use registry::Registry;
pub use result::MatchResult;
