//! # lexgen
//!
//! A lexer generator driven by named regular definitions.
//!
//! Rules are written in a small regex DSL (literals, concatenation, `|`
//! alternation, parenthesized groups with `*`/`+`, `${name}` references to
//! other rules or to built-in character classes) and registered under names
//! on a [`LexerGenerator`]. Generating against an input string yields a
//! [`Scanner`] that produces position-tagged [`Token`]s using the classic
//! tokenization discipline: longest match wins, exact-length ties go to the
//! caller's precedence function, remaining ties to registration order.
//!
//! ## Pipeline
//!
//! ```text
//! rule text --tokenize--> meta-tokens --parse--> Node tree --insert--> Environment
//!                                                                         |
//! input text ----------------> Scanner --match_set per rule--> best rule --+--> Token
//! ```
//!
//! Matching is brute-force backtracking over the rule trees: each node
//! reports *every* prefix length it accepts so that concatenations and
//! repetitions can explore all split points, and only the scanner reduces a
//! rule's set to its longest member. See the [`matcher`] module notes for
//! the complexity tradeoff.
//!
//! ## Example rule set
//!
//! ```text
//! plus    = "$+"              -> PLUS
//! digit   = "0|1|2|3|4|5|6|7|8|9"
//! decimal = "(${digit})+"     -> NUMBER
//! ```

pub mod ast;
pub mod classes;
pub mod error;
pub mod generator;
pub mod location;
pub mod matcher;
pub mod rules;
pub mod scanner;

pub use ast::{Environment, Modifier, Node, Rule, Transformer};
pub use classes::CharPredicate;
pub use error::{RuleError, ScanError};
pub use generator::{LexerGenerator, DEFAULT_WHITESPACE};
pub use location::{Position, SourceLocation};
pub use scanner::{Scanner, Token};
