//! Rule-DSL front end
//!
//! Turns one rule expression string into a [`Node`](crate::ast::Node) tree in
//! two stages: logos-based tokenization into meta-tokens, then recursive
//! descent over the token stream.

pub mod lexer;
pub mod parser;
pub mod tokens;

pub use lexer::tokenize;
pub use parser::parse;
pub use tokens::RuleToken;

use crate::ast::Node;
use crate::error::RuleError;

/// Compile a rule expression string into its tree.
pub fn compile(expression: &str) -> Result<Node, RuleError> {
    parse(&tokenize(expression)?)
}
