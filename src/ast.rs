//! Regex AST and the rule environment
//!
//! A parsed rule expression becomes a [`Node`] tree. The tree is a plain
//! owned structure except for [`Node::Variable`], which is a *name*, not a
//! child: it is resolved against the [`Environment`] at match time. That
//! lookup-by-name indirection is what allows rules to reference each other
//! in any definition order (including mutually) without ever building a
//! cyclic ownership graph.
//!
//! The environment keeps rules in insertion order. Order is semantics, not
//! cosmetics: when two rules tie on matched length and the precedence
//! function declines both directions, the earlier-registered rule wins.

use std::fmt;
use std::sync::Arc;

use indexmap::IndexMap;

use crate::classes::{CharPredicate, INTRINSICS};

/// Repetition modifier on a parenthesized group.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Modifier {
    /// Plain grouping, no repetition
    None,
    /// `*` — zero or more repetitions
    ZeroOrMore,
    /// `+` — one or more repetitions
    OneOrMore,
}

/// One node of a parsed rule expression.
#[derive(Debug, Clone, PartialEq)]
pub enum Node {
    /// Exactly one fixed character
    Literal(char),
    /// All children in sequence
    Concatenation(Vec<Node>),
    /// Exactly one of the children; order only affects printing
    Either(Vec<Node>),
    /// Parenthesized group with an optional repetition modifier
    Grouping(Box<Node>, Modifier),
    /// Named reference into the environment, resolved at match time
    Variable(String),
    /// Built-in single-character class
    Intrinsic(&'static str, CharPredicate),
}

impl fmt::Display for Node {
    /// Deterministic printing back into rule-DSL syntax.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Node::Literal(ch) if ch.is_ascii_alphanumeric() => write!(f, "{}", ch),
            Node::Literal(ch) => write!(f, "${}", ch),
            Node::Concatenation(children) => {
                for child in children {
                    write!(f, "{}", child)?;
                }
                Ok(())
            }
            Node::Either(children) => {
                write!(f, "(")?;
                for (i, child) in children.iter().enumerate() {
                    if i > 0 {
                        write!(f, "|")?;
                    }
                    write!(f, "{}", child)?;
                }
                write!(f, ")")
            }
            Node::Grouping(inner, modifier) => {
                let suffix = match modifier {
                    Modifier::None => "",
                    Modifier::ZeroOrMore => "*",
                    Modifier::OneOrMore => "+",
                };
                write!(f, "({}){}", inner, suffix)
            }
            Node::Variable(name) => write!(f, "${{{}}}", name),
            Node::Intrinsic(name, _) => write!(f, "${{{}}}", name),
        }
    }
}

/// Transforms a matched lexeme into the final token text. Applied only on a
/// winning match, never during candidate exploration.
pub type Transformer = Arc<dyn Fn(&str) -> String + Send + Sync>;

/// A registered rule: its pattern tree plus the two optional rule-root
/// attributes.
///
/// A rule without a `token_type` is a helper: it can only be reached through
/// `${name}` references and never starts a token on its own.
#[derive(Clone)]
pub struct Rule<T> {
    pub node: Node,
    pub token_type: Option<T>,
    pub transformer: Option<Transformer>,
}

impl<T: fmt::Debug> fmt::Debug for Rule<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Rule")
            .field("node", &self.node)
            .field("token_type", &self.token_type)
            .field("transformer", &self.transformer.as_ref().map(|_| "<fn>"))
            .finish()
    }
}

/// Name → rule mapping with insertion order preserved.
///
/// Mutated only during registration; scanners hold a frozen `Arc` snapshot
/// taken at generation time, so one environment may back any number of
/// concurrent scanner sessions.
#[derive(Debug, Clone)]
pub struct Environment<T> {
    rules: IndexMap<String, Rule<T>>,
}

impl<T> Environment<T> {
    /// An empty environment, without intrinsics. Mostly useful in tests.
    pub fn new() -> Self {
        Self {
            rules: IndexMap::new(),
        }
    }

    /// An environment with the intrinsic classes pre-registered as helper
    /// rules, in table order, before any user rule.
    pub fn with_intrinsics() -> Self {
        let mut env = Self::new();
        for (name, predicate) in INTRINSICS.iter().copied() {
            env.insert(
                name,
                Rule {
                    node: Node::Intrinsic(name, predicate),
                    token_type: None,
                    transformer: None,
                },
            );
        }
        env
    }

    /// Register a rule, replacing any previous rule of the same name (the
    /// replacement keeps the original insertion position).
    pub fn insert(&mut self, name: &str, rule: Rule<T>) {
        self.rules.insert(name.to_string(), rule);
    }

    /// Look up a rule by name.
    pub fn get(&self, name: &str) -> Option<&Rule<T>> {
        self.rules.get(name)
    }

    /// Iterate rules in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &Rule<T>)> {
        self.rules.iter().map(|(name, rule)| (name.as_str(), rule))
    }

    /// Registered rule names, in insertion order.
    pub fn names(&self) -> Vec<&str> {
        self.rules.keys().map(|name| name.as_str()).collect()
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }
}

impl<T> Default for Environment<T> {
    fn default() -> Self {
        Self::new()
    }
}
