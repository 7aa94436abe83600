//! Lexer generation: rule registration and scanner construction
//!
//! [`LexerGenerator`] is the crate's entry point. Register named rules
//! against it — helpers with [`rule`](LexerGenerator::rule), token-emitting
//! rules with [`token`](LexerGenerator::token) or
//! [`token_with`](LexerGenerator::token_with) — then call
//! [`generate`](LexerGenerator::generate) to bind a [`Scanner`] to an input
//! string.
//!
//! ```text
//! let mut gen = LexerGenerator::new(Kind::Eof, |_, _| false);
//! gen.rule("bit", "0|1")?;
//! gen.token("bits", "(${bit})+", Kind::Number)?;
//! let mut scanner = gen.generate("1011", || ());
//! ```
//!
//! A malformed rule expression fails registration with a [`RuleError`]
//! naming the rule; nothing partial enters the environment. Registering a
//! name twice replaces the earlier rule.

use std::collections::HashSet;
use std::fmt;
use std::hash::Hash;
use std::sync::Arc;

use crate::ast::{Environment, Rule, Transformer};
use crate::error::RuleError;
use crate::rules;
use crate::scanner::{ScanConfig, Scanner};

/// Default whitespace characters skipped between tokens.
pub const DEFAULT_WHITESPACE: [char; 4] = [' ', '\t', '\n', '\r'];

/// Builder for scanners: holds the rule environment and the scan
/// configuration.
pub struct LexerGenerator<T> {
    env: Environment<T>,
    eof_type: T,
    precedence: Arc<dyn Fn(&T, &T) -> bool + Send + Sync>,
    whitespace: Vec<char>,
    ignored: HashSet<T>,
}

impl<T> fmt::Debug for LexerGenerator<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LexerGenerator").finish_non_exhaustive()
    }
}

impl<T> LexerGenerator<T>
where
    T: Clone + Eq + Hash,
{
    /// Create a generator with the two required pieces of configuration:
    /// the token type emitted at end of input, and the precedence function.
    ///
    /// `precedence(current, next)` is consulted only when two rules match
    /// lexemes of exactly equal length; returning true makes `next` win.
    /// If it declines both orderings, the earlier-registered rule wins.
    ///
    /// The intrinsic classes (`${digit}`, `${letter}`, `${uppercase}`,
    /// `${lowercase}`, `${symbol}`, `${control}`) are pre-registered before
    /// any user rule.
    pub fn new(eof_type: T, precedence: impl Fn(&T, &T) -> bool + Send + Sync + 'static) -> Self {
        Self {
            env: Environment::with_intrinsics(),
            eof_type,
            precedence: Arc::new(precedence),
            whitespace: DEFAULT_WHITESPACE.to_vec(),
            ignored: HashSet::new(),
        }
    }

    /// Replace the whitespace character set (default space, tab, newline,
    /// carriage return).
    pub fn whitespace(&mut self, chars: &[char]) -> &mut Self {
        self.whitespace = chars.to_vec();
        self
    }

    /// Mark a token type as ignored: matched and consumed, never surfaced.
    pub fn ignore(&mut self, token_type: T) -> &mut Self {
        self.ignored.insert(token_type);
        self
    }

    /// Register a helper rule: referenceable via `${name}`, never a token.
    pub fn rule(&mut self, name: &str, pattern: &str) -> Result<&mut Self, RuleError> {
        self.define(name, pattern, None, None)
    }

    /// Register a token-emitting rule.
    pub fn token(&mut self, name: &str, pattern: &str, token_type: T) -> Result<&mut Self, RuleError> {
        self.define(name, pattern, Some(token_type), None)
    }

    /// Register a token-emitting rule with a lexeme transformer, applied to
    /// the matched text of a winning match before the token is built.
    pub fn token_with(
        &mut self,
        name: &str,
        pattern: &str,
        token_type: T,
        transformer: impl Fn(&str) -> String + Send + Sync + 'static,
    ) -> Result<&mut Self, RuleError> {
        self.define(name, pattern, Some(token_type), Some(Arc::new(transformer)))
    }

    fn define(
        &mut self,
        name: &str,
        pattern: &str,
        token_type: Option<T>,
        transformer: Option<Transformer>,
    ) -> Result<&mut Self, RuleError> {
        let node = rules::compile(pattern).map_err(|err| err.for_rule(name))?;
        self.env.insert(
            name,
            Rule {
                node,
                token_type,
                transformer,
            },
        );
        Ok(self)
    }

    /// The current environment (rule names are visible for introspection).
    pub fn environment(&self) -> &Environment<T> {
        &self.env
    }

    /// Bind a scanner to `input`. The metadata factory runs once per
    /// produced token, with no arguments.
    ///
    /// The environment is snapshotted here: rules registered after this call
    /// are not observed by the returned scanner.
    pub fn generate<M>(
        &self,
        input: &str,
        metadata_factory: impl FnMut() -> M + 'static,
    ) -> Scanner<T, M> {
        Scanner::new(
            input,
            Arc::new(self.env.clone()),
            ScanConfig {
                eof_type: self.eof_type.clone(),
                precedence: Arc::clone(&self.precedence),
                whitespace: self.whitespace.clone(),
                ignored: self.ignored.clone(),
            },
            Box::new(metadata_factory),
        )
    }
}
