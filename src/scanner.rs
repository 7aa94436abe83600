//! Scanner engine: greedy, precedence-aware tokenization
//!
//! A [`Scanner`] is bound to one input string and a frozen rule environment.
//! At each position it skips configured whitespace, asks the matcher for
//! every token-emitting rule's match set against the remaining input, and
//! picks the winner by longest match, falling back to the caller's
//! precedence function on exact-length ties and to registration order when
//! the precedence function declines both directions.
//!
//! End of input is not an error: the scanner emits one EOF token (empty
//! lexeme, configured EOF type) and keeps emitting it if asked again. A
//! position where no rule matches is a per-token [`ScanError`]; the
//! offending character is consumed so the caller can log and continue.
//!
//! A scanner mutates its position in place and is not for concurrent use;
//! the environment snapshot behind it is read-only and may back any number
//! of scanners over different inputs.

use std::collections::HashSet;
use std::fmt;
use std::hash::Hash;
use std::sync::Arc;

use crate::ast::{Environment, Transformer};
use crate::error::ScanError;
use crate::location::SourceLocation;
use crate::matcher::{longest, match_set};

/// One scanned token.
///
/// `line` is 1-based and `column` is 0-based, both pointing at the first
/// character of the lexeme (for the EOF token, at the end of input). The
/// `metadata` payload is produced by the caller's metadata factory at
/// construction time and is opaque to the scanner.
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Token<T, M> {
    pub token_type: T,
    pub lexeme: String,
    pub line: usize,
    pub column: usize,
    pub metadata: M,
}

impl<T: fmt::Display, M> fmt::Display for Token<T, M> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}({:?}) at {}:{}",
            self.token_type, self.lexeme, self.line, self.column
        )
    }
}

/// Scanner configuration, assembled by the generator.
pub(crate) struct ScanConfig<T> {
    /// Token type emitted at end of input
    pub eof_type: T,
    /// Tie-breaker: true when `next` should replace `current` on an
    /// exact-length tie. Consulted only on such ties.
    pub precedence: Arc<dyn Fn(&T, &T) -> bool + Send + Sync>,
    /// Characters skipped before each token attempt
    pub whitespace: Vec<char>,
    /// Token types matched and consumed but never surfaced
    pub ignored: HashSet<T>,
}

/// A tokenization session over one input string.
pub struct Scanner<T, M> {
    input: String,
    env: Arc<Environment<T>>,
    config: ScanConfig<T>,
    locations: SourceLocation,
    metadata_factory: Box<dyn FnMut() -> M>,
    current_index: usize,
    start_index: usize,
    finished: bool,
}

/// Winning candidate for the current position, tracked while the rules are
/// tried in registration order.
struct Candidate<T> {
    length: usize,
    token_type: T,
    transformer: Option<Transformer>,
}

impl<T, M> Scanner<T, M>
where
    T: Clone + Eq + Hash,
{
    pub(crate) fn new(
        input: &str,
        env: Arc<Environment<T>>,
        config: ScanConfig<T>,
        metadata_factory: Box<dyn FnMut() -> M>,
    ) -> Self {
        Self {
            input: input.to_string(),
            env,
            config,
            locations: SourceLocation::new(input),
            metadata_factory,
            current_index: 0,
            start_index: 0,
            finished: false,
        }
    }

    /// Whether unconsumed characters remain. This does not promise that the
    /// next scan will succeed, only that it has something to look at.
    pub fn has_next_token(&self) -> bool {
        self.current_index < self.input.len()
    }

    /// Scan the next token, consuming it.
    ///
    /// On failure the unrecognized character has been consumed (one-character
    /// forward progress), so calling again resumes after it.
    pub fn try_next_token(&mut self) -> Result<Token<T, M>, ScanError> {
        loop {
            self.skip_whitespace();
            self.start_index = self.current_index;

            if self.current_index == self.input.len() {
                self.finished = true;
                return Ok(self.make_token(self.config.eof_type.clone(), String::new()));
            }

            let best = self.best_candidate();

            match best {
                Some(candidate) => {
                    self.current_index += candidate.length;
                    let raw = &self.input[self.start_index..self.current_index];
                    let lexeme = match &candidate.transformer {
                        Some(transform) => transform(raw),
                        None => raw.to_string(),
                    };
                    if self.config.ignored.contains(&candidate.token_type) {
                        continue;
                    }
                    return Ok(self.make_token(candidate.token_type, lexeme));
                }
                None => {
                    // Consume exactly one character so the caller can keep
                    // scanning after reporting the failure.
                    let ch = self.input[self.current_index..]
                        .chars()
                        .next()
                        .unwrap_or('\u{fffd}');
                    self.current_index += ch.len_utf8();
                    let position = self.locations.byte_to_position(self.start_index);
                    return Err(ScanError::new(
                        position.line,
                        position.column,
                        format!("unrecognized character {:?}", ch),
                    ));
                }
            }
        }
    }

    /// Scan the next token without consuming it: the scanner's position is
    /// restored before returning, success or failure. The metadata factory
    /// still runs once per produced token; side-effecting factories are the
    /// caller's concern.
    pub fn try_peek_token(&mut self) -> Result<Token<T, M>, ScanError> {
        let saved_current = self.current_index;
        let saved_start = self.start_index;
        let saved_finished = self.finished;
        let result = self.try_next_token();
        self.current_index = saved_current;
        self.start_index = saved_start;
        self.finished = saved_finished;
        result
    }

    /// Panicking wrapper over [`try_next_token`](Self::try_next_token), for
    /// tests and quick callers. The Result surface is the primary API.
    pub fn next_token(&mut self) -> Token<T, M> {
        self.try_next_token()
            .unwrap_or_else(|err| panic!("scan failed: {}", err))
    }

    /// Panicking wrapper over [`try_peek_token`](Self::try_peek_token).
    pub fn peek_token(&mut self) -> Token<T, M> {
        self.try_peek_token()
            .unwrap_or_else(|err| panic!("scan failed: {}", err))
    }

    /// Try every token-emitting rule, in registration order, against the
    /// remaining input; keep the longest match, breaking exact-length ties
    /// with the precedence function.
    fn best_candidate(&self) -> Option<Candidate<T>> {
        let remainder = &self.input[self.current_index..];
        let mut best: Option<Candidate<T>> = None;

        for (_, rule) in self.env.iter() {
            let Some(token_type) = &rule.token_type else {
                continue;
            };
            let set = match_set(&rule.node, remainder, &self.env);
            // A zero-length match is a valid candidate; only a missing one
            // is a failure.
            let Some(length) = longest(&set) else {
                continue;
            };
            let replace = match &best {
                None => true,
                Some(current) => {
                    length > current.length
                        || (length == current.length
                            && (self.config.precedence)(&current.token_type, token_type))
                }
            };
            if replace {
                best = Some(Candidate {
                    length,
                    token_type: token_type.clone(),
                    transformer: rule.transformer.clone(),
                });
            }
        }

        best
    }

    fn skip_whitespace(&mut self) {
        while let Some(ch) = self.input[self.current_index..].chars().next() {
            if self.config.whitespace.contains(&ch) {
                self.current_index += ch.len_utf8();
            } else {
                break;
            }
        }
    }

    fn make_token(&mut self, token_type: T, lexeme: String) -> Token<T, M> {
        let position = self.locations.byte_to_position(self.start_index);
        Token {
            token_type,
            lexeme,
            line: position.line,
            column: position.column,
            metadata: (self.metadata_factory)(),
        }
    }
}

/// Yields tokens (and per-position scan errors) until the EOF token has been
/// produced. Errors do not end the stream; forward progress is guaranteed.
impl<T, M> Iterator for Scanner<T, M>
where
    T: Clone + Eq + Hash,
{
    type Item = Result<Token<T, M>, ScanError>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.finished {
            return None;
        }
        Some(self.try_next_token())
    }
}
