//! Error types for rule registration and scanning
//!
//! Two failure domains exist: a rule expression that cannot be lexed or
//! parsed ([`RuleError`], surfaced at registration time), and an input
//! position where no registered rule matches ([`ScanError`], surfaced
//! per-token and recoverable — the scanner consumes one character so a caller
//! that logs the error can keep scanning).

use std::fmt;

/// A malformed rule expression, reported when the rule is registered.
///
/// The `rule` field names the offending rule once the generator has attached
/// it; the rule-DSL lexer and parser themselves produce the variant without a
/// rule name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RuleError {
    /// A character in the expression that the rule DSL does not know.
    UnknownCharacter {
        rule: Option<String>,
        offset: usize,
        ch: char,
    },
    /// A meta-token in a position where no grammar production accepts it.
    UnexpectedToken { rule: Option<String>, token: String },
    /// The expression ended where a terminal was required.
    UnexpectedEnd { rule: Option<String> },
    /// A parenthesized group was never closed.
    MissingCloseParen { rule: Option<String> },
    /// The expression parsed, but tokens remained unconsumed.
    TrailingToken { rule: Option<String>, token: String },
}

impl RuleError {
    /// Attach the name of the rule being registered to this error.
    pub fn for_rule(mut self, name: &str) -> Self {
        let slot = match &mut self {
            RuleError::UnknownCharacter { rule, .. }
            | RuleError::UnexpectedToken { rule, .. }
            | RuleError::UnexpectedEnd { rule }
            | RuleError::MissingCloseParen { rule }
            | RuleError::TrailingToken { rule, .. } => rule,
        };
        *slot = Some(name.to_string());
        self
    }

    fn rule_name(&self) -> Option<&str> {
        match self {
            RuleError::UnknownCharacter { rule, .. }
            | RuleError::UnexpectedToken { rule, .. }
            | RuleError::UnexpectedEnd { rule }
            | RuleError::MissingCloseParen { rule }
            | RuleError::TrailingToken { rule, .. } => rule.as_deref(),
        }
    }
}

impl fmt::Display for RuleError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(name) = self.rule_name() {
            write!(f, "rule '{}': ", name)?;
        }
        match self {
            RuleError::UnknownCharacter { offset, ch, .. } => {
                write!(f, "unknown character {:?} at offset {}", ch, offset)
            }
            RuleError::UnexpectedToken { token, .. } => {
                write!(f, "unexpected {}", token)
            }
            RuleError::UnexpectedEnd { .. } => {
                write!(f, "unexpected end of expression")
            }
            RuleError::MissingCloseParen { .. } => {
                write!(f, "expected closing ')'")
            }
            RuleError::TrailingToken { token, .. } => {
                write!(f, "trailing {} after complete expression", token)
            }
        }
    }
}

impl std::error::Error for RuleError {}

/// A scan failure: no registered rule matched at the current position.
///
/// The offending character has already been consumed when this is returned,
/// so subsequent calls make forward progress.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct ScanError {
    /// 1-based line of the unrecognized character
    pub line: usize,
    /// 0-based column of the unrecognized character
    pub column: usize,
    /// Human-readable description, naming the character
    pub reason: String,
}

impl ScanError {
    pub fn new(line: usize, column: usize, reason: String) -> Self {
        Self {
            line,
            column,
            reason,
        }
    }
}

impl fmt::Display for ScanError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}: {}", self.line, self.column, self.reason)
    }
}

impl std::error::Error for ScanError {}
