//! Tokenization driver for rule expressions
//!
//! Runs the logos lexer over one rule expression and collects the meta-token
//! stream. Unlike an input-text scanner, the rule DSL has no catch-all token:
//! any character outside the DSL is a hard error carrying its byte offset, so
//! a malformed expression fails registration instead of silently dropping
//! characters.

use logos::Logos;

use crate::error::RuleError;
use crate::rules::tokens::RuleToken;

/// Tokenize a rule expression into meta-tokens.
pub fn tokenize(expression: &str) -> Result<Vec<RuleToken>, RuleError> {
    let mut lexer = RuleToken::lexer(expression);
    let mut tokens = Vec::new();

    while let Some(result) = lexer.next() {
        match result {
            Ok(token) => tokens.push(token),
            Err(()) => {
                let span = lexer.span();
                let ch = expression[span.start..]
                    .chars()
                    .next()
                    .unwrap_or('\u{fffd}');
                return Err(RuleError::UnknownCharacter {
                    rule: None,
                    offset: span.start,
                    ch,
                });
            }
        }
    }

    Ok(tokens)
}
