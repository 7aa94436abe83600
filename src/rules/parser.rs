//! Recursive-descent parser for rule expressions
//!
//! Grammar, one token of lookahead:
//!
//! ```text
//! regex    := concat ('|' concat)*       Either if >1 alternative, else passthrough
//! concat   := terminal+                  Concatenation if >1 terminal, else passthrough
//! terminal := '(' regex ')' ['*' | '+']  Grouping
//!           | LITERAL                    Literal
//!           | VARIABLE                   Variable
//! ```
//!
//! `*` and `+` bind only to parenthesized groups; `a*` is rejected, `(a)*`
//! is the repetition form. The parser consumes the whole token stream and
//! reports anything left over, so a malformed expression never registers
//! with a silently truncated tree.

use crate::ast::{Modifier, Node};
use crate::error::RuleError;
use crate::rules::tokens::RuleToken;

/// Parse one rule expression's full meta-token stream into a tree.
pub fn parse(tokens: &[RuleToken]) -> Result<Node, RuleError> {
    let mut parser = Parser { tokens, pos: 0 };
    let node = parser.regex()?;
    if let Some(token) = parser.peek() {
        return Err(RuleError::TrailingToken {
            rule: None,
            token: token.to_string(),
        });
    }
    Ok(node)
}

struct Parser<'a> {
    tokens: &'a [RuleToken],
    pos: usize,
}

impl<'a> Parser<'a> {
    fn peek(&self) -> Option<&'a RuleToken> {
        self.tokens.get(self.pos)
    }

    fn advance(&mut self) -> Option<&'a RuleToken> {
        let token = self.tokens.get(self.pos);
        if token.is_some() {
            self.pos += 1;
        }
        token
    }

    fn regex(&mut self) -> Result<Node, RuleError> {
        let mut alternatives = vec![self.concat()?];
        while self.peek() == Some(&RuleToken::Pipe) {
            self.advance();
            alternatives.push(self.concat()?);
        }
        if alternatives.len() == 1 {
            Ok(alternatives.pop().unwrap())
        } else {
            Ok(Node::Either(alternatives))
        }
    }

    fn concat(&mut self) -> Result<Node, RuleError> {
        let mut terminals = vec![self.terminal()?];
        while matches!(
            self.peek(),
            Some(RuleToken::Literal(_) | RuleToken::Variable(_) | RuleToken::OpenParen)
        ) {
            terminals.push(self.terminal()?);
        }
        if terminals.len() == 1 {
            Ok(terminals.pop().unwrap())
        } else {
            Ok(Node::Concatenation(terminals))
        }
    }

    fn terminal(&mut self) -> Result<Node, RuleError> {
        match self.advance() {
            Some(RuleToken::Literal(ch)) => Ok(Node::Literal(*ch)),
            Some(RuleToken::Variable(name)) => Ok(Node::Variable(name.clone())),
            Some(RuleToken::OpenParen) => {
                let inner = self.regex()?;
                if self.peek() != Some(&RuleToken::CloseParen) {
                    return Err(RuleError::MissingCloseParen { rule: None });
                }
                self.advance();
                let modifier = match self.peek() {
                    Some(RuleToken::Star) => {
                        self.advance();
                        Modifier::ZeroOrMore
                    }
                    Some(RuleToken::Plus) => {
                        self.advance();
                        Modifier::OneOrMore
                    }
                    _ => Modifier::None,
                };
                Ok(Node::Grouping(Box::new(inner), modifier))
            }
            Some(token) => Err(RuleError::UnexpectedToken {
                rule: None,
                token: token.to_string(),
            }),
            None => Err(RuleError::UnexpectedEnd { rule: None }),
        }
    }
}
