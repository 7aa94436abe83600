//! Meta-token definitions for the rule DSL
//!
//! Rule expressions are written in a small regex DSL:
//!
//! ```text
//! (${digit})+        one or more digits
//! a|b|c              alternation
//! $+($-)*            a literal '+' followed by any number of literal '-'
//! ${hexdigit}        reference to another rule (or an intrinsic class)
//! ```
//!
//! Tokenization is handled entirely by logos. Whitespace inside an
//! expression is skipped and never part of a pattern; to match a whitespace
//! or operator character literally, escape it with `$`.

use logos::{Lexer, Logos};
use std::fmt;

fn literal_char(lex: &mut Lexer<RuleToken>) -> char {
    // Safe: the pattern matches exactly one char
    lex.slice().chars().next().unwrap()
}

fn escaped_char(lex: &mut Lexer<RuleToken>) -> char {
    // Safe: the pattern is '$' followed by exactly one char
    lex.slice().chars().nth(1).unwrap()
}

fn variable_name(lex: &mut Lexer<RuleToken>) -> String {
    let slice = lex.slice();
    slice[2..slice.len() - 1].to_string()
}

/// One meta-token of the rule DSL.
#[derive(Logos, Debug, Clone, PartialEq, Eq)]
#[logos(skip r"[ \t\r\n]+")]
pub enum RuleToken {
    /// A single character to match verbatim. Produced by an alphanumeric
    /// character, by a `$` escape (`$+` is a literal `+`), or by an
    /// unterminated `${` at end of input, which degrades to a literal `}`.
    #[regex(r"[0-9A-Za-z]", literal_char)]
    #[regex(r"\$[^{]", escaped_char)]
    #[regex(r"\$\{[^}]*", |_| '}', priority = 4)]
    Literal(char),

    /// A `${name}` reference to another rule or intrinsic class.
    #[regex(r"\$\{[^}]*\}", variable_name, priority = 5)]
    Variable(String),

    #[token("|")]
    Pipe,

    #[token("*")]
    Star,

    #[token("+")]
    Plus,

    #[token("(")]
    OpenParen,

    #[token(")")]
    CloseParen,
}

impl fmt::Display for RuleToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RuleToken::Literal(ch) => write!(f, "literal {:?}", ch),
            RuleToken::Variable(name) => write!(f, "variable ${{{}}}", name),
            RuleToken::Pipe => write!(f, "'|'"),
            RuleToken::Star => write!(f, "'*'"),
            RuleToken::Plus => write!(f, "'+'"),
            RuleToken::OpenParen => write!(f, "'('"),
            RuleToken::CloseParen => write!(f, "')'"),
        }
    }
}
