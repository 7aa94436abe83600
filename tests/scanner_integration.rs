//! End-to-end scanning tests over full rule sets
//!
//! These exercise the whole pipeline — rule DSL, environment, matcher,
//! scanner — the way a consumer would use it, including the tokenization
//! laws: longest match, precedence on exact-length ties, registration order
//! as the final tie-breaker, and forward progress on scan failure.

use lexgen::{LexerGenerator, RuleError, Token};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
enum Kind {
    Eof,
    Plus,
    Number,
    Identifier,
    Keyword,
    Comment,
    Hex,
}

fn arithmetic() -> LexerGenerator<Kind> {
    let mut gen = LexerGenerator::new(Kind::Eof, |_: &Kind, _: &Kind| false);
    gen.token("plus", "$+", Kind::Plus).unwrap();
    gen.rule("digit", "0|1|2|3|4|5|6|7|8|9").unwrap();
    gen.token("decimal", "(${digit})+", Kind::Number).unwrap();
    gen
}

fn kinds_and_lexemes(tokens: &[Token<Kind, ()>]) -> Vec<(Kind, String)> {
    tokens
        .iter()
        .map(|t| (t.token_type, t.lexeme.clone()))
        .collect()
}

#[test]
fn literal_rule_scans_its_exact_lexeme() {
    let mut gen = LexerGenerator::new(Kind::Eof, |_: &Kind, _: &Kind| false);
    gen.token("plus", "$+", Kind::Plus).unwrap();
    let mut scanner = gen.generate("+", || ());
    let token = scanner.next_token();
    assert_eq!(token.token_type, Kind::Plus);
    assert_eq!(token.lexeme, "+");
    assert_eq!(scanner.next_token().token_type, Kind::Eof);
}

#[test]
fn longest_match_wins_regardless_of_registration_order() {
    // "if" (registered first) and identifiers both match a prefix of "ifx";
    // the identifier's strictly longer match must win.
    let mut gen = LexerGenerator::new(Kind::Eof, |_: &Kind, _: &Kind| false);
    gen.token("if", "if", Kind::Keyword).unwrap();
    gen.token("identifier", "(${lowercase})+", Kind::Identifier)
        .unwrap();
    let mut scanner = gen.generate("ifx", || ());
    let token = scanner.next_token();
    assert_eq!((token.token_type, token.lexeme.as_str()), (Kind::Identifier, "ifx"));

    // And the other way around when the keyword is the longer match
    let mut gen = LexerGenerator::new(Kind::Eof, |_: &Kind, _: &Kind| false);
    gen.token("identifier", "(${lowercase})+", Kind::Identifier)
        .unwrap();
    gen.token("ifelse", "ifelse", Kind::Keyword).unwrap();
    let mut scanner = gen.generate("ifelse", || ());
    assert_eq!(scanner.next_token().token_type, Kind::Keyword);
}

#[test]
fn equal_length_tie_goes_to_precedence_function() {
    // Keywords should beat identifiers on exact-length ties
    let mut gen = LexerGenerator::new(Kind::Eof, |_current: &Kind, next: &Kind| {
        *next == Kind::Keyword
    });
    gen.token("identifier", "(${lowercase})+", Kind::Identifier)
        .unwrap();
    gen.token("if", "if", Kind::Keyword).unwrap();
    let mut scanner = gen.generate("if", || ());
    assert_eq!(scanner.next_token().token_type, Kind::Keyword);
}

#[test]
fn tie_without_precedence_goes_to_earlier_registration() {
    let mut gen = LexerGenerator::new(Kind::Eof, |_: &Kind, _: &Kind| false);
    gen.token("identifier", "(${lowercase})+", Kind::Identifier)
        .unwrap();
    gen.token("if", "if", Kind::Keyword).unwrap();
    let mut scanner = gen.generate("if", || ());
    assert_eq!(scanner.next_token().token_type, Kind::Identifier);
}

#[test]
fn scan_failure_consumes_one_character_and_recovers() {
    // No rule matches '.' alone, so "2.4 + 3.5" produces NUMBER("2"), a
    // failure at the '.', then scanning resumes at '4'.
    let gen = arithmetic();
    let mut scanner = gen.generate("2.4 + 3.5", || ());
    let mut tokens = Vec::new();
    let mut failures = Vec::new();
    loop {
        match scanner.try_next_token() {
            Ok(token) => {
                let done = token.token_type == Kind::Eof;
                tokens.push(token);
                if done {
                    break;
                }
            }
            Err(err) => failures.push(err),
        }
    }

    assert_eq!(
        kinds_and_lexemes(&tokens),
        vec![
            (Kind::Number, "2".to_string()),
            (Kind::Number, "4".to_string()),
            (Kind::Plus, "+".to_string()),
            (Kind::Number, "3".to_string()),
            (Kind::Number, "5".to_string()),
            (Kind::Eof, String::new()),
        ]
    );
    assert_eq!(failures.len(), 2);
    assert_eq!((failures[0].line, failures[0].column), (1, 1));
    assert_eq!((failures[1].line, failures[1].column), (1, 7));
}

#[test]
fn empty_input_yields_eof_at_line_one() {
    let gen = arithmetic();
    let mut scanner = gen.generate("", || ());
    assert!(!scanner.has_next_token());
    let token = scanner.next_token();
    assert_eq!(token.token_type, Kind::Eof);
    assert_eq!(token.lexeme, "");
    assert_eq!((token.line, token.column), (1, 0));
    assert!(!scanner.has_next_token());
}

#[test]
fn peek_then_get_yields_the_identical_token() {
    let gen = arithmetic();
    let mut scanner = gen.generate("12 + 34", || ());
    loop {
        let peeked = scanner.try_peek_token();
        let got = scanner.try_next_token();
        assert_eq!(peeked, got);
        match got {
            Ok(token) if token.token_type == Kind::Eof => break,
            _ => {}
        }
    }
}

#[test]
fn peek_leaves_the_position_unchanged() {
    let gen = arithmetic();
    let mut peeking = gen.generate("1 + 2", || ());
    let mut straight = gen.generate("1 + 2", || ());

    let mut peeked_stream = Vec::new();
    let mut straight_stream = Vec::new();
    for _ in 0..4 {
        let _ = peeking.try_peek_token();
        let _ = peeking.try_peek_token();
        peeked_stream.push(peeking.try_next_token());
        straight_stream.push(straight.try_next_token());
    }
    assert_eq!(peeked_stream, straight_stream);
}

#[test]
fn ignored_token_types_are_consumed_but_not_surfaced() {
    let mut gen = LexerGenerator::new(Kind::Eof, |_: &Kind, _: &Kind| false);
    gen.token("number", "(${digit})+", Kind::Number).unwrap();
    gen.token("comment", "$#(${lowercase})*", Kind::Comment)
        .unwrap();
    gen.ignore(Kind::Comment);

    let mut scanner = gen.generate("1 #skip 2 #also 3", || ());
    let kinds: Vec<(Kind, String)> = scanner
        .by_ref()
        .map(|result| {
            let token = result.unwrap();
            (token.token_type, token.lexeme)
        })
        .collect();
    assert_eq!(
        kinds,
        vec![
            (Kind::Number, "1".to_string()),
            (Kind::Number, "2".to_string()),
            (Kind::Number, "3".to_string()),
            (Kind::Eof, String::new()),
        ]
    );
}

#[test]
fn transformer_applies_only_to_the_final_lexeme() {
    let mut gen = LexerGenerator::new(Kind::Eof, |_: &Kind, _: &Kind| false);
    gen.rule("hexdigit", "${digit}|a|b|c|d|e|f").unwrap();
    gen.token_with("hex", "0x(${hexdigit})+", Kind::Hex, |raw| {
        raw.trim_start_matches("0x").to_uppercase()
    })
    .unwrap();

    let mut scanner = gen.generate("0xbeef", || ());
    let token = scanner.next_token();
    assert_eq!(token.token_type, Kind::Hex);
    assert_eq!(token.lexeme, "BEEF");
}

#[test]
fn custom_whitespace_set() {
    let mut gen = LexerGenerator::new(Kind::Eof, |_: &Kind, _: &Kind| false);
    gen.token("number", "(${digit})+", Kind::Number).unwrap();
    gen.whitespace(&[',']);

    // Comma separates; a plain space is now an unrecognized character
    let mut scanner = gen.generate("1,2", || ());
    assert_eq!(scanner.next_token().lexeme, "1");
    assert_eq!(scanner.next_token().lexeme, "2");

    let mut scanner = gen.generate("1 2", || ());
    assert_eq!(scanner.next_token().lexeme, "1");
    assert!(scanner.try_next_token().is_err());
}

#[test]
fn helper_rules_never_win_a_scan() {
    // "digit" is a helper; only "decimal" emits. A bare digit scans as the
    // decimal rule, and removing the decimal rule leaves nothing to match.
    let mut gen = LexerGenerator::new(Kind::Eof, |_: &Kind, _: &Kind| false);
    gen.rule("digit", "0|1|2|3|4|5|6|7|8|9").unwrap();
    let mut scanner = gen.generate("7", || ());
    assert!(scanner.try_next_token().is_err());
}

#[test]
fn self_recursive_rule_through_repetition_terminates() {
    // "nest" references itself inside a repetition whose inner pattern
    // always consumes at least one character.
    let mut gen = LexerGenerator::new(Kind::Eof, |_: &Kind, _: &Kind| false);
    gen.token("nest", "x(${nest})*", Kind::Identifier).unwrap();
    let mut scanner = gen.generate("xxx", || ());
    let token = scanner.next_token();
    assert_eq!(token.lexeme, "xxx");
    assert_eq!(scanner.next_token().token_type, Kind::Eof);

    let mut gen = LexerGenerator::new(Kind::Eof, |_: &Kind, _: &Kind| false);
    gen.token("rec", "y|y(${rec})+", Kind::Identifier).unwrap();
    let mut scanner = gen.generate("yyyy", || ());
    assert_eq!(scanner.next_token().lexeme, "yyyy");
}

#[test]
fn mutually_recursive_forward_references() {
    // "a" references "b" before "b" exists; resolution happens at match time
    let mut gen = LexerGenerator::new(Kind::Eof, |_: &Kind, _: &Kind| false);
    gen.token("a", "a(${b})*", Kind::Identifier).unwrap();
    gen.rule("b", "b(${a})*").unwrap();
    let mut scanner = gen.generate("abab", || ());
    assert_eq!(scanner.next_token().lexeme, "abab");
}

#[test]
fn registration_errors_carry_the_rule_name() {
    let mut gen = LexerGenerator::new(Kind::Eof, |_: &Kind, _: &Kind| false);
    let err = gen.token("broken", "(a", Kind::Identifier).unwrap_err();
    assert_eq!(err, RuleError::MissingCloseParen { rule: Some("broken".to_string()) });
    let err = gen.token("worse", "a?b", Kind::Identifier).unwrap_err();
    assert!(matches!(err, RuleError::UnknownCharacter { ch: '?', .. }));
}

#[test]
fn tokens_round_trip_through_serde() {
    let gen = arithmetic();
    let scanner = gen.generate("1 + 2", || ());
    let tokens: Vec<Token<Kind, ()>> = scanner.map(|result| result.unwrap()).collect();

    let json = serde_json::to_string(&tokens).unwrap();
    let back: Vec<Token<Kind, ()>> = serde_json::from_str(&json).unwrap();
    assert_eq!(tokens, back);
}

#[test]
fn metadata_factory_reads_ambient_context() {
    let path = std::rc::Rc::new("input.src".to_string());
    let gen = arithmetic();
    let factory_path = std::rc::Rc::clone(&path);
    let mut scanner = gen.generate("1", move || std::rc::Rc::clone(&factory_path));
    let token = scanner.next_token();
    assert_eq!(token.metadata.as_str(), "input.src");
}
