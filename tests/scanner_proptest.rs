//! Property-based tests for the scanner
//!
//! Two laws from the tokenizer contract are checked over generated inputs:
//! whitespace/ignored-text placement between tokens must not change the
//! surfaced token sequence (only positions move), and peeking must never
//! change what is subsequently scanned.

use proptest::prelude::*;

use lexgen::{LexerGenerator, ScanError, Token};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
enum Kind {
    Eof,
    Word,
    Number,
    Comment,
}

fn generator() -> LexerGenerator<Kind> {
    let mut gen = LexerGenerator::new(Kind::Eof, |_: &Kind, _: &Kind| false);
    gen.token("word", "(${lowercase})+", Kind::Word).unwrap();
    gen.token("number", "(${digit})+", Kind::Number).unwrap();
    gen.token("comment", "$#(${lowercase})*", Kind::Comment)
        .unwrap();
    gen.ignore(Kind::Comment);
    gen
}

fn surfaced(input: &str) -> Vec<(Kind, String)> {
    let gen = generator();
    let scanner = gen.generate(input, || ());
    scanner
        .map(|result| result.expect("inputs are built from matchable pieces"))
        .map(|token| (token.token_type, token.lexeme))
        .collect()
}

/// One lexeme for the rule set above.
fn lexeme_strategy() -> impl Strategy<Value = String> {
    prop_oneof![
        "[a-z]{1,6}",
        "[0-9]{1,4}",
    ]
}

/// Separator that may legally sit between two tokens: whitespace, optionally
/// carrying an ignored comment (always whitespace-terminated so it cannot
/// swallow the following token).
fn separator_strategy() -> impl Strategy<Value = String> {
    prop_oneof![
        "[ \t\n\r]{1,3}",
        "[ \t]{1,2}#[a-z]{0,4}[ \n]{1,2}",
    ]
}

proptest! {
    #[test]
    fn whitespace_and_ignored_text_placement_is_immaterial(
        lexemes in prop::collection::vec(lexeme_strategy(), 0..6),
        separators in prop::collection::vec(separator_strategy(), 0..7),
        leading in separator_strategy(),
        trailing in separator_strategy(),
    ) {
        // Canonical form: single spaces between lexemes
        let canonical = lexemes.join(" ");

        // Noisy form: arbitrary separators around and between the lexemes
        let mut noisy = leading;
        for (i, lexeme) in lexemes.iter().enumerate() {
            if i > 0 {
                let sep = separators.get(i - 1).cloned().unwrap_or_else(|| " ".to_string());
                noisy.push_str(&sep);
            }
            noisy.push_str(lexeme);
        }
        noisy.push_str(&trailing);

        prop_assert_eq!(surfaced(&canonical), surfaced(&noisy));
    }

    #[test]
    fn peeking_never_changes_the_scanned_stream(input in "[a-z0-9 .#]{0,24}") {
        let gen = generator();
        let mut peeking = gen.generate(&input, || ());
        let mut straight = gen.generate(&input, || ());

        let mut peeked_stream: Vec<Result<Token<Kind, ()>, ScanError>> = Vec::new();
        let mut straight_stream = Vec::new();

        loop {
            let peeked = peeking.try_peek_token();
            let taken = peeking.try_next_token();
            // Peek followed immediately by get yields the identical outcome
            prop_assert_eq!(&peeked, &taken);
            let done = matches!(&taken, Ok(token) if token.token_type == Kind::Eof);
            peeked_stream.push(taken);
            if done {
                break;
            }
        }
        loop {
            let taken = straight.try_next_token();
            let done = matches!(&taken, Ok(token) if token.token_type == Kind::Eof);
            straight_stream.push(taken);
            if done {
                break;
            }
        }

        prop_assert_eq!(peeked_stream, straight_stream);
    }
}
