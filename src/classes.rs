//! Character classification predicates and the intrinsic class table
//!
//! Every rule expression can reference a handful of built-in single-character
//! classes with the same `${...}` syntax used for user rules: `${digit}`,
//! `${letter}`, `${uppercase}`, `${lowercase}`, `${symbol}` and `${control}`.
//! The predicates live here; the generator pre-registers them into every
//! environment before any user rule is added.

use once_cell::sync::Lazy;

/// A single-character class test, as carried by intrinsic rules.
pub type CharPredicate = fn(char) -> bool;

/// Decimal digit: `0` through `9`.
pub fn is_digit(ch: char) -> bool {
    ch.is_ascii_digit()
}

/// Any alphabetic character (Unicode category L).
pub fn is_letter(ch: char) -> bool {
    ch.is_alphabetic()
}

/// Uppercase letter.
pub fn is_uppercase(ch: char) -> bool {
    ch.is_uppercase()
}

/// Lowercase letter.
pub fn is_lowercase(ch: char) -> bool {
    ch.is_lowercase()
}

/// Printable symbol: not alphanumeric, not whitespace, not a control
/// character. Covers punctuation and operator characters like `+` or `{`.
pub fn is_symbol(ch: char) -> bool {
    !ch.is_alphanumeric() && !ch.is_whitespace() && !ch.is_control()
}

/// Control character (Unicode category Cc).
pub fn is_control(ch: char) -> bool {
    ch.is_control()
}

/// The intrinsic classes, in registration order.
pub static INTRINSICS: Lazy<Vec<(&'static str, CharPredicate)>> = Lazy::new(|| {
    vec![
        ("digit", is_digit as CharPredicate),
        ("letter", is_letter),
        ("uppercase", is_uppercase),
        ("lowercase", is_lowercase),
        ("symbol", is_symbol),
        ("control", is_control),
    ]
});
