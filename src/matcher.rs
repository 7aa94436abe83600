//! Backtracking match-set computation
//!
//! [`match_set`] answers, for one node and one remaining-input slice, the
//! set of *every* prefix of the slice the node accepts — not just the
//! longest. Intermediate layers need the full set: a concatenation must try
//! every split point between its children, and a repetition must expose every
//! depth it reached, because a shorter partial match may be the one that lets
//! an enclosing pattern continue. Only the scanner, at the very top, reduces
//! a rule's set to its longest member.
//!
//! A prefix of the remainder is identified by its byte length, so the set is
//! a `BTreeSet<usize>` rather than a set of strings; every length falls on a
//! char boundary by construction.
//!
//! This is brute-force backtracking, and deliberately so: a rule set with
//! deeply nested repetitions over empty-matching inners, or alternations
//! with many overlapping branches, can make one call exponential in the
//! number of repetition steps. For the small token-level rule sets this
//! crate targets that cost is accepted in exchange for the simple,
//! obviously-correct exploration.

use std::collections::BTreeSet;

use crate::ast::{Environment, Modifier, Node};

/// Compute the byte lengths of all prefixes of `remainder` accepted by
/// `node`, resolving `${name}` references against `env`.
///
/// A reference to a name absent from `env` yields the empty set — the match
/// path fails softly so sibling alternatives still get their chance. This is
/// what makes forward and mutual rule references work; it also means a typo
/// in a reference silently never matches rather than erroring.
pub fn match_set<T>(node: &Node, remainder: &str, env: &Environment<T>) -> BTreeSet<usize> {
    match node {
        Node::Literal(ch) => {
            let mut set = BTreeSet::new();
            if remainder.chars().next() == Some(*ch) {
                set.insert(ch.len_utf8());
            }
            set
        }
        Node::Intrinsic(_, predicate) => {
            let mut set = BTreeSet::new();
            if let Some(first) = remainder.chars().next() {
                if predicate(first) {
                    set.insert(first.len_utf8());
                }
            }
            set
        }
        Node::Variable(name) => match env.get(name) {
            Some(rule) => match_set(&rule.node, remainder, env),
            None => BTreeSet::new(),
        },
        Node::Either(children) => {
            let mut set = BTreeSet::new();
            for child in children {
                set.extend(match_set(child, remainder, env));
            }
            set
        }
        Node::Concatenation(children) => {
            let mut working = BTreeSet::from([0]);
            for child in children {
                let mut extended = BTreeSet::new();
                for prefix in &working {
                    for len in match_set(child, &remainder[*prefix..], env) {
                        extended.insert(prefix + len);
                    }
                }
                if extended.is_empty() {
                    return extended;
                }
                working = extended;
            }
            working
        }
        Node::Grouping(inner, Modifier::None) => match_set(inner, remainder, env),
        Node::Grouping(inner, modifier) => repeat(inner, *modifier, remainder, env),
    }
}

/// Reduce a match set to the length of its longest member.
pub fn longest(set: &BTreeSet<usize>) -> Option<usize> {
    set.iter().next_back().copied()
}

/// Repetition matching for `*` and `+` groups: grow the set of accepted
/// repetition extents to a fixed point, keeping every depth reached.
///
/// Only strictly-lengthening extensions enter the set, and the loop stops
/// once a full pass adds no new length. An inner pattern that can match the
/// empty string therefore cannot diverge: its zero-length "extensions" are
/// never treated as growth.
fn repeat<T>(
    inner: &Node,
    modifier: Modifier,
    remainder: &str,
    env: &Environment<T>,
) -> BTreeSet<usize> {
    let mut set = match_set(inner, remainder, env);

    if set.is_empty() {
        if modifier == Modifier::ZeroOrMore {
            set.insert(0);
        }
        return set;
    }

    loop {
        let mut grew = false;
        let snapshot: Vec<usize> = set.iter().copied().collect();
        for matched in snapshot {
            if matched == remainder.len() {
                continue;
            }
            for extension in match_set(inner, &remainder[matched..], env) {
                if extension > 0 && set.insert(matched + extension) {
                    grew = true;
                }
            }
        }
        if !grew {
            break;
        }
    }

    if modifier == Modifier::ZeroOrMore {
        set.insert(0);
    }
    set
}
