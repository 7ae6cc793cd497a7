//! Fuzzy token-set matching between candidate answers and evidence text.
//!
//! Both strings are lowercased and split into deduplicated word sets. The
//! similarity is the best normalised Levenshtein ratio among three
//! reconstructions: the sorted intersection alone, and the intersection
//! extended with each side's leftover tokens. A candidate whose tokens all
//! appear somewhere in a longer snippet therefore scores 100 regardless of
//! word order or surrounding text.

use std::collections::BTreeSet;

use strsim::normalized_levenshtein;

/// Similarity above which a result counts as weak support for a candidate
/// (exclusive).
pub const WEAK_MATCH: u8 = 50;

/// Similarity at or above which a result counts as a near-exact match of a
/// candidate (inclusive).
pub const STRONG_MATCH: u8 = 75;

/// Token-set similarity of two strings, in `[0, 100]`.
///
/// Tokenisation is case-insensitive and splits on any non-alphanumeric
/// character, so punctuation and word order never affect the score. If
/// either string has no tokens at all the similarity is 0.
pub fn token_set_ratio(a: &str, b: &str) -> u8 {
    let tokens_a = tokenize(a);
    let tokens_b = tokenize(b);
    if tokens_a.is_empty() || tokens_b.is_empty() {
        return 0;
    }

    let common: Vec<&str> = tokens_a.intersection(&tokens_b).map(String::as_str).collect();
    let only_a: Vec<&str> = tokens_a.difference(&tokens_b).map(String::as_str).collect();
    let only_b: Vec<&str> = tokens_b.difference(&tokens_a).map(String::as_str).collect();

    let base = common.join(" ");
    let with_rest_a = join_tokens(&common, &only_a);
    let with_rest_b = join_tokens(&common, &only_b);

    let best = normalized_levenshtein(&base, &with_rest_a)
        .max(normalized_levenshtein(&base, &with_rest_b))
        .max(normalized_levenshtein(&with_rest_a, &with_rest_b));

    (best * 100.0).round() as u8
}

/// Lowercased, deduplicated word set. `BTreeSet` keeps tokens sorted so the
/// reconstructed strings are canonical.
fn tokenize(s: &str) -> BTreeSet<String> {
    s.to_lowercase()
        .split(|c: char| !c.is_alphanumeric())
        .filter(|token| !token.is_empty())
        .map(str::to_owned)
        .collect()
}

fn join_tokens(head: &[&str], tail: &[&str]) -> String {
    head.iter().chain(tail.iter()).copied().collect::<Vec<_>>().join(" ")
}
