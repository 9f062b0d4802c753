//! In-process approximations of full-text matching and trigram similarity.
//!
//! Matching treats each token as a case-insensitive word prefix, standing
//! in for stemmed tsquery matching. Similarity follows `pg_trgm`: words
//! are padded with two leading blanks and one trailing blank, and the
//! score is shared trigrams over the union of trigrams.

use std::collections::HashSet;

fn words(text: &str) -> impl Iterator<Item = String> + '_ {
    text.split(|ch: char| !ch.is_alphanumeric())
        .filter(|word| !word.is_empty())
        .map(str::to_lowercase)
}

/// Returns `true` when every token prefixes some word of the haystack.
pub(super) fn text_matches(tokens: &[String], haystack: &str) -> bool {
    if tokens.is_empty() {
        return false;
    }
    let haystack_words: Vec<String> = words(haystack).collect();
    tokens.iter().all(|token| {
        let needle = token.to_lowercase();
        haystack_words.iter().any(|word| word.starts_with(&needle))
    })
}

/// Counts haystack words prefixed by any token.
pub(super) fn text_rank(tokens: &[String], haystack: &str) -> usize {
    let needles: Vec<String> = tokens.iter().map(|token| token.to_lowercase()).collect();
    words(haystack)
        .filter(|word| needles.iter().any(|needle| word.starts_with(needle.as_str())))
        .count()
}

fn trigrams(text: &str) -> HashSet<[char; 3]> {
    let mut set = HashSet::new();
    for word in words(text) {
        let padded: Vec<char> = "  "
            .chars()
            .chain(word.chars())
            .chain(std::iter::once(' '))
            .collect();
        for window in padded.windows(3) {
            if let &[first, second, third] = window {
                set.insert([first, second, third]);
            }
        }
    }
    set
}

/// Returns the trigram similarity of two strings, from 0 to 1.
#[expect(
    clippy::cast_precision_loss,
    clippy::float_arithmetic,
    reason = "trigram set sizes are tiny and the score is only compared"
)]
pub(super) fn similarity(left: &str, right: &str) -> f64 {
    let left_trigrams = trigrams(left);
    let right_trigrams = trigrams(right);
    let union = left_trigrams.union(&right_trigrams).count();
    if union == 0 {
        return 0.0;
    }
    let shared = left_trigrams.intersection(&right_trigrams).count();
    shared as f64 / union as f64
}
