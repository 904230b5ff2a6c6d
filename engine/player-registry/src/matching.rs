//! Name normalization and fuzzy matching
//!
//! Every engine that has to reconcile a player by name goes through this
//! module, so a lookup resolves the same way everywhere. Precedence is:
//!
//! 1. exact match on the normalized name
//! 2. match after dropping generational suffixes (Jr., Sr., II, III, IV, V)
//!    from both sides
//! 3. bounded partial match: whole-word containment, first-initial plus
//!    surname, or a one-letter typo in a long first name when the surnames
//!    agree exactly, accepted only at or above [`PARTIAL_MATCH_THRESHOLD`]
//!
//! Near-spelled names of different players ("James" / "Jameson",
//! "Johnson" / "Johnston") never reach the threshold.

use serde::{Deserialize, Serialize};
use strsim::levenshtein;

/// Generational suffixes ignored by the suffix-normalized pass
pub const NAME_SUFFIXES: [&str; 6] = ["jr", "sr", "ii", "iii", "iv", "v"];

/// Minimum similarity for a partial match to count
pub const PARTIAL_MATCH_THRESHOLD: f64 = 0.8;

/// Names shorter than this never take part in partial matching
const MIN_PARTIAL_LEN: usize = 4;

const MULTI_WORD_CONTAINMENT_SCORE: f64 = 0.95;
const INITIAL_AND_SURNAME_SCORE: f64 = 0.9;
const SINGLE_WORD_CONTAINMENT_SCORE: f64 = 0.8;
const FIRST_NAME_TYPO_SCORE: f64 = 0.85;

/// First names shorter than this must match exactly
const MIN_TYPO_TOKEN_LEN: usize = 6;

/// Which precedence level produced a match
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub enum MatchKind {
    Exact,
    Suffix,
    Partial,
}

/// Outcome of a successful lookup
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct NameMatch {
    /// Index of the matched entry in the searched collection
    pub index: usize,
    pub kind: MatchKind,
    /// 1.0 for exact and suffix matches
    pub similarity: f64,
}

/// Lowercase, drop punctuation, treat hyphens as spaces, collapse whitespace.
///
/// "Amon-Ra St. Brown" -> "amon ra st brown", "D.J. Moore" -> "dj moore"
pub fn normalize_name(name: &str) -> String {
    let cleaned: String = name
        .chars()
        .filter_map(|c| {
            if c.is_alphanumeric() {
                Some(c.to_lowercase().next().unwrap_or(c))
            } else if c.is_whitespace() || c == '-' || c == '_' {
                Some(' ')
            } else {
                None
            }
        })
        .collect();

    cleaned.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Drop a trailing generational suffix from an already-normalized name
pub fn strip_suffix(normalized: &str) -> String {
    let tokens: Vec<&str> = normalized.split_whitespace().collect();
    match tokens.split_last() {
        Some((last, rest)) if !rest.is_empty() && NAME_SUFFIXES.contains(last) => rest.join(" "),
        _ => tokens.join(" "),
    }
}

/// Similarity of two suffix-stripped names for the partial pass, in [0, 1]
pub fn partial_similarity(a: &str, b: &str) -> f64 {
    if a.len() < MIN_PARTIAL_LEN || b.len() < MIN_PARTIAL_LEN {
        return 0.0;
    }

    let a_tokens: Vec<&str> = a.split_whitespace().collect();
    let b_tokens: Vec<&str> = b.split_whitespace().collect();
    let (shorter, longer) =
        if a_tokens.len() <= b_tokens.len() { (&a_tokens, &b_tokens) } else { (&b_tokens, &a_tokens) };

    let mut score: f64 = 0.0;

    if contains_words(longer, shorter) {
        let containment = if shorter.len() >= 2 {
            MULTI_WORD_CONTAINMENT_SCORE
        } else if shorter[0].len() >= MIN_PARTIAL_LEN {
            SINGLE_WORD_CONTAINMENT_SCORE
        } else {
            0.0
        };
        score = score.max(containment);
    }

    if initial_and_surname_agree(&a_tokens, &b_tokens) {
        score = score.max(INITIAL_AND_SURNAME_SCORE);
    }

    if first_name_typo(&a_tokens, &b_tokens) {
        score = score.max(FIRST_NAME_TYPO_SCORE);
    }

    score
}

/// `needle` appears in `haystack` as a contiguous run of whole words
fn contains_words(haystack: &[&str], needle: &[&str]) -> bool {
    !needle.is_empty() && haystack.windows(needle.len()).any(|window| window == needle)
}

/// "j allen" / "josh allen": same surname, one side abbreviates the first name
fn initial_and_surname_agree(a: &[&str], b: &[&str]) -> bool {
    if a.len() != 2 || b.len() != 2 || a[1] != b[1] || a[1].len() < 2 {
        return false;
    }
    let (first_a, first_b) = (a[0], b[0]);
    if first_a == first_b {
        return false;
    }
    let abbreviated = first_a.len() == 1 || first_b.len() == 1;
    abbreviated && first_a.chars().next() == first_b.chars().next()
}

/// "jonathon taylor" / "jonathan taylor": identical surname, long first
/// names one substitution apart. Insertions change the first name's length
/// and are rejected, so "james" never becomes "jameson".
fn first_name_typo(a: &[&str], b: &[&str]) -> bool {
    if a.len() != 2 || b.len() != 2 || a[1] != b[1] {
        return false;
    }
    let (first_a, first_b) = (a[0], b[0]);
    first_a != first_b
        && first_a.len() == first_b.len()
        && first_a.len() >= MIN_TYPO_TOKEN_LEN
        && levenshtein(first_a, first_b) == 1
}
