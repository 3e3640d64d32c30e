//! Individual normalization rules
//!
//! Each rule is a pure function over `&str`. Period positions are byte
//! offsets; `.` and ASCII digits are single bytes so every offset produced
//! here is a char boundary.

use once_cell::sync::Lazy;
use regex::Regex;

/// ASCII digits, optional whitespace, a period, optional whitespace, ASCII digits, at the end
static ARTIFACT_SUFFIX: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[0-9]+\s*\.\s*[0-9]+\s*$").unwrap());

/// Artifact-suffix rule.
///
/// Removes trailing `12. 3`-style leakage, repeatedly, until the text no
/// longer ends with one. The result is trimmed at the end.
pub fn strip_artifact_suffix(text: &str) -> &str {
    let mut current = text.trim_end();

    while let Some(artifact) = ARTIFACT_SUFFIX.find(current) {
        current = current[..artifact.start()].trim_end();
    }

    current
}

/// Boundary-acceptance rule.
///
/// The period at `index` ends a sentence when it is the last character or is
/// immediately followed by whitespace. A period followed by anything else
/// (`564.2`, `e.g`) is rejected.
pub fn is_sentence_boundary(text: &str, index: usize) -> bool {
    text[index + 1..]
        .chars()
        .next()
        .is_none_or(char::is_whitespace)
}

/// Numeric-token rule.
///
/// Returns the start of the numeric token preceding the period at `index`
/// (whitespace in between is ignored) when that token stands alone: it opens
/// the text or follows a previous sentence-ending period. A stray `5.` after a
/// finished sentence is list-numbering leakage, not the end of an answer.
pub fn standalone_numeric_token_start(text: &str, index: usize) -> Option<usize> {
    let before = text[..index].trim_end();
    let digits = before.bytes().rev().take_while(u8::is_ascii_digit).count();

    if digits == 0 {
        return None;
    }

    let start = before.len() - digits;
    let preceding = &before[..start];

    match preceding.chars().last() {
        None => Some(start),
        Some(c) if c.is_whitespace() => {
            let prior = preceding.trim_end();
            (prior.is_empty() || prior.ends_with('.')).then_some(start)
        }
        Some(_) => None,
    }
}

/// Find the last qualifying sentence boundary and cut the text after it.
///
/// Periods are tried from the end backwards. Rejected abbreviation periods
/// are skipped; a rejected standalone numeric token prunes everything from
/// the token onwards. Returns `None` when no period qualifies.
pub fn truncate_at_sentence_boundary(text: &str) -> Option<&str> {
    let mut limit = text.len();

    while let Some(index) = text[..limit].rfind('.') {
        if !is_sentence_boundary(text, index) {
            limit = index;
            continue;
        }

        if let Some(token_start) = standalone_numeric_token_start(text, index) {
            limit = token_start;
            continue;
        }

        return Some(&text[..=index]);
    }

    None
}
