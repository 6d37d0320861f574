//! Inline completion ("shadow text") derivation.

use unicode_width::UnicodeWidthStr;

use crate::unicode::eq_ignore_case;

/// Length in chars of the longest suffix of `typed` that is also a prefix of
/// `candidate`, compared case-insensitively.
pub fn typed_overlap(typed: &str, candidate: &str) -> usize {
    let typed: Vec<char> = typed.chars().collect();
    let candidate: Vec<char> = candidate.chars().collect();
    let max = typed.len().min(candidate.len());
    (1..=max)
        .rev()
        .find(|&n| {
            typed[typed.len() - n..]
                .iter()
                .zip(&candidate[..n])
                .all(|(&a, &b)| eq_ignore_case(a, b))
        })
        .unwrap_or(0)
}

/// The literal input followed by the not-yet-typed tail of `candidate`.
///
/// Empty when nothing of the candidate has been typed yet.
pub fn shadow_text(typed: &str, candidate: &str) -> String {
    let n = typed_overlap(typed, candidate);
    if n == 0 {
        return String::new();
    }
    let mut out = String::with_capacity(typed.len() + candidate.len());
    out.push_str(typed);
    out.extend(candidate.chars().skip(n));
    out
}

/// Whether `text` fits into `columns` terminal/display cells. Wide (CJK)
/// characters count as two.
pub fn fits_width(text: &str, columns: usize) -> bool {
    text.width() <= columns
}
