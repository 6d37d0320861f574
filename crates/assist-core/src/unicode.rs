//! Character-level Unicode classification for Japanese text.

/// CJK ideograph check used to decide whether the user is typing kanji.
///
/// Covers the unified block, extension A and extension B, plus the
/// iteration mark 々 which only ever follows a kanji.
pub fn is_kanji(c: char) -> bool {
    ('\u{4E00}'..='\u{9FFF}').contains(&c)
        || ('\u{3400}'..='\u{4DBF}').contains(&c)
        || ('\u{20000}'..='\u{2A6DF}').contains(&c)
        || c == '々'
}

pub fn contains_kanji(s: &str) -> bool {
    s.chars().any(is_kanji)
}

/// Case-insensitive comparison of two characters.
pub(crate) fn eq_ignore_case(a: char, b: char) -> bool {
    a == b || a.to_lowercase().eq(b.to_lowercase())
}
