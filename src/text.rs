//! Title normalization and word-position helpers shared by the filter,
//! clustering, dedup and impact stages.

use unicode_normalization::UnicodeNormalization;
use unicode_segmentation::UnicodeSegmentation;

/// Basic normalization: Unicode decomposition, lowercase, punctuation to
/// whitespace, single spacing. Possessives are folded so "Smith's" and
/// "Smith" compare equal.
pub fn normalize_title(text: &str) -> String {
    let without_apostrophes = text
        .replace("\u{2019}s", "")
        .replace("'s ", " ")
        .replace("'s", "")
        .replace(['\'', '\u{2019}'], "");

    without_apostrophes
        .nfkd()
        .filter(|c| c.is_ascii() || c.is_alphanumeric() || c.is_whitespace())
        .collect::<String>()
        .to_lowercase()
        .replace(|c: char| !c.is_alphanumeric() && !c.is_whitespace(), " ")
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
}

/// Lowercased Unicode words of `text`, in order
pub fn words(text: &str) -> Vec<String> {
    text.unicode_words().map(|w| w.to_lowercase()).collect()
}

/// Character offsets at which `needle` occurs in `haystack` as a whole word,
/// compared case-insensitively.
pub fn word_positions(haystack: &str, needle: &str) -> Vec<usize> {
    let needle = needle.trim().to_lowercase();
    if needle.is_empty() {
        return Vec::new();
    }

    let hay: Vec<char> = haystack.to_lowercase().chars().collect();
    let pat: Vec<char> = needle.chars().collect();
    let mut positions = Vec::new();

    if pat.len() > hay.len() {
        return positions;
    }

    for start in 0..=(hay.len() - pat.len()) {
        if hay[start..start + pat.len()] != pat[..] {
            continue;
        }
        let before_ok = start == 0 || !hay[start - 1].is_alphanumeric();
        let end = start + pat.len();
        let after_ok = end == hay.len() || !hay[end].is_alphanumeric();
        if before_ok && after_ok {
            positions.push(start);
        }
    }

    positions
}

/// True when `needle` appears in `haystack` as a whole word (case-insensitive)
pub fn contains_word(haystack: &str, needle: &str) -> bool {
    !word_positions(haystack, needle).is_empty()
}

/// Case-sensitive whole-word check, used for upper-case codes like "SC"
pub fn contains_exact_word(haystack: &str, needle: &str) -> bool {
    if needle.is_empty() {
        return false;
    }
    haystack.match_indices(needle).any(|(idx, _)| {
        let before_ok = haystack[..idx]
            .chars()
            .next_back()
            .map_or(true, |c| !c.is_alphanumeric());
        let after_ok = haystack[idx + needle.len()..]
            .chars()
            .next()
            .map_or(true, |c| !c.is_alphanumeric());
        before_ok && after_ok
    })
}

/// English ordinal for a district number ("1st", "2nd", "13th")
pub fn ordinal(n: u32) -> String {
    let suffix = match (n % 10, n % 100) {
        (_, 11..=13) => "th",
        (1, _) => "st",
        (2, _) => "nd",
        (3, _) => "rd",
        _ => "th",
    };
    format!("{}{}", n, suffix)
}
