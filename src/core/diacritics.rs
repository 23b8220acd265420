//! Workaround for accented letters the renderer's font draws incorrectly.

use once_cell::sync::Lazy;

/// Letters the renderer mishandles, in lowercase form.
pub const PROBLEM_CHARS: [char; 11] = ['ě', 'š', 'č', 'ř', 'ž', 'ý', 'á', 'í', 'é', 'ú', 'ů'];

static UPPERCASE_PROBLEM_CHARS: Lazy<Vec<char>> = Lazy::new(|| {
    PROBLEM_CHARS
        .iter()
        .flat_map(|ch| ch.to_uppercase())
        .collect()
});

pub fn is_problem_char(ch: char) -> bool {
    PROBLEM_CHARS.contains(&ch)
}

fn is_uppercase_problem_char(ch: char) -> bool {
    UPPERCASE_PROBLEM_CHARS.contains(&ch)
}

/// Rewrites `text` so the renderer can draw it.
///
/// Uppercase problem letters are lowercased wherever they appear, and a `.` is appended when
/// the result ends in a problem letter.
#[allow(clippy::if_same_then_else)]
pub fn repair_diacritics(text: &str) -> String {
    if text.is_empty() {
        return String::new();
    }

    let mut repaired = String::with_capacity(text.len() + 1);
    for (index, ch) in text.chars().enumerate() {
        if !is_uppercase_problem_char(ch) {
            repaired.push(ch);
            continue;
        }

        // The leading letter gets the same treatment as the rest.
        if index == 0 {
            repaired.extend(ch.to_lowercase());
        } else {
            repaired.extend(ch.to_lowercase());
        }
    }

    if repaired.chars().next_back().is_some_and(is_problem_char) {
        repaired.push('.');
    }

    repaired
}
