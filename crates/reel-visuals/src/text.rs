//! Text normalization shared by keyword extraction, translation and scoring.
//!
//! Normalization maps every input char to exactly one output char, so char
//! offsets in normalized text are valid offsets in the original.

/// Lowercase a char and strip common Latin diacritics.
pub fn fold_char(c: char) -> char {
    let lower = c.to_lowercase().next().unwrap_or(c);
    match lower {
        'á' | 'à' | 'ä' | 'â' | 'ã' | 'å' => 'a',
        'é' | 'è' | 'ë' | 'ê' => 'e',
        'í' | 'ì' | 'ï' | 'î' => 'i',
        'ó' | 'ò' | 'ö' | 'ô' | 'õ' => 'o',
        'ú' | 'ù' | 'ü' | 'û' => 'u',
        'ñ' => 'n',
        'ç' => 'c',
        other => other,
    }
}

/// Case-fold, strip diacritics and replace punctuation with spaces.
pub fn normalize(text: &str) -> String {
    text.chars()
        .map(|c| {
            let folded = fold_char(c);
            if folded.is_alphanumeric() {
                folded
            } else {
                ' '
            }
        })
        .collect()
}

/// [`normalize`] with runs of whitespace collapsed and ends trimmed.
pub fn normalize_phrase(text: &str) -> String {
    normalize(text).split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Normalized text wrapped in single spaces, for whole-word `contains` checks.
pub fn padded(text: &str) -> String {
    format!(" {} ", normalize_phrase(text))
}

/// Whether `phrase` (already normalized) occurs as whole words in `padded_text`.
pub fn contains_phrase(padded_text: &str, phrase: &str) -> bool {
    !phrase.is_empty() && padded_text.contains(&format!(" {} ", phrase))
}
