//! Text normalization for matching user messages.

use unicode_normalization::char::is_combining_mark;
use unicode_normalization::UnicodeNormalization;

/// Lowercases `s`, strips diacritics and trims surrounding whitespace.
///
/// Accented letters are decomposed (NFD) and their combining marks dropped,
/// so `"Março"` and `"marco"` compare equal.
pub fn normalize_text(s: &str) -> String {
    s.to_lowercase()
        .nfd()
        .filter(|c| !is_combining_mark(*c))
        .collect::<String>()
        .trim()
        .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_strips_accents_and_case() {
        assert_eq!(normalize_text("Março"), "marco");
        assert_eq!(normalize_text("ÁGUA E LUZ"), "agua e luz");
        assert_eq!(normalize_text("Elétrica"), "eletrica");
    }

    #[test]
    fn test_trims_whitespace() {
        assert_eq!(normalize_text("  Casa Verde \n"), "casa verde");
    }

    #[test]
    fn test_empty_input() {
        assert_eq!(normalize_text(""), "");
        assert_eq!(normalize_text("   "), "");
    }

    #[test]
    fn test_plain_ascii_unchanged() {
        assert_eq!(normalize_text("gastos de setembro"), "gastos de setembro");
    }
}
