//! Script classification for watermark text.
//!
//! The watermark's sizing and anchor constants are tuned for one script;
//! text containing code points from a designated alternate-script block needs
//! different layout metrics. Classification is a pure scan over the text's
//! code points against configurable inclusive ranges (see
//! `ScriptProfile::ranges`), so additional scripts can be supported without
//! touching the sizing algorithm.

/// Returns true if any code point of `text` falls inside one of the
/// inclusive `ranges`.
pub fn contains_script(text: &str, ranges: &[(u32, u32)]) -> bool {
    text.chars().any(|c| {
        let cp = c as u32;
        ranges.iter().any(|&(lo, hi)| cp >= lo && cp <= hi)
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constants::DEVANAGARI_BLOCK;

    // Test: all-standard text classifies false
    #[test]
    fn test_latin_text_is_not_alternate() {
        assert!(!contains_script("SAMPLE watermark 123", &[DEVANAGARI_BLOCK]));
    }

    #[test]
    fn test_devanagari_text_is_alternate() {
        assert!(contains_script("नमस्ते", &[DEVANAGARI_BLOCK]));
    }

    // Test: a single alternate code point flips the result regardless of
    // position
    #[test]
    fn test_mixed_text_is_alternate() {
        assert!(contains_script("Sample न", &[DEVANAGARI_BLOCK]));
        assert!(contains_script("न Sample", &[DEVANAGARI_BLOCK]));
        assert!(contains_script("Sam न ple", &[DEVANAGARI_BLOCK]));
    }

    #[test]
    fn test_empty_ranges_never_match() {
        assert!(!contains_script("नमस्ते", &[]));
    }

    #[test]
    fn test_range_bounds_are_inclusive() {
        let range = [(0x0900, 0x097F)];
        assert!(contains_script("\u{0900}", &range));
        assert!(contains_script("\u{097F}", &range));
        assert!(!contains_script("\u{08FF}", &range));
        assert!(!contains_script("\u{0980}", &range));
    }

    #[test]
    fn test_multiple_ranges() {
        // Devanagari plus Bengali
        let ranges = [(0x0900, 0x097F), (0x0980, 0x09FF)];
        assert!(contains_script("\u{09A4}", &ranges));
        assert!(contains_script("\u{0915}", &ranges));
        assert!(!contains_script("abc", &ranges));
    }
}
