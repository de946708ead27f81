//! URL slugs.
//!
//! Slugs keep Unicode letters and digits so Arabic names produce Arabic slugs;
//! there is no transliteration.

use regex::Regex;
use std::sync::LazyLock;

/// Anything that is not a letter, digit, whitespace or hyphen.
static DISALLOWED: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[^\p{L}\p{N}\s-]").unwrap());

static WHITESPACE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\s+").unwrap());

static HYPHENS: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"-{2,}").unwrap());

/// Turns display text into a slug.
///
/// Lowercases, spells `&` as "and", drops punctuation and combining marks,
/// joins words with single hyphens and trims hyphens from both ends. Blank
/// input gives an empty string, and applying the function twice is the same
/// as applying it once.
///
/// ```
/// use directory_rules::generate_slug;
///
/// assert_eq!(generate_slug("Arts & Sciences, Cairo!"), "arts-and-sciences-cairo");
/// assert_eq!(generate_slug("جامعة القاهرة"), "جامعة-القاهرة");
/// ```
pub fn generate_slug(text: &str) -> String {
    let lowered = text.to_lowercase().replace('&', " and ");
    let stripped = DISALLOWED.replace_all(&lowered, "");
    let hyphenated = WHITESPACE.replace_all(stripped.trim(), "-");
    let collapsed = HYPHENS.replace_all(&hyphenated, "-");
    collapsed.trim_matches('-').to_string()
}

/// Slug for a record: the explicit value if it is non-blank, otherwise one
/// derived from `source`. Either way the result is normalized.
pub fn resolve_slug(explicit: Option<&str>, source: &str) -> String {
    match explicit.map(str::trim).filter(|s| !s.is_empty()) {
        Some(slug) => generate_slug(slug),
        None => generate_slug(source),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_simple_name() {
        assert_eq!(generate_slug("Test"), "test");
        assert_eq!(generate_slug("Cairo University"), "cairo-university");
    }

    #[test]
    fn test_ampersand_becomes_and() {
        assert_eq!(generate_slug("Arts&Design"), "arts-and-design");
        assert_eq!(generate_slug("Arts & Design"), "arts-and-design");
    }

    #[test]
    fn test_punctuation_is_removed() {
        assert_eq!(
            generate_slug("  The American University (AUC) -- Cairo!! "),
            "the-american-university-auc-cairo"
        );
        assert_eq!(generate_slug("O'Brien's_School"), "obriensschool");
    }

    #[test]
    fn test_arabic_passes_through_without_diacritics() {
        assert_eq!(generate_slug("جامعة القاهرة"), "جامعة-القاهرة");
        assert_eq!(generate_slug("مَدْرَسَة"), "مدرسة");
    }

    #[test]
    fn test_blank_input_gives_empty_slug() {
        assert_eq!(generate_slug(""), "");
        assert_eq!(generate_slug("   "), "");
        assert_eq!(generate_slug("!!!"), "");
    }

    #[test]
    fn test_idempotent() {
        for input in [
            "Test",
            "Arts & Sciences, Cairo!",
            "جامعة القاهرة",
            "--Already-a-slug--",
            "MIXED   spacing\tand\nnewlines",
            "İstanbul Üniversitesi",
            "Ünïcödé & 123",
        ] {
            let once = generate_slug(input);
            assert_eq!(generate_slug(&once), once, "input: {input:?}");
        }
    }

    #[test]
    fn test_resolve_slug_prefers_explicit_value() {
        assert_eq!(resolve_slug(Some("My Custom Slug"), "Ignored"), "my-custom-slug");
        assert_eq!(resolve_slug(Some("   "), "Cairo University"), "cairo-university");
        assert_eq!(resolve_slug(None, "Cairo University"), "cairo-university");
    }
}
