//! Slug rules for case URLs.
//!
//! A slug is `{category keyword}-{cleaned title}-case`, where the cleaned
//! title keeps alphanumeric characters of any script, joins words with
//! hyphens and is truncated to [`MAX_TITLE_PART`] characters. Uniqueness
//! is handled by the case service, which probes numbered variants.

use crate::models::Category;

/// Longest cleaned-title segment carried into a slug, in characters.
pub const MAX_TITLE_PART: usize = 50;

/// Lowercases and hyphenates a title into its slug segment.
///
/// Characters that are neither alphanumeric nor whitespace are dropped,
/// whitespace runs collapse to a single hyphen and the result is trimmed
/// of leading/trailing hyphens before truncation.
pub fn slugify(title: &str) -> String {
    let mut out = String::with_capacity(title.len());
    let mut pending_hyphen = false;

    for ch in title.to_lowercase().chars() {
        if ch.is_alphanumeric() {
            if pending_hyphen && !out.is_empty() {
                out.push('-');
            }
            pending_hyphen = false;
            out.push(ch);
        } else if ch.is_whitespace() {
            pending_hyphen = true;
        }
        // anything else (punctuation, symbols) is dropped without
        // acting as a word boundary
    }

    if out.chars().count() > MAX_TITLE_PART {
        out = out.chars().take(MAX_TITLE_PART).collect();
        while out.ends_with('-') {
            out.pop();
        }
    }
    out
}

/// Builds the base slug for a new case: `{keyword}-{title}-case`.
///
/// Titles that clean down to nothing (all punctuation) fall back to
/// `{keyword}-case`.
pub fn base_slug(title: &str, category: Category) -> String {
    let cleaned = slugify(title);
    if cleaned.is_empty() {
        format!("{}-case", category.slug_keyword())
    } else {
        format!("{}-{}-case", category.slug_keyword(), cleaned)
    }
}

/// The n-th fallback when a base slug is already taken.
pub fn numbered(base: &str, n: u32) -> String {
    format!("{base}-{n}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hyphenates_and_lowercases() {
        assert_eq!(slugify("Fake Bank Phone Call"), "fake-bank-phone-call");
        assert_eq!(slugify("  spaced   out  "), "spaced-out");
    }

    #[test]
    fn drops_punctuation_without_splitting_words() {
        assert_eq!(slugify("don't click!"), "dont-click");
        assert_eq!(slugify("$$$ free money $$$"), "free-money");
    }

    #[test]
    fn keeps_non_latin_scripts() {
        assert_eq!(slugify("은행 사칭 전화"), "은행-사칭-전화");
    }

    #[test]
    fn truncates_to_fifty_characters() {
        let long = "word ".repeat(30);
        let slug = slugify(&long);
        assert!(slug.chars().count() <= MAX_TITLE_PART);
        assert!(!slug.ends_with('-'));
    }

    #[test]
    fn base_slug_prefixes_category_keyword() {
        assert_eq!(
            base_slug("Fake delivery text", Category::Smishing),
            "smishing-fake-delivery-text-case"
        );
        assert_eq!(
            base_slug("Instagram giveaway", Category::SocialMedia),
            "social-media-phishing-instagram-giveaway-case"
        );
    }

    #[test]
    fn base_slug_survives_empty_titles() {
        assert_eq!(base_slug("!!!", Category::Other), "phishing-scam-case");
    }

    #[test]
    fn numbered_variants() {
        assert_eq!(numbered("smishing-a-case", 2), "smishing-a-case-2");
    }
}
