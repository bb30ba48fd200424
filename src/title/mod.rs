//! Article title normalization and namespace classification
//!
//! Titles are the graph's node keys: two raw strings refer to the same article
//! iff they normalize to the same `Title`. Normalization collapses whitespace
//! runs into the `_` separator Wikipedia uses in page slugs, so cache keys stay
//! stable regardless of how a title was typed or received.

use std::collections::HashSet;
use std::fmt;

/// Separator used between words in a normalized title
const SEPARATOR: char = '_';

/// Namespace prefixes whose pages are not articles
///
/// Each subject namespace is listed with its "talk" discussion variant, in
/// normalized form. Links into any of these are dropped before they reach
/// the cache or the search.
const SPECIAL_NAMESPACES: &[&str] = &[
    "User",
    "User_talk",
    "Wikipedia",
    "Wikipedia_talk",
    "File",
    "File_talk",
    "MediaWiki",
    "MediaWiki_talk",
    "Template",
    "Template_talk",
    "Help",
    "Help_talk",
    "Category",
    "Category_talk",
    "Portal",
    "Portal_talk",
    "Draft",
    "Draft_talk",
    "TimedText",
    "TimedText_talk",
    "Module",
    "Module_talk",
];

/// A normalized article title
///
/// Construct with [`Title::normalize`]; equality and hashing on the normalized
/// form decide article identity everywhere in the crate.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Title(String);

/// The set of article titles one article links out to
///
/// Unordered and deduplicated. Self-references are permitted.
pub type LinkSet = HashSet<Title>;

impl Title {
    /// Normalizes a raw title into a stable cache key
    ///
    /// Runs of whitespace and `_` collapse into a single `_`; leading and
    /// trailing separators are trimmed. Idempotent: normalizing an already
    /// normalized title is a no-op.
    ///
    /// # Example
    ///
    /// ```
    /// use wikipath::title::Title;
    ///
    /// let title = Title::normalize("  Major   Arcana ");
    /// assert_eq!(title.as_str(), "Major_Arcana");
    /// assert_eq!(Title::normalize(title.as_str()), title);
    /// ```
    pub fn normalize(raw: &str) -> Self {
        let mut normalized = String::with_capacity(raw.len());
        let mut pending_separator = false;

        for c in raw.chars() {
            if c.is_whitespace() || c == SEPARATOR {
                // Leading separators never set the flag because nothing has
                // been pushed yet
                pending_separator = !normalized.is_empty();
            } else {
                if pending_separator {
                    normalized.push(SEPARATOR);
                    pending_separator = false;
                }
                normalized.push(c);
            }
        }

        Title(normalized)
    }

    /// Returns the normalized title string
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Returns true if this title belongs to a non-article namespace
    ///
    /// Matches the fixed namespace list case-sensitively at the start of the
    /// string, up to the `:` delimiter. `"Userland:X"` is not special: the
    /// prefix must end exactly at the colon.
    pub fn is_special_namespace(&self) -> bool {
        SPECIAL_NAMESPACES.iter().any(|ns| self.strip_namespace(ns))
    }

    fn strip_namespace(&self, prefix: &str) -> bool {
        self.0
            .strip_prefix(prefix)
            .map(|rest| rest.starts_with(':'))
            .unwrap_or(false)
    }
}

impl fmt::Display for Title {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<Title> for String {
    fn from(title: Title) -> Self {
        title.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_collapse_whitespace_runs() {
        assert_eq!(Title::normalize("Major   Arcana").as_str(), "Major_Arcana");
        assert_eq!(Title::normalize("a \t\n b").as_str(), "a_b");
    }

    #[test]
    fn test_trim_leading_and_trailing() {
        assert_eq!(Title::normalize("  Rust  ").as_str(), "Rust");
        assert_eq!(Title::normalize("__Rust__").as_str(), "Rust");
    }

    #[test]
    fn test_mixed_separators_collapse() {
        assert_eq!(Title::normalize("a _ b").as_str(), "a_b");
        assert_eq!(Title::normalize("a___b").as_str(), "a_b");
    }

    #[test]
    fn test_normalize_is_idempotent() {
        let inputs = [
            "Major Arcana",
            "  spaced   out  title ",
            "Already_Normalized",
            "a _ b _ c",
            "",
            "   ",
            "Category: Something odd ",
        ];

        for input in inputs {
            let once = Title::normalize(input);
            let twice = Title::normalize(once.as_str());
            assert_eq!(once, twice, "not idempotent for {:?}", input);
        }
    }

    #[test]
    fn test_empty_and_blank_normalize_to_empty() {
        assert_eq!(Title::normalize("").as_str(), "");
        assert_eq!(Title::normalize(" \t ").as_str(), "");
    }

    #[test]
    fn test_equal_titles_after_normalization() {
        assert_eq!(Title::normalize("A  B"), Title::normalize("A_B"));
        assert_eq!(Title::normalize(" A B "), Title::normalize("A B"));
    }

    #[test]
    fn test_all_special_namespaces_detected() {
        for ns in SPECIAL_NAMESPACES {
            let title = Title::normalize(&format!("{}:anything", ns));
            assert!(title.is_special_namespace(), "{} not detected", ns);
        }
    }

    #[test]
    fn test_talk_variant_with_space_detected_after_normalization() {
        assert!(Title::normalize("User talk:Someone").is_special_namespace());
        assert!(Title::normalize("Category talk: Tarot").is_special_namespace());
    }

    #[test]
    fn test_plain_titles_are_not_special() {
        assert!(!Title::normalize("Science fiction").is_special_namespace());
        assert!(!Title::normalize("Rust_(programming_language)").is_special_namespace());
    }

    #[test]
    fn test_namespace_match_is_case_sensitive() {
        assert!(!Title::normalize("category:Tarot").is_special_namespace());
        assert!(!Title::normalize("HELP:Contents").is_special_namespace());
        assert!(Title::normalize("Help:Contents").is_special_namespace());
    }

    #[test]
    fn test_prefix_must_end_at_colon() {
        assert!(!Title::normalize("Userland:X").is_special_namespace());
        assert!(!Title::normalize("Filesystem").is_special_namespace());
        assert!(!Title::normalize("User").is_special_namespace());
    }

    #[test]
    fn test_colon_in_plain_title_is_not_special() {
        assert!(!Title::normalize("Dune: Part Two").is_special_namespace());
    }
}
