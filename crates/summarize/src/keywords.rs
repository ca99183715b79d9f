//! Keyword relevance filter.
//!
//! Selects chunks likely relevant to cybersecurity by case-insensitive
//! substring match. Matching has no word-boundary requirement: "data"
//! matches inside "database".

/// Default cybersecurity keyword set.
pub const DEFAULT_KEYWORDS: &[&str] = &[
    "cyber",
    "security",
    "breach",
    "data breach",
    "data",
    "hack",
    "hacked",
    "incident",
    "ransom",
    "phish",
    "phishing",
    "vulnerability",
    "intrusion",
    "malware",
    "privacy",
    "incident response",
    "security incident",
    "cybersecurity",
    "security program",
];

/// A fixed, lowercased keyword set.
#[derive(Debug, Clone)]
pub struct KeywordFilter {
    keywords: Vec<String>,
}

impl Default for KeywordFilter {
    fn default() -> Self {
        Self::new(DEFAULT_KEYWORDS.iter().map(|k| k.to_string()))
    }
}

impl KeywordFilter {
    /// Build a filter from keywords; terms are lowercased, empty terms
    /// discarded.
    pub fn new(keywords: impl IntoIterator<Item = String>) -> Self {
        Self {
            keywords: keywords
                .into_iter()
                .map(|k| k.trim().to_lowercase())
                .filter(|k| !k.is_empty())
                .collect(),
        }
    }

    /// The default set extended with additional terms.
    pub fn with_extra(extra: impl IntoIterator<Item = String>) -> Self {
        Self::new(
            DEFAULT_KEYWORDS
                .iter()
                .map(|k| k.to_string())
                .chain(extra),
        )
    }

    /// Whether the text contains at least one keyword.
    pub fn matches(&self, text: &str) -> bool {
        let lower = text.to_lowercase();
        self.keywords.iter().any(|k| lower.contains(k))
    }

    /// Select matching chunks, preserving order.
    ///
    /// If nothing matches, the full input is returned unchanged and the
    /// pipeline summarizes the whole document rather than nothing.
    pub fn filter(&self, chunks: Vec<String>) -> Vec<String> {
        let selected: Vec<String> = chunks
            .iter()
            .filter(|c| self.matches(c))
            .cloned()
            .collect();

        if selected.is_empty() {
            tracing::info!("No keyword matches; falling back to the full chunk set");
            chunks
        } else {
            selected
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_matches_case_insensitive() {
        let filter = KeywordFilter::default();
        assert!(filter.matches("A material BREACH occurred"));
        assert!(filter.matches("our Cybersecurity program"));
        assert!(!filter.matches("revenue grew nine percent"));
    }

    #[test]
    fn test_matches_inside_words() {
        let filter = KeywordFilter::default();
        // "data" matches inside "database"
        assert!(filter.matches("the customer database"));
    }

    #[test]
    fn test_filter_preserves_order() {
        let filter = KeywordFilter::default();
        let chunks = vec![
            "a breach happened".to_string(),
            "nothing relevant".to_string(),
            "phishing attempt".to_string(),
        ];

        let selected = filter.filter(chunks);
        assert_eq!(
            selected,
            vec!["a breach happened".to_string(), "phishing attempt".to_string()]
        );
    }

    #[test]
    fn test_identity_fallback_when_nothing_matches() {
        let filter = KeywordFilter::default();
        let chunks = vec![
            "revenue grew".to_string(),
            "margins improved".to_string(),
        ];

        let selected = filter.filter(chunks.clone());
        assert_eq!(selected, chunks);
    }

    #[test]
    fn test_extra_keywords() {
        let filter = KeywordFilter::with_extra(vec!["zero-day".to_string()]);
        assert!(filter.matches("a zero-day exploit"));
        assert!(filter.matches("a breach"));
    }

    #[test]
    fn test_empty_terms_discarded() {
        let filter = KeywordFilter::new(vec!["".to_string(), "  ".to_string()]);
        assert!(!filter.matches("anything at all"));
    }
}
