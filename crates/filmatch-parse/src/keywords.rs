//! Lightweight keyword extraction for collaborators that need metadata
//! about a raw string without running full pair scoring.

use serde::{Deserialize, Serialize};

use crate::keyword;
use crate::normalize::normalize;

/// Longest tokens are the likeliest title words; cap how many we report.
const MAX_TITLE_KEYWORDS: usize = 5;

/// Tokens at or above this length are treated as title keywords.
const TITLE_KEYWORD_MIN_LEN: usize = 4;

/// Classified keywords and metadata extracted from one raw string.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Keywords {
    /// Likely title words, longest first, at most `MAX_TITLE_KEYWORDS`.
    pub title_keywords: Vec<String>,
    /// Short auxiliary tokens in normalization order.
    pub other_keywords: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub year: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub quality: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub language: Option<String>,
    /// Total token count after normalization.
    pub token_count: usize,
    /// True when no language marker was found, or the marker maps to "en".
    pub is_english: bool,
}

/// Normalize a raw string and classify its tokens by length.
pub fn extract_keywords(raw: &str) -> Keywords {
    let norm = normalize(raw);

    let mut title_keywords = Vec::new();
    let mut other_keywords = Vec::new();
    for token in &norm.tokens {
        if token.chars().count() >= TITLE_KEYWORD_MIN_LEN {
            title_keywords.push(token.clone());
        } else {
            other_keywords.push(token.clone());
        }
    }

    // Stable sort: equal-length tokens keep normalization order.
    title_keywords.sort_by(|a, b| b.chars().count().cmp(&a.chars().count()));
    title_keywords.truncate(MAX_TITLE_KEYWORDS);

    let is_english = norm
        .language
        .as_deref()
        .map_or(true, |tag| keyword::language_code(tag) == Some("en"));

    Keywords {
        title_keywords,
        other_keywords,
        year: norm.year,
        quality: norm.quality,
        language: norm.language,
        token_count: norm.tokens.len(),
        is_english,
    }
}
