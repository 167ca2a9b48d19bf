//! Normalization pipeline for noisy release-style file names.
//!
//! Turns an arbitrary raw string (a canonical title or a shared-channel
//! file name) into a canonical token sequence plus extracted metadata
//! (year, quality tier, language tag). Steps run in a fixed order, each
//! feeding the next:
//!
//! 1. Unicode NFKC + case folding, trim
//! 2. Container-extension stripping
//! 3. Year extraction
//! 4. Quality-tag extraction
//! 5. Language-tag extraction
//! 6. Noise-prefix stripping
//! 7. Separator replacement
//! 8. Symbol erasure
//! 9. Whitespace collapse / tokenization
//! 10. Token filtering (keep/junk/numeric/abbreviation rules)
//! 11. First-occurrence dedup
//!
//! The pipeline is total: any input, including the empty string, yields a
//! well-formed `Normalized` and never panics.

use std::collections::HashSet;
use std::sync::LazyLock;

use regex::Regex;
use serde::{Deserialize, Serialize};
use unicode_normalization::UnicodeNormalization;

use crate::keyword::{self, TokenClass};

/// Result of normalizing one raw string.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Normalized {
    /// Ordered, deduplicated lowercase word-tokens.
    pub tokens: Vec<String>,
    /// `tokens` rejoined with single spaces, for character-level comparison.
    pub joined: String,
    /// First 4-digit year in 1900–2029 found in the input.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub year: Option<String>,
    /// First quality/source marker found in the input.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub quality: Option<String>,
    /// First language/dub marker found in the input.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub language: Option<String>,
}

// ── Patterns (compiled once) ────────────────────────────────────────────

static RE_YEAR: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\b(19\d{2}|20[0-2]\d)\b").unwrap());

static RE_QUALITY: LazyLock<Regex> = LazyLock::new(|| {
    let tags: Vec<&str> = keyword::QUALITY_TIERS.iter().map(|(tag, _)| *tag).collect();
    Regex::new(&format!(r"\b(?:{})\b", tags.join("|"))).unwrap()
});

static RE_LANGUAGE: LazyLock<Regex> = LazyLock::new(|| {
    let tags: Vec<&str> = keyword::LANGUAGES.iter().map(|(tag, _)| *tag).collect();
    Regex::new(&format!(r"\b(?:{})\b", tags.join("|"))).unwrap()
});

/// Noise prefixes stripped from the front of the working text, applied
/// sequentially, one pass each. Kept as data so the rule set can grow
/// without touching the pipeline.
///
/// The short-code rule is case-sensitive on purpose: the text is already
/// lowercase at this point, so it only fires on stray digit runs. A
/// case-insensitive version would eat leading title words and break
/// abbreviation expansion ("mi fallout") and re-normalization stability.
const PREFIX_PATTERNS: &[&str] = &[
    r"^\[[^\]]+\]\s*",    // [Group]
    r"^\{[^}]+\}\s*",     // {Group}
    r"^\([^)]+\)\s*",     // (Group)
    r"^\d{4}p?\s*",       // leading number block
    r"^[A-Z0-9]{2,6}\s+", // leading short uppercase code
    r"^@\w+\s*",          // @handle
    r"^cine\w+\s+",       // cinesubz, cinehub
    r"^royal\w+\s+",      // royalmovies, royalseries
    r"^mlw\w+\s+",        // mlwbd
    r"^mkv\w+\s+",        // mkvcinemas
    r"^mov\w+\s+",        // moviezworld
];

static PREFIX_RULES: LazyLock<Vec<Regex>> = LazyLock::new(|| {
    PREFIX_PATTERNS
        .iter()
        .map(|pattern| Regex::new(pattern).unwrap())
        .collect()
});

static RE_SEPARATORS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[._\-\[\](){}|]").unwrap());

/// Container extensions recognized at the end of a file name.
const EXTENSIONS: &[&str] = &[
    ".mkv", ".mp4", ".avi", ".mov", ".wmv", ".flv", ".webm", ".m4v", ".ts",
];

// ── Pipeline ────────────────────────────────────────────────────────────

/// Normalize a raw title or file name into tokens plus metadata.
pub fn normalize(raw: &str) -> Normalized {
    if raw.is_empty() {
        return Normalized::default();
    }

    let text = unicode_fold(raw);
    let text = strip_extension(&text);
    let (text, year) = extract_first(&text, &RE_YEAR);
    let (text, quality) = extract_first(&text, &RE_QUALITY);
    let (text, language) = extract_first(&text, &RE_LANGUAGE);
    let text = strip_prefixes(&text);
    let text = RE_SEPARATORS.replace_all(&text, " ");
    let text = erase_symbols(&text);

    let tokens = dedup_tokens(filter_tokens(text.split_whitespace()));
    let joined = tokens.join(" ");

    tracing::trace!(
        raw,
        normalized = %joined,
        year = year.as_deref(),
        quality = quality.as_deref(),
        language = language.as_deref(),
        "normalized"
    );

    Normalized {
        tokens,
        joined,
        year,
        quality,
        language,
    }
}

/// NFKC normalization (fullwidth → ASCII, composed forms) + lowercase + trim.
fn unicode_fold(s: &str) -> String {
    s.nfkc().collect::<String>().to_lowercase().trim().to_string()
}

/// Drop a known container extension from the end, if present.
fn strip_extension(s: &str) -> String {
    for ext in EXTENSIONS {
        if let Some(stripped) = s.strip_suffix(ext) {
            return stripped.trim_end().to_string();
        }
    }
    s.to_string()
}

/// Record the first match of `pattern` and blank out every occurrence.
///
/// Removing all occurrences keeps repeated markers ("720p ... 720p") from
/// surviving into the token stream; numbers outside the pattern (e.g.
/// "2049") are untouched and fall through to the token rules.
fn extract_first(s: &str, pattern: &Regex) -> (String, Option<String>) {
    match pattern.find(s) {
        Some(found) => {
            let tag = found.as_str().to_string();
            (pattern.replace_all(s, " ").into_owned(), Some(tag))
        }
        None => (s.to_string(), None),
    }
}

/// Apply each prefix rule once, in order, to the remaining text.
fn strip_prefixes(s: &str) -> String {
    let mut text = s.to_string();
    for rule in PREFIX_RULES.iter() {
        text = rule.replace(&text, " ").into_owned();
    }
    text
}

/// Strip everything that is not a letter, digit, or whitespace.
fn erase_symbols(s: &str) -> String {
    s.chars()
        .filter(|c| c.is_alphanumeric() || c.is_whitespace())
        .collect()
}

/// Apply the token-level keep/junk/numeric/abbreviation rules in order.
fn filter_tokens<'a>(raw: impl Iterator<Item = &'a str>) -> Vec<String> {
    let mut out = Vec::new();
    for token in raw {
        match keyword::classify(token) {
            Some(TokenClass::Keep) => {
                out.push(token.to_string());
                continue;
            }
            Some(TokenClass::Junk) => continue,
            Some(TokenClass::Abbreviation(expansion)) => {
                out.extend(expansion.split_whitespace().map(str::to_string));
                continue;
            }
            None => {}
        }

        // Bare single characters, unless a single-letter Roman numeral.
        if token.chars().count() == 1 && !matches!(token, "i" | "v" | "x") {
            continue;
        }

        // Pure numbers are noise unless they look like a year.
        if token.chars().all(|c| c.is_ascii_digit()) && token.len() != 4 {
            continue;
        }

        // Mixed alphanumerics lose their digits ("movie123" → "movie").
        if token.chars().any(|c| c.is_ascii_digit()) && token.chars().any(|c| !c.is_ascii_digit())
        {
            let stripped: String = token.chars().filter(|c| !c.is_ascii_digit()).collect();
            if stripped.chars().count() < 2 {
                continue;
            }
            out.push(stripped);
            continue;
        }

        out.push(token.to_string());
    }
    out
}

/// Remove duplicate tokens, preserving first-occurrence order.
fn dedup_tokens(tokens: Vec<String>) -> Vec<String> {
    let mut seen = HashSet::new();
    tokens
        .into_iter()
        .filter(|token| seen.insert(token.clone()))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::keyword::{JUNK_WORDS, KEEP_WORDS};

    #[test]
    fn empty_input() {
        let norm = normalize("");
        assert!(norm.tokens.is_empty());
        assert!(norm.joined.is_empty());
        assert_eq!(norm.year, None);
        assert_eq!(norm.quality, None);
        assert_eq!(norm.language, None);
    }

    #[test]
    fn whitespace_only_input() {
        let norm = normalize("   \t ");
        assert!(norm.tokens.is_empty());
    }

    #[test]
    fn release_name_full_extraction() {
        let norm = normalize("Avengers.2012.1080p.BluRay.x264-GROUP.mkv");
        assert_eq!(norm.year.as_deref(), Some("2012"));
        assert_eq!(norm.quality.as_deref(), Some("1080p"));
        assert!(norm.tokens.contains(&"avengers".to_string()));
        for gone in ["2012", "1080p", "bluray", "x264"] {
            assert!(!norm.tokens.contains(&gone.to_string()), "{gone} kept");
        }
    }

    #[test]
    fn abbreviation_expansion() {
        let norm = normalize("mi fallout");
        assert_eq!(norm.tokens, vec!["mission", "impossible", "fallout"]);
    }

    #[test]
    fn no_junk_and_no_duplicates() {
        let inputs = [
            "The.Dark.Knight.2008.1080p.BluRay.x264-GROUP.mkv",
            "Movie Movie 720p Sinhala Dubbed CineSubz.mp4",
            "[RoyalMovies] Inception 2010 WEBRip x265",
        ];
        for input in inputs {
            let norm = normalize(input);
            let mut seen = HashSet::new();
            for token in &norm.tokens {
                assert!(seen.insert(token), "duplicate {token} in {input}");
                assert!(
                    !JUNK_WORDS.contains(token.as_str()) || KEEP_WORDS.contains(token.as_str()),
                    "junk token {token} survived in {input}"
                );
            }
        }
    }

    #[test]
    fn joined_is_projection_of_tokens() {
        let norm = normalize("The Dark Knight 2008 720p.mkv");
        assert_eq!(norm.joined, norm.tokens.join(" "));
    }

    #[test]
    fn year_extraction_range() {
        assert_eq!(normalize("Metropolis 1927").year.as_deref(), Some("1927"));
        assert_eq!(normalize("Dune 2021").year.as_deref(), Some("2021"));
        // Below/above the recognized range: no year.
        assert_eq!(normalize("Voyage 1899").year, None);
        assert_eq!(normalize("Odyssey 2030").year, None);
    }

    #[test]
    fn out_of_range_four_digit_number_kept_as_token() {
        // "2049" is not a recognized year, so it survives as a year-like
        // signal while "2017" is extracted.
        let norm = normalize("Blade Runner 2049 2017");
        assert_eq!(norm.year.as_deref(), Some("2017"));
        assert_eq!(norm.tokens, vec!["blade", "runner", "2049"]);
    }

    #[test]
    fn short_numbers_dropped() {
        let norm = normalize("Top 10");
        assert_eq!(norm.tokens, vec!["top"]);
    }

    #[test]
    fn quality_alternation_prefers_longer_tag() {
        // "hdtv" must not be claimed by the shorter "hd" alternative.
        let norm = normalize("Show HDTV");
        assert_eq!(norm.quality.as_deref(), Some("hdtv"));
    }

    #[test]
    fn quality_removal_covers_all_markers() {
        // The first marker is recorded; every other marker is removed
        // from the text and never reaches the token stream.
        let norm = normalize("Dune 1080p BluRay");
        assert_eq!(norm.quality.as_deref(), Some("1080p"));
        assert_eq!(norm.tokens, vec!["dune"]);
    }

    #[test]
    fn language_extraction() {
        let norm = normalize("Something 2020 Sinhala Dubbed.mkv");
        assert_eq!(norm.language.as_deref(), Some("sinhala"));
        assert!(!norm.tokens.contains(&"sinhala".to_string()));
        assert!(!norm.tokens.contains(&"dubbed".to_string()));
    }

    #[test]
    fn bracketed_prefix_stripped() {
        let norm = normalize("[RoyalMovies] The Matrix 1999 720p.mkv");
        assert_eq!(norm.tokens, vec!["the", "matrix"]);
        assert_eq!(norm.year.as_deref(), Some("1999"));
        assert_eq!(norm.quality.as_deref(), Some("720p"));
    }

    #[test]
    fn handle_prefix_stripped() {
        let norm = normalize("@somechannel The Matrix 1999");
        assert_eq!(norm.tokens, vec!["the", "matrix"]);
    }

    #[test]
    fn extension_stripping() {
        assert_eq!(normalize("show.ts").tokens, vec!["show"]);
        assert_eq!(normalize("clip.webm").tokens, vec!["clip"]);
        // Unknown extension: the dot becomes a separator instead.
        let norm = normalize("notes.txt");
        assert_eq!(norm.tokens, vec!["notes", "txt"]);
    }

    #[test]
    fn single_letter_roman_numerals_kept() {
        assert_eq!(normalize("Rocky V").tokens, vec!["rocky", "v"]);
        assert_eq!(normalize("Saw X").tokens, vec!["saw", "x"]);
        // Other single letters are noise.
        assert_eq!(normalize("Plan B").tokens, vec!["plan"]);
    }

    #[test]
    fn mixed_alphanumeric_loses_digits() {
        assert_eq!(normalize("dark123 knight").tokens, vec!["dark", "knight"]);
        // Stripping digits below two letters drops the token.
        assert_eq!(normalize("b2 night").tokens, vec!["night"]);
    }

    #[test]
    fn keep_words_survive() {
        let norm = normalize("The Lord of the Rings");
        assert_eq!(norm.tokens, vec!["the", "lord", "of", "rings"]);
    }

    #[test]
    fn fullwidth_input_folds_to_ascii() {
        let norm = normalize("ＡＶＥＮＧＥＲＳ");
        assert_eq!(norm.tokens, vec!["avengers"]);
    }

    #[test]
    fn renormalization_is_stable() {
        for input in [
            "The.Dark.Knight.2008.1080p.BluRay.x264-GROUP.mkv",
            "mi fallout",
            "[CineSubz] Minnal Murali (2021) Sinhala Sub 720p WEBRip.mp4",
        ] {
            let first = normalize(input);
            let second = normalize(&first.joined);
            assert_eq!(first.tokens, second.tokens, "unstable for {input}");
        }
    }

    #[test]
    fn four_digit_year_like_token_kept() {
        let norm = normalize("Bleach 1000");
        assert_eq!(norm.tokens, vec!["bleach", "1000"]);
    }

    #[test]
    fn serde_omits_absent_metadata() {
        let norm = normalize("plain title");
        let json = serde_json::to_string(&norm).unwrap();
        assert!(!json.contains("year"));
        assert!(!json.contains("quality"));
        assert!(!json.contains("language"));
    }
}
