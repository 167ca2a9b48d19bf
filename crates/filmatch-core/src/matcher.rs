//! Pair scoring and ranked matching of candidate file names against a
//! reference title.
//!
//! Three independent signals (token coverage, character-level sequence
//! similarity, Jaccard set similarity) are combined into a weighted base
//! score, adjusted by year/quality/length evidence, and finally shaped
//! into a confidence value that thresholds and ranking operate on.

use std::collections::{BTreeSet, HashSet};

use serde::{Deserialize, Serialize};
use strsim::normalized_levenshtein;

use filmatch_parse::keyword;
use filmatch_parse::normalize::{normalize, Normalized};

use crate::config::MatcherConfig;
use crate::models::Media;

// ── Fixed score adjustments ─────────────────────────────────────────────

/// Bonus multiplier when the candidate's year equals the reference year.
const YEAR_MATCH_BONUS: f64 = 1.2;
/// Penalty multiplier when both years are present but differ.
const YEAR_MISMATCH_PENALTY: f64 = 0.3;
/// Penalty multiplier when the reference has a year but the candidate none.
const YEAR_ABSENT_PENALTY: f64 = 0.7;
/// Floor of the quality multiplier; the tier score adds up to `0.1` more.
const QUALITY_FLOOR: f64 = 0.9;
const QUALITY_SPAN: f64 = 0.1;
/// Token coverage at or above this earns the confidence boost.
const COVERAGE_BOOST_FLOOR: f64 = 0.8;
const COVERAGE_BOOST: f64 = 1.1;
/// Candidate-only tokens beyond this count are treated as noise.
const NOISE_TOKEN_LIMIT: usize = 5;
const NOISE_PENALTY: f64 = 0.8;

/// Result of scoring one (reference title, candidate) pair.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MatchResult {
    /// The original candidate string, unmodified, for display.
    pub candidate: String,
    /// Adjusted base metric after year/quality/length adjustments.
    pub similarity_score: f64,
    /// Threshold-relevant score in [0, 1].
    pub confidence: f64,
    /// Tokens present in both the reference and the candidate, sorted.
    pub matched_tokens: Vec<String>,
    /// Reference tokens absent from the candidate, sorted.
    pub unmatched_tokens: Vec<String>,
    /// True only when both sides carried a year and they were equal.
    pub year_match: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub quality: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub language: Option<String>,
}

/// Scores candidates against reference titles using tunable weights and
/// thresholds. Cheap to construct; all lookup tables are shared statics.
#[derive(Debug, Clone)]
pub struct TitleMatcher {
    config: MatcherConfig,
}

impl Default for TitleMatcher {
    fn default() -> Self {
        Self::new()
    }
}

impl TitleMatcher {
    pub fn new() -> Self {
        Self {
            config: MatcherConfig::default(),
        }
    }

    pub fn with_config(config: MatcherConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &MatcherConfig {
        &self.config
    }

    /// Score one candidate against a reference title.
    ///
    /// The title's own embedded year (if any) is discarded by
    /// normalization; callers pass the provider-supplied `title_year`
    /// instead. Never fails: either side normalizing to zero tokens
    /// yields a zero-confidence result.
    pub fn score(&self, title: &str, candidate: &str, title_year: Option<&str>) -> MatchResult {
        let reference = normalize(title);
        let file = normalize(candidate);
        self.score_normalized(&reference, &file, candidate, title_year)
    }

    fn score_normalized(
        &self,
        reference: &Normalized,
        file: &Normalized,
        candidate: &str,
        title_year: Option<&str>,
    ) -> MatchResult {
        if reference.tokens.is_empty() || file.tokens.is_empty() {
            let mut unmatched: Vec<String> = reference.tokens.clone();
            unmatched.sort();
            return MatchResult {
                candidate: candidate.to_string(),
                similarity_score: 0.0,
                confidence: 0.0,
                matched_tokens: Vec::new(),
                unmatched_tokens: unmatched,
                year_match: false,
                quality: file.quality.clone(),
                language: file.language.clone(),
            };
        }

        let reference_set: BTreeSet<&str> = reference.tokens.iter().map(String::as_str).collect();
        let file_set: BTreeSet<&str> = file.tokens.iter().map(String::as_str).collect();

        let matched_tokens: Vec<String> = reference_set
            .intersection(&file_set)
            .map(|token| token.to_string())
            .collect();
        let unmatched_tokens: Vec<String> = reference_set
            .difference(&file_set)
            .map(|token| token.to_string())
            .collect();
        let noise_tokens = file_set.difference(&reference_set).count();

        let coverage = matched_tokens.len() as f64 / reference_set.len() as f64;
        let sequence = normalized_levenshtein(&reference.joined, &file.joined);
        let jaccard =
            matched_tokens.len() as f64 / reference_set.union(&file_set).count() as f64;

        let weights = self.config.weights;
        let mut base =
            coverage * weights.coverage + sequence * weights.sequence + jaccard * weights.jaccard;

        // Year evidence outweighs everything textual.
        let mut year_match = false;
        match (title_year, file.year.as_deref()) {
            (Some(wanted), Some(found)) if wanted == found => {
                base = (base * YEAR_MATCH_BONUS).min(1.0);
                year_match = true;
            }
            (Some(_), Some(_)) => base *= YEAR_MISMATCH_PENALTY,
            (Some(_), None) => base *= YEAR_ABSENT_PENALTY,
            (None, _) => {}
        }

        // Better source lineage gets a slight edge.
        if let Some(tag) = file.quality.as_deref() {
            base = (base * (QUALITY_FLOOR + QUALITY_SPAN * keyword::quality_score(tag))).min(1.0);
        }

        // Penalize pairs where one side is a tiny fragment of the other.
        let reference_len = reference.joined.chars().count();
        let file_len = file.joined.chars().count();
        base *= reference_len.min(file_len) as f64 / reference_len.max(file_len) as f64;

        let mut confidence = base;
        if coverage >= COVERAGE_BOOST_FLOOR {
            confidence = (confidence * COVERAGE_BOOST).min(1.0);
        }
        if noise_tokens > NOISE_TOKEN_LIMIT {
            confidence *= NOISE_PENALTY;
        }
        confidence = confidence.min(1.0);

        MatchResult {
            candidate: candidate.to_string(),
            similarity_score: base,
            confidence,
            matched_tokens,
            unmatched_tokens,
            year_match,
            quality: file.quality.clone(),
            language: file.language.clone(),
        }
    }

    /// Score a batch of candidates, keep those above the confidence
    /// threshold, and return them ranked best-first, deduplicated and
    /// truncated to `limit`.
    ///
    /// The threshold depends on whether a year was supplied: the year
    /// already disambiguates, so weaker textual matches pass with it.
    #[tracing::instrument(name = "find_best_matches", skip(self, candidates), fields(candidates = candidates.len()))]
    pub fn find_best_matches<S: AsRef<str>>(
        &self,
        title: &str,
        title_year: Option<&str>,
        candidates: &[S],
        limit: usize,
    ) -> Vec<MatchResult> {
        let reference = normalize(title);
        let matches = candidates
            .iter()
            .map(|candidate| {
                let file = normalize(candidate.as_ref());
                self.score_normalized(&reference, &file, candidate.as_ref(), title_year)
            })
            .collect();
        self.rank(matches, title_year.is_some(), limit)
    }

    /// Batch matching against every title variant of a catalog entry,
    /// keeping the best-scoring variant per candidate. Uses the
    /// configured default limit.
    pub fn find_best_matches_media<S: AsRef<str>>(
        &self,
        media: &Media,
        candidates: &[S],
    ) -> Vec<MatchResult> {
        let references: Vec<Normalized> =
            media.titles().into_iter().map(normalize).collect();
        let year = media.year.as_deref();

        let matches = candidates
            .iter()
            .filter_map(|candidate| {
                let file = normalize(candidate.as_ref());
                references
                    .iter()
                    .map(|reference| {
                        self.score_normalized(reference, &file, candidate.as_ref(), year)
                    })
                    .max_by(|a, b| a.confidence.total_cmp(&b.confidence))
            })
            .collect();
        self.rank(matches, year.is_some(), self.config.default_limit)
    }

    /// Threshold, sort, dedup, truncate. Sorting is stable, so equal
    /// confidences keep input order and the outcome is deterministic.
    fn rank(&self, mut matches: Vec<MatchResult>, has_year: bool, limit: usize) -> Vec<MatchResult> {
        let threshold = if has_year {
            self.config.thresholds.with_year
        } else {
            self.config.thresholds.without_year
        };

        matches.retain(|result| result.confidence >= threshold);
        matches.sort_by(|a, b| b.confidence.total_cmp(&a.confidence));

        // Two candidates matching the same reference tokens are the same
        // release in different wrappers; keep the better-ranked one.
        let mut seen = HashSet::new();
        matches.retain(|result| seen.insert(result.matched_tokens.join(" ")));
        matches.truncate(limit);

        tracing::debug!(kept = matches.len(), threshold, "ranked matches");
        matches
    }
}
