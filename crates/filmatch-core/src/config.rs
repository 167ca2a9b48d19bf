use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::FilmatchError;

const DEFAULT_CONFIG: &str = include_str!("../../../config/default.toml");

/// Tunable matcher parameters.
///
/// Overriding the defaults shifts how permissive ranking is but never
/// changes the scoring semantics.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MatcherConfig {
    /// Maximum ranked matches returned when no explicit limit is given.
    pub default_limit: usize,
    pub weights: ScoreWeights,
    pub thresholds: Thresholds,
}

/// Relative weight of each similarity signal in the combined base score.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct ScoreWeights {
    /// Fraction of reference tokens found in the candidate.
    pub coverage: f64,
    /// Character-level edit similarity of the joined token strings.
    pub sequence: f64,
    /// Jaccard similarity of the two token sets.
    pub jaccard: f64,
}

/// Confidence cutoffs applied by the batch ranker. A supplied year
/// already disambiguates, so the with-year cutoff is lower.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Thresholds {
    pub with_year: f64,
    pub without_year: f64,
}

impl MatcherConfig {
    /// Load a full config from a TOML file.
    pub fn load_from(path: &Path) -> Result<Self, FilmatchError> {
        let content = std::fs::read_to_string(path)?;
        toml::from_str(&content).map_err(|e| FilmatchError::Config(e.to_string()))
    }
}

impl Default for MatcherConfig {
    fn default() -> Self {
        toml::from_str(DEFAULT_CONFIG).expect("built-in default config is valid TOML")
    }
}
