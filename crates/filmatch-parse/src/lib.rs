//! Tokenizer/normalizer layer for noisy media file names.
//!
//! Turns adversarial, abbreviation-laden release names into canonical
//! token sequences plus extracted metadata (year, quality, language),
//! ready for similarity scoring in `filmatch-core`.

pub mod keyword;
pub mod keywords;
pub mod normalize;

pub use keywords::{extract_keywords, Keywords};
pub use normalize::{normalize, Normalized};
