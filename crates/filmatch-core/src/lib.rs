//! Fuzzy file-matching engine for media catalogs.
//!
//! Given a canonical title (and optional year) from a metadata provider
//! and a batch of noisy, channel-style file names, this crate decides
//! which names plausibly represent the title, with what confidence, and
//! ranks them. Normalization lives in `filmatch-parse`; this crate adds
//! the pair scorer and the batch ranker on top.
//!
//! The engine is pure and total: no I/O, no shared mutable state, no
//! failure modes. Every lookup table is a shared static, so a
//! [`TitleMatcher`] may be used freely across threads.

pub mod config;
pub mod error;
pub mod matcher;
pub mod models;

pub use config::MatcherConfig;
pub use error::FilmatchError;
pub use matcher::{MatchResult, TitleMatcher};
pub use models::{Media, MediaKind};

pub use filmatch_parse::{extract_keywords, normalize, Keywords, Normalized};
