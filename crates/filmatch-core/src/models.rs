use serde::{Deserialize, Serialize};

/// Media type with its type-specific detail fields.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum MediaKind {
    Movie {
        #[serde(skip_serializing_if = "Option::is_none")]
        runtime_minutes: Option<u32>,
    },
    Series {
        #[serde(skip_serializing_if = "Option::is_none")]
        seasons: Option<u32>,
        #[serde(skip_serializing_if = "Option::is_none")]
        episodes: Option<u32>,
    },
}

/// A catalog entry as supplied by the metadata provider.
///
/// `original_title` carries the original-language variant; the matcher
/// scores candidates against every available variant and keeps the best.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Media {
    pub title: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub original_title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub year: Option<String>,
    pub kind: MediaKind,
}

impl Media {
    pub fn movie(title: impl Into<String>, year: Option<&str>) -> Self {
        Self {
            title: title.into(),
            original_title: None,
            year: year.map(str::to_string),
            kind: MediaKind::Movie {
                runtime_minutes: None,
            },
        }
    }

    pub fn series(title: impl Into<String>, year: Option<&str>) -> Self {
        Self {
            title: title.into(),
            original_title: None,
            year: year.map(str::to_string),
            kind: MediaKind::Series {
                seasons: None,
                episodes: None,
            },
        }
    }

    pub fn with_original_title(mut self, original_title: impl Into<String>) -> Self {
        self.original_title = Some(original_title.into());
        self
    }

    /// All distinct title variants, display title first.
    pub fn titles(&self) -> Vec<&str> {
        let mut titles = vec![self.title.as_str()];
        if let Some(original) = self.original_title.as_deref() {
            if original != self.title {
                titles.push(original);
            }
        }
        titles
    }
}
