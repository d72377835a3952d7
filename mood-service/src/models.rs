use serde::{Deserialize, Serialize};
use std::fmt;

/// A recommendable movie. Catalog entries are immutable; `is_favorite` is
/// only filled in on copies handed to the presentation layer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Movie {
    pub id: u32,
    pub title: String,
    pub overview: String,
    pub genres: Vec<String>,
    pub rating: f32,
    pub release_year: u16,
    pub poster: String,
    pub reason: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_favorite: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub language: Option<String>,
}

impl Movie {
    pub fn has_genre(&self, genre: &str) -> bool {
        self.genres.iter().any(|g| g == genre)
    }

    pub fn has_any_genre(&self, genres: &[&str]) -> bool {
        genres.iter().any(|genre| self.has_genre(genre))
    }
}

/// The closed set of moods the catalog is keyed by
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MoodCategory {
    Sad,
    Happy,
    Stressed,
    Excited,
}

impl MoodCategory {
    pub const ALL: [MoodCategory; 4] = [
        MoodCategory::Sad,
        MoodCategory::Happy,
        MoodCategory::Stressed,
        MoodCategory::Excited,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            MoodCategory::Sad => "sad",
            MoodCategory::Happy => "happy",
            MoodCategory::Stressed => "stressed",
            MoodCategory::Excited => "excited",
        }
    }
}

impl fmt::Display for MoodCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Preferred movie language
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct LanguageOption {
    pub code: &'static str,
    pub name: &'static str,
    pub flag: &'static str,
}

/// One of the quick-pick moods offered next to the free-text box
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct MoodPreset {
    pub emoji: &'static str,
    pub label: &'static str,
    pub mood: &'static str,
}
