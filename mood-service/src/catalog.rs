//! Static movie, language and mood-preset tables.

use std::collections::HashMap;

use crate::models::{LanguageOption, MoodCategory, MoodPreset, Movie};

/// Ordered movie lists keyed by mood category. Every category has at least
/// one movie.
#[derive(Debug, Clone)]
pub struct Catalog {
    lists: HashMap<MoodCategory, Vec<Movie>>,
}

#[derive(Debug, thiserror::Error)]
pub enum CatalogError {
    #[error("No movies listed for mood category '{0}'")]
    EmptyCategory(MoodCategory),

    #[error("Movie id {0} appears more than once")]
    DuplicateId(u32),
}

impl Catalog {
    /// Build a catalog from explicit lists, rejecting empty categories and
    /// duplicate ids.
    pub fn new(lists: HashMap<MoodCategory, Vec<Movie>>) -> Result<Self, CatalogError> {
        for category in MoodCategory::ALL {
            if lists.get(&category).is_none_or(|movies| movies.is_empty()) {
                return Err(CatalogError::EmptyCategory(category));
            }
        }

        let mut seen = std::collections::HashSet::new();
        for movie in lists.values().flatten() {
            if !seen.insert(movie.id) {
                return Err(CatalogError::DuplicateId(movie.id));
            }
        }

        Ok(Self { lists })
    }

    /// The built-in catalog
    pub fn standard() -> Self {
        let lists = STANDARD_LISTS
            .iter()
            .map(|(category, entries)| (*category, entries.iter().map(MovieEntry::to_movie).collect()))
            .collect();
        Self { lists }
    }

    pub fn movies(&self, category: MoodCategory) -> &[Movie] {
        self.lists.get(&category).map(Vec::as_slice).unwrap_or_default()
    }

    pub fn find(&self, id: u32) -> Option<&Movie> {
        self.lists.values().flatten().find(|movie| movie.id == id)
    }

    pub fn len(&self) -> usize {
        self.lists.values().map(Vec::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl Default for Catalog {
    fn default() -> Self {
        Self::standard()
    }
}

struct MovieEntry {
    id: u32,
    title: &'static str,
    overview: &'static str,
    genres: &'static [&'static str],
    rating: f32,
    release_year: u16,
    poster: &'static str,
    reason: &'static str,
}

impl MovieEntry {
    fn to_movie(&self) -> Movie {
        Movie {
            id: self.id,
            title: self.title.to_string(),
            overview: self.overview.to_string(),
            genres: self.genres.iter().map(|g| g.to_string()).collect(),
            rating: self.rating,
            release_year: self.release_year,
            poster: self.poster.to_string(),
            reason: self.reason.to_string(),
            is_favorite: None,
            language: None,
        }
    }
}

const STANDARD_LISTS: [(MoodCategory, &[MovieEntry]); 4] = [
    (
        MoodCategory::Sad,
        &[
            MovieEntry {
                id: 1,
                title: "The Pursuit of Happyness",
                overview: "A touching story about perseverance and hope that will remind you that tough times don't last forever.",
                genres: &["Drama", "Biography"],
                rating: 8.0,
                release_year: 2006,
                poster: "https://images.unsplash.com/photo-1489599735188-1edf7d59e22e?w=300&h=450&fit=crop",
                reason: "A beautiful reminder that hope can bloom even in the darkest moments",
            },
            MovieEntry {
                id: 2,
                title: "Inside Out",
                overview: "An animated masterpiece that helps you understand and embrace all your emotions, including sadness.",
                genres: &["Animation", "Family", "Comedy"],
                rating: 8.1,
                release_year: 2015,
                poster: "https://images.unsplash.com/photo-1506905925346-21bda4d32df4?w=300&h=450&fit=crop",
                reason: "Teaches us that it's okay to feel sad and that all emotions have value",
            },
        ],
    ),
    (
        MoodCategory::Happy,
        &[
            MovieEntry {
                id: 3,
                title: "Paddington",
                overview: "A delightfully warm and funny film about kindness, family, and marmalade sandwiches.",
                genres: &["Family", "Comedy", "Adventure"],
                rating: 8.2,
                release_year: 2014,
                poster: "https://images.unsplash.com/photo-1478720568477-b2709d1d7aec?w=300&h=450&fit=crop",
                reason: "Pure joy and whimsy that will keep your spirits soaring",
            },
            MovieEntry {
                id: 4,
                title: "The Grand Budapest Hotel",
                overview: "Wes Anderson's whimsical masterpiece full of colorful characters and delightful adventures.",
                genres: &["Comedy", "Adventure", "Crime"],
                rating: 8.1,
                release_year: 2014,
                poster: "https://images.unsplash.com/photo-1440404653325-ab127d49abc1?w=300&h=450&fit=crop",
                reason: "Visually stunning and charmingly eccentric - perfect for a good mood",
            },
        ],
    ),
    (
        MoodCategory::Stressed,
        &[MovieEntry {
            id: 5,
            title: "Studio Ghibli Collection",
            overview: "Peaceful, magical worlds that transport you away from everyday worries.",
            genres: &["Animation", "Fantasy", "Family"],
            rating: 8.5,
            release_year: 2001,
            poster: "https://images.unsplash.com/photo-1578662996442-48f60103fc96?w=300&h=450&fit=crop",
            reason: "Soothing animation and gentle storytelling to calm your mind",
        }],
    ),
    (
        MoodCategory::Excited,
        &[MovieEntry {
            id: 6,
            title: "Spider-Man: Into the Spider-Verse",
            overview: "An innovative animated adventure that matches your energy with spectacular visuals and heart.",
            genres: &["Animation", "Action", "Adventure"],
            rating: 8.4,
            release_year: 2018,
            poster: "https://images.unsplash.com/photo-1635805737707-575885ab0820?w=300&h=450&fit=crop",
            reason: "High-energy storytelling with incredible visual creativity",
        }],
    ),
];

pub const LANGUAGES: [LanguageOption; 13] = [
    LanguageOption { code: "any", name: "Any Language", flag: "🌍" },
    LanguageOption { code: "en", name: "English", flag: "🇺🇸" },
    LanguageOption { code: "es", name: "Spanish", flag: "🇪🇸" },
    LanguageOption { code: "fr", name: "French", flag: "🇫🇷" },
    LanguageOption { code: "de", name: "German", flag: "🇩🇪" },
    LanguageOption { code: "it", name: "Italian", flag: "🇮🇹" },
    LanguageOption { code: "pt", name: "Portuguese", flag: "🇵🇹" },
    LanguageOption { code: "ja", name: "Japanese", flag: "🇯🇵" },
    LanguageOption { code: "ko", name: "Korean", flag: "🇰🇷" },
    LanguageOption { code: "zh", name: "Chinese", flag: "🇨🇳" },
    LanguageOption { code: "hi", name: "Hindi", flag: "🇮🇳" },
    LanguageOption { code: "ar", name: "Arabic", flag: "🇸🇦" },
    LanguageOption { code: "ru", name: "Russian", flag: "🇷🇺" },
];

pub const ANY_LANGUAGE: &str = "any";

pub fn language_option(code: &str) -> Option<&'static LanguageOption> {
    LANGUAGES.iter().find(|lang| lang.code == code)
}

pub const MOOD_PRESETS: [MoodPreset; 8] = [
    MoodPreset { emoji: "😢", label: "Sad", mood: "feeling sad and need something uplifting" },
    MoodPreset { emoji: "😴", label: "Tired", mood: "feeling tired and want something peaceful" },
    MoodPreset { emoji: "🤩", label: "Excited", mood: "feeling excited and want something energetic" },
    MoodPreset { emoji: "🫶", label: "Loved", mood: "feeling loved and want something heartwarming" },
    MoodPreset { emoji: "🤯", label: "Overwhelmed", mood: "feeling overwhelmed and need something calming" },
    MoodPreset { emoji: "😊", label: "Happy", mood: "feeling happy and want something fun" },
    MoodPreset { emoji: "🥺", label: "Emotional", mood: "feeling emotional and want something meaningful" },
    MoodPreset { emoji: "⚡", label: "Energetic", mood: "feeling energetic and want something action-packed" },
];

/// Case-insensitive lookup by label
pub fn mood_preset(label: &str) -> Option<&'static MoodPreset> {
    MOOD_PRESETS
        .iter()
        .find(|preset| preset.label.eq_ignore_ascii_case(label.trim()))
}
