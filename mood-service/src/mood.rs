use std::sync::Arc;

use tracing::debug;

use crate::{
    catalog::Catalog,
    models::{MoodCategory, Movie},
};

/// Keywords tested against the lower-cased mood text
#[derive(Debug, Clone, Copy)]
pub struct MoodRule {
    pub category: MoodCategory,
    pub keywords: &'static [&'static str],
}

/// Checked in order; the first rule with a contained keyword wins.
pub const MOOD_RULES: [MoodRule; 4] = [
    MoodRule {
        category: MoodCategory::Sad,
        keywords: &["sad", "down", "upset"],
    },
    MoodRule {
        category: MoodCategory::Happy,
        keywords: &["happy", "good", "great"],
    },
    MoodRule {
        category: MoodCategory::Stressed,
        keywords: &["stress", "overwhelm", "tired"],
    },
    MoodRule {
        category: MoodCategory::Excited,
        keywords: &["excit", "energy", "pump"],
    },
];

/// Size of the mixed list returned when no rule matches
pub const FALLBACK_LEN: usize = 3;

/// Maps free-text moods to movie lists
#[derive(Debug, Clone)]
pub struct MoodMatcher {
    catalog: Arc<Catalog>,
}

impl MoodMatcher {
    pub fn new(catalog: Arc<Catalog>) -> Self {
        Self { catalog }
    }

    /// Category of the first rule whose keyword appears in `mood`
    pub fn categorize(&self, mood: &str) -> Option<MoodCategory> {
        let mood = mood.to_lowercase();
        MOOD_RULES
            .iter()
            .find(|rule| rule.keywords.iter().any(|keyword| mood.contains(keyword)))
            .map(|rule| rule.category)
    }

    /// Recommendations for `mood`. Never empty: unmatched moods get the
    /// happy list followed by the sad list, cut to [`FALLBACK_LEN`].
    pub fn recommend(&self, mood: &str) -> Vec<Movie> {
        match self.categorize(mood) {
            Some(category) => {
                debug!(category = %category, "Mood matched");
                self.catalog.movies(category).to_vec()
            }
            None => {
                debug!("No mood keyword matched, using mixed fallback");
                self.catalog
                    .movies(MoodCategory::Happy)
                    .iter()
                    .chain(self.catalog.movies(MoodCategory::Sad))
                    .take(FALLBACK_LEN)
                    .cloned()
                    .collect()
            }
        }
    }
}

impl Default for MoodMatcher {
    fn default() -> Self {
        Self::new(Arc::new(Catalog::standard()))
    }
}
