use serde::Deserialize;
use std::time::Duration;

use crate::{
    catalog::{ANY_LANGUAGE, language_option},
    error::{ConciergeError, Result},
};

/// Concierge settings, read from `MOOD_`-prefixed environment variables
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Config {
    /// Simulated loading time before recommendations appear
    #[serde(default = "default_mood_delay_ms")]
    pub mood_delay_ms: u64,

    /// Lower bound of the simulated thinking time before a chat reply
    #[serde(default = "default_reply_delay_min_ms")]
    pub reply_delay_min_ms: u64,

    /// Upper bound (exclusive) of the simulated thinking time
    #[serde(default = "default_reply_delay_max_ms")]
    pub reply_delay_max_ms: u64,

    /// Preferred movie language code
    #[serde(default = "default_language")]
    pub language: String,
}

fn default_mood_delay_ms() -> u64 {
    1500
}

fn default_reply_delay_min_ms() -> u64 {
    1000
}

fn default_reply_delay_max_ms() -> u64 {
    2000
}

fn default_language() -> String {
    ANY_LANGUAGE.to_string()
}

impl Default for Config {
    fn default() -> Self {
        Self {
            mood_delay_ms: default_mood_delay_ms(),
            reply_delay_min_ms: default_reply_delay_min_ms(),
            reply_delay_max_ms: default_reply_delay_max_ms(),
            language: default_language(),
        }
    }
}

impl Config {
    /// Load configuration from the environment (and `.env` when present)
    pub fn from_env() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();
        let config = envy::prefixed("MOOD_")
            .from_env::<Config>()
            .map_err(|e| anyhow::anyhow!("Failed to load config: {}", e))?;
        config.validate()?;
        Ok(config)
    }

    /// All delays set to zero
    pub fn instant() -> Self {
        Self {
            mood_delay_ms: 0,
            reply_delay_min_ms: 0,
            reply_delay_max_ms: 0,
            ..Self::default()
        }
    }

    pub fn with_language(mut self, code: impl Into<String>) -> Self {
        self.language = code.into();
        self
    }

    pub fn validate(&self) -> Result<()> {
        if self.reply_delay_min_ms > self.reply_delay_max_ms {
            return Err(ConciergeError::Config(format!(
                "reply delay minimum ({} ms) exceeds maximum ({} ms)",
                self.reply_delay_min_ms, self.reply_delay_max_ms
            )));
        }
        if language_option(&self.language).is_none() {
            return Err(ConciergeError::Config(format!(
                "unknown language code '{}'",
                self.language
            )));
        }
        Ok(())
    }

    pub fn mood_delay(&self) -> Duration {
        Duration::from_millis(self.mood_delay_ms)
    }
}
