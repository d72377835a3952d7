pub mod catalog;
pub mod chat;
pub mod concierge;
pub mod config;
pub mod delay;
pub mod error;
pub mod favorites;
pub mod models;
pub mod mood;
pub mod random;
pub mod tasks;
pub mod workflow;

pub use catalog::{Catalog, LANGUAGES, MOOD_PRESETS};
pub use chat::ChatResponder;
pub use concierge::MoodConcierge;
pub use config::Config;
pub use error::{ConciergeError, Result};
pub use models::*;
pub use mood::MoodMatcher;
pub use workflow::{Dependencies, build_concierge_workflow, create_flow_runner};
