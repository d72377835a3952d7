pub mod chat_reply;
pub mod mood_intake;
pub mod reply_engine;
pub mod types;

pub use chat_reply::ChatReplyTask;
pub use mood_intake::MoodIntakeTask;
pub use reply_engine::{KeywordReplyEngine, ReplyEngine};
pub use types::session_keys;
