use async_trait::async_trait;
use std::sync::Arc;
use std::time::Duration;
use tracing::debug;

use crate::{chat::ChatResponder, delay::Delay, models::Movie, random::RandomSource};

/// Produces the assistant's reply to a chat message. Implementations may
/// fail; the chat task turns a failure into an apology.
#[async_trait]
pub trait ReplyEngine: Send + Sync {
    async fn reply(&self, message: &str, recommendations: &[Movie]) -> anyhow::Result<String>;
}

/// Keyword responder behind a simulated thinking delay drawn uniformly from
/// `min..max` milliseconds.
pub struct KeywordReplyEngine {
    responder: ChatResponder,
    delay: Arc<dyn Delay>,
    random: Arc<dyn RandomSource>,
    min_ms: u64,
    max_ms: u64,
}

impl KeywordReplyEngine {
    pub fn new(
        random: Arc<dyn RandomSource>,
        delay: Arc<dyn Delay>,
        min_ms: u64,
        max_ms: u64,
    ) -> Self {
        Self {
            responder: ChatResponder::new(random.clone()),
            delay,
            random,
            min_ms,
            max_ms,
        }
    }

    fn thinking_time(&self) -> Duration {
        Duration::from_millis(self.random.between(self.min_ms, self.max_ms))
    }
}

#[async_trait]
impl ReplyEngine for KeywordReplyEngine {
    async fn reply(&self, message: &str, recommendations: &[Movie]) -> anyhow::Result<String> {
        let thinking = self.thinking_time();
        debug!(thinking_ms = thinking.as_millis() as u64, "Thinking about reply");
        self.delay.wait(thinking).await;

        Ok(self.responder.respond(message, recommendations))
    }
}
