use async_trait::async_trait;
use mood_flow::{Context, FlowError, NextAction, Result, Task, TaskResult};
use std::sync::Arc;
use tracing::{info, warn};

use crate::{chat::APOLOGY_REPLY, models::Movie};

use super::{reply_engine::ReplyEngine, types::session_keys};

/// Answers one chat message and waits for the next
pub struct ChatReplyTask {
    engine: Arc<dyn ReplyEngine>,
}

impl ChatReplyTask {
    pub fn new(engine: Arc<dyn ReplyEngine>) -> Self {
        Self { engine }
    }
}

#[async_trait]
impl Task for ChatReplyTask {
    async fn run(&self, context: Context) -> Result<TaskResult> {
        let user_input: String = context
            .get(session_keys::USER_INPUT)
            .await
            .ok_or_else(|| FlowError::ContextError("user_input not found".to_string()))?;

        let recommendations: Vec<Movie> = context
            .get(session_keys::RECOMMENDATIONS)
            .await
            .unwrap_or_default();

        let message = context.add_user_message(user_input.clone()).await;
        info!(task_id = %self.id(), message_id = message.id, "Replying to chat message");

        let reply = match self.engine.reply(&user_input, &recommendations).await {
            Ok(reply) => reply,
            Err(e) => {
                warn!(task_id = %self.id(), "Reply generation failed, apologizing: {:#}", e);
                APOLOGY_REPLY.to_string()
            }
        };

        context.add_assistant_message(reply.clone()).await;

        Ok(TaskResult::new(Some(reply), NextAction::WaitForInput))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        catalog::Catalog,
        chat::COMEDY_FOUND_REPLY,
        delay::InstantDelay,
        models::MoodCategory,
        random::FixedRandom,
        tasks::KeywordReplyEngine,
    };
    use mood_flow::MessageRole;

    struct BrokenEngine;

    #[async_trait]
    impl ReplyEngine for BrokenEngine {
        async fn reply(&self, _message: &str, _recommendations: &[Movie]) -> anyhow::Result<String> {
            anyhow::bail!("model unavailable")
        }
    }

    #[tokio::test]
    async fn test_appends_user_message_then_reply() {
        let engine = KeywordReplyEngine::new(
            Arc::new(FixedRandom::new(0)),
            Arc::new(InstantDelay::new()),
            1000,
            2000,
        );
        let task = ChatReplyTask::new(Arc::new(engine));

        let context = Context::new();
        let happy = Catalog::standard().movies(MoodCategory::Happy).to_vec();
        context.set(session_keys::RECOMMENDATIONS, &happy).await;
        context.set(session_keys::USER_INPUT, "Anything funny?").await;

        let result = task.run(context.clone()).await.unwrap();
        let expected = COMEDY_FOUND_REPLY.replace("{title}", "Paddington");
        assert_eq!(result.response.as_deref(), Some(expected.as_str()));
        assert_eq!(result.next_action, NextAction::WaitForInput);

        let messages = context.get_all_messages().await;
        assert_eq!(
            messages.iter().map(|m| m.role).collect::<Vec<_>>(),
            vec![MessageRole::User, MessageRole::Assistant]
        );
        assert_eq!(messages[0].text, "Anything funny?");
        assert_eq!(messages[1].text, expected);
    }

    #[tokio::test]
    async fn test_engine_failure_becomes_apology() {
        let task = ChatReplyTask::new(Arc::new(BrokenEngine));
        let context = Context::new();
        context.set(session_keys::USER_INPUT, "hello?").await;

        let result = task.run(context.clone()).await.unwrap();
        assert_eq!(result.response.as_deref(), Some(APOLOGY_REPLY));

        let last = context.get_last_messages(1).await;
        assert_eq!(last[0].text, APOLOGY_REPLY);
        assert_eq!(last[0].role, MessageRole::Assistant);
    }
}
