use async_trait::async_trait;
use mood_flow::{Context, FlowError, NextAction, Result, Task, TaskResult};
use std::sync::Arc;
use std::time::Duration;
use tracing::info;

use crate::{catalog::ANY_LANGUAGE, delay::Delay, mood::MoodMatcher};

use super::types::{greeting, session_keys};

/// Turns the submitted mood into recommendations and opens the chat
pub struct MoodIntakeTask {
    matcher: MoodMatcher,
    delay: Arc<dyn Delay>,
    loading_time: Duration,
}

impl MoodIntakeTask {
    pub fn new(matcher: MoodMatcher, delay: Arc<dyn Delay>, loading_time: Duration) -> Self {
        Self {
            matcher,
            delay,
            loading_time,
        }
    }
}

#[async_trait]
impl Task for MoodIntakeTask {
    async fn run(&self, context: Context) -> Result<TaskResult> {
        let mood: String = context
            .get(session_keys::MOOD)
            .await
            .ok_or_else(|| FlowError::ContextError("mood not found".to_string()))?;

        let language: String = context
            .get(session_keys::LANGUAGE)
            .await
            .unwrap_or_else(|| ANY_LANGUAGE.to_string());

        info!(task_id = %self.id(), mood = %mood, language = %language, "Finding movies for mood");

        self.delay.wait(self.loading_time).await;
        let recommendations = self.matcher.recommend(&mood);

        info!(
            task_id = %self.id(),
            count = recommendations.len(),
            "Recommendations ready"
        );

        context
            .set(session_keys::RECOMMENDATIONS, &recommendations)
            .await;

        let opening = greeting(&mood);
        context.add_assistant_message(opening.clone()).await;

        Ok(TaskResult::new_with_status(
            Some(opening),
            NextAction::Continue,
            Some(format!("{} movies recommended", recommendations.len())),
        ))
    }
}
