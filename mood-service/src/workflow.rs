use mood_flow::{FlowRunner, Graph, GraphBuilder, Session, Task};
use std::sync::Arc;
use tracing::info;

use crate::{
    catalog::Catalog,
    config::Config,
    delay::{Delay, TokioDelay},
    mood::MoodMatcher,
    random::{RandomSource, ThreadRandom},
    tasks::{ChatReplyTask, KeywordReplyEngine, MoodIntakeTask, ReplyEngine, session_keys},
};

pub const GRAPH_ID: &str = "mood_concierge";

/// Collaborators the workflow tasks are built from
#[derive(Clone)]
pub struct Dependencies {
    pub catalog: Arc<Catalog>,
    pub random: Arc<dyn RandomSource>,
    pub delay: Arc<dyn Delay>,
    /// Replaces the keyword engine when set
    pub reply_engine: Option<Arc<dyn ReplyEngine>>,
}

impl Default for Dependencies {
    fn default() -> Self {
        Self {
            catalog: Arc::new(Catalog::standard()),
            random: Arc::new(ThreadRandom),
            delay: Arc::new(TokioDelay),
            reply_engine: None,
        }
    }
}

impl Dependencies {
    pub fn with_random(mut self, random: Arc<dyn RandomSource>) -> Self {
        self.random = random;
        self
    }

    pub fn with_delay(mut self, delay: Arc<dyn Delay>) -> Self {
        self.delay = delay;
        self
    }

    pub fn with_reply_engine(mut self, engine: Arc<dyn ReplyEngine>) -> Self {
        self.reply_engine = Some(engine);
        self
    }
}

/// Mood intake followed by an open-ended chat. The chat is only entered
/// once recommendations exist.
pub fn build_concierge_workflow(config: &Config, deps: &Dependencies) -> Graph {
    let intake_task = Arc::new(MoodIntakeTask::new(
        MoodMatcher::new(deps.catalog.clone()),
        deps.delay.clone(),
        config.mood_delay(),
    ));
    let intake_id = intake_task.id().to_string();

    let engine: Arc<dyn ReplyEngine> = match &deps.reply_engine {
        Some(engine) => engine.clone(),
        None => Arc::new(KeywordReplyEngine::new(
            deps.random.clone(),
            deps.delay.clone(),
            config.reply_delay_min_ms,
            config.reply_delay_max_ms,
        )),
    };
    let chat_task = Arc::new(ChatReplyTask::new(engine));
    let chat_id = chat_task.id().to_string();

    GraphBuilder::new(GRAPH_ID)
        .add_task(intake_task)
        .add_task(chat_task)
        .add_conditional_edge(&intake_id, &chat_id, |ctx| {
            ctx.contains_key(session_keys::RECOMMENDATIONS)
        })
        .build()
}

/// A runner over a fresh session positioned at mood intake
pub async fn create_flow_runner(config: &Config, deps: &Dependencies) -> FlowRunner {
    let graph = Arc::new(build_concierge_workflow(config, deps));
    let session = Session::start(&graph);
    session
        .context
        .set(session_keys::LANGUAGE, config.language.clone())
        .await;

    info!(session_id = %session.id, language = %config.language, "Concierge session created");
    FlowRunner::new(graph, session)
}
