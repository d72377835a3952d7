use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{context::Context, graph::Graph};

/// State of one conversation: where it is in the graph and what it knows
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Session {
    pub id: String,
    pub graph_id: String,
    pub current_task_id: String,
    pub status_message: Option<String>,
    #[serde(skip)]
    pub context: Context,
}

impl Session {
    pub fn new_from_task(sid: String, graph_id: &str, task_name: &str) -> Self {
        Self {
            id: sid,
            graph_id: graph_id.to_string(),
            current_task_id: task_name.to_string(),
            status_message: None,
            context: Context::new(),
        }
    }

    /// Fresh session with a random id, positioned at the graph's start task
    pub fn start(graph: &Graph) -> Self {
        Self::new_from_task(
            Uuid::new_v4().to_string(),
            &graph.id,
            &graph.start_task_id().unwrap_or_default(),
        )
    }
}
