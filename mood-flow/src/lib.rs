pub mod context;
pub mod error;
pub mod graph;
pub mod runner;
pub mod session;
pub mod task;

// Re-export commonly used types
pub use context::{ChatMessage, Context, MessageRole, Transcript};
pub use error::{FlowError, Result};
pub use graph::{ExecutionResult, ExecutionStatus, Graph, GraphBuilder};
pub use runner::FlowRunner;
pub use session::Session;
pub use task::{NextAction, Task, TaskResult};

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use std::sync::Arc;
    use std::time::Duration;

    struct EchoTask;

    #[async_trait]
    impl Task for EchoTask {
        async fn run(&self, context: Context) -> Result<TaskResult> {
            let input: String = context.get("input").await.unwrap_or_default();
            context.add_user_message(input.clone()).await;
            context.set("echoed", true).await;

            Ok(TaskResult::new(
                Some(format!("Processed: {}", input)),
                NextAction::Continue,
            ))
        }
    }

    struct SlowTask;

    #[async_trait]
    impl Task for SlowTask {
        async fn run(&self, _context: Context) -> Result<TaskResult> {
            tokio::time::sleep(Duration::from_millis(1500)).await;
            Ok(TaskResult::new(Some("done".to_string()), NextAction::WaitForInput))
        }
    }

    struct FailingTask;

    #[async_trait]
    impl Task for FailingTask {
        async fn run(&self, _context: Context) -> Result<TaskResult> {
            Err(FlowError::TaskExecutionFailed("boom".to_string()))
        }
    }

    struct FinishTask;

    #[async_trait]
    impl Task for FinishTask {
        async fn run(&self, _context: Context) -> Result<TaskResult> {
            Ok(TaskResult::new(Some("bye".to_string()), NextAction::End))
        }
    }

    struct HandOffTask;

    #[async_trait]
    impl Task for HandOffTask {
        async fn run(&self, _context: Context) -> Result<TaskResult> {
            Ok(TaskResult::new_with_status(
                None,
                NextAction::ContinueAndExecute,
                Some("handing off".to_string()),
            ))
        }
    }

    fn id_of(task: &dyn Task) -> String {
        task.id().to_string()
    }

    #[tokio::test]
    async fn test_continue_moves_to_next_task_without_running_it() {
        let echo = Arc::new(EchoTask);
        let finish = Arc::new(FinishTask);
        let (echo_id, finish_id) = (id_of(&*echo), id_of(&*finish));

        let graph = GraphBuilder::new("test_graph")
            .add_task(echo)
            .add_task(finish)
            .add_edge(echo_id.clone(), finish_id.clone())
            .build();
        assert_eq!(graph.start_task_id(), Some(echo_id));

        let mut session = Session::start(&graph);
        session.context.set("input", "Hello, World!").await;

        let result = graph.execute_session(&mut session).await.unwrap();
        assert_eq!(result.response.as_deref(), Some("Processed: Hello, World!"));
        assert_eq!(result.status, ExecutionStatus::WaitingForInput);
        assert_eq!(session.current_task_id, finish_id);

        let result = graph.execute_session(&mut session).await.unwrap();
        assert_eq!(result.status, ExecutionStatus::Completed);
    }

    #[tokio::test]
    async fn test_continue_and_execute_runs_next_task() {
        let hand_off = Arc::new(HandOffTask);
        let finish = Arc::new(FinishTask);
        let (hand_off_id, finish_id) = (id_of(&*hand_off), id_of(&*finish));

        let graph = GraphBuilder::new("chain")
            .add_task(hand_off)
            .add_task(finish)
            .add_edge(hand_off_id, finish_id.clone())
            .build();

        let mut session = Session::start(&graph);
        let result = graph.execute_session(&mut session).await.unwrap();

        assert_eq!(result.response.as_deref(), Some("bye"));
        assert_eq!(result.status, ExecutionStatus::Completed);
        assert_eq!(session.current_task_id, finish_id);
    }

    #[tokio::test]
    async fn test_conditional_edge_is_respected() {
        let echo = Arc::new(EchoTask);
        let finish = Arc::new(FinishTask);
        let (echo_id, finish_id) = (id_of(&*echo), id_of(&*finish));

        let graph = GraphBuilder::new("conditional")
            .add_task(echo)
            .add_task(finish)
            .add_conditional_edge(echo_id.clone(), finish_id.clone(), |ctx| {
                ctx.get_sync::<bool>("ready").unwrap_or(false)
            })
            .build();

        let context = Context::new();
        assert_eq!(graph.find_next_task(&echo_id, &context), None);
        context.set("ready", true).await;
        assert_eq!(graph.find_next_task(&echo_id, &context), Some(finish_id));
    }

    #[tokio::test]
    async fn test_missing_task_is_reported() {
        let graph = GraphBuilder::new("empty").build();
        let mut session = Session::new_from_task("s1".to_string(), "empty", "nowhere");

        let err = graph.execute_session(&mut session).await.unwrap_err();
        assert!(matches!(err, FlowError::TaskNotFound(id) if id == "nowhere"));
    }

    #[tokio::test(start_paused = true)]
    async fn test_runner_rejects_overlapping_submissions() {
        let graph = Arc::new(GraphBuilder::new("slow").add_task(Arc::new(SlowTask)).build());
        let runner = FlowRunner::new(graph.clone(), Session::start(&graph));

        let first = {
            let runner = runner.clone();
            tokio::spawn(async move { runner.run_with_input("input", "first").await })
        };
        while !runner.is_pending() {
            tokio::task::yield_now().await;
        }

        let err = runner.run_with_input("input", "second").await.unwrap_err();
        assert!(matches!(err, FlowError::Busy(_)));
        assert_eq!(
            runner.context().get::<String>("input").await.as_deref(),
            Some("first")
        );

        let result = first.await.unwrap().unwrap();
        assert_eq!(result.response.as_deref(), Some("done"));
        assert!(!runner.is_pending());
    }

    #[tokio::test]
    async fn test_runner_clears_pending_after_failure() {
        let graph = Arc::new(
            GraphBuilder::new("failing")
                .add_task(Arc::new(FailingTask))
                .build(),
        );
        let runner = FlowRunner::new(graph.clone(), Session::start(&graph));

        let err = runner.run().await.unwrap_err();
        assert!(matches!(err, FlowError::TaskExecutionFailed(_)));
        assert!(!runner.is_pending());

        // a later submission is accepted again
        assert!(matches!(
            runner.run().await.unwrap_err(),
            FlowError::TaskExecutionFailed(_)
        ));
    }

    #[tokio::test]
    async fn test_runner_tracks_current_task() {
        let echo = Arc::new(EchoTask);
        let finish = Arc::new(FinishTask);
        let (echo_id, finish_id) = (id_of(&*echo), id_of(&*finish));

        let graph = Arc::new(
            GraphBuilder::new("tracked")
                .add_task(echo)
                .add_task(finish)
                .add_edge(echo_id.clone(), finish_id.clone())
                .build(),
        );
        let runner = FlowRunner::new(graph.clone(), Session::start(&graph));
        assert_eq!(runner.current_task_id().await, echo_id);

        runner.run_with_input("input", "hi").await.unwrap();
        assert_eq!(runner.current_task_id().await, finish_id);
        assert_eq!(runner.context().message_count().await, 1);
        assert_eq!(runner.context().get_sync::<bool>("echoed"), Some(true));
    }
}
