//! FlowRunner – owns one session, executes exactly **one** graph step per submission and refuses
//! a new submission while the previous one is still pending.
//!
//! A step may await (a simulated thinking delay, for instance). During that window the session is
//! *pending*: [`FlowRunner::is_pending`] reports `true`, and any other call to
//! [`FlowRunner::run`] or [`FlowRunner::run_with_input`] fails immediately with
//! [`FlowError::Busy`] without touching the context. The pending flag is released on every exit
//! path, including task errors and panics unwinding through the step.
//!
//! The context is shared, so readers (a UI showing the transcript plus a typing indicator) never
//! wait for the pending step.
//!
//! ```rust,ignore
//! let runner = FlowRunner::new(graph, Session::start(&graph));
//! let result = runner.run_with_input("user_input", "hello").await?;
//! ```

use serde::Serialize;
use std::sync::{
    Arc,
    atomic::{AtomicBool, Ordering},
};
use tokio::sync::Mutex;
use tracing::{info, warn};

use crate::{
    context::Context,
    error::{FlowError, Result},
    graph::{ExecutionResult, Graph},
    session::Session,
};

/// High-level helper that serializes submissions for a single session.
#[derive(Clone)]
pub struct FlowRunner {
    graph: Arc<Graph>,
    session: Arc<Mutex<Session>>,
    context: Context,
    session_id: String,
    pending: Arc<AtomicBool>,
}

/// Clears the pending flag when dropped
struct PendingGuard<'a> {
    flag: &'a AtomicBool,
}

impl<'a> PendingGuard<'a> {
    fn acquire(flag: &'a AtomicBool, session_id: &str) -> Result<Self> {
        flag.compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .map_err(|_| FlowError::Busy(session_id.to_string()))?;
        Ok(Self { flag })
    }
}

impl Drop for PendingGuard<'_> {
    fn drop(&mut self) {
        self.flag.store(false, Ordering::Release);
    }
}

impl FlowRunner {
    pub fn new(graph: Arc<Graph>, session: Session) -> Self {
        let context = session.context.clone();
        let session_id = session.id.clone();
        Self {
            graph,
            session: Arc::new(Mutex::new(session)),
            context,
            session_id,
            pending: Arc::new(AtomicBool::new(false)),
        }
    }

    pub fn session_id(&self) -> &str {
        &self.session_id
    }

    /// Shared handle to the session context
    pub fn context(&self) -> &Context {
        &self.context
    }

    /// `true` while a step is executing
    pub fn is_pending(&self) -> bool {
        self.pending.load(Ordering::Acquire)
    }

    pub async fn current_task_id(&self) -> String {
        self.session.lock().await.current_task_id.clone()
    }

    /// Execute **exactly one** step for the session.
    pub async fn run(&self) -> Result<ExecutionResult> {
        let _guard = self.acquire()?;
        self.step().await
    }

    /// Store `input` under `key` and execute one step. When the session is busy the input is
    /// rejected and the context is left untouched.
    pub async fn run_with_input(&self, key: &str, input: impl Serialize) -> Result<ExecutionResult> {
        let _guard = self.acquire()?;
        self.context.set(key, input).await;
        self.step().await
    }

    fn acquire(&self) -> Result<PendingGuard<'_>> {
        PendingGuard::acquire(&self.pending, &self.session_id).inspect_err(|_| {
            warn!(session_id = %self.session_id, "Rejected submission while a step is pending");
        })
    }

    async fn step(&self) -> Result<ExecutionResult> {
        let mut session = self.session.lock().await;
        let from_task = session.current_task_id.clone();

        let result = self.graph.execute_session(&mut session).await?;

        info!(
            session_id = %session.id,
            from_task = %from_task,
            to_task = %session.current_task_id,
            status = ?result.status,
            "Step finished"
        );
        Ok(result)
    }
}
