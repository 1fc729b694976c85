//! View-scoped async tasks
//!
//! Backend calls run as tokio tasks tied to the view that asked for them.
//! Dropping the [`TaskScope`] cancels everything still in flight, so a
//! result aimed at a closed view is never delivered. Panics inside a task
//! body are contained and surface as a failed task, not a dead process.

use std::panic::AssertUnwindSafe;

use futures::FutureExt;
use thiserror::Error;
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;

/// Why a scoped task produced no value.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum TaskError {
    /// The scope was dropped before the task finished.
    #[error("Task cancelled")]
    Cancelled,

    /// The task body panicked.
    #[error("Task panicked: {0}")]
    Panicked(String),
}

/// Handle to one scoped task.
#[derive(Debug)]
pub struct ScopedTask<T> {
    handle: JoinHandle<Result<T, TaskError>>,
}

impl<T> ScopedTask<T> {
    /// Wait for the task's value.
    pub async fn join(self) -> Result<T, TaskError> {
        match self.handle.await {
            Ok(result) => result,
            Err(e) if e.is_cancelled() => Err(TaskError::Cancelled),
            Err(e) => Err(TaskError::Panicked(e.to_string())),
        }
    }

    /// Cancel this task alone.
    pub fn abort(&self) {
        self.handle.abort();
    }
}

/// A group of tasks sharing one lifetime.
///
/// Each view owns a scope; every backend call it starts goes through
/// [`TaskScope::spawn`]. Dropping the scope cancels all of them.
#[derive(Debug)]
pub struct TaskScope {
    name: &'static str,
    cancel: CancellationToken,
}

impl TaskScope {
    pub fn new(name: &'static str) -> Self {
        Self {
            name,
            cancel: CancellationToken::new(),
        }
    }

    /// Token for task bodies that want to observe cancellation themselves.
    pub fn cancellation_token(&self) -> CancellationToken {
        self.cancel.clone()
    }

    /// Spawn a task tied to this scope
    ///
    /// The future is raced against the scope's cancellation and wrapped to
    /// catch panics, so the join result distinguishes a value, a cancelled
    /// task, and a panicked one.
    pub fn spawn<F, T>(&self, task_name: &'static str, future: F) -> ScopedTask<T>
    where
        F: std::future::Future<Output = T> + Send + 'static,
        T: Send + 'static,
    {
        let cancel = self.cancel.clone();
        let scope = self.name;

        let handle = tokio::spawn(async move {
            tokio::select! {
                _ = cancel.cancelled() => {
                    tracing::debug!(scope = %scope, task = %task_name, "Task cancelled");
                    Err(TaskError::Cancelled)
                }
                result = AssertUnwindSafe(future).catch_unwind() => match result {
                    Ok(value) => Ok(value),
                    Err(panic_info) => {
                        let panic_msg: String = if let Some(s) = panic_info.downcast_ref::<&str>() {
                            (*s).to_string()
                        } else if let Some(s) = panic_info.downcast_ref::<String>() {
                            s.clone()
                        } else {
                            "Unknown panic".to_string()
                        };
                        tracing::error!(
                            scope = %scope,
                            task = %task_name,
                            panic = %panic_msg,
                            "Scoped task panicked"
                        );
                        Err(TaskError::Panicked(panic_msg))
                    }
                }
            }
        });

        ScopedTask { handle }
    }
}

impl Drop for TaskScope {
    fn drop(&mut self) {
        self.cancel.cancel();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn task_completes_with_its_value() {
        let scope = TaskScope::new("test-view");
        let task = scope.spawn("fetch", async { 21 * 2 });
        assert_eq!(task.join().await, Ok(42));
    }

    #[tokio::test]
    async fn dropping_the_scope_cancels_outstanding_tasks() {
        let scope = TaskScope::new("test-view");
        let task = scope.spawn("hang", async {
            std::future::pending::<()>().await;
        });
        drop(scope);
        assert_eq!(task.join().await, Err(TaskError::Cancelled));
    }

    #[tokio::test]
    async fn panics_are_contained_and_reported() {
        let scope = TaskScope::new("test-view");
        let task = scope.spawn("explode", async {
            panic!("boom");
        });
        match task.join().await {
            Err(TaskError::Panicked(msg)) => assert!(msg.contains("boom")),
            other => panic!("expected panic report, got {other:?}"),
        }
        // The scope is still usable afterwards.
        let task = scope.spawn("fetch", async { 1 });
        assert_eq!(task.join().await, Ok(1));
    }

    #[tokio::test]
    async fn scope_token_observes_the_view_lifetime() {
        let scope = TaskScope::new("test-view");
        let token = scope.cancellation_token();
        assert!(!token.is_cancelled());

        // A collaborator holding the token sees the view close.
        drop(scope);
        token.cancelled().await;
        assert!(token.is_cancelled());
    }

    #[tokio::test]
    async fn abort_cancels_a_single_task() {
        let scope = TaskScope::new("test-view");
        let hanging = scope.spawn("hang", async {
            std::future::pending::<()>().await;
        });
        let unaffected = scope.spawn("fetch", async { "done" });

        hanging.abort();
        assert_eq!(hanging.join().await, Err(TaskError::Cancelled));
        assert_eq!(unaffected.join().await, Ok("done"));
    }
}
