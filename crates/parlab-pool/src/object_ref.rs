//! Handles to the results of remote tasks

use std::any::Any;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tokio::task::{JoinError, JoinHandle};
use tracing::debug;
use uuid::Uuid;

use crate::error::PoolError;

/// Unique identifier for a remote task
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TaskId(pub Uuid);

impl TaskId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for TaskId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for TaskId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Opaque handle to the future value of a remote task.
///
/// Holding an `ObjectRef` does not give access to the value; pass it to
/// [`crate::WorkerPool::get`] or await [`ObjectRef::resolve`].
#[derive(Debug)]
pub struct ObjectRef<T> {
    id: TaskId,
    submitted_at: DateTime<Utc>,
    handle: JoinHandle<Result<T, PoolError>>,
}

impl<T> ObjectRef<T> {
    pub(crate) fn new(id: TaskId, handle: JoinHandle<Result<T, PoolError>>) -> Self {
        Self {
            id,
            submitted_at: Utc::now(),
            handle,
        }
    }

    pub fn id(&self) -> TaskId {
        self.id
    }

    pub fn submitted_at(&self) -> DateTime<Utc> {
        self.submitted_at
    }

    /// Whether the task has finished, successfully or not. Never blocks.
    pub fn is_ready(&self) -> bool {
        self.handle.is_finished()
    }

    /// Wait for the task and return its value.
    pub async fn resolve(self) -> Result<T, PoolError> {
        let id = self.id;
        let result = match self.handle.await {
            Ok(result) => result,
            Err(err) => Err(join_error(id, err)),
        };
        debug!(
            "Task {} resolved {}ms after submission",
            id,
            (Utc::now() - self.submitted_at).num_milliseconds()
        );
        result
    }
}

pub(crate) fn join_error(task_id: TaskId, err: JoinError) -> PoolError {
    if err.is_panic() {
        PoolError::TaskPanicked {
            task_id,
            message: panic_message(err.into_panic()),
        }
    } else {
        PoolError::TaskCancelled(task_id)
    }
}

fn panic_message(payload: Box<dyn Any + Send>) -> String {
    if let Some(s) = payload.downcast_ref::<&str>() {
        (*s).to_string()
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else {
        "unknown panic payload".to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_task_id_uniqueness() {
        assert_ne!(TaskId::new(), TaskId::new());
    }

    #[test]
    fn test_panic_message_variants() {
        assert_eq!(panic_message(Box::new("static")), "static");
        assert_eq!(panic_message(Box::new(String::from("owned"))), "owned");
        assert_eq!(panic_message(Box::new(42_u32)), "unknown panic payload");
    }

    #[tokio::test]
    async fn test_resolve_returns_value() {
        let id = TaskId::new();
        let before = Utc::now();
        let handle = tokio::spawn(async { Ok::<_, PoolError>(5) });
        let obj = ObjectRef::new(id, handle);
        assert_eq!(obj.id(), id);
        assert!(obj.submitted_at() >= before);
        assert!(obj.submitted_at() <= Utc::now());
        assert_eq!(obj.resolve().await.unwrap(), 5);
    }

    #[tokio::test]
    async fn test_resolve_reports_panic() {
        let handle = tokio::spawn(async {
            if true {
                panic!("task blew up");
            }
            Ok::<u32, PoolError>(0)
        });
        let obj = ObjectRef::new(TaskId::new(), handle);
        let err = obj.resolve().await.unwrap_err();
        assert!(
            matches!(err, PoolError::TaskPanicked { ref message, .. } if message == "task blew up")
        );
    }
}
