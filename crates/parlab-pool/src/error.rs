//! Worker pool errors

use std::time::Duration;

use parlab_core::ParlabError;
use thiserror::Error;

use crate::object_ref::TaskId;

#[derive(Error, Debug)]
pub enum PoolError {
    #[error("Invalid pool configuration: {0}")]
    InvalidConfig(String),

    #[error("Failed to start worker runtime: {0}")]
    Runtime(#[from] std::io::Error),

    #[error("Task {task_id} panicked: {message}")]
    TaskPanicked { task_id: TaskId, message: String },

    #[error("Task {0} was cancelled")]
    TaskCancelled(TaskId),

    #[error("Timed out after {waited:?}")]
    Timeout { waited: Duration },
}

impl From<PoolError> for ParlabError {
    fn from(err: PoolError) -> Self {
        match err {
            PoolError::InvalidConfig(_) | PoolError::Runtime(_) => {
                ParlabError::Pool(err.to_string())
            }
            PoolError::TaskPanicked { .. } | PoolError::TaskCancelled(_) => {
                ParlabError::TaskFailed(err.to_string())
            }
            PoolError::Timeout { .. } => ParlabError::Timeout(err.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_conversion_into_parlab_error() {
        let err: ParlabError =
            PoolError::InvalidConfig("num_cpus must be at least 1".into()).into();
        assert!(matches!(err, ParlabError::Pool(_)));

        let err: ParlabError = PoolError::TaskPanicked {
            task_id: TaskId::new(),
            message: "boom".into(),
        }
        .into();
        assert!(matches!(err, ParlabError::TaskFailed(ref msg) if msg.contains("boom")));

        let err: ParlabError = PoolError::Timeout {
            waited: Duration::from_millis(5),
        }
        .into();
        assert!(matches!(err, ParlabError::Timeout(_)));
    }
}
