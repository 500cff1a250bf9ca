//! Error taxonomy for the persistence layer.
//!
//! # Design
//! Not-found and duplicate conditions get dedicated variants so the router
//! can map each to its own status code. Everything the store reports that is
//! not one of those lands in `Storage` with the driver's message.

use thiserror::Error;
use uuid::Uuid;

/// Errors returned by `TodoService` and `TodoStore` operations.
#[derive(Debug, Error)]
pub enum TodoError {
    #[error("list {0} not found")]
    ListNotFound(Uuid),

    #[error("task {task_id} not found in list {list_id}")]
    TaskNotFound { list_id: Uuid, task_id: Uuid },

    #[error("a list named `{0}` already exists")]
    DuplicateName(String),

    #[error("a task named `{0}` already exists in this list")]
    DuplicateTaskName(String),

    #[error("invalid input: {0}")]
    InvalidInput(String),

    #[error("storage error: {0}")]
    Storage(String),
}

impl TodoError {
    pub fn is_not_found(&self) -> bool {
        matches!(self, TodoError::ListNotFound(_) | TodoError::TaskNotFound { .. })
    }

    pub fn is_duplicate(&self) -> bool {
        matches!(self, TodoError::DuplicateName(_) | TodoError::DuplicateTaskName(_))
    }
}

impl From<mongodb::error::Error> for TodoError {
    fn from(err: mongodb::error::Error) -> Self {
        TodoError::Storage(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, TodoError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn not_found_variants_are_classified() {
        assert!(TodoError::ListNotFound(Uuid::nil()).is_not_found());
        assert!(TodoError::TaskNotFound {
            list_id: Uuid::nil(),
            task_id: Uuid::nil(),
        }
        .is_not_found());
        assert!(!TodoError::Storage("boom".into()).is_not_found());
    }

    #[test]
    fn duplicate_variants_are_classified() {
        assert!(TodoError::DuplicateName("a".into()).is_duplicate());
        assert!(TodoError::DuplicateTaskName("a".into()).is_duplicate());
        assert!(!TodoError::InvalidInput("a".into()).is_duplicate());
    }

    #[test]
    fn messages_name_the_offender() {
        let err = TodoError::DuplicateName("groceries".into());
        assert_eq!(err.to_string(), "a list named `groceries` already exists");
    }
}
