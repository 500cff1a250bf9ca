//! Storage seam between `TodoService` and the document store.
//!
//! # Design
//! One document per list, tasks embedded as an array. Every method maps to a
//! single atomic document operation, so nested task mutations never go
//! through a read-modify-write of the whole list and concurrent writers to
//! the same list cannot drop each other's changes.
//!
//! Methods that address a task inside a list report a missing list as
//! `TodoError::ListNotFound` and a missing task as `None` / `false`, leaving
//! the service to build the `TaskNotFound` error.

use async_trait::async_trait;
use uuid::Uuid;

use crate::error::Result;
use crate::types::{Task, TodoList};

pub mod memory;
pub mod mongo;

pub use memory::MemoryStore;
pub use mongo::MongoStore;

#[async_trait]
pub trait TodoStore: Send + Sync {
    /// Create the unique index on list names. Must be idempotent.
    async fn ensure_indexes(&self) -> Result<()>;

    /// Insert a new list document. Fails with `DuplicateName` on a name clash.
    async fn insert_list(&self, list: &TodoList) -> Result<()>;

    async fn find_list(&self, id: Uuid) -> Result<Option<TodoList>>;

    /// Every list document, in no particular order.
    async fn find_all_lists(&self) -> Result<Vec<TodoList>>;

    /// Returns whether a document was removed.
    async fn delete_list(&self, id: Uuid) -> Result<bool>;

    /// Append `task` unless the list already holds a task with the same name.
    async fn push_task(&self, list_id: Uuid, task: &Task) -> Result<()>;

    /// Mark the task completed and return its new state.
    async fn complete_task(&self, list_id: Uuid, task_id: Uuid) -> Result<Option<Task>>;

    /// Remove the task, keeping the order of the rest.
    async fn pull_task(&self, list_id: Uuid, task_id: Uuid) -> Result<bool>;
}
