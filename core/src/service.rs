//! Persistence service for todo lists and their tasks.
//!
//! # Design
//! `TodoService` owns the domain rules that sit above the store: identifiers
//! are generated here, names are validated here, and "missing task" results
//! from the store become `TaskNotFound` errors here. The store itself only
//! promises single-document atomicity and the name uniqueness checks.

use std::sync::Arc;

use tracing::{debug, info};
use uuid::Uuid;

use crate::error::{Result, TodoError};
use crate::store::TodoStore;
use crate::types::{NewList, NewTask, Task, TodoList};

/// Cheaply clonable handle onto a `TodoStore`.
#[derive(Clone)]
pub struct TodoService {
    store: Arc<dyn TodoStore>,
}

impl std::fmt::Debug for TodoService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TodoService").finish_non_exhaustive()
    }
}

impl TodoService {
    /// Wrap `store`, ensuring its indexes exist before any operation runs.
    pub async fn new(store: Arc<dyn TodoStore>) -> Result<Self> {
        store.ensure_indexes().await?;
        Ok(Self { store })
    }

    pub async fn create_list(&self, input: NewList) -> Result<TodoList> {
        debug!(name = %input.name, "creating list");
        let name = validate_name("list", input.name)?;
        let list = TodoList::new(name, input.description);
        self.store.insert_list(&list).await?;
        info!(list_id = %list.id, name = %list.name, "list created");
        Ok(list)
    }

    pub async fn get_list(&self, id: Uuid) -> Result<TodoList> {
        debug!(list_id = %id, "fetching list");
        self.store
            .find_list(id)
            .await?
            .ok_or(TodoError::ListNotFound(id))
    }

    pub async fn get_all_lists(&self) -> Result<Vec<TodoList>> {
        debug!("fetching all lists");
        self.store.find_all_lists().await
    }

    pub async fn delete_list(&self, id: Uuid) -> Result<()> {
        debug!(list_id = %id, "deleting list");
        if !self.store.delete_list(id).await? {
            return Err(TodoError::ListNotFound(id));
        }
        info!(list_id = %id, "list deleted");
        Ok(())
    }

    pub async fn create_task(&self, list_id: Uuid, input: NewTask) -> Result<Task> {
        debug!(list_id = %list_id, name = %input.name, "creating task");
        let task = Task::new(validate_name("task", input.name)?);
        self.store.push_task(list_id, &task).await?;
        info!(list_id = %list_id, task_id = %task.id, "task created");
        Ok(task)
    }

    pub async fn get_task(&self, list_id: Uuid, task_id: Uuid) -> Result<Task> {
        debug!(list_id = %list_id, task_id = %task_id, "fetching task");
        let list = self.get_list(list_id).await?;
        list.task(task_id)
            .cloned()
            .ok_or(TodoError::TaskNotFound { list_id, task_id })
    }

    /// Mark a task completed. Completing an already completed task is a no-op.
    pub async fn complete_task(&self, list_id: Uuid, task_id: Uuid) -> Result<Task> {
        debug!(list_id = %list_id, task_id = %task_id, "completing task");
        let task = self
            .store
            .complete_task(list_id, task_id)
            .await?
            .ok_or(TodoError::TaskNotFound { list_id, task_id })?;
        info!(list_id = %list_id, task_id = %task_id, "task completed");
        Ok(task)
    }

    pub async fn delete_task(&self, list_id: Uuid, task_id: Uuid) -> Result<()> {
        debug!(list_id = %list_id, task_id = %task_id, "deleting task");
        if !self.store.pull_task(list_id, task_id).await? {
            return Err(TodoError::TaskNotFound { list_id, task_id });
        }
        info!(list_id = %list_id, task_id = %task_id, "task deleted");
        Ok(())
    }
}

fn validate_name(kind: &str, name: String) -> Result<String> {
    if name.trim().is_empty() {
        return Err(TodoError::InvalidInput(format!("{kind} name must not be empty")));
    }
    Ok(name)
}
