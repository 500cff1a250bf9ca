use std::{collections::HashMap, sync::Arc};

use async_trait::async_trait;
use tokio::sync::RwLock;
use uuid::Uuid;

use super::TodoStore;
use crate::error::{Result, TodoError};
use crate::types::{Task, TodoList};

type Db = Arc<RwLock<HashMap<Uuid, TodoList>>>;

/// In-process store keeping every list in a shared map.
///
/// Each operation runs inside one lock acquisition, which gives it the same
/// single-document atomicity the MongoDB store gets from the server.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    db: Db,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl TodoStore for MemoryStore {
    async fn ensure_indexes(&self) -> Result<()> {
        Ok(())
    }

    async fn insert_list(&self, list: &TodoList) -> Result<()> {
        let mut lists = self.db.write().await;
        if lists.values().any(|l| l.name == list.name) {
            return Err(TodoError::DuplicateName(list.name.clone()));
        }
        lists.insert(list.id, list.clone());
        Ok(())
    }

    async fn find_list(&self, id: Uuid) -> Result<Option<TodoList>> {
        Ok(self.db.read().await.get(&id).cloned())
    }

    async fn find_all_lists(&self) -> Result<Vec<TodoList>> {
        Ok(self.db.read().await.values().cloned().collect())
    }

    async fn delete_list(&self, id: Uuid) -> Result<bool> {
        Ok(self.db.write().await.remove(&id).is_some())
    }

    async fn push_task(&self, list_id: Uuid, task: &Task) -> Result<()> {
        let mut lists = self.db.write().await;
        let list = lists.get_mut(&list_id).ok_or(TodoError::ListNotFound(list_id))?;
        if list.has_task_named(&task.name) {
            return Err(TodoError::DuplicateTaskName(task.name.clone()));
        }
        list.tasks.push(task.clone());
        Ok(())
    }

    async fn complete_task(&self, list_id: Uuid, task_id: Uuid) -> Result<Option<Task>> {
        let mut lists = self.db.write().await;
        let list = lists.get_mut(&list_id).ok_or(TodoError::ListNotFound(list_id))?;
        Ok(list.tasks.iter_mut().find(|t| t.id == task_id).map(|task| {
            task.completed = true;
            task.clone()
        }))
    }

    async fn pull_task(&self, list_id: Uuid, task_id: Uuid) -> Result<bool> {
        let mut lists = self.db.write().await;
        let list = lists.get_mut(&list_id).ok_or(TodoError::ListNotFound(list_id))?;
        let before = list.tasks.len();
        list.tasks.retain(|t| t.id != task_id);
        Ok(list.tasks.len() != before)
    }
}
