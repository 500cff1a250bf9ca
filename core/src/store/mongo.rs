//! MongoDB-backed `TodoStore`.
//!
//! Lists live in a single collection with string `_id`s; tasks are an
//! embedded array whose elements carry their own `_id`. Task mutations use
//! `$push` / positional `$set` / `$pull` so the server applies them
//! atomically against the current document.

use async_trait::async_trait;
use futures::TryStreamExt;
use mongodb::bson::{doc, Document};
use mongodb::error::{ErrorKind, WriteFailure};
use mongodb::options::{IndexOptions, ReturnDocument};
use mongodb::{Client, Collection, IndexModel};
use serde::{Deserialize, Serialize};
use tracing::{debug, info};
use uuid::Uuid;

use super::TodoStore;
use crate::error::{Result, TodoError};
use crate::types::{Task, TodoList};

const DUPLICATE_KEY: i32 = 11000;

#[derive(Debug, Clone, Serialize, Deserialize)]
struct TaskDocument {
    #[serde(rename = "_id")]
    id: String,
    name: String,
    #[serde(default)]
    completed: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
struct ListDocument {
    #[serde(rename = "_id")]
    id: String,
    name: String,
    #[serde(default)]
    description: String,
    #[serde(default)]
    tasks: Vec<TaskDocument>,
}

impl From<&Task> for TaskDocument {
    fn from(task: &Task) -> Self {
        Self {
            id: task.id.to_string(),
            name: task.name.clone(),
            completed: task.completed,
        }
    }
}

impl From<&TodoList> for ListDocument {
    fn from(list: &TodoList) -> Self {
        Self {
            id: list.id.to_string(),
            name: list.name.clone(),
            description: list.description.clone(),
            tasks: list.tasks.iter().map(TaskDocument::from).collect(),
        }
    }
}

impl TryFrom<TaskDocument> for Task {
    type Error = TodoError;

    fn try_from(doc: TaskDocument) -> Result<Self> {
        Ok(Self {
            id: parse_id(&doc.id)?,
            name: doc.name,
            completed: doc.completed,
        })
    }
}

impl TryFrom<ListDocument> for TodoList {
    type Error = TodoError;

    fn try_from(doc: ListDocument) -> Result<Self> {
        Ok(Self {
            id: parse_id(&doc.id)?,
            name: doc.name,
            description: doc.description,
            tasks: doc
                .tasks
                .into_iter()
                .map(Task::try_from)
                .collect::<Result<Vec<_>>>()?,
        })
    }
}

fn parse_id(raw: &str) -> Result<Uuid> {
    raw.parse()
        .map_err(|e| TodoError::Storage(format!("stored id `{raw}` is not a uuid: {e}")))
}

fn by_id(id: Uuid) -> Document {
    doc! { "_id": id.to_string() }
}

/// Matches the list only while it holds no task called `name`.
fn push_task_filter(list_id: Uuid, name: &str) -> Document {
    doc! {
        "_id": list_id.to_string(),
        "tasks.name": { "$ne": name },
    }
}

fn push_task_update(task: &Task) -> Document {
    doc! {
        "$push": {
            "tasks": {
                "_id": task.id.to_string(),
                "name": task.name.as_str(),
                "completed": task.completed,
            }
        }
    }
}

/// Matches the list only while it holds the task, so `$` resolves to it.
fn task_filter(list_id: Uuid, task_id: Uuid) -> Document {
    doc! { "_id": list_id.to_string(), "tasks._id": task_id.to_string() }
}

fn complete_task_update() -> Document {
    doc! { "$set": { "tasks.$.completed": true } }
}

fn pull_task_update(task_id: Uuid) -> Document {
    doc! { "$pull": { "tasks": { "_id": task_id.to_string() } } }
}

fn is_duplicate_key(err: &mongodb::error::Error) -> bool {
    matches!(
        err.kind.as_ref(),
        ErrorKind::Write(WriteFailure::WriteError(e)) if e.code == DUPLICATE_KEY
    )
}

/// Handle onto one collection of a MongoDB deployment.
///
/// Cloning is cheap: clones share the driver's connection pool.
#[derive(Debug, Clone)]
pub struct MongoStore {
    client: Client,
    database: String,
    lists: Collection<ListDocument>,
}

impl MongoStore {
    /// Connect to `uri` and verify the deployment answers a `ping`.
    pub async fn connect(uri: &str, database: &str, collection: &str) -> Result<Self> {
        let client = Client::with_uri_str(uri).await?;
        client
            .database(database)
            .run_command(doc! { "ping": 1 })
            .await?;
        info!(database, collection, "connected to mongodb");
        Ok(Self::with_client(client, database, collection))
    }

    fn with_client(client: Client, database: &str, collection: &str) -> Self {
        let lists = client.database(database).collection(collection);
        Self {
            client,
            database: database.to_string(),
            lists,
        }
    }

    /// Close the connection pool, optionally dropping the database first.
    ///
    /// The pool is closed even when the drop fails; the drop error is
    /// returned afterwards.
    pub async fn shutdown(self, drop_database: bool) -> Result<()> {
        let dropped = if drop_database {
            info!(database = %self.database, "dropping database");
            self.client.database(&self.database).drop().await
        } else {
            Ok(())
        };
        self.client.shutdown().await;
        info!("mongodb connection closed");
        dropped.map_err(TodoError::from)
    }

    async fn list_exists(&self, id: Uuid) -> Result<bool> {
        Ok(self.lists.count_documents(by_id(id)).await? > 0)
    }
}

#[async_trait]
impl TodoStore for MongoStore {
    async fn ensure_indexes(&self) -> Result<()> {
        let index = IndexModel::builder()
            .keys(doc! { "name": 1 })
            .options(IndexOptions::builder().unique(true).build())
            .build();
        self.lists.create_index(index).await?;
        debug!("unique index on list name ensured");
        Ok(())
    }

    async fn insert_list(&self, list: &TodoList) -> Result<()> {
        match self.lists.insert_one(ListDocument::from(list)).await {
            Ok(_) => Ok(()),
            Err(e) if is_duplicate_key(&e) => Err(TodoError::DuplicateName(list.name.clone())),
            Err(e) => Err(e.into()),
        }
    }

    async fn find_list(&self, id: Uuid) -> Result<Option<TodoList>> {
        self.lists
            .find_one(by_id(id))
            .await?
            .map(TodoList::try_from)
            .transpose()
    }

    async fn find_all_lists(&self) -> Result<Vec<TodoList>> {
        let docs: Vec<ListDocument> = self.lists.find(doc! {}).await?.try_collect().await?;
        docs.into_iter().map(TodoList::try_from).collect()
    }

    async fn delete_list(&self, id: Uuid) -> Result<bool> {
        Ok(self.lists.delete_one(by_id(id)).await?.deleted_count > 0)
    }

    async fn push_task(&self, list_id: Uuid, task: &Task) -> Result<()> {
        let result = self
            .lists
            .update_one(push_task_filter(list_id, &task.name), push_task_update(task))
            .await?;
        if result.matched_count > 0 {
            return Ok(());
        }
        // The guard failed: either the list is gone or the name is taken.
        if self.list_exists(list_id).await? {
            Err(TodoError::DuplicateTaskName(task.name.clone()))
        } else {
            Err(TodoError::ListNotFound(list_id))
        }
    }

    async fn complete_task(&self, list_id: Uuid, task_id: Uuid) -> Result<Option<Task>> {
        let updated = self
            .lists
            .find_one_and_update(task_filter(list_id, task_id), complete_task_update())
            .return_document(ReturnDocument::After)
            .await?;
        match updated {
            Some(doc) => Ok(TodoList::try_from(doc)?.task(task_id).cloned()),
            None if self.list_exists(list_id).await? => Ok(None),
            None => Err(TodoError::ListNotFound(list_id)),
        }
    }

    async fn pull_task(&self, list_id: Uuid, task_id: Uuid) -> Result<bool> {
        let result = self
            .lists
            .update_one(task_filter(list_id, task_id), pull_task_update(task_id))
            .await?;
        if result.matched_count > 0 {
            Ok(true)
        } else if self.list_exists(list_id).await? {
            Ok(false)
        } else {
            Err(TodoError::ListNotFound(list_id))
        }
    }
}
