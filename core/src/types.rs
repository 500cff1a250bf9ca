//! Domain types for todo lists and their tasks.
//!
//! # Design
//! A `Task` never exists on its own: it is embedded in exactly one
//! `TodoList` and every task operation addresses it through the owning list.
//! Identifiers are server-generated UUIDs and serialize as plain strings.
//! The `New*` payloads carry only the client-writable fields, so an `id` or
//! `completed` sent by a client is dropped during deserialization.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A single task embedded in a todo list.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Task {
    pub id: Uuid,
    pub name: String,
    pub completed: bool,
}

impl Task {
    /// A fresh, not yet completed task with a newly generated id.
    pub fn new(name: String) -> Self {
        Self {
            id: Uuid::new_v4(),
            name,
            completed: false,
        }
    }
}

/// A named list owning an ordered sequence of tasks.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct TodoList {
    pub id: Uuid,
    pub name: String,
    pub description: String,
    #[serde(default)]
    pub tasks: Vec<Task>,
}

impl TodoList {
    pub fn new(name: String, description: String) -> Self {
        Self {
            id: Uuid::new_v4(),
            name,
            description,
            tasks: Vec::new(),
        }
    }

    pub fn task(&self, task_id: Uuid) -> Option<&Task> {
        self.tasks.iter().find(|t| t.id == task_id)
    }

    pub fn has_task_named(&self, name: &str) -> bool {
        self.tasks.iter().any(|t| t.name == name)
    }
}

/// Request payload for creating a list.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewList {
    pub name: String,
    #[serde(default)]
    pub description: String,
}

/// Request payload for adding a task to a list.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewTask {
    pub name: String,
}
