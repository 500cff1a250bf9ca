//! Persistence core for the todo service.
//!
//! # Overview
//! Todo lists are stored one document per list, with their tasks embedded as
//! an ordered array. `TodoService` exposes the list and task operations and
//! enforces the domain rules; `TodoStore` is the seam to the document store.
//!
//! # Design
//! - `MongoStore` is the production store; `MemoryStore` keeps everything in
//!   process and backs the tests.
//! - Every task mutation is one atomic update of the owning list document.
//! - No HTTP types in here: the server crate maps `TodoError` onto statuses.

pub mod error;
pub mod service;
pub mod store;
pub mod types;

pub use error::{Result, TodoError};
pub use service::TodoService;
pub use store::{MemoryStore, MongoStore, TodoStore};
pub use types::{NewList, NewTask, Task, TodoList};
