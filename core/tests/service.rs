//! Behavioural tests for `TodoService` over the in-memory store.
//!
//! Each test builds its own service, so tests stay independent of each other
//! and of any running database.

use std::sync::Arc;

use todo_core::{MemoryStore, NewList, NewTask, TodoError, TodoService};
use uuid::Uuid;

async fn service() -> TodoService {
    TodoService::new(Arc::new(MemoryStore::new())).await.unwrap()
}

fn new_list(name: &str, description: &str) -> NewList {
    NewList {
        name: name.to_string(),
        description: description.to_string(),
    }
}

fn new_task(name: &str) -> NewTask {
    NewTask {
        name: name.to_string(),
    }
}

// --- lists ---

#[tokio::test]
async fn created_list_reads_back_empty() {
    let svc = service().await;
    let created = svc.create_list(new_list("groceries", "weekly")).await.unwrap();

    let fetched = svc.get_list(created.id).await.unwrap();
    assert_eq!(fetched.name, "groceries");
    assert_eq!(fetched.description, "weekly");
    assert!(fetched.tasks.is_empty());
    assert_eq!(fetched, created);
}

#[tokio::test]
async fn duplicate_list_name_is_rejected() {
    let svc = service().await;
    let first = svc.create_list(new_list("groceries", "weekly")).await.unwrap();

    let err = svc
        .create_list(new_list("groceries", "another"))
        .await
        .unwrap_err();
    assert!(matches!(err, TodoError::DuplicateName(ref name) if name == "groceries"));

    let fetched = svc.get_list(first.id).await.unwrap();
    assert_eq!(fetched.description, "weekly");
    assert_eq!(svc.get_all_lists().await.unwrap().len(), 1);
}

#[tokio::test]
async fn blank_list_name_is_rejected() {
    let svc = service().await;
    let err = svc.create_list(new_list("  ", "")).await.unwrap_err();
    assert!(matches!(err, TodoError::InvalidInput(_)));
}

#[tokio::test]
async fn unknown_list_is_not_found() {
    let svc = service().await;
    let id = Uuid::new_v4();
    let err = svc.get_list(id).await.unwrap_err();
    assert!(matches!(err, TodoError::ListNotFound(missing) if missing == id));
}

#[tokio::test]
async fn get_all_lists_returns_every_list() {
    let svc = service().await;
    assert!(svc.get_all_lists().await.unwrap().is_empty());

    svc.create_list(new_list("a", "")).await.unwrap();
    svc.create_list(new_list("b", "")).await.unwrap();

    let mut names: Vec<String> = svc
        .get_all_lists()
        .await
        .unwrap()
        .into_iter()
        .map(|l| l.name)
        .collect();
    names.sort();
    assert_eq!(names, ["a", "b"]);
}

#[tokio::test]
async fn delete_list_then_not_found() {
    let svc = service().await;
    let list = svc.create_list(new_list("groceries", "")).await.unwrap();
    svc.create_task(list.id, new_task("milk")).await.unwrap();

    svc.delete_list(list.id).await.unwrap();

    assert!(svc.get_list(list.id).await.unwrap_err().is_not_found());
    assert!(svc.delete_list(list.id).await.unwrap_err().is_not_found());
    assert!(svc.delete_list(Uuid::new_v4()).await.unwrap_err().is_not_found());
}

#[tokio::test]
async fn deleted_list_name_can_be_reused() {
    let svc = service().await;
    let list = svc.create_list(new_list("groceries", "")).await.unwrap();
    svc.delete_list(list.id).await.unwrap();
    svc.create_list(new_list("groceries", "")).await.unwrap();
}

// --- tasks ---

#[tokio::test]
async fn created_task_reads_back_incomplete() {
    let svc = service().await;
    let list = svc.create_list(new_list("groceries", "")).await.unwrap();

    let task = svc.create_task(list.id, new_task("milk")).await.unwrap();
    let fetched = svc.get_task(list.id, task.id).await.unwrap();

    assert_eq!(fetched.name, "milk");
    assert!(!fetched.completed);
    assert_eq!(fetched, task);
}

#[tokio::test]
async fn create_task_on_missing_list() {
    let svc = service().await;
    let err = svc
        .create_task(Uuid::new_v4(), new_task("milk"))
        .await
        .unwrap_err();
    assert!(matches!(err, TodoError::ListNotFound(_)));
}

#[tokio::test]
async fn duplicate_task_name_is_rejected() {
    let svc = service().await;
    let list = svc.create_list(new_list("groceries", "")).await.unwrap();
    svc.create_task(list.id, new_task("milk")).await.unwrap();

    let err = svc
        .create_task(list.id, new_task("milk"))
        .await
        .unwrap_err();
    assert!(matches!(err, TodoError::DuplicateTaskName(ref name) if name == "milk"));
    assert_eq!(svc.get_list(list.id).await.unwrap().tasks.len(), 1);
}

#[tokio::test]
async fn same_task_name_allowed_in_different_lists() {
    let svc = service().await;
    let a = svc.create_list(new_list("a", "")).await.unwrap();
    let b = svc.create_list(new_list("b", "")).await.unwrap();
    svc.create_task(a.id, new_task("milk")).await.unwrap();
    svc.create_task(b.id, new_task("milk")).await.unwrap();
}

#[tokio::test]
async fn blank_task_name_is_rejected() {
    let svc = service().await;
    let list = svc.create_list(new_list("groceries", "")).await.unwrap();
    let err = svc.create_task(list.id, new_task("")).await.unwrap_err();
    assert!(matches!(err, TodoError::InvalidInput(_)));
}

#[tokio::test]
async fn unknown_task_is_not_found() {
    let svc = service().await;
    let list = svc.create_list(new_list("groceries", "")).await.unwrap();
    let task_id = Uuid::new_v4();

    let err = svc.get_task(list.id, task_id).await.unwrap_err();
    assert!(matches!(err, TodoError::TaskNotFound { task_id: t, .. } if t == task_id));

    let err = svc.get_task(Uuid::new_v4(), task_id).await.unwrap_err();
    assert!(matches!(err, TodoError::ListNotFound(_)));
}

#[tokio::test]
async fn complete_task_is_idempotent() {
    let svc = service().await;
    let list = svc.create_list(new_list("groceries", "")).await.unwrap();
    let task = svc.create_task(list.id, new_task("milk")).await.unwrap();

    let first = svc.complete_task(list.id, task.id).await.unwrap();
    assert!(first.completed);
    let second = svc.complete_task(list.id, task.id).await.unwrap();
    assert!(second.completed);

    assert!(svc.get_task(list.id, task.id).await.unwrap().completed);
}

#[tokio::test]
async fn complete_missing_task_is_not_found() {
    let svc = service().await;
    let list = svc.create_list(new_list("groceries", "")).await.unwrap();

    let err = svc.complete_task(list.id, Uuid::new_v4()).await.unwrap_err();
    assert!(matches!(err, TodoError::TaskNotFound { .. }));

    let err = svc
        .complete_task(Uuid::new_v4(), Uuid::new_v4())
        .await
        .unwrap_err();
    assert!(matches!(err, TodoError::ListNotFound(_)));
}

#[tokio::test]
async fn delete_task_keeps_the_rest_in_order() {
    let svc = service().await;
    let list = svc.create_list(new_list("groceries", "")).await.unwrap();
    let milk = svc.create_task(list.id, new_task("milk")).await.unwrap();
    let eggs = svc.create_task(list.id, new_task("eggs")).await.unwrap();
    let bread = svc.create_task(list.id, new_task("bread")).await.unwrap();
    svc.complete_task(list.id, bread.id).await.unwrap();

    svc.delete_task(list.id, eggs.id).await.unwrap();

    let tasks = svc.get_list(list.id).await.unwrap().tasks;
    assert_eq!(tasks.len(), 2);
    assert_eq!(tasks[0], milk);
    assert_eq!(tasks[1].id, bread.id);
    assert!(tasks[1].completed);

    let err = svc.delete_task(list.id, eggs.id).await.unwrap_err();
    assert!(matches!(err, TodoError::TaskNotFound { .. }));
}

#[tokio::test]
async fn delete_task_on_missing_list() {
    let svc = service().await;
    let err = svc
        .delete_task(Uuid::new_v4(), Uuid::new_v4())
        .await
        .unwrap_err();
    assert!(matches!(err, TodoError::ListNotFound(_)));
}

#[tokio::test]
async fn concurrent_task_creation_keeps_every_task() {
    let svc = service().await;
    let list = svc.create_list(new_list("groceries", "")).await.unwrap();

    let handles: Vec<_> = (0..20)
        .map(|i| {
            let svc = svc.clone();
            let name = format!("item-{i}");
            tokio::spawn(async move { svc.create_task(list.id, new_task(&name)).await })
        })
        .collect();
    for handle in handles {
        handle.await.unwrap().unwrap();
    }

    assert_eq!(svc.get_list(list.id).await.unwrap().tasks.len(), 20);
}
