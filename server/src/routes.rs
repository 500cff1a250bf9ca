use axum::{
    extract::{rejection::JsonRejection, FromRequestParts, Path, State},
    http::StatusCode,
    routing::{get, post},
    Json, Router,
};
use serde::{Deserialize, Serialize};
use todo_core::{NewList, NewTask, Task, TodoList, TodoService};
use uuid::Uuid;

use crate::error::ApiError;

pub const WELCOME: &str = "Welcome to todo-server";

/// Body returned by the delete endpoints.
#[derive(Debug, Serialize, Deserialize)]
pub struct Deleted {
    pub deleted: Uuid,
}

type ApiResult<T> = Result<T, ApiError>;

/// `Path` whose rejection renders as an `ApiError` JSON body.
#[derive(FromRequestParts)]
#[from_request(via(Path), rejection(ApiError))]
struct Ids<T>(T);

pub fn router() -> Router<TodoService> {
    Router::new()
        .route("/todo/", get(welcome))
        .route("/todo/lists", get(get_all_lists).post(create_list))
        .route("/todo/list/{id}", get(get_list).delete(delete_list))
        .route("/todo/list/{id}/tasks", post(create_task))
        .route(
            "/todo/list/{id}/tasks/{task_id}",
            get(get_task).put(complete_task).delete(delete_task),
        )
}

async fn welcome() -> &'static str {
    WELCOME
}

async fn get_all_lists(State(service): State<TodoService>) -> ApiResult<Json<Vec<TodoList>>> {
    Ok(Json(service.get_all_lists().await?))
}

async fn create_list(
    State(service): State<TodoService>,
    input: Result<Json<NewList>, JsonRejection>,
) -> ApiResult<(StatusCode, Json<TodoList>)> {
    let Json(input) = input?;
    let list = service.create_list(input).await?;
    Ok((StatusCode::CREATED, Json(list)))
}

async fn get_list(
    State(service): State<TodoService>,
    Ids(id): Ids<Uuid>,
) -> ApiResult<Json<TodoList>> {
    Ok(Json(service.get_list(id).await?))
}

async fn delete_list(
    State(service): State<TodoService>,
    Ids(id): Ids<Uuid>,
) -> ApiResult<Json<Deleted>> {
    service.delete_list(id).await?;
    Ok(Json(Deleted { deleted: id }))
}

async fn create_task(
    State(service): State<TodoService>,
    Ids(list_id): Ids<Uuid>,
    input: Result<Json<NewTask>, JsonRejection>,
) -> ApiResult<(StatusCode, Json<Task>)> {
    let Json(input) = input?;
    let task = service.create_task(list_id, input).await?;
    Ok((StatusCode::CREATED, Json(task)))
}

async fn get_task(
    State(service): State<TodoService>,
    Ids((list_id, task_id)): Ids<(Uuid, Uuid)>,
) -> ApiResult<Json<Task>> {
    Ok(Json(service.get_task(list_id, task_id).await?))
}

async fn complete_task(
    State(service): State<TodoService>,
    Ids((list_id, task_id)): Ids<(Uuid, Uuid)>,
) -> ApiResult<Json<Task>> {
    Ok(Json(service.complete_task(list_id, task_id).await?))
}

async fn delete_task(
    State(service): State<TodoService>,
    Ids((list_id, task_id)): Ids<(Uuid, Uuid)>,
) -> ApiResult<Json<Deleted>> {
    service.delete_task(list_id, task_id).await?;
    Ok(Json(Deleted { deleted: task_id }))
}
