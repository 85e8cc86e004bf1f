use axum::extract::{Path, Query, State};
use axum::http::{StatusCode, header};
use axum::routing::get;
use axum::{Json, Router};

use super::{AppState, parse_list_id};
use crate::application::todo_service::TodoService;
use crate::domain::todo::{CreateTodoList, TodoList, UpdateTodoList};
use crate::http::types::{ApiError, Pagination};

pub fn router<S: TodoService + Clone>(state: AppState<S>) -> Router {
    Router::new()
        .route("/lists", get(get_lists::<S>).post(create_list::<S>))
        .route(
            "/lists/:list_id",
            get(get_list::<S>).put(update_list::<S>).delete(delete_list::<S>),
        )
        .with_state(state)
}

async fn get_lists<S: TodoService>(
    State(state): State<AppState<S>>,
    Query(page): Query<Pagination>,
) -> Result<Json<Vec<TodoList>>, ApiError> {
    Ok(Json(state.service.list_lists(page.top, page.skip).await?))
}

async fn create_list<S: TodoService>(
    State(state): State<AppState<S>>,
    Json(payload): Json<CreateTodoList>,
) -> Result<(StatusCode, [(header::HeaderName, String); 1], Json<TodoList>), ApiError> {
    let list = state.service.create_list(payload).await?;
    let location = format!("/lists/{}", list.id.0);
    Ok((StatusCode::CREATED, [(header::LOCATION, location)], Json(list)))
}

async fn get_list<S: TodoService>(
    State(state): State<AppState<S>>,
    Path(list_id): Path<String>,
) -> Result<Json<TodoList>, ApiError> {
    let id = parse_list_id(&list_id)?;
    let list = state
        .service
        .get_list(id)
        .await?
        .ok_or(ApiError::NotFound("Todo list not found"))?;
    Ok(Json(list))
}

async fn update_list<S: TodoService>(
    State(state): State<AppState<S>>,
    Path(list_id): Path<String>,
    Json(payload): Json<UpdateTodoList>,
) -> Result<Json<TodoList>, ApiError> {
    let id = parse_list_id(&list_id)?;
    let list = state
        .service
        .update_list(id, payload)
        .await?
        .ok_or(ApiError::NotFound("Todo list not found"))?;
    Ok(Json(list))
}

async fn delete_list<S: TodoService>(
    State(state): State<AppState<S>>,
    Path(list_id): Path<String>,
) -> Result<StatusCode, ApiError> {
    let id = parse_list_id(&list_id)?;
    if state.service.delete_list(id).await? {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(ApiError::NotFound("Todo list not found"))
    }
}
