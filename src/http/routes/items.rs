use axum::extract::{Path, Query, State};
use axum::http::{StatusCode, header};
use axum::routing::get;
use axum::{Json, Router};

use super::{AppState, parse_item_id, parse_list_id};
use crate::application::todo_service::TodoService;
use crate::domain::todo::{CreateTodoItem, TodoItem, TodoState, UpdateTodoItem};
use crate::http::types::{ApiError, Pagination};

pub fn router<S: TodoService + Clone>(state: AppState<S>) -> Router {
    Router::new()
        .route("/lists/:list_id/items", get(get_items::<S>).post(create_item::<S>))
        .route(
            "/lists/:list_id/items/state/:state",
            get(get_items_by_state::<S>).put(set_items_state::<S>),
        )
        .route(
            "/lists/:list_id/items/:item_id",
            get(get_item::<S>).put(update_item::<S>).delete(delete_item::<S>),
        )
        .with_state(state)
}

fn parse_state(s: &str) -> Result<TodoState, ApiError> {
    TodoState::parse(s).ok_or_else(|| ApiError::InvalidRequest(format!("invalid state {s:?}")))
}

async fn create_item<S: TodoService>(
    State(state): State<AppState<S>>,
    Path(list_id): Path<String>,
    Json(payload): Json<CreateTodoItem>,
) -> Result<(StatusCode, [(header::HeaderName, String); 1], Json<TodoItem>), ApiError> {
    // The owning list is not required to exist.
    let list_id = parse_list_id(&list_id)?;
    let item = state.service.create_item(list_id, payload).await?;
    let location = format!("/lists/{}/items/{}", list_id.0, item.id.0);
    Ok((StatusCode::CREATED, [(header::LOCATION, location)], Json(item)))
}

async fn get_items<S: TodoService>(
    State(state): State<AppState<S>>,
    Path(list_id): Path<String>,
    Query(page): Query<Pagination>,
) -> Result<Json<Vec<TodoItem>>, ApiError> {
    let list_id = parse_list_id(&list_id)?;
    Ok(Json(state.service.list_items(list_id, None, page.top, page.skip).await?))
}

async fn get_items_by_state<S: TodoService>(
    State(state): State<AppState<S>>,
    Path((list_id, item_state)): Path<(String, String)>,
    Query(page): Query<Pagination>,
) -> Result<Json<Vec<TodoItem>>, ApiError> {
    let list_id = parse_list_id(&list_id)?;
    let item_state = parse_state(&item_state)?;
    Ok(Json(
        state
            .service
            .list_items(list_id, Some(item_state), page.top, page.skip)
            .await?,
    ))
}

async fn set_items_state<S: TodoService>(
    State(state): State<AppState<S>>,
    Path((_list_id, item_state)): Path<(String, String)>,
    Json(item_ids): Json<Vec<String>>,
) -> Result<Json<Vec<TodoItem>>, ApiError> {
    let item_state = parse_state(&item_state)?;
    if item_ids.is_empty() {
        return Err(ApiError::InvalidRequest("No items specified".into()));
    }
    let item_ids = item_ids
        .iter()
        .map(|s| parse_item_id(s))
        .collect::<Result<Vec<_>, _>>()?;
    let updated = state
        .service
        .set_items_state(item_state, item_ids)
        .await?
        .ok_or(ApiError::NotFound("Todo item not found"))?;
    Ok(Json(updated))
}

async fn get_item<S: TodoService>(
    State(state): State<AppState<S>>,
    Path((list_id, item_id)): Path<(String, String)>,
) -> Result<Json<TodoItem>, ApiError> {
    let list_id = parse_list_id(&list_id)?;
    let item_id = parse_item_id(&item_id)?;
    let item = state
        .service
        .get_item(list_id, item_id)
        .await?
        .ok_or(ApiError::NotFound("Todo item not found"))?;
    Ok(Json(item))
}

async fn update_item<S: TodoService>(
    State(state): State<AppState<S>>,
    Path((list_id, item_id)): Path<(String, String)>,
    Json(payload): Json<UpdateTodoItem>,
) -> Result<Json<TodoItem>, ApiError> {
    let list_id = parse_list_id(&list_id)?;
    let item_id = parse_item_id(&item_id)?;
    let item = state
        .service
        .update_item(list_id, item_id, payload)
        .await?
        .ok_or(ApiError::NotFound("Todo item not found"))?;
    Ok(Json(item))
}

async fn delete_item<S: TodoService>(
    State(state): State<AppState<S>>,
    Path((_list_id, item_id)): Path<(String, String)>,
) -> Result<StatusCode, ApiError> {
    // Delete resolves by item id alone, like the bulk transition path.
    let item_id = parse_item_id(&item_id)?;
    if state.service.delete_item(item_id).await? {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(ApiError::NotFound("Todo item not found"))
    }
}
