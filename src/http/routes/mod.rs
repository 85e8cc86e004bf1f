pub mod ai;
pub mod items;
pub mod lists;

use crate::application::todo_service::TodoService;
use crate::domain::todo::{ItemId, ListId};
use crate::http::types::ApiError;

#[derive(Clone)]
pub struct AppState<S: TodoService> {
    pub service: S,
}

pub(crate) fn parse_list_id(s: &str) -> Result<ListId, ApiError> {
    uuid::Uuid::parse_str(s)
        .map(ListId)
        .map_err(|_| ApiError::InvalidRequest(format!("invalid list id {s:?}")))
}

pub(crate) fn parse_item_id(s: &str) -> Result<ItemId, ApiError> {
    uuid::Uuid::parse_str(s)
        .map(ItemId)
        .map_err(|_| ApiError::InvalidRequest(format!("invalid item id {s:?}")))
}
