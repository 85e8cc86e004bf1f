use async_trait::async_trait;
use super::todo::{
    CreateTodoItem, CreateTodoList, ItemId, ListId, TodoItem, TodoList, TodoState,
    UpdateTodoItem, UpdateTodoList,
};

/// Storage contract for both entities: insert, get-by-id, find-by-filter with
/// skip/limit, partial update, delete. Missing records come back as `None`
/// (or `false` for deletes), never as errors.
#[async_trait]
pub trait TodoRepository: Send + Sync + 'static {
    async fn init(&self) -> anyhow::Result<()>;

    async fn create_list(&self, input: CreateTodoList) -> anyhow::Result<TodoList>;
    async fn get_list(&self, id: ListId) -> anyhow::Result<Option<TodoList>>;
    async fn list_lists(&self, top: Option<i64>, skip: Option<i64>) -> anyhow::Result<Vec<TodoList>>;
    async fn update_list(&self, id: ListId, input: UpdateTodoList) -> anyhow::Result<Option<TodoList>>;
    async fn delete_list(&self, id: ListId) -> anyhow::Result<bool>;

    async fn create_item(&self, list_id: ListId, input: CreateTodoItem) -> anyhow::Result<TodoItem>;
    /// Lookup scoped to the owning list.
    async fn get_item(&self, list_id: ListId, item_id: ItemId) -> anyhow::Result<Option<TodoItem>>;
    /// Global lookup by item id, regardless of list. Used by the bulk
    /// transition and delete paths.
    async fn get_item_by_id(&self, item_id: ItemId) -> anyhow::Result<Option<TodoItem>>;
    async fn list_items(
        &self,
        list_id: ListId,
        state: Option<TodoState>,
        top: Option<i64>,
        skip: Option<i64>,
    ) -> anyhow::Result<Vec<TodoItem>>;
    async fn update_item(
        &self,
        list_id: ListId,
        item_id: ItemId,
        input: UpdateTodoItem,
    ) -> anyhow::Result<Option<TodoItem>>;
    async fn set_item_state(&self, item_id: ItemId, state: TodoState) -> anyhow::Result<Option<TodoItem>>;
    async fn delete_item(&self, item_id: ItemId) -> anyhow::Result<bool>;
}
