use crate::domain::repository::TodoRepository;
use crate::domain::todo::{
    CreateTodoItem, CreateTodoList, ItemId, ListId, TodoItem, TodoList, TodoState,
    UpdateTodoItem, UpdateTodoList,
};
use anyhow::Result;
use async_trait::async_trait;

#[async_trait]
pub trait TodoService: Send + Sync + 'static {
    async fn list_lists(&self, top: Option<i64>, skip: Option<i64>) -> Result<Vec<TodoList>>;
    async fn create_list(&self, input: CreateTodoList) -> Result<TodoList>;
    async fn get_list(&self, id: ListId) -> Result<Option<TodoList>>;
    async fn update_list(&self, id: ListId, input: UpdateTodoList) -> Result<Option<TodoList>>;
    async fn delete_list(&self, id: ListId) -> Result<bool>;

    async fn list_items(
        &self,
        list_id: ListId,
        state: Option<TodoState>,
        top: Option<i64>,
        skip: Option<i64>,
    ) -> Result<Vec<TodoItem>>;
    async fn create_item(&self, list_id: ListId, input: CreateTodoItem) -> Result<TodoItem>;
    async fn get_item(&self, list_id: ListId, item_id: ItemId) -> Result<Option<TodoItem>>;
    async fn update_item(
        &self,
        list_id: ListId,
        item_id: ItemId,
        input: UpdateTodoItem,
    ) -> Result<Option<TodoItem>>;
    async fn delete_item(&self, item_id: ItemId) -> Result<bool>;

    /// Applies `state` to each item in `item_ids`, one by one, in order.
    /// Returns `None` as soon as an id does not resolve; items updated before
    /// the miss stay updated. There is no rollback.
    async fn set_items_state(
        &self,
        state: TodoState,
        item_ids: Vec<ItemId>,
    ) -> Result<Option<Vec<TodoItem>>>;
}

#[derive(Clone)]
pub struct TodoServiceImpl<R: TodoRepository> {
    repo: R,
}

impl<R: TodoRepository> TodoServiceImpl<R> {
    pub fn new(repo: R) -> Self { Self { repo } }
}

#[async_trait]
impl<R: TodoRepository> TodoService for TodoServiceImpl<R> {
    async fn list_lists(&self, top: Option<i64>, skip: Option<i64>) -> Result<Vec<TodoList>> {
        self.repo.list_lists(top, skip).await
    }

    async fn create_list(&self, input: CreateTodoList) -> Result<TodoList> {
        self.repo.create_list(input).await
    }

    async fn get_list(&self, id: ListId) -> Result<Option<TodoList>> {
        self.repo.get_list(id).await
    }

    async fn update_list(&self, id: ListId, input: UpdateTodoList) -> Result<Option<TodoList>> {
        self.repo.update_list(id, input).await
    }

    async fn delete_list(&self, id: ListId) -> Result<bool> {
        // Items referencing the list are left alone; orphans stay reachable.
        self.repo.delete_list(id).await
    }

    async fn list_items(
        &self,
        list_id: ListId,
        state: Option<TodoState>,
        top: Option<i64>,
        skip: Option<i64>,
    ) -> Result<Vec<TodoItem>> {
        self.repo.list_items(list_id, state, top, skip).await
    }

    async fn create_item(&self, list_id: ListId, input: CreateTodoItem) -> Result<TodoItem> {
        // The owning list is not checked for existence.
        self.repo.create_item(list_id, input).await
    }

    async fn get_item(&self, list_id: ListId, item_id: ItemId) -> Result<Option<TodoItem>> {
        self.repo.get_item(list_id, item_id).await
    }

    async fn update_item(
        &self,
        list_id: ListId,
        item_id: ItemId,
        input: UpdateTodoItem,
    ) -> Result<Option<TodoItem>> {
        self.repo.update_item(list_id, item_id, input).await
    }

    async fn delete_item(&self, item_id: ItemId) -> Result<bool> {
        // Deletion resolves by item id alone, not scoped to the list.
        self.repo.delete_item(item_id).await
    }

    async fn set_items_state(
        &self,
        state: TodoState,
        item_ids: Vec<ItemId>,
    ) -> Result<Option<Vec<TodoItem>>> {
        let mut updated = Vec::with_capacity(item_ids.len());
        for item_id in item_ids {
            match self.repo.set_item_state(item_id, state).await? {
                Some(item) => updated.push(item),
                None => {
                    tracing::warn!(item_id = %item_id.0, applied = updated.len(), "bulk state transition aborted on missing item");
                    return Ok(None);
                }
            }
        }
        Ok(Some(updated))
    }
}
