#[cfg(test)]
mod tests {
    use super::super::todo_service::{TodoService, TodoServiceImpl};
    use crate::domain::{
        repository::TodoRepository,
        todo::{
            CreateTodoItem, CreateTodoList, ItemId, ListId, TodoItem, TodoList, TodoState,
            UpdateTodoItem, UpdateTodoList,
        },
    };
    use anyhow::Result;
    use async_trait::async_trait;
    use chrono::Utc;
    use std::sync::{Arc, Mutex};

    #[derive(Clone, Default)]
    struct InMemoryRepo {
        // Vecs keep storage-native (insertion) order for pagination.
        lists: Arc<Mutex<Vec<TodoList>>>,
        items: Arc<Mutex<Vec<TodoItem>>>,
    }

    fn page<T: Clone>(rows: &[T], top: Option<i64>, skip: Option<i64>) -> Vec<T> {
        let skip = skip.unwrap_or(0).max(0) as usize;
        let top = top.map(|t| t.max(0) as usize).unwrap_or(usize::MAX);
        rows.iter().skip(skip).take(top).cloned().collect()
    }

    #[async_trait]
    impl TodoRepository for InMemoryRepo {
        async fn init(&self) -> Result<()> { Ok(()) }

        async fn create_list(&self, input: CreateTodoList) -> Result<TodoList> {
            let list = TodoList {
                id: ListId::default(),
                name: input.name,
                description: input.description,
                created_date: Utc::now(),
                updated_date: None,
            };
            self.lists.lock().unwrap().push(list.clone());
            Ok(list)
        }

        async fn get_list(&self, id: ListId) -> Result<Option<TodoList>> {
            Ok(self.lists.lock().unwrap().iter().find(|l| l.id == id).cloned())
        }

        async fn list_lists(&self, top: Option<i64>, skip: Option<i64>) -> Result<Vec<TodoList>> {
            Ok(page(&self.lists.lock().unwrap(), top, skip))
        }

        async fn update_list(&self, id: ListId, input: UpdateTodoList) -> Result<Option<TodoList>> {
            let mut lists = self.lists.lock().unwrap();
            let Some(list) = lists.iter_mut().find(|l| l.id == id) else { return Ok(None) };
            if let Some(n) = input.name { list.name = n; }
            if let Some(d) = input.description { list.description = Some(d); }
            list.updated_date = Some(Utc::now());
            Ok(Some(list.clone()))
        }

        async fn delete_list(&self, id: ListId) -> Result<bool> {
            let mut lists = self.lists.lock().unwrap();
            let before = lists.len();
            lists.retain(|l| l.id != id);
            Ok(lists.len() < before)
        }

        async fn create_item(&self, list_id: ListId, input: CreateTodoItem) -> Result<TodoItem> {
            let item = TodoItem {
                id: ItemId::default(),
                list_id,
                name: input.name,
                description: input.description,
                state: input.state,
                due_date: input.due_date,
                completed_date: input.completed_date,
                created_date: Utc::now(),
                updated_date: None,
            };
            self.items.lock().unwrap().push(item.clone());
            Ok(item)
        }

        async fn get_item(&self, list_id: ListId, item_id: ItemId) -> Result<Option<TodoItem>> {
            Ok(self
                .items
                .lock()
                .unwrap()
                .iter()
                .find(|i| i.list_id == list_id && i.id == item_id)
                .cloned())
        }

        async fn get_item_by_id(&self, item_id: ItemId) -> Result<Option<TodoItem>> {
            Ok(self.items.lock().unwrap().iter().find(|i| i.id == item_id).cloned())
        }

        async fn list_items(
            &self,
            list_id: ListId,
            state: Option<TodoState>,
            top: Option<i64>,
            skip: Option<i64>,
        ) -> Result<Vec<TodoItem>> {
            let items = self.items.lock().unwrap();
            let matching: Vec<TodoItem> = items
                .iter()
                .filter(|i| i.list_id == list_id && state.is_none_or(|s| i.state == Some(s)))
                .cloned()
                .collect();
            Ok(page(&matching, top, skip))
        }

        async fn update_item(
            &self,
            list_id: ListId,
            item_id: ItemId,
            input: UpdateTodoItem,
        ) -> Result<Option<TodoItem>> {
            let mut items = self.items.lock().unwrap();
            let Some(item) = items.iter_mut().find(|i| i.list_id == list_id && i.id == item_id)
            else { return Ok(None) };
            if let Some(n) = input.name { item.name = n; }
            if let Some(d) = input.description { item.description = Some(d); }
            if let Some(s) = input.state { item.state = Some(s); }
            if let Some(d) = input.due_date { item.due_date = Some(d); }
            if let Some(c) = input.completed_date { item.completed_date = Some(c); }
            item.updated_date = Some(Utc::now());
            Ok(Some(item.clone()))
        }

        async fn set_item_state(&self, item_id: ItemId, state: TodoState) -> Result<Option<TodoItem>> {
            let mut items = self.items.lock().unwrap();
            let Some(item) = items.iter_mut().find(|i| i.id == item_id) else { return Ok(None) };
            item.state = Some(state);
            item.updated_date = Some(Utc::now());
            Ok(Some(item.clone()))
        }

        async fn delete_item(&self, item_id: ItemId) -> Result<bool> {
            let mut items = self.items.lock().unwrap();
            let before = items.len();
            items.retain(|i| i.id != item_id);
            Ok(items.len() < before)
        }
    }

    fn service() -> TodoServiceImpl<InMemoryRepo> {
        TodoServiceImpl::new(InMemoryRepo::default())
    }

    fn new_list(name: &str) -> CreateTodoList {
        CreateTodoList { name: name.into(), description: None }
    }

    fn new_item(name: &str, state: Option<TodoState>) -> CreateTodoItem {
        CreateTodoItem {
            name: name.into(),
            description: None,
            state,
            due_date: None,
            completed_date: None,
        }
    }

    #[tokio::test]
    async fn create_then_get_list_round_trips_fields() {
        let service = service();
        let created = service
            .create_list(CreateTodoList { name: "Chores".into(), description: Some("weekly".into()) })
            .await
            .unwrap();
        assert!(created.updated_date.is_none());

        let got = service.get_list(created.id).await.unwrap().unwrap();
        assert_eq!(got, created);
    }

    #[tokio::test]
    async fn partial_list_update_leaves_name_and_sets_updated_date() {
        let service = service();
        let created = service.create_list(new_list("Chores")).await.unwrap();

        let updated = service
            .update_list(created.id, UpdateTodoList { name: None, description: Some("weekend".into()) })
            .await
            .unwrap()
            .unwrap();

        assert_eq!(updated.name, "Chores");
        assert_eq!(updated.description.as_deref(), Some("weekend"));
        assert!(updated.updated_date.is_some());
        assert_eq!(updated.created_date, created.created_date);
    }

    #[tokio::test]
    async fn update_of_missing_list_is_none() {
        let service = service();
        let missing = service
            .update_list(ListId::default(), UpdateTodoList::default())
            .await
            .unwrap();
        assert!(missing.is_none());
    }

    #[tokio::test]
    async fn deleting_a_list_orphans_its_items_but_keeps_them() {
        let service = service();
        let list = service.create_list(new_list("Chores")).await.unwrap();
        let item = service.create_item(list.id, new_item("Dishes", None)).await.unwrap();

        assert!(service.delete_list(list.id).await.unwrap());
        assert!(service.get_list(list.id).await.unwrap().is_none());

        // Ownership is a query filter, not a constraint: the orphan survives
        // and is still reachable through the old list id.
        let orphan = service.get_item(list.id, item.id).await.unwrap().unwrap();
        assert_eq!(orphan.id, item.id);
        assert_eq!(service.list_items(list.id, None, None, None).await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn state_filter_matches_exactly() {
        let service = service();
        let list = service.create_list(new_list("Chores")).await.unwrap();
        let other = service.create_list(new_list("Work")).await.unwrap();

        let done = service.create_item(list.id, new_item("a", Some(TodoState::Done))).await.unwrap();
        service.create_item(list.id, new_item("b", Some(TodoState::InProgress))).await.unwrap();
        service.create_item(list.id, new_item("c", None)).await.unwrap();
        service.create_item(other.id, new_item("d", Some(TodoState::Done))).await.unwrap();

        let filtered = service
            .list_items(list.id, Some(TodoState::Done), None, None)
            .await
            .unwrap();
        assert_eq!(filtered.len(), 1);
        assert_eq!(filtered[0].id, done.id);
    }

    #[tokio::test]
    async fn pagination_skips_then_limits() {
        let service = service();
        for n in 0..5 {
            service.create_list(new_list(&format!("l{n}"))).await.unwrap();
        }

        let window = service.list_lists(Some(2), Some(1)).await.unwrap();
        assert_eq!(window.len(), 2);
        assert_eq!(window[0].name, "l1");
        assert_eq!(window[1].name, "l2");

        assert_eq!(service.list_lists(None, Some(4)).await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn bulk_transition_updates_all_in_input_order() {
        let service = service();
        let list = service.create_list(new_list("Chores")).await.unwrap();
        let a = service.create_item(list.id, new_item("a", None)).await.unwrap();
        let b = service.create_item(list.id, new_item("b", Some(TodoState::Todo))).await.unwrap();

        let updated = service
            .set_items_state(TodoState::Done, vec![b.id, a.id])
            .await
            .unwrap()
            .unwrap();

        assert_eq!(updated.iter().map(|i| i.id).collect::<Vec<_>>(), vec![b.id, a.id]);
        assert!(updated.iter().all(|i| i.state == Some(TodoState::Done)));
        assert!(updated.iter().all(|i| i.updated_date.is_some()));
    }

    #[tokio::test]
    async fn bulk_transition_keeps_prefix_when_a_later_id_is_missing() {
        let service = service();
        let list = service.create_list(new_list("Chores")).await.unwrap();
        let a = service.create_item(list.id, new_item("a", None)).await.unwrap();
        let b = service.create_item(list.id, new_item("b", None)).await.unwrap();

        let outcome = service
            .set_items_state(TodoState::Done, vec![a.id, b.id, ItemId::default()])
            .await
            .unwrap();
        assert!(outcome.is_none());

        // No rollback: the prefix before the missing id is already persisted.
        let a = service.get_item(list.id, a.id).await.unwrap().unwrap();
        let b = service.get_item(list.id, b.id).await.unwrap().unwrap();
        assert_eq!(a.state, Some(TodoState::Done));
        assert_eq!(b.state, Some(TodoState::Done));
    }

    #[tokio::test]
    async fn scoped_item_lookup_misses_across_lists() {
        let service = service();
        let list = service.create_list(new_list("Chores")).await.unwrap();
        let item = service.create_item(list.id, new_item("a", None)).await.unwrap();

        assert!(service.get_item(ListId::default(), item.id).await.unwrap().is_none());
        assert!(service.get_item(list.id, item.id).await.unwrap().is_some());
    }
}
