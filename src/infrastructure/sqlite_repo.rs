use std::sync::Arc;

use anyhow::Result;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{Pool, Row, Sqlite, sqlite::{SqlitePoolOptions, SqliteRow}};
use uuid::Uuid;

use crate::domain::{
    repository::TodoRepository,
    todo::{
        CreateTodoItem, CreateTodoList, ItemId, ListId, TodoItem, TodoList, TodoState,
        UpdateTodoItem, UpdateTodoList,
    },
};

#[derive(Clone)]
pub struct SqliteTodoRepository {
    pool: Arc<Pool<Sqlite>>,
}

impl SqliteTodoRepository {
    pub async fn connect(database_url: &str) -> Result<Self> {
        // An in-memory database exists per connection, so it gets exactly one.
        let max_connections = if database_url.contains(":memory:") { 1 } else { 5 };
        let pool = SqlitePoolOptions::new()
            .max_connections(max_connections)
            .connect(database_url)
            .await?;
        Ok(Self { pool: Arc::new(pool) })
    }
}

#[async_trait]
impl TodoRepository for SqliteTodoRepository {
    async fn init(&self) -> Result<()> {
        sqlx::query(
            "CREATE TABLE IF NOT EXISTS lists (
                id TEXT PRIMARY KEY,
                name TEXT NOT NULL,
                description TEXT,
                created_date TEXT NOT NULL,
                updated_date TEXT
            )",
        )
        .execute(&*self.pool)
        .await?;
        // No foreign key on list_id: ownership is a filter, not a constraint,
        // and items deliberately outlive their list.
        sqlx::query(
            "CREATE TABLE IF NOT EXISTS items (
                id TEXT PRIMARY KEY,
                list_id TEXT NOT NULL,
                name TEXT NOT NULL,
                description TEXT,
                state TEXT,
                due_date TEXT,
                completed_date TEXT,
                created_date TEXT NOT NULL,
                updated_date TEXT
            )",
        )
        .execute(&*self.pool)
        .await?;
        sqlx::query("CREATE INDEX IF NOT EXISTS items_list_id ON items (list_id)")
            .execute(&*self.pool)
            .await?;
        Ok(())
    }

    async fn create_list(&self, input: CreateTodoList) -> Result<TodoList> {
        let list = TodoList {
            id: ListId::default(),
            name: input.name,
            description: input.description,
            created_date: Utc::now(),
            updated_date: None,
        };
        sqlx::query(
            "INSERT INTO lists (id, name, description, created_date, updated_date)
             VALUES (?1, ?2, ?3, ?4, NULL)",
        )
        .bind(list.id.0.to_string())
        .bind(&list.name)
        .bind(&list.description)
        .bind(list.created_date.to_rfc3339())
        .execute(&*self.pool)
        .await?;
        Ok(list)
    }

    async fn get_list(&self, id: ListId) -> Result<Option<TodoList>> {
        let row = sqlx::query("SELECT id, name, description, created_date, updated_date FROM lists WHERE id = ?1")
            .bind(id.0.to_string())
            .fetch_optional(&*self.pool)
            .await?;
        row.map(row_to_list).transpose()
    }

    async fn list_lists(&self, top: Option<i64>, skip: Option<i64>) -> Result<Vec<TodoList>> {
        let rows = sqlx::query(
            "SELECT id, name, description, created_date, updated_date FROM lists LIMIT ?1 OFFSET ?2",
        )
        .bind(top.unwrap_or(-1))
        .bind(skip.unwrap_or(0))
        .fetch_all(&*self.pool)
        .await?;
        rows.into_iter().map(row_to_list).collect()
    }

    async fn update_list(&self, id: ListId, input: UpdateTodoList) -> Result<Option<TodoList>> {
        // Read-modify-write; concurrent writers race with last-write-wins.
        let Some(mut list) = self.get_list(id).await? else { return Ok(None) };

        if let Some(n) = input.name { list.name = n; }
        if let Some(d) = input.description { list.description = Some(d); }
        list.updated_date = Some(Utc::now());

        sqlx::query("UPDATE lists SET name = ?2, description = ?3, updated_date = ?4 WHERE id = ?1")
            .bind(list.id.0.to_string())
            .bind(&list.name)
            .bind(&list.description)
            .bind(list.updated_date.map(|t| t.to_rfc3339()))
            .execute(&*self.pool)
            .await?;

        Ok(Some(list))
    }

    async fn delete_list(&self, id: ListId) -> Result<bool> {
        let result = sqlx::query("DELETE FROM lists WHERE id = ?1")
            .bind(id.0.to_string())
            .execute(&*self.pool)
            .await?;
        Ok(result.rows_affected() > 0)
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
        sqlx::query(
            "INSERT INTO items (id, list_id, name, description, state, due_date, completed_date, created_date, updated_date)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, NULL)",
        )
        .bind(item.id.0.to_string())
        .bind(item.list_id.0.to_string())
        .bind(&item.name)
        .bind(&item.description)
        .bind(item.state.map(|s| s.as_str()))
        .bind(item.due_date.map(|t| t.to_rfc3339()))
        .bind(item.completed_date.map(|t| t.to_rfc3339()))
        .bind(item.created_date.to_rfc3339())
        .execute(&*self.pool)
        .await?;
        Ok(item)
    }

    async fn get_item(&self, list_id: ListId, item_id: ItemId) -> Result<Option<TodoItem>> {
        let row = sqlx::query(&format!("SELECT {ITEM_COLUMNS} FROM items WHERE list_id = ?1 AND id = ?2"))
            .bind(list_id.0.to_string())
            .bind(item_id.0.to_string())
            .fetch_optional(&*self.pool)
            .await?;
        row.map(row_to_item).transpose()
    }

    async fn get_item_by_id(&self, item_id: ItemId) -> Result<Option<TodoItem>> {
        let row = sqlx::query(&format!("SELECT {ITEM_COLUMNS} FROM items WHERE id = ?1"))
            .bind(item_id.0.to_string())
            .fetch_optional(&*self.pool)
            .await?;
        row.map(row_to_item).transpose()
    }

    async fn list_items(
        &self,
        list_id: ListId,
        state: Option<TodoState>,
        top: Option<i64>,
        skip: Option<i64>,
    ) -> Result<Vec<TodoItem>> {
        let rows = match state {
            Some(state) => {
                sqlx::query(&format!(
                    "SELECT {ITEM_COLUMNS} FROM items WHERE list_id = ?1 AND state = ?2 LIMIT ?3 OFFSET ?4"
                ))
                .bind(list_id.0.to_string())
                .bind(state.as_str())
                .bind(top.unwrap_or(-1))
                .bind(skip.unwrap_or(0))
                .fetch_all(&*self.pool)
                .await?
            }
            None => {
                sqlx::query(&format!(
                    "SELECT {ITEM_COLUMNS} FROM items WHERE list_id = ?1 LIMIT ?2 OFFSET ?3"
                ))
                .bind(list_id.0.to_string())
                .bind(top.unwrap_or(-1))
                .bind(skip.unwrap_or(0))
                .fetch_all(&*self.pool)
                .await?
            }
        };
        rows.into_iter().map(row_to_item).collect()
    }

    async fn update_item(
        &self,
        list_id: ListId,
        item_id: ItemId,
        input: UpdateTodoItem,
    ) -> Result<Option<TodoItem>> {
        let Some(mut item) = self.get_item(list_id, item_id).await? else { return Ok(None) };

        if let Some(n) = input.name { item.name = n; }
        if let Some(d) = input.description { item.description = Some(d); }
        if let Some(s) = input.state { item.state = Some(s); }
        if let Some(d) = input.due_date { item.due_date = Some(d); }
        if let Some(c) = input.completed_date { item.completed_date = Some(c); }
        item.updated_date = Some(Utc::now());

        self.write_item(&item).await?;
        Ok(Some(item))
    }

    async fn set_item_state(&self, item_id: ItemId, state: TodoState) -> Result<Option<TodoItem>> {
        let Some(mut item) = self.get_item_by_id(item_id).await? else { return Ok(None) };
        item.state = Some(state);
        item.updated_date = Some(Utc::now());
        self.write_item(&item).await?;
        Ok(Some(item))
    }

    async fn delete_item(&self, item_id: ItemId) -> Result<bool> {
        let result = sqlx::query("DELETE FROM items WHERE id = ?1")
            .bind(item_id.0.to_string())
            .execute(&*self.pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}

impl SqliteTodoRepository {
    async fn write_item(&self, item: &TodoItem) -> Result<()> {
        sqlx::query(
            "UPDATE items SET name = ?2, description = ?3, state = ?4, due_date = ?5,
                    completed_date = ?6, updated_date = ?7 WHERE id = ?1",
        )
        .bind(item.id.0.to_string())
        .bind(&item.name)
        .bind(&item.description)
        .bind(item.state.map(|s| s.as_str()))
        .bind(item.due_date.map(|t| t.to_rfc3339()))
        .bind(item.completed_date.map(|t| t.to_rfc3339()))
        .bind(item.updated_date.map(|t| t.to_rfc3339()))
        .execute(&*self.pool)
        .await?;
        Ok(())
    }
}

const ITEM_COLUMNS: &str =
    "id, list_id, name, description, state, due_date, completed_date, created_date, updated_date";

fn row_to_list(row: SqliteRow) -> Result<TodoList> {
    Ok(TodoList {
        id: ListId(parse_uuid(row.get("id"))?),
        name: row.get("name"),
        description: row.get("description"),
        created_date: parse_date(row.get("created_date"))?,
        updated_date: parse_date_opt(row.get("updated_date"))?,
    })
}

fn row_to_item(row: SqliteRow) -> Result<TodoItem> {
    let state: Option<String> = row.get("state");
    Ok(TodoItem {
        id: ItemId(parse_uuid(row.get("id"))?),
        list_id: ListId(parse_uuid(row.get("list_id"))?),
        name: row.get("name"),
        description: row.get("description"),
        state: state
            .map(|s| TodoState::parse(&s).ok_or_else(|| anyhow::anyhow!("unknown item state {s:?}")))
            .transpose()?,
        due_date: parse_date_opt(row.get("due_date"))?,
        completed_date: parse_date_opt(row.get("completed_date"))?,
        created_date: parse_date(row.get("created_date"))?,
        updated_date: parse_date_opt(row.get("updated_date"))?,
    })
}

fn parse_uuid(value: String) -> Result<Uuid> {
    Ok(Uuid::parse_str(&value)?)
}

fn parse_date(value: String) -> Result<DateTime<Utc>> {
    Ok(DateTime::parse_from_rfc3339(&value)?.with_timezone(&Utc))
}

fn parse_date_opt(value: Option<String>) -> Result<Option<DateTime<Utc>>> {
    value.map(parse_date).transpose()
}
