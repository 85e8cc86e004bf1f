pub mod openai_client;
pub mod sqlite_repo;
