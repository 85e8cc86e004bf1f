pub mod repository;
pub mod todo;
