pub mod ai_service;
pub mod todo_service;

#[cfg(test)]
mod todo_service_tests;
