//! Storage layer for Taskgate.

mod models;
mod repository;

pub use repository::TodoRepository;
