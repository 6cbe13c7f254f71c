//! Domain types for Taskgate.

mod todo;

pub use todo::*;
