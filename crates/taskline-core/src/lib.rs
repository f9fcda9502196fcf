//! Core of Taskline: the JSON task store and the operations over it.

pub mod codec;
pub mod commands;
pub mod config;
pub mod error;
pub mod lists;
pub mod lock;
pub mod store;
pub mod task;
pub mod task_ops;

pub use commands::{Body, Notice, Reply, Taskline};
pub use error::TasklineError;
pub use store::{LoadOutcome, Store};
pub use task::{Document, Task, TaskList};

pub fn version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
