//! Infrastructure adapters for application ports.

#![forbid(unsafe_code)]

mod file_local_storage;
mod in_memory_local_storage;
mod tracing_toast_sink;

pub use file_local_storage::FileLocalStorage;
pub use in_memory_local_storage::InMemoryLocalStorage;
pub use tracing_toast_sink::TracingToastSink;
