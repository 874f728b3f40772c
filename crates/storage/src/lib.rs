#![forbid(unsafe_code)]

pub mod records;
pub mod repository;
pub mod session_store;
pub mod sqlite;

pub use repository::{InMemoryStore, KeyValueStore, Storage, StorageError};
pub use session_store::{QUIZ_PROGRESS_KEY, SessionStore, USER_KEY};
