// --- File: crates/courtbook_client/src/lib.rs ---

pub mod client; // Authenticated request pipeline
pub mod endpoints; // Backend paths
pub mod error; // ApiError
pub mod query; // Query-string construction
pub mod session; // Session state and refresh gate
pub mod storage; // Session persistence

pub use client::{ApiClient, ApiClientBuilder};
pub use error::ApiError;
pub use query::{QueryParams, QueryValue, ToQuery};
pub use session::{Credentials, SessionManager};
pub use storage::{FileStore, MemoryStore, SessionStore, StorageError};

// Re-exported so callers can name verbs without depending on reqwest directly.
pub use reqwest::Method;
