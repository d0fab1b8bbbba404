// --- File: crates/courtbook_common/src/lib.rs ---

// Declare modules within this crate
pub mod error; // Error handling
pub mod http; // HTTP utilities
pub mod logging; // Logging utilities
pub mod models; // Shared response shapes

// Re-export error types and utilities for easier access
pub use error::{validation_error, Context, CourtbookError, HttpStatus};

// Re-export HTTP utilities for easier access
pub use http::{
    append_query,
    client::{client_from_config, create_client, DEFAULT_USER_AGENT},
    join_url,
};

// Re-export logging utilities for easier access
pub use logging::{init, init_from_config, init_with_level, log_result};

pub use models::{ListResponse, Page};
