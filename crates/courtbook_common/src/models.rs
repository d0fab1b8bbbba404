// --- File: crates/courtbook_common/src/models.rs ---
use serde::{Deserialize, Serialize};

/// A list payload as returned by the backend.
///
/// List endpoints answer either with a bare JSON array or with a paginated
/// envelope that carries the items in `results`. Both shapes deserialize
/// into this type; `into_items` flattens them.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(untagged)]
pub enum ListResponse<T> {
    Paginated(Page<T>),
    Bare(Vec<T>),
}

/// Paginated envelope.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Page<T> {
    #[serde(default)]
    pub count: Option<u64>,
    #[serde(default)]
    pub next: Option<String>,
    #[serde(default)]
    pub previous: Option<String>,
    pub results: Vec<T>,
}

impl<T> ListResponse<T> {
    pub fn into_items(self) -> Vec<T> {
        match self {
            ListResponse::Paginated(page) => page.results,
            ListResponse::Bare(items) => items,
        }
    }

    /// Total number of items on the server, when the backend reports it.
    pub fn total(&self) -> Option<u64> {
        match self {
            ListResponse::Paginated(page) => page.count,
            ListResponse::Bare(items) => Some(items.len() as u64),
        }
    }

    pub fn has_next(&self) -> bool {
        matches!(self, ListResponse::Paginated(Page { next: Some(_), .. }))
    }
}
