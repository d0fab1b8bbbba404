// --- File: crates/courtbook_services/src/api.rs ---
//! Small typed helpers shared by the resource services.

use courtbook_client::{ApiClient, ApiError, Method, QueryParams};
use courtbook_common::ListResponse;
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::json;

/// GETs a list endpoint, accepting a bare array or a paginated envelope.
///
/// An empty body reads as an empty list.
pub(crate) async fn fetch_list<T: DeserializeOwned>(
    client: &ApiClient,
    endpoint: &str,
    query: Option<&QueryParams>,
) -> Result<Vec<T>, ApiError> {
    let list: Option<ListResponse<T>> = client
        .request_as(Method::GET, endpoint, None, query)
        .await?;
    Ok(list.map(ListResponse::into_items).unwrap_or_default())
}

pub(crate) async fn fetch_one<T: DeserializeOwned>(
    client: &ApiClient,
    endpoint: &str,
    query: Option<&QueryParams>,
) -> Result<T, ApiError> {
    client.request_as(Method::GET, endpoint, None, query).await
}

/// Sends `body` with `method` and decodes the answer.
pub(crate) async fn send_json<B: Serialize + ?Sized, T: DeserializeOwned>(
    client: &ApiClient,
    method: Method,
    endpoint: &str,
    body: &B,
) -> Result<T, ApiError> {
    let body = serde_json::to_value(body)?;
    client.request_as(method, endpoint, Some(&body), None).await
}

/// POSTs an empty JSON object and decodes the answer.
pub(crate) async fn post_empty<T: DeserializeOwned>(
    client: &ApiClient,
    endpoint: &str,
) -> Result<T, ApiError> {
    client
        .request_as(Method::POST, endpoint, Some(&json!({})), None)
        .await
}
