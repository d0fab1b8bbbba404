//! HTTP plumbing shared by the client crates.

pub mod client;

/// Joins a base URL and a relative endpoint path.
///
/// Exactly one slash separates the two parts, so `"http://h/api/"` and
/// `"/courts/"` give `"http://h/api/courts/"`.
pub fn join_url(base_url: &str, endpoint: &str) -> String {
    let base = base_url.trim_end_matches('/');
    if endpoint.is_empty() {
        return base.to_string();
    }
    if endpoint.starts_with('/') {
        format!("{}{}", base, endpoint)
    } else {
        format!("{}/{}", base, endpoint)
    }
}

/// Appends an already-encoded query string to a URL.
pub fn append_query(url: &str, query: &str) -> String {
    if query.is_empty() {
        url.to_string()
    } else if url.contains('?') {
        format!("{}&{}", url, query)
    } else {
        format!("{}?{}", url, query)
    }
}
