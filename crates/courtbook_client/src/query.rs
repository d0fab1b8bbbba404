//! Query-string construction.
//!
//! Only truthy values reach the wire: empty strings, zero, `false` and null
//! are dropped. Callers that need to send an explicit `false` or `0` cannot
//! do so through this type; the backend treats an absent filter as
//! "no filtering", which is what the booking screens expect.

use serde::Serialize;

/// A single scalar query value.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum QueryValue {
    Str(String),
    Int(i64),
    Float(f64),
    Bool(bool),
    Null,
}

impl QueryValue {
    pub fn is_truthy(&self) -> bool {
        match self {
            QueryValue::Str(s) => !s.is_empty(),
            QueryValue::Int(i) => *i != 0,
            QueryValue::Float(f) => *f != 0.0 && !f.is_nan(),
            QueryValue::Bool(b) => *b,
            QueryValue::Null => false,
        }
    }
}

impl From<&str> for QueryValue {
    fn from(value: &str) -> Self {
        QueryValue::Str(value.to_string())
    }
}

impl From<String> for QueryValue {
    fn from(value: String) -> Self {
        QueryValue::Str(value)
    }
}

impl From<&String> for QueryValue {
    fn from(value: &String) -> Self {
        QueryValue::Str(value.clone())
    }
}

impl From<i64> for QueryValue {
    fn from(value: i64) -> Self {
        QueryValue::Int(value)
    }
}

impl From<u64> for QueryValue {
    fn from(value: u64) -> Self {
        i64::try_from(value)
            .map(QueryValue::Int)
            .unwrap_or_else(|_| QueryValue::Str(value.to_string()))
    }
}

impl From<i32> for QueryValue {
    fn from(value: i32) -> Self {
        QueryValue::Int(value.into())
    }
}

impl From<u32> for QueryValue {
    fn from(value: u32) -> Self {
        QueryValue::Int(value.into())
    }
}

impl From<f64> for QueryValue {
    fn from(value: f64) -> Self {
        QueryValue::Float(value)
    }
}

impl From<bool> for QueryValue {
    fn from(value: bool) -> Self {
        QueryValue::Bool(value)
    }
}

impl<T: Into<QueryValue>> From<Option<T>> for QueryValue {
    fn from(value: Option<T>) -> Self {
        value.map(Into::into).unwrap_or(QueryValue::Null)
    }
}

/// Ordered set of query parameters.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct QueryParams {
    pairs: Vec<(String, QueryValue)>,
}

impl QueryParams {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a parameter, builder style.
    pub fn with(mut self, key: impl Into<String>, value: impl Into<QueryValue>) -> Self {
        self.push(key, value);
        self
    }

    pub fn push(&mut self, key: impl Into<String>, value: impl Into<QueryValue>) {
        self.pairs.push((key.into(), value.into()));
    }

    pub fn is_empty(&self) -> bool {
        self.pairs.iter().all(|(_, v)| !v.is_truthy())
    }

    /// Pairs that will actually be sent.
    pub fn truthy_pairs(&self) -> impl Iterator<Item = (&str, &QueryValue)> {
        self.pairs
            .iter()
            .filter(|(_, v)| v.is_truthy())
            .map(|(k, v)| (k.as_str(), v))
    }

    /// URL-encoded query string (without the leading `?`).
    pub fn to_query_string(&self) -> Result<String, serde_urlencoded::ser::Error> {
        let pairs: Vec<(&str, &QueryValue)> = self.truthy_pairs().collect();
        serde_urlencoded::to_string(pairs)
    }
}

/// Typed per-endpoint filters lower into [`QueryParams`] through this trait.
pub trait ToQuery {
    fn to_query(&self) -> QueryParams;
}

impl ToQuery for QueryParams {
    fn to_query(&self) -> QueryParams {
        self.clone()
    }
}
