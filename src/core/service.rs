//! Data provider capability trait
//!
//! Every storage (the mock seed, the in-memory store, a real backend later)
//! exposes exactly these five operations. List views and the REST surface
//! only ever talk to this trait.

use crate::core::query::{Filter, ListResponse, Pagination, Sorter};
use anyhow::Result;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::fmt;

/// Identifier as it crosses the provider boundary: a number or a string.
///
/// Two ids are the same when their string forms are equal.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RecordId {
    Number(i64),
    Text(String),
}

impl RecordId {
    /// Numeric form, when the id is a number or a numeric string
    pub fn as_i64(&self) -> Option<i64> {
        match self {
            RecordId::Number(n) => Some(*n),
            RecordId::Text(s) => s.trim().parse().ok(),
        }
    }

    /// JSON form, preserving whether the caller sent a number or a string
    pub fn to_value(&self) -> Value {
        match self {
            RecordId::Number(n) => Value::from(*n),
            RecordId::Text(s) => Value::from(s.clone()),
        }
    }
}

impl PartialEq for RecordId {
    fn eq(&self, other: &Self) -> bool {
        self.to_string() == other.to_string()
    }
}

impl fmt::Display for RecordId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RecordId::Number(n) => write!(f, "{}", n),
            RecordId::Text(s) => write!(f, "{}", s),
        }
    }
}

impl From<i64> for RecordId {
    fn from(value: i64) -> Self {
        RecordId::Number(value)
    }
}

impl From<&str> for RecordId {
    fn from(value: &str) -> Self {
        RecordId::Text(value.to_string())
    }
}

/// Parameters of a list call
#[derive(Debug, Clone, Default)]
pub struct ListParams {
    pub resource: String,
    pub pagination: Option<Pagination>,
    pub filters: Vec<Filter>,
    pub sorters: Vec<Sorter>,
    /// Filters the list view always applies, regardless of user state
    pub permanent_filters: Vec<Filter>,
}

impl ListParams {
    pub fn new(resource: impl Into<String>) -> Self {
        Self {
            resource: resource.into(),
            ..Default::default()
        }
    }

    pub fn with_pagination(mut self, current: usize, page_size: usize) -> Self {
        self.pagination = Some(Pagination::new(current, page_size));
        self
    }

    pub fn with_filter(mut self, filter: Filter) -> Self {
        self.filters.push(filter);
        self
    }

    pub fn with_permanent_filter(mut self, filter: Filter) -> Self {
        self.permanent_filters.push(filter);
        self
    }

    pub fn with_sorter(mut self, sorter: Sorter) -> Self {
        self.sorters.push(sorter);
        self
    }

    /// Permanent filters first, then the user-driven ones
    pub fn merged_filters(&self) -> Vec<Filter> {
        self.permanent_filters
            .iter()
            .chain(self.filters.iter())
            .cloned()
            .collect()
    }
}

/// Parameters of a single-record read
#[derive(Debug, Clone)]
pub struct GetOneParams {
    pub resource: String,
    pub id: RecordId,
}

/// Parameters of a create call
#[derive(Debug, Clone)]
pub struct CreateParams {
    pub resource: String,
    pub variables: Map<String, Value>,
}

/// Parameters of an update call
#[derive(Debug, Clone)]
pub struct UpdateParams {
    pub resource: String,
    pub id: RecordId,
    pub variables: Map<String, Value>,
}

/// Parameters of a delete call
#[derive(Debug, Clone)]
pub struct DeleteOneParams {
    pub resource: String,
    pub id: RecordId,
}

/// CRUD capability over named resources
///
/// Records cross this boundary as JSON objects. Implementations decide
/// whether writes are durable.
#[async_trait]
pub trait DataProvider: Send + Sync {
    /// List one page of a resource
    async fn get_list(&self, params: ListParams) -> Result<ListResponse<Value>>;

    /// Fetch a single record
    async fn get_one(&self, params: GetOneParams) -> Result<Value>;

    /// Create a record and return it
    async fn create(&self, params: CreateParams) -> Result<Value>;

    /// Update a record and return it
    async fn update(&self, params: UpdateParams) -> Result<Value>;

    /// Delete a record and return what was deleted
    async fn delete_one(&self, params: DeleteOneParams) -> Result<Value>;

    /// Base URL of the backing API, if any
    fn api_url(&self) -> String {
        String::new()
    }
}
