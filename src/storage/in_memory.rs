//! In-memory data provider that actually keeps writes
//!
//! Useful for development and tests that need durable state within a
//! process. Records of one type live behind an `RwLock` in insertion order.

use crate::core::error::ProviderError;
use crate::core::query::ListResponse;
use crate::core::record::Record;
use crate::core::service::{
    CreateParams, DataProvider, DeleteOneParams, GetOneParams, ListParams, RecordId, UpdateParams,
};
use crate::core::store::QueryableStore;
use anyhow::{Result, anyhow};
use async_trait::async_trait;
use serde::de::DeserializeOwned;
use serde_json::{Map, Value};
use std::sync::{Arc, RwLock};

/// Persisting provider for a single record type
#[derive(Clone)]
pub struct InMemoryDataProvider<R: Record> {
    records: Arc<RwLock<Vec<R>>>,
}

impl<R: Record> InMemoryDataProvider<R> {
    /// Create an empty provider
    pub fn new() -> Self {
        Self::with_records(Vec::new())
    }

    /// Create a provider pre-filled with `records`
    pub fn with_records(records: Vec<R>) -> Self {
        Self {
            records: Arc::new(RwLock::new(records)),
        }
    }

    fn check_resource(resource: &str) -> Result<()> {
        if resource == R::resource_name() {
            Ok(())
        } else {
            Err(ProviderError::UnknownResource {
                resource: resource.to_string(),
            }
            .into())
        }
    }

    fn not_found(id: &RecordId) -> anyhow::Error {
        ProviderError::NotFound {
            resource: R::resource_name().to_string(),
            id: id.to_string(),
        }
        .into()
    }
}

impl<R: Record> Default for InMemoryDataProvider<R> {
    fn default() -> Self {
        Self::new()
    }
}

impl<R: Record> QueryableStore<R> for InMemoryDataProvider<R> {
    fn list_all(&self) -> Result<Vec<R>> {
        let records = self
            .records
            .read()
            .map_err(|e| anyhow!("Failed to acquire read lock: {}", e))?;

        Ok(records.clone())
    }
}

// Deserialize `variables` as a record carrying `id`, reporting bad shapes as
// an invalid payload rather than an internal error.
fn build_record<R: Record + DeserializeOwned>(id: i64, mut variables: Map<String, Value>) -> Result<R> {
    variables.insert("id".to_string(), Value::from(id));
    serde_json::from_value(Value::Object(variables)).map_err(|e| {
        ProviderError::InvalidPayload {
            resource: R::resource_name().to_string(),
            message: e.to_string(),
        }
        .into()
    })
}

#[async_trait]
impl<R: Record + DeserializeOwned> DataProvider for InMemoryDataProvider<R> {
    async fn get_list(&self, params: ListParams) -> Result<ListResponse<Value>> {
        Self::check_resource(&params.resource)?;

        let page = self.query(
            &params.merged_filters(),
            &params.sorters,
            params.pagination.as_ref(),
        )?;

        let data = page
            .data
            .iter()
            .map(serde_json::to_value)
            .collect::<Result<Vec<_>, _>>()?;

        Ok(ListResponse {
            data,
            total: page.total,
        })
    }

    async fn get_one(&self, params: GetOneParams) -> Result<Value> {
        Self::check_resource(&params.resource)?;

        let records = self
            .records
            .read()
            .map_err(|e| anyhow!("Failed to acquire read lock: {}", e))?;

        let record = records
            .iter()
            .find(|r| RecordId::from(r.id()) == params.id)
            .ok_or_else(|| Self::not_found(&params.id))?;

        Ok(serde_json::to_value(record)?)
    }

    async fn create(&self, params: CreateParams) -> Result<Value> {
        Self::check_resource(&params.resource)?;

        let mut records = self
            .records
            .write()
            .map_err(|e| anyhow!("Failed to acquire write lock: {}", e))?;

        let next_id = records.iter().map(Record::id).max().unwrap_or(0) + 1;
        let record: R = build_record(next_id, params.variables)?;
        let value = serde_json::to_value(&record)?;
        records.push(record);

        tracing::debug!(resource = R::resource_name(), id = next_id, "record created");
        Ok(value)
    }

    async fn update(&self, params: UpdateParams) -> Result<Value> {
        Self::check_resource(&params.resource)?;

        let mut records = self
            .records
            .write()
            .map_err(|e| anyhow!("Failed to acquire write lock: {}", e))?;

        let index = records
            .iter()
            .position(|r| RecordId::from(r.id()) == params.id)
            .ok_or_else(|| Self::not_found(&params.id))?;

        let existing = &records[index];
        let id = existing.id();
        let Value::Object(mut merged) = serde_json::to_value(existing)? else {
            return Err(anyhow!("{} records must serialize to objects", R::resource_name()));
        };
        merged.extend(params.variables);

        let record: R = build_record(id, merged)?;
        let value = serde_json::to_value(&record)?;
        records[index] = record;

        Ok(value)
    }

    async fn delete_one(&self, params: DeleteOneParams) -> Result<Value> {
        Self::check_resource(&params.resource)?;

        let mut records = self
            .records
            .write()
            .map_err(|e| anyhow!("Failed to acquire write lock: {}", e))?;

        let index = records
            .iter()
            .position(|r| RecordId::from(r.id()) == params.id)
            .ok_or_else(|| Self::not_found(&params.id))?;

        let removed = records.remove(index);
        Ok(serde_json::to_value(removed)?)
    }
}
