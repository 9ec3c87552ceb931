//! Mock data provider: a fixed seed that accepts writes without keeping them
//!
//! Every call is a pure function of the seed plus the call's input. Reads
//! run the query engine over the seed; writes log a warning and fabricate a
//! plausible response, so a later read never reflects an earlier write.

use crate::core::query::ListResponse;
use crate::core::record::Record;
use crate::core::service::{
    CreateParams, DataProvider, DeleteOneParams, GetOneParams, ListParams, RecordId, UpdateParams,
};
use crate::core::store::QueryableStore;
use crate::entities::subject::{Subject, seed_subjects};
use anyhow::Result;
use async_trait::async_trait;
use chrono::Utc;
use serde_json::{Map, Value, json};
use std::sync::Arc;

/// Seed-backed provider serving the `subjects` resource
#[derive(Clone)]
pub struct MockDataProvider {
    subjects: Arc<[Subject]>,
}

impl MockDataProvider {
    /// Provider over the built-in seed subjects
    pub fn new() -> Self {
        Self::with_seed(seed_subjects())
    }

    /// Provider over a custom seed
    pub fn with_seed(subjects: Vec<Subject>) -> Self {
        Self {
            subjects: subjects.into(),
        }
    }

    fn serves(resource: &str) -> bool {
        resource == Subject::resource_name()
    }
}

impl Default for MockDataProvider {
    fn default() -> Self {
        Self::new()
    }
}

impl QueryableStore<Subject> for MockDataProvider {
    fn list_all(&self) -> Result<Vec<Subject>> {
        Ok(self.subjects.to_vec())
    }
}

// `{id, ...variables}`: a caller-supplied id wins over the fabricated one.
fn with_id(id: Value, variables: Map<String, Value>) -> Value {
    let mut record = Map::new();
    record.insert("id".to_string(), id);
    record.extend(variables);
    Value::Object(record)
}

#[async_trait]
impl DataProvider for MockDataProvider {
    async fn get_list(&self, params: ListParams) -> Result<ListResponse<Value>> {
        if !Self::serves(&params.resource) {
            tracing::debug!(resource = %params.resource, "no mock data for resource");
            return Ok(ListResponse::empty());
        }

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
        tracing::warn!(
            "[dataProvider] getOne fallback for resource \"{}\" and id \"{}\".",
            params.resource,
            params.id
        );

        let found = Self::serves(&params.resource)
            .then(|| {
                self.subjects
                    .iter()
                    .find(|subject| RecordId::from(subject.id) == params.id)
            })
            .flatten();

        match found {
            Some(subject) => Ok(serde_json::to_value(subject)?),
            None => Ok(json!({ "id": params.id.to_value() })),
        }
    }

    async fn create(&self, params: CreateParams) -> Result<Value> {
        tracing::warn!(
            "[dataProvider] create fallback for resource \"{}\". No persistence is performed.",
            params.resource
        );

        Ok(with_id(
            Value::from(Utc::now().timestamp_millis()),
            params.variables,
        ))
    }

    async fn update(&self, params: UpdateParams) -> Result<Value> {
        tracing::warn!(
            "[dataProvider] update fallback for resource \"{}\" and id \"{}\". No persistence is performed.",
            params.resource,
            params.id
        );

        Ok(with_id(params.id.to_value(), params.variables))
    }

    async fn delete_one(&self, params: DeleteOneParams) -> Result<Value> {
        tracing::warn!(
            "[dataProvider] deleteOne fallback for resource \"{}\" and id \"{}\". No persistence is performed.",
            params.resource,
            params.id
        );

        Ok(json!({ "id": params.id.to_value() }))
    }
}
