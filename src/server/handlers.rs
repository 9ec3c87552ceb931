//! HTTP handlers for resource operations
//!
//! Handlers are resource-agnostic: the path names the resource and the
//! provider decides what it serves.

use axum::{
    Json,
    extract::{Path, Query, State},
    http::StatusCode,
};
use serde_json::{Map, Value, json};
use std::sync::Arc;

use crate::config::AdminConfig;
use crate::core::engine::{parse_filters, parse_sorters};
use crate::core::error::{CampusError, ValidationError};
use crate::core::query::{ListResponse, Pagination, QueryParams};
use crate::core::service::{
    CreateParams, DataProvider, DeleteOneParams, GetOneParams, ListParams, RecordId, UpdateParams,
};
use crate::core::validation::Validated;
use crate::entities::ClassForm;

/// Resource name of classes
pub const CLASSES: &str = "classes";

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    pub provider: Arc<dyn DataProvider>,
    pub config: Arc<AdminConfig>,
}

impl AppState {
    /// Page request for a list call.
    ///
    /// A `current` without `pageSize` pages with the configured default size.
    fn pagination(&self, query: &QueryParams) -> Option<Pagination> {
        query.pagination().or_else(|| {
            query
                .current
                .map(|current| Pagination::new(current, self.config.pagination.default_page_size))
        })
    }
}

/// Path ids are numbers when they parse as one
fn record_id(raw: String) -> RecordId {
    match raw.parse::<i64>() {
        Ok(n) if n.to_string() == raw => RecordId::Number(n),
        _ => RecordId::Text(raw),
    }
}

fn into_variables(body: Value) -> Result<Map<String, Value>, CampusError> {
    match body {
        Value::Object(map) => Ok(map),
        _ => Err(ValidationError::NotAnObject.into()),
    }
}

async fn list_resource(
    state: &AppState,
    resource: String,
    query: QueryParams,
) -> Result<Json<ListResponse<Value>>, CampusError> {
    let params = ListParams {
        resource,
        pagination: state.pagination(&query),
        filters: parse_filters(&query.filter_values()),
        sorters: parse_sorters(&query.sorter_values()),
        permanent_filters: Vec::new(),
    };

    let page = state.provider.get_list(params).await?;
    Ok(Json(page))
}

/// GET /{resource}
pub async fn list_records(
    State(state): State<AppState>,
    Path(resource): Path<String>,
    Query(query): Query<QueryParams>,
) -> Result<Json<ListResponse<Value>>, CampusError> {
    list_resource(&state, resource, query).await
}

/// GET /classes
pub async fn list_classes(
    State(state): State<AppState>,
    Query(query): Query<QueryParams>,
) -> Result<Json<ListResponse<Value>>, CampusError> {
    list_resource(&state, CLASSES.to_string(), query).await
}

/// GET /{resource}/{id}
pub async fn get_record(
    State(state): State<AppState>,
    Path((resource, id)): Path<(String, String)>,
) -> Result<Json<Value>, CampusError> {
    let record = state
        .provider
        .get_one(GetOneParams {
            resource,
            id: record_id(id),
        })
        .await?;

    Ok(Json(record))
}

/// POST /{resource}
pub async fn create_record(
    State(state): State<AppState>,
    Path(resource): Path<String>,
    Json(body): Json<Value>,
) -> Result<(StatusCode, Json<Value>), CampusError> {
    let created = state
        .provider
        .create(CreateParams {
            resource,
            variables: into_variables(body)?,
        })
        .await?;

    Ok((StatusCode::CREATED, Json(created)))
}

/// POST /classes
///
/// The body is trimmed, defaulted and validated against the class form
/// schema before it reaches the provider.
pub async fn create_class(
    State(state): State<AppState>,
    Validated(payload, _): Validated<ClassForm>,
) -> Result<(StatusCode, Json<Value>), CampusError> {
    let form = ClassForm::from_validated(payload)?;
    let variables = serde_json::to_value(&form)
        .map_err(|e| CampusError::Internal(e.to_string()))
        .and_then(into_variables)?;

    tracing::debug!(name = %form.name, subject_id = form.subject_id, "creating class");

    let created = state
        .provider
        .create(CreateParams {
            resource: CLASSES.to_string(),
            variables,
        })
        .await?;

    Ok((StatusCode::CREATED, Json(created)))
}

/// PUT /{resource}/{id}
pub async fn update_record(
    State(state): State<AppState>,
    Path((resource, id)): Path<(String, String)>,
    Json(body): Json<Value>,
) -> Result<Json<Value>, CampusError> {
    let updated = state
        .provider
        .update(UpdateParams {
            resource,
            id: record_id(id),
            variables: into_variables(body)?,
        })
        .await?;

    Ok(Json(updated))
}

/// DELETE /{resource}/{id}
pub async fn delete_record(
    State(state): State<AppState>,
    Path((resource, id)): Path<(String, String)>,
) -> Result<Json<Value>, CampusError> {
    let deleted = state
        .provider
        .delete_one(DeleteOneParams {
            resource,
            id: record_id(id),
        })
        .await?;

    Ok(Json(deleted))
}

/// GET /health
pub async fn health_check() -> Json<Value> {
    Json(json!({
        "status": "ok",
        "service": "campus-admin"
    }))
}
