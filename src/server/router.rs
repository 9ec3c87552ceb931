//! Route table

use super::handlers::{
    AppState, create_class, create_record, delete_record, get_record, health_check,
    list_classes, list_records, update_record,
};
use axum::{Router, routing::get};

/// Build the resource routes
///
/// - GET /classes, POST /classes (validated create)
/// - GET /{resource} - List with filters, sorters and pagination
/// - POST /{resource} - Create
/// - GET /{resource}/{id} - Get one
/// - PUT /{resource}/{id} - Update
/// - DELETE /{resource}/{id} - Delete
pub fn build_resource_routes(state: AppState) -> Router {
    Router::new()
        .route("/classes", get(list_classes).post(create_class))
        .route("/{resource}", get(list_records).post(create_record))
        .route(
            "/{resource}/{id}",
            get(get_record).put(update_record).delete(delete_record),
        )
        .with_state(state)
}

/// Build health check routes
pub fn health_routes() -> Router {
    Router::new()
        .route("/health", get(health_check))
        .route("/healthz", get(health_check))
}
