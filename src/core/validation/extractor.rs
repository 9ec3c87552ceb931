//! Axum extractor for validated form payloads
//!
//! `Validated<T>` runs the form schema of `T` over the JSON body before the
//! handler sees it.

use super::schema::FormSchema;
use crate::core::error::{CampusError, ValidationError};
use axum::{
    Json,
    extract::{FromRequest, Request},
    response::{IntoResponse, Response},
};
use serde_json::Value;

/// Trait for forms that carry a validation schema
pub trait ValidatableForm {
    /// The schema applied to incoming payloads
    fn schema() -> FormSchema;
}

/// Axum extractor that validates and filters a form payload
///
/// # Usage
///
/// ```rust,ignore
/// pub async fn create_class(
///     Validated(payload, _): Validated<ClassForm>,
/// ) -> Result<Json<Value>, CampusError> {
///     // payload is already trimmed and validated
/// }
/// ```
pub struct Validated<T>(pub Value, pub std::marker::PhantomData<T>);

impl<T> Validated<T> {
    /// Create a new validated payload
    pub fn new(payload: Value) -> Self {
        Self(payload, std::marker::PhantomData)
    }

    /// Get the inner payload
    pub fn into_inner(self) -> Value {
        self.0
    }
}

impl<T> std::ops::Deref for Validated<T> {
    type Target = Value;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl<S, T> FromRequest<S> for Validated<T>
where
    S: Send + Sync,
    T: ValidatableForm + Send + Sync,
{
    type Rejection = Response;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(payload): Json<Value> = Json::from_request(req, state)
            .await
            .map_err(IntoResponse::into_response)?;

        let schema = T::schema();
        match schema.validate_and_filter(payload) {
            Ok(cleaned) => Ok(Validated::new(cleaned)),
            Err(err) => {
                if let ValidationError::FieldErrors(errors) = &err {
                    tracing::debug!(form = schema.name(), errors = errors.len(), "form rejected");
                }
                Err(CampusError::from(err).into_response())
            }
        }
    }
}
