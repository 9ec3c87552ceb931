//! Core module containing the fundamental traits and types

pub mod compare;
pub mod engine;
pub mod error;
pub mod field;
pub mod query;
pub mod record;
pub mod service;
pub mod store;
pub mod validation;

pub use error::{CampusError, ConfigError, ProviderError, UploadError, ValidationError};
pub use field::FieldValue;
pub use query::{Filter, FilterOperator, ListResponse, Pagination, QueryParams, SortOrder, Sorter};
pub use record::Record;
pub use service::{
    CreateParams, DataProvider, DeleteOneParams, GetOneParams, ListParams, RecordId, UpdateParams,
};
pub use store::QueryableStore;
