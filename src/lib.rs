//! # campus-admin
//!
//! Administration toolkit for academic subjects and classes.
//!
//! ## Features
//!
//! - **List Query Engine**: filter, sort and paginate any [`Record`](core::Record)
//!   collection into a `{data, total}` page
//! - **Data Providers**: one async CRUD trait with a seed-backed mock and a
//!   persisting in-memory store
//! - **Banner Uploads**: local type/size checks, then a multipart POST to an
//!   external asset host, driven by an observable widget state machine
//! - **Validated Forms**: schema-checked class creation through an axum extractor
//! - **REST Server**: generic resource routes over any provider
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use campus::prelude::*;
//!
//! let provider = MockDataProvider::new();
//! let page = provider
//!     .get_list(
//!         ListParams::new("subjects")
//!             .with_sorter(Sorter::asc("name"))
//!             .with_pagination(1, 2),
//!     )
//!     .await?;
//! assert_eq!(page.total, 3);
//!
//! ServerBuilder::new()
//!     .with_data_provider(provider)
//!     .with_config(AdminConfig::default().with_env_overrides()?)
//!     .serve()
//!     .await?;
//! ```

pub mod config;
pub mod core;
pub mod entities;
pub mod server;
pub mod storage;
pub mod upload;

/// Re-exports of commonly used types and traits
pub mod prelude {
    // === Core ===
    pub use crate::core::{
        engine::{parse_filters, parse_sorters, query},
        error::{CampusError, ConfigError, ProviderError, UploadError, ValidationError},
        field::FieldValue,
        query::{Filter, FilterOperator, ListResponse, Pagination, QueryParams, SortOrder, Sorter},
        record::Record,
        service::{
            CreateParams, DataProvider, DeleteOneParams, GetOneParams, ListParams, RecordId,
            UpdateParams,
        },
        store::QueryableStore,
        validation::{FieldRule, FormSchema, ValidatableForm, Validated},
    };

    // === Entities ===
    pub use crate::entities::{ClassForm, ClassStatus, Department, Schedule, Subject, seed_subjects};

    // === Storage ===
    pub use crate::storage::{InMemoryDataProvider, MockDataProvider};

    // === Uploads ===
    pub use crate::upload::{
        HttpUploadTransport, SelectedFile, UploadState, UploadTransport, UploadWidget,
        UploadedImage,
    };

    // === Config ===
    pub use crate::config::{AdminConfig, PaginationConfig, ServerConfig, UploadConfig};

    // === Server ===
    pub use crate::server::ServerBuilder;

    // === External dependencies ===
    pub use anyhow::Result;
    pub use async_trait::async_trait;
    pub use chrono::{DateTime, Utc};
    pub use serde::{Deserialize, Serialize};
}
