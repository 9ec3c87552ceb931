//! REST server over a data provider
//!
//! `ServerBuilder` wires a [`DataProvider`](crate::core::DataProvider) into
//! an axum `Router` exposing:
//! - generic CRUD routes for every resource the provider serves
//! - the validated create-class route
//! - a health check

pub mod builder;
pub mod handlers;
pub mod router;

pub use builder::ServerBuilder;
pub use handlers::AppState;
