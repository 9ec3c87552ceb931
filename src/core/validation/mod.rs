//! Validation and filtering system
//!
//! Forms declare a [`FormSchema`] of per-field filters and validators. The
//! [`Validated`] extractor applies it to request bodies.

pub mod extractor;
pub mod filters;
pub mod schema;
pub mod validators;

pub use extractor::{Validated, ValidatableForm};
pub use schema::{FieldRule, FormSchema};
