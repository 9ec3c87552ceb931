//! Record trait: the shape the list query engine works over

use crate::core::field::FieldValue;
use serde::Serialize;

/// Base trait for every record exposed through a resource.
///
/// A record has:
/// - a stable, unique identifier that the engine never changes
/// - a fixed set of known field names
/// - dynamic read access to those fields by name
pub trait Record: Clone + Serialize + Send + Sync + 'static {
    /// The resource name used by providers and routes (e.g., "subjects")
    fn resource_name() -> &'static str;

    /// Field names this record type exposes to filters and sorters
    fn fields() -> &'static [&'static str];

    /// Unique identifier of this record
    fn id(&self) -> i64;

    /// Get the value of a field by name.
    ///
    /// Returns `None` for names outside [`Record::fields`] and
    /// `Some(FieldValue::Null)` for a known field without a value.
    fn field_value(&self, field: &str) -> Option<FieldValue>;

    /// Whether `field` is one of the known field names
    fn has_field(field: &str) -> bool {
        Self::fields().contains(&field)
    }
}
