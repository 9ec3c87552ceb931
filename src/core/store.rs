//! Store trait for running list queries over a typed collection

use crate::core::engine;
use crate::core::query::{Filter, ListResponse, Pagination, Sorter};
use crate::core::record::Record;
use anyhow::Result;

/// Trait for stores that can hand the query engine a snapshot of their records
///
/// Implementors only provide [`QueryableStore::list_all`]; filtering,
/// sorting and pagination come from the shared engine.
pub trait QueryableStore<R: Record>: Send + Sync {
    /// Snapshot of every record, in collection order
    fn list_all(&self) -> Result<Vec<R>>;

    /// Filter, sort and paginate the current snapshot
    fn query(
        &self,
        filters: &[Filter],
        sorters: &[Sorter],
        pagination: Option<&Pagination>,
    ) -> Result<ListResponse<R>> {
        let rows = self.list_all()?;
        Ok(engine::query(&rows, filters, sorters, pagination))
    }
}
