//! Data provider implementations

pub mod in_memory;
pub mod mock;

pub use in_memory::InMemoryDataProvider;
pub use mock::MockDataProvider;
