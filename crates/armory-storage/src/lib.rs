//! Relational storage backends for the Armory item catalog.

pub mod pool;
pub mod postgres;

pub use armory_core::error::{Result, StorageError};
pub use armory_core::{InMemoryItemRepository, ItemRepository};
pub use pool::PoolSettings;
pub use postgres::PostgresItemRepository;
