//! Core types and traits for the Armory item catalog.
//!
//! This crate provides the item entity, the storage contract and the
//! catalog contract shared by the storage, service and gateway crates.

pub mod catalog;
pub mod error;
pub mod item;
pub mod repository;

pub use catalog::ItemCatalog;
pub use error::{CoreError, StorageError};
pub use item::{Effect, Item, ItemId, ItemInput};
pub use repository::memory::InMemoryItemRepository;
pub use repository::ItemRepository;
