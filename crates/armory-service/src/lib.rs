//! Item catalog service implementation.
//!
//! This crate provides [`ItemService`], the orchestration layer between the
//! HTTP adapter and an [`ItemRepository`](armory_core::ItemRepository).
//! Core types are re-exported from `armory_core`.

pub mod service;

pub use armory_core::{Item, ItemCatalog, ItemId, ItemInput, StorageError};
pub use service::ItemService;
