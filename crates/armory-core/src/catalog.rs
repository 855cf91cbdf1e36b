use crate::error::Result;
use crate::item::{Item, ItemId, ItemInput};
use async_trait::async_trait;

/// Application-facing operations on the item catalog.
///
/// This is what the HTTP adapter depends on. It mirrors the
/// [`ItemRepository`](crate::ItemRepository) contract so that policies can be
/// layered in an implementation without touching either the adapter or the
/// storage contract.
#[async_trait]
pub trait ItemCatalog: Send + Sync + 'static {
    /// Lists every item, most recently created first.
    async fn list(&self) -> Result<Vec<Item>>;

    /// Looks up a single item. Returns `None` if it does not exist.
    async fn get(&self, id: ItemId) -> Result<Option<Item>>;

    /// Creates an item and returns it with its assigned id and creation time.
    async fn create(&self, input: ItemInput) -> Result<Item>;

    /// Replaces the mutable fields of an item. Returns `None` if it does not exist.
    async fn update(&self, id: ItemId, input: ItemInput) -> Result<Option<Item>>;

    /// Deletes an item. Returns `true` if it existed and was removed.
    async fn delete(&self, id: ItemId) -> Result<bool>;
}
