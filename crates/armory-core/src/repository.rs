pub mod memory;

use crate::error::Result;
use crate::item::{Item, ItemId, ItemInput};
use async_trait::async_trait;

/// Storage contract for [`Item`] records.
///
/// Absence is a normal outcome: lookups return `None` and deletes return
/// `false` for unknown ids. `Err` is reserved for backend failures, which
/// implementations must propagate rather than swallow.
#[async_trait]
pub trait ItemRepository: Send + Sync + 'static {
    /// Returns every item, most recently created first.
    async fn get_all(&self) -> Result<Vec<Item>>;

    /// Retrieves the item with the given id.
    /// Returns `None` if no such item exists.
    async fn get_by_id(&self, id: ItemId) -> Result<Option<Item>>;

    /// Persists a new item, assigning its id and creation time.
    ///
    /// The returned entity is exactly what a subsequent read would return.
    async fn create(&self, input: ItemInput) -> Result<Item>;

    /// Replaces the name, effect and price of an existing item.
    ///
    /// Returns `None` if the item does not exist; no record is created.
    async fn update(&self, id: ItemId, input: ItemInput) -> Result<Option<Item>>;

    /// Deletes the item with the given id.
    /// Returns `true` if the record existed and was removed.
    async fn delete(&self, id: ItemId) -> Result<bool>;
}
