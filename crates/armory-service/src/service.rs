use armory_core::error::Result;
use armory_core::{Item, ItemCatalog, ItemId, ItemInput, ItemRepository};
use async_trait::async_trait;
use std::sync::Arc;
use tracing::{debug, trace};

/// A concrete implementation of the [`ItemCatalog`] trait.
///
/// Every operation is forwarded to the wrapped repository with the same
/// inputs, outputs and errors. Storage failures pass through unmodified.
#[derive(Debug)]
pub struct ItemService<R> {
    repository: Arc<R>,
}

impl<R> Clone for ItemService<R> {
    fn clone(&self) -> Self {
        Self {
            repository: Arc::clone(&self.repository),
        }
    }
}

impl<R: ItemRepository> ItemService<R> {
    /// Creates a new `ItemService` backed by the given repository.
    pub fn new(repository: R) -> Self {
        Self::from_shared(Arc::new(repository))
    }

    /// Creates a new `ItemService` sharing an already wrapped repository.
    pub fn from_shared(repository: Arc<R>) -> Self {
        Self { repository }
    }
}

#[async_trait]
impl<R: ItemRepository> ItemCatalog for ItemService<R> {
    async fn list(&self) -> Result<Vec<Item>> {
        trace!("listing items");
        self.repository.get_all().await
    }

    async fn get(&self, id: ItemId) -> Result<Option<Item>> {
        trace!(id = %id, "fetching item");
        self.repository.get_by_id(id).await
    }

    async fn create(&self, input: ItemInput) -> Result<Item> {
        let item = self.repository.create(input).await?;
        debug!(id = %item.id, name = %item.name, "created item");
        Ok(item)
    }

    async fn update(&self, id: ItemId, input: ItemInput) -> Result<Option<Item>> {
        let updated = self.repository.update(id, input).await?;
        match &updated {
            Some(item) => debug!(id = %item.id, "updated item"),
            None => trace!(id = %id, "item to update not found"),
        }
        Ok(updated)
    }

    async fn delete(&self, id: ItemId) -> Result<bool> {
        let deleted = self.repository.delete(id).await?;
        debug!(id = %id, deleted, "delete item");
        Ok(deleted)
    }
}
