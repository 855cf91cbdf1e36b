use crate::error::Result;
use crate::item::{Item, ItemId, ItemInput};
use crate::repository::ItemRepository;
use async_trait::async_trait;
use dashmap::DashMap;
use jiff::Timestamp;
use std::sync::atomic::{AtomicI64, Ordering};

/// In-memory implementation of [`ItemRepository`] using DashMap.
///
/// Ids come from a monotonically increasing counter starting at 1, mirroring
/// a `BIGSERIAL` column. Deleted ids are never reused.
#[derive(Debug)]
pub struct InMemoryItemRepository {
    storage: DashMap<ItemId, Item>,
    next_id: AtomicI64,
}

impl InMemoryItemRepository {
    /// Creates a new in-memory repository.
    pub fn new() -> Self {
        Self {
            storage: DashMap::new(),
            next_id: AtomicI64::new(1),
        }
    }

    fn allocate_id(&self) -> ItemId {
        ItemId::new(self.next_id.fetch_add(1, Ordering::Relaxed))
    }
}

impl Default for InMemoryItemRepository {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl ItemRepository for InMemoryItemRepository {
    async fn get_all(&self) -> Result<Vec<Item>> {
        let mut items: Vec<Item> = self
            .storage
            .iter()
            .map(|entry| entry.value().clone())
            .collect();

        items.sort_by(|a, b| {
            b.created_at
                .cmp(&a.created_at)
                .then_with(|| b.id.cmp(&a.id))
        });

        Ok(items)
    }

    async fn get_by_id(&self, id: ItemId) -> Result<Option<Item>> {
        Ok(self.storage.get(&id).map(|entry| entry.value().clone()))
    }

    async fn create(&self, input: ItemInput) -> Result<Item> {
        let item = Item::new(self.allocate_id(), input, Timestamp::now());
        self.storage.insert(item.id, item.clone());
        Ok(item)
    }

    async fn update(&self, id: ItemId, input: ItemInput) -> Result<Option<Item>> {
        let Some(mut entry) = self.storage.get_mut(&id) else {
            return Ok(None);
        };

        entry.value_mut().apply(input);
        Ok(Some(entry.value().clone()))
    }

    async fn delete(&self, id: ItemId) -> Result<bool> {
        Ok(self.storage.remove(&id).is_some())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::item::Effect;

    fn input(name: &str, hp: i64, price: f64) -> ItemInput {
        ItemInput::new(name, [("HP", hp)].into_iter().collect::<Effect>(), price)
    }

    #[tokio::test]
    async fn create_and_get() {
        let repo = InMemoryItemRepository::new();

        let created = repo.create(input("Potion", 40, 50.0)).await.unwrap();
        let fetched = repo.get_by_id(created.id).await.unwrap().unwrap();

        assert_eq!(fetched, created);
        assert_eq!(fetched.effect.get("HP").unwrap().as_i64(), Some(40));
    }

    #[tokio::test]
    async fn get_nonexistent() {
        let repo = InMemoryItemRepository::new();

        let result = repo.get_by_id(ItemId::new(99)).await.unwrap();
        assert!(result.is_none());
    }

    #[tokio::test]
    async fn ids_are_unique_and_not_reused() {
        let repo = InMemoryItemRepository::new();

        let first = repo.create(input("Potion", 40, 50.0)).await.unwrap();
        assert!(repo.delete(first.id).await.unwrap());
        let second = repo.create(input("Ether", 0, 75.0)).await.unwrap();

        assert_ne!(first.id, second.id);
    }

    #[tokio::test]
    async fn get_all_is_most_recent_first() {
        let repo = InMemoryItemRepository::new();

        let a = repo.create(input("A", 1, 1.0)).await.unwrap();
        let b = repo.create(input("B", 2, 2.0)).await.unwrap();
        let c = repo.create(input("C", 3, 3.0)).await.unwrap();

        let ids: Vec<ItemId> = repo
            .get_all()
            .await
            .unwrap()
            .into_iter()
            .map(|item| item.id)
            .collect();
        assert_eq!(ids, vec![c.id, b.id, a.id]);
    }

    #[tokio::test]
    async fn get_all_empty() {
        let repo = InMemoryItemRepository::new();
        assert!(repo.get_all().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn update_preserves_id_and_created_at() {
        let repo = InMemoryItemRepository::new();
        let created = repo.create(input("Potion", 40, 50.0)).await.unwrap();

        let updated = repo
            .update(created.id, input("Mega Potion", 100, 150.0))
            .await
            .unwrap()
            .unwrap();

        assert_eq!(updated.id, created.id);
        assert_eq!(updated.created_at, created.created_at);
        assert_eq!(updated.name, "Mega Potion");
        assert_eq!(updated.price, 150.0);
        assert_eq!(
            repo.get_by_id(created.id).await.unwrap().unwrap(),
            updated
        );
    }

    #[tokio::test]
    async fn update_nonexistent_is_not_an_upsert() {
        let repo = InMemoryItemRepository::new();

        let result = repo
            .update(ItemId::new(7), input("Ghost", 0, 0.0))
            .await
            .unwrap();

        assert!(result.is_none());
        assert!(repo.get_by_id(ItemId::new(7)).await.unwrap().is_none());
        assert!(repo.get_all().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn delete_existing() {
        let repo = InMemoryItemRepository::new();
        let created = repo.create(input("Potion", 40, 50.0)).await.unwrap();

        assert!(repo.delete(created.id).await.unwrap());
        assert!(repo.get_by_id(created.id).await.unwrap().is_none());
        assert!(!repo.delete(created.id).await.unwrap());
    }

    #[tokio::test]
    async fn concurrent_creates() {
        use std::sync::Arc;

        let repo = Arc::new(InMemoryItemRepository::new());
        let mut handles = vec![];

        for i in 0..10i64 {
            let repo = Arc::clone(&repo);
            handles.push(tokio::spawn(async move {
                repo.create(input(&format!("item-{i}"), i, i as f64))
                    .await
                    .unwrap()
            }));
        }

        let mut ids = vec![];
        for handle in handles {
            ids.push(handle.await.unwrap().id);
        }
        ids.sort();
        ids.dedup();

        assert_eq!(ids.len(), 10);
        assert_eq!(repo.get_all().await.unwrap().len(), 10);
    }
}
