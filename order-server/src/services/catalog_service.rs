//! Catalog Service - in-memory catalog with stock movements
//!
//! Records live in a `DashMap`; a stock decrement holds the entry's shard
//! lock for the read-modify-write, so decrements of one catalog item are
//! serialized while different items proceed in parallel.

use super::lookup::CatalogLookup;
use dashmap::DashMap;
use parking_lot::RwLock;
use shared::models::{CatalogItem, InventoryHistoryEntry};

#[derive(Debug, Default)]
pub struct CatalogService {
    items: DashMap<String, CatalogItem>,
    history: RwLock<Vec<InventoryHistoryEntry>>,
}

impl CatalogService {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build from seed records
    pub fn with_items(items: impl IntoIterator<Item = CatalogItem>) -> Self {
        let service = Self::new();
        for item in items {
            service.upsert(item);
        }
        service
    }

    pub fn upsert(&self, item: CatalogItem) {
        self.items.insert(item.id.clone(), item);
    }

    pub fn remove(&self, id: &str) -> Option<CatalogItem> {
        self.items.remove(id).map(|(_, item)| item)
    }

    pub fn list(&self) -> Vec<CatalogItem> {
        let mut items: Vec<_> = self.items.iter().map(|e| e.value().clone()).collect();
        items.sort_by(|a, b| a.id.cmp(&b.id));
        items
    }

    /// Stock movements of one catalog item, oldest first
    pub fn history(&self, catalog_id: &str) -> Vec<InventoryHistoryEntry> {
        self.history
            .read()
            .iter()
            .filter(|e| e.catalog_id == catalog_id)
            .cloned()
            .collect()
    }
}

impl CatalogLookup for CatalogService {
    fn by_id(&self, id: &str) -> Option<CatalogItem> {
        self.items.get(id).map(|e| e.value().clone())
    }

    fn decrement_stock(&self, id: &str, quantity: i32) -> Option<i32> {
        let mut entry = self.items.get_mut(id)?;
        entry.stock_quantity -= quantity;
        if entry.stock_quantity < 0 {
            tracing::warn!(
                catalog_id = %id,
                balance = entry.stock_quantity,
                "Catalog stock went negative"
            );
        }
        Some(entry.stock_quantity)
    }

    fn append_history(&self, entry: InventoryHistoryEntry) {
        self.history.write().push(entry);
    }
}
