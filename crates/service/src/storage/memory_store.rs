use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::RwLock;
use tracing::{debug, info};

use crate::errors::ServiceError;
use crate::flavor::{self, Flavor, FlavorInput};
use crate::store::FlavorStore;

struct Inner {
    flavors: Vec<Flavor>,
    // High-water mark: never handed out twice, even after the top id is deleted.
    next_id: i64,
}

impl Inner {
    fn position(&self, id: i64) -> Option<usize> {
        self.flavors.iter().position(|f| f.id == id)
    }
}

/// In-memory ordered flavor collection.
///
/// The records and the id counter share one lock, so every create/update/delete
/// is a single critical section and ids stay pairwise distinct.
pub struct MemoryFlavorStore {
    inner: RwLock<Inner>,
}

impl MemoryFlavorStore {
    /// Store pre-filled with the two default flavors.
    pub fn seeded() -> Arc<Self> {
        Self::with_flavors(flavor::seed())
    }

    /// Store holding exactly `flavors`, in the given order.
    pub fn with_flavors(flavors: Vec<Flavor>) -> Arc<Self> {
        let next_id = flavors.iter().map(|f| f.id).max().map_or(1, |max| max + 1);
        Arc::new(Self { inner: RwLock::new(Inner { flavors, next_id }) })
    }

    pub fn empty() -> Arc<Self> {
        Self::with_flavors(Vec::new())
    }

    pub async fn len(&self) -> usize {
        self.inner.read().await.flavors.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.len().await == 0
    }
}

#[async_trait]
impl FlavorStore for MemoryFlavorStore {
    async fn list(&self) -> Vec<Flavor> {
        self.inner.read().await.flavors.clone()
    }

    async fn get(&self, id: i64) -> Option<Flavor> {
        let inner = self.inner.read().await;
        inner.position(id).map(|i| inner.flavors[i].clone())
    }

    async fn create(&self, input: FlavorInput) -> Flavor {
        let mut inner = self.inner.write().await;
        let id = inner.next_id;
        inner.next_id += 1;
        let created = Flavor::new(id, input.flavor);
        inner.flavors.push(created.clone());
        info!(flavor_id = id, total = inner.flavors.len(), "flavor created");
        created
    }

    async fn update(&self, id: i64, input: FlavorInput) -> Result<Flavor, ServiceError> {
        let mut inner = self.inner.write().await;
        let Some(index) = inner.position(id) else {
            debug!(flavor_id = id, "update target missing");
            return Err(ServiceError::not_found("flavor"));
        };
        let existing = &mut inner.flavors[index];
        existing.flavor = input.flavor;
        info!(flavor_id = id, "flavor updated");
        Ok(existing.clone())
    }

    async fn delete(&self, id: i64) -> Result<Flavor, ServiceError> {
        let mut inner = self.inner.write().await;
        let Some(index) = inner.position(id) else {
            debug!(flavor_id = id, "delete target missing");
            return Err(ServiceError::not_found("flavor"));
        };
        let removed = inner.flavors.remove(index);
        info!(flavor_id = id, total = inner.flavors.len(), "flavor deleted");
        Ok(removed)
    }
}
