use async_trait::async_trait;

use crate::errors::ServiceError;
use crate::flavor::{Flavor, FlavorInput};

/// Trait abstraction for the flavor collection.
/// Handlers hold an `Arc<dyn FlavorStore>` so tests can swap implementations.
#[async_trait]
pub trait FlavorStore: Send + Sync {
    /// All records in collection order.
    async fn list(&self) -> Vec<Flavor>;
    async fn get(&self, id: i64) -> Option<Flavor>;
    /// Append a new record with a freshly assigned id.
    async fn create(&self, input: FlavorInput) -> Flavor;
    /// Replace the text of the first record with `id`; the id stays.
    async fn update(&self, id: i64, input: FlavorInput) -> Result<Flavor, ServiceError>;
    /// Remove the first record with `id` and hand it back.
    async fn delete(&self, id: i64) -> Result<Flavor, ServiceError>;
}
