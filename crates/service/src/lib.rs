//! Service layer for the flavor collection.
//! - `flavor`: record and input models.
//! - `store`: the `FlavorStore` trait handlers depend on.
//! - `storage`: concrete stores (in-memory only).

pub mod errors;
pub mod flavor;
pub mod store;
pub mod storage;

pub use errors::ServiceError;
pub use flavor::{DeletedFlavor, Flavor, FlavorInput};
pub use store::FlavorStore;
pub use storage::memory_store::MemoryFlavorStore;
