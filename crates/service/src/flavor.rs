use serde::{Deserialize, Serialize};

/// A single flavor record. `id` is assigned by the store and never changes.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct Flavor {
    pub id: i64,
    pub flavor: String,
}

impl Flavor {
    pub fn new(id: i64, flavor: impl Into<String>) -> Self {
        Self { id, flavor: flavor.into() }
    }
}

/// Create/update payload. A missing `flavor` field decodes to the empty string.
#[derive(Clone, Debug, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct FlavorInput {
    pub flavor: String,
}

impl FlavorInput {
    pub fn new(flavor: impl Into<String>) -> Self {
        Self { flavor: flavor.into() }
    }
}

pub const DELETED_MESSAGE: &str = "Flavor deleted successfully";

/// Confirmation body returned after a delete.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct DeletedFlavor {
    pub message: String,
    pub deleted: Flavor,
}

impl From<Flavor> for DeletedFlavor {
    fn from(deleted: Flavor) -> Self {
        Self { message: DELETED_MESSAGE.to_string(), deleted }
    }
}

/// The records every fresh store starts with.
pub fn seed() -> Vec<Flavor> {
    vec![Flavor::new(1, "strawberry"), Flavor::new(2, "mint chocolate")]
}
