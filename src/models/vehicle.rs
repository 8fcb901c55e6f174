use serde::{Deserialize, Serialize};

/// Catalog vehicle.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Vehicle {
    pub id: i32,
    pub name: String,
    pub model: Option<String>,
    pub manufacturer: Option<String>,
}
