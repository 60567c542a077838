//! Collection categories (paper, glass, batteries, ...).

use serde::{Deserialize, Serialize};

/// A category of waste a collection point accepts.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CollectionType {
    pub id: i64,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

/// Request body for creating a category.
#[derive(Debug, Clone, Serialize)]
pub struct NewCollectionType {
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl NewCollectionType {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            description: None,
        }
    }
}
