//! Collection point types.

use serde::{Deserialize, Deserializer, Serialize};

/// Review state of a submitted collection point.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PointStatus {
    Pending,
    Approved,
    Rejected,
}

impl PointStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            PointStatus::Pending => "pending",
            PointStatus::Approved => "approved",
            PointStatus::Rejected => "rejected",
        }
    }
}

/// A place where waste of one or more [`CollectionType`](super::CollectionType)s is collected.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CollectionPoint {
    pub id: i64,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    /// Decimal degrees. The backend sends decimals as strings.
    #[serde(deserialize_with = "coordinate")]
    pub latitude: f64,

    #[serde(deserialize_with = "coordinate")]
    pub longitude: f64,

    /// Ids of the accepted collection types.
    #[serde(default)]
    pub types: Vec<i64>,

    #[serde(default)]
    pub is_active: bool,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<PointStatus>,

    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum Coordinate {
    Number(f64),
    Text(String),
}

fn coordinate<'de, D>(deserializer: D) -> Result<f64, D::Error>
where
    D: Deserializer<'de>,
{
    match Coordinate::deserialize(deserializer)? {
        Coordinate::Number(value) => Ok(value),
        Coordinate::Text(text) => text
            .trim()
            .parse::<f64>()
            .map_err(|e| serde::de::Error::custom(format!("invalid coordinate '{text}': {e}"))),
    }
}

/// Request body of the approve/reject endpoint.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct StatusUpdate {
    pub is_active: bool,
    pub status: PointStatus,
}

impl StatusUpdate {
    /// An approval activates the point; anything else rejects it.
    pub fn from_approval(approved: bool) -> Self {
        if approved {
            Self {
                is_active: true,
                status: PointStatus::Approved,
            }
        } else {
            Self {
                is_active: false,
                status: PointStatus::Rejected,
            }
        }
    }
}
