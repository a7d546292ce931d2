use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Stock of one drug held in one pharmacy store.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Drug {
    pub id: String,
    pub name: String,
    pub store: String,
    pub unit: String,
    pub quantity: i64,
    pub unit_price: f64,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}
