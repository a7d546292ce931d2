use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Stock written off (expired, damaged) from a pharmacy store.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Disposal {
    pub id: String,
    pub drug_id: String,
    pub drug_name: String,
    pub store: String,
    pub quantity: i64,
    pub reason: String,
    pub disposed_by: Option<String>,
    pub created_at: DateTime<Utc>,
}
