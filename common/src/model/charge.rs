use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A billable item on the hospital price list (consultation, bed, procedure).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Charge {
    pub id: String,
    pub name: String,
    pub category: String,
    pub amount: f64,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}
