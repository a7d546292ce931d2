use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// System-wide configuration used for print and report headers.
///
/// Exactly one row exists once anything has read it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Settings {
    pub hospital_name: String,
    /// Either a URL or a `data:` URI holding the base64-encoded image.
    pub logo: Option<String>,
    pub address: String,
    pub phone: String,
    pub email: String,
    pub website: String,
    pub system_version: String,
    pub report_header: String,
    pub report_footer: String,
    pub currency_symbol: String,
    pub last_updated_by: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}
