use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A hospital bank account that payments and claim remittances are directed to.
///
/// At most one bank carries `is_default = true`; it is the account printed on
/// claim payment instructions and used for transfer receipts when the cashier
/// does not pick one explicitly.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Bank {
    pub id: String,
    pub bank_name: String,
    pub account_name: String,
    pub account_number: String,
    pub branch_name: Option<String>,
    pub swift_code: Option<String>,
    pub is_active: bool,
    pub is_default: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}
