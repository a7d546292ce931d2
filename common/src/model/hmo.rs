use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// A health maintenance organisation (insurer) the hospital bills.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Hmo {
    pub id: String,
    pub name: String,
    pub code: String,
    pub contact_person: Option<String>,
    pub phone: Option<String>,
    pub email: Option<String>,
    pub address: Option<String>,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HmoTransactionKind {
    /// Services rendered to an enrollee, owed by the HMO.
    Charge,
    /// Money received from the HMO.
    Payment,
}

impl HmoTransactionKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            HmoTransactionKind::Charge => "charge",
            HmoTransactionKind::Payment => "payment",
        }
    }
}

impl fmt::Display for HmoTransactionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for HmoTransactionKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "charge" => Ok(HmoTransactionKind::Charge),
            "payment" => Ok(HmoTransactionKind::Payment),
            other => Err(format!("unknown HMO transaction kind `{other}`")),
        }
    }
}

/// One line of an HMO ledger.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HmoTransaction {
    pub id: String,
    pub hmo_id: String,
    pub kind: HmoTransactionKind,
    pub amount: f64,
    pub description: String,
    pub patient_name: Option<String>,
    pub reference: Option<String>,
    pub transaction_date: DateTime<Utc>,
    pub created_at: DateTime<Utc>,
}

/// Ledger summary for one HMO over an optional date window.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HmoStatement {
    pub hmo: Hmo,
    pub transactions: Vec<HmoTransaction>,
    pub total_charges: f64,
    pub total_payments: f64,
    /// `total_charges - total_payments`; positive means the HMO owes the hospital.
    pub balance: f64,
}
