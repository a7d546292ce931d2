use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PaymentMethod {
    Cash,
    Transfer,
    Pos,
    Deposit,
}

impl PaymentMethod {
    pub fn as_str(&self) -> &'static str {
        match self {
            PaymentMethod::Cash => "cash",
            PaymentMethod::Transfer => "transfer",
            PaymentMethod::Pos => "pos",
            PaymentMethod::Deposit => "deposit",
        }
    }
}

impl fmt::Display for PaymentMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PaymentMethod {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "cash" => Ok(PaymentMethod::Cash),
            "transfer" => Ok(PaymentMethod::Transfer),
            "pos" => Ok(PaymentMethod::Pos),
            "deposit" => Ok(PaymentMethod::Deposit),
            other => Err(format!("unknown payment method `{other}`")),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReceiptItem {
    pub description: String,
    pub amount: f64,
}

/// Proof of payment issued by the cashier.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Receipt {
    pub id: String,
    /// `RCT-YYYYMMDD-NNNN`, sequential per calendar day.
    pub receipt_number: String,
    pub patient_id: String,
    pub patient_name: String,
    pub items: Vec<ReceiptItem>,
    pub total_amount: f64,
    pub payment_method: PaymentMethod,
    pub bank_id: Option<String>,
    pub received_by: Option<String>,
    pub created_at: DateTime<Utc>,
}
