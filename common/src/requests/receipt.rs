use crate::model::receipt::{PaymentMethod, ReceiptItem};
use serde::Deserialize;

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewReceipt {
    #[serde(default)]
    pub patient_id: String,
    #[serde(default)]
    pub patient_name: String,
    #[serde(default)]
    pub items: Vec<ReceiptItem>,
    pub payment_method: PaymentMethod,
    /// Only meaningful for transfers; the default bank is used when omitted.
    pub bank_id: Option<String>,
}
