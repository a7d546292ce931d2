use crate::model::hmo::HmoTransactionKind;
use chrono::{DateTime, Utc};
use serde::Deserialize;

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewHmo {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub code: String,
    pub contact_person: Option<String>,
    pub phone: Option<String>,
    pub email: Option<String>,
    pub address: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateHmo {
    pub name: Option<String>,
    pub code: Option<String>,
    #[serde(default, deserialize_with = "crate::patch::present")]
    pub contact_person: Option<Option<String>>,
    #[serde(default, deserialize_with = "crate::patch::present")]
    pub phone: Option<Option<String>>,
    #[serde(default, deserialize_with = "crate::patch::present")]
    pub email: Option<Option<String>>,
    #[serde(default, deserialize_with = "crate::patch::present")]
    pub address: Option<Option<String>>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewHmoTransaction {
    pub kind: HmoTransactionKind,
    #[serde(default)]
    pub amount: f64,
    #[serde(default)]
    pub description: String,
    pub patient_name: Option<String>,
    pub reference: Option<String>,
    pub transaction_date: Option<DateTime<Utc>>,
}
