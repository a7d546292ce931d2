use crate::model::claim::ClaimItem;
use chrono::NaiveDate;
use serde::Deserialize;

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewClaim {
    #[serde(default)]
    pub hmo_id: String,
    #[serde(default)]
    pub patient_id: String,
    #[serde(default)]
    pub patient_name: String,
    pub enrollee_id: Option<String>,
    pub service_date: NaiveDate,
    #[serde(default)]
    pub items: Vec<ClaimItem>,
}

/// Body of `PUT /claims/{id}/status`.
///
/// `status` stays a string so that an unknown value can be answered with the
/// list of allowed ones.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateClaimStatus {
    #[serde(default)]
    pub status: String,
    pub rejection_reason: Option<String>,
    pub approved_amount: Option<f64>,
}
