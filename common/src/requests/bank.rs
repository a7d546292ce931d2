use serde::Deserialize;

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewBank {
    #[serde(default)]
    pub bank_name: String,
    #[serde(default)]
    pub account_name: String,
    #[serde(default)]
    pub account_number: String,
    pub branch_name: Option<String>,
    pub swift_code: Option<String>,
    pub is_active: Option<bool>,
    pub is_default: Option<bool>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateBank {
    pub bank_name: Option<String>,
    pub account_name: Option<String>,
    pub account_number: Option<String>,
    #[serde(default, deserialize_with = "crate::patch::present")]
    pub branch_name: Option<Option<String>>,
    #[serde(default, deserialize_with = "crate::patch::present")]
    pub swift_code: Option<Option<String>>,
    pub is_active: Option<bool>,
    pub is_default: Option<bool>,
}
