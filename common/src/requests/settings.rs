use serde::Deserialize;

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateSettings {
    pub hospital_name: Option<String>,
    #[serde(default, deserialize_with = "crate::patch::present")]
    pub logo: Option<Option<String>>,
    pub address: Option<String>,
    pub phone: Option<String>,
    pub email: Option<String>,
    pub website: Option<String>,
    pub system_version: Option<String>,
    pub report_header: Option<String>,
    pub report_footer: Option<String>,
    pub currency_symbol: Option<String>,
}
