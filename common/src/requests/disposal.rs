use serde::Deserialize;

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewDisposal {
    #[serde(default)]
    pub drug_id: String,
    #[serde(default)]
    pub quantity: i64,
    #[serde(default)]
    pub reason: String,
}
