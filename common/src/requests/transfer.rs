use serde::Deserialize;

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewTransfer {
    #[serde(default)]
    pub drug_id: String,
    #[serde(default)]
    pub to_store: String,
    #[serde(default)]
    pub quantity: i64,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RejectTransfer {
    #[serde(default)]
    pub reason: String,
}
