use serde::Deserialize;

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewDrug {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub store: String,
    #[serde(default)]
    pub unit: String,
    #[serde(default)]
    pub quantity: i64,
    #[serde(default)]
    pub unit_price: f64,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateDrug {
    pub name: Option<String>,
    pub unit: Option<String>,
    pub quantity: Option<i64>,
    pub unit_price: Option<f64>,
    pub is_active: Option<bool>,
}
