use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    Admin,
    Doctor,
    Nurse,
    Pharmacist,
    LabScientist,
    Radiographer,
    Cashier,
    Records,
    HmoOfficer,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Admin => "admin",
            Role::Doctor => "doctor",
            Role::Nurse => "nurse",
            Role::Pharmacist => "pharmacist",
            Role::LabScientist => "lab_scientist",
            Role::Radiographer => "radiographer",
            Role::Cashier => "cashier",
            Role::Records => "records",
            Role::HmoOfficer => "hmo_officer",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Role {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "admin" => Ok(Role::Admin),
            "doctor" => Ok(Role::Doctor),
            "nurse" => Ok(Role::Nurse),
            "pharmacist" => Ok(Role::Pharmacist),
            "lab_scientist" => Ok(Role::LabScientist),
            "radiographer" => Ok(Role::Radiographer),
            "cashier" => Ok(Role::Cashier),
            "records" => Ok(Role::Records),
            "hmo_officer" => Ok(Role::HmoOfficer),
            other => Err(format!("unknown role `{other}`")),
        }
    }
}

/// A staff account. Credentials live outside this service.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: String,
    pub username: String,
    pub full_name: String,
    pub role: Role,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}
