pub mod bank;
pub mod charge;
pub mod claim;
pub mod disposal;
pub mod drug;
pub mod hmo;
pub mod receipt;
pub mod settings;
pub mod transfer;
pub mod user;
