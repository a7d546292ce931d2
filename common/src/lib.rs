//! Data model shared between the EMR server and its clients.
//!
//! - `model`: records as they are stored and returned by the API.
//! - `requests`: payloads accepted by create/update/status endpoints.
//! - `patch`: helpers implementing presence-based merge updates.

pub mod model;
pub mod patch;
pub mod requests;
