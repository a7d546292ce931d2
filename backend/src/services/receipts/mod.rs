//! # Receipt Service Module
//!
//! Payment receipts issued by the cashier. Receipts are immutable once issued.
//!
//! *   **`POST /`**: issue a receipt. Totals are computed from the line items;
//!     transfers are tied to a bank account (the default one when none is named).
//! *   **`GET /`**: list, newest first, filtered by `patientId`, `from`, `to`.
//! *   **`GET /{id}`**: one receipt.

pub mod get;
pub mod save;

use actix_web::web::{get, post, scope};
use actix_web::Scope;

const API_PATH: &str = "/api/receipts";

pub fn configure_routes() -> Scope {
    scope(API_PATH)
        .route("", get().to(get::list))
        .route("", post().to(save::process))
        .route("/{id}", get().to(get::process))
}
