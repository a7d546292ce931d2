//! # HMO Service Module
//!
//! Insurers the hospital bills, and the running ledger of what each one owes.
//!
//! ## Registered Routes
//!
//! *   **`GET /`**, **`GET /{id}`**, **`POST /`**, **`PUT /{id}`**: HMO records.
//!     `code` is unique across HMOs.
//! *   **`DELETE /{id}`** / **`PUT /{id}/reactivate`**: soft delete pair.
//! *   **`POST /{id}/transactions`**, **`GET /{id}/transactions`**: ledger lines
//!     (charges for services rendered, payments received).
//! *   **`GET /{id}/statement`**: ledger lines for a date window with totals and balance.

pub mod get;
pub mod save;
pub mod statement;
pub mod status;
pub mod transactions;

use actix_web::web::{delete, get, post, put, scope};
use actix_web::Scope;

const API_PATH: &str = "/api/hmos";

pub fn configure_routes() -> Scope {
    scope(API_PATH)
        .route("", get().to(get::list))
        .route("", post().to(save::create))
        .route("/{id}", get().to(get::process))
        .route("/{id}", put().to(save::update))
        .route("/{id}", delete().to(status::deactivate))
        .route("/{id}/reactivate", put().to(status::reactivate))
        .route("/{id}/transactions", post().to(transactions::create))
        .route("/{id}/transactions", get().to(transactions::list))
        .route("/{id}/statement", get().to(statement::process))
}
