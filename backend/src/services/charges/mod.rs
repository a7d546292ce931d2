//! # Charge Service Module
//!
//! The billing price list. Charges are never removed: `DELETE` flags a charge
//! inactive and `reactivate` restores it, so old receipts keep their references.

pub mod get;
pub mod save;
pub mod status;

use actix_web::web::{delete, get, post, put, scope};
use actix_web::Scope;

const API_PATH: &str = "/api/charges";

pub fn configure_routes() -> Scope {
    scope(API_PATH)
        .route("", get().to(get::list))
        .route("", post().to(save::create))
        .route("/{id}", get().to(get::process))
        .route("/{id}", put().to(save::update))
        .route("/{id}", delete().to(status::deactivate))
        .route("/{id}/reactivate", put().to(status::reactivate))
}
