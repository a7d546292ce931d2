//! # Transfer Service Module
//!
//! Stock movements between pharmacy stores. A transfer is requested first and
//! only moves stock when approved; approval debits the source store and
//! credits (or opens) the destination row for the same drug in one transaction.

pub mod get;
pub mod review;
pub mod save;

use actix_web::web::{get, post, put, scope};
use actix_web::Scope;

const API_PATH: &str = "/api/transfers";

pub fn configure_routes() -> Scope {
    scope(API_PATH)
        .route("", get().to(get::list))
        .route("", post().to(save::process))
        .route("/{id}", get().to(get::process))
        .route("/{id}/approve", put().to(review::approve))
        .route("/{id}/reject", put().to(review::reject))
}
