//! # Disposal Service Module
//!
//! Write-offs of expired or damaged stock. Recording a disposal debits the
//! drug's store immediately.

pub mod get;
pub mod save;

use actix_web::web::{get, post, scope};
use actix_web::Scope;

const API_PATH: &str = "/api/disposals";

pub fn configure_routes() -> Scope {
    scope(API_PATH)
        .route("", get().to(get::list))
        .route("", post().to(save::process))
}
