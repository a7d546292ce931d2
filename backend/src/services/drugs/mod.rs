//! # Drug Service Module
//!
//! Pharmacy inventory. A drug row is the stock of one drug in one store, so the
//! same drug name appears once per store that holds it.

pub mod get;
pub mod save;

use actix_web::web::{get, post, put, scope};
use actix_web::Scope;

const API_PATH: &str = "/api/drugs";

pub fn configure_routes() -> Scope {
    scope(API_PATH)
        .route("", get().to(get::list))
        .route("", post().to(save::create))
        .route("/{id}", get().to(get::process))
        .route("/{id}", put().to(save::update))
}
