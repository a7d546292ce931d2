//! # User Service Module
//!
//! Staff accounts and their roles. Accounts are never deleted; `toggle-active`
//! flips the active flag.

pub mod get;
pub mod save;

use actix_web::web::{get, post, put, scope};
use actix_web::Scope;

const API_PATH: &str = "/api/users";

pub fn configure_routes() -> Scope {
    scope(API_PATH)
        .route("", get().to(get::list))
        .route("", post().to(save::create))
        .route("/{id}", get().to(get::process))
        .route("/{id}", put().to(save::update))
        .route("/{id}/toggle-active", put().to(save::toggle_active))
}

#[cfg(test)]
mod tests {
    use crate::db::Database;
    use actix_web::http::StatusCode;
    use actix_web::test;
    use common::model::user::{Role, User};
    use serde_json::json;

    #[actix_web::test]
    async fn create_toggle_and_unknown_role() {
        let db = Database::open_in_memory().unwrap();
        let app = test::init_service(test_app!(db)).await;

        let req = test::TestRequest::post()
            .uri("/api/users")
            .set_json(json!({ "username": "AOkeke", "fullName": "Ada Okeke", "role": "cashier" }))
            .to_request();
        let user: User = test::call_and_read_body_json(&app, req).await;
        assert_eq!(user.username, "aokeke");
        assert_eq!(user.role, Role::Cashier);

        let req = test::TestRequest::put()
            .uri(&format!("/api/users/{}/toggle-active", user.id))
            .to_request();
        let toggled: User = test::call_and_read_body_json(&app, req).await;
        assert!(!toggled.is_active);

        let req = test::TestRequest::post()
            .uri("/api/users")
            .set_json(json!({ "username": "bob", "fullName": "Bob", "role": "janitor" }))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    }
}
