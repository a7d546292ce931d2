//! # Settings Service Module
//!
//! The system configuration singleton used for print and report headers.
//! The record is keyed `system` and materialised with defaults the first time
//! anything reads or writes it.
//!
//! ## Registered Routes
//!
//! *   **`GET /`**: current settings, created with defaults when absent.
//! *   **`PUT /`**: merge update; only supplied fields change. Stamps `lastUpdatedBy`.
//! *   **`POST /logo`**: multipart upload of the hospital logo (`logo` file field),
//!     stored inline as a `data:` URI.

pub mod get;
pub mod logo;
pub mod save;

use actix_web::web::{get, post, put, scope};
use actix_web::Scope;

const API_PATH: &str = "/api/settings";

pub fn configure_routes() -> Scope {
    scope(API_PATH)
        .route("", get().to(get::process))
        .route("", put().to(save::process))
        .route("/logo", post().to(logo::process))
}

#[cfg(test)]
mod tests {
    use crate::actor::USER_HEADER;
    use crate::db::Database;
    use actix_web::http::StatusCode;
    use actix_web::test;
    use common::model::settings::Settings;
    use serde_json::json;

    #[actix_web::test]
    async fn partial_update_keeps_unsupplied_fields() {
        let db = Database::open_in_memory().unwrap();
        let app = test::init_service(test_app!(db)).await;

        let req = test::TestRequest::get().uri("/api/settings").to_request();
        let initial: Settings = test::call_and_read_body_json(&app, req).await;
        assert_eq!(initial.hospital_name, "SUD EMR System");
        assert_eq!(initial.system_version, "1.0.0");

        let req = test::TestRequest::put()
            .uri("/api/settings")
            .insert_header((USER_HEADER, "admin-1"))
            .set_json(json!({ "hospitalName": "City Hospital" }))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::OK);

        let req = test::TestRequest::get().uri("/api/settings").to_request();
        let after: Settings = test::call_and_read_body_json(&app, req).await;
        assert_eq!(after.hospital_name, "City Hospital");
        assert_eq!(after.system_version, "1.0.0");
        assert_eq!(after.currency_symbol, initial.currency_symbol);
        assert_eq!(after.last_updated_by.as_deref(), Some("admin-1"));
    }

    #[actix_web::test]
    async fn malformed_body_is_a_bad_request() {
        let db = Database::open_in_memory().unwrap();
        let app = test::init_service(test_app!(db)).await;

        let req = test::TestRequest::put()
            .uri("/api/settings")
            .insert_header(("content-type", "application/json"))
            .set_payload("{not json")
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
        let body: serde_json::Value = test::read_body_json(resp).await;
        assert!(body["message"].as_str().unwrap().starts_with("Invalid request body"));
    }
}
