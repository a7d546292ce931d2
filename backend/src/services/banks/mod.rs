//! # Bank Service Module
//!
//! Hospital bank accounts. At most one account is the default; it is used for
//! claim payment instructions and for transfer receipts that do not name a bank.
//!
//! ## Registered Routes
//!
//! *   **`GET /`**: all banks, default first, then newest first.
//! *   **`GET /default`**: the default bank, `404` when none is flagged.
//! *   **`GET /{id}`**: one bank.
//! *   **`POST /`**: create; `bankName`, `accountName` and `accountNumber` are required.
//! *   **`PUT /{id}`**: merge update; setting `isDefault: true` unflags every other bank.
//! *   **`PUT /{id}/set-default`**: make this bank the only default.
//! *   **`DELETE /{id}`**: hard delete. Deleting the default leaves no default.

pub mod default;
pub mod delete;
pub mod get;
pub mod save;

use actix_web::web::{delete, get, post, put, scope};
use actix_web::Scope;

const API_PATH: &str = "/api/banks";

pub fn configure_routes() -> Scope {
    scope(API_PATH)
        .route("", get().to(get::list))
        .route("", post().to(save::create))
        .route("/default", get().to(default::current))
        .route("/{id}", get().to(get::process))
        .route("/{id}", put().to(save::update))
        .route("/{id}/set-default", put().to(default::process))
        .route("/{id}", delete().to(delete::process))
}

#[cfg(test)]
mod tests {
    use super::save;
    use crate::db::Database;
    use actix_web::http::StatusCode;
    use actix_web::test;
    use common::model::bank::Bank;
    use common::requests::bank::NewBank;
    use serde_json::json;

    async fn create(db: &Database, name: &str) -> Bank {
        let new_bank = NewBank {
            bank_name: name.to_string(),
            account_name: "City Hospital".to_string(),
            account_number: "0123456789".to_string(),
            ..NewBank::default()
        };
        save::create_bank(&*db.conn().await, new_bank).unwrap()
    }

    #[actix_web::test]
    async fn set_default_moves_flag_between_banks() {
        let db = Database::open_in_memory().unwrap();
        let app = test::init_service(test_app!(db)).await;

        let a = create(&db, "A").await;
        let b = create(&db, "B").await;
        let c = create(&db, "C").await;

        let req = test::TestRequest::put()
            .uri(&format!("/api/banks/{}/set-default", b.id))
            .to_request();
        let promoted: Bank = test::call_and_read_body_json(&app, req).await;
        assert!(promoted.is_default);

        let req = test::TestRequest::get().uri("/api/banks").to_request();
        let banks: Vec<Bank> = test::call_and_read_body_json(&app, req).await;
        assert_eq!(banks[0].id, b.id);
        assert!(banks
            .iter()
            .filter(|bank| bank.id == a.id || bank.id == c.id)
            .all(|bank| !bank.is_default));

        let req = test::TestRequest::put()
            .uri(&format!("/api/banks/{}/set-default", a.id))
            .to_request();
        test::call_service(&app, req).await;

        let req = test::TestRequest::get().uri("/api/banks").to_request();
        let banks: Vec<Bank> = test::call_and_read_body_json(&app, req).await;
        assert_eq!(banks[0].id, a.id);
        assert_eq!(banks.iter().filter(|bank| bank.is_default).count(), 1);
    }

    #[actix_web::test]
    async fn default_endpoint_reports_missing_default() {
        let db = Database::open_in_memory().unwrap();
        let app = test::init_service(test_app!(db)).await;
        create(&db, "A").await;

        let req = test::TestRequest::get().uri("/api/banks/default").to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::NOT_FOUND);
        let body: serde_json::Value = test::read_body_json(resp).await;
        assert_eq!(body["message"], "No default bank configured");
    }

    #[actix_web::test]
    async fn create_without_required_fields_is_rejected() {
        let db = Database::open_in_memory().unwrap();
        let app = test::init_service(test_app!(db)).await;

        let req = test::TestRequest::post()
            .uri("/api/banks")
            .set_json(json!({ "bankName": "Zenith" }))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
        let body: serde_json::Value = test::read_body_json(resp).await;
        assert_eq!(body["message"], "accountName is required");
    }

    #[actix_web::test]
    async fn delete_unknown_bank_is_not_found() {
        let db = Database::open_in_memory().unwrap();
        let app = test::init_service(test_app!(db)).await;
        create(&db, "A").await;

        let req = test::TestRequest::delete().uri("/api/banks/nope").to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::NOT_FOUND);

        let req = test::TestRequest::get().uri("/api/banks").to_request();
        let banks: Vec<Bank> = test::call_and_read_body_json(&app, req).await;
        assert_eq!(banks.len(), 1);
    }
}
