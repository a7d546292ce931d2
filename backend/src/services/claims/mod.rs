//! # Claim Service Module
//!
//! Bills raised against an HMO for services rendered to its enrollees.
//!
//! ## Registered Routes
//!
//! *   **`GET /`**: list, newest first; filter by `status`, `hmoId`, and a
//!     `from`/`to` window on the service date.
//! *   **`GET /{id}`**: one claim.
//! *   **`POST /`**: raise a claim against an active HMO; the total is the sum of line items.
//! *   **`PUT /{id}/status`**: move the claim to another status. Rejections need a
//!     reason; approvals may carry an approved amount; paid claims are final.
//! *   **`DELETE /{id}`**: withdraw a claim that is still pending.

pub mod delete;
pub mod get;
pub mod save;
pub mod status;

use actix_web::web::{delete, get, post, put, scope};
use actix_web::Scope;

const API_PATH: &str = "/api/claims";

pub fn configure_routes() -> Scope {
    scope(API_PATH)
        .route("", get().to(get::list))
        .route("", post().to(save::process))
        .route("/{id}", get().to(get::process))
        .route("/{id}/status", put().to(status::process))
        .route("/{id}", delete().to(delete::process))
}

#[cfg(test)]
mod tests {
    use crate::actor::USER_HEADER;
    use crate::db::Database;
    use crate::services::hmos::save::create_hmo;
    use actix_web::http::StatusCode;
    use actix_web::test;
    use common::model::claim::{Claim, ClaimStatus};
    use common::requests::hmo::NewHmo;
    use serde_json::json;

    #[actix_web::test]
    async fn rejection_requires_reason_and_is_audited() {
        let db = Database::open_in_memory().unwrap();
        let hmo = create_hmo(
            &*db.conn().await,
            NewHmo {
                name: "Clearline".into(),
                code: "CLH".into(),
                ..NewHmo::default()
            },
        )
        .unwrap();
        let app = test::init_service(test_app!(db)).await;

        let req = test::TestRequest::post()
            .uri("/api/claims")
            .set_json(json!({
                "hmoId": hmo.id,
                "patientId": "PT-0042",
                "patientName": "Musa Bala",
                "serviceDate": "2026-06-01",
                "items": [{ "description": "X-ray chest", "quantity": 1, "unitPrice": 15000.0 }]
            }))
            .to_request();
        let claim: Claim = test::call_and_read_body_json(&app, req).await;
        assert_eq!(claim.status, ClaimStatus::Pending);

        let req = test::TestRequest::put()
            .uri(&format!("/api/claims/{}/status", claim.id))
            .set_json(json!({ "status": "rejected" }))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

        let req = test::TestRequest::put()
            .uri(&format!("/api/claims/{}/status", claim.id))
            .set_json(json!({ "status": "archived" }))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
        let body: serde_json::Value = test::read_body_json(resp).await;
        assert_eq!(
            body["message"],
            "Invalid status. Must be one of: pending, submitted, approved, rejected, paid"
        );

        let req = test::TestRequest::put()
            .uri(&format!("/api/claims/{}/status", claim.id))
            .insert_header((USER_HEADER, "hmo-officer-3"))
            .set_json(json!({ "status": "rejected", "rejectionReason": "Not covered by plan" }))
            .to_request();
        let rejected: Claim = test::call_and_read_body_json(&app, req).await;
        assert_eq!(rejected.status, ClaimStatus::Rejected);
        assert_eq!(rejected.rejection_reason.as_deref(), Some("Not covered by plan"));
        assert_eq!(rejected.status_updated_by.as_deref(), Some("hmo-officer-3"));
        assert!(rejected.status_updated_at.is_some());
    }
}
