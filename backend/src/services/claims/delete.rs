use crate::db::Database;
use crate::error::{ApiError, ApiResult};
use crate::services::claims::get::require_claim;
use actix_web::{web, HttpResponse};
use common::model::claim::ClaimStatus;
use log::info;
use rusqlite::{params, Connection};
use serde_json::json;

/// `DELETE /api/claims/{id}`
pub async fn process(db: web::Data<Database>, id: web::Path<String>) -> Result<HttpResponse, ApiError> {
    delete_claim(&*db.conn().await, &id)?;
    Ok(HttpResponse::Ok().json(json!({ "message": "Claim deleted successfully" })))
}

/// Withdraws a claim. Only pending claims may be removed.
pub fn delete_claim(conn: &Connection, id: &str) -> ApiResult<()> {
    let claim = require_claim(conn, id)?;
    if claim.status != ClaimStatus::Pending {
        return Err(ApiError::validation(format!(
            "Only pending claims can be deleted; this claim is {}",
            claim.status
        )));
    }
    conn.execute("DELETE FROM claims WHERE id = ?1", params![id])?;
    info!("claim {} deleted", claim.claim_number);
    Ok(())
}
