//! Claim status transitions.
//!
//! Any listed status may be requested, with these rules:
//! - `rejected` needs a non-blank `rejectionReason`;
//! - `approved` records `approvedAmount` (the full total when omitted), which
//!   may not exceed the claimed total;
//! - a `paid` claim cannot change status again.

use crate::actor::Actor;
use crate::db::Database;
use crate::error::{ApiError, ApiResult};
use crate::services::claims::get::require_claim;
use actix_web::{web, HttpResponse};
use chrono::Utc;
use common::model::claim::{Claim, ClaimStatus};
use common::requests::claim::UpdateClaimStatus;
use log::info;
use rusqlite::{params, Connection};

/// `PUT /api/claims/{id}/status`
pub async fn process(
    db: web::Data<Database>,
    id: web::Path<String>,
    actor: Actor,
    payload: web::Json<UpdateClaimStatus>,
) -> Result<HttpResponse, ApiError> {
    let claim = update_claim_status(&*db.conn().await, &id, payload.into_inner(), actor.id())?;
    Ok(HttpResponse::Ok().json(claim))
}

pub fn update_claim_status(
    conn: &Connection,
    id: &str,
    payload: UpdateClaimStatus,
    actor: Option<&str>,
) -> ApiResult<Claim> {
    let status: ClaimStatus = payload.status.trim().parse().map_err(ApiError::Validation)?;
    let mut claim = require_claim(conn, id)?;

    if claim.status == ClaimStatus::Paid {
        return Err(ApiError::validation("Claim has already been paid"));
    }

    match status {
        ClaimStatus::Rejected => {
            let reason = payload
                .rejection_reason
                .map(|r| r.trim().to_string())
                .filter(|r| !r.is_empty())
                .ok_or_else(|| ApiError::validation("Rejection reason is required"))?;
            claim.rejection_reason = Some(reason);
            claim.approved_amount = None;
        }
        ClaimStatus::Approved => {
            let approved = payload.approved_amount.unwrap_or(claim.total_amount);
            if !approved.is_finite() || approved < 0.0 || approved > claim.total_amount {
                return Err(ApiError::validation(format!(
                    "Approved amount must be between 0 and {}",
                    claim.total_amount
                )));
            }
            claim.approved_amount = Some(approved);
            claim.rejection_reason = None;
        }
        ClaimStatus::Paid => {
            if claim.approved_amount.is_none() {
                claim.approved_amount = Some(claim.total_amount);
            }
        }
        ClaimStatus::Pending | ClaimStatus::Submitted => {
            claim.rejection_reason = None;
        }
    }

    let now = Utc::now();
    claim.status = status;
    claim.status_updated_by = actor.map(String::from);
    claim.status_updated_at = Some(now);
    claim.updated_at = now;

    conn.execute(
        "UPDATE claims SET status = ?2, approved_amount = ?3, rejection_reason = ?4,
         status_updated_by = ?5, status_updated_at = ?6, updated_at = ?7
         WHERE id = ?1",
        params![
            claim.id,
            claim.status.as_str(),
            claim.approved_amount,
            claim.rejection_reason,
            claim.status_updated_by,
            claim.status_updated_at,
            claim.updated_at,
        ],
    )?;
    info!("claim {} moved to {}", claim.claim_number, claim.status);
    Ok(claim)
}
