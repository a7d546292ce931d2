use crate::actor::Actor;
use crate::db::{new_id, Database};
use crate::error::{required, ApiError, ApiResult};
use crate::services::drugs::get::{find_in_store, require_drug};
use crate::services::drugs::save::{adjust_stock, insert_drug};
use crate::services::transfers::get::require_transfer;
use actix_web::{web, HttpResponse};
use chrono::Utc;
use common::model::drug::Drug;
use common::model::transfer::{Transfer, TransferStatus};
use common::requests::transfer::RejectTransfer;
use log::info;
use rusqlite::{params, Connection};

/// `PUT /api/transfers/{id}/approve`
pub async fn approve(db: web::Data<Database>, id: web::Path<String>, actor: Actor) -> Result<HttpResponse, ApiError> {
    let transfer = approve_transfer(&*db.conn().await, &id, actor.id())?;
    Ok(HttpResponse::Ok().json(transfer))
}

/// `PUT /api/transfers/{id}/reject`
pub async fn reject(
    db: web::Data<Database>,
    id: web::Path<String>,
    actor: Actor,
    payload: web::Json<RejectTransfer>,
) -> Result<HttpResponse, ApiError> {
    let transfer = reject_transfer(&*db.conn().await, &id, payload.into_inner(), actor.id())?;
    Ok(HttpResponse::Ok().json(transfer))
}

fn require_pending(conn: &Connection, id: &str) -> ApiResult<Transfer> {
    let transfer = require_transfer(conn, id)?;
    if transfer.status != TransferStatus::Pending {
        return Err(ApiError::validation(format!(
            "Transfer has already been {}",
            transfer.status
        )));
    }
    Ok(transfer)
}

fn record_review(conn: &Connection, transfer: &Transfer) -> ApiResult<()> {
    conn.execute(
        "UPDATE transfers SET status = ?2, reviewed_by = ?3, reviewed_at = ?4, rejection_reason = ?5
         WHERE id = ?1",
        params![
            transfer.id,
            transfer.status.as_str(),
            transfer.reviewed_by,
            transfer.reviewed_at,
            transfer.rejection_reason,
        ],
    )?;
    Ok(())
}

pub fn approve_transfer(conn: &Connection, id: &str, actor: Option<&str>) -> ApiResult<Transfer> {
    let tx = conn.unchecked_transaction()?;
    let mut transfer = require_pending(&tx, id)?;
    let source = require_drug(&tx, &transfer.drug_id)?;
    adjust_stock(&tx, &source, -transfer.quantity)?;

    match find_in_store(&tx, &source.name, &transfer.to_store)? {
        Some(destination) => {
            adjust_stock(&tx, &destination, transfer.quantity)?;
        }
        None => {
            let now = Utc::now();
            insert_drug(
                &tx,
                &Drug {
                    id: new_id(),
                    store: transfer.to_store.clone(),
                    quantity: transfer.quantity,
                    created_at: now,
                    updated_at: now,
                    ..source
                },
            )?;
        }
    }

    transfer.status = TransferStatus::Approved;
    transfer.reviewed_by = actor.map(String::from);
    transfer.reviewed_at = Some(Utc::now());
    record_review(&tx, &transfer)?;
    tx.commit()?;

    info!(
        "transfer {} approved: {} x{} {} -> {}",
        transfer.id, transfer.drug_name, transfer.quantity, transfer.from_store, transfer.to_store
    );
    Ok(transfer)
}

pub fn reject_transfer(
    conn: &Connection,
    id: &str,
    payload: RejectTransfer,
    actor: Option<&str>,
) -> ApiResult<Transfer> {
    let reason = required(&payload.reason, "reason")?;
    let mut transfer = require_pending(conn, id)?;
    transfer.status = TransferStatus::Rejected;
    transfer.rejection_reason = Some(reason);
    transfer.reviewed_by = actor.map(String::from);
    transfer.reviewed_at = Some(Utc::now());
    record_review(conn, &transfer)?;
    info!("transfer {} rejected", transfer.id);
    Ok(transfer)
}
