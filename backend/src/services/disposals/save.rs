use crate::actor::Actor;
use crate::db::{new_id, Database};
use crate::error::{required, ApiError, ApiResult};
use crate::services::drugs::get::require_drug;
use crate::services::drugs::save::adjust_stock;
use actix_web::{web, HttpResponse};
use chrono::Utc;
use common::model::disposal::Disposal;
use common::requests::disposal::NewDisposal;
use log::info;
use rusqlite::{params, Connection};

/// `POST /api/disposals`
pub async fn process(
    db: web::Data<Database>,
    actor: Actor,
    payload: web::Json<NewDisposal>,
) -> Result<HttpResponse, ApiError> {
    let disposal = record_disposal(&*db.conn().await, payload.into_inner(), actor.id())?;
    Ok(HttpResponse::Created().json(disposal))
}

pub fn record_disposal(conn: &Connection, payload: NewDisposal, actor: Option<&str>) -> ApiResult<Disposal> {
    let drug_id = required(&payload.drug_id, "drugId")?;
    let reason = required(&payload.reason, "reason")?;
    if payload.quantity < 1 {
        return Err(ApiError::validation("quantity must be at least 1"));
    }

    let tx = conn.unchecked_transaction()?;
    let drug = require_drug(&tx, &drug_id)?;
    adjust_stock(&tx, &drug, -payload.quantity)?;

    let disposal = Disposal {
        id: new_id(),
        drug_id: drug.id,
        drug_name: drug.name,
        store: drug.store,
        quantity: payload.quantity,
        reason,
        disposed_by: actor.map(String::from),
        created_at: Utc::now(),
    };
    tx.execute(
        "INSERT INTO disposals (id, drug_id, drug_name, store, quantity, reason, disposed_by, created_at)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)",
        params![
            disposal.id,
            disposal.drug_id,
            disposal.drug_name,
            disposal.store,
            disposal.quantity,
            disposal.reason,
            disposal.disposed_by,
            disposal.created_at,
        ],
    )?;
    tx.commit()?;

    info!(
        "disposed {} x{} from {}: {}",
        disposal.drug_name, disposal.quantity, disposal.store, disposal.reason
    );
    Ok(disposal)
}
