use crate::actor::Actor;
use crate::db::{new_id, Database};
use crate::error::{required, ApiError, ApiResult};
use crate::services::drugs::get::require_drug;
use actix_web::{web, HttpResponse};
use chrono::Utc;
use common::model::transfer::{Transfer, TransferStatus};
use common::requests::transfer::NewTransfer;
use log::info;
use rusqlite::{params, Connection};

/// `POST /api/transfers`
pub async fn process(
    db: web::Data<Database>,
    actor: Actor,
    payload: web::Json<NewTransfer>,
) -> Result<HttpResponse, ApiError> {
    let transfer = request_transfer(&*db.conn().await, payload.into_inner(), actor.id())?;
    Ok(HttpResponse::Created().json(transfer))
}

/// Records a pending transfer. Stock is checked here and again on approval.
pub fn request_transfer(conn: &Connection, payload: NewTransfer, actor: Option<&str>) -> ApiResult<Transfer> {
    let drug_id = required(&payload.drug_id, "drugId")?;
    let to_store = required(&payload.to_store, "toStore")?;
    if payload.quantity < 1 {
        return Err(ApiError::validation("quantity must be at least 1"));
    }
    let drug = require_drug(conn, &drug_id)?;
    if drug.store == to_store {
        return Err(ApiError::validation("Source and destination stores must differ"));
    }
    if payload.quantity > drug.quantity {
        return Err(ApiError::validation(format!(
            "Insufficient stock of {} in {}: {} available",
            drug.name, drug.store, drug.quantity
        )));
    }

    let transfer = Transfer {
        id: new_id(),
        drug_id: drug.id,
        drug_name: drug.name,
        from_store: drug.store,
        to_store,
        quantity: payload.quantity,
        status: TransferStatus::Pending,
        requested_by: actor.map(String::from),
        reviewed_by: None,
        reviewed_at: None,
        rejection_reason: None,
        created_at: Utc::now(),
    };
    conn.execute(
        "INSERT INTO transfers (id, drug_id, drug_name, from_store, to_store, quantity, status,
         requested_by, created_at)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9)",
        params![
            transfer.id,
            transfer.drug_id,
            transfer.drug_name,
            transfer.from_store,
            transfer.to_store,
            transfer.quantity,
            transfer.status.as_str(),
            transfer.requested_by,
            transfer.created_at,
        ],
    )?;
    info!(
        "transfer {} requested: {} x{} {} -> {}",
        transfer.id, transfer.drug_name, transfer.quantity, transfer.from_store, transfer.to_store
    );
    Ok(transfer)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::open_memory_connection;
    use crate::services::drugs::save::tests::stock;

    fn new_transfer(drug_id: &str, to_store: &str, quantity: i64) -> NewTransfer {
        NewTransfer {
            drug_id: drug_id.into(),
            to_store: to_store.into(),
            quantity,
        }
    }

    #[test]
    fn request_does_not_move_stock() {
        let conn = open_memory_connection().unwrap();
        let drug = stock(&conn, "Ceftriaxone", "Main", 30);
        let transfer = request_transfer(&conn, new_transfer(&drug.id, "Theatre", 10), None).unwrap();

        assert_eq!(transfer.from_store, "Main");
        assert_eq!(require_drug(&conn, &drug.id).unwrap().quantity, 30);
    }

    #[test]
    fn invalid_requests_are_refused() {
        let conn = open_memory_connection().unwrap();
        let drug = stock(&conn, "Ceftriaxone", "Main", 30);

        for payload in [
            new_transfer(&drug.id, "Main", 5),
            new_transfer(&drug.id, "Theatre", 0),
            new_transfer(&drug.id, "Theatre", 31),
            new_transfer(&drug.id, "  ", 5),
        ] {
            assert!(matches!(
                request_transfer(&conn, payload, None),
                Err(ApiError::Validation(_))
            ));
        }
        assert!(matches!(
            request_transfer(&conn, new_transfer("missing", "Theatre", 1), None),
            Err(ApiError::NotFound(_))
        ));
    }
}
