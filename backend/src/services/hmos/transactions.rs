use crate::db::{new_id, parse_column, Database};
use crate::error::{required, ApiError, ApiResult};
use crate::services::hmos::get::require_hmo;
use crate::services::DateRange;
use actix_web::{web, HttpResponse};
use chrono::Utc;
use common::model::hmo::HmoTransaction;
use common::requests::hmo::NewHmoTransaction;
use log::info;
use rusqlite::{params, params_from_iter, Connection, Row, ToSql};

pub(crate) const TRANSACTION_COLUMNS: &str = "id, hmo_id, kind, amount, description, patient_name, \
     reference, transaction_date, created_at";

pub(crate) fn map_transaction(row: &Row) -> rusqlite::Result<HmoTransaction> {
    Ok(HmoTransaction {
        id: row.get(0)?,
        hmo_id: row.get(1)?,
        kind: parse_column(2, row.get(2)?)?,
        amount: row.get(3)?,
        description: row.get(4)?,
        patient_name: row.get(5)?,
        reference: row.get(6)?,
        transaction_date: row.get(7)?,
        created_at: row.get(8)?,
    })
}

/// `POST /api/hmos/{id}/transactions`
pub async fn create(
    db: web::Data<Database>,
    id: web::Path<String>,
    payload: web::Json<NewHmoTransaction>,
) -> Result<HttpResponse, ApiError> {
    let transaction = record_transaction(&*db.conn().await, &id, payload.into_inner())?;
    Ok(HttpResponse::Created().json(transaction))
}

/// `GET /api/hmos/{id}/transactions`
pub async fn list(
    db: web::Data<Database>,
    id: web::Path<String>,
    range: web::Query<DateRange>,
) -> Result<HttpResponse, ApiError> {
    let conn = db.conn().await;
    require_hmo(&conn, &id)?;
    let transactions = list_transactions(&conn, &id, &range)?;
    Ok(HttpResponse::Ok().json(transactions))
}

pub fn record_transaction(
    conn: &Connection,
    hmo_id: &str,
    payload: NewHmoTransaction,
) -> ApiResult<HmoTransaction> {
    let hmo = require_hmo(conn, hmo_id)?;
    if !payload.amount.is_finite() || payload.amount <= 0.0 {
        return Err(ApiError::validation("amount must be greater than zero"));
    }
    let now = Utc::now();
    let transaction = HmoTransaction {
        id: new_id(),
        hmo_id: hmo.id,
        kind: payload.kind,
        amount: payload.amount,
        description: required(&payload.description, "description")?,
        patient_name: payload.patient_name.filter(|n| !n.trim().is_empty()),
        reference: payload.reference.filter(|r| !r.trim().is_empty()),
        transaction_date: payload.transaction_date.unwrap_or(now),
        created_at: now,
    };

    conn.execute(
        "INSERT INTO hmo_transactions (id, hmo_id, kind, amount, description, patient_name,
         reference, transaction_date, created_at)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9)",
        params![
            transaction.id,
            transaction.hmo_id,
            transaction.kind.as_str(),
            transaction.amount,
            transaction.description,
            transaction.patient_name,
            transaction.reference,
            transaction.transaction_date,
            transaction.created_at,
        ],
    )?;
    info!(
        "HMO {} ledger: {} of {}",
        transaction.hmo_id, transaction.kind, transaction.amount
    );
    Ok(transaction)
}

/// Ledger lines for one HMO, oldest first.
pub fn list_transactions(conn: &Connection, hmo_id: &str, range: &DateRange) -> ApiResult<Vec<HmoTransaction>> {
    range.validate()?;
    let mut sql = format!("SELECT {TRANSACTION_COLUMNS} FROM hmo_transactions WHERE hmo_id = ?");
    let mut args: Vec<Box<dyn ToSql>> = vec![Box::new(hmo_id.to_string())];
    range.push_filter("transaction_date", &mut sql, &mut args);
    sql.push_str(" ORDER BY transaction_date, rowid");

    let mut stmt = conn.prepare(&sql)?;
    let transactions = stmt
        .query_map(params_from_iter(args.iter()), map_transaction)?
        .collect::<Result<Vec<_>, _>>()?;
    Ok(transactions)
}
