use crate::db::{parse_column, Database};
use crate::error::{ApiError, ApiResult};
use actix_web::{web, HttpResponse};
use common::model::transfer::{Transfer, TransferStatus};
use rusqlite::{params, params_from_iter, Connection, OptionalExtension, Row, ToSql};
use serde::Deserialize;

pub(crate) const TRANSFER_COLUMNS: &str = "id, drug_id, drug_name, from_store, to_store, quantity, \
     status, requested_by, reviewed_by, reviewed_at, rejection_reason, created_at";

pub(crate) fn map_transfer(row: &Row) -> rusqlite::Result<Transfer> {
    Ok(Transfer {
        id: row.get(0)?,
        drug_id: row.get(1)?,
        drug_name: row.get(2)?,
        from_store: row.get(3)?,
        to_store: row.get(4)?,
        quantity: row.get(5)?,
        status: parse_column(6, row.get(6)?)?,
        requested_by: row.get(7)?,
        reviewed_by: row.get(8)?,
        reviewed_at: row.get(9)?,
        rejection_reason: row.get(10)?,
        created_at: row.get(11)?,
    })
}

#[derive(Debug, Default, Deserialize)]
pub struct TransferListQuery {
    pub status: Option<String>,
}

/// `GET /api/transfers`
pub async fn list(db: web::Data<Database>, query: web::Query<TransferListQuery>) -> Result<HttpResponse, ApiError> {
    let transfers = list_transfers(&*db.conn().await, &query)?;
    Ok(HttpResponse::Ok().json(transfers))
}

/// `GET /api/transfers/{id}`
pub async fn process(db: web::Data<Database>, id: web::Path<String>) -> Result<HttpResponse, ApiError> {
    let transfer = require_transfer(&*db.conn().await, &id)?;
    Ok(HttpResponse::Ok().json(transfer))
}

pub fn list_transfers(conn: &Connection, query: &TransferListQuery) -> ApiResult<Vec<Transfer>> {
    let mut sql = format!("SELECT {TRANSFER_COLUMNS} FROM transfers");
    let mut args: Vec<Box<dyn ToSql>> = Vec::new();
    if let Some(status) = &query.status {
        let status: TransferStatus = status.parse().map_err(ApiError::Validation)?;
        sql.push_str(" WHERE status = ?");
        args.push(Box::new(status.as_str()));
    }
    sql.push_str(" ORDER BY created_at DESC, rowid DESC");

    let mut stmt = conn.prepare(&sql)?;
    let transfers = stmt
        .query_map(params_from_iter(args.iter()), map_transfer)?
        .collect::<Result<Vec<_>, _>>()?;
    Ok(transfers)
}

pub fn require_transfer(conn: &Connection, id: &str) -> ApiResult<Transfer> {
    conn.query_row(
        &format!("SELECT {TRANSFER_COLUMNS} FROM transfers WHERE id = ?1"),
        params![id],
        map_transfer,
    )
    .optional()?
    .ok_or_else(|| ApiError::not_found("Transfer"))
}
