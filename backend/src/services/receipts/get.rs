use crate::db::{json_column, parse_column, Database};
use crate::error::{ApiError, ApiResult};
use crate::services::DateRange;
use actix_web::{web, HttpResponse};
use common::model::receipt::Receipt;
use rusqlite::{params, params_from_iter, Connection, OptionalExtension, Row, ToSql};
use serde::Deserialize;

pub(crate) const RECEIPT_COLUMNS: &str = "id, receipt_number, patient_id, patient_name, items, \
     total_amount, payment_method, bank_id, received_by, created_at";

pub(crate) fn map_receipt(row: &Row) -> rusqlite::Result<Receipt> {
    Ok(Receipt {
        id: row.get(0)?,
        receipt_number: row.get(1)?,
        patient_id: row.get(2)?,
        patient_name: row.get(3)?,
        items: json_column(4, row.get(4)?)?,
        total_amount: row.get(5)?,
        payment_method: parse_column(6, row.get(6)?)?,
        bank_id: row.get(7)?,
        received_by: row.get(8)?,
        created_at: row.get(9)?,
    })
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReceiptFilter {
    pub patient_id: Option<String>,
    #[serde(flatten)]
    pub range: DateRange,
}

/// `GET /api/receipts`
pub async fn list(
    db: web::Data<Database>,
    query: web::Query<ReceiptFilter>,
) -> Result<HttpResponse, ApiError> {
    let receipts = list_receipts(&*db.conn().await, &query)?;
    Ok(HttpResponse::Ok().json(receipts))
}

/// `GET /api/receipts/{id}`
pub async fn process(db: web::Data<Database>, id: web::Path<String>) -> Result<HttpResponse, ApiError> {
    let receipt = find_receipt(&*db.conn().await, &id)?.ok_or_else(|| ApiError::not_found("Receipt"))?;
    Ok(HttpResponse::Ok().json(receipt))
}

pub fn list_receipts(conn: &Connection, filter: &ReceiptFilter) -> ApiResult<Vec<Receipt>> {
    filter.range.validate()?;
    let mut sql = format!("SELECT {RECEIPT_COLUMNS} FROM receipts WHERE 1 = 1");
    let mut args: Vec<Box<dyn ToSql>> = Vec::new();
    if let Some(patient_id) = &filter.patient_id {
        sql.push_str(" AND patient_id = ?");
        args.push(Box::new(patient_id.clone()));
    }
    filter.range.push_filter("created_at", &mut sql, &mut args);
    sql.push_str(" ORDER BY created_at DESC, rowid DESC");

    let mut stmt = conn.prepare(&sql)?;
    let receipts = stmt
        .query_map(params_from_iter(args.iter()), map_receipt)?
        .collect::<Result<Vec<_>, _>>()?;
    Ok(receipts)
}

pub fn find_receipt(conn: &Connection, id: &str) -> ApiResult<Option<Receipt>> {
    let receipt = conn
        .query_row(
            &format!("SELECT {RECEIPT_COLUMNS} FROM receipts WHERE id = ?1"),
            params![id],
            map_receipt,
        )
        .optional()?;
    Ok(receipt)
}
