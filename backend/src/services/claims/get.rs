use crate::db::{json_column, parse_column, Database};
use crate::error::{ApiError, ApiResult};
use crate::services::DateRange;
use actix_web::{web, HttpResponse};
use common::model::claim::{Claim, ClaimStatus};
use rusqlite::{params, params_from_iter, Connection, OptionalExtension, Row, ToSql};
use serde::Deserialize;

pub(crate) const CLAIM_COLUMNS: &str = "id, claim_number, hmo_id, patient_id, patient_name, \
     enrollee_id, service_date, items, total_amount, approved_amount, status, rejection_reason, \
     status_updated_by, status_updated_at, created_at, updated_at";

pub(crate) fn map_claim(row: &Row) -> rusqlite::Result<Claim> {
    Ok(Claim {
        id: row.get(0)?,
        claim_number: row.get(1)?,
        hmo_id: row.get(2)?,
        patient_id: row.get(3)?,
        patient_name: row.get(4)?,
        enrollee_id: row.get(5)?,
        service_date: row.get(6)?,
        items: json_column(7, row.get(7)?)?,
        total_amount: row.get(8)?,
        approved_amount: row.get(9)?,
        status: parse_column(10, row.get(10)?)?,
        rejection_reason: row.get(11)?,
        status_updated_by: row.get(12)?,
        status_updated_at: row.get(13)?,
        created_at: row.get(14)?,
        updated_at: row.get(15)?,
    })
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClaimFilter {
    pub status: Option<String>,
    pub hmo_id: Option<String>,
    #[serde(flatten)]
    pub range: DateRange,
}

/// `GET /api/claims`
pub async fn list(db: web::Data<Database>, query: web::Query<ClaimFilter>) -> Result<HttpResponse, ApiError> {
    let claims = list_claims(&*db.conn().await, &query)?;
    Ok(HttpResponse::Ok().json(claims))
}

/// `GET /api/claims/{id}`
pub async fn process(db: web::Data<Database>, id: web::Path<String>) -> Result<HttpResponse, ApiError> {
    let claim = require_claim(&*db.conn().await, &id)?;
    Ok(HttpResponse::Ok().json(claim))
}

pub fn list_claims(conn: &Connection, filter: &ClaimFilter) -> ApiResult<Vec<Claim>> {
    filter.range.validate()?;
    let mut sql = format!("SELECT {CLAIM_COLUMNS} FROM claims WHERE 1 = 1");
    let mut args: Vec<Box<dyn ToSql>> = Vec::new();
    if let Some(status) = &filter.status {
        let status: ClaimStatus = status.parse().map_err(ApiError::Validation)?;
        sql.push_str(" AND status = ?");
        args.push(Box::new(status.as_str()));
    }
    if let Some(hmo_id) = &filter.hmo_id {
        sql.push_str(" AND hmo_id = ?");
        args.push(Box::new(hmo_id.clone()));
    }
    filter.range.push_filter("service_date", &mut sql, &mut args);
    sql.push_str(" ORDER BY created_at DESC, rowid DESC");

    let mut stmt = conn.prepare(&sql)?;
    let claims = stmt
        .query_map(params_from_iter(args.iter()), map_claim)?
        .collect::<Result<Vec<_>, _>>()?;
    Ok(claims)
}

pub fn find_claim(conn: &Connection, id: &str) -> ApiResult<Option<Claim>> {
    let claim = conn
        .query_row(
            &format!("SELECT {CLAIM_COLUMNS} FROM claims WHERE id = ?1"),
            params![id],
            map_claim,
        )
        .optional()?;
    Ok(claim)
}

pub fn require_claim(conn: &Connection, id: &str) -> ApiResult<Claim> {
    find_claim(conn, id)?.ok_or_else(|| ApiError::not_found("Claim"))
}
