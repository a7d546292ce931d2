use crate::db::Database;
use crate::error::{ApiError, ApiResult};
use actix_web::{web, HttpResponse};
use common::model::charge::Charge;
use rusqlite::{params, Connection, OptionalExtension, Row};
use serde::Deserialize;

pub(crate) const CHARGE_COLUMNS: &str = "id, name, category, amount, is_active, created_at, updated_at";

pub(crate) fn map_charge(row: &Row) -> rusqlite::Result<Charge> {
    Ok(Charge {
        id: row.get(0)?,
        name: row.get(1)?,
        category: row.get(2)?,
        amount: row.get(3)?,
        is_active: row.get(4)?,
        created_at: row.get(5)?,
        updated_at: row.get(6)?,
    })
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChargeListQuery {
    #[serde(default)]
    pub include_inactive: bool,
}

/// `GET /api/charges`
pub async fn list(
    db: web::Data<Database>,
    query: web::Query<ChargeListQuery>,
) -> Result<HttpResponse, ApiError> {
    let charges = list_charges(&*db.conn().await, query.include_inactive)?;
    Ok(HttpResponse::Ok().json(charges))
}

/// `GET /api/charges/{id}`
pub async fn process(db: web::Data<Database>, id: web::Path<String>) -> Result<HttpResponse, ApiError> {
    let charge = find_charge(&*db.conn().await, &id)?.ok_or_else(|| ApiError::not_found("Charge"))?;
    Ok(HttpResponse::Ok().json(charge))
}

pub fn list_charges(conn: &Connection, include_inactive: bool) -> ApiResult<Vec<Charge>> {
    let filter = if include_inactive { "" } else { "WHERE is_active = 1" };
    let mut stmt = conn.prepare(&format!(
        "SELECT {CHARGE_COLUMNS} FROM charges {filter} ORDER BY category, name"
    ))?;
    let charges = stmt
        .query_map([], map_charge)?
        .collect::<Result<Vec<_>, _>>()?;
    Ok(charges)
}

pub fn find_charge(conn: &Connection, id: &str) -> ApiResult<Option<Charge>> {
    let charge = conn
        .query_row(
            &format!("SELECT {CHARGE_COLUMNS} FROM charges WHERE id = ?1"),
            params![id],
            map_charge,
        )
        .optional()?;
    Ok(charge)
}
