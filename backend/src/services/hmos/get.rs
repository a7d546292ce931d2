use crate::db::Database;
use crate::error::{ApiError, ApiResult};
use actix_web::{web, HttpResponse};
use common::model::hmo::Hmo;
use rusqlite::{params, Connection, OptionalExtension, Row};
use serde::Deserialize;

pub(crate) const HMO_COLUMNS: &str =
    "id, name, code, contact_person, phone, email, address, is_active, created_at, updated_at";

pub(crate) fn map_hmo(row: &Row) -> rusqlite::Result<Hmo> {
    Ok(Hmo {
        id: row.get(0)?,
        name: row.get(1)?,
        code: row.get(2)?,
        contact_person: row.get(3)?,
        phone: row.get(4)?,
        email: row.get(5)?,
        address: row.get(6)?,
        is_active: row.get(7)?,
        created_at: row.get(8)?,
        updated_at: row.get(9)?,
    })
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HmoListQuery {
    #[serde(default)]
    pub include_inactive: bool,
}

/// `GET /api/hmos`
pub async fn list(db: web::Data<Database>, query: web::Query<HmoListQuery>) -> Result<HttpResponse, ApiError> {
    let hmos = list_hmos(&*db.conn().await, query.include_inactive)?;
    Ok(HttpResponse::Ok().json(hmos))
}

/// `GET /api/hmos/{id}`
pub async fn process(db: web::Data<Database>, id: web::Path<String>) -> Result<HttpResponse, ApiError> {
    let hmo = find_hmo(&*db.conn().await, &id)?.ok_or_else(|| ApiError::not_found("HMO"))?;
    Ok(HttpResponse::Ok().json(hmo))
}

pub fn list_hmos(conn: &Connection, include_inactive: bool) -> ApiResult<Vec<Hmo>> {
    let filter = if include_inactive { "" } else { "WHERE is_active = 1" };
    let mut stmt = conn.prepare(&format!("SELECT {HMO_COLUMNS} FROM hmos {filter} ORDER BY name"))?;
    let hmos = stmt.query_map([], map_hmo)?.collect::<Result<Vec<_>, _>>()?;
    Ok(hmos)
}

pub fn find_hmo(conn: &Connection, id: &str) -> ApiResult<Option<Hmo>> {
    let hmo = conn
        .query_row(
            &format!("SELECT {HMO_COLUMNS} FROM hmos WHERE id = ?1"),
            params![id],
            map_hmo,
        )
        .optional()?;
    Ok(hmo)
}

/// Looks up an HMO, failing with `NotFound` when it does not exist.
pub fn require_hmo(conn: &Connection, id: &str) -> ApiResult<Hmo> {
    find_hmo(conn, id)?.ok_or_else(|| ApiError::not_found("HMO"))
}
