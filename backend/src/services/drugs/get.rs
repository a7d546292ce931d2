use crate::db::Database;
use crate::error::{ApiError, ApiResult};
use actix_web::{web, HttpResponse};
use common::model::drug::Drug;
use rusqlite::{params, params_from_iter, Connection, OptionalExtension, Row, ToSql};
use serde::Deserialize;

pub(crate) const DRUG_COLUMNS: &str =
    "id, name, store, unit, quantity, unit_price, is_active, created_at, updated_at";

pub(crate) fn map_drug(row: &Row) -> rusqlite::Result<Drug> {
    Ok(Drug {
        id: row.get(0)?,
        name: row.get(1)?,
        store: row.get(2)?,
        unit: row.get(3)?,
        quantity: row.get(4)?,
        unit_price: row.get(5)?,
        is_active: row.get(6)?,
        created_at: row.get(7)?,
        updated_at: row.get(8)?,
    })
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DrugListQuery {
    pub store: Option<String>,
    #[serde(default)]
    pub include_inactive: bool,
}

/// `GET /api/drugs`
pub async fn list(db: web::Data<Database>, query: web::Query<DrugListQuery>) -> Result<HttpResponse, ApiError> {
    let drugs = list_drugs(&*db.conn().await, &query)?;
    Ok(HttpResponse::Ok().json(drugs))
}

/// `GET /api/drugs/{id}`
pub async fn process(db: web::Data<Database>, id: web::Path<String>) -> Result<HttpResponse, ApiError> {
    let drug = require_drug(&*db.conn().await, &id)?;
    Ok(HttpResponse::Ok().json(drug))
}

pub fn list_drugs(conn: &Connection, query: &DrugListQuery) -> ApiResult<Vec<Drug>> {
    let mut sql = format!("SELECT {DRUG_COLUMNS} FROM drugs WHERE 1 = 1");
    let mut args: Vec<Box<dyn ToSql>> = Vec::new();
    if !query.include_inactive {
        sql.push_str(" AND is_active = 1");
    }
    if let Some(store) = query.store.as_deref().map(str::trim).filter(|s| !s.is_empty()) {
        sql.push_str(" AND store = ?");
        args.push(Box::new(store.to_string()));
    }
    sql.push_str(" ORDER BY name, store");

    let mut stmt = conn.prepare(&sql)?;
    let drugs = stmt
        .query_map(params_from_iter(args.iter()), map_drug)?
        .collect::<Result<Vec<_>, _>>()?;
    Ok(drugs)
}

pub fn find_drug(conn: &Connection, id: &str) -> ApiResult<Option<Drug>> {
    let drug = conn
        .query_row(
            &format!("SELECT {DRUG_COLUMNS} FROM drugs WHERE id = ?1"),
            params![id],
            map_drug,
        )
        .optional()?;
    Ok(drug)
}

pub fn require_drug(conn: &Connection, id: &str) -> ApiResult<Drug> {
    find_drug(conn, id)?.ok_or_else(|| ApiError::not_found("Drug"))
}

/// The stock row for `name` in `store`, if that store holds the drug.
pub fn find_in_store(conn: &Connection, name: &str, store: &str) -> ApiResult<Option<Drug>> {
    let drug = conn
        .query_row(
            &format!("SELECT {DRUG_COLUMNS} FROM drugs WHERE name = ?1 AND store = ?2"),
            params![name, store],
            map_drug,
        )
        .optional()?;
    Ok(drug)
}
