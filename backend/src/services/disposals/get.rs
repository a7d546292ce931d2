use crate::db::Database;
use crate::error::{ApiError, ApiResult};
use actix_web::{web, HttpResponse};
use common::model::disposal::Disposal;
use rusqlite::{params_from_iter, Connection, Row, ToSql};
use serde::Deserialize;

fn map_disposal(row: &Row) -> rusqlite::Result<Disposal> {
    Ok(Disposal {
        id: row.get(0)?,
        drug_id: row.get(1)?,
        drug_name: row.get(2)?,
        store: row.get(3)?,
        quantity: row.get(4)?,
        reason: row.get(5)?,
        disposed_by: row.get(6)?,
        created_at: row.get(7)?,
    })
}

#[derive(Debug, Default, Deserialize)]
pub struct DisposalListQuery {
    pub store: Option<String>,
}

/// `GET /api/disposals`
pub async fn list(db: web::Data<Database>, query: web::Query<DisposalListQuery>) -> Result<HttpResponse, ApiError> {
    let disposals = list_disposals(&*db.conn().await, &query)?;
    Ok(HttpResponse::Ok().json(disposals))
}

pub fn list_disposals(conn: &Connection, query: &DisposalListQuery) -> ApiResult<Vec<Disposal>> {
    let mut sql = String::from(
        "SELECT id, drug_id, drug_name, store, quantity, reason, disposed_by, created_at FROM disposals",
    );
    let mut args: Vec<Box<dyn ToSql>> = Vec::new();
    if let Some(store) = query.store.as_deref().map(str::trim).filter(|s| !s.is_empty()) {
        sql.push_str(" WHERE store = ?");
        args.push(Box::new(store.to_string()));
    }
    sql.push_str(" ORDER BY created_at DESC, rowid DESC");

    let mut stmt = conn.prepare(&sql)?;
    let disposals = stmt
        .query_map(params_from_iter(args.iter()), map_disposal)?
        .collect::<Result<Vec<_>, _>>()?;
    Ok(disposals)
}
