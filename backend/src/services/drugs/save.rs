use crate::db::{new_id, Database};
use crate::error::{required, ApiError, ApiResult};
use crate::services::drugs::get::{find_in_store, require_drug};
use actix_web::{web, HttpResponse};
use chrono::Utc;
use common::model::drug::Drug;
use common::requests::drug::{NewDrug, UpdateDrug};
use log::info;
use rusqlite::{params, Connection};

/// `POST /api/drugs`
pub async fn create(db: web::Data<Database>, payload: web::Json<NewDrug>) -> Result<HttpResponse, ApiError> {
    let drug = create_drug(&*db.conn().await, payload.into_inner())?;
    Ok(HttpResponse::Created().json(drug))
}

/// `PUT /api/drugs/{id}`
pub async fn update(
    db: web::Data<Database>,
    id: web::Path<String>,
    payload: web::Json<UpdateDrug>,
) -> Result<HttpResponse, ApiError> {
    let drug = update_drug(&*db.conn().await, &id, payload.into_inner())?;
    Ok(HttpResponse::Ok().json(drug))
}

pub(crate) fn checked_stock(quantity: i64) -> ApiResult<i64> {
    if quantity < 0 {
        return Err(ApiError::validation("quantity must be zero or more"));
    }
    Ok(quantity)
}

fn checked_price(price: f64) -> ApiResult<f64> {
    if !price.is_finite() || price < 0.0 {
        return Err(ApiError::validation("unitPrice must be zero or more"));
    }
    Ok(price)
}

fn ensure_unique(conn: &Connection, name: &str, store: &str, except: Option<&str>) -> ApiResult<()> {
    match find_in_store(conn, name, store)? {
        Some(existing) if Some(existing.id.as_str()) != except => Err(ApiError::Conflict(format!(
            "{name} is already stocked in {store}"
        ))),
        _ => Ok(()),
    }
}

pub fn create_drug(conn: &Connection, payload: NewDrug) -> ApiResult<Drug> {
    let now = Utc::now();
    let drug = Drug {
        id: new_id(),
        name: required(&payload.name, "name")?,
        store: required(&payload.store, "store")?,
        unit: required(&payload.unit, "unit")?,
        quantity: checked_stock(payload.quantity)?,
        unit_price: checked_price(payload.unit_price)?,
        is_active: true,
        created_at: now,
        updated_at: now,
    };
    ensure_unique(conn, &drug.name, &drug.store, None)?;
    insert_drug(conn, &drug)?;
    info!("drug {} stocked in {}", drug.name, drug.store);
    Ok(drug)
}

pub(crate) fn insert_drug(conn: &Connection, drug: &Drug) -> ApiResult<()> {
    conn.execute(
        "INSERT INTO drugs (id, name, store, unit, quantity, unit_price, is_active, created_at, updated_at)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9)",
        params![
            drug.id,
            drug.name,
            drug.store,
            drug.unit,
            drug.quantity,
            drug.unit_price,
            drug.is_active,
            drug.created_at,
            drug.updated_at,
        ],
    )?;
    Ok(())
}

pub fn update_drug(conn: &Connection, id: &str, payload: UpdateDrug) -> ApiResult<Drug> {
    let mut drug = require_drug(conn, id)?;
    if let Some(name) = payload.name {
        let name = required(&name, "name")?;
        ensure_unique(conn, &name, &drug.store, Some(&drug.id))?;
        drug.name = name;
    }
    if let Some(unit) = payload.unit {
        drug.unit = required(&unit, "unit")?;
    }
    if let Some(quantity) = payload.quantity {
        drug.quantity = checked_stock(quantity)?;
    }
    if let Some(price) = payload.unit_price {
        drug.unit_price = checked_price(price)?;
    }
    if let Some(active) = payload.is_active {
        drug.is_active = active;
    }
    drug.updated_at = Utc::now();

    conn.execute(
        "UPDATE drugs SET name = ?2, unit = ?3, quantity = ?4, unit_price = ?5, is_active = ?6,
         updated_at = ?7 WHERE id = ?1",
        params![
            drug.id,
            drug.name,
            drug.unit,
            drug.quantity,
            drug.unit_price,
            drug.is_active,
            drug.updated_at,
        ],
    )?;
    info!("drug {} updated", drug.id);
    Ok(drug)
}

/// Adds `delta` (negative to debit) to a stock row, refusing to go below zero.
pub(crate) fn adjust_stock(conn: &Connection, drug: &Drug, delta: i64) -> ApiResult<i64> {
    let quantity = drug.quantity.checked_add(delta).ok_or_else(|| {
        ApiError::validation(format!(
            "Stock of {} in {} would exceed the largest recordable quantity",
            drug.name, drug.store
        ))
    })?;
    if quantity < 0 {
        return Err(ApiError::validation(format!(
            "Insufficient stock of {} in {}: {} available",
            drug.name, drug.store, drug.quantity
        )));
    }
    conn.execute(
        "UPDATE drugs SET quantity = ?2, updated_at = ?3 WHERE id = ?1",
        params![drug.id, quantity, Utc::now()],
    )?;
    Ok(quantity)
}
