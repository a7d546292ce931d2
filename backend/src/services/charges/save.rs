use crate::db::{new_id, Database};
use crate::error::{required, ApiError, ApiResult};
use crate::services::charges::get::find_charge;
use actix_web::{web, HttpResponse};
use chrono::Utc;
use common::model::charge::Charge;
use common::requests::charge::{NewCharge, UpdateCharge};
use log::info;
use rusqlite::{params, Connection};

/// `POST /api/charges`
pub async fn create(db: web::Data<Database>, payload: web::Json<NewCharge>) -> Result<HttpResponse, ApiError> {
    let charge = create_charge(&*db.conn().await, payload.into_inner())?;
    Ok(HttpResponse::Created().json(charge))
}

/// `PUT /api/charges/{id}`
pub async fn update(
    db: web::Data<Database>,
    id: web::Path<String>,
    payload: web::Json<UpdateCharge>,
) -> Result<HttpResponse, ApiError> {
    let charge = update_charge(&*db.conn().await, &id, payload.into_inner())?;
    Ok(HttpResponse::Ok().json(charge))
}

fn checked_amount(amount: f64) -> ApiResult<f64> {
    if !amount.is_finite() || amount < 0.0 {
        return Err(ApiError::validation("amount must be zero or more"));
    }
    Ok(amount)
}

pub fn create_charge(conn: &Connection, payload: NewCharge) -> ApiResult<Charge> {
    let now = Utc::now();
    let charge = Charge {
        id: new_id(),
        name: required(&payload.name, "name")?,
        category: required(&payload.category, "category")?,
        amount: checked_amount(payload.amount)?,
        is_active: true,
        created_at: now,
        updated_at: now,
    };
    conn.execute(
        "INSERT INTO charges (id, name, category, amount, is_active, created_at, updated_at)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)",
        params![
            charge.id,
            charge.name,
            charge.category,
            charge.amount,
            charge.is_active,
            charge.created_at,
            charge.updated_at,
        ],
    )?;
    info!("charge {} created", charge.id);
    Ok(charge)
}

pub fn update_charge(conn: &Connection, id: &str, payload: UpdateCharge) -> ApiResult<Charge> {
    let mut charge = find_charge(conn, id)?.ok_or_else(|| ApiError::not_found("Charge"))?;
    if let Some(name) = payload.name {
        charge.name = required(&name, "name")?;
    }
    if let Some(category) = payload.category {
        charge.category = required(&category, "category")?;
    }
    if let Some(amount) = payload.amount {
        charge.amount = checked_amount(amount)?;
    }
    charge.updated_at = Utc::now();

    conn.execute(
        "UPDATE charges SET name = ?2, category = ?3, amount = ?4, updated_at = ?5 WHERE id = ?1",
        params![
            charge.id,
            charge.name,
            charge.category,
            charge.amount,
            charge.updated_at,
        ],
    )?;
    info!("charge {} updated", charge.id);
    Ok(charge)
}
