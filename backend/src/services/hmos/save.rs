use crate::db::{new_id, Database};
use crate::error::{required, ApiError, ApiResult};
use crate::services::hmos::get::require_hmo;
use actix_web::{web, HttpResponse};
use chrono::Utc;
use common::model::hmo::Hmo;
use common::requests::hmo::{NewHmo, UpdateHmo};
use log::info;
use rusqlite::{params, Connection};

/// `POST /api/hmos`
pub async fn create(db: web::Data<Database>, payload: web::Json<NewHmo>) -> Result<HttpResponse, ApiError> {
    let hmo = create_hmo(&*db.conn().await, payload.into_inner())?;
    Ok(HttpResponse::Created().json(hmo))
}

/// `PUT /api/hmos/{id}`
pub async fn update(
    db: web::Data<Database>,
    id: web::Path<String>,
    payload: web::Json<UpdateHmo>,
) -> Result<HttpResponse, ApiError> {
    let hmo = update_hmo(&*db.conn().await, &id, payload.into_inner())?;
    Ok(HttpResponse::Ok().json(hmo))
}

fn normalize_code(code: &str) -> ApiResult<String> {
    Ok(required(code, "code")?.to_uppercase())
}

fn ensure_code_free(conn: &Connection, code: &str, own_id: &str) -> ApiResult<()> {
    let taken: bool = conn.query_row(
        "SELECT EXISTS(SELECT 1 FROM hmos WHERE code = ?1 AND id <> ?2)",
        params![code, own_id],
        |row| row.get(0),
    )?;
    if taken {
        return Err(ApiError::Conflict(format!("HMO code {code} already exists")));
    }
    Ok(())
}

fn optional_text(value: Option<String>) -> Option<String> {
    value.map(|v| v.trim().to_string()).filter(|v| !v.is_empty())
}

pub fn create_hmo(conn: &Connection, payload: NewHmo) -> ApiResult<Hmo> {
    let now = Utc::now();
    let hmo = Hmo {
        id: new_id(),
        name: required(&payload.name, "name")?,
        code: normalize_code(&payload.code)?,
        contact_person: optional_text(payload.contact_person),
        phone: optional_text(payload.phone),
        email: optional_text(payload.email),
        address: optional_text(payload.address),
        is_active: true,
        created_at: now,
        updated_at: now,
    };
    ensure_code_free(conn, &hmo.code, &hmo.id)?;

    conn.execute(
        "INSERT INTO hmos (id, name, code, contact_person, phone, email, address, is_active,
         created_at, updated_at)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10)",
        params![
            hmo.id,
            hmo.name,
            hmo.code,
            hmo.contact_person,
            hmo.phone,
            hmo.email,
            hmo.address,
            hmo.is_active,
            hmo.created_at,
            hmo.updated_at,
        ],
    )?;
    info!("HMO {} ({}) created", hmo.code, hmo.id);
    Ok(hmo)
}

pub fn update_hmo(conn: &Connection, id: &str, payload: UpdateHmo) -> ApiResult<Hmo> {
    let mut hmo = require_hmo(conn, id)?;
    if let Some(name) = payload.name {
        hmo.name = required(&name, "name")?;
    }
    if let Some(code) = payload.code {
        hmo.code = normalize_code(&code)?;
        ensure_code_free(conn, &hmo.code, &hmo.id)?;
    }
    if let Some(contact) = payload.contact_person {
        hmo.contact_person = optional_text(contact);
    }
    if let Some(phone) = payload.phone {
        hmo.phone = optional_text(phone);
    }
    if let Some(email) = payload.email {
        hmo.email = optional_text(email);
    }
    if let Some(address) = payload.address {
        hmo.address = optional_text(address);
    }
    hmo.updated_at = Utc::now();

    conn.execute(
        "UPDATE hmos SET name = ?2, code = ?3, contact_person = ?4, phone = ?5, email = ?6,
         address = ?7, updated_at = ?8
         WHERE id = ?1",
        params![
            hmo.id,
            hmo.name,
            hmo.code,
            hmo.contact_person,
            hmo.phone,
            hmo.email,
            hmo.address,
            hmo.updated_at,
        ],
    )?;
    info!("HMO {} updated", hmo.id);
    Ok(hmo)
}
