//! Lazy, race-free access to the settings singleton.
//!
//! The row is created with `INSERT OR IGNORE` on a fixed key, so concurrent
//! first reads cannot produce two records.

use crate::db::Database;
use crate::error::{ApiError, ApiResult};
use actix_web::{web, HttpResponse};
use chrono::Utc;
use common::model::settings::Settings;
use log::info;
use rusqlite::{params, Connection, Row};

pub(crate) const SETTINGS_KEY: &str = "system";

pub const DEFAULT_HOSPITAL_NAME: &str = "SUD EMR System";
pub const DEFAULT_SYSTEM_VERSION: &str = "1.0.0";
pub const DEFAULT_CURRENCY_SYMBOL: &str = "₦";

const SETTINGS_COLUMNS: &str = "hospital_name, logo, address, phone, email, website, \
     system_version, report_header, report_footer, currency_symbol, last_updated_by, \
     created_at, updated_at";

fn map_settings(row: &Row) -> rusqlite::Result<Settings> {
    Ok(Settings {
        hospital_name: row.get(0)?,
        logo: row.get(1)?,
        address: row.get(2)?,
        phone: row.get(3)?,
        email: row.get(4)?,
        website: row.get(5)?,
        system_version: row.get(6)?,
        report_header: row.get(7)?,
        report_footer: row.get(8)?,
        currency_symbol: row.get(9)?,
        last_updated_by: row.get(10)?,
        created_at: row.get(11)?,
        updated_at: row.get(12)?,
    })
}

/// `GET /api/settings`
pub async fn process(db: web::Data<Database>) -> Result<HttpResponse, ApiError> {
    let settings = load_settings(&*db.conn().await)?;
    Ok(HttpResponse::Ok().json(settings))
}

/// Inserts the default record unless one already exists.
pub fn ensure_settings(conn: &Connection) -> ApiResult<()> {
    let now = Utc::now();
    let inserted = conn.execute(
        "INSERT OR IGNORE INTO settings (id, hospital_name, logo, address, phone, email, website,
         system_version, report_header, report_footer, currency_symbol, last_updated_by,
         created_at, updated_at)
         VALUES (?1, ?2, NULL, '', '', '', '', ?3, '', '', ?4, NULL, ?5, ?5)",
        params![
            SETTINGS_KEY,
            DEFAULT_HOSPITAL_NAME,
            DEFAULT_SYSTEM_VERSION,
            DEFAULT_CURRENCY_SYMBOL,
            now,
        ],
    )?;
    if inserted > 0 {
        info!("settings initialised with defaults");
    }
    Ok(())
}

/// The settings record, created with defaults on first access.
pub fn load_settings(conn: &Connection) -> ApiResult<Settings> {
    ensure_settings(conn)?;
    let settings = conn.query_row(
        &format!("SELECT {SETTINGS_COLUMNS} FROM settings WHERE id = ?1"),
        params![SETTINGS_KEY],
        map_settings,
    )?;
    Ok(settings)
}
