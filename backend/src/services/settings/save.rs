use crate::actor::Actor;
use crate::db::Database;
use crate::error::{required, ApiError, ApiResult};
use crate::services::settings::get::{load_settings, SETTINGS_KEY};
use actix_web::{web, HttpResponse};
use chrono::Utc;
use common::model::settings::Settings;
use common::patch::apply;
use common::requests::settings::UpdateSettings;
use log::info;
use regex::Regex;
use rusqlite::{params, Connection};
use std::sync::LazyLock;

static EMAIL_PATTERN: LazyLock<Result<Regex, regex::Error>> =
    LazyLock::new(|| Regex::new(r"^[^@\s]+@[^@\s]+\.[^@\s]+$"));

/// `PUT /api/settings`
pub async fn process(
    db: web::Data<Database>,
    actor: Actor,
    payload: web::Json<UpdateSettings>,
) -> Result<HttpResponse, ApiError> {
    let settings = update_settings(&*db.conn().await, payload.into_inner(), actor.id())?;
    Ok(HttpResponse::Ok().json(settings))
}

fn validate_email(email: &str) -> ApiResult<()> {
    if email.is_empty() {
        return Ok(());
    }
    let email_re = EMAIL_PATTERN
        .as_ref()
        .map_err(|e| ApiError::Internal(format!("Regex error: {e}")))?;
    if !email_re.is_match(email) {
        return Err(ApiError::validation("email is not a valid address"));
    }
    Ok(())
}

/// Applies the supplied fields to the singleton, creating it first if needed.
///
/// `actor` is recorded as `last_updated_by`; no history of prior values is kept.
pub fn update_settings(
    conn: &Connection,
    payload: UpdateSettings,
    actor: Option<&str>,
) -> ApiResult<Settings> {
    let tx = conn.unchecked_transaction()?;
    let mut settings = load_settings(&tx)?;

    if let Some(name) = payload.hospital_name {
        settings.hospital_name = required(&name, "hospitalName")?;
    }
    if let Some(logo) = payload.logo {
        settings.logo = logo.filter(|l| !l.trim().is_empty());
    }
    if let Some(email) = payload.email {
        let email = email.trim().to_string();
        validate_email(&email)?;
        settings.email = email;
    }
    apply(&mut settings.address, payload.address);
    apply(&mut settings.phone, payload.phone);
    apply(&mut settings.website, payload.website);
    apply(&mut settings.system_version, payload.system_version);
    apply(&mut settings.report_header, payload.report_header);
    apply(&mut settings.report_footer, payload.report_footer);
    apply(&mut settings.currency_symbol, payload.currency_symbol);
    settings.last_updated_by = actor.map(String::from);
    settings.updated_at = Utc::now();

    tx.execute(
        "UPDATE settings SET hospital_name = ?2, logo = ?3, address = ?4, phone = ?5, email = ?6,
         website = ?7, system_version = ?8, report_header = ?9, report_footer = ?10,
         currency_symbol = ?11, last_updated_by = ?12, updated_at = ?13
         WHERE id = ?1",
        params![
            SETTINGS_KEY,
            settings.hospital_name,
            settings.logo,
            settings.address,
            settings.phone,
            settings.email,
            settings.website,
            settings.system_version,
            settings.report_header,
            settings.report_footer,
            settings.currency_symbol,
            settings.last_updated_by,
            settings.updated_at,
        ],
    )?;
    tx.commit()?;

    info!("settings updated by {}", actor.unwrap_or("anonymous"));
    Ok(settings)
}
