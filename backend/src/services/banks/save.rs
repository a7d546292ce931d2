//! Bank creation and merge updates.
//!
//! Both paths apply the single-default rule inside one transaction when the
//! written bank ends up flagged default.

use crate::db::single_default::{clear_others, DefaultTable};
use crate::db::{new_id, Database};
use crate::error::{required, ApiError, ApiResult};
use crate::services::banks::get::find_bank;
use actix_web::{web, HttpResponse};
use chrono::Utc;
use common::model::bank::Bank;
use common::patch::apply;
use common::requests::bank::{NewBank, UpdateBank};
use log::info;
use regex::Regex;
use rusqlite::{params, Connection};
use std::sync::LazyLock;

static SWIFT_PATTERN: LazyLock<Result<Regex, regex::Error>> =
    LazyLock::new(|| Regex::new(r"^[A-Z]{6}[A-Z0-9]{2}([A-Z0-9]{3})?$"));

/// `POST /api/banks`
pub async fn create(db: web::Data<Database>, payload: web::Json<NewBank>) -> Result<HttpResponse, ApiError> {
    let bank = create_bank(&*db.conn().await, payload.into_inner())?;
    Ok(HttpResponse::Created().json(bank))
}

/// `PUT /api/banks/{id}`
pub async fn update(
    db: web::Data<Database>,
    id: web::Path<String>,
    payload: web::Json<UpdateBank>,
) -> Result<HttpResponse, ApiError> {
    let bank = update_bank(&*db.conn().await, &id, payload.into_inner())?;
    Ok(HttpResponse::Ok().json(bank))
}

/// Blank optional text is stored as NULL; SWIFT codes are upper-cased and checked.
fn normalize_swift(code: Option<String>) -> ApiResult<Option<String>> {
    let Some(code) = non_blank(code) else {
        return Ok(None);
    };
    let code = code.to_uppercase();
    let swift_re = SWIFT_PATTERN
        .as_ref()
        .map_err(|e| ApiError::Internal(format!("Regex error: {e}")))?;
    if !swift_re.is_match(&code) {
        return Err(ApiError::validation(
            "swiftCode must be 8 or 11 letters/digits (e.g. ZEIBNGLA)",
        ));
    }
    Ok(Some(code))
}

fn non_blank(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

pub fn create_bank(conn: &Connection, payload: NewBank) -> ApiResult<Bank> {
    let now = Utc::now();
    let bank = Bank {
        id: new_id(),
        bank_name: required(&payload.bank_name, "bankName")?,
        account_name: required(&payload.account_name, "accountName")?,
        account_number: required(&payload.account_number, "accountNumber")?,
        branch_name: non_blank(payload.branch_name),
        swift_code: normalize_swift(payload.swift_code)?,
        is_active: payload.is_active.unwrap_or(true),
        is_default: payload.is_default.unwrap_or(false),
        created_at: now,
        updated_at: now,
    };

    let tx = conn.unchecked_transaction()?;
    if bank.is_default {
        clear_others(&tx, DefaultTable::Banks, &bank.id)?;
    }
    tx.execute(
        "INSERT INTO banks (id, bank_name, account_name, account_number, branch_name, swift_code,
         is_active, is_default, created_at, updated_at)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10)",
        params![
            bank.id,
            bank.bank_name,
            bank.account_name,
            bank.account_number,
            bank.branch_name,
            bank.swift_code,
            bank.is_active,
            bank.is_default,
            bank.created_at,
            bank.updated_at,
        ],
    )?;
    tx.commit()?;

    info!("bank {} created (default: {})", bank.id, bank.is_default);
    Ok(bank)
}

pub fn update_bank(conn: &Connection, id: &str, payload: UpdateBank) -> ApiResult<Bank> {
    let mut bank = find_bank(conn, id)?.ok_or_else(|| ApiError::not_found("Bank"))?;

    if let Some(name) = payload.bank_name {
        bank.bank_name = required(&name, "bankName")?;
    }
    if let Some(name) = payload.account_name {
        bank.account_name = required(&name, "accountName")?;
    }
    if let Some(number) = payload.account_number {
        bank.account_number = required(&number, "accountNumber")?;
    }
    if let Some(branch) = payload.branch_name {
        bank.branch_name = non_blank(branch);
    }
    if let Some(swift) = payload.swift_code {
        bank.swift_code = normalize_swift(swift)?;
    }
    apply(&mut bank.is_active, payload.is_active);
    apply(&mut bank.is_default, payload.is_default);
    bank.updated_at = Utc::now();

    let tx = conn.unchecked_transaction()?;
    if bank.is_default {
        clear_others(&tx, DefaultTable::Banks, &bank.id)?;
    }
    tx.execute(
        "UPDATE banks SET bank_name = ?2, account_name = ?3, account_number = ?4, branch_name = ?5,
         swift_code = ?6, is_active = ?7, is_default = ?8, updated_at = ?9
         WHERE id = ?1",
        params![
            bank.id,
            bank.bank_name,
            bank.account_name,
            bank.account_number,
            bank.branch_name,
            bank.swift_code,
            bank.is_active,
            bank.is_default,
            bank.updated_at,
        ],
    )?;
    tx.commit()?;

    info!("bank {} updated", bank.id);
    Ok(bank)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::open_memory_connection;
    use crate::db::single_default::count_defaults;

    fn new_bank(name: &str) -> NewBank {
        NewBank {
            bank_name: name.into(),
            account_name: "City Hospital".into(),
            account_number: "0011223344".into(),
            ..NewBank::default()
        }
    }

    #[test]
    fn create_applies_defaults_and_trims() {
        let conn = open_memory_connection().unwrap();
        let bank = create_bank(
            &conn,
            NewBank {
                bank_name: "  Access ".into(),
                branch_name: Some("   ".into()),
                swift_code: Some("abngngla".into()),
                ..new_bank("")
            },
        )
        .unwrap();
        assert_eq!(bank.bank_name, "Access");
        assert!(bank.is_active);
        assert!(!bank.is_default);
        assert_eq!(bank.branch_name, None);
        assert_eq!(bank.swift_code.as_deref(), Some("ABNGNGLA"));
    }

    #[test]
    fn create_rejects_malformed_swift_code() {
        let conn = open_memory_connection().unwrap();
        let err = create_bank(
            &conn,
            NewBank {
                swift_code: Some("12".into()),
                ..new_bank("GTB")
            },
        )
        .unwrap_err();
        assert!(matches!(err, ApiError::Validation(_)));
    }

    #[test]
    fn creating_a_default_bank_unflags_the_previous_one() {
        let conn = open_memory_connection().unwrap();
        let first = create_bank(&conn, NewBank { is_default: Some(true), ..new_bank("One") }).unwrap();
        let second = create_bank(&conn, NewBank { is_default: Some(true), ..new_bank("Two") }).unwrap();

        assert_eq!(count_defaults(&conn, DefaultTable::Banks).unwrap(), 1);
        assert!(!find_bank(&conn, &first.id).unwrap().unwrap().is_default);
        assert!(find_bank(&conn, &second.id).unwrap().unwrap().is_default);
    }

    #[test]
    fn update_merges_only_supplied_fields() {
        let conn = open_memory_connection().unwrap();
        let bank = create_bank(
            &conn,
            NewBank {
                branch_name: Some("Ikeja".into()),
                ..new_bank("Union")
            },
        )
        .unwrap();

        let updated = update_bank(
            &conn,
            &bank.id,
            UpdateBank {
                is_active: Some(false),
                branch_name: Some(None),
                ..UpdateBank::default()
            },
        )
        .unwrap();

        assert_eq!(updated.bank_name, "Union");
        assert_eq!(updated.account_number, "0011223344");
        assert!(!updated.is_active);
        assert_eq!(updated.branch_name, None);
    }

    #[test]
    fn update_cannot_blank_a_required_field() {
        let conn = open_memory_connection().unwrap();
        let bank = create_bank(&conn, new_bank("Wema")).unwrap();
        let err = update_bank(
            &conn,
            &bank.id,
            UpdateBank {
                account_number: Some(" ".into()),
                ..UpdateBank::default()
            },
        )
        .unwrap_err();
        assert_eq!(err.to_string(), "accountNumber is required");
    }

    #[test]
    fn update_to_default_keeps_single_default() {
        let conn = open_memory_connection().unwrap();
        create_bank(&conn, NewBank { is_default: Some(true), ..new_bank("One") }).unwrap();
        let other = create_bank(&conn, new_bank("Two")).unwrap();

        update_bank(
            &conn,
            &other.id,
            UpdateBank {
                is_default: Some(true),
                ..UpdateBank::default()
            },
        )
        .unwrap();
        assert_eq!(count_defaults(&conn, DefaultTable::Banks).unwrap(), 1);
    }

    #[test]
    fn update_unknown_bank_is_not_found() {
        let conn = open_memory_connection().unwrap();
        let err = update_bank(&conn, "missing", UpdateBank::default()).unwrap_err();
        assert!(matches!(err, ApiError::NotFound(_)));
    }
}
