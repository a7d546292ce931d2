//! Bank retrieval: the sorted list and single lookups shared by other services.

use crate::db::Database;
use crate::error::{ApiError, ApiResult};
use actix_web::{web, HttpResponse};
use common::model::bank::Bank;
use rusqlite::{params, Connection, OptionalExtension, Row};

pub(crate) const BANK_COLUMNS: &str = "id, bank_name, account_name, account_number, branch_name, \
     swift_code, is_active, is_default, created_at, updated_at";

pub(crate) fn map_bank(row: &Row) -> rusqlite::Result<Bank> {
    Ok(Bank {
        id: row.get(0)?,
        bank_name: row.get(1)?,
        account_name: row.get(2)?,
        account_number: row.get(3)?,
        branch_name: row.get(4)?,
        swift_code: row.get(5)?,
        is_active: row.get(6)?,
        is_default: row.get(7)?,
        created_at: row.get(8)?,
        updated_at: row.get(9)?,
    })
}

/// `GET /api/banks`
pub async fn list(db: web::Data<Database>) -> Result<HttpResponse, ApiError> {
    let banks = list_banks(&*db.conn().await)?;
    Ok(HttpResponse::Ok().json(banks))
}

/// `GET /api/banks/{id}`
pub async fn process(db: web::Data<Database>, id: web::Path<String>) -> Result<HttpResponse, ApiError> {
    let bank = find_bank(&*db.conn().await, &id)?.ok_or_else(|| ApiError::not_found("Bank"))?;
    Ok(HttpResponse::Ok().json(bank))
}

/// Every bank, the default one first, then newest first.
pub fn list_banks(conn: &Connection) -> ApiResult<Vec<Bank>> {
    let mut stmt = conn.prepare(&format!(
        "SELECT {BANK_COLUMNS} FROM banks ORDER BY is_default DESC, created_at DESC, rowid DESC"
    ))?;
    let banks = stmt
        .query_map([], map_bank)?
        .collect::<Result<Vec<_>, _>>()?;
    Ok(banks)
}

pub fn find_bank(conn: &Connection, id: &str) -> ApiResult<Option<Bank>> {
    let bank = conn
        .query_row(
            &format!("SELECT {BANK_COLUMNS} FROM banks WHERE id = ?1"),
            params![id],
            map_bank,
        )
        .optional()?;
    Ok(bank)
}

pub fn find_default_bank(conn: &Connection) -> ApiResult<Option<Bank>> {
    let bank = conn
        .query_row(
            &format!("SELECT {BANK_COLUMNS} FROM banks WHERE is_default = 1 LIMIT 1"),
            [],
            map_bank,
        )
        .optional()?;
    Ok(bank)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::open_memory_connection;
    use crate::services::banks::save::create_bank;
    use common::requests::bank::NewBank;

    fn new_bank(name: &str, is_default: bool) -> NewBank {
        NewBank {
            bank_name: name.into(),
            account_name: "City Hospital".into(),
            account_number: "2030405060".into(),
            is_default: Some(is_default),
            ..NewBank::default()
        }
    }

    #[test]
    fn list_puts_default_first_then_newest() {
        let conn = open_memory_connection().unwrap();
        create_bank(&conn, new_bank("First", true)).unwrap();
        create_bank(&conn, new_bank("Second", false)).unwrap();
        create_bank(&conn, new_bank("Third", false)).unwrap();

        let names: Vec<String> = list_banks(&conn)
            .unwrap()
            .into_iter()
            .map(|bank| bank.bank_name)
            .collect();
        assert_eq!(names, vec!["First", "Third", "Second"]);
    }

    #[test]
    fn find_returns_none_for_unknown_id() {
        let conn = open_memory_connection().unwrap();
        assert!(find_bank(&conn, "missing").unwrap().is_none());
        assert!(find_default_bank(&conn).unwrap().is_none());
    }
}
