use crate::db::single_default::{promote_default, DefaultTable};
use crate::db::Database;
use crate::error::{ApiError, ApiResult};
use crate::services::banks::get::{find_bank, find_default_bank};
use actix_web::{web, HttpResponse};
use chrono::Utc;
use common::model::bank::Bank;
use log::info;
use rusqlite::{params, Connection};

/// `GET /api/banks/default`
pub async fn current(db: web::Data<Database>) -> Result<HttpResponse, ApiError> {
    let bank = find_default_bank(&*db.conn().await)?
        .ok_or_else(|| ApiError::NotFound("No default bank configured".into()))?;
    Ok(HttpResponse::Ok().json(bank))
}

/// `PUT /api/banks/{id}/set-default`
pub async fn process(db: web::Data<Database>, id: web::Path<String>) -> Result<HttpResponse, ApiError> {
    let bank = set_default_bank(&*db.conn().await, &id)?;
    Ok(HttpResponse::Ok().json(bank))
}

/// Makes `id` the only default bank.
///
/// An unknown id fails with `NotFound` and leaves every existing flag as it was.
pub fn set_default_bank(conn: &Connection, id: &str) -> ApiResult<Bank> {
    let tx = conn.unchecked_transaction()?;
    if !promote_default(&tx, DefaultTable::Banks, id)? {
        return Err(ApiError::not_found("Bank"));
    }
    tx.execute(
        "UPDATE banks SET updated_at = ?2 WHERE id = ?1",
        params![id, Utc::now()],
    )?;
    tx.commit()?;

    info!("bank {id} marked default");
    find_bank(conn, id)?.ok_or_else(|| ApiError::not_found("Bank"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::open_memory_connection;
    use crate::db::single_default::count_defaults;
    use crate::services::banks::save::create_bank;
    use common::requests::bank::NewBank;

    fn seed(conn: &Connection, name: &str, is_default: bool) -> Bank {
        create_bank(
            conn,
            NewBank {
                bank_name: name.into(),
                account_name: "City Hospital".into(),
                account_number: "5566778899".into(),
                is_default: Some(is_default),
                ..NewBank::default()
            },
        )
        .unwrap()
    }

    #[test]
    fn every_call_leaves_exactly_one_default() {
        let conn = open_memory_connection().unwrap();
        let banks: Vec<Bank> = ["A", "B", "C"].iter().map(|n| seed(&conn, n, false)).collect();

        for bank in banks.iter().chain(banks.iter().rev()) {
            let promoted = set_default_bank(&conn, &bank.id).unwrap();
            assert!(promoted.is_default);
            assert_eq!(count_defaults(&conn, DefaultTable::Banks).unwrap(), 1);
            assert_eq!(find_default_bank(&conn).unwrap().unwrap().id, bank.id);
        }
    }

    #[test]
    fn unknown_id_keeps_current_default() {
        let conn = open_memory_connection().unwrap();
        let current = seed(&conn, "A", true);

        let err = set_default_bank(&conn, "missing").unwrap_err();
        assert!(matches!(err, ApiError::NotFound(_)));
        assert_eq!(find_default_bank(&conn).unwrap().unwrap().id, current.id);
    }
}
