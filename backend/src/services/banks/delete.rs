use crate::db::Database;
use crate::error::{ApiError, ApiResult};
use actix_web::{web, HttpResponse};
use log::info;
use rusqlite::{params, Connection};
use serde_json::json;

/// `DELETE /api/banks/{id}`
pub async fn process(db: web::Data<Database>, id: web::Path<String>) -> Result<HttpResponse, ApiError> {
    delete_bank(&*db.conn().await, &id)?;
    Ok(HttpResponse::Ok().json(json!({ "message": "Bank deleted successfully" })))
}

/// Removes the bank outright. No other bank is promoted if it was the default.
pub fn delete_bank(conn: &Connection, id: &str) -> ApiResult<()> {
    let removed = conn.execute("DELETE FROM banks WHERE id = ?1", params![id])?;
    if removed == 0 {
        return Err(ApiError::not_found("Bank"));
    }
    info!("bank {id} deleted");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::open_memory_connection;
    use crate::db::single_default::{count_defaults, DefaultTable};
    use crate::services::banks::get::list_banks;
    use crate::services::banks::save::create_bank;
    use common::requests::bank::NewBank;

    fn seed(conn: &Connection, name: &str, is_default: bool) -> String {
        create_bank(
            conn,
            NewBank {
                bank_name: name.into(),
                account_name: "City Hospital".into(),
                account_number: "9988776655".into(),
                is_default: Some(is_default),
                ..NewBank::default()
            },
        )
        .unwrap()
        .id
    }

    #[test]
    fn deleting_the_default_leaves_no_default() {
        let conn = open_memory_connection().unwrap();
        let default_id = seed(&conn, "A", true);
        seed(&conn, "B", false);

        delete_bank(&conn, &default_id).unwrap();
        assert_eq!(count_defaults(&conn, DefaultTable::Banks).unwrap(), 0);
        assert_eq!(list_banks(&conn).unwrap().len(), 1);
    }

    #[test]
    fn deleting_unknown_id_changes_nothing() {
        let conn = open_memory_connection().unwrap();
        seed(&conn, "A", false);

        let err = delete_bank(&conn, "missing").unwrap_err();
        assert!(matches!(err, ApiError::NotFound(_)));
        assert_eq!(list_banks(&conn).unwrap().len(), 1);
    }
}
