use crate::db::activation::{set_active, ActiveTable};
use crate::db::Database;
use crate::error::{ApiError, ApiResult};
use crate::services::charges::get::find_charge;
use actix_web::{web, HttpResponse};
use common::model::charge::Charge;
use log::info;
use rusqlite::Connection;

/// `DELETE /api/charges/{id}`
pub async fn deactivate(db: web::Data<Database>, id: web::Path<String>) -> Result<HttpResponse, ApiError> {
    let charge = set_charge_active(&*db.conn().await, &id, false)?;
    Ok(HttpResponse::Ok().json(charge))
}

/// `PUT /api/charges/{id}/reactivate`
pub async fn reactivate(db: web::Data<Database>, id: web::Path<String>) -> Result<HttpResponse, ApiError> {
    let charge = set_charge_active(&*db.conn().await, &id, true)?;
    Ok(HttpResponse::Ok().json(charge))
}

pub fn set_charge_active(conn: &Connection, id: &str, active: bool) -> ApiResult<Charge> {
    if !set_active(conn, ActiveTable::Charges, id, active)? {
        return Err(ApiError::not_found("Charge"));
    }
    info!("charge {id} {}", if active { "reactivated" } else { "deactivated" });
    find_charge(conn, id)?.ok_or_else(|| ApiError::not_found("Charge"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::open_memory_connection;
    use crate::services::charges::get::list_charges;
    use crate::services::charges::save::create_charge;
    use common::requests::charge::NewCharge;

    #[test]
    fn deactivated_charges_drop_out_of_default_list() {
        let conn = open_memory_connection().unwrap();
        let bed = create_charge(
            &conn,
            NewCharge {
                name: "Bed".into(),
                category: "Ward".into(),
                amount: 12000.0,
            },
        )
        .unwrap();
        create_charge(
            &conn,
            NewCharge {
                name: "Card".into(),
                category: "Records".into(),
                amount: 1500.0,
            },
        )
        .unwrap();

        let deactivated = set_charge_active(&conn, &bed.id, false).unwrap();
        assert!(!deactivated.is_active);
        assert_eq!(list_charges(&conn, false).unwrap().len(), 1);
        assert_eq!(list_charges(&conn, true).unwrap().len(), 2);

        set_charge_active(&conn, &bed.id, true).unwrap();
        assert_eq!(list_charges(&conn, false).unwrap().len(), 2);
    }

    #[test]
    fn unknown_charge_is_not_found() {
        let conn = open_memory_connection().unwrap();
        assert!(matches!(
            set_charge_active(&conn, "missing", false),
            Err(ApiError::NotFound(_))
        ));
    }
}
