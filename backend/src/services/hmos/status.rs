use crate::db::activation::{set_active, ActiveTable};
use crate::db::Database;
use crate::error::{ApiError, ApiResult};
use crate::services::hmos::get::require_hmo;
use actix_web::{web, HttpResponse};
use common::model::hmo::Hmo;
use log::info;
use rusqlite::Connection;

/// `DELETE /api/hmos/{id}`
pub async fn deactivate(db: web::Data<Database>, id: web::Path<String>) -> Result<HttpResponse, ApiError> {
    let hmo = set_hmo_active(&*db.conn().await, &id, false)?;
    Ok(HttpResponse::Ok().json(hmo))
}

/// `PUT /api/hmos/{id}/reactivate`
pub async fn reactivate(db: web::Data<Database>, id: web::Path<String>) -> Result<HttpResponse, ApiError> {
    let hmo = set_hmo_active(&*db.conn().await, &id, true)?;
    Ok(HttpResponse::Ok().json(hmo))
}

pub fn set_hmo_active(conn: &Connection, id: &str, active: bool) -> ApiResult<Hmo> {
    if !set_active(conn, ActiveTable::Hmos, id, active)? {
        return Err(ApiError::not_found("HMO"));
    }
    info!("HMO {id} {}", if active { "reactivated" } else { "deactivated" });
    require_hmo(conn, id)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::open_memory_connection;
    use crate::services::hmos::get::list_hmos;
    use crate::services::hmos::save::create_hmo;
    use common::requests::hmo::NewHmo;

    #[test]
    fn soft_delete_hides_but_keeps_record() {
        let conn = open_memory_connection().unwrap();
        let hmo = create_hmo(
            &conn,
            NewHmo {
                name: "Leadway".into(),
                code: "LWH".into(),
                ..NewHmo::default()
            },
        )
        .unwrap();

        set_hmo_active(&conn, &hmo.id, false).unwrap();
        assert!(list_hmos(&conn, false).unwrap().is_empty());
        assert_eq!(list_hmos(&conn, true).unwrap().len(), 1);

        let restored = set_hmo_active(&conn, &hmo.id, true).unwrap();
        assert!(restored.is_active);
    }
}
