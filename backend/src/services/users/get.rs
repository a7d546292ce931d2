use crate::db::{parse_column, Database};
use crate::error::{ApiError, ApiResult};
use actix_web::{web, HttpResponse};
use common::model::user::User;
use rusqlite::{params, Connection, OptionalExtension, Row};

pub(crate) const USER_COLUMNS: &str = "id, username, full_name, role, is_active, created_at, updated_at";

fn map_user(row: &Row) -> rusqlite::Result<User> {
    Ok(User {
        id: row.get(0)?,
        username: row.get(1)?,
        full_name: row.get(2)?,
        role: parse_column(3, row.get(3)?)?,
        is_active: row.get(4)?,
        created_at: row.get(5)?,
        updated_at: row.get(6)?,
    })
}

/// `GET /api/users`
pub async fn list(db: web::Data<Database>) -> Result<HttpResponse, ApiError> {
    let users = list_users(&*db.conn().await)?;
    Ok(HttpResponse::Ok().json(users))
}

/// `GET /api/users/{id}`
pub async fn process(db: web::Data<Database>, id: web::Path<String>) -> Result<HttpResponse, ApiError> {
    let user = require_user(&*db.conn().await, &id)?;
    Ok(HttpResponse::Ok().json(user))
}

pub fn list_users(conn: &Connection) -> ApiResult<Vec<User>> {
    let mut stmt = conn.prepare(&format!("SELECT {USER_COLUMNS} FROM users ORDER BY username"))?;
    let users = stmt.query_map([], map_user)?.collect::<Result<Vec<_>, _>>()?;
    Ok(users)
}

pub fn find_user_by_username(conn: &Connection, username: &str) -> ApiResult<Option<User>> {
    let user = conn
        .query_row(
            &format!("SELECT {USER_COLUMNS} FROM users WHERE username = ?1"),
            params![username],
            map_user,
        )
        .optional()?;
    Ok(user)
}

pub fn require_user(conn: &Connection, id: &str) -> ApiResult<User> {
    conn.query_row(
        &format!("SELECT {USER_COLUMNS} FROM users WHERE id = ?1"),
        params![id],
        map_user,
    )
    .optional()?
    .ok_or_else(|| ApiError::not_found("User"))
}
