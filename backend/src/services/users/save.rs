use crate::db::activation::{set_active, ActiveTable};
use crate::db::{new_id, Database};
use crate::error::{required, ApiError, ApiResult};
use crate::services::users::get::{find_user_by_username, require_user};
use actix_web::{web, HttpResponse};
use chrono::Utc;
use common::model::user::User;
use common::requests::user::{NewUser, UpdateUser};
use log::info;
use rusqlite::{params, Connection};

/// `POST /api/users`
pub async fn create(db: web::Data<Database>, payload: web::Json<NewUser>) -> Result<HttpResponse, ApiError> {
    let user = create_user(&*db.conn().await, payload.into_inner())?;
    Ok(HttpResponse::Created().json(user))
}

/// `PUT /api/users/{id}`
pub async fn update(
    db: web::Data<Database>,
    id: web::Path<String>,
    payload: web::Json<UpdateUser>,
) -> Result<HttpResponse, ApiError> {
    let user = update_user(&*db.conn().await, &id, payload.into_inner())?;
    Ok(HttpResponse::Ok().json(user))
}

/// `PUT /api/users/{id}/toggle-active`
pub async fn toggle_active(db: web::Data<Database>, id: web::Path<String>) -> Result<HttpResponse, ApiError> {
    let user = toggle_user_active(&*db.conn().await, &id)?;
    Ok(HttpResponse::Ok().json(user))
}

pub fn create_user(conn: &Connection, payload: NewUser) -> ApiResult<User> {
    let username = required(&payload.username, "username")?.to_lowercase();
    if username.chars().any(char::is_whitespace) {
        return Err(ApiError::validation("username must not contain spaces"));
    }
    if find_user_by_username(conn, &username)?.is_some() {
        return Err(ApiError::Conflict(format!("Username {username} is already taken")));
    }

    let now = Utc::now();
    let user = User {
        id: new_id(),
        username,
        full_name: required(&payload.full_name, "fullName")?,
        role: payload.role,
        is_active: true,
        created_at: now,
        updated_at: now,
    };
    conn.execute(
        "INSERT INTO users (id, username, full_name, role, is_active, created_at, updated_at)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)",
        params![
            user.id,
            user.username,
            user.full_name,
            user.role.as_str(),
            user.is_active,
            user.created_at,
            user.updated_at,
        ],
    )?;
    info!("user {} created as {}", user.username, user.role);
    Ok(user)
}

pub fn update_user(conn: &Connection, id: &str, payload: UpdateUser) -> ApiResult<User> {
    let mut user = require_user(conn, id)?;
    if let Some(full_name) = payload.full_name {
        user.full_name = required(&full_name, "fullName")?;
    }
    if let Some(role) = payload.role {
        user.role = role;
    }
    if let Some(active) = payload.is_active {
        user.is_active = active;
    }
    user.updated_at = Utc::now();

    conn.execute(
        "UPDATE users SET full_name = ?2, role = ?3, is_active = ?4, updated_at = ?5 WHERE id = ?1",
        params![
            user.id,
            user.full_name,
            user.role.as_str(),
            user.is_active,
            user.updated_at,
        ],
    )?;
    info!("user {} updated", user.username);
    Ok(user)
}

pub fn toggle_user_active(conn: &Connection, id: &str) -> ApiResult<User> {
    let user = require_user(conn, id)?;
    set_active(conn, ActiveTable::Users, id, !user.is_active)?;
    info!(
        "user {} {}",
        user.username,
        if user.is_active { "deactivated" } else { "activated" }
    );
    require_user(conn, id)
}
