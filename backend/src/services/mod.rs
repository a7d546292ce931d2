//! HTTP services, one module per resource.
//!
//! Each resource exposes `configure_routes()` returning an actix `Scope`
//! rooted at `/api/<resource>`; handlers delegate to plain functions taking a
//! `&rusqlite::Connection` so the logic can be exercised without HTTP.

#[cfg(test)]
macro_rules! test_app {
    ($db:expr) => {
        actix_web::App::new()
            .app_data(actix_web::web::Data::new($db.clone()))
            .app_data(crate::services::json_config(1024 * 1024))
            .app_data(crate::services::query_config())
            .configure(crate::services::configure)
    };
}

pub mod banks;
pub mod charges;
pub mod claims;
pub mod disposals;
pub mod drugs;
pub mod hmos;
pub mod receipts;
pub mod settings;
pub mod transfers;
pub mod users;

use crate::error::ApiError;
use actix_web::web::{JsonConfig, QueryConfig, ServiceConfig};
use chrono::NaiveDate;
use serde::Deserialize;

/// Registers every resource scope.
pub fn configure(cfg: &mut ServiceConfig) {
    cfg.service(banks::configure_routes())
        .service(settings::configure_routes())
        .service(charges::configure_routes())
        .service(receipts::configure_routes())
        .service(hmos::configure_routes())
        .service(claims::configure_routes())
        .service(drugs::configure_routes())
        .service(transfers::configure_routes())
        .service(disposals::configure_routes())
        .service(users::configure_routes());
}

/// JSON extractor settings: body size limit and `{"message"}` errors for bad payloads.
pub fn json_config(limit: usize) -> JsonConfig {
    JsonConfig::default()
        .limit(limit)
        .error_handler(|err, _req| ApiError::Validation(format!("Invalid request body: {err}")).into())
}

pub fn query_config() -> QueryConfig {
    QueryConfig::default()
        .error_handler(|err, _req| ApiError::Validation(format!("Invalid query string: {err}")).into())
}

/// Inclusive calendar-day window used by list and statement filters.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct DateRange {
    pub from: Option<NaiveDate>,
    pub to: Option<NaiveDate>,
}

impl DateRange {
    pub fn validate(&self) -> Result<(), ApiError> {
        match (self.from, self.to) {
            (Some(from), Some(to)) if from > to => Err(ApiError::validation(
                "from must not be later than to",
            )),
            _ => Ok(()),
        }
    }

    /// Appends `AND` clauses on the date part of `column` and pushes their arguments.
    pub fn push_filter(
        &self,
        column: &str,
        sql: &mut String,
        args: &mut Vec<Box<dyn rusqlite::ToSql>>,
    ) {
        if let Some(from) = self.from {
            sql.push_str(&format!(" AND substr({column}, 1, 10) >= ?"));
            args.push(Box::new(from));
        }
        if let Some(to) = self.to {
            sql.push_str(&format!(" AND substr({column}, 1, 10) <= ?"));
            args.push(Box::new(to));
        }
    }
}
