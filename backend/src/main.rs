mod actor;
mod config;
mod db;
mod error;
mod services;

use crate::config::AppConfig;
use crate::db::Database;
use actix_web::{middleware, web, App, HttpServer};
use env_logger::Env;
use log::info;
use std::io;

#[actix_web::main]
async fn main() -> io::Result<()> {
    let config = AppConfig::load().map_err(|e| io::Error::other(format!("Invalid configuration: {e}")))?;
    env_logger::init_from_env(Env::default().default_filter_or(config.log.filter.as_str()));

    let db = Database::open(&config.database.path)
        .map_err(|e| io::Error::other(format!("Failed to open {}: {e}", config.database.path)))?;
    info!("Records stored in {}", config.database.path);

    let json_limit = config.server.json_limit;
    info!("Server running at http://{}", config.bind_address());

    HttpServer::new(move || {
        App::new()
            .wrap(middleware::Logger::default())
            .app_data(web::Data::new(db.clone()))
            .app_data(services::json_config(json_limit))
            .app_data(services::query_config())
            .configure(services::configure)
    })
    .bind(config.bind_address())?
    .run()
    .await
}
