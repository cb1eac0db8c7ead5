use std::io;
use std::sync::Arc;

use actix_web::{middleware::Logger, App, HttpServer};
use log::{error, info};

mod config;
mod error;
mod models;
mod routes;
mod serde_utils;
mod store;

use config::Config;
use store::{MySqlStore, Store};

#[actix_web::main]
async fn main() -> io::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let config = match Config::from_env() {
        Ok(config) => config,
        Err(e) => {
            error!("Invalid configuration: {}", e);
            std::process::exit(1);
        }
    };

    let mysql = MySqlStore::connect(&config.database_url, config.max_connections)
        .await
        .map_err(|e| {
            error!("Failed to create pool: {}", e);
            io::Error::new(io::ErrorKind::Other, e)
        })?;

    if config.run_migrations {
        mysql.migrate().await.map_err(|e| {
            error!("Failed to run migrations: {}", e);
            io::Error::new(io::ErrorKind::Other, e)
        })?;
        info!("Database migrations are up to date");
    }

    let store: Arc<dyn Store> = Arc::new(mysql);

    info!("Server running at http://{}", config.server_address);
    HttpServer::new(move || {
        App::new()
            .wrap(Logger::default())
            .configure(routes::routes::app_configure(store.clone()))
    })
    .bind(&config.server_address)?
    .run()
    .await
}
