mod config;
mod db;
mod errors;
mod handlers;
mod models;
mod utils;
mod views;

use std::sync::Arc;

use actix_web::middleware::Logger;
use actix_web::{web, App, HttpServer};
use dotenv::dotenv;
use log::info;

use crate::config::Config;
use crate::db::{FileStore, PgFileStore};
use crate::handlers::upload::{UploadSettings, PERMITTED_EXTENSIONS};
use crate::views::Views;

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    dotenv().ok();
    env_logger::init();

    let config = Config::from_env().expect("Invalid configuration");

    // Initialize the database pool
    let pool = db::create_pool(&config.database_url)
        .await
        .expect("Failed to connect to the database");
    db::run_migrations(&pool)
        .await
        .expect("Failed to run database migrations");

    let store: Arc<dyn FileStore> = Arc::new(PgFileStore::new(pool));
    let views = web::Data::new(
        Views::new(PERMITTED_EXTENSIONS, config.file_size_limit).expect("Failed to load page templates"),
    );
    let settings = web::Data::new(UploadSettings {
        file_size_limit: config.file_size_limit,
    });

    info!(
        "Starting server at {} (file size limit: {} bytes)",
        config.bind_address, config.file_size_limit
    );

    HttpServer::new(move || {
        App::new()
            .wrap(Logger::default())
            .app_data(web::Data::from(store.clone()))
            .app_data(views.clone())
            .app_data(settings.clone())
            .configure(handlers::routes)
    })
    .bind(&config.bind_address)?
    .run()
    .await
}
