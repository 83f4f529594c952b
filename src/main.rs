mod config;
mod db;
mod errors;
mod middleware;
mod models;
mod routes;
mod services;
mod state;
mod utils;

#[cfg(test)]
mod test_utils;

use actix_files::Files;
use actix_web::{App, HttpServer, middleware::Logger, web};
use std::sync::Arc;

use crate::config::Config;
use crate::services::mail_service;
use crate::state::AppState;

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    dotenv::dotenv().ok();

    let config = Config::from_env().map_err(std::io::Error::other)?;
    config::init_tracing(config.log_json);

    tracing::info!("connecting to database");
    let db = db::establish_connection(&config.database_url)
        .await
        .map_err(std::io::Error::other)?;

    if config.auto_migrate {
        db::sync_schema(&db).await.map_err(std::io::Error::other)?;
        tracing::info!("schema synchronised");
    }

    std::fs::create_dir_all(&config.uploads_dir)?;

    let mailer = mail_service::from_config(&config.mail).map_err(std::io::Error::other)?;
    let bind = (config.host.clone(), config.port);
    let uploads_dir = config.uploads_dir.clone();
    let state = web::Data::new(AppState::new(db, config, Arc::from(mailer)));

    tracing::info!(host = %bind.0, port = bind.1, "starting server");

    HttpServer::new(move || {
        App::new()
            .wrap(Logger::default())
            .app_data(state.clone())
            .service(Files::new("/uploads", uploads_dir.clone()))
            .configure(routes::configure_routes)
    })
    .bind(bind)?
    .run()
    .await
}
