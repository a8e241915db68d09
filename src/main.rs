use actix_cors::Cors;
use actix_web::{middleware::Logger, web, App, HttpServer};
use env_logger::Env;
use log::info;
use std::io;

use nearbyspace_api::config::AppConfig;
use nearbyspace_api::routes;
use nearbyspace_api::state::AppState;

#[actix_web::main]
async fn main() -> io::Result<()> {
    if cfg!(debug_assertions) {
        dotenv::dotenv().ok();
    }

    env_logger::init_from_env(Env::default().default_filter_or("info"));
    info!("Application starting...");

    let config =
        AppConfig::from_env().map_err(|e| io::Error::new(io::ErrorKind::InvalidInput, e))?;
    let host = config.host.clone();
    let port = config.port;
    let jwt_secret = config.jwt_secret.clone();

    let state = AppState::connect(config)
        .await
        .map_err(|e| io::Error::new(io::ErrorKind::Other, e))?;
    let state = web::Data::new(state);

    info!("Starting HTTP server on {}:{}", host, port);

    HttpServer::new(move || {
        App::new()
            .wrap(
                Cors::default()
                    .allow_any_origin()
                    .allow_any_method()
                    .allow_any_header()
                    .max_age(3600),
            )
            .wrap(Logger::default())
            .app_data(state.clone())
            .route("/health", web::get().to(|| async { "OK" }))
            .configure(|cfg| routes::config(cfg, &jwt_secret))
    })
    .bind((host, port))?
    .run()
    .await
}
