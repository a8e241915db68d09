use actix_web::{web, HttpResponse};

use crate::db::table::StoreError;

pub mod admin;
pub mod health;
pub mod location;
pub mod preferences;
pub mod reviews;
pub mod spaces;

pub(crate) fn store_error_response(err: &StoreError, message: &str) -> HttpResponse {
    match err {
        StoreError::NotFound(_) => HttpResponse::NotFound().body(err.to_string()),
        _ => HttpResponse::InternalServerError().body(message.to_string()),
    }
}

/// Every route under `/api`, shared by the server and the test suites.
pub fn config(cfg: &mut web::ServiceConfig, jwt_secret: &str) {
    cfg.service(
        web::scope("/api")
            .route("/health", web::get().to(health::health_check))
            .service(
                web::scope("/spaces")
                    .route("", web::get().to(spaces::get_all))
                    .route("", web::post().to(spaces::add))
                    .route("/nearby", web::get().to(spaces::get_nearby))
                    .route("/{id}", web::get().to(spaces::get_by_id)),
            )
            .service(
                web::scope("/reviews")
                    .route("", web::get().to(reviews::get_approved))
                    .route("", web::post().to(reviews::add)),
            )
            .route("/locations/suggest", web::get().to(location::suggest))
            .configure(preferences::config)
            .configure(|cfg| admin::config(cfg, jwt_secret)),
    );
}
