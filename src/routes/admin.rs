use actix_web::{web, HttpResponse, Responder};
use log::{error, info, warn};
use serde::{Deserialize, Serialize};

use crate::middleware::auth::AuthMiddleware;
use crate::middleware::auth_context::Moderator;
use crate::models::review::Review;
use crate::routes::store_error_response;
use crate::services::auth_service::{generate_token, key_matches, Role};
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct SessionRequest {
    pub name: Option<String>,
    pub key: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct TokenResponse {
    pub auth_token: String,
}

#[derive(Serialize, Deserialize)]
pub struct ModerationQueue {
    pub pending: Vec<Review>,
    pub history: Vec<Review>,
    pub pending_count: usize,
}

pub fn config(cfg: &mut web::ServiceConfig, jwt_secret: &str) {
    cfg.service(
        web::scope("/admin")
            .route("/session", web::post().to(create_session))
            .service(
                web::scope("/reviews")
                    .wrap(AuthMiddleware::new(jwt_secret))
                    .route("", web::get().to(get_queue))
                    .route("/{id}/approve", web::put().to(approve))
                    .route("/{id}/reject", web::put().to(reject)),
            ),
    );
}

/*
    /api/admin/session
*/
pub async fn create_session(
    state: web::Data<AppState>,
    input: web::Json<SessionRequest>,
) -> impl Responder {
    let expected = match &state.config.moderator_key {
        Some(key) => key,
        None => return HttpResponse::ServiceUnavailable().body("Moderation is not configured"),
    };
    if !key_matches(&input.key, expected) {
        warn!("Rejected moderator login attempt");
        return HttpResponse::Unauthorized().body("Invalid moderator key");
    }

    let name = input
        .name
        .as_deref()
        .map(str::trim)
        .filter(|name| !name.is_empty())
        .unwrap_or("moderator");

    match generate_token(
        name,
        Role::Moderator,
        &state.config.jwt_secret,
        state.config.token_ttl_hours,
    ) {
        Ok(token) => HttpResponse::Ok().json(TokenResponse { auth_token: token }),
        Err(err) => {
            error!("Token generation failed: {:?}", err);
            HttpResponse::InternalServerError().body("Token generation failed")
        }
    }
}

/*
    /api/admin/reviews
*/
pub async fn get_queue(_moderator: Moderator, state: web::Data<AppState>) -> impl Responder {
    let pending = state.reviews.pending().await;
    HttpResponse::Ok().json(ModerationQueue {
        pending_count: pending.len(),
        pending,
        history: state.reviews.history().await,
    })
}

pub async fn approve(
    moderator: Moderator,
    path: web::Path<String>,
    state: web::Data<AppState>,
) -> impl Responder {
    let id = path.into_inner();
    match state.reviews.approve(&id).await {
        Ok(review) => {
            info!("{} approved review {}", moderator.name, id);
            HttpResponse::Ok().json(review)
        }
        Err(err) => store_error_response(&err, "Failed to approve review."),
    }
}

pub async fn reject(
    moderator: Moderator,
    path: web::Path<String>,
    state: web::Data<AppState>,
) -> impl Responder {
    let id = path.into_inner();
    match state.reviews.reject(&id).await {
        Ok(review) => {
            info!("{} rejected review {}", moderator.name, id);
            HttpResponse::Ok().json(review)
        }
        Err(err) => store_error_response(&err, "Failed to reject review."),
    }
}
