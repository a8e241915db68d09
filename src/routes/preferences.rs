use actix_web::{web, HttpResponse, Responder};
use log::error;
use serde::{Deserialize, Serialize};

use crate::models::preferences::{SearchEntry, ThemeUpdate};
use crate::services::preferences_service::PreferenceError;
use crate::state::AppState;

#[derive(Serialize, Deserialize)]
pub struct RecentSearches {
    pub searches: Vec<String>,
}

fn preference_error_response(err: PreferenceError) -> HttpResponse {
    match err {
        PreferenceError::InvalidClient(_) => HttpResponse::BadRequest().body(err.to_string()),
        PreferenceError::Storage(_) => {
            error!("{}", err);
            HttpResponse::InternalServerError().body("Failed to access preferences.")
        }
    }
}

pub fn config(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/preferences/{client_id}")
            .route("/recent-searches", web::get().to(get_recent_searches))
            .route("/recent-searches", web::post().to(add_recent_search))
            .route("/theme", web::get().to(get_theme))
            .route("/theme", web::put().to(set_theme))
            .route("/theme/toggle", web::post().to(toggle_theme)),
    );
}

pub async fn get_recent_searches(
    path: web::Path<String>,
    state: web::Data<AppState>,
) -> impl Responder {
    match state.preferences.recent_searches(&path.into_inner()).await {
        Ok(searches) => HttpResponse::Ok().json(RecentSearches { searches }),
        Err(err) => preference_error_response(err),
    }
}

pub async fn add_recent_search(
    path: web::Path<String>,
    state: web::Data<AppState>,
    input: web::Json<SearchEntry>,
) -> impl Responder {
    match state
        .preferences
        .record_search(&path.into_inner(), &input.term)
        .await
    {
        Ok(searches) => HttpResponse::Ok().json(RecentSearches { searches }),
        Err(err) => preference_error_response(err),
    }
}

pub async fn get_theme(path: web::Path<String>, state: web::Data<AppState>) -> impl Responder {
    match state.preferences.theme(&path.into_inner()).await {
        Ok(theme) => HttpResponse::Ok().json(ThemeUpdate { theme }),
        Err(err) => preference_error_response(err),
    }
}

pub async fn set_theme(
    path: web::Path<String>,
    state: web::Data<AppState>,
    input: web::Json<ThemeUpdate>,
) -> impl Responder {
    match state
        .preferences
        .set_theme(&path.into_inner(), input.theme)
        .await
    {
        Ok(theme) => HttpResponse::Ok().json(ThemeUpdate { theme }),
        Err(err) => preference_error_response(err),
    }
}

pub async fn toggle_theme(path: web::Path<String>, state: web::Data<AppState>) -> impl Responder {
    let client_id = path.into_inner();
    let current = match state.preferences.theme(&client_id).await {
        Ok(theme) => theme,
        Err(err) => return preference_error_response(err),
    };
    match state.preferences.set_theme(&client_id, current.toggled()).await {
        Ok(theme) => HttpResponse::Ok().json(ThemeUpdate { theme }),
        Err(err) => preference_error_response(err),
    }
}
