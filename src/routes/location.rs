use actix_web::{web, HttpResponse, Responder};
use serde::{Deserialize, Serialize};

use crate::services::search_service::suggest_locations;

#[derive(Deserialize)]
pub struct QueryParams {
    q: Option<String>,
}

#[derive(Serialize, Deserialize)]
pub struct Suggestions {
    pub suggestions: Vec<String>,
}

/*
    /api/locations/suggest
*/
pub async fn suggest(params: web::Query<QueryParams>) -> impl Responder {
    let term = params.q.as_deref().unwrap_or_default();
    let suggestions = suggest_locations(term)
        .into_iter()
        .map(str::to_string)
        .collect();
    HttpResponse::Ok().json(Suggestions { suggestions })
}
