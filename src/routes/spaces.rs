use actix_web::{web, HttpRequest, HttpResponse, Responder};
use log::{debug, error};
use serde::{Deserialize, Serialize};
use std::net::{IpAddr, SocketAddr};

use crate::models::coordinate::Coordinate;
use crate::models::space::{NewSpace, Space};
use crate::routes::store_error_response;
use crate::services::geolocation_service::{locate_observer, ReportedLocation};
use crate::services::ranking_service::{rank_by_proximity, LOCATION_ADVISORY};
use crate::services::search_service::filter_spaces;
use crate::state::AppState;

#[derive(Deserialize)]
pub struct SearchQuery {
    q: Option<String>,
}

#[derive(Deserialize)]
pub struct NearbyQuery {
    lat: Option<f64>,
    lng: Option<f64>,
    q: Option<String>,
}

#[derive(Serialize, Deserialize)]
pub struct NearbyResponse {
    pub spaces: Vec<Space>,
    pub observer: Option<Coordinate>,
    pub advisory: Option<String>,
}

#[derive(Serialize, Deserialize)]
pub struct SpaceDetails {
    pub space: Space,
    pub gallery: Vec<String>,
}

fn client_ip(req: &HttpRequest) -> Option<IpAddr> {
    let info = req.connection_info();
    let addr = info.realip_remote_addr()?;
    addr.parse::<IpAddr>()
        .ok()
        .or_else(|| addr.parse::<SocketAddr>().ok().map(|socket| socket.ip()))
}

/*
    /api/spaces
*/
pub async fn get_all(state: web::Data<AppState>, query: web::Query<SearchQuery>) -> impl Responder {
    let spaces = state.spaces.all().await;
    let term = query.q.as_deref().unwrap_or_default();
    HttpResponse::Ok().json(filter_spaces(spaces, term))
}

/*
    /api/spaces/nearby
*/
pub async fn get_nearby(
    req: HttpRequest,
    state: web::Data<AppState>,
    query: web::Query<NearbyQuery>,
) -> impl Responder {
    let reported = match ReportedLocation::from_query(query.lat, query.lng) {
        Ok(reported) => reported,
        Err(err) => return HttpResponse::BadRequest().body(err.to_string()),
    };
    let ip_lookup = state
        .locator
        .as_ref()
        .map(|locator| locator.for_peer(client_ip(&req)));

    let observer = match locate_observer(&reported, ip_lookup.as_ref()).await {
        Ok(observer) => Some(observer),
        Err(err) => {
            debug!("Showing unranked spaces: {}", err);
            None
        }
    };

    let ranked = rank_by_proximity(&state.spaces.all().await, observer);
    let term = query.q.as_deref().unwrap_or_default();

    HttpResponse::Ok().json(NearbyResponse {
        spaces: filter_spaces(ranked, term),
        observer,
        advisory: observer
            .is_none()
            .then(|| LOCATION_ADVISORY.to_string()),
    })
}

/*
    /api/spaces/{id}
*/
pub async fn get_by_id(path: web::Path<String>, state: web::Data<AppState>) -> impl Responder {
    match state.spaces.get(&path.into_inner()).await {
        Some(space) => {
            let gallery = space.gallery();
            HttpResponse::Ok().json(SpaceDetails { space, gallery })
        }
        None => HttpResponse::NotFound().body("Space not found"),
    }
}

pub async fn add(state: web::Data<AppState>, input: web::Json<NewSpace>) -> impl Responder {
    let submission = input.into_inner();
    if let Err(err) = submission.validate() {
        return HttpResponse::BadRequest().body(err.to_string());
    }

    match state.spaces.add(submission).await {
        Ok(space) => HttpResponse::Created().json(space),
        Err(err) => {
            error!("Failed to insert space: {}", err);
            store_error_response(&err, "Failed to list space. Please try again.")
        }
    }
}
