use actix_web::{web, HttpResponse, Responder};
use log::error;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use crate::state::AppState;

#[derive(Serialize, Deserialize)]
pub struct HealthStatus {
    pub status: String,
    pub services: HashMap<String, ServiceStatus>,
    pub version: String,
}

#[derive(Serialize, Deserialize, Clone)]
pub struct ServiceStatus {
    pub status: String,
    pub details: Option<String>,
}

/*
    /api/health
*/
pub async fn health_check(state: web::Data<AppState>) -> impl Responder {
    let mut health = HealthStatus {
        status: "ok".to_string(),
        services: HashMap::new(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    };

    let storage = match state.spaces.table().ping().await {
        Ok(_) => ServiceStatus {
            status: "ok".to_string(),
            details: Some(format!(
                "{} reachable, {} listings and {} reviews loaded",
                state.spaces.table().name(),
                state.spaces.len().await,
                state.reviews.all().await.len()
            )),
        },
        Err(e) => {
            error!("Storage health check failed: {}", e);
            ServiceStatus {
                status: "error".to_string(),
                details: Some(format!("Serving cached data: {}", e)),
            }
        }
    };
    health.services.insert("storage".to_string(), storage.clone());

    let geolocation = ServiceStatus {
        status: "ok".to_string(),
        details: Some(
            if state.locator.is_some() {
                "IP lookup enabled"
            } else {
                "Client-reported positions only"
            }
            .to_string(),
        ),
    };
    health.services.insert("geolocation".to_string(), geolocation);

    // A store outage still serves bundled data, so report it as degraded.
    if storage.status != "ok" {
        health.status = "degraded".to_string();
    }

    HttpResponse::Ok().json(health)
}
