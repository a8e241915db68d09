use actix_web::{web, HttpResponse, Responder};
use log::error;

use crate::models::review::NewReview;
use crate::routes::store_error_response;
use crate::state::AppState;

/*
    /api/reviews (approved only)
*/
pub async fn get_approved(state: web::Data<AppState>) -> impl Responder {
    HttpResponse::Ok().json(state.reviews.approved().await)
}

pub async fn add(state: web::Data<AppState>, input: web::Json<NewReview>) -> impl Responder {
    let submission = input.into_inner();
    if let Err(err) = submission.validate() {
        return HttpResponse::BadRequest().body(err.to_string());
    }

    match state.reviews.add(submission).await {
        Ok(review) => HttpResponse::Created().json(review),
        Err(err) => {
            error!("Failed to insert review: {}", err);
            store_error_response(&err, "Failed to submit review.")
        }
    }
}
