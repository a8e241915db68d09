mod common;

use actix_web::test;
use serde_json::json;

use common::TestApp;
use nearbyspace_api::models::fallback::sample_reviews;
use nearbyspace_api::models::review::{ModerationStatus, Review};

#[actix_rt::test]
async fn test_unreachable_store_serves_sample_reviews() {
    let test_app = TestApp::offline().await;
    let app = test::init_service(test_app.create_app()).await;

    let req = test::TestRequest::get().uri("/api/reviews").to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), 200);

    let reviews: Vec<Review> = test::read_body_json(resp).await;
    assert_eq!(reviews, sample_reviews());
}

#[actix_rt::test]
async fn test_empty_store_has_no_reviews() {
    let test_app = TestApp::new().await;
    let app = test::init_service(test_app.create_app()).await;

    let req = test::TestRequest::get().uri("/api/reviews").to_request();
    let reviews: Vec<Review> = test::call_and_read_body_json(&app, req).await;
    assert!(reviews.is_empty());
}

#[actix_rt::test]
async fn test_submitted_review_waits_for_moderation() {
    let test_app = TestApp::new().await;
    let app = test::init_service(test_app.create_app()).await;

    let req = test::TestRequest::post()
        .uri("/api/reviews")
        .set_json(&json!({
            "name": "Meera Iyer",
            "role": "Designer",
            "text": "Quiet floor and good coffee.",
            "rating": 4,
            "status": "approved"
        }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), 201);

    let review: Review = test::read_body_json(resp).await;
    assert_eq!(review.status, ModerationStatus::Pending);
    assert_eq!(review.image, "https://picsum.photos/seed/Meera%20Iyer/150/150");
    assert_eq!(test_app.stored_reviews(), vec![review]);

    let req = test::TestRequest::get().uri("/api/reviews").to_request();
    let reviews: Vec<Review> = test::call_and_read_body_json(&app, req).await;
    assert!(reviews.is_empty());
}

#[actix_rt::test]
async fn test_review_validation() {
    let test_app = TestApp::new().await;
    let app = test::init_service(test_app.create_app()).await;

    let invalid = [
        json!({ "name": " ", "text": "Nice" }),
        json!({ "name": "Arun", "text": "" }),
        json!({ "name": "Arun", "text": "Nice", "rating": 0 }),
        json!({ "name": "Arun", "text": "Nice", "rating": 6 }),
        json!({ "text": "Nice" }),
    ];

    for body in invalid {
        let req = test::TestRequest::post()
            .uri("/api/reviews")
            .set_json(&body)
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), 400, "{}", body);
    }

    assert!(test_app.stored_reviews().is_empty());
}

#[actix_rt::test]
async fn test_submit_review_when_store_is_down() {
    let test_app = TestApp::new().await;
    let app = test::init_service(test_app.create_app()).await;
    test_app.set_offline(true);

    let req = test::TestRequest::post()
        .uri("/api/reviews")
        .set_json(&json!({ "name": "Arun", "text": "Nice" }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), 500);
    assert_eq!(test_app.state.reviews.all().await.len(), 0);
}
