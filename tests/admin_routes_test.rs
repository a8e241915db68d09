mod common;

use actix_web::{http::header, test};
use serde_json::json;

use common::{moderator_token, TestApp, TEST_MODERATOR_KEY, TEST_SECRET};
use nearbyspace_api::config::AppConfig;
use nearbyspace_api::db::memory::MemoryTable;
use nearbyspace_api::models::review::{ModerationStatus, Review};
use nearbyspace_api::routes::admin::{ModerationQueue, TokenResponse};
use nearbyspace_api::services::auth_service::{generate_token, Role};

fn review_submission(name: &str) -> test::TestRequest {
    test::TestRequest::post()
        .uri("/api/reviews")
        .set_json(&json!({ "name": name, "role": "Freelancer", "text": "Great place", "rating": 5 }))
}

#[actix_rt::test]
async fn test_session_with_moderator_key() {
    let test_app = TestApp::new().await;
    let app = test::init_service(test_app.create_app()).await;

    let req = test::TestRequest::post()
        .uri("/api/admin/session")
        .set_json(&json!({ "name": "Priya", "key": TEST_MODERATOR_KEY }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), 200);

    let body: TokenResponse = test::read_body_json(resp).await;
    let req = test::TestRequest::get()
        .uri("/api/admin/reviews")
        .insert_header((header::AUTHORIZATION, format!("Bearer {}", body.auth_token)))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), 200);
}

#[actix_rt::test]
async fn test_session_with_wrong_key() {
    let test_app = TestApp::new().await;
    let app = test::init_service(test_app.create_app()).await;

    for key in ["wrong-key", ""] {
        let req = test::TestRequest::post()
            .uri("/api/admin/session")
            .set_json(&json!({ "key": key }))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), 401);
    }
}

#[actix_rt::test]
async fn test_session_without_configured_key() {
    let config = AppConfig::local(TEST_SECRET, None);
    let test_app =
        TestApp::with_config(config, MemoryTable::default(), MemoryTable::default()).await;
    let app = test::init_service(test_app.create_app()).await;

    let req = test::TestRequest::post()
        .uri("/api/admin/session")
        .set_json(&json!({ "key": TEST_MODERATOR_KEY }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), 503);
}

#[actix_rt::test]
async fn test_queue_without_auth() {
    let test_app = TestApp::new().await;
    let app = test::init_service(test_app.create_app()).await;

    let req = test::TestRequest::get().uri("/api/admin/reviews").to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), 401);

    let req = test::TestRequest::put()
        .uri("/api/admin/reviews/r1/approve")
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), 401);
}

#[actix_rt::test]
async fn test_queue_with_invalid_token() {
    let test_app = TestApp::new().await;
    let app = test::init_service(test_app.create_app()).await;

    let forged = generate_token("intruder", Role::Moderator, "some-other-secret", 1).unwrap();

    for token in ["Bearer not-a-jwt".to_string(), format!("Bearer {}", forged), forged] {
        let req = test::TestRequest::get()
            .uri("/api/admin/reviews")
            .insert_header((header::AUTHORIZATION, token))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), 401);
    }
}

#[actix_rt::test]
async fn test_moderation_flow() {
    let test_app = TestApp::new().await;
    let app = test::init_service(test_app.create_app()).await;

    let first: Review =
        test::call_and_read_body_json(&app, review_submission("Arun").to_request()).await;
    let second: Review =
        test::call_and_read_body_json(&app, review_submission("Divya").to_request()).await;

    let req = test::TestRequest::get()
        .uri("/api/admin/reviews")
        .insert_header((header::AUTHORIZATION, moderator_token()))
        .to_request();
    let queue: ModerationQueue = test::call_and_read_body_json(&app, req).await;
    assert_eq!(queue.pending_count, 2);
    assert_eq!(queue.pending[0].id, second.id);
    assert!(queue.history.is_empty());

    let req = test::TestRequest::put()
        .uri(&format!("/api/admin/reviews/{}/approve", first.id))
        .insert_header((header::AUTHORIZATION, moderator_token()))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), 200);
    let approved: Review = test::read_body_json(resp).await;
    assert_eq!(approved.status, ModerationStatus::Approved);

    let req = test::TestRequest::put()
        .uri(&format!("/api/admin/reviews/{}/reject", second.id))
        .insert_header((header::AUTHORIZATION, moderator_token()))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), 200);

    let req = test::TestRequest::get().uri("/api/reviews").to_request();
    let public: Vec<Review> = test::call_and_read_body_json(&app, req).await;
    assert_eq!(public.len(), 1);
    assert_eq!(public[0].id, first.id);

    let req = test::TestRequest::get()
        .uri("/api/admin/reviews")
        .insert_header((header::AUTHORIZATION, moderator_token()))
        .to_request();
    let queue: ModerationQueue = test::call_and_read_body_json(&app, req).await;
    assert_eq!(queue.pending_count, 0);
    assert_eq!(queue.history.len(), 2);

    let stored = test_app.stored_reviews();
    assert!(stored
        .iter()
        .any(|r| r.id == second.id && r.status == ModerationStatus::Rejected));
}

#[actix_rt::test]
async fn test_moderation_last_writer_wins() {
    let test_app = TestApp::new().await;
    let app = test::init_service(test_app.create_app()).await;
    let review: Review =
        test::call_and_read_body_json(&app, review_submission("Arun").to_request()).await;

    for (action, expected) in [
        ("approve", ModerationStatus::Approved),
        ("approve", ModerationStatus::Approved),
        ("reject", ModerationStatus::Rejected),
    ] {
        let req = test::TestRequest::put()
            .uri(&format!("/api/admin/reviews/{}/{}", review.id, action))
            .insert_header((header::AUTHORIZATION, moderator_token()))
            .to_request();
        let updated: Review = test::call_and_read_body_json(&app, req).await;
        assert_eq!(updated.status, expected);
    }

    let req = test::TestRequest::get().uri("/api/reviews").to_request();
    let public: Vec<Review> = test::call_and_read_body_json(&app, req).await;
    assert!(public.is_empty());
}

#[actix_rt::test]
async fn test_moderate_unknown_review() {
    let test_app = TestApp::new().await;
    let app = test::init_service(test_app.create_app()).await;

    let req = test::TestRequest::put()
        .uri("/api/admin/reviews/missing/approve")
        .insert_header((header::AUTHORIZATION, moderator_token()))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), 404);
}

#[actix_rt::test]
async fn test_moderation_when_store_is_down() {
    let test_app = TestApp::new().await;
    let app = test::init_service(test_app.create_app()).await;
    let review: Review =
        test::call_and_read_body_json(&app, review_submission("Arun").to_request()).await;
    test_app.set_offline(true);

    let req = test::TestRequest::put()
        .uri(&format!("/api/admin/reviews/{}/approve", review.id))
        .insert_header((header::AUTHORIZATION, moderator_token()))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), 500);

    assert_eq!(test_app.state.reviews.pending_count().await, 1);
    assert_eq!(test_app.stored_reviews()[0].status, ModerationStatus::Pending);
}
