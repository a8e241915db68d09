mod common;

use actix_web::{test, web::Bytes};

use common::TestApp;
use nearbyspace_api::routes::health::HealthStatus;
use nearbyspace_api::routes::location::Suggestions;

#[actix_rt::test]
async fn test_liveness() {
    let test_app = TestApp::new().await;
    let app = test::init_service(test_app.create_app()).await;

    let req = test::TestRequest::get().uri("/health").to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), 200);
    assert_eq!(test::read_body(resp).await, Bytes::from_static(b"OK"));
}

#[actix_rt::test]
async fn test_health_check() {
    let test_app = TestApp::new().await;
    let app = test::init_service(test_app.create_app()).await;

    let req = test::TestRequest::get().uri("/api/health").to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), 200);

    let health: HealthStatus = test::read_body_json(resp).await;
    assert_eq!(health.status, "ok");
    assert_eq!(health.services["storage"].status, "ok");
    assert!(health.services.contains_key("geolocation"));
}

#[actix_rt::test]
async fn test_health_check_with_store_down() {
    let test_app = TestApp::offline().await;
    let app = test::init_service(test_app.create_app()).await;

    let req = test::TestRequest::get().uri("/api/health").to_request();
    let health: HealthStatus = test::call_and_read_body_json(&app, req).await;
    assert_eq!(health.status, "degraded");
    assert_eq!(health.services["storage"].status, "error");
}

#[actix_rt::test]
async fn test_location_suggestions() {
    let test_app = TestApp::new().await;
    let app = test::init_service(test_app.create_app()).await;

    let req = test::TestRequest::get()
        .uri("/api/locations/suggest?q=hyd")
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), 200);

    let body: Suggestions = test::read_body_json(resp).await;
    assert_eq!(
        body.suggestions,
        vec!["Hitech City, Hyderabad", "Banjara Hills, Hyderabad"]
    );
}

#[actix_rt::test]
async fn test_empty_suggestion_query() {
    let test_app = TestApp::new().await;
    let app = test::init_service(test_app.create_app()).await;

    for uri in ["/api/locations/suggest", "/api/locations/suggest?q=%20"] {
        let req = test::TestRequest::get().uri(uri).to_request();
        let body: Suggestions = test::call_and_read_body_json(&app, req).await;
        assert!(body.suggestions.is_empty());
    }
}
