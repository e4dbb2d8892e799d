mod common;

use actix_web::test;
use serde_json::json;
use serial_test::serial;

use common::TestApp;

#[actix_rt::test]
async fn test_planner_index_lists_endpoints() {
    let test_app = TestApp::new();
    let app = test::init_service(test_app.create_app()).await;

    let req = test::TestRequest::get()
        .uri("/api/v1/itinera/planner/")
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert!(resp.status().is_success());

    let body: serde_json::Value = test::read_body_json(resp).await;
    assert!(body["endpoints"]["itinerary"].is_string());
    assert!(body["endpoints"]["food"].is_string());
}

#[actix_rt::test]
async fn test_plan_crud() {
    let test_app = TestApp::new();
    let app = test::init_service(test_app.create_app()).await;

    let req = test::TestRequest::post()
        .uri("/api/v1/itinera/planner/plans")
        .set_json(&json!({
            "destination": "Jaipur",
            "duration": 3,
            "budget": 20000.0,
            "interests": ["food"]
        }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert!(resp.status().is_success());
    let body: serde_json::Value = test::read_body_json(resp).await;
    assert_eq!(body["plan"]["id"], "plan_1");
    assert_eq!(body["plan"]["status"], "created");

    let req = test::TestRequest::get()
        .uri("/api/v1/itinera/planner/plans/plan_1")
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert!(resp.status().is_success());
    let body: serde_json::Value = test::read_body_json(resp).await;
    assert_eq!(body["destination"], "Jaipur");

    let req = test::TestRequest::get()
        .uri("/api/v1/itinera/planner/plans/plan_99")
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), 404);
}

#[actix_rt::test]
async fn test_popular_destinations() {
    let test_app = TestApp::new();
    let app = test::init_service(test_app.create_app()).await;

    let req = test::TestRequest::get()
        .uri("/api/v1/itinera/planner/destinations")
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert!(resp.status().is_success());

    let body: serde_json::Value = test::read_body_json(resp).await;
    assert!(!body["destinations"].as_array().unwrap().is_empty());
}

#[actix_rt::test]
async fn test_itinerary_rejects_zero_days_before_any_external_call() {
    let test_app = TestApp::new();
    let app = test::init_service(test_app.create_app()).await;

    let req = test::TestRequest::post()
        .uri("/api/v1/itinera/planner/itinerary")
        .set_json(&json!({
            "home_city": "Delhi",
            "destination_city": "Jaipur",
            "num_days": 0
        }))
        .to_request();

    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), 400);

    let body: serde_json::Value = test::read_body_json(resp).await;
    assert!(body["detail"].as_str().unwrap().contains("num_days"));
}

#[actix_rt::test]
async fn test_itinerary_rejects_fifteen_days() {
    let test_app = TestApp::new();
    let app = test::init_service(test_app.create_app()).await;

    let req = test::TestRequest::post()
        .uri("/api/v1/itinera/planner/itinerary")
        .set_json(&json!({
            "home_city": "Delhi",
            "destination_city": "Jaipur",
            "num_days": 15
        }))
        .to_request();

    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), 400);
}

#[actix_rt::test]
async fn test_place_cards_reject_out_of_range_max_places() {
    let test_app = TestApp::new();
    let app = test::init_service(test_app.create_app()).await;

    let req = test::TestRequest::post()
        .uri("/api/v1/itinera/planner/itinerary/places")
        .set_json(&json!({
            "destination_city": "Jaipur",
            "max_places": 31
        }))
        .to_request();

    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), 400);
}

#[actix_rt::test]
#[serial]
async fn test_itinerary_without_api_key_is_500_not_panic() {
    // Missing credentials are fatal for the component, surfaced as a
    // generic 500 at the routing boundary.
    std::env::remove_var("GEMINI_API_KEY");

    let test_app = TestApp::new();
    let app = test::init_service(test_app.create_app()).await;

    let req = test::TestRequest::post()
        .uri("/api/v1/itinera/planner/itinerary")
        .set_json(&json!({
            "home_city": "Delhi",
            "destination_city": "Jaipur",
            "num_days": 2,
            "interests": ["food"]
        }))
        .to_request();

    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), 500);

    let body: serde_json::Value = test::read_body_json(resp).await;
    assert!(body["detail"].as_str().unwrap().contains("GEMINI_API_KEY"));
}

#[actix_rt::test]
#[serial]
async fn test_food_without_api_key_is_500_not_panic() {
    std::env::remove_var("PERPLEXITY_API_KEY");

    let test_app = TestApp::new();
    let app = test::init_service(test_app.create_app()).await;

    let req = test::TestRequest::post()
        .uri("/api/v1/itinera/planner/food")
        .set_json(&json!({"city": "Jaipur"}))
        .to_request();

    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), 500);
}
