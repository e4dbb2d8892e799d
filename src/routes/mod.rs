pub mod accounts;
pub mod places;
pub mod planner;
pub mod system;

use actix_web::{web, HttpResponse};
use serde_json::json;

/// API surface under `/api/v1/itinera`, shared by the server binary and
/// the integration tests.
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api/v1/itinera")
            .service(
                web::scope("/system")
                    .route("/", web::get().to(system::health_check))
                    .route("/detailed", web::get().to(system::detailed_health_check)),
            )
            .service(
                web::scope("/planner")
                    .route("/", web::get().to(planner::index))
                    .route("/plans", web::get().to(planner::get_plans))
                    .route("/plans", web::post().to(planner::create_plan))
                    .route("/plans/{plan_id}", web::get().to(planner::get_plan))
                    .route(
                        "/destinations",
                        web::get().to(planner::get_popular_destinations),
                    )
                    .route("/destinations", web::post().to(planner::add_destination))
                    .route("/itinerary", web::post().to(planner::generate_itinerary))
                    .route(
                        "/itinerary/places",
                        web::post().to(planner::itinerary_places),
                    )
                    .route("/options", web::post().to(planner::travel_options))
                    .route("/food", web::post().to(planner::food_outlets)),
            )
            .service(
                web::scope("/accounts")
                    .route("/", web::get().to(accounts::index))
                    .route("/users", web::get().to(accounts::get_users))
                    .route("/users", web::post().to(accounts::create_user))
                    .route("/profile", web::get().to(accounts::get_profile))
                    .route("/profile", web::put().to(accounts::update_profile)),
            )
            .service(
                web::scope("/places")
                    .route("/", web::get().to(places::index))
                    .route("/process", web::post().to(places::process_destinations))
                    .route("/status/{task_id}", web::get().to(places::get_task_status))
                    .route("/tasks", web::get().to(places::list_tasks)),
            ),
    );
}

/// Generic 500 with the error message as detail. Failures are recovered
/// inside the clients, so this is the only fallback the routing layer needs.
pub(crate) fn internal_error(err: impl std::fmt::Display) -> HttpResponse {
    log::error!("request failed: {}", err);
    HttpResponse::InternalServerError().json(json!({"detail": err.to_string()}))
}

pub(crate) fn bad_request(detail: impl Into<String>) -> HttpResponse {
    HttpResponse::BadRequest().json(json!({"detail": detail.into()}))
}
