use actix_web::{web, HttpResponse, Responder};
use chrono::Utc;
use serde::{Deserialize, Serialize};
use serde_json::json;

use crate::models::food::FoodOptionsRequest;
use crate::models::itinerary::ItineraryRequest;
use crate::models::places::PlaceCardsRequest;
use crate::models::travel::TravelOptionsRequest;
use crate::routes::{bad_request, internal_error};
use crate::services::food_service::FoodService;
use crate::services::places_service::PlacesService;
use crate::services::planner_service::PlannerService;
use crate::services::travel_service::TravelService;
use crate::store::{AppState, Store};

#[derive(Debug, Deserialize, Serialize)]
pub struct TravelPlan {
    pub destination: String,
    /// in days
    pub duration: u32,
    pub budget: f64,
    #[serde(default)]
    pub interests: Vec<String>,
}

#[derive(Debug, Deserialize, Serialize)]
pub struct TravelPlanRecord {
    pub id: String,
    pub destination: String,
    pub duration: u32,
    pub budget: f64,
    pub interests: Vec<String>,
    pub status: String,
    pub created_at: String,
}

#[derive(Debug, Deserialize, Serialize)]
pub struct Destination {
    pub name: String,
    pub country: String,
    #[serde(default)]
    pub description: String,
}

pub async fn index() -> impl Responder {
    HttpResponse::Ok().json(json!({
        "message": "Itinera AI Planning Engine",
        "endpoints": {
            "plans": "/api/v1/itinera/planner/plans",
            "destinations": "/api/v1/itinera/planner/destinations",
            "itinerary": "/api/v1/itinera/planner/itinerary",
            "itinerary_places": "/api/v1/itinera/planner/itinerary/places",
            "options": "/api/v1/itinera/planner/options",
            "food": "/api/v1/itinera/planner/food"
        }
    }))
}

pub async fn get_plans(state: web::Data<AppState>) -> impl Responder {
    HttpResponse::Ok().json(json!({"plans": state.plans.list()}))
}

pub async fn create_plan(
    state: web::Data<AppState>,
    payload: web::Json<TravelPlan>,
) -> impl Responder {
    let payload = payload.into_inner();
    let id = format!("plan_{}", state.plans.len() + 1);
    let record = TravelPlanRecord {
        id: id.clone(),
        destination: payload.destination,
        duration: payload.duration,
        budget: payload.budget,
        interests: payload.interests,
        status: "created".to_string(),
        created_at: Utc::now().to_rfc3339(),
    };

    let value = match serde_json::to_value(&record) {
        Ok(value) => value,
        Err(e) => return internal_error(e),
    };
    state.plans.put(&id, value.clone());

    HttpResponse::Ok().json(json!({"message": "Travel plan created successfully", "plan": value}))
}

pub async fn get_plan(state: web::Data<AppState>, path: web::Path<String>) -> impl Responder {
    match state.plans.get(&path.into_inner()) {
        Some(plan) => HttpResponse::Ok().json(plan),
        None => HttpResponse::NotFound().json(json!({"detail": "Travel plan not found"})),
    }
}

pub async fn get_popular_destinations() -> impl Responder {
    HttpResponse::Ok().json(json!({
        "destinations": [
            {"name": "Paris", "country": "France", "description": "City of Light"},
            {"name": "Tokyo", "country": "Japan", "description": "Modern metropolis"},
            {"name": "Bali", "country": "Indonesia", "description": "Tropical paradise"},
            {"name": "New York", "country": "USA", "description": "The Big Apple"}
        ]
    }))
}

pub async fn add_destination(payload: web::Json<Destination>) -> impl Responder {
    HttpResponse::Ok().json(json!({
        "message": "Destination added successfully",
        "destination": payload.into_inner()
    }))
}

/*
    POST /api/v1/itinera/planner/itinerary
*/
pub async fn generate_itinerary(payload: web::Json<ItineraryRequest>) -> impl Responder {
    let payload = payload.into_inner();
    if let Err(detail) = payload.validate() {
        return bad_request(detail);
    }

    let service = match PlannerService::new() {
        Ok(service) => service,
        Err(e) => return internal_error(e),
    };
    match service.generate_itinerary(&payload).await {
        Ok(response) => HttpResponse::Ok().json(response),
        Err(e) => internal_error(e),
    }
}

/*
    POST /api/v1/itinera/planner/itinerary/places
*/
pub async fn itinerary_places(payload: web::Json<PlaceCardsRequest>) -> impl Responder {
    let payload = payload.into_inner();
    if let Err(detail) = payload.validate() {
        return bad_request(detail);
    }

    let service = match PlacesService::new() {
        Ok(service) => service,
        Err(e) => return internal_error(e),
    };
    match service.get_places(&payload).await {
        Ok(response) => HttpResponse::Ok().json(response),
        Err(e) => internal_error(e),
    }
}

/*
    POST /api/v1/itinera/planner/options
*/
pub async fn travel_options(payload: web::Json<TravelOptionsRequest>) -> impl Responder {
    let payload = payload.into_inner();

    let service = match TravelService::new() {
        Ok(service) => service,
        Err(e) => return internal_error(e),
    };
    match service.get_travel_options(&payload).await {
        Ok(response) => HttpResponse::Ok().json(response),
        Err(e) => internal_error(e),
    }
}

/*
    POST /api/v1/itinera/planner/food
*/
pub async fn food_outlets(payload: web::Json<FoodOptionsRequest>) -> impl Responder {
    let payload = payload.into_inner();

    let service = match FoodService::new() {
        Ok(service) => service,
        Err(e) => return internal_error(e),
    };
    match service.get_food_outlets(&payload).await {
        Ok(response) => HttpResponse::Ok().json(response),
        Err(e) => internal_error(e),
    }
}
