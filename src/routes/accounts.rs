use actix_web::{web, HttpResponse, Responder};
use chrono::Utc;
use serde_json::{json, Value};

use crate::models::account::{NewUser, UserRecord};
use crate::routes::internal_error;
use crate::store::{AppState, Store};

pub async fn index() -> impl Responder {
    HttpResponse::Ok().json(json!({
        "message": "Itinera AI User Management",
        "endpoints": {
            "users": "/api/v1/itinera/accounts/users",
            "profile": "/api/v1/itinera/accounts/profile"
        }
    }))
}

pub async fn get_users(state: web::Data<AppState>) -> impl Responder {
    HttpResponse::Ok().json(json!({"users": state.users.list()}))
}

pub async fn create_user(
    state: web::Data<AppState>,
    payload: web::Json<NewUser>,
) -> impl Responder {
    let payload = payload.into_inner();
    let id = format!("user_{}", state.users.len() + 1);
    let record = UserRecord {
        id: id.clone(),
        name: payload.name,
        email: payload.email,
        preferences: payload.preferences,
        created_at: Utc::now().to_rfc3339(),
    };

    let value = match serde_json::to_value(&record) {
        Ok(value) => value,
        Err(e) => return internal_error(e),
    };
    state.users.put(&id, value.clone());

    HttpResponse::Ok().json(json!({"message": "User created successfully", "user": value}))
}

/// Mock endpoint; there is no real account system.
pub async fn get_profile() -> impl Responder {
    HttpResponse::Ok().json(json!({
        "id": "user_1",
        "name": "John Doe",
        "email": "john@example.com",
        "preferences": {
            "theme": "dark",
            "language": "en",
            "currency": "USD"
        }
    }))
}

pub async fn update_profile(payload: web::Json<Value>) -> impl Responder {
    HttpResponse::Ok().json(json!({
        "message": "Profile updated successfully",
        "updated_data": payload.into_inner()
    }))
}
