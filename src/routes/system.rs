use std::env;

use actix_web::{HttpResponse, Responder};
use serde_json::json;

pub async fn health_check() -> impl Responder {
    HttpResponse::Ok().json(json!({"status": "healthy", "service": "Itinera AI"}))
}

pub async fn detailed_health_check() -> impl Responder {
    HttpResponse::Ok().json(json!({
        "status": "healthy",
        "service": "Itinera AI",
        "version": env!("CARGO_PKG_VERSION"),
        "services": {
            "gemini": key_status("GEMINI_API_KEY"),
            "perplexity": key_status("PERPLEXITY_API_KEY"),
        },
        "endpoints": {
            "health": "/api/v1/itinera/system/",
            "detailed_health": "/api/v1/itinera/system/detailed"
        }
    }))
}

fn key_status(var: &str) -> serde_json::Value {
    match env::var(var) {
        Ok(key) if !key.is_empty() => json!({
            "status": "ok",
            "details": format!("{} configured ({})", var, mask_key(&key)),
        }),
        _ => json!({
            "status": "error",
            "details": format!("{} not configured", var),
        }),
    }
}

fn mask_key(key: &str) -> String {
    let count = key.chars().count();
    if count > 8 {
        let head: String = key.chars().take(4).collect();
        let tail: String = key.chars().skip(count - 4).collect();
        format!("{}***{}", head, tail)
    } else {
        "***".to_string()
    }
}
