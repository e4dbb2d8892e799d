use std::sync::Arc;

use actix_web::{web, HttpResponse, Responder};
use chrono::Utc;
use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use serde_json::json;
use uuid::Uuid;

use crate::clients::gemini::{GeminiClient, GenerateOutcome, GenerateRequest};
use crate::config;
use crate::prompts::{
    render_template, ACCOMMODATION_PROMPT, ACTIVITIES_PROMPT, RESTAURANTS_PROMPT,
};
use crate::routes::{bad_request, internal_error};
use crate::store::{AppState, Store};

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct DestinationRequest {
    pub place: String,
    pub days: u32,
    pub budget: f64,
    /// Free-form user preferences like "vegetarian food, historic sites, no clubs"
    #[serde(default)]
    pub custom_ins: String,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct DestinationRecord {
    pub place: String,
    pub days: u32,
    pub budget: f64,
    #[serde(default)]
    pub activities: Vec<String>,
    #[serde(default)]
    pub food: Vec<String>,
    #[serde(default)]
    pub accommodations: Vec<String>,
    pub processing_status: String,
    #[serde(default)]
    pub error: Option<String>,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct TaskRecord {
    pub task_id: String,
    pub status: String,
    pub message: String,
    pub created_at: f64,
    pub destinations: Vec<DestinationRecord>,
}

pub async fn index() -> impl Responder {
    HttpResponse::Ok().json(json!({
        "message": "Itinera AI Places Processing",
        "endpoints": {
            "process_destinations": "/api/v1/itinera/places/process",
            "task_status": "/api/v1/itinera/places/status/{task_id}",
            "tasks": "/api/v1/itinera/places/tasks"
        }
    }))
}

/*
    POST /api/v1/itinera/places/process

    Legacy background processor: replies immediately with a task id and
    fills the task record in as each destination finishes. Per-destination
    failures are recorded as human-readable strings in the list fields
    rather than failing the task.
*/
pub async fn process_destinations(
    state: web::Data<AppState>,
    payload: web::Json<Vec<DestinationRequest>>,
) -> impl Responder {
    let destinations = payload.into_inner();
    if destinations.is_empty() {
        return bad_request("No destinations provided");
    }

    let gemini = match GeminiClient::new() {
        Ok(client) => client,
        Err(e) => return internal_error(e),
    };

    let task_id = Uuid::new_v4().to_string();
    let record = TaskRecord {
        task_id: task_id.clone(),
        status: "processing".to_string(),
        message: format!(
            "Started processing {} destinations in background",
            destinations.len()
        ),
        created_at: Utc::now().timestamp() as f64,
        destinations: destinations
            .iter()
            .map(|dest| DestinationRecord {
                place: dest.place.clone(),
                days: dest.days,
                budget: dest.budget,
                activities: Vec::new(),
                food: Vec::new(),
                accommodations: Vec::new(),
                processing_status: "pending".to_string(),
                error: None,
            })
            .collect(),
    };

    match serde_json::to_value(&record) {
        Ok(value) => state.tasks.put(&task_id, value),
        Err(e) => return internal_error(e),
    }

    let tasks = state.tasks.clone();
    tokio::spawn(process_task(gemini, tasks, task_id, destinations));

    HttpResponse::Ok().json(record)
}

/*
    GET /api/v1/itinera/places/status/{task_id}
*/
pub async fn get_task_status(state: web::Data<AppState>, path: web::Path<String>) -> impl Responder {
    match state.tasks.get(&path.into_inner()) {
        Some(task) => HttpResponse::Ok().json(task),
        None => HttpResponse::NotFound().json(json!({"detail": "Task not found"})),
    }
}

/*
    GET /api/v1/itinera/places/tasks
*/
pub async fn list_tasks(state: web::Data<AppState>) -> impl Responder {
    HttpResponse::Ok().json(json!({"tasks": state.tasks.list()}))
}

async fn process_task(
    gemini: GeminiClient,
    tasks: Arc<dyn Store>,
    task_id: String,
    destinations: Vec<DestinationRequest>,
) {
    let mut processed = Vec::new();
    for destination in &destinations {
        log::info!("processing destination {}", destination.place);
        processed.push(process_destination(&gemini, destination).await);
    }

    let record = TaskRecord {
        task_id: task_id.clone(),
        status: "completed".to_string(),
        message: format!("Successfully processed {} destinations", processed.len()),
        created_at: Utc::now().timestamp() as f64,
        destinations: processed,
    };
    match serde_json::to_value(&record) {
        Ok(value) => tasks.put(&task_id, value),
        Err(e) => log::error!("failed to record task {}: {}", task_id, e),
    }
}

async fn process_destination(
    gemini: &GeminiClient,
    destination: &DestinationRequest,
) -> DestinationRecord {
    let activities = generate_list(gemini, ACTIVITIES_PROMPT, destination, "activities").await;
    let food = generate_list(gemini, RESTAURANTS_PROMPT, destination, "food").await;
    let accommodations =
        generate_list(gemini, ACCOMMODATION_PROMPT, destination, "accommodations").await;

    DestinationRecord {
        place: destination.place.clone(),
        days: destination.days,
        budget: destination.budget,
        activities,
        food,
        accommodations,
        processing_status: "completed".to_string(),
        error: None,
    }
}

/// One unstructured generation call; failures become content strings, the
/// legacy behavior of this path.
async fn generate_list(
    gemini: &GeminiClient,
    template: &str,
    destination: &DestinationRequest,
    kind: &str,
) -> Vec<String> {
    let prompt = render_template(
        template,
        &destination.place,
        destination.days,
        destination.budget,
        &destination.custom_ins,
    );
    let outcome = gemini
        .generate_content(GenerateRequest::text(config::GEMINI_TEXT_MODEL, prompt))
        .await;

    match outcome {
        GenerateOutcome::Text(text) => parse_simple_response(&text, kind),
        GenerateOutcome::Json(value) => parse_simple_response(&value.to_string(), kind),
        GenerateOutcome::Failed(reason) => vec![format!("Error getting {}: {}", kind, reason)],
    }
}

static ITEM_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r#""(.*?)""#).expect("item regex"));

/// Scan an unstructured reply for the named string array. Tries the keyed
/// JSON array first, then falls back to splitting the text by lines.
pub(crate) fn parse_simple_response(text: &str, kind: &str) -> Vec<String> {
    let cleaned = text.trim();

    let array_re = match Regex::new(&format!(r#"(?s)"{}"\s*:\s*\[(.*?)\]"#, kind)) {
        Ok(re) => re,
        Err(e) => return vec![format!("Error parsing {}: {}", kind, e)],
    };

    if let Some(captures) = array_re.captures(cleaned) {
        let array_content = &captures[1];
        let items: Vec<String> = ITEM_RE
            .captures_iter(array_content)
            .map(|c| c[1].to_string())
            .collect();
        return items;
    }

    // No array found; keep lines long enough to be real recommendations.
    cleaned
        .lines()
        .map(|line| line.trim().trim_matches('"').trim_matches('\'').to_string())
        .filter(|line| line.len() > 10)
        .collect()
}
