use serde_json::{json, Map, Value};

use crate::clients::perplexity::{self, ChatRequest, PerplexityClient};
use crate::clients::ClientError;
use crate::config;
use crate::models::food::{FoodOptionsRequest, FoodOptionsResponse};
use crate::prompts::SYSTEM_PROMPT_FOOD_OPTIONS;
use crate::services::{json_repair, ServiceError};

// Tighter than the configured search default; food replies stay short.
const FOOD_MAX_TOKENS: u32 = 1200;

pub struct FoodService {
    perplexity: PerplexityClient,
}

impl FoodService {
    pub fn new() -> Result<Self, ClientError> {
        Ok(Self::with_client(PerplexityClient::new()?))
    }

    pub fn with_client(perplexity: PerplexityClient) -> Self {
        Self { perplexity }
    }

    pub async fn get_food_outlets(
        &self,
        payload: &FoodOptionsRequest,
    ) -> Result<FoodOptionsResponse, ServiceError> {
        let request = ChatRequest::new(
            SYSTEM_PROMPT_FOOD_OPTIONS,
            build_food_prompt(payload),
            config::PERPLEXITY_TEXT_MODEL,
        )
        .with_max_tokens(FOOD_MAX_TOKENS)
        .with_recency_filter(payload.recency_filter.clone());

        let result = self.perplexity.chat_completion(request).await;
        let text = perplexity::message_content(&result);

        let data = json_repair::extract_json(&text)
            .unwrap_or_else(|| json!({"city": payload.city, "outlets": []}));

        let mut obj: Map<String, Value> = match data {
            Value::Object(map) => map,
            _ => Map::new(),
        };
        obj.entry("city".to_string())
            .or_insert_with(|| json!(payload.city));
        obj.entry("outlets".to_string()).or_insert_with(|| json!([]));

        serde_json::from_value(Value::Object(obj)).map_err(ServiceError::from)
    }
}

pub(crate) fn build_food_prompt(payload: &FoodOptionsRequest) -> String {
    let cuisines = if payload.cuisine_preferences.is_empty() {
        "any".to_string()
    } else {
        payload.cuisine_preferences.join(", ")
    };
    let price_level = payload.price_level.as_deref().unwrap_or("any");
    format!(
        "City: {}\nCuisines: {}\nPrice level: {}\nReturn JSON as per schema only.",
        payload.city, cuisines, price_level
    )
}
