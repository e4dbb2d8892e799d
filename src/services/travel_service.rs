use serde_json::{json, Map, Value};

use crate::clients::perplexity::{self, ChatRequest, PerplexityClient};
use crate::clients::ClientError;
use crate::config::{self, SearchSettings};
use crate::models::travel::{TravelOptionsRequest, TravelOptionsResponse};
use crate::prompts::SYSTEM_PROMPT_TRAVEL_OPTIONS;
use crate::services::{json_repair, ServiceError};

pub struct TravelService {
    perplexity: PerplexityClient,
    settings: SearchSettings,
}

impl TravelService {
    pub fn new() -> Result<Self, ClientError> {
        Ok(Self::with_client(PerplexityClient::new()?))
    }

    pub fn with_client(perplexity: PerplexityClient) -> Self {
        Self {
            perplexity,
            settings: SearchSettings::default(),
        }
    }

    pub async fn get_travel_options(
        &self,
        payload: &TravelOptionsRequest,
    ) -> Result<TravelOptionsResponse, ServiceError> {
        let user_prompt = format!(
            "Origin: {}\nDestination: {}\nList practical travel options by mode as per schema.",
            payload.origin_city, payload.destination_city
        );

        let mut request = ChatRequest::new(
            SYSTEM_PROMPT_TRAVEL_OPTIONS,
            user_prompt,
            config::PERPLEXITY_TEXT_MODEL,
        )
        .with_recency_filter(payload.recency_filter.clone());
        request.temperature = self.settings.temperature;
        request.top_p = self.settings.top_p;
        request.max_tokens = self.settings.max_tokens;

        let result = self.perplexity.chat_completion(request).await;
        let text = perplexity::message_content(&result);

        // Three-tier repair: strict parse, bracket-scan parse, then the
        // mode-keyed fallback.
        let data = json_repair::extract_json(&text)
            .unwrap_or_else(|| fallback_travel_value(payload));

        normalize_travel_options(data, payload)
    }
}

/// Minimal fallback shape mirroring what the search model is asked for.
fn fallback_travel_value(payload: &TravelOptionsRequest) -> Value {
    json!({
        "origin": payload.origin_city,
        "destination": payload.destination_city,
        "travel_options": {
            "train": [],
            "bus": [],
            "car_taxi": [],
            "car_transport": [],
            "part_load_transport": [],
            "flight": []
        }
    })
}

/// Shape the repaired search reply into the response model: default the
/// echoed cities, convert the keyed-by-mode `travel_options` mapping into
/// an ordered `modes` list dropping any mode whose option list is empty,
/// and rename `origin`/`destination` to `origin_city`/`destination_city`.
pub fn normalize_travel_options(
    data: Value,
    payload: &TravelOptionsRequest,
) -> Result<TravelOptionsResponse, ServiceError> {
    let mut obj: Map<String, Value> = match data {
        Value::Object(map) => map,
        _ => match fallback_travel_value(payload) {
            Value::Object(map) => map,
            _ => Map::new(),
        },
    };

    obj.entry("origin".to_string())
        .or_insert_with(|| json!(payload.origin_city));
    obj.entry("destination".to_string())
        .or_insert_with(|| json!(payload.destination_city));

    if let Some(travel_options) = obj.remove("travel_options") {
        let mut modes = Vec::new();
        if let Some(by_mode) = travel_options.as_object() {
            for (mode_name, options) in by_mode {
                let has_options = options
                    .as_array()
                    .map(|list| !list.is_empty())
                    .unwrap_or(false);
                if has_options {
                    modes.push(json!({"mode": mode_name, "options": options}));
                }
            }
        }
        obj.insert("modes".to_string(), Value::Array(modes));
    }

    let origin = obj
        .remove("origin")
        .unwrap_or_else(|| json!(payload.origin_city));
    let destination = obj
        .remove("destination")
        .unwrap_or_else(|| json!(payload.destination_city));
    obj.insert("origin_city".to_string(), origin);
    obj.insert("destination_city".to_string(), destination);

    serde_json::from_value(Value::Object(obj)).map_err(ServiceError::from)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request() -> TravelOptionsRequest {
        TravelOptionsRequest {
            origin_city: "Delhi".to_string(),
            destination_city: "Jaipur".to_string(),
            recency_filter: None,
        }
    }

    #[test]
    fn test_empty_mode_lists_are_dropped() {
        let data = json!({
            "travel_options": {
                "train": [{"route_name": "X"}],
                "bus": []
            }
        });
        let response = normalize_travel_options(data, &request()).unwrap();

        assert_eq!(response.modes.len(), 1);
        assert_eq!(response.modes[0].mode, "train");
        assert_eq!(response.modes[0].options[0].route_name, "X");
    }

    #[test]
    fn test_city_keys_are_renamed() {
        let data = json!({
            "origin": "Mumbai",
            "destination": "Pune",
            "travel_options": {}
        });
        let response = normalize_travel_options(data, &request()).unwrap();

        assert_eq!(response.origin_city, "Mumbai");
        assert_eq!(response.destination_city, "Pune");
        assert!(response.modes.is_empty());
    }

    #[test]
    fn test_missing_cities_default_to_request() {
        let data = json!({"travel_options": {}});
        let response = normalize_travel_options(data, &request()).unwrap();

        assert_eq!(response.origin_city, "Delhi");
        assert_eq!(response.destination_city, "Jaipur");
    }

    #[test]
    fn test_non_object_reply_uses_fallback() {
        let response = normalize_travel_options(json!("not an object"), &request()).unwrap();
        assert_eq!(response.origin_city, "Delhi");
        assert!(response.modes.is_empty());
    }

    #[test]
    fn test_modes_keep_reply_order() {
        // The model lists modes by practicality; that order must survive
        // normalization rather than coming out alphabetized.
        let data = json!({
            "travel_options": {
                "train": [{"route_name": "Shatabdi"}],
                "flight": [{"route_name": "DEL-JAI"}],
                "bus": [{"route_name": "Volvo AC"}]
            }
        });
        let response = normalize_travel_options(data, &request()).unwrap();

        let order: Vec<&str> = response.modes.iter().map(|m| m.mode.as_str()).collect();
        assert_eq!(order, vec!["train", "flight", "bus"]);
    }

    #[test]
    fn test_existing_modes_list_passes_through() {
        let data = json!({
            "modes": [{"mode": "flight", "options": [{"route_name": "DEL-JAI"}]}]
        });
        let response = normalize_travel_options(data, &request()).unwrap();
        assert_eq!(response.modes.len(), 1);
        assert_eq!(response.modes[0].mode, "flight");
    }

    #[tokio::test]
    async fn test_upstream_outage_yields_empty_modes() {
        let client =
            PerplexityClient::with_api_key("test-key").with_base_url("http://127.0.0.1:1");
        let service = TravelService::with_client(client);

        let response = service.get_travel_options(&request()).await.unwrap();
        assert_eq!(response.origin_city, "Delhi");
        assert_eq!(response.destination_city, "Jaipur");
        assert!(response.modes.is_empty());
    }

    #[tokio::test]
    async fn test_prose_wrapped_reply_is_repaired() {
        let mut server = mockito::Server::new_async().await;
        let content = "Here you go:\n{\"travel_options\": {\"train\": [{\"route_name\": \"Shatabdi\"}], \"bus\": []}}\nSafe travels!";
        let body = json!({
            "choices": [{"message": {"content": content}}]
        });
        let _mock = server
            .mock("POST", "/chat/completions")
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(body.to_string())
            .create_async()
            .await;

        let client = PerplexityClient::with_api_key("test-key").with_base_url(server.url());
        let service = TravelService::with_client(client);

        let response = service.get_travel_options(&request()).await.unwrap();
        assert_eq!(response.modes.len(), 1);
        assert_eq!(response.modes[0].mode, "train");
        assert_eq!(response.modes[0].options[0].route_name, "Shatabdi");
    }
}
