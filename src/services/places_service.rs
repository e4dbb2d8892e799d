use serde_json::{json, Value};

use crate::clients::gemini::{GeminiClient, GenerateRequest};
use crate::clients::ClientError;
use crate::config::{self, GeminiSettings, ImageSettings};
use crate::models::places::{PlaceCardsRequest, PlaceCardsResponse};
use crate::prompts::SYSTEM_PROMPT_ITINERARY_PLACES;
use crate::services::enrichment::{self, EnrichmentStrategy, ImageJob};
use crate::services::ServiceError;

pub struct PlacesService {
    gemini: GeminiClient,
    settings: GeminiSettings,
    images: ImageSettings,
}

impl PlacesService {
    pub fn new() -> Result<Self, ClientError> {
        Ok(Self::with_client(GeminiClient::new()?))
    }

    pub fn with_client(gemini: GeminiClient) -> Self {
        Self {
            gemini,
            settings: GeminiSettings::default(),
            images: ImageSettings::default(),
        }
    }

    pub async fn get_places(
        &self,
        payload: &PlaceCardsRequest,
    ) -> Result<PlaceCardsResponse, ServiceError> {
        let default = PlaceCardsResponse::empty(payload);
        let default_value = serde_json::to_value(&default)?;

        let mut request =
            GenerateRequest::text(config::GEMINI_TEXT_MODEL, build_places_prompt(payload))
                .with_system_prompt(SYSTEM_PROMPT_ITINERARY_PLACES)
                .with_schema(places_schema());
        request.temperature = self.settings.temperature;
        request.top_p = self.settings.top_p;
        request.top_k = self.settings.top_k;
        request.max_output_tokens = self.settings.max_output_tokens;
        request.timeout_secs = self.settings.timeout_secs;

        let data = self
            .gemini
            .generate_content(request)
            .await
            .json_or(default_value);

        let mut response: PlaceCardsResponse = match serde_json::from_value(data) {
            Ok(response) => response,
            Err(e) => {
                log::warn!("place-cards response did not match the schema: {}", e);
                default
            }
        };

        self.attach_images(payload, &mut response).await?;
        Ok(response)
    }

    /// Parallel enrichment: every qualifying card's image batch runs at
    /// once. Cards with no prompts, or whose generation failed, get an
    /// explicit empty list.
    async fn attach_images(
        &self,
        payload: &PlaceCardsRequest,
        response: &mut PlaceCardsResponse,
    ) -> Result<(), ServiceError> {
        let output_dir = config::static_dir()
            .join("itineraries")
            .join(config::city_slug(&payload.destination_city))
            .join("places");
        config::ensure_dir(&output_dir)?;

        let jobs: Vec<ImageJob> = response
            .places
            .iter()
            .enumerate()
            .filter_map(|(index, place)| {
                let prompts: Vec<String> = place
                    .photo_prompts
                    .iter()
                    .take(self.images.max_images_per_entity)
                    .cloned()
                    .collect();
                if prompts.is_empty() {
                    None
                } else {
                    Some(ImageJob {
                        index,
                        prompts,
                        base_name: config::city_slug(&place.place_name),
                    })
                }
            })
            .collect();

        let results = enrichment::generate_image_sets(
            &self.gemini,
            &output_dir,
            EnrichmentStrategy::Parallel,
            jobs,
        )
        .await;

        for (index, place) in response.places.iter_mut().enumerate() {
            place.image_urls = results
                .get(&index)
                .map(|files| files.iter().map(|path| config::static_url(path)).collect())
                .unwrap_or_default();
        }
        Ok(())
    }
}

pub(crate) fn build_places_prompt(payload: &PlaceCardsRequest) -> String {
    let interests = if payload.interests.is_empty() {
        "general".to_string()
    } else {
        payload.interests.join(", ")
    };
    format!(
        "Destination: {}\nInterests: {}\nMax places: {}\nReturn concise place cards as per schema.",
        payload.destination_city, interests, payload.max_places
    )
}

fn places_schema() -> Value {
    json!({
        "type": "OBJECT",
        "required": ["destination_city", "places"],
        "properties": {
            "destination_city": {"type": "STRING"},
            "places": {
                "type": "ARRAY",
                "items": {
                    "type": "OBJECT",
                    "required": ["city", "place_name", "speciality", "tips", "photo_prompts"],
                    "properties": {
                        "city": {"type": "STRING"},
                        "place_name": {"type": "STRING"},
                        "speciality": {"type": "STRING"},
                        "tips": {
                            "type": "ARRAY",
                            "items": {"type": "STRING"}
                        },
                        "photo_prompts": {
                            "type": "ARRAY",
                            "items": {"type": "STRING"}
                        }
                    }
                }
            }
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::places::ItineraryPlaceCard;

    fn request() -> PlaceCardsRequest {
        PlaceCardsRequest {
            destination_city: "Jaipur".to_string(),
            interests: Vec::new(),
            max_places: 8,
        }
    }

    #[test]
    fn test_prompt_includes_request_fields() {
        let prompt = build_places_prompt(&request());
        assert!(prompt.contains("Destination: Jaipur"));
        assert!(prompt.contains("Interests: general"));
        assert!(prompt.contains("Max places: 8"));
    }

    #[test]
    fn test_schema_requires_card_fields() {
        let schema = places_schema();
        assert_eq!(
            schema["properties"]["places"]["items"]["required"],
            json!(["city", "place_name", "speciality", "tips", "photo_prompts"])
        );
    }

    #[tokio::test]
    #[serial_test::serial]
    async fn test_enrichment_without_prompts_is_idempotent() {
        let static_dir = tempfile::tempdir().unwrap();
        std::env::set_var("STATIC_DIR", static_dir.path());

        let client = GeminiClient::with_api_key("test-key");
        let service = PlacesService::with_client(client);
        let payload = request();

        let mut response = PlaceCardsResponse {
            destination_city: "Jaipur".to_string(),
            places: vec![ItineraryPlaceCard {
                city: "Jaipur".to_string(),
                place_name: "Hawa Mahal".to_string(),
                speciality: "Pink sandstone facade".to_string(),
                tips: Vec::new(),
                photo_prompts: Vec::new(),
                image_urls: Vec::new(),
            }],
        };

        service.attach_images(&payload, &mut response).await.unwrap();
        assert!(response.places[0].image_urls.is_empty());

        // Second pass with no prompts present stays a no-op.
        service.attach_images(&payload, &mut response).await.unwrap();
        assert!(response.places[0].image_urls.is_empty());

        std::env::remove_var("STATIC_DIR");
    }
}
