use std::time::Duration;

use serde_json::{json, Value};

use crate::clients::gemini::{GeminiClient, GenerateRequest};
use crate::clients::ClientError;
use crate::config::{self, GeminiSettings, ImageSettings};
use crate::models::itinerary::{ItineraryRequest, ItineraryResponse};
use crate::prompts::SYSTEM_PROMPT_ITINERARY;
use crate::services::enrichment::{self, EnrichmentStrategy, ImageJob};
use crate::services::ServiceError;

pub struct PlannerService {
    gemini: GeminiClient,
    settings: GeminiSettings,
    images: ImageSettings,
}

impl PlannerService {
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

    pub async fn generate_itinerary(
        &self,
        payload: &ItineraryRequest,
    ) -> Result<ItineraryResponse, ServiceError> {
        log::info!(
            "received itinerary request for {} from {}",
            payload.destination_city,
            payload.home_city
        );

        let default = ItineraryResponse::empty(payload);
        let default_value = serde_json::to_value(&default)?;

        let mut request =
            GenerateRequest::text(config::GEMINI_TEXT_MODEL, build_itinerary_prompt(payload))
                .with_system_prompt(SYSTEM_PROMPT_ITINERARY)
                .with_schema(itinerary_schema());
        request.temperature = self.settings.temperature;
        request.top_p = self.settings.top_p;
        request.top_k = self.settings.top_k;
        request.max_output_tokens = self.settings.max_output_tokens;
        request.timeout_secs = self.settings.timeout_secs;

        log::info!("calling generation API for itinerary...");
        let data = self
            .gemini
            .generate_content(request)
            .await
            .json_or(default_value);

        let mut response: ItineraryResponse = match serde_json::from_value(data) {
            Ok(response) => response,
            Err(e) => {
                log::warn!("itinerary response did not match the schema: {}", e);
                default
            }
        };

        self.attach_images(payload, &mut response).await?;
        Ok(response)
    }

    /// Throttled enrichment: a hard cap of image tasks across the whole
    /// multi-day itinerary, awaited strictly in submission order with a
    /// fixed delay between tasks. Every entity ends up with an explicit
    /// `image_urls`, possibly empty.
    async fn attach_images(
        &self,
        payload: &ItineraryRequest,
        response: &mut ItineraryResponse,
    ) -> Result<(), ServiceError> {
        let output_dir = config::static_dir()
            .join("itineraries")
            .join(config::city_slug(&payload.destination_city));
        config::ensure_dir(&output_dir)?;

        let mut jobs = Vec::new();
        let mut index = 0usize;
        for day in &response.days {
            for entity in &day.entities {
                let prompts: Vec<String> = entity
                    .photo_prompts
                    .iter()
                    .take(self.images.max_images_per_entity)
                    .cloned()
                    .collect();
                if !prompts.is_empty() {
                    jobs.push(ImageJob {
                        index,
                        prompts,
                        base_name: config::city_slug(&entity.name),
                    });
                }
                index += 1;
            }
        }

        let strategy = EnrichmentStrategy::Throttled {
            max_total: self.images.max_total_tasks,
            delay: Duration::from_secs(self.images.task_delay_secs),
        };
        let results = enrichment::generate_image_sets(&self.gemini, &output_dir, strategy, jobs).await;

        let mut index = 0usize;
        for day in response.days.iter_mut() {
            for entity in day.entities.iter_mut() {
                entity.image_urls = results
                    .get(&index)
                    .map(|files| files.iter().map(|path| config::static_url(path)).collect())
                    .unwrap_or_default();
                index += 1;
            }
        }
        Ok(())
    }
}

pub(crate) fn build_itinerary_prompt(payload: &ItineraryRequest) -> String {
    let interests = if payload.interests.is_empty() {
        "general".to_string()
    } else {
        payload.interests.join(", ")
    };
    format!(
        "Home: {}\nDestination: {}\nDays: {}\nInterests: {}\nGenerate an end-to-end itinerary as per schema.",
        payload.home_city, payload.destination_city, payload.num_days, interests
    )
}

fn itinerary_schema() -> Value {
    json!({
        "type": "OBJECT",
        "required": ["home_city", "destination_city", "num_days", "days"],
        "properties": {
            "home_city": {"type": "STRING"},
            "destination_city": {"type": "STRING"},
            "num_days": {"type": "INTEGER"},
            "days": {
                "type": "ARRAY",
                "items": {
                    "type": "OBJECT",
                    "required": ["day", "summary", "entities"],
                    "properties": {
                        "day": {"type": "INTEGER"},
                        "summary": {"type": "STRING"},
                        "route_info": {"type": "STRING"},
                        "entities": {
                            "type": "ARRAY",
                            "items": {
                                "type": "OBJECT",
                                "required": ["name", "speciality", "places_to_visit", "photo_prompts"],
                                "properties": {
                                    "name": {"type": "STRING"},
                                    "speciality": {"type": "STRING"},
                                    "places_to_visit": {
                                        "type": "ARRAY",
                                        "items": {
                                            "type": "OBJECT",
                                            "required": ["name", "description"],
                                            "properties": {
                                                "name": {"type": "STRING"},
                                                "description": {"type": "STRING"}
                                            }
                                        }
                                    },
                                    "photo_prompts": {
                                        "type": "ARRAY",
                                        "items": {"type": "STRING"}
                                    }
                                }
                            }
                        }
                    }
                }
            },
            "overall_tips": {
                "type": "ARRAY",
                "items": {"type": "STRING"}
            }
        }
    })
}
