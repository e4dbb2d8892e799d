use serde::{Deserialize, Serialize};

pub const MIN_DAYS: u32 = 1;
pub const MAX_DAYS: u32 = 14;

fn default_num_days() -> u32 {
    4
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ItineraryRequest {
    pub home_city: String,
    pub destination_city: String,
    #[serde(default = "default_num_days")]
    pub num_days: u32,
    #[serde(default)]
    pub interests: Vec<String>,
}

impl ItineraryRequest {
    /// Validated before any external call is made.
    pub fn validate(&self) -> Result<(), String> {
        if !(MIN_DAYS..=MAX_DAYS).contains(&self.num_days) {
            return Err(format!(
                "num_days must be between {} and {}",
                MIN_DAYS, MAX_DAYS
            ));
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ItineraryPlace {
    pub name: String,
    pub description: String,
}

/// A place/neighborhood cluster within one day. `image_urls` is always
/// present after enrichment, possibly empty.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ItineraryEntity {
    pub name: String,
    pub speciality: String,
    #[serde(default)]
    pub places_to_visit: Vec<ItineraryPlace>,
    #[serde(default)]
    pub photo_prompts: Vec<String>,
    #[serde(default)]
    pub image_urls: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ItineraryDay {
    pub day: u32,
    pub summary: String,
    #[serde(default)]
    pub entities: Vec<ItineraryEntity>,
    #[serde(default)]
    pub route_info: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ItineraryResponse {
    pub home_city: String,
    pub destination_city: String,
    pub num_days: u32,
    #[serde(default)]
    pub days: Vec<ItineraryDay>,
    #[serde(default)]
    pub overall_tips: Vec<String>,
}

impl ItineraryResponse {
    /// Shape-matching default echoing the request identifiers, used when
    /// generation fails entirely.
    pub fn empty(request: &ItineraryRequest) -> Self {
        Self {
            home_city: request.home_city.clone(),
            destination_city: request.destination_city.clone(),
            num_days: request.num_days,
            days: Vec::new(),
            overall_tips: Vec::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_num_days_bounds() {
        let mut request = ItineraryRequest {
            home_city: "Delhi".to_string(),
            destination_city: "Jaipur".to_string(),
            num_days: 2,
            interests: vec!["food".to_string()],
        };
        assert!(request.validate().is_ok());

        request.num_days = 0;
        assert!(request.validate().is_err());

        request.num_days = 15;
        assert!(request.validate().is_err());

        request.num_days = 14;
        assert!(request.validate().is_ok());
    }

    #[test]
    fn test_request_defaults() {
        let request: ItineraryRequest = serde_json::from_value(json!({
            "home_city": "Delhi",
            "destination_city": "Jaipur"
        }))
        .unwrap();
        assert_eq!(request.num_days, 4);
        assert!(request.interests.is_empty());
    }

    #[test]
    fn test_entity_image_urls_default_empty() {
        let entity: ItineraryEntity = serde_json::from_value(json!({
            "name": "Pink City",
            "speciality": "Bazaars and palaces"
        }))
        .unwrap();
        assert!(entity.image_urls.is_empty());
        assert!(entity.photo_prompts.is_empty());
    }

    #[test]
    fn test_empty_response_echoes_request() {
        let request = ItineraryRequest {
            home_city: "Delhi".to_string(),
            destination_city: "Jaipur".to_string(),
            num_days: 3,
            interests: Vec::new(),
        };
        let response = ItineraryResponse::empty(&request);
        assert_eq!(response.destination_city, "Jaipur");
        assert_eq!(response.num_days, 3);
        assert!(response.days.is_empty());
    }
}
