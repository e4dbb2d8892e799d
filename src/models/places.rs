use serde::{Deserialize, Serialize};

pub const MIN_PLACES: u32 = 1;
pub const MAX_PLACES: u32 = 30;

fn default_max_places() -> u32 {
    8
}

/// Non day-wise itinerary: standalone place cards.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlaceCardsRequest {
    pub destination_city: String,
    #[serde(default)]
    pub interests: Vec<String>,
    #[serde(default = "default_max_places")]
    pub max_places: u32,
}

impl PlaceCardsRequest {
    pub fn validate(&self) -> Result<(), String> {
        if !(MIN_PLACES..=MAX_PLACES).contains(&self.max_places) {
            return Err(format!(
                "max_places must be between {} and {}",
                MIN_PLACES, MAX_PLACES
            ));
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ItineraryPlaceCard {
    pub city: String,
    pub place_name: String,
    pub speciality: String,
    #[serde(default)]
    pub tips: Vec<String>,
    #[serde(default)]
    pub photo_prompts: Vec<String>,
    #[serde(default)]
    pub image_urls: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlaceCardsResponse {
    pub destination_city: String,
    #[serde(default)]
    pub places: Vec<ItineraryPlaceCard>,
}

impl PlaceCardsResponse {
    pub fn empty(request: &PlaceCardsRequest) -> Self {
        Self {
            destination_city: request.destination_city.clone(),
            places: Vec::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_max_places_bounds() {
        let mut request = PlaceCardsRequest {
            destination_city: "Jaipur".to_string(),
            interests: Vec::new(),
            max_places: 8,
        };
        assert!(request.validate().is_ok());

        request.max_places = 0;
        assert!(request.validate().is_err());

        request.max_places = 31;
        assert!(request.validate().is_err());
    }

    #[test]
    fn test_request_defaults() {
        let request: PlaceCardsRequest =
            serde_json::from_value(json!({"destination_city": "Jaipur"})).unwrap();
        assert_eq!(request.max_places, 8);
        assert!(request.interests.is_empty());
    }
}
