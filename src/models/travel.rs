use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TravelOptionsRequest {
    pub origin_city: String,
    pub destination_city: String,
    /// e.g. "month", "week"
    #[serde(default)]
    pub recency_filter: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TravelSource {
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub url: Option<String>,
    #[serde(default)]
    pub date: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TravelOption {
    pub route_name: String,
    #[serde(default)]
    pub carriers: Vec<String>,
    #[serde(default)]
    pub duration: Option<String>,
    #[serde(default)]
    pub price: Option<String>,
    #[serde(default)]
    pub frequency: Option<String>,
    #[serde(default)]
    pub airports_or_stations: Vec<String>,
    #[serde(default)]
    pub transfers: Option<String>,
    #[serde(default)]
    pub booking_tips: Option<String>,
    #[serde(default)]
    pub sources: Vec<TravelSource>,
}

/// One transport mode; only included when its option list is non-empty.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TravelMode {
    pub mode: String,
    pub options: Vec<TravelOption>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TravelOptionsResponse {
    pub origin_city: String,
    pub destination_city: String,
    #[serde(default)]
    pub modes: Vec<TravelMode>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_option_tolerates_sparse_fields() {
        let option: TravelOption =
            serde_json::from_value(json!({"route_name": "Delhi-Jaipur Express"})).unwrap();
        assert!(option.carriers.is_empty());
        assert!(option.price.is_none());
        assert!(option.sources.is_empty());
    }

    #[test]
    fn test_response_modes_default_empty() {
        let response: TravelOptionsResponse = serde_json::from_value(json!({
            "origin_city": "Delhi",
            "destination_city": "Jaipur"
        }))
        .unwrap();
        assert!(response.modes.is_empty());
    }
}
