use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FoodOptionsRequest {
    pub city: String,
    #[serde(default)]
    pub cuisine_preferences: Vec<String>,
    /// "$", "$$", "$$$"
    #[serde(default)]
    pub price_level: Option<String>,
    #[serde(default)]
    pub recency_filter: Option<String>,
}

/// Best-effort record; any field beyond the name may be absent.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FoodOutlet {
    pub name: String,
    #[serde(default)]
    pub cuisine: Option<String>,
    #[serde(default)]
    pub price_level: Option<String>,
    #[serde(default)]
    pub area_or_neighborhood: Option<String>,
    #[serde(default)]
    pub highlights: Vec<String>,
    #[serde(default)]
    pub booking_tips: Option<String>,
    #[serde(default)]
    pub source_url: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FoodOptionsResponse {
    pub city: String,
    #[serde(default)]
    pub outlets: Vec<FoodOutlet>,
}
