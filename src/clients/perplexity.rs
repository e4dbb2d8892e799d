use std::env;

use reqwest::header::{HeaderMap, HeaderValue, AUTHORIZATION};
use serde_json::{json, Value};

use crate::clients::{http, ClientError};
use crate::config::SearchSettings;

const PERPLEXITY_BASE_URL: &str = "https://api.perplexity.ai";

#[derive(Debug, Clone)]
pub struct ChatRequest {
    pub system_prompt: String,
    pub user_prompt: String,
    pub model: String,
    pub temperature: f32,
    pub top_p: f32,
    pub max_tokens: u32,
    pub reasoning_effort: Option<String>,
    pub web_search_options: Option<Value>,
    pub search_domain_filter: Option<Vec<String>>,
    pub recency_filter: Option<String>,
}

impl ChatRequest {
    pub fn new(
        system_prompt: impl Into<String>,
        user_prompt: impl Into<String>,
        model: impl Into<String>,
    ) -> Self {
        let settings = SearchSettings::default();
        Self {
            system_prompt: system_prompt.into(),
            user_prompt: user_prompt.into(),
            model: model.into(),
            temperature: settings.temperature,
            top_p: settings.top_p,
            max_tokens: settings.max_tokens,
            reasoning_effort: None,
            web_search_options: Some(json!({
                "search_context_size": settings.search_context_size
            })),
            search_domain_filter: None,
            recency_filter: None,
        }
    }

    pub fn with_max_tokens(mut self, max_tokens: u32) -> Self {
        self.max_tokens = max_tokens;
        self
    }

    pub fn with_recency_filter(mut self, recency_filter: Option<String>) -> Self {
        self.recency_filter = recency_filter;
        self
    }
}

/// Web-search-augmented chat completion client. The API gives no schema
/// guarantee, so callers own the parsing of the reply text.
#[derive(Clone)]
pub struct PerplexityClient {
    api_key: String,
    base_url: String,
}

impl PerplexityClient {
    pub fn new() -> Result<Self, ClientError> {
        let api_key = env::var("PERPLEXITY_API_KEY")
            .map_err(|_| ClientError::MissingApiKey("PERPLEXITY_API_KEY"))?;
        if api_key.is_empty() {
            return Err(ClientError::MissingApiKey("PERPLEXITY_API_KEY"));
        }
        Ok(Self::with_api_key(api_key))
    }

    pub fn with_api_key(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            base_url: PERPLEXITY_BASE_URL.to_string(),
        }
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    /// One chat-completion call. Returns the parsed response body, or an
    /// empty mapping on any request failure. Never errors.
    pub async fn chat_completion(&self, request: ChatRequest) -> Value {
        let url = format!("{}/chat/completions", self.base_url);

        let mut headers = HeaderMap::new();
        match HeaderValue::from_str(&format!("Bearer {}", self.api_key)) {
            Ok(value) => {
                headers.insert(AUTHORIZATION, value);
            }
            Err(e) => {
                log::error!("Error generating content: invalid API key header: {}", e);
                return json!({});
            }
        }

        let mut body = json!({
            "model": request.model,
            "messages": [
                {"role": "system", "content": request.system_prompt},
                {"role": "user", "content": request.user_prompt},
            ],
            "search_mode": "web",
            "max_tokens": request.max_tokens,
            "temperature": request.temperature,
            "top_p": request.top_p,
            "stream": false,
            "return_images": false,
            "return_related_questions": false,
        });
        if let Some(reasoning_effort) = &request.reasoning_effort {
            body["reasoning_effort"] = json!(reasoning_effort);
        }
        if let Some(web_search_options) = &request.web_search_options {
            body["web_search_options"] = web_search_options.clone();
        }
        if let Some(search_domain_filter) = &request.search_domain_filter {
            body["search_domain_filter"] = json!(search_domain_filter);
        }
        if let Some(recency_filter) = &request.recency_filter {
            body["search_recency_filter"] = json!(recency_filter);
        }

        let response = match http::post_json(&url, headers, body).await {
            Ok(response) => response,
            Err(e) => {
                log::error!("Error generating content: {}", e);
                return json!({});
            }
        };
        if !response.is_success() {
            log::error!("Error generating content: status {}", response.status);
            return json!({});
        }
        match response.json() {
            Ok(payload) => payload,
            Err(e) => {
                log::error!("Error generating content: {}", e);
                json!({})
            }
        }
    }
}

/// First choice's assistant message content, or an empty string.
pub fn message_content(response: &Value) -> String {
    response["choices"][0]["message"]["content"]
        .as_str()
        .unwrap_or("")
        .to_string()
}
