use std::env;
use std::path::{Path, PathBuf};
use std::time::Duration;

use base64::{engine::general_purpose, Engine as _};
use futures::future::join_all;
use reqwest::header::{HeaderMap, HeaderValue};
use serde_json::{json, Value};

use crate::clients::{http, ClientError};
use crate::config::{self, GeminiSettings};

const GEMINI_BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta";

/// One conversation turn sent to the generation endpoint.
#[derive(Debug, Clone)]
pub struct Turn {
    pub role: String,
    pub text: String,
}

impl Turn {
    pub fn user(text: impl Into<String>) -> Self {
        Self {
            role: "user".to_string(),
            text: text.into(),
        }
    }
}

#[derive(Debug, Clone)]
pub struct GenerateRequest {
    pub model: String,
    pub contents: Vec<Turn>,
    pub system_prompt: String,
    pub response_schema: Option<Value>,
    pub temperature: f32,
    pub top_p: f32,
    pub top_k: i32,
    pub max_output_tokens: u32,
    pub timeout_secs: u64,
}

impl GenerateRequest {
    /// Text request with the configured sampling defaults.
    pub fn text(model: impl Into<String>, user_prompt: impl Into<String>) -> Self {
        let settings = GeminiSettings::default();
        Self {
            model: model.into(),
            contents: vec![Turn::user(user_prompt)],
            system_prompt: String::new(),
            response_schema: None,
            temperature: settings.temperature,
            top_p: settings.top_p,
            top_k: settings.top_k,
            max_output_tokens: settings.max_output_tokens,
            timeout_secs: settings.timeout_secs,
        }
    }

    pub fn with_system_prompt(mut self, system_prompt: impl Into<String>) -> Self {
        self.system_prompt = system_prompt.into();
        self
    }

    pub fn with_schema(mut self, schema: Value) -> Self {
        self.response_schema = Some(schema);
        self
    }
}

#[derive(Debug)]
pub enum GenerateFailure {
    TimedOut,
    EmptyResponse,
    ParseError(String),
    Transport(String),
}

impl std::fmt::Display for GenerateFailure {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            GenerateFailure::TimedOut => write!(f, "generation timed out"),
            GenerateFailure::EmptyResponse => write!(f, "response carried no text"),
            GenerateFailure::ParseError(msg) => write!(f, "response failed to parse: {}", msg),
            GenerateFailure::Transport(msg) => write!(f, "request failed: {}", msg),
        }
    }
}

/// Tagged result of a generation call. The tag records why a call degraded
/// so callers can keep the fail-soft contract while the reason still lands
/// in the logs.
#[derive(Debug)]
pub enum GenerateOutcome {
    Json(Value),
    Text(String),
    Failed(GenerateFailure),
}

impl GenerateOutcome {
    /// Collapse to a JSON value, substituting the caller's default on any
    /// failure. Never panics; the failure reason is logged.
    pub fn json_or(self, default: Value) -> Value {
        match self {
            GenerateOutcome::Json(value) => value,
            GenerateOutcome::Text(_) => {
                log::warn!("expected structured output but got plain text; using default");
                default
            }
            GenerateOutcome::Failed(reason) => {
                log::warn!("generation degraded to default: {}", reason);
                default
            }
        }
    }

    /// Collapse to plain text, substituting the default on any failure.
    pub fn text_or(self, default: String) -> String {
        match self {
            GenerateOutcome::Text(text) => text,
            GenerateOutcome::Json(value) => value.to_string(),
            GenerateOutcome::Failed(reason) => {
                log::warn!("generation degraded to default: {}", reason);
                default
            }
        }
    }
}

#[derive(Clone)]
pub struct GeminiClient {
    api_key: String,
    base_url: String,
}

impl GeminiClient {
    pub fn new() -> Result<Self, ClientError> {
        let api_key =
            env::var("GEMINI_API_KEY").map_err(|_| ClientError::MissingApiKey("GEMINI_API_KEY"))?;
        if api_key.is_empty() {
            return Err(ClientError::MissingApiKey("GEMINI_API_KEY"));
        }
        Ok(Self::with_api_key(api_key))
    }

    pub fn with_api_key(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            base_url: GEMINI_BASE_URL.to_string(),
        }
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    fn headers(&self) -> Result<HeaderMap, ClientError> {
        let mut headers = HeaderMap::new();
        let value = HeaderValue::from_str(&self.api_key)
            .map_err(|e| ClientError::InvalidApiKey(e.to_string()))?;
        headers.insert("x-goog-api-key", value);
        Ok(headers)
    }

    /// Fail-soft generation call. The request runs as a cancellable task
    /// racing the configured timeout; on expiry the task is aborted and the
    /// outcome is tagged `TimedOut`. This function never errors: every
    /// failure mode is reported through `GenerateOutcome::Failed` and
    /// collapses to the caller's default at the call site.
    pub async fn generate_content(&self, request: GenerateRequest) -> GenerateOutcome {
        let url = format!(
            "{}/models/{}:generateContent",
            self.base_url, request.model
        );
        let headers = match self.headers() {
            Ok(headers) => headers,
            Err(e) => return GenerateOutcome::Failed(GenerateFailure::Transport(e.to_string())),
        };

        let expects_json = request.response_schema.is_some();
        let timeout = Duration::from_secs(request.timeout_secs);
        let body = build_generate_body(&request);

        let mut task =
            tokio::spawn(async move { http::post_json(&url, headers, body).await });

        let response = match tokio::time::timeout(timeout, &mut task).await {
            Err(_) => {
                task.abort();
                return GenerateOutcome::Failed(GenerateFailure::TimedOut);
            }
            Ok(Err(join_err)) => {
                return GenerateOutcome::Failed(GenerateFailure::Transport(join_err.to_string()))
            }
            Ok(Ok(Err(http_err))) => {
                return GenerateOutcome::Failed(GenerateFailure::Transport(http_err.to_string()))
            }
            Ok(Ok(Ok(response))) => response,
        };

        if !response.is_success() {
            return GenerateOutcome::Failed(GenerateFailure::Transport(format!(
                "status {}",
                response.status
            )));
        }

        let payload = match response.json() {
            Ok(payload) => payload,
            Err(e) => return GenerateOutcome::Failed(GenerateFailure::ParseError(e.to_string())),
        };

        let text = match candidate_text(&payload) {
            Some(text) if !text.is_empty() => text,
            _ => return GenerateOutcome::Failed(GenerateFailure::EmptyResponse),
        };

        if expects_json {
            match serde_json::from_str(&text) {
                Ok(value) => GenerateOutcome::Json(value),
                Err(e) => GenerateOutcome::Failed(GenerateFailure::ParseError(e.to_string())),
            }
        } else {
            GenerateOutcome::Text(text)
        }
    }

    /// One generation call per prompt, all issued concurrently. Returns the
    /// paths of however many images were written; a failing prompt logs and
    /// contributes no file.
    pub async fn generate_image_files(
        &self,
        prompts: &[String],
        output_dir: &Path,
        base_name: &str,
    ) -> Vec<PathBuf> {
        if let Err(e) = config::ensure_dir(output_dir) {
            log::error!("failed to create image directory {:?}: {}", output_dir, e);
            return Vec::new();
        }

        let calls = prompts
            .iter()
            .enumerate()
            .map(|(index, prompt)| self.generate_one_image(index, prompt, output_dir, base_name));

        join_all(calls).await.into_iter().flatten().collect()
    }

    async fn generate_one_image(
        &self,
        prompt_index: usize,
        prompt: &str,
        output_dir: &Path,
        base_name: &str,
    ) -> Option<PathBuf> {
        let file_name_prefix = format!("{}_{}", base_name, prompt_index);

        let url = format!(
            "{}/models/{}:generateContent",
            self.base_url,
            config::GEMINI_IMAGE_MODEL
        );
        let headers = match self.headers() {
            Ok(headers) => headers,
            Err(e) => {
                log::error!("Image generation failed for {}: {}", file_name_prefix, e);
                return None;
            }
        };
        let body = json!({
            "contents": [{"role": "user", "parts": [{"text": prompt}]}],
            "generationConfig": {"responseModalities": ["IMAGE", "TEXT"]},
        });

        let response = match http::post_json(&url, headers, body).await {
            Ok(response) if response.is_success() => response,
            Ok(response) => {
                log::error!(
                    "Image generation failed for {}: status {}",
                    file_name_prefix,
                    response.status
                );
                return None;
            }
            Err(e) => {
                log::error!("Image generation failed for {}: {}", file_name_prefix, e);
                return None;
            }
        };

        let payload = match response.json() {
            Ok(payload) => payload,
            Err(e) => {
                log::error!("Image generation failed for {}: {}", file_name_prefix, e);
                return None;
            }
        };

        let parts = payload["candidates"][0]["content"]["parts"].as_array()?;

        // Take only the first part carrying inline image data.
        for (part_index, part) in parts.iter().enumerate() {
            let Some(data) = part["inlineData"]["data"].as_str() else {
                continue;
            };
            let mime_type = part["inlineData"]["mimeType"].as_str().unwrap_or("");
            let extension = extension_for_mime(mime_type);

            let bytes = match general_purpose::STANDARD.decode(data) {
                Ok(bytes) => bytes,
                Err(e) => {
                    log::error!("Image decode failed for {}: {}", file_name_prefix, e);
                    return None;
                }
            };

            let file_path =
                output_dir.join(format!("{}_{}.{}", file_name_prefix, part_index, extension));
            match std::fs::write(&file_path, bytes) {
                Ok(_) => return Some(file_path),
                Err(e) => {
                    log::error!("Image write failed for {:?}: {}", file_path, e);
                    return None;
                }
            }
        }

        log::warn!("No inline image data in response for {}", file_name_prefix);
        None
    }
}

fn build_generate_body(request: &GenerateRequest) -> Value {
    let contents: Vec<Value> = request
        .contents
        .iter()
        .map(|turn| json!({"role": turn.role, "parts": [{"text": turn.text}]}))
        .collect();

    let mut generation_config = json!({
        "temperature": request.temperature,
        "topP": request.top_p,
        "topK": request.top_k,
        "maxOutputTokens": request.max_output_tokens,
    });
    if let Some(schema) = &request.response_schema {
        generation_config["responseMimeType"] = json!("application/json");
        generation_config["responseSchema"] = schema.clone();
    }

    let mut body = json!({
        "contents": contents,
        "generationConfig": generation_config,
    });
    if !request.system_prompt.is_empty() {
        body["systemInstruction"] = json!({"parts": [{"text": request.system_prompt}]});
    }
    body
}

/// Concatenated text of the first candidate's parts.
fn candidate_text(payload: &Value) -> Option<String> {
    let parts = payload["candidates"][0]["content"]["parts"].as_array()?;
    let text: String = parts
        .iter()
        .filter_map(|part| part["text"].as_str())
        .collect();
    Some(text)
}

fn extension_for_mime(mime_type: &str) -> &'static str {
    match mime_type {
        "image/jpeg" | "image/jpg" => "jpg",
        "image/png" => "png",
        "image/gif" => "gif",
        "image/webp" => "webp",
        _ => "bin",
    }
}
