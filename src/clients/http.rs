use std::error::Error;
use std::fmt;
use std::time::Duration;

use once_cell::sync::OnceCell;
use reqwest::header::HeaderMap;
use reqwest::{Method, StatusCode};
use url::Url;

const OVERALL_TIMEOUT_SECS: u64 = 30;
const CONNECT_TIMEOUT_SECS: u64 = 10;

static CLIENT: OnceCell<reqwest::Client> = OnceCell::new();

#[derive(Debug)]
pub enum HttpError {
    Transport(String),
    Body(String),
}

impl fmt::Display for HttpError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            HttpError::Transport(msg) => write!(f, "Transport error: {}", msg),
            HttpError::Body(msg) => write!(f, "Body error: {}", msg),
        }
    }
}

impl Error for HttpError {}

/// Response normalized across the async and blocking transports.
pub struct Response {
    pub status: StatusCode,
    pub body: Vec<u8>,
}

impl Response {
    pub fn is_success(&self) -> bool {
        self.status.is_success()
    }

    pub fn json(&self) -> Result<serde_json::Value, HttpError> {
        serde_json::from_slice(&self.body).map_err(|e| HttpError::Body(e.to_string()))
    }
}

/// One long-lived client shared across all outbound calls so connections
/// are reused. Lazily created on first use.
fn shared_client() -> &'static reqwest::Client {
    CLIENT.get_or_init(|| {
        reqwest::Client::builder()
            .timeout(Duration::from_secs(OVERALL_TIMEOUT_SECS))
            .connect_timeout(Duration::from_secs(CONNECT_TIMEOUT_SECS))
            .build()
            .expect("failed to build shared HTTP client")
    })
}

/// Normalize a URL so spaces and special characters in the path are
/// percent-encoded. Unparsable input is passed through unchanged.
pub fn encode_url(raw: &str) -> String {
    match Url::parse(raw) {
        Ok(url) => url.to_string(),
        Err(e) => {
            log::warn!("failed to encode URL {}: {}. Using original URL.", raw, e);
            raw.to_string()
        }
    }
}

pub async fn get(url: &str, headers: HeaderMap) -> Result<Response, HttpError> {
    request(Method::GET, url, headers, None).await
}

pub async fn post_json(
    url: &str,
    headers: HeaderMap,
    body: serde_json::Value,
) -> Result<Response, HttpError> {
    request(Method::POST, url, headers, Some(body)).await
}

/// Issue a request on the shared async client; if the async transport
/// fails, fall back once to the blocking client on a worker thread.
pub async fn request(
    method: Method,
    url: &str,
    headers: HeaderMap,
    body: Option<serde_json::Value>,
) -> Result<Response, HttpError> {
    let encoded = encode_url(url);

    let mut builder = shared_client()
        .request(method.clone(), &encoded)
        .headers(headers.clone());
    if let Some(json) = &body {
        builder = builder.json(json);
    }

    match builder.send().await {
        Ok(resp) => {
            let status = resp.status();
            let bytes = resp
                .bytes()
                .await
                .map_err(|e| HttpError::Body(e.to_string()))?;
            Ok(Response {
                status,
                body: bytes.to_vec(),
            })
        }
        Err(e) => {
            log::error!(
                "Async {} request failed for {}: {}. Retrying on blocking transport...",
                method,
                encoded,
                e
            );
            blocking_request(method, encoded, headers, body).await
        }
    }
}

async fn blocking_request(
    method: Method,
    url: String,
    headers: HeaderMap,
    body: Option<serde_json::Value>,
) -> Result<Response, HttpError> {
    let joined = tokio::task::spawn_blocking(move || {
        let client = reqwest::blocking::Client::builder()
            .timeout(Duration::from_secs(OVERALL_TIMEOUT_SECS))
            .connect_timeout(Duration::from_secs(CONNECT_TIMEOUT_SECS))
            .build()
            .map_err(|e| HttpError::Transport(e.to_string()))?;

        let mut builder = client.request(method, &url).headers(headers);
        if let Some(json) = &body {
            builder = builder.json(json);
        }

        let resp = builder
            .send()
            .map_err(|e| HttpError::Transport(e.to_string()))?;
        let status = resp.status();
        let bytes = resp.bytes().map_err(|e| HttpError::Body(e.to_string()))?;
        Ok(Response {
            status,
            body: bytes.to_vec(),
        })
    })
    .await;

    match joined {
        Ok(result) => result,
        Err(e) => Err(HttpError::Transport(format!(
            "blocking request task failed: {}",
            e
        ))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_encode_url_escapes_path_spaces() {
        let encoded = encode_url("https://example.com/path with spaces/file.png");
        assert_eq!(encoded, "https://example.com/path%20with%20spaces/file.png");
    }

    #[test]
    fn test_encode_url_preserves_query() {
        let encoded = encode_url("https://example.com/search?q=new+york&limit=5");
        assert_eq!(encoded, "https://example.com/search?q=new+york&limit=5");
    }

    #[test]
    fn test_encode_url_passes_through_unparsable_input() {
        assert_eq!(encode_url("not a url"), "not a url");
    }
}
