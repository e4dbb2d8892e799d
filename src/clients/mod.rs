pub mod gemini;
pub mod http;
pub mod perplexity;

use std::error::Error;
use std::fmt;

/// Construction-time failures for the AI clients. Missing credentials are
/// fatal for the component that needs them and are never retried.
#[derive(Debug)]
pub enum ClientError {
    MissingApiKey(&'static str),
    InvalidApiKey(String),
}

impl fmt::Display for ClientError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ClientError::MissingApiKey(var) => write!(f, "{} is not set in the environment", var),
            ClientError::InvalidApiKey(msg) => write!(f, "Invalid API key: {}", msg),
        }
    }
}

impl Error for ClientError {}
