pub mod enrichment;
pub mod food_service;
pub mod json_repair;
pub mod places_service;
pub mod planner_service;
pub mod travel_service;

use std::error::Error;
use std::fmt;

use crate::clients::ClientError;

/// Errors a domain service can surface to the routing layer, which maps
/// them all to a generic 500 with the message as detail.
#[derive(Debug)]
pub enum ServiceError {
    Client(ClientError),
    Io(std::io::Error),
    Serialization(serde_json::Error),
}

impl fmt::Display for ServiceError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ServiceError::Client(e) => write!(f, "Client error: {}", e),
            ServiceError::Io(e) => write!(f, "IO error: {}", e),
            ServiceError::Serialization(e) => write!(f, "Serialization error: {}", e),
        }
    }
}

impl Error for ServiceError {}

impl From<ClientError> for ServiceError {
    fn from(e: ClientError) -> Self {
        ServiceError::Client(e)
    }
}

impl From<std::io::Error> for ServiceError {
    fn from(e: std::io::Error) -> Self {
        ServiceError::Io(e)
    }
}

impl From<serde_json::Error> for ServiceError {
    fn from(e: serde_json::Error) -> Self {
        ServiceError::Serialization(e)
    }
}
