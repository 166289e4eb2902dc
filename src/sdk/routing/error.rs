use super::route::Direction;
use serde::Deserialize;
use thiserror::Error;

// OSRM error bodies carry a machine code and sometimes a message.
#[derive(Deserialize, Debug)]
pub struct OsrmErrorPayload {
    pub code: String,
    #[serde(default)]
    pub message: Option<String>,
}

#[derive(Error, Debug)]
pub enum RoutingError {
    #[error("route {route_id} ({direction}) has no stops")]
    EmptyRoute {
        route_id: String,
        direction: Direction,
    },

    #[error("stop {stop_id} has out-of-range coordinate ({lat}, {lon})")]
    CoordinateOutOfRange { stop_id: String, lat: f64, lon: f64 },

    // Structured error reported by the routing service
    #[error("routing service error ({code}): {message}")]
    ApiError { code: String, message: String },

    // Fallback for responses that are not in the expected JSON format
    #[error("unstructured routing service error: {0}")]
    RawApiError(String),

    #[error("underlying request failed: {0}")]
    RequestError(#[from] reqwest::Error),

    #[error("failed to parse routing response: {0}")]
    ParseError(#[from] serde_json::Error),
}
