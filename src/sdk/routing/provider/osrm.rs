use super::types::RouteResponse;
use crate::sdk::config::OsrmConfig;
use crate::sdk::routing::error::{OsrmErrorPayload, RoutingError};
use crate::sdk::routing::route::{Coord, GeometryResult};
use crate::sdk::routing::service::RoutingService;
use crate::sdk::util::rate_limit::Limiter;
use async_trait::async_trait;
use reqwest::Client;
use std::time::Duration;

/// HTTP client for an OSRM `route/v1` endpoint. The base URL is
/// configurable, so the public demo server and a self-hosted instance are
/// the same code path.
pub struct OsrmProvider {
    client: Client,
    base_url: String,
    limiter: Limiter,
}

impl OsrmProvider {
    pub fn new(config: &OsrmConfig, limiter: Limiter) -> Self {
        Self::with_base_url(config.base_url.clone(), config.request_timeout, limiter)
    }

    pub fn with_base_url(base_url: String, timeout: Duration, limiter: Limiter) -> Self {
        Self {
            client: Client::builder()
                .timeout(timeout)
                .build()
                .expect("failed to build HTTP client"),
            base_url,
            limiter,
        }
    }

    async fn request_geometry(
        &self,
        origin: Coord,
        destination: Coord,
    ) -> Result<Vec<Coord>, RoutingError> {
        self.limiter.until_ready().await;

        let (origin_lat, origin_lon) = origin;
        let (dest_lat, dest_lon) = destination;
        // OSRM takes lon,lat pairs in the path.
        let url = format!(
            "{}/route/v1/driving/{},{};{},{}?overview=full&geometries=geojson",
            self.base_url, origin_lon, origin_lat, dest_lon, dest_lat
        );
        log::debug!("[PROVIDER] GET {}", url);

        let response = self.client.get(&url).send().await?;
        let status = response.status();
        let text = response.text().await?;

        if !status.is_success() {
            // Try the structured error first
            if let Ok(payload) = serde_json::from_str::<OsrmErrorPayload>(&text) {
                return Err(RoutingError::ApiError {
                    code: payload.code,
                    message: payload.message.unwrap_or_default(),
                });
            }
            log::error!(
                "Routing service returned non-success status: {}. Unparseable body: {}",
                status,
                text
            );
            return Err(RoutingError::RawApiError(text));
        }

        let parsed: RouteResponse = serde_json::from_str(&text).map_err(|e| {
            log::error!(
                "Failed to parse RouteResponse. URL: {}\nError: {}. Body: {}",
                url,
                e,
                text
            );
            e
        })?;

        if parsed.code != "Ok" {
            return Err(RoutingError::ApiError {
                code: parsed.code,
                message: String::new(),
            });
        }

        let first = parsed.routes.into_iter().next().ok_or_else(|| {
            RoutingError::RawApiError("no route alternatives in success response".to_string())
        })?;
        let points = first.geometry.into_lat_lon();
        if points.is_empty() {
            return Err(RoutingError::RawApiError(
                "route alternative has empty geometry".to_string(),
            ));
        }
        Ok(points)
    }
}

#[async_trait]
impl RoutingService for OsrmProvider {
    async fn fetch(&self, origin: Coord, destination: Coord) -> GeometryResult {
        match self.request_geometry(origin, destination).await {
            Ok(points) => GeometryResult::Path(points),
            Err(e) => {
                log::warn!(
                    "Segment {:?} -> {:?} unavailable: {}",
                    origin,
                    destination,
                    e
                );
                GeometryResult::Unavailable
            }
        }
    }
}
