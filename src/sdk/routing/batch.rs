use super::error::RoutingError;
use super::route::{GeometryResult, RouteDirection};
use super::service::RoutingService;
use crate::sdk::util::limit::ConcurrencyLimiter;
use futures::future::join_all;
use std::sync::Arc;

/// Fetches geometry for every segment of a route direction concurrently,
/// bounded by the limiter.
pub struct BatchFetcher {
    service: Arc<dyn RoutingService>,
    limiter: Arc<ConcurrencyLimiter>,
}

impl BatchFetcher {
    pub fn new(service: Arc<dyn RoutingService>, limiter: Arc<ConcurrencyLimiter>) -> Self {
        Self { service, limiter }
    }

    /// One result per segment, index-aligned to the segment order regardless
    /// of completion order. The call only errors on invalid input; segment
    /// failures come back as `Unavailable` at their position, and the join
    /// waits for the full batch.
    pub async fn fetch_all(
        &self,
        route: &RouteDirection,
    ) -> Result<Vec<GeometryResult>, RoutingError> {
        route.validate()?;

        let tasks = route.segments().map(|segment| {
            let origin = segment.origin.position;
            let destination = segment.destination.position;
            async move {
                let _permit = self.limiter.acquire().await;
                // Permit is dropped as soon as the response is in, before
                // any cache write upstream.
                self.service.fetch(origin, destination).await
            }
        });
        let results = join_all(tasks).await;

        let misses = results.iter().filter(|r| !r.is_available()).count();
        if misses > 0 {
            log::warn!(
                "{} of {} segments unavailable for {}",
                misses,
                results.len(),
                route.key()
            );
        }
        Ok(results)
    }
}
