use super::route::{Coord, GeometryResult};
use async_trait::async_trait;

/// Seam between the batch layer and the routing backend. Tests substitute a
/// scripted implementation; production uses `OsrmProvider`.
#[async_trait]
pub trait RoutingService: Send + Sync {
    /// Road geometry between two coordinates, in (lat, lon) order.
    ///
    /// Failures are data at this layer: any network error, timeout, or
    /// malformed response comes back as `GeometryResult::Unavailable`,
    /// never as a panic or error.
    async fn fetch(&self, origin: Coord, destination: Coord) -> GeometryResult;
}
