pub mod sdk;

pub use sdk::config::OsrmConfig;
pub use sdk::dataset::{load_routes, load_stops, DatasetError, RouteTable, StopIndex};
pub use sdk::render::{build_route_map, Marker, RouteMap};
pub use sdk::routing::assemble::{assemble, Polyline};
pub use sdk::routing::batch::BatchFetcher;
pub use sdk::routing::cache::GeometryCache;
pub use sdk::routing::error::RoutingError;
pub use sdk::routing::provider::OsrmProvider;
pub use sdk::routing::route::{Coord, Direction, GeometryResult, RouteDirection, Stop};
pub use sdk::routing::service::RoutingService;
pub use sdk::util::limit::ConcurrencyLimiter;
