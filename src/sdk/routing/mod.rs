pub mod assemble;
pub mod batch;
pub mod cache;
pub mod error;
pub mod provider;
pub mod route;
pub mod service;

pub use assemble::{assemble, Polyline};
pub use batch::BatchFetcher;
pub use cache::GeometryCache;
pub use error::RoutingError;
pub use provider::OsrmProvider;
pub use route::{Coord, Direction, GeometryResult, RouteDirection, RouteDirectionKey, Segment, Stop};
pub use service::RoutingService;
