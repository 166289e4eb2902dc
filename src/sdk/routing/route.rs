use super::error::RoutingError;
use std::fmt;

/// Internal coordinate order is always (lat, lon). The OSRM wire format uses
/// (lon, lat) and is flipped at parse time.
pub type Coord = (f64, f64);

#[derive(Debug, Clone, PartialEq)]
pub struct Stop {
    pub id: String,
    pub name: String,
    pub address: Option<String>,
    pub position: Coord,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    Outbound,
    Inbound,
}

impl Direction {
    /// TDX encodes direction as 0 (outbound) or 1 (inbound).
    pub fn from_flag(flag: u8) -> Option<Self> {
        match flag {
            0 => Some(Direction::Outbound),
            1 => Some(Direction::Inbound),
            _ => None,
        }
    }

    pub fn flag(&self) -> u8 {
        match self {
            Direction::Outbound => 0,
            Direction::Inbound => 1,
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Direction::Outbound => write!(f, "outbound"),
            Direction::Inbound => write!(f, "inbound"),
        }
    }
}

/// Cache key: one batch of geometry per route per direction.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct RouteDirectionKey {
    pub route_id: String,
    pub direction: Direction,
}

impl fmt::Display for RouteDirectionKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}::{}", self.route_id, self.direction)
    }
}

/// One direction of a bus route with its ordered, coordinate-resolved stops.
/// The stop list always travels with the value; nothing downstream captures
/// it implicitly.
#[derive(Debug, Clone)]
pub struct RouteDirection {
    pub route_id: String,
    pub route_name: String,
    pub direction: Direction,
    pub stops: Vec<Stop>,
}

/// Directed pair of consecutive stops, the unit of geometry lookup.
#[derive(Debug, Clone, Copy)]
pub struct Segment<'a> {
    pub origin: &'a Stop,
    pub destination: &'a Stop,
}

impl RouteDirection {
    pub fn key(&self) -> RouteDirectionKey {
        RouteDirectionKey {
            route_id: self.route_id.clone(),
            direction: self.direction,
        }
    }

    pub fn segments(&self) -> impl Iterator<Item = Segment<'_>> {
        self.stops.windows(2).map(|pair| Segment {
            origin: &pair[0],
            destination: &pair[1],
        })
    }

    pub fn segment_count(&self) -> usize {
        self.stops.len().saturating_sub(1)
    }

    /// Boundary check before any network call: at least one stop, every
    /// coordinate in range.
    pub fn validate(&self) -> Result<(), RoutingError> {
        if self.stops.is_empty() {
            return Err(RoutingError::EmptyRoute {
                route_id: self.route_id.clone(),
                direction: self.direction,
            });
        }
        for stop in &self.stops {
            let (lat, lon) = stop.position;
            if !(-90.0..=90.0).contains(&lat) || !(-180.0..=180.0).contains(&lon) {
                return Err(RoutingError::CoordinateOutOfRange {
                    stop_id: stop.id.clone(),
                    lat,
                    lon,
                });
            }
        }
        Ok(())
    }
}

/// Geometry for one segment: either a non-empty road-following path or an
/// explicit miss. Never partially populated.
#[derive(Debug, Clone, PartialEq)]
pub enum GeometryResult {
    Path(Vec<Coord>),
    Unavailable,
}

impl GeometryResult {
    pub fn is_available(&self) -> bool {
        matches!(self, GeometryResult::Path(_))
    }
}

#[cfg(test)]
pub(crate) fn test_stop(id: &str, lat: f64, lon: f64) -> Stop {
    Stop {
        id: id.to_string(),
        name: id.to_string(),
        address: None,
        position: (lat, lon),
    }
}
