use crate::sdk::routing::route::Coord;
use serde::Deserialize;

// --- Data structures for parsing OSRM route responses ---

#[derive(Deserialize)]
pub struct RouteResponse {
    pub code: String,
    #[serde(default)]
    pub routes: Vec<Route>,
}

#[derive(Deserialize)]
pub struct Route {
    pub geometry: Geometry,
}

#[derive(Deserialize)]
pub struct Geometry {
    // Wire order is (lon, lat) per the GeoJSON convention.
    pub coordinates: Vec<[f64; 2]>,
}

impl Geometry {
    /// Flips the wire (lon, lat) pairs into internal (lat, lon) order.
    pub fn into_lat_lon(self) -> Vec<Coord> {
        self.coordinates
            .into_iter()
            .map(|[lon, lat]| (lat, lon))
            .collect()
    }
}
