//! Render model handed to the map layer: one marker per stop, one polyline
//! per segment, plus GeoJSON output for tools that consume it directly.

use crate::sdk::routing::assemble::{assemble, Polyline};
use crate::sdk::routing::route::{Coord, GeometryResult, RouteDirection};
use geojson::{Feature, FeatureCollection, Geometry, JsonObject, Value};

#[derive(Debug, Clone, PartialEq)]
pub struct Marker {
    pub name: String,
    pub position: Coord,
}

#[derive(Debug, Clone, PartialEq)]
pub struct RouteMap {
    pub markers: Vec<Marker>,
    pub polylines: Vec<Polyline>,
}

pub fn build_route_map(route: &RouteDirection, results: &[GeometryResult]) -> RouteMap {
    let markers = route
        .stops
        .iter()
        .map(|stop| Marker {
            name: stop.name.clone(),
            position: stop.position,
        })
        .collect();
    RouteMap {
        markers,
        polylines: assemble(route, results),
    }
}

// GeoJSON positions are (lon, lat), the reverse of our internal order.
fn geojson_position((lat, lon): Coord) -> Vec<f64> {
    vec![lon, lat]
}

impl RouteMap {
    pub fn to_geojson(&self) -> FeatureCollection {
        let mut features = Vec::with_capacity(self.markers.len() + self.polylines.len());

        for marker in &self.markers {
            let mut properties = JsonObject::new();
            properties.insert("name".to_string(), marker.name.clone().into());
            features.push(Feature {
                bbox: None,
                geometry: Some(Geometry::new(Value::Point(geojson_position(
                    marker.position,
                )))),
                id: None,
                properties: Some(properties),
                foreign_members: None,
            });
        }

        for polyline in &self.polylines {
            let line = polyline.iter().copied().map(geojson_position).collect();
            features.push(Feature {
                bbox: None,
                geometry: Some(Geometry::new(Value::LineString(line))),
                id: None,
                properties: None,
                foreign_members: None,
            });
        }

        FeatureCollection {
            bbox: None,
            features,
            foreign_members: None,
        }
    }
}
