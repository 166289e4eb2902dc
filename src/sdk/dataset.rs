//! Loads the two TDX-format JSON files (city bus stops and stop-of-route
//! records) and joins them into coordinate-resolved `RouteDirection` values.
//! The stop index is built once at load time and is read-only afterward.

use crate::sdk::routing::route::{Direction, RouteDirection, RouteDirectionKey, Stop};
use serde::Deserialize;
use std::collections::HashMap;
use std::fs;
use std::path::Path;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum DatasetError {
    #[error("failed to read {path}: {source}")]
    Io {
        path: String,
        source: std::io::Error,
    },

    #[error("failed to parse {path}: {source}")]
    Json {
        path: String,
        source: serde_json::Error,
    },

    #[error("route {route_id} references unknown stop {stop_id}")]
    UnknownStop { route_id: String, stop_id: String },

    #[error("route {route_id} has invalid direction flag {flag}")]
    InvalidDirection { route_id: String, flag: u8 },

    #[error("no route {route_id} with direction {direction}")]
    UnknownRoute {
        route_id: String,
        direction: Direction,
    },
}

// --- TDX wire records ---

#[derive(Deserialize)]
struct LocalizedName {
    #[serde(rename = "Zh_tw")]
    zh_tw: String,
}

#[derive(Deserialize)]
struct StopPosition {
    #[serde(rename = "PositionLat")]
    lat: f64,
    #[serde(rename = "PositionLon")]
    lon: f64,
}

#[derive(Deserialize)]
struct StopRecord {
    #[serde(rename = "StopUID")]
    stop_uid: String,
    #[serde(rename = "StopName")]
    stop_name: LocalizedName,
    #[serde(rename = "StopAddress", default)]
    stop_address: Option<String>,
    #[serde(rename = "StopPosition")]
    stop_position: StopPosition,
}

#[derive(Deserialize)]
struct RouteStopRecord {
    #[serde(rename = "StopUID")]
    stop_uid: String,
    #[serde(rename = "StopSequence", default)]
    sequence: u32,
}

#[derive(Deserialize)]
struct RouteRecord {
    #[serde(rename = "RouteUID")]
    route_uid: String,
    #[serde(rename = "RouteName")]
    route_name: LocalizedName,
    #[serde(rename = "Direction")]
    direction: u8,
    #[serde(rename = "Stops")]
    stops: Vec<RouteStopRecord>,
}

/// Read-only StopUID -> Stop mapping, built once at load time.
pub struct StopIndex {
    stops: HashMap<String, Stop>,
}

impl StopIndex {
    pub fn get(&self, stop_uid: &str) -> Option<&Stop> {
        self.stops.get(stop_uid)
    }

    pub fn len(&self) -> usize {
        self.stops.len()
    }

    pub fn is_empty(&self) -> bool {
        self.stops.is_empty()
    }
}

fn stops_from_str(data: &str) -> Result<StopIndex, serde_json::Error> {
    let records: Vec<StopRecord> = serde_json::from_str(data)?;
    let stops = records
        .into_iter()
        .map(|r| {
            let stop = Stop {
                id: r.stop_uid.clone(),
                name: r.stop_name.zh_tw,
                address: r.stop_address,
                position: (r.stop_position.lat, r.stop_position.lon),
            };
            (r.stop_uid, stop)
        })
        .collect();
    Ok(StopIndex { stops })
}

pub fn load_stops<P: AsRef<Path>>(path: P) -> Result<StopIndex, DatasetError> {
    let path_str = path.as_ref().display().to_string();
    let data = fs::read_to_string(&path).map_err(|source| DatasetError::Io {
        path: path_str.clone(),
        source,
    })?;
    stops_from_str(&data).map_err(|source| DatasetError::Json {
        path: path_str,
        source,
    })
}

/// Joined routes, keyed by (route, direction).
pub struct RouteTable {
    routes: HashMap<RouteDirectionKey, RouteDirection>,
}

impl RouteTable {
    pub fn get(
        &self,
        route_id: &str,
        direction: Direction,
    ) -> Result<&RouteDirection, DatasetError> {
        let key = RouteDirectionKey {
            route_id: route_id.to_string(),
            direction,
        };
        self.routes.get(&key).ok_or(DatasetError::UnknownRoute {
            route_id: route_id.to_string(),
            direction,
        })
    }

    /// Available (route, direction) selections, sorted for stable display.
    pub fn selections(&self) -> Vec<&RouteDirectionKey> {
        let mut keys: Vec<_> = self.routes.keys().collect();
        keys.sort_by(|a, b| {
            a.route_id
                .cmp(&b.route_id)
                .then(a.direction.flag().cmp(&b.direction.flag()))
        });
        keys
    }

    pub fn len(&self) -> usize {
        self.routes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.routes.is_empty()
    }
}

fn routes_from_str(data: &str, index: &StopIndex) -> Result<RouteTable, RoutesFromStrError> {
    let records: Vec<RouteRecord> =
        serde_json::from_str(data).map_err(RoutesFromStrError::Json)?;

    let mut routes = HashMap::new();
    for record in records {
        let direction = Direction::from_flag(record.direction).ok_or_else(|| {
            RoutesFromStrError::Dataset(DatasetError::InvalidDirection {
                route_id: record.route_uid.clone(),
                flag: record.direction,
            })
        })?;

        let mut route_stops = record.stops;
        route_stops.sort_by_key(|s| s.sequence);

        let mut stops = Vec::with_capacity(route_stops.len());
        for route_stop in &route_stops {
            let stop = index.get(&route_stop.stop_uid).ok_or_else(|| {
                RoutesFromStrError::Dataset(DatasetError::UnknownStop {
                    route_id: record.route_uid.clone(),
                    stop_id: route_stop.stop_uid.clone(),
                })
            })?;
            stops.push(stop.clone());
        }

        let key = RouteDirectionKey {
            route_id: record.route_uid.clone(),
            direction,
        };
        routes.insert(
            key,
            RouteDirection {
                route_id: record.route_uid,
                route_name: record.route_name.zh_tw,
                direction,
                stops,
            },
        );
    }
    Ok(RouteTable { routes })
}

enum RoutesFromStrError {
    Json(serde_json::Error),
    Dataset(DatasetError),
}

pub fn load_routes<P: AsRef<Path>>(path: P, index: &StopIndex) -> Result<RouteTable, DatasetError> {
    let path_str = path.as_ref().display().to_string();
    let data = fs::read_to_string(&path).map_err(|source| DatasetError::Io {
        path: path_str.clone(),
        source,
    })?;
    routes_from_str(&data, index).map_err(|e| match e {
        RoutesFromStrError::Json(source) => DatasetError::Json {
            path: path_str,
            source,
        },
        RoutesFromStrError::Dataset(e) => e,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    const STOPS_JSON: &str = r#"[
        {"StopUID": "HSZ1", "StopID": "1", "StopName": {"Zh_tw": "竹北車站"},
         "StopAddress": "竹北市東興路",
         "StopPosition": {"PositionLat": 24.80, "PositionLon": 121.00}},
        {"StopUID": "HSZ2", "StopID": "2", "StopName": {"Zh_tw": "縣政府"},
         "StopPosition": {"PositionLat": 24.81, "PositionLon": 121.02}},
        {"StopUID": "HSZ3", "StopID": "3", "StopName": {"Zh_tw": "高鐵新竹站"},
         "StopPosition": {"PositionLat": 24.82, "PositionLon": 121.05}}
    ]"#;

    const ROUTES_JSON: &str = r#"[
        {"RouteUID": "HSZ0187", "RouteName": {"Zh_tw": "183"}, "Direction": 0,
         "Stops": [
            {"StopUID": "HSZ3", "StopSequence": 3},
            {"StopUID": "HSZ1", "StopSequence": 1},
            {"StopUID": "HSZ2", "StopSequence": 2}
         ]},
        {"RouteUID": "HSZ0187", "RouteName": {"Zh_tw": "183"}, "Direction": 1,
         "Stops": [
            {"StopUID": "HSZ3", "StopSequence": 1},
            {"StopUID": "HSZ2", "StopSequence": 2},
            {"StopUID": "HSZ1", "StopSequence": 3}
         ]}
    ]"#;

    #[test]
    fn parses_stops_with_optional_address() {
        let index = stops_from_str(STOPS_JSON).unwrap();
        assert_eq!(index.len(), 3);

        let station = index.get("HSZ1").unwrap();
        assert_eq!(station.name, "竹北車站");
        assert_eq!(station.address.as_deref(), Some("竹北市東興路"));
        assert_eq!(station.position, (24.80, 121.00));

        let hall = index.get("HSZ2").unwrap();
        assert!(hall.address.is_none());
    }

    #[test]
    fn joins_routes_and_orders_stops_by_sequence() {
        let index = stops_from_str(STOPS_JSON).unwrap();
        let table = routes_from_str(ROUTES_JSON, &index)
            .map_err(|_| ())
            .unwrap();
        assert_eq!(table.len(), 2);

        let outbound = table.get("HSZ0187", Direction::Outbound).unwrap();
        let ids: Vec<_> = outbound.stops.iter().map(|s| s.id.as_str()).collect();
        assert_eq!(ids, vec!["HSZ1", "HSZ2", "HSZ3"]);

        let inbound = table.get("HSZ0187", Direction::Inbound).unwrap();
        let ids: Vec<_> = inbound.stops.iter().map(|s| s.id.as_str()).collect();
        assert_eq!(ids, vec!["HSZ3", "HSZ2", "HSZ1"]);
    }

    #[test]
    fn unknown_stop_reference_is_an_error() {
        let index = stops_from_str(STOPS_JSON).unwrap();
        let bad = r#"[
            {"RouteUID": "HSZ0001", "RouteName": {"Zh_tw": "X"}, "Direction": 0,
             "Stops": [{"StopUID": "HSZ9", "StopSequence": 1}]}
        ]"#;
        match routes_from_str(bad, &index) {
            Err(RoutesFromStrError::Dataset(DatasetError::UnknownStop {
                route_id,
                stop_id,
            })) => {
                assert_eq!(route_id, "HSZ0001");
                assert_eq!(stop_id, "HSZ9");
            }
            _ => panic!("expected UnknownStop"),
        }
    }

    #[test]
    fn invalid_direction_flag_is_an_error() {
        let index = stops_from_str(STOPS_JSON).unwrap();
        let bad = r#"[
            {"RouteUID": "HSZ0001", "RouteName": {"Zh_tw": "X"}, "Direction": 2,
             "Stops": [{"StopUID": "HSZ1", "StopSequence": 1}]}
        ]"#;
        assert!(matches!(
            routes_from_str(bad, &index),
            Err(RoutesFromStrError::Dataset(
                DatasetError::InvalidDirection { flag: 2, .. }
            ))
        ));
    }

    #[test]
    fn missing_selection_is_an_unknown_route() {
        let index = stops_from_str(STOPS_JSON).unwrap();
        let table = routes_from_str(ROUTES_JSON, &index)
            .map_err(|_| ())
            .unwrap();
        assert!(matches!(
            table.get("HSZ9999", Direction::Outbound),
            Err(DatasetError::UnknownRoute { .. })
        ));
    }

    #[test]
    fn selections_are_sorted() {
        let index = stops_from_str(STOPS_JSON).unwrap();
        let table = routes_from_str(ROUTES_JSON, &index)
            .map_err(|_| ())
            .unwrap();
        let keys = table.selections();
        assert_eq!(keys.len(), 2);
        assert_eq!(keys[0].direction, Direction::Outbound);
        assert_eq!(keys[1].direction, Direction::Inbound);
    }
}
