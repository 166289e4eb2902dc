use super::route::{Coord, GeometryResult, RouteDirection};

pub type Polyline = Vec<Coord>;

/// Stitches per-segment geometry into drawable polylines, one per segment.
/// A missing geometry becomes the straight line between the segment's
/// endpoints, so degraded segments stay visible instead of leaving a gap.
pub fn assemble(route: &RouteDirection, results: &[GeometryResult]) -> Vec<Polyline> {
    route
        .segments()
        .zip(results)
        .map(|(segment, result)| match result {
            GeometryResult::Path(points) => points.clone(),
            GeometryResult::Unavailable => {
                vec![segment.origin.position, segment.destination.position]
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sdk::routing::route::{test_stop, Direction, Stop};

    fn route(stops: Vec<Stop>) -> RouteDirection {
        RouteDirection {
            route_id: "HSZ0001".to_string(),
            route_name: "Test route".to_string(),
            direction: Direction::Outbound,
            stops,
        }
    }

    fn abc() -> RouteDirection {
        route(vec![
            test_stop("A", 24.80, 121.00),
            test_stop("B", 24.81, 121.02),
            test_stop("C", 24.82, 121.05),
        ])
    }

    #[test]
    fn output_length_equals_segment_count_all_success() {
        let rd = abc();
        let results = vec![
            GeometryResult::Path(vec![(24.80, 121.00), (24.805, 121.01), (24.81, 121.02)]),
            GeometryResult::Path(vec![(24.81, 121.02), (24.82, 121.05)]),
        ];
        let polylines = assemble(&rd, &results);
        assert_eq!(polylines.len(), rd.segment_count());
        assert_eq!(polylines[0].len(), 3);
    }

    #[test]
    fn output_length_equals_segment_count_all_fallback() {
        let rd = abc();
        let results = vec![GeometryResult::Unavailable, GeometryResult::Unavailable];
        let polylines = assemble(&rd, &results);
        assert_eq!(polylines.len(), 2);
        assert_eq!(polylines[0], vec![(24.80, 121.00), (24.81, 121.02)]);
        assert_eq!(polylines[1], vec![(24.81, 121.02), (24.82, 121.05)]);
    }

    #[test]
    fn mixed_batch_keeps_geometry_and_falls_back_per_segment() {
        // A->B has geometry, B->C timed out upstream.
        let rd = abc();
        let detour = vec![(24.80, 121.00), (24.803, 121.013), (24.81, 121.02)];
        let results = vec![
            GeometryResult::Path(detour.clone()),
            GeometryResult::Unavailable,
        ];
        let polylines = assemble(&rd, &results);
        assert_eq!(polylines.len(), 2);
        assert_eq!(polylines[0], detour);
        assert_eq!(polylines[1], vec![(24.81, 121.02), (24.82, 121.05)]);
    }

    #[test]
    fn single_stop_route_assembles_to_nothing() {
        let rd = route(vec![test_stop("A", 24.80, 121.00)]);
        let polylines = assemble(&rd, &[]);
        assert!(polylines.is_empty());
    }
}
