use geojson::Geometry;
use serde::Deserialize;

/// Trip service response. `waypoints` stays in input order; each entry's
/// `waypoint_index` is that point's position in the optimized round trip.
#[derive(Debug, Deserialize)]
pub struct TripResponse {
    pub code: String,

    #[serde(default)]
    pub trips: Vec<Trip>,

    #[serde(default)]
    pub waypoints: Vec<TripWaypoint>,
}

impl TripResponse {
    /// Visiting rank of each input point, in input order.
    pub fn visit_ranks(&self) -> Vec<usize> {
        self.waypoints
            .iter()
            .map(|waypoint| waypoint.waypoint_index)
            .collect()
    }
}

#[derive(Debug, Deserialize)]
pub struct Trip {
    /// Meters.
    pub distance: f64,

    /// Seconds.
    pub duration: f64,

    pub geometry: Geometry,
}

#[derive(Debug, Deserialize)]
pub struct TripWaypoint {
    pub waypoint_index: usize,

    #[serde(default)]
    pub trips_index: usize,

    /// Snapped `[lon, lat]`.
    pub location: [f64; 2],

    #[serde(default)]
    pub name: String,

    #[serde(default)]
    pub distance: f64,
}
