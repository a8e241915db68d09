use crate::models::coordinate::Coordinate;
use crate::models::space::Space;
use crate::services::distance_service::distance_km;

pub const LOCATION_ADVISORY: &str = "Location permission denied. Showing all spaces.";

/// Annotates every space with its distance from `observer` and sorts ascending.
///
/// Ties keep their input order. Without an observer the input order is kept and any
/// distance from an earlier ranking is cleared, since it belonged to another position.
pub fn rank_by_proximity(spaces: &[Space], observer: Option<Coordinate>) -> Vec<Space> {
    let mut ranked: Vec<Space> = spaces
        .iter()
        .cloned()
        .map(|mut space| {
            space.distance = observer.map(|origin| distance_km(origin, space.coordinates));
            space
        })
        .collect();

    if observer.is_some() {
        // sort_by is stable
        ranked.sort_by(|a, b| {
            a.distance
                .unwrap_or(f64::MAX)
                .total_cmp(&b.distance.unwrap_or(f64::MAX))
        });
    }

    ranked
}
