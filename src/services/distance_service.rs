//! Great-circle distance between two coordinates.

use crate::models::coordinate::Coordinate;

/// Mean Earth radius
pub const EARTH_RADIUS_KM: f64 = 6371.0;

/// Haversine distance in kilometres. Inputs are degrees.
pub fn distance_km(from: Coordinate, to: Coordinate) -> f64 {
    let lat1_rad = from.latitude.to_radians();
    let lat2_rad = to.latitude.to_radians();
    let delta_lat = (to.latitude - from.latitude).to_radians();
    let delta_lng = (to.longitude - from.longitude).to_radians();

    let a = (delta_lat / 2.0).sin().powi(2)
        + lat1_rad.cos() * lat2_rad.cos() * (delta_lng / 2.0).sin().powi(2);
    let c = 2.0 * a.sqrt().atan2((1.0 - a).sqrt());

    EARTH_RADIUS_KM * c
}

#[cfg(test)]
mod tests {
    use super::*;

    const CHENNAI: Coordinate = Coordinate {
        latitude: 13.0827,
        longitude: 80.2707,
    };
    const T_NAGAR: Coordinate = Coordinate {
        latitude: 13.0418,
        longitude: 80.2341,
    };

    #[test]
    fn test_same_point_is_zero() {
        assert_eq!(distance_km(CHENNAI, CHENNAI), 0.0);
        assert_eq!(distance_km(T_NAGAR, T_NAGAR), 0.0);
    }

    #[test]
    fn test_distance_is_symmetric() {
        let points = [
            CHENNAI,
            T_NAGAR,
            Coordinate::new(19.0760, 72.8777),
            Coordinate::new(-33.8688, 151.2093),
            Coordinate::new(51.5074, -0.1278),
            Coordinate::new(90.0, 0.0),
        ];
        for a in points {
            for b in points {
                let there = distance_km(a, b);
                let back = distance_km(b, a);
                assert!((there - back).abs() < 1e-9, "{:?} {:?}", a, b);
                assert!(there >= 0.0);
            }
        }
    }

    #[test]
    fn test_chennai_to_t_nagar() {
        let d = distance_km(CHENNAI, T_NAGAR);
        assert!(d > 5.0 && d < 7.0, "got {}", d);
    }

    #[test]
    fn test_chennai_to_mumbai() {
        let d = distance_km(CHENNAI, Coordinate::new(19.0760, 72.8777));
        assert!((d - 1030.0).abs() < 15.0, "got {}", d);
    }

    #[test]
    fn test_antipodes_is_half_circumference() {
        let d = distance_km(Coordinate::new(0.0, 0.0), Coordinate::new(0.0, 180.0));
        assert!((d - std::f64::consts::PI * EARTH_RADIUS_KM).abs() < 1e-6);
    }
}
