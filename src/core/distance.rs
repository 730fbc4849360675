use crate::models::{BoundingBox, GeoPoint};

/// Earth's radius in kilometers
const EARTH_RADIUS_KM: f64 = 6371.0;

/// Kilometers to statute miles
pub const KM_TO_MILES: f64 = 0.621371;

/// Great-circle distance in kilometers on a sphere of radius 6371 km.
///
/// `a = sin²(Δφ/2) + cos φ1 · cos φ2 · sin²(Δλ/2)`, `d = 2R · atan2(√a, √(1−a))`.
/// Arguments are (latitude, longitude) pairs in degrees.
#[inline]
pub fn haversine_distance(lat1: f64, lon1: f64, lat2: f64, lon2: f64) -> f64 {
    let phi1 = lat1.to_radians();
    let phi2 = lat2.to_radians();
    let half_dphi = (lat2 - lat1).to_radians() / 2.0;
    let half_dlambda = (lon2 - lon1).to_radians() / 2.0;

    let a = half_dphi.sin().powi(2) + phi1.cos() * phi2.cos() * half_dlambda.sin().powi(2);

    2.0 * EARTH_RADIUS_KM * a.sqrt().atan2((1.0 - a).sqrt())
}

/// Great-circle distance between two points in miles
#[inline]
pub fn distance_miles(from: GeoPoint, to: GeoPoint) -> f64 {
    km_to_miles(haversine_distance(
        from.latitude,
        from.longitude,
        to.latitude,
        to.longitude,
    ))
}

#[inline]
pub fn km_to_miles(km: f64) -> f64 {
    km * KM_TO_MILES
}

#[inline]
pub fn miles_to_km(miles: f64) -> f64 {
    miles / KM_TO_MILES
}

/// Calculate a bounding box around a center point
///
/// Used as a coarse SQL pre-filter ahead of the exact Haversine check, so it
/// must contain every point within `radius_km`. The latitude half-width uses
/// 111 km per degree, slightly under the true 111.19. The longitude
/// half-width is the spherical one, `asin(sin(d) / cos(lat))` with `d` the
/// angular radius, which is wider than `d / cos(lat)` away from the equator.
/// The radius is padded by 1% to absorb rounding.
///
/// # Arguments
/// * `lat` - Center latitude in degrees
/// * `lon` - Center longitude in degrees
/// * `radius_km` - Radius in kilometers
pub fn calculate_bounding_box(lat: f64, lon: f64, radius_km: f64) -> BoundingBox {
    let padded = radius_km * 1.01;
    let angular = padded / EARTH_RADIUS_KM;

    let lat_delta = padded / 111.0;

    // A circle reaching a pole, or wider than the parallel, spans every longitude
    let cos_lat = lat.to_radians().cos().abs();
    let reaches_pole = lat.abs() + lat_delta >= 90.0;
    let lon_delta = if reaches_pole || angular >= std::f64::consts::FRAC_PI_2 || angular.sin() >= cos_lat {
        180.0
    } else {
        (angular.sin() / cos_lat).asin().to_degrees().min(180.0)
    };

    BoundingBox {
        min_lat: (lat - lat_delta).max(-90.0),
        max_lat: (lat + lat_delta).min(90.0),
        min_lon: lon - lon_delta,
        max_lon: lon + lon_delta,
    }
}

/// Inclusive containment test for the pre-filter box
#[inline]
pub fn is_within_bounding_box(lat: f64, lon: f64, bbox: &BoundingBox) -> bool {
    lat >= bbox.min_lat
        && lat <= bbox.max_lat
        && lon >= bbox.min_lon
        && lon <= bbox.max_lon
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_haversine_seattle_portland() {
        // Seattle to Portland is roughly 234 km
        let distance = haversine_distance(47.6062, -122.3321, 45.5152, -122.6784);
        assert!((distance - 234.0).abs() < 5.0, "expected ~234km, got {}", distance);
    }

    #[test]
    fn test_haversine_matches_closed_form() {
        // One degree of latitude along a meridian is R * pi / 180
        let expected = EARTH_RADIUS_KM * std::f64::consts::PI / 180.0;
        let distance = haversine_distance(10.0, 20.0, 11.0, 20.0);
        assert!((distance - expected).abs() < 1e-9);
    }

    #[test]
    fn test_miles_conversion() {
        assert!((km_to_miles(100.0) - 62.1371).abs() < 1e-9);
        assert!((miles_to_km(km_to_miles(42.0)) - 42.0).abs() < 1e-9);
    }

    #[test]
    fn test_bounding_box_spans_radius() {
        let bbox = calculate_bounding_box(-33.8688, 151.2093, 25.0);

        assert!(is_within_bounding_box(-33.8688, 151.2093, &bbox));
        // ~50km across plus padding is a bit under half a degree of latitude
        let lat_span = bbox.max_lat - bbox.min_lat;
        assert!(lat_span > 0.45 && lat_span < 0.46, "lat span {}", lat_span);
        assert!(bbox.max_lon - bbox.min_lon > lat_span);
    }

    #[test]
    fn test_bounding_box_keeps_points_on_the_radius() {
        // A point exactly 50km due north must survive the pre-filter
        let center = (45.0, 7.0);
        let north_lat = center.0 + 50.0 / (EARTH_RADIUS_KM * std::f64::consts::PI / 180.0);
        assert!(haversine_distance(center.0, center.1, north_lat, center.1) <= 50.0 + 1e-6);

        let bbox = calculate_bounding_box(center.0, center.1, 50.0);
        assert!(is_within_bounding_box(north_lat, center.1, &bbox));
    }

    #[test]
    fn test_bounding_box_clamps_at_pole() {
        let bbox = calculate_bounding_box(89.9, 0.0, 100.0);
        assert_eq!(bbox.max_lat, 90.0);
        assert!(is_within_bounding_box(89.95, 170.0, &bbox));
        assert!(!is_within_bounding_box(80.0, 0.0, &bbox));
    }

    /// Point `distance_km` from the center along `bearing_deg`, longitude unwrapped
    fn destination(lat: f64, lon: f64, bearing_deg: f64, distance_km: f64) -> (f64, f64) {
        let phi1 = lat.to_radians();
        let theta = bearing_deg.to_radians();
        let delta = distance_km / EARTH_RADIUS_KM;

        let phi2 = (phi1.sin() * delta.cos() + phi1.cos() * delta.sin() * theta.cos()).asin();
        let dlambda = (theta.sin() * delta.sin() * phi1.cos())
            .atan2(delta.cos() - phi1.sin() * phi2.sin());

        (phi2.to_degrees(), lon + dlambda.to_degrees())
    }

    /// Box membership with room for rounding on points exactly at the edge
    fn inside(lat: f64, lon: f64, bbox: &BoundingBox) -> bool {
        const EPS: f64 = 1e-9;
        lat >= bbox.min_lat - EPS
            && lat <= bbox.max_lat + EPS
            && lon >= bbox.min_lon - EPS
            && lon <= bbox.max_lon + EPS
    }

    #[test]
    fn test_bounding_box_contains_radius_circle() {
        for lat in (0..=85).step_by(5).map(f64::from) {
            for radius_miles in [10.0, 100.0, 500.0, 1000.0, 1500.0, 2000.0] {
                let radius_km = miles_to_km(radius_miles);
                let bbox = calculate_bounding_box(lat, 10.0, radius_km);

                // Just inside the circle, all the way round
                for bearing in (0..360).step_by(5).map(f64::from) {
                    let (p_lat, p_lon) = destination(lat, 10.0, bearing, radius_km * 0.999);
                    assert!(
                        inside(p_lat, p_lon, &bbox),
                        "lat={} radius={}mi bearing={} point=({}, {}) bbox={:?}",
                        lat, radius_miles, bearing, p_lat, p_lon, bbox
                    );
                }

                // The circle's widest point, east and west
                let delta = radius_km * 0.999 / EARTH_RADIUS_KM;
                let cos_lat = lat.to_radians().cos();
                if delta.sin() < cos_lat {
                    let t_lat = (lat.to_radians().sin() / delta.cos()).asin().to_degrees();
                    let t_dlon = (delta.sin() / cos_lat).asin().to_degrees();
                    assert!(haversine_distance(lat, 10.0, t_lat, 10.0 + t_dlon) <= radius_km);
                    assert!(is_within_bounding_box(t_lat, 10.0 + t_dlon, &bbox));
                    assert!(is_within_bounding_box(t_lat, 10.0 - t_dlon, &bbox));
                }
            }
        }
    }
}
