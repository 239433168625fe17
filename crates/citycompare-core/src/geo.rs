// crates/citycompare-core/src/geo.rs

//! Stateless numeric helpers: great-circle distance and unit conversions.

use crate::model::{BoundingBox, Coordinates};

/// Mean Earth radius used by the haversine formula (kilometers).
pub const EARTH_RADIUS_KM: f64 = 6371.0;
/// Statute miles per kilometer.
pub const MILES_PER_KM: f64 = 0.621371;
/// Square miles per square kilometer.
pub const SQ_MILES_PER_SQ_KM: f64 = 0.386102;
/// Kilometers per degree of latitude, as used for the bounding-box estimate.
pub const KM_PER_DEGREE: f64 = 111.0;

/// Haversine great-circle distance in kilometers.
pub fn haversine_km(a: Coordinates, b: Coordinates) -> f64 {
    let d_lat = (b.lat() - a.lat()).to_radians();
    let d_lon = (b.lon() - a.lon()).to_radians();
    let h = (d_lat / 2.0).sin().powi(2)
        + a.lat().to_radians().cos() * b.lat().to_radians().cos() * (d_lon / 2.0).sin().powi(2);
    // Rounding can push `h` a hair above 1 for antipodal points.
    let h = h.clamp(0.0, 1.0);
    2.0 * EARTH_RADIUS_KM * h.sqrt().atan2((1.0 - h).sqrt())
}

pub fn km_to_miles(km: f64) -> f64 {
    km * MILES_PER_KM
}

pub fn miles_to_km(miles: f64) -> f64 {
    miles / MILES_PER_KM
}

pub fn sq_km_to_sq_miles(sq_km: f64) -> f64 {
    sq_km * SQ_MILES_PER_SQ_KM
}

pub fn sq_miles_to_sq_km(sq_miles: f64) -> f64 {
    sq_miles / SQ_MILES_PER_SQ_KM
}

pub fn celsius_to_fahrenheit(c: f64) -> f64 {
    c * 9.0 / 5.0 + 32.0
}

/// Approximate area of a bounding box in km², rounded to the nearest integer.
///
/// Degrees are scaled by [`KM_PER_DEGREE`] on both axes and the longitude
/// span is shrunk by `cos(lat)` at the record's latitude.
pub fn bbox_area_sq_km(bbox: &BoundingBox, lat: f64) -> f64 {
    let width = (bbox.east - bbox.west).abs();
    let height = (bbox.north - bbox.south).abs();
    let area = width * height * KM_PER_DEGREE * KM_PER_DEGREE * lat.to_radians().cos();
    area.max(0.0).round()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assert_close(a: f64, b: f64, eps: f64) {
        let diff = (a - b).abs();
        assert!(diff <= eps, "expected {a} ~= {b} (diff {diff})");
    }

    fn at(lat: f64, lon: f64) -> Coordinates {
        Coordinates::new(lat, lon).unwrap()
    }

    #[test]
    fn quarter_equator() {
        assert_close(haversine_km(at(0.0, 0.0), at(0.0, 90.0)), 10007.54, 0.01);
    }

    #[test]
    fn distance_is_symmetric_and_zero_on_self() {
        let berlin = at(52.52, 13.405);
        let tokyo = at(35.6762, 139.6503);
        assert_close(haversine_km(berlin, tokyo), haversine_km(tokyo, berlin), 1e-9);
        assert_eq!(haversine_km(berlin, berlin), 0.0);
    }

    #[test]
    fn antipodes_do_not_nan() {
        let d = haversine_km(at(0.0, 0.0), at(0.0, 180.0));
        assert!(d.is_finite());
        assert_close(d, std::f64::consts::PI * EARTH_RADIUS_KM, 0.01);
    }

    #[test]
    fn conversions_round_trip() {
        for km in [0.0, 1.0, 1000.0, 12_345.678] {
            assert_close(miles_to_km(km_to_miles(km)), km, 1e-9);
            assert_close(sq_miles_to_sq_km(sq_km_to_sq_miles(km)), km, 1e-9);
        }
        assert_close(km_to_miles(1000.0), 621.371, 1e-9);
        assert_close(celsius_to_fahrenheit(100.0), 212.0, 1e-12);
        assert_close(celsius_to_fahrenheit(-40.0), -40.0, 1e-12);
    }

    #[test]
    fn bbox_area_at_equator_and_latitude() {
        let bbox = BoundingBox {
            south: 0.0,
            north: 0.1,
            west: 0.0,
            east: 0.1,
        };
        assert_eq!(bbox_area_sq_km(&bbox, 0.0), 123.0);
        assert_eq!(bbox_area_sq_km(&bbox, 60.0), 62.0);

        // Swapped edges yield the same magnitude.
        let swapped = BoundingBox {
            south: 0.1,
            north: 0.0,
            west: 0.1,
            east: 0.0,
        };
        assert_eq!(bbox_area_sq_km(&swapped, 0.0), 123.0);
    }
}
