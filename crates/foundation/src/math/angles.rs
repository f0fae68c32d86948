/// Latitude limit (degrees). Orientation latitude is hard-clamped here to
/// keep the view away from the pole singularities.
pub const LAT_LIMIT_DEG: f64 = 85.0;

pub fn to_radians(deg: f64) -> f64 {
    deg * (std::f64::consts::PI / 180.0)
}

pub fn to_degrees(rad: f64) -> f64 {
    rad * (180.0 / std::f64::consts::PI)
}

/// Clamps a latitude into `[-LAT_LIMIT_DEG, LAT_LIMIT_DEG]`.
pub fn clamp_latitude(lat_deg: f64) -> f64 {
    lat_deg.clamp(-LAT_LIMIT_DEG, LAT_LIMIT_DEG)
}

/// Wraps a longitude into the canonical `(-180, 180]` range.
///
/// This is a single ±360 adjustment, not a full modulo reduction: callers
/// must pass values within ±360 of the canonical range. Per-event and
/// per-frame deltas are far below that.
pub fn normalize_longitude(lon_deg: f64) -> f64 {
    if lon_deg > 180.0 {
        lon_deg - 360.0
    } else if lon_deg < -180.0 {
        lon_deg + 360.0
    } else {
        lon_deg
    }
}

#[cfg(test)]
mod tests {
    use super::{LAT_LIMIT_DEG, clamp_latitude, normalize_longitude, to_degrees, to_radians};

    fn assert_close(a: f64, b: f64, eps: f64) {
        let diff = (a - b).abs();
        assert!(diff <= eps, "expected {a} ~= {b} (diff {diff})");
    }

    #[test]
    fn degree_radian_round_trip() {
        assert_close(to_radians(180.0), std::f64::consts::PI, 1e-12);
        assert_close(to_degrees(std::f64::consts::FRAC_PI_2), 90.0, 1e-12);
        assert_close(to_degrees(to_radians(-37.5)), -37.5, 1e-12);
    }

    #[test]
    fn latitude_clamps_into_limit() {
        assert_eq!(clamp_latitude(90.0), LAT_LIMIT_DEG);
        assert_eq!(clamp_latitude(-123.4), -LAT_LIMIT_DEG);
        assert_eq!(clamp_latitude(12.0), 12.0);
    }

    #[test]
    fn latitude_clamp_is_idempotent() {
        for lat in [-500.0, -85.0, -12.3, 0.0, 84.999, 85.0, 86.0, 1e9] {
            let once = clamp_latitude(lat);
            assert_eq!(clamp_latitude(once), once);
            assert!((-LAT_LIMIT_DEG..=LAT_LIMIT_DEG).contains(&once));
        }
    }

    #[test]
    fn longitude_wraps_into_half_open_range() {
        for lon in [-539.9, -350.0, -180.1, -180.0, 0.0, 179.9, 180.0, 181.0, 359.0, 539.9] {
            let wrapped = normalize_longitude(lon);
            assert!(
                wrapped > -180.0 && wrapped <= 180.0,
                "lon {lon} wrapped to {wrapped}"
            );
        }
        assert_eq!(normalize_longitude(190.0), -170.0);
        assert_eq!(normalize_longitude(-190.0), 170.0);
        assert_eq!(normalize_longitude(180.0), 180.0);
    }
}
