use crate::config::Config;

/// Applies a wheel/pinch delta to the camera distance.
///
/// Out-of-range results are clamped, never rejected.
pub fn apply_zoom(distance: f64, delta: f64, cfg: &Config) -> f64 {
    (distance + delta * cfg.zoom_sensitivity).clamp(cfg.min_zoom, cfg.max_zoom)
}

/// Uniform scale factor for every marker billboard at this camera distance.
///
/// Markers grow as the camera pulls back, keeping their apparent size
/// steady. A pure function of distance; callers reapply it to all markers
/// on every distance change.
pub fn marker_scale(distance: f64, cfg: &Config) -> f64 {
    distance / cfg.reference_distance
}

#[cfg(test)]
mod tests {
    use super::{apply_zoom, marker_scale};
    use crate::config::Config;

    #[test]
    fn zoom_accumulates_scaled_delta() {
        let cfg = Config::default();
        let d = apply_zoom(3.0, 100.0, &cfg);
        assert!((d - 3.1).abs() < 1e-12);
    }

    #[test]
    fn zoom_clamps_to_exact_bounds() {
        let cfg = Config::default();
        assert_eq!(apply_zoom(3.0, 1e9, &cfg), cfg.max_zoom);
        assert_eq!(apply_zoom(3.0, -1e9, &cfg), cfg.min_zoom);
    }

    #[test]
    fn marker_scale_is_unity_at_reference() {
        let cfg = Config::default();
        assert_eq!(marker_scale(cfg.reference_distance, &cfg), 1.0);
        assert!(marker_scale(cfg.max_zoom, &cfg) > 1.0);
        assert!(marker_scale(cfg.min_zoom, &cfg) < 1.0);
    }
}
