use serde::Deserialize;

/// Interaction tunables.
///
/// Defaults are the shipped feel; hosts may deserialize overrides from
/// JSON, with absent fields falling back to these values.
#[derive(Debug, Copy, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Degrees of rotation per pixel of pointer travel.
    pub rotate_sensitivity: f64,
    /// Camera distance change per unit of wheel delta.
    pub zoom_sensitivity: f64,
    pub min_zoom: f64,
    pub max_zoom: f64,
    /// Per-tick multiplicative decay of free-spin velocity.
    pub damping: f64,
    /// Fraction of the remaining distance a transition covers per step.
    pub lerp_speed: f64,
    /// Both axes must be within this many degrees of the target for a
    /// transition to finish.
    pub epsilon_deg: f64,
    /// Camera distance at which markers render at their base size.
    pub reference_distance: f64,
    pub start_distance: f64,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            rotate_sensitivity: 0.2,
            zoom_sensitivity: 0.001,
            min_zoom: 1.2,
            max_zoom: 4.0,
            damping: 0.99,
            lerp_speed: 0.1,
            epsilon_deg: 0.05,
            reference_distance: 3.0,
            start_distance: 3.0,
        }
    }
}
