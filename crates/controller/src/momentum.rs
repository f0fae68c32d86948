use foundation::math::geo::Coordinate;

use crate::state::AngularVelocity;

/// Derives and carries the globe's angular velocity across frames.
///
/// While the user (or a transition) is moving the globe, the tracker keeps
/// the instantaneous discrete derivative of orientation, so the value is
/// ready the instant a drag ends. While free-spinning it integrates that
/// velocity back into orientation, decaying it each tick.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct MomentumTracker {
    previous: Coordinate,
    velocity: AngularVelocity,
}

impl MomentumTracker {
    pub fn new(start: Coordinate) -> Self {
        Self {
            previous: start,
            velocity: AngularVelocity::default(),
        }
    }

    pub fn velocity(&self) -> AngularVelocity {
        self.velocity
    }

    /// Discrete derivative of the (already normalized) orientation against
    /// the previous frame's.
    pub fn observe(&mut self, current: Coordinate, dt_s: f64) {
        if dt_s <= 0.0 {
            return;
        }
        self.velocity = AngularVelocity {
            lat_dps: (current.lat_deg - self.previous.lat_deg) / dt_s,
            lon_dps: (current.lon_deg - self.previous.lon_deg) / dt_s,
        };
    }

    /// One free-spin step: decay, then integrate.
    ///
    /// The decay multiplies once per tick, not by `dt_s`, so deceleration
    /// tracks the tick rate. Changing that changes the feel.
    pub fn integrate(&mut self, current: Coordinate, dt_s: f64, damping: f64) -> Coordinate {
        self.velocity.lat_dps *= damping;
        self.velocity.lon_dps *= damping;
        Coordinate::new(
            current.lat_deg + self.velocity.lat_dps * dt_s,
            current.lon_deg + self.velocity.lon_dps * dt_s,
        )
    }

    /// Records this frame's final orientation for the next derivative.
    pub fn record(&mut self, current: Coordinate) {
        self.previous = current;
    }

    /// Drops any accumulated velocity (new pointer contact).
    pub fn reset(&mut self) {
        self.velocity = AngularVelocity::default();
    }
}
