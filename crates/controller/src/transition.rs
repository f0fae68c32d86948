use foundation::math::geo::Coordinate;
use runtime::step_timer::{StepId, StepTimer};

/// Outcome of one transition step.
#[derive(Debug, Copy, Clone, PartialEq)]
pub enum TransitionStep {
    /// Moved closer; another step is armed.
    Step(Coordinate),
    /// Within tolerance on both axes; no further step is armed.
    Finished(Coordinate),
    /// The armed token was invalidated (a drag started); nothing moved.
    Cancelled,
}

/// Damped interpolation of orientation toward a picked marker.
///
/// Each step covers a fixed fraction of the remaining distance (an
/// exponential ease, not a fixed-duration tween) and re-arms itself on the
/// shared [`StepTimer`] until both axes are within tolerance. Whoever
/// cancels the timer (drag-start does) thereby stops the engine before its
/// next step can act.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct TransitionEngine {
    target: Coordinate,
    step: StepId,
}

impl TransitionEngine {
    pub fn begin(timer: &mut StepTimer, target: Coordinate) -> Self {
        Self {
            target,
            step: timer.arm(),
        }
    }

    pub fn target(&self) -> Coordinate {
        self.target
    }

    pub fn cancel(&self, timer: &mut StepTimer) {
        timer.cancel();
    }

    pub fn advance(
        &mut self,
        timer: &mut StepTimer,
        current: Coordinate,
        lerp_speed: f64,
        epsilon_deg: f64,
    ) -> TransitionStep {
        if !timer.fire(self.step) {
            return TransitionStep::Cancelled;
        }

        // Antimeridian: shift the working longitude so the interpolation
        // takes the short arc across ±180 instead of the long way around.
        // The shift is local to this step; `Coordinate::new` renormalizes.
        let mut lon = current.lon_deg;
        if (lon - self.target.lon_deg).abs() > 180.0 {
            if self.target.lon_deg < 0.0 && lon > 0.0 {
                lon -= 360.0;
            }
            if self.target.lon_deg > 0.0 && lon < 0.0 {
                lon += 360.0;
            }
        }

        let next = Coordinate::new(
            (1.0 - lerp_speed) * current.lat_deg + lerp_speed * self.target.lat_deg,
            (1.0 - lerp_speed) * lon + lerp_speed * self.target.lon_deg,
        );

        let done = (self.target.lat_deg - next.lat_deg).abs() <= epsilon_deg
            && (self.target.lon_deg - next.lon_deg).abs() <= epsilon_deg;
        if done {
            TransitionStep::Finished(next)
        } else {
            self.step = timer.arm();
            TransitionStep::Step(next)
        }
    }
}
