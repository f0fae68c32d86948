//! Spherical interaction controller for the photo globe.
//!
//! Converts pointer input and elapsed time into globe orientation and
//! camera distance: immediate rotation while dragging, momentum with
//! per-tick damping after release, and a damped ease toward a picked
//! marker's coordinate. Rendering is someone else's job; the host calls
//! [`Controller::tick`] once per frame from its render loop and reads the
//! resulting orientation/distance back out.

pub mod bridge;
pub mod config;
pub mod momentum;
pub mod state;
pub mod transition;
pub mod zoom;

pub use bridge::{FOV_Y_DEG, HitTest, PickCamera, ScenePicker};
pub use config::Config;
pub use state::{AngularVelocity, ControllerState, InteractionMode};

use foundation::math::Vec2;
use foundation::math::geo::Coordinate;
use runtime::frame::clamp_dt;
use runtime::step_timer::StepTimer;

use crate::momentum::MomentumTracker;
use crate::transition::{TransitionEngine, TransitionStep};

/// What a tick did, for hosts that trace or chain on transition completion.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Default)]
pub struct TickSummary {
    pub transition_finished: bool,
}

pub struct Controller {
    cfg: Config,
    state: ControllerState,
    momentum: MomentumTracker,
    timer: StepTimer,
    transition: Option<TransitionEngine>,
}

impl Controller {
    pub fn new(cfg: Config) -> Self {
        let state = ControllerState::new(&cfg);
        Self {
            cfg,
            state,
            momentum: MomentumTracker::new(state.coordinate),
            timer: StepTimer::new(),
            transition: None,
        }
    }

    pub fn config(&self) -> &Config {
        &self.cfg
    }

    pub fn orientation(&self) -> Coordinate {
        self.state.coordinate
    }

    pub fn camera_distance(&self) -> f64 {
        self.state.distance
    }

    pub fn mode(&self) -> InteractionMode {
        self.state.mode
    }

    pub fn velocity(&self) -> AngularVelocity {
        self.momentum.velocity()
    }

    pub fn transition_target(&self) -> Option<Coordinate> {
        self.transition.map(|t| t.target())
    }

    /// Rotates by a pointer delta in pixels (drag sensitivity applied).
    pub fn rotate_by(&mut self, dx_px: f64, dy_px: f64) {
        let c = self.state.coordinate;
        self.state.coordinate = Coordinate::new(
            c.lat_deg + dy_px * self.cfg.rotate_sensitivity,
            c.lon_deg + dx_px * self.cfg.rotate_sensitivity,
        );
    }

    /// Rotates directly to a coordinate (clamped/wrapped, never rejected).
    pub fn rotate_to(&mut self, lat_deg: f64, lon_deg: f64) {
        self.state.coordinate = Coordinate::new(lat_deg, lon_deg);
    }

    /// Pointer contact. Cancels any in-flight transition and free-spin
    /// first; then either begins a click-to-navigate transition (pointer
    /// landed on a marker) or a drag gesture (it did not). The two are
    /// mutually exclusive.
    pub fn on_pointer_down<P: HitTest>(&mut self, pos_px: Vec2, picker: &P) {
        self.cancel_transition();
        self.momentum.reset();

        match picker.pick(pos_px) {
            Some(target) => self.begin_transition(target),
            None => self.state.mode = InteractionMode::Dragging,
        }
    }

    /// Pointer travel; only a drag gesture rotates the globe.
    pub fn on_pointer_move(&mut self, dx_px: f64, dy_px: f64) {
        if self.state.mode == InteractionMode::Dragging {
            self.rotate_by(dx_px, dy_px);
        }
    }

    /// Pointer release: a drag hands its last measured velocity to the
    /// free-spin.
    pub fn on_pointer_up(&mut self) {
        if self.state.mode == InteractionMode::Dragging {
            self.state.mode = InteractionMode::FreeSpinning;
        }
    }

    /// Starts easing toward `target`, superseding any current transition.
    pub fn begin_transition(&mut self, target: Coordinate) {
        self.cancel_transition();
        log::debug!("transition to {target:?}");
        self.transition = Some(TransitionEngine::begin(&mut self.timer, target));
        self.state.mode = InteractionMode::Transitioning;
    }

    /// Zooms by a wheel/pinch delta and returns the marker scale factor
    /// for the new distance, for the host to apply to every marker.
    pub fn zoom_by(&mut self, delta: f64) -> f64 {
        self.state.distance = zoom::apply_zoom(self.state.distance, delta, &self.cfg);
        zoom::marker_scale(self.state.distance, &self.cfg)
    }

    /// Per-frame update, called by the host's render loop. Advances the
    /// active mode's motion and keeps the momentum tracker current. Never
    /// renders.
    pub fn tick(&mut self, dt_s: f64) -> TickSummary {
        let dt = clamp_dt(dt_s);
        let entry_mode = self.state.mode;
        let mut summary = TickSummary::default();

        match entry_mode {
            InteractionMode::FreeSpinning => {
                self.state.coordinate =
                    self.momentum
                        .integrate(self.state.coordinate, dt, self.cfg.damping);
            }
            InteractionMode::Transitioning => {
                if let Some(engine) = self.transition.as_mut() {
                    match engine.advance(
                        &mut self.timer,
                        self.state.coordinate,
                        self.cfg.lerp_speed,
                        self.cfg.epsilon_deg,
                    ) {
                        TransitionStep::Step(next) => self.state.coordinate = next,
                        TransitionStep::Finished(next) => {
                            self.state.coordinate = next;
                            self.transition = None;
                            self.state.mode = InteractionMode::Idle;
                            summary.transition_finished = true;
                            log::debug!("transition finished at {next:?}");
                        }
                        TransitionStep::Cancelled => {
                            self.transition = None;
                            self.state.mode = InteractionMode::Idle;
                        }
                    }
                } else {
                    self.state.mode = InteractionMode::Idle;
                }
            }
            InteractionMode::Dragging | InteractionMode::Idle => {}
        }

        // Velocity is the discrete derivative in every mode except
        // free-spin, where it is the integrator's own state.
        if entry_mode != InteractionMode::FreeSpinning {
            self.momentum.observe(self.state.coordinate, dt);
        }
        self.momentum.record(self.state.coordinate);

        summary
    }

    fn cancel_transition(&mut self) {
        if let Some(engine) = self.transition.take() {
            engine.cancel(&mut self.timer);
        }
    }
}

impl Default for Controller {
    fn default() -> Self {
        Self::new(Config::default())
    }
}
