/// Cancellable self-rescheduling step, as an explicit armed token.
///
/// A client arms the timer and keeps the returned [`StepId`]. When its
/// scheduled moment comes around it calls [`StepTimer::fire`] with that
/// token; the step runs only if the token is still the armed one. Arming
/// again or cancelling invalidates any outstanding token, so a step
/// scheduled before a cancellation can never act after it.
///
/// Key properties:
/// - Tokens are never reused: ids increase monotonically.
/// - At most one step is armed at a time; re-arming supersedes.
/// - `fire` with a stale token is a no-op returning `false`.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub struct StepId(pub u64);

#[derive(Debug, Default)]
pub struct StepTimer {
    next_id: u64,
    armed: Option<StepId>,
}

impl StepTimer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_armed(&self) -> bool {
        self.armed.is_some()
    }

    /// Arms the next step, superseding any previously armed token.
    pub fn arm(&mut self) -> StepId {
        let id = StepId(self.next_id);
        self.next_id = self.next_id.wrapping_add(1);
        self.armed = Some(id);
        id
    }

    /// Invalidates the armed step, if any.
    ///
    /// Returns `true` if a step was armed.
    pub fn cancel(&mut self) -> bool {
        self.armed.take().is_some()
    }

    /// Consumes the armed slot if `id` is still the armed token.
    ///
    /// Returns `true` exactly when the caller's step may act.
    pub fn fire(&mut self, id: StepId) -> bool {
        if self.armed == Some(id) {
            self.armed = None;
            return true;
        }
        false
    }
}

#[cfg(test)]
mod tests {
    use super::StepTimer;

    #[test]
    fn armed_token_fires_once() {
        let mut timer = StepTimer::new();
        let id = timer.arm();
        assert!(timer.fire(id));
        assert!(!timer.fire(id));
    }

    #[test]
    fn cancel_invalidates_pending_step() {
        let mut timer = StepTimer::new();
        let id = timer.arm();
        assert!(timer.cancel());
        assert!(!timer.fire(id));
        assert!(!timer.cancel());
    }

    #[test]
    fn rearming_supersedes_older_token() {
        let mut timer = StepTimer::new();
        let stale = timer.arm();
        let fresh = timer.arm();
        assert!(!timer.fire(stale));
        assert!(timer.fire(fresh));
    }
}
