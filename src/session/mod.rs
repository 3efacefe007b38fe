// Trial session gate: a polled countdown that suspends the desktop until an admin unlocks it

pub mod credentials;

use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use self::credentials::Credentials;
use crate::clock::Countdown;
use crate::error::ShellError;

/// Default trial length: 30 minutes
pub const DEFAULT_TRIAL_MS: u64 = 30 * 60 * 1000;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GateState {
    /// Desktop visible, countdown running
    Active,
    /// Desktop hidden, countdown stopped, unlock surfaced
    Expired,
}

type GateObserver = Box<dyn FnMut(GateState)>;

/// Trial countdown + admin check.
///
/// Pure state machine: the desktop suspend/resume effect is delegated to
/// observers registered by the presentation layer.
pub struct SessionGate {
    duration_ms: u64,
    countdown: Option<Countdown>,
    state: GateState,
    polling: bool,
    unlocked: bool, // Sticky once set
    admin: bool,
    credentials: Credentials,
    observers: Vec<GateObserver>,
}

impl SessionGate {
    pub fn new(duration_ms: u64, credentials: Credentials) -> Self {
        Self {
            duration_ms,
            countdown: None,
            state: GateState::Active,
            polling: false,
            unlocked: false,
            admin: false,
            credentials,
            observers: Vec::new(),
        }
    }

    /// Register a callback invoked with the new state on every transition
    pub fn subscribe<F>(&mut self, observer: F)
    where
        F: FnMut(GateState) + 'static,
    {
        self.observers.push(Box::new(observer));
    }

    /// Record the trial start and begin polling. Later calls keep the first start.
    pub fn start(&mut self, now: u64) {
        if self.countdown.is_some() {
            debug!("[GATE] start ignored, trial already running");
            return;
        }
        self.countdown = Some(Countdown::new(now, self.duration_ms));
        self.state = GateState::Active;
        self.polling = !self.unlocked;
        info!(duration_ms = self.duration_ms, "[GATE] trial started");
    }

    /// Expire the trial once the duration has fully elapsed
    pub fn poll(&mut self, now: u64) -> GateState {
        if !self.polling || self.unlocked || self.state != GateState::Active {
            return self.state;
        }
        let Some(countdown) = self.countdown else {
            return self.state;
        };

        if countdown.is_elapsed(now) {
            self.polling = false;
            info!(elapsed_ms = countdown.elapsed(now), "[GATE] trial expired, suspending desktop");
            self.transition(GateState::Expired);
        }
        self.state
    }

    /// Resume the desktop for the rest of the process. The timer is never re-armed.
    pub fn unlock(&mut self) {
        self.unlocked = true;
        self.polling = false;
        if self.state != GateState::Active {
            info!("[GATE] unlocked, resuming desktop");
            self.transition(GateState::Active);
        } else {
            info!("[GATE] unlocked before expiry");
        }
    }

    /// Whether the pair matches the embedded admin credentials
    pub fn authenticate(&self, username: &str, secret: &str) -> bool {
        self.credentials.matches(username, secret)
    }

    /// Login form submission: sets the admin flag on success.
    ///
    /// A mismatch leaves the gate untouched; the error's text is the inline message.
    pub fn submit_credentials(&mut self, username: &str, secret: &str) -> Result<(), ShellError> {
        if self.authenticate(username, secret) {
            self.admin = true;
            info!("[GATE] admin authenticated");
            Ok(())
        } else {
            warn!("[GATE] rejected admin credentials");
            Err(ShellError::InvalidCredentials)
        }
    }

    pub fn state(&self) -> GateState {
        self.state
    }

    pub fn is_unlocked(&self) -> bool {
        self.unlocked
    }

    pub fn is_admin(&self) -> bool {
        self.admin
    }

    pub fn is_polling(&self) -> bool {
        self.polling
    }

    pub fn duration_ms(&self) -> u64 {
        self.duration_ms
    }

    /// Time left on the trial; `None` before start or once unlocked
    pub fn remaining(&self, now: u64) -> Option<u64> {
        if self.unlocked {
            return None;
        }
        self.countdown.map(|c| match self.state {
            GateState::Active => c.remaining(now),
            GateState::Expired => 0,
        })
    }

    fn transition(&mut self, next: GateState) {
        self.state = next;
        for observer in self.observers.iter_mut() {
            observer(next);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::rc::Rc;

    const START: u64 = 1_700_000_000_000;

    fn gate() -> SessionGate {
        let mut gate = SessionGate::new(DEFAULT_TRIAL_MS, Credentials::default());
        gate.start(START);
        gate
    }

    #[test]
    fn test_expiry_boundary() {
        let mut gate = gate();
        assert_eq!(gate.poll(START + 1_799_999), GateState::Active);
        assert!(gate.is_polling());
        assert_eq!(gate.poll(START + 1_800_000), GateState::Expired);
        assert!(!gate.is_polling());
    }

    #[test]
    fn test_unlock_is_sticky() {
        let mut gate = gate();
        gate.poll(START + DEFAULT_TRIAL_MS);
        gate.unlock();
        assert_eq!(gate.state(), GateState::Active);

        for later in [DEFAULT_TRIAL_MS + 1, 10 * DEFAULT_TRIAL_MS, u64::MAX - START] {
            assert_eq!(gate.poll(START + later), GateState::Active);
        }
        assert_eq!(gate.remaining(START), None);
    }

    #[test]
    fn test_unlock_before_expiry_prevents_it() {
        let mut gate = gate();
        gate.unlock();
        assert_eq!(gate.poll(START + 2 * DEFAULT_TRIAL_MS), GateState::Active);
    }

    #[test]
    fn test_expired_gate_does_not_self_resume() {
        let mut gate = gate();
        gate.poll(START + DEFAULT_TRIAL_MS);
        assert_eq!(gate.poll(START), GateState::Expired);
        assert_eq!(gate.remaining(START + DEFAULT_TRIAL_MS + 5), Some(0));
    }

    #[test]
    fn test_poll_before_start_is_noop() {
        let mut gate = SessionGate::new(10, Credentials::default());
        assert_eq!(gate.poll(u64::MAX), GateState::Active);
    }

    #[test]
    fn test_restart_keeps_first_start() {
        let mut gate = gate();
        gate.start(START + 1_000_000);
        assert_eq!(gate.poll(START + DEFAULT_TRIAL_MS), GateState::Expired);
    }

    #[test]
    fn test_observers_see_each_transition_once() {
        let seen = Rc::new(RefCell::new(Vec::new()));
        let mut gate = SessionGate::new(100, Credentials::default());
        let sink = seen.clone();
        gate.subscribe(move |state| sink.borrow_mut().push(state));

        gate.start(0);
        gate.poll(50);
        gate.poll(100);
        gate.poll(200);
        gate.unlock();
        gate.unlock();

        assert_eq!(*seen.borrow(), vec![GateState::Expired, GateState::Active]);
    }

    #[test]
    fn test_rejected_credentials_leave_state_unchanged() {
        let mut gate = gate();
        gate.poll(START + DEFAULT_TRIAL_MS);

        let err = gate.submit_credentials("admin", "wrong").unwrap_err();
        assert_eq!(err.to_string(), "Invalid admin credentials.");
        assert!(!gate.is_admin());
        assert_eq!(gate.state(), GateState::Expired);

        gate.submit_credentials("admin", "zenux").unwrap();
        assert!(gate.is_admin());
        assert_eq!(gate.state(), GateState::Expired);
    }
}
