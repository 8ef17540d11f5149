//! # Private Space Access Control
//!
//! The Private Space is guarded by a single stored PIN. The unlock flag lives only
//! in memory: a freshly constructed [`PrivateSpace`] is always locked, whatever was
//! persisted.
//!
//! ```text
//!            set_pin                unlock(ok)
//!   NoPin ───────────▶ Unlocked ◀──────────────── Locked
//!                         │                          ▲
//!                         └────────── lock ──────────┘
//! ```
//!
//! PINs are compared with exact string equality and stored as given. Format checks
//! (4-6 digits, double entry) are the caller's job, see [`crate::validation`].
//! Every failure is a `false` return; there is no attempt counter or lockout.

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AccessState {
    NoPin,
    Locked,
    Unlocked,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PrivateSpace {
    pin: Option<String>,
    unlocked: bool,
}

impl PrivateSpace {
    /// Restores the Private Space from a persisted PIN. Always starts locked.
    pub fn new(stored_pin: Option<String>) -> Self {
        Self {
            pin: stored_pin,
            unlocked: false,
        }
    }

    pub fn state(&self) -> AccessState {
        match (&self.pin, self.unlocked) {
            (None, _) => AccessState::NoPin,
            (Some(_), false) => AccessState::Locked,
            (Some(_), true) => AccessState::Unlocked,
        }
    }

    pub fn has_pin(&self) -> bool {
        self.pin.is_some()
    }

    pub fn is_unlocked(&self) -> bool {
        self.state() == AccessState::Unlocked
    }

    /// The PIN to persist.
    pub fn stored_pin(&self) -> Option<&str> {
        self.pin.as_deref()
    }

    pub fn verify_pin(&self, pin: &str) -> bool {
        self.pin.as_deref() == Some(pin)
    }

    /// Creates the PIN and unlocks. Only valid while no PIN exists; returns `false`
    /// and leaves everything unchanged otherwise.
    pub fn set_pin(&mut self, pin: &str) -> bool {
        if self.pin.is_some() {
            return false;
        }
        self.pin = Some(pin.to_string());
        self.unlocked = true;
        true
    }

    pub fn unlock(&mut self, pin: &str) -> bool {
        if self.verify_pin(pin) {
            self.unlocked = true;
            return true;
        }
        false
    }

    pub fn lock(&mut self) {
        self.unlocked = false;
    }

    /// Replaces the PIN when `old_pin` matches. The unlock flag is not touched.
    pub fn change_pin(&mut self, old_pin: &str, new_pin: &str) -> bool {
        if !self.verify_pin(old_pin) {
            return false;
        }
        self.pin = Some(new_pin.to_string());
        true
    }
}
