//! Device location boundary for WCLook.
//!
//! The ranking pipeline never talks to an OS location stack directly; it
//! goes through [`LocationProvider`]:
//!
//! - `current_position()` is a non-blocking best-effort snapshot that may
//!   be `None` (no fix yet, or permission denied)
//! - `is_authorized()` reflects the current authorization state
//! - `authorization_watch()` is a channel of authorization changes with
//!   duplicates suppressed: at most one notification per actual change
//!
//! Two concrete providers are included. [`FixedLocationProvider`] wraps a
//! coordinate supplied up front (the CLI case). [`SharedLocationProvider`]
//! can be updated from another task, for hosts that acquire fixes
//! asynchronously, and backs the tests.

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

use std::sync::{Arc, Mutex};
use tokio::sync::watch;
use tracing::debug;
use wclook_geo::Coordinate;

/// Best-effort access to the device's current position.
pub trait LocationProvider: Send + Sync {
    /// The most recent known position, or `None` when no fix exists.
    ///
    /// Non-blocking: this never waits for a fix or a permission prompt.
    fn current_position(&self) -> Option<Coordinate>;

    /// Whether location access is currently authorized.
    fn is_authorized(&self) -> bool;

    /// Subscribe to authorization changes.
    ///
    /// The receiver observes at most one notification per actual change;
    /// setting the same state twice delivers nothing new.
    fn authorization_watch(&self) -> watch::Receiver<bool>;
}

/// A provider with a position fixed at construction time.
///
/// Used by the CLI, where the coordinate arrives as arguments rather
/// than from a device location stack. Always authorized.
#[derive(Debug, Clone)]
pub struct FixedLocationProvider {
    position: Coordinate,
    authorized: Arc<watch::Sender<bool>>,
}

impl FixedLocationProvider {
    /// Create a provider that always reports `position`.
    #[must_use]
    pub fn new(position: Coordinate) -> Self {
        let (authorized, _) = watch::channel(true);
        Self {
            position,
            authorized: Arc::new(authorized),
        }
    }
}

impl LocationProvider for FixedLocationProvider {
    fn current_position(&self) -> Option<Coordinate> {
        Some(self.position)
    }

    fn is_authorized(&self) -> bool {
        true
    }

    fn authorization_watch(&self) -> watch::Receiver<bool> {
        self.authorized.subscribe()
    }
}

/// A provider whose position and authorization can change at runtime.
///
/// Clones share state, so one clone can feed fixes in while another is
/// handed to the ranking pipeline.
#[derive(Debug, Clone)]
pub struct SharedLocationProvider {
    state: Arc<Mutex<SharedState>>,
    authorized: Arc<watch::Sender<bool>>,
}

#[derive(Debug)]
struct SharedState {
    position: Option<Coordinate>,
    authorized: bool,
}

impl SharedLocationProvider {
    /// Create a provider with no fix and the given authorization state.
    #[must_use]
    pub fn new(authorized: bool) -> Self {
        let (tx, _) = watch::channel(authorized);
        Self {
            state: Arc::new(Mutex::new(SharedState {
                position: None,
                authorized,
            })),
            authorized: Arc::new(tx),
        }
    }

    /// Create an authorized provider that already has a fix.
    #[must_use]
    pub fn with_position(position: Coordinate) -> Self {
        let provider = Self::new(true);
        provider.update_position(Some(position));
        provider
    }

    /// Record a new fix (or loss of fix).
    pub fn update_position(&self, position: Option<Coordinate>) {
        let mut state = self.state.lock().expect("location state poisoned");
        state.position = position;
    }

    /// Record an authorization change.
    ///
    /// Redelivering the current state is a no-op for subscribers; only a
    /// real transition produces a notification.
    pub fn set_authorized(&self, authorized: bool) {
        let mut state = self.state.lock().expect("location state poisoned");
        if state.authorized == authorized {
            return;
        }
        state.authorized = authorized;
        drop(state);
        debug!(authorized, "Location authorization changed");
        // Receivers may all be gone; that is fine.
        let _ = self.authorized.send(authorized);
    }
}

impl LocationProvider for SharedLocationProvider {
    fn current_position(&self) -> Option<Coordinate> {
        let state = self.state.lock().expect("location state poisoned");
        if state.authorized {
            state.position
        } else {
            None
        }
    }

    fn is_authorized(&self) -> bool {
        self.state.lock().expect("location state poisoned").authorized
    }

    fn authorization_watch(&self) -> watch::Receiver<bool> {
        self.authorized.subscribe()
    }
}

/// A provider that never has a position.
///
/// Models the permission-denied path without a device stack.
#[derive(Debug, Clone)]
pub struct UnavailableLocationProvider {
    authorized: Arc<watch::Sender<bool>>,
}

impl UnavailableLocationProvider {
    /// Create a provider with no position and no authorization.
    #[must_use]
    pub fn new() -> Self {
        let (tx, _) = watch::channel(false);
        Self {
            authorized: Arc::new(tx),
        }
    }
}

impl Default for UnavailableLocationProvider {
    fn default() -> Self {
        Self::new()
    }
}

impl LocationProvider for UnavailableLocationProvider {
    fn current_position(&self) -> Option<Coordinate> {
        None
    }

    fn is_authorized(&self) -> bool {
        false
    }

    fn authorization_watch(&self) -> watch::Receiver<bool> {
        self.authorized.subscribe()
    }
}
