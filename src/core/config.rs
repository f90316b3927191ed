//! Global player configuration.
//!
//! [`PlayerConfig`] centralises the orchestration knobs: the termination
//! grace window, the poll periods of the two poll-driven drivers, the
//! deferred-shutdown delay and the event bus capacity.
//!
//! ## Field semantics
//! - `grace`: maximum wait for shows to confirm termination before the
//!   run is abandoned with a grace-exceeded error (`30s` default).
//! - `shutdown_delay`: how long after a delay-class shutdown input the
//!   confirmation check runs (`5s` default).
//! - `gpio_period` / `tod_period`: poll periods of the GPIO and
//!   time-of-day drivers (`50ms` / `500ms` defaults).
//! - `bus_capacity`: event bus ring buffer size (min 1; clamped by Bus).
//! - `restore_screen_blanking`: set when the embedding application
//!   disabled screen blanking at start-up, so tidy-up turns it back on.

use std::time::Duration;

/// Global configuration for the player runtime.
#[derive(Clone, Debug)]
pub struct PlayerConfig {
    /// Maximum time to wait for terminating shows to report completion.
    pub grace: Duration,
    /// Delay between a `pp-shutdown` input and its confirmation check.
    pub shutdown_delay: Duration,
    /// GPIO driver poll period.
    pub gpio_period: Duration,
    /// Time-of-day driver poll period.
    pub tod_period: Duration,
    /// Capacity of the event bus broadcast channel ring buffer.
    pub bus_capacity: usize,
    /// Restore screen blanking during tidy-up.
    pub restore_screen_blanking: bool,
}

impl Default for PlayerConfig {
    /// Provides the default configuration:
    /// - `grace = 30s`
    /// - `shutdown_delay = 5s`
    /// - `gpio_period = 50ms`
    /// - `tod_period = 500ms`
    /// - `bus_capacity = 1024`
    /// - `restore_screen_blanking = false`
    fn default() -> Self {
        Self {
            grace: Duration::from_secs(30),
            shutdown_delay: Duration::from_secs(5),
            gpio_period: Duration::from_millis(50),
            tod_period: Duration::from_millis(500),
            bus_capacity: 1024,
            restore_screen_blanking: false,
        }
    }
}
