//! Host-system side effects: screen blanking and OS shutdown.
//!
//! The player touches the host in exactly two places: restoring the
//! screen-blanking state during tidy-up, and issuing the OS shutdown
//! command when a run ends with `shutdown_required` set. Both live behind
//! [`HostSystem`] so tests and demos can observe them instead of
//! powering the machine off.

use std::process::Command;

/// Host side effects consumed by the orchestrator.
pub trait HostSystem: Send + Sync + 'static {
    /// Turns screen blanking/DPMS on or off.
    fn set_screen_blanking(&self, on: bool);

    /// Schedules an OS shutdown. Called at most once, as the last side
    /// effect of a run.
    fn schedule_shutdown(&self);
}

/// The real host: shells out to `xset` and `shutdown`.
///
/// Command failures are ignored; by the time these run the session is
/// already over and there is nothing useful left to do about them.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemHost;

impl HostSystem for SystemHost {
    fn set_screen_blanking(&self, on: bool) {
        let (s, dpms) = if on { ("on", "+dpms") } else { ("off", "-dpms") };
        let _ = Command::new("xset").args(["s", s]).status();
        let _ = Command::new("xset").args([dpms]).status();
    }

    fn schedule_shutdown(&self) {
        let _ = Command::new("sudo").args(["shutdown", "-h", "now"]).spawn();
    }
}

/// A host that does nothing. For demos and tests.
#[derive(Debug, Clone, Copy, Default)]
pub struct NullHost;

impl HostSystem for NullHost {
    fn set_screen_blanking(&self, _on: bool) {}
    fn schedule_shutdown(&self) {}
}
