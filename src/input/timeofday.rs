//! Time-of-day driver: fires symbolic inputs at configured clock times.
//!
//! Profiles can schedule inputs at times of day ("at 18:00 send
//! `gallery-close`"). There is no interrupt for wall-clock boundaries, so
//! the driver polls a [`Clock`] at a coarse period (500ms by default)
//! and fires every trigger whose time was crossed since the previous
//! tick. Midnight wrap-around is handled: a tick that observes the clock
//! going backwards treats the interval as spanning midnight.

use std::sync::Arc;
use std::time::{Duration, SystemTime, UNIX_EPOCH};

use tokio::time;
use tokio_util::sync::CancellationToken;

use super::{Edge, InputEvent, InputPort, InputSource};

/// Seconds in a day.
const DAY: u32 = 86_400;

/// Wall-clock source (external collaborator; fakeable in tests).
pub trait Clock: Send + Sync + 'static {
    /// Seconds elapsed since the most recent midnight, in `0..86_400`.
    fn seconds_since_midnight(&self) -> u32;
}

/// System clock. Midnight is UTC midnight; profiles that need local time
/// provide their own [`Clock`].
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn seconds_since_midnight(&self) -> u32 {
        let secs = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .unwrap_or(Duration::ZERO)
            .as_secs();
        (secs % u64::from(DAY)) as u32
    }
}

/// One scheduled input.
#[derive(Debug, Clone)]
pub struct TimeTrigger {
    /// Trigger time, seconds since midnight.
    pub at: u32,
    /// Symbol injected when the time is crossed.
    pub symbol: Arc<str>,
}

impl TimeTrigger {
    /// Creates a trigger at `hh:mm:ss`.
    pub fn at(hh: u32, mm: u32, ss: u32, symbol: impl Into<Arc<str>>) -> Self {
        Self {
            at: (hh * 3600 + mm * 60 + ss) % DAY,
            symbol: symbol.into(),
        }
    }
}

/// Poll-driven time-of-day input driver.
pub struct TimeOfDayDriver {
    clock: Arc<dyn Clock>,
    triggers: Arc<[TimeTrigger]>,
    period: Duration,
    port: InputPort,
    cancel: CancellationToken,
}

impl TimeOfDayDriver {
    /// Creates a driver over the given clock and triggers.
    pub fn new(
        clock: Arc<dyn Clock>,
        triggers: Vec<TimeTrigger>,
        period: Duration,
        port: InputPort,
    ) -> Self {
        Self {
            clock,
            triggers: triggers.into(),
            period,
            port,
            cancel: CancellationToken::new(),
        }
    }

    /// Spawns the self-rescheduling poll loop.
    ///
    /// Each tick fires every trigger whose time lies in the half-open
    /// interval `(previous tick, now]`. The loop exits when
    /// [`terminate`](Self::terminate) is called.
    pub fn poll(&self) {
        let clock = Arc::clone(&self.clock);
        let triggers = Arc::clone(&self.triggers);
        let port = self.port.clone();
        let cancel = self.cancel.clone();
        let period = self.period;

        tokio::spawn(async move {
            let mut last = clock.seconds_since_midnight();
            let mut ticks = time::interval(period);
            ticks.set_missed_tick_behavior(time::MissedTickBehavior::Skip);
            ticks.tick().await;

            loop {
                tokio::select! {
                    _ = cancel.cancelled() => break,
                    _ = ticks.tick() => {
                        let now = clock.seconds_since_midnight();
                        for trigger in triggers.iter() {
                            if crossed(last, now, trigger.at) {
                                port.send(InputEvent::new(
                                    trigger.symbol.clone(),
                                    Edge::Rising,
                                    InputSource::TimeOfDay,
                                ));
                            }
                        }
                        last = now;
                    }
                }
            }
        });
    }

    /// Stops the poll loop. Idempotent; safe if `poll` was never called.
    pub fn terminate(&self) {
        self.cancel.cancel();
    }
}

/// True if `at` lies in the half-open interval `(last, now]`, treating a
/// backwards-moving clock as a midnight wrap.
fn crossed(last: u32, now: u32, at: u32) -> bool {
    if now >= last {
        at > last && at <= now
    } else {
        at > last || at <= now
    }
}
