//! Lifecycle events emitted by the player runtime.
//!
//! The [`EventKind`] enum classifies event types across four categories:
//! - **Input events**: a symbolic input arrived from some driver
//! - **Show lifecycle**: a show starting or reporting completion
//! - **Session events**: termination, deferred shutdown, all-shows-ended
//! - **Subscriber events**: fan-out overflow or a panicking subscriber
//!
//! The [`Event`] struct carries metadata such as timestamps, the show
//! reference, the input symbol and source, and free-text reasons.
//!
//! ## Ordering guarantees
//! Each event has a globally unique sequence number (`seq`) that increases
//! monotonically. Use `seq` to restore the exact order when events are
//! observed out of order (e.g. across subscriber queues).
//!
//! ## Example
//! ```rust
//! use showvisor::events::{Event, EventKind};
//!
//! let ev = Event::now(EventKind::ShowEnded)
//!     .with_show("slideshow")
//!     .with_reason("killed");
//!
//! assert_eq!(ev.kind, EventKind::ShowEnded);
//! assert_eq!(ev.show.as_deref(), Some("slideshow"));
//! ```

use std::sync::atomic::{AtomicU64, Ordering as AtomicOrdering};
use std::sync::Arc;
use std::time::SystemTime;

use crate::input::InputSource;

/// Global sequence counter for event ordering.
static EVENT_SEQ: AtomicU64 = AtomicU64::new(0);

/// Classification of player lifecycle events.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EventKind {
    // === Input events ===
    /// A symbolic input reached the orchestrator.
    ///
    /// Sets: `symbol`, `source`, `at`, `seq`.
    InputReceived,

    // === Show lifecycle ===
    /// A show was looked up, built and its run future spawned.
    ///
    /// Sets: `show`, `at`, `seq`.
    ShowStarting,

    /// A show reported completion; its registry slot was cleared.
    ///
    /// Sets: `show`, `reason` (outcome label), `at`, `seq`.
    ShowEnded,

    // === Session events ===
    /// The orchestrator asked every live show to terminate.
    ///
    /// Sets: `reason` (end reason label), `at`, `seq`.
    TerminateRequested,

    /// No shows remain live; the session is about to end.
    ///
    /// Sets: `reason` (end reason label), `at`, `seq`.
    AllShowsEnded,

    /// An OS termination signal was observed.
    ///
    /// Sets: `at`, `seq`.
    ShutdownRequested,

    /// A delay-class shutdown input arrived; the confirmation check was
    /// scheduled.
    ///
    /// Sets: `at`, `seq`.
    ShutdownDeferred,

    /// The termination grace window elapsed with shows still live.
    ///
    /// Sets: `reason` (comma-joined stuck references), `at`, `seq`.
    GraceExceeded,

    /// A show asked for a config key absent from the resources file.
    ///
    /// Sets: `show`, `reason`, `at`, `seq`.
    ResourceMissing,

    // === Subscriber events ===
    /// A subscriber's queue was full or closed; the event was dropped for
    /// that subscriber only.
    ///
    /// Sets: `show` (subscriber name), `reason`, `at`, `seq`.
    SubscriberOverflow,

    /// A subscriber panicked while processing an event.
    ///
    /// Sets: `show` (subscriber name), `reason` (panic info), `at`, `seq`.
    SubscriberPanicked,
}

/// Why a run, or a termination cascade, ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EndReason {
    /// All shows completed of their own accord.
    Normal,
    /// A user- or system-initiated exit killed the session.
    Killed,
    /// A runtime failure tore the session down.
    Error,
}

impl EndReason {
    /// Returns a short stable label (snake_case) for logs.
    pub fn as_label(&self) -> &'static str {
        match self {
            EndReason::Normal => "normal",
            EndReason::Killed => "killed",
            EndReason::Error => "error",
        }
    }
}

/// Lifecycle event with optional metadata.
///
/// - `seq`: monotonic global sequence for ordering
/// - `at`: wall-clock timestamp (for logs)
/// - other optional fields are set depending on the [`EventKind`]
#[derive(Clone, Debug)]
pub struct Event {
    /// Globally unique, monotonically increasing sequence number.
    pub seq: u64,
    /// Wall-clock timestamp.
    pub at: SystemTime,
    /// Event classification.
    pub kind: EventKind,
    /// Show reference (or subscriber name for subscriber events).
    pub show: Option<Arc<str>>,
    /// Symbolic input name, for input events.
    pub symbol: Option<Arc<str>>,
    /// Physical source the input came from.
    pub source: Option<InputSource>,
    /// Human-readable reason (outcome labels, panic info, etc.).
    pub reason: Option<Arc<str>>,
}

impl Event {
    /// Creates a new event of the given kind with the current timestamp
    /// and the next sequence number.
    pub fn now(kind: EventKind) -> Self {
        Self {
            seq: EVENT_SEQ.fetch_add(1, AtomicOrdering::Relaxed),
            at: SystemTime::now(),
            kind,
            show: None,
            symbol: None,
            source: None,
            reason: None,
        }
    }

    /// Attaches a show reference (or subscriber name).
    #[inline]
    pub fn with_show(mut self, show: impl Into<Arc<str>>) -> Self {
        self.show = Some(show.into());
        self
    }

    /// Attaches an input symbol.
    #[inline]
    pub fn with_symbol(mut self, symbol: impl Into<Arc<str>>) -> Self {
        self.symbol = Some(symbol.into());
        self
    }

    /// Attaches the input source.
    #[inline]
    pub fn with_source(mut self, source: InputSource) -> Self {
        self.source = Some(source);
        self
    }

    /// Attaches a human-readable reason.
    #[inline]
    pub fn with_reason(mut self, reason: impl Into<Arc<str>>) -> Self {
        self.reason = Some(reason.into());
        self
    }

    /// Creates a subscriber overflow event.
    #[inline]
    pub fn subscriber_overflow(subscriber: &'static str, reason: &'static str) -> Self {
        Event::now(EventKind::SubscriberOverflow)
            .with_show(subscriber)
            .with_reason(reason)
    }

    /// Creates a subscriber panic event.
    #[inline]
    pub fn subscriber_panicked(subscriber: &'static str, info: String) -> Self {
        Event::now(EventKind::SubscriberPanicked)
            .with_show(subscriber)
            .with_reason(info)
    }
}
