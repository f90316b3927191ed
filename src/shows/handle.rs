//! Supervisor-side show capability and the completion report.
//!
//! The supervisor holds the only strong reference to a [`ShowHandle`];
//! the show itself owns all of its internal sub-resources. The handle
//! exposes exactly the two operations of the show contract (deliver an
//! input, request termination) and both are fire-and-forget.

use std::sync::Arc;

use tokio::sync::mpsc;
use tokio_util::sync::CancellationToken;

use crate::input::InputEvent;

/// Capability over one running show, held in its registry slot.
#[derive(Debug)]
pub struct ShowHandle {
    inputs: mpsc::UnboundedSender<InputEvent>,
    cancel: CancellationToken,
}

impl ShowHandle {
    pub(crate) fn new(
        inputs: mpsc::UnboundedSender<InputEvent>,
        cancel: CancellationToken,
    ) -> Self {
        Self { inputs, cancel }
    }

    /// Delivers a broadcast input. Never blocks; lost if the show's run
    /// future has already returned, which is fine; its completion report
    /// is already on the way.
    pub fn input(&self, event: InputEvent) {
        let _ = self.inputs.send(event);
    }

    /// Requests cooperative termination. Idempotent: a second call while
    /// the show is already terminating is a no-op.
    pub fn terminate(&self) {
        self.cancel.cancel();
    }

    /// True once termination has been requested.
    pub fn is_terminating(&self) -> bool {
        self.cancel.is_cancelled()
    }
}

/// How a show's run future ended, as seen by the supervisor.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ShowOutcome {
    /// Normal completion.
    Completed,
    /// Completion demanding a host shutdown at session end.
    ForceShutdown,
    /// The run future returned an error.
    Failed(Arc<str>),
}

impl ShowOutcome {
    /// Returns a short stable label (snake_case) for logs.
    pub fn as_label(&self) -> &'static str {
        match self {
            ShowOutcome::Completed => "completed",
            ShowOutcome::ForceShutdown => "force_shutdown",
            ShowOutcome::Failed(_) => "failed",
        }
    }
}

/// Completion report sent on the supervisor's completion channel when a
/// show's run future returns.
#[derive(Debug, Clone)]
pub struct ShowEnded {
    /// Reference of the show that ended.
    pub reference: Arc<str>,
    /// How it ended.
    pub outcome: ShowOutcome,
}
