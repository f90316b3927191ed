//! The show contract: an async, cancellable presentation unit.
//!
//! A show's whole lifetime is one call to [`Show::run`]. The future runs
//! on the shared reactor alongside every other show and the orchestrator
//! loop, so it must never block the thread; it interleaves by awaiting
//! its own timers, its input stream, and its cancellation token.
//!
//! ## Contract
//! - **Input**: read [`ShowContext::next_input`]; symbols the show does
//!   not recognise are ignored, never an error. There is no focus model:
//!   every live show sees every non-reserved symbol and filters for
//!   itself (usually through [`ShowContext::operation_for`]).
//! - **Termination**: watch [`ShowContext::cancelled`] and return
//!   promptly once it fires, cleaning up own state (and any nested shows)
//!   first. Cancellation is advisory; there is no forced kill. A show
//!   that never returns holds the whole session in its termination grace
//!   window.
//! - **Completion**: return [`ShowExit::Completed`] for a normal end,
//!   [`ShowExit::ForceShutdown`] to escalate the session end into a host
//!   shutdown, or `Err(ShowError)` to tear the session down with reason
//!   `error`.

use std::borrow::Cow;
use std::future::Future;
use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::mpsc;
use tokio_util::sync::CancellationToken;

use crate::error::{PlayerError, ShowError};
use crate::events::{Bus, Event, EventKind};
use crate::input::InputEvent;
use crate::profile::{Controls, ResourceReader};
use crate::shows::ShowRecord;

/// How a show's run future ended, when it ended without error.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShowExit {
    /// Normal completion.
    Completed,
    /// Completion that escalates the session end into an OS shutdown,
    /// regardless of how termination was triggered.
    ForceShutdown,
}

/// Everything a running show is handed by the supervisor.
pub struct ShowContext {
    reference: Arc<str>,
    cancel: CancellationToken,
    inputs: mpsc::UnboundedReceiver<InputEvent>,
    bus: Bus,
    controls: Arc<Controls>,
    resources: Arc<ResourceReader>,
}

impl ShowContext {
    pub(crate) fn new(
        reference: Arc<str>,
        cancel: CancellationToken,
        inputs: mpsc::UnboundedReceiver<InputEvent>,
        bus: Bus,
        controls: Arc<Controls>,
        resources: Arc<ResourceReader>,
    ) -> Self {
        Self {
            reference,
            cancel,
            inputs,
            bus,
            controls,
            resources,
        }
    }

    /// The reference this show was started under.
    pub fn reference(&self) -> &str {
        &self.reference
    }

    /// True once termination has been requested.
    pub fn is_cancelled(&self) -> bool {
        self.cancel.is_cancelled()
    }

    /// Completes when termination is requested. Safe to await repeatedly.
    pub async fn cancelled(&self) {
        self.cancel.cancelled().await;
    }

    /// A clone of the termination token, for shows that select over
    /// cancellation while also borrowing the context mutably (input).
    pub fn cancel_token(&self) -> CancellationToken {
        self.cancel.clone()
    }

    /// Next broadcast input, or `None` if the supervisor dropped the show
    /// (only happens after cancellation).
    pub async fn next_input(&mut self) -> Option<InputEvent> {
        self.inputs.recv().await
    }

    /// Non-blocking input poll.
    pub fn try_input(&mut self) -> Option<InputEvent> {
        self.inputs.try_recv().ok()
    }

    /// The operation the profile binds to `symbol`, if any. Shows filter
    /// broadcast input with this.
    pub fn operation_for(&self, symbol: &str) -> Option<&str> {
        self.controls.operation_for(symbol)
    }

    /// Looks a value up in the resources file.
    ///
    /// A missing key is reported on the bus and returned as
    /// [`ShowError::ResourceMissing`]; propagating it out of `run` tears
    /// the session down through the normal error cascade.
    pub fn resource(&self, section: &str, item: &str) -> Result<&str, ShowError> {
        match self.resources.get(section, item) {
            Some(value) => Ok(value),
            None => {
                self.bus.publish(
                    Event::now(EventKind::ResourceMissing)
                        .with_show(self.reference.clone())
                        .with_reason(format!("{section}:{item}")),
                );
                Err(ShowError::ResourceMissing {
                    section: section.to_string(),
                    item: item.to_string(),
                })
            }
        }
    }

    /// The event bus, for shows that publish their own observability.
    pub fn bus(&self) -> &Bus {
        &self.bus
    }
}

/// An asynchronous, cancellable presentation unit.
#[async_trait]
pub trait Show: Send + Sync + 'static {
    /// The stable, profile-defined reference of this show.
    fn reference(&self) -> &str;

    /// Runs the show until it completes or termination is requested.
    async fn run(&self, ctx: ShowContext) -> Result<ShowExit, ShowError>;
}

/// Shared handle to a show implementation.
pub type ShowRef = Arc<dyn Show>;

/// Builds show instances from catalog records (external collaborator).
///
/// This is where presentation content enters the picture: the factory
/// maps a record's `type` and type-specific fields onto a concrete
/// [`Show`]. An unrecognised type is a [`PlayerError::ShowBuild`].
pub trait ShowFactory: Send + Sync + 'static {
    /// Builds the show described by `record`.
    fn build(&self, record: &ShowRecord) -> Result<ShowRef, PlayerError>;
}

/// Closure-backed show.
///
/// Each start produces a fresh future, so restarts never share mutable
/// state; share explicitly with `Arc` inside the closure if needed.
///
/// ## Example
/// ```rust
/// use showvisor::shows::{ShowContext, ShowExit, ShowFn, ShowRef};
///
/// let show: ShowRef = ShowFn::arc("idle", |ctx: ShowContext| async move {
///     ctx.cancelled().await;
///     Ok(ShowExit::Completed)
/// });
/// assert_eq!(show.reference(), "idle");
/// ```
pub struct ShowFn<F> {
    reference: Cow<'static, str>,
    f: F,
}

impl<F> ShowFn<F> {
    /// Creates a new closure-backed show.
    pub fn new(reference: impl Into<Cow<'static, str>>, f: F) -> Self {
        Self {
            reference: reference.into(),
            f,
        }
    }

    /// Creates the show and returns it as a shared handle.
    pub fn arc(reference: impl Into<Cow<'static, str>>, f: F) -> Arc<Self> {
        Arc::new(Self::new(reference, f))
    }
}

#[async_trait]
impl<F, Fut> Show for ShowFn<F>
where
    F: Fn(ShowContext) -> Fut + Send + Sync + 'static,
    Fut: Future<Output = Result<ShowExit, ShowError>> + Send + 'static,
{
    fn reference(&self) -> &str {
        &self.reference
    }

    async fn run(&self, ctx: ShowContext) -> Result<ShowExit, ShowError> {
        (self.f)(ctx).await
    }
}
