//! Runtime events: types and broadcast bus.
//!
//! This module groups the event **data model** and the **bus** used to
//! publish/subscribe to lifecycle events emitted by the orchestrator,
//! the show supervisor, the input drivers and the subscriber workers.
//!
//! ## Contents
//! - [`EventKind`], [`Event`] — event classification and payload metadata
//! - [`EndReason`] — why a run (or a termination cascade) ended
//! - [`Bus`] — thin wrapper over `tokio::sync::broadcast`
//!
//! ## Quick reference
//! - **Publishers**: `Player`, `ShowSupervisor`, `GpioDriver`,
//!   `TimeOfDayDriver`, `SubscriberSet` workers (overflow/panic).
//! - **Consumers**: the player loop's subscriber pump (fans out to the
//!   `SubscriberSet`), and anything that calls `Bus::subscribe`
//!   directly (tests, embedding applications).

mod bus;
mod event;

pub use bus::Bus;
pub use event::{EndReason, Event, EventKind};
