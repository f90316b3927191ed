//! Event subscribers for the player runtime.
//!
//! This module provides the [`Subscribe`] trait, the [`SubscriberSet`]
//! fan-out, and the built-in [`LogWriter`].
//!
//! ## Architecture
//! ```text
//! Event flow:
//!   Player ── publish(Event) ──► Bus ──► player loop pump
//!                                            │
//!                                       SubscriberSet
//!                                            │
//!                                  ┌─────────┼─────────┐
//!                                  ▼         ▼         ▼
//!                              LogWriter  Metrics   Custom ...
//! ```
//!
//! ## Implementing custom subscribers
//! ```rust
//! use async_trait::async_trait;
//! use showvisor::events::{Event, EventKind};
//! use showvisor::subscribers::Subscribe;
//!
//! struct ExitCounter;
//!
//! #[async_trait]
//! impl Subscribe for ExitCounter {
//!     async fn on_event(&self, event: &Event) {
//!         if matches!(event.kind, EventKind::AllShowsEnded) {
//!             // export a metric, etc.
//!         }
//!     }
//!     fn name(&self) -> &'static str { "exit-counter" }
//! }
//! ```

mod log;
mod set;
mod subscriber;

pub use log::LogWriter;
pub use set::SubscriberSet;
pub use subscriber::Subscribe;
