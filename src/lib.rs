//! # showvisor
//!
//! **Showvisor** is the show-lifecycle orchestration core of an
//! exhibit-presentation player.
//!
//! It runs a profile's shows concurrently on one reactor, routes symbolic
//! input to them, and ends the session through a cooperative termination
//! cascade. Presentation content (media decoding, rendering, nested show
//! types) is supplied by the embedding application through the
//! [`ShowFactory`] seam; this crate owns the lifecycle only.
//!
//! ## Architecture
//! ### Overview
//! ```text
//!     ┌──────────────┐   ┌──────────────┐   ┌──────────────┐
//!     │  ShowRecord  │   │  ShowRecord  │   │  ShowRecord  │
//!     │ (show-list)  │   │ (show-list)  │   │ (show-list)  │
//!     └──────┬───────┘   └──────┬───────┘   └──────┬───────┘
//!            ▼                  ▼                  ▼
//! ┌───────────────────────────────────────────────────────────────┐
//! │  Player (session orchestrator, single select loop)            │
//! │  - ShowSupervisor (registry, termination tally)               │
//! │  - InputPort (one stream of symbolic inputs)                  │
//! │  - GpioDriver / TimeOfDayDriver (poll loops on the reactor)   │
//! │  - Bus (broadcast events) ──► SubscriberSet (per-sub queues)  │
//! └──────┬──────────────────┬──────────────────┬──────────────────┘
//!        ▼                  ▼                  ▼
//!     ┌──────────────┐   ┌──────────────┐   ┌──────────────┐
//!     │  Show::run() │   │  Show::run() │   │  Show::run() │
//!     │ (cancellable │   │   future)    │   │              │
//!     └──────────────┘   └──────────────┘   └──────────────┘
//! ```
//!
//! ### Lifecycle
//! ```text
//! PlayerBuilder ──► Player::run()
//!
//! init:
//!   ├─► check profile issue against PLAYER_ISSUE
//!   ├─► read the `start` record's start-show list
//!   ├─► start every boot show (catalog ─► factory ─► spawn)
//!   └─► start the poll drivers
//!
//! loop {
//!   ├─ input:       reserved symbol ─► session control
//!   │               anything else  ─► broadcast to all live shows
//!   ├─ completion:  clear registry slot, decrement termination tally
//!   ├─ deferred:    shutdown control still held? ─► terminate + shutdown
//!   ├─ grace:       shows still live ─► Err(GraceExceeded)
//!   └─ OS signal:   terminate (killed)
//! }
//!
//! end: tidy up (screen blanking, drivers), flush subscribers,
//!      schedule OS shutdown if required
//! ```
//!
//! ## Features
//! | Area               | Description                                                    | Key types / traits                        |
//! |--------------------|----------------------------------------------------------------|-------------------------------------------|
//! | **Shows**          | Async, cancellable presentation units built by your factory.   | [`Show`], [`ShowFn`], [`ShowFactory`]     |
//! | **Orchestration**  | Session lifecycle, termination cascade, deferred shutdown.     | [`Player`], [`PlayerBuilder`]             |
//! | **Input**          | Symbolic input from keys, clicks, GPIO edges, clock times.     | [`InputPort`], [`GpioDriver`]             |
//! | **Profile**        | Show-list, control bindings, resources, layered search path.   | [`ShowCatalog`], [`Controls`]             |
//! | **Subscriber API** | Hook into lifecycle events (logging, metrics, dashboards).     | [`Subscribe`], [`LogWriter`]              |
//! | **Errors**         | Typed errors for the player and for shows.                     | [`PlayerError`], [`ShowError`]            |
//! | **Configuration**  | Centralised runtime settings.                                  | [`PlayerConfig`]                          |
//!
//! ## Example
//! ```rust
//! use std::sync::Arc;
//! use showvisor::{Player, PlayerBuilder, PlayerConfig};
//! use showvisor::core::NullHost;
//! use showvisor::error::PlayerError;
//! use showvisor::shows::{
//!     ShowCatalog, ShowContext, ShowExit, ShowFactory, ShowFn, ShowRecord, ShowRef,
//! };
//!
//! struct Factory;
//!
//! impl ShowFactory for Factory {
//!     fn build(&self, record: &ShowRecord) -> Result<ShowRef, PlayerError> {
//!         match record.show_type.as_str() {
//!             "idle" => Ok(ShowFn::arc(record.reference.clone(), |ctx: ShowContext| async move {
//!                 ctx.cancelled().await;
//!                 Ok(ShowExit::Completed)
//!             })),
//!             other => Err(PlayerError::ShowBuild {
//!                 reference: record.reference.clone(),
//!                 message: format!("unknown show type: {other}"),
//!             }),
//!         }
//!     }
//! }
//!
//! #[tokio::main(flavor = "current_thread")]
//! async fn main() -> Result<(), PlayerError> {
//!     let catalog = ShowCatalog::from_records(
//!         "1.2",
//!         vec![
//!             ShowRecord::new("start", "start").with_start_show("welcome"),
//!             ShowRecord::new("welcome", "idle"),
//!         ],
//!     );
//!     let player = PlayerBuilder::new(PlayerConfig::default(), catalog, Arc::new(Factory))
//!         .with_host(Arc::new(NullHost))
//!         .build();
//!
//!     let port = player.input_port();
//!     port.press(
//!         showvisor::input::EXIT_SYMBOL,
//!         showvisor::input::Edge::Rising,
//!         showvisor::input::InputSource::External,
//!     );
//!     player.run().await
//! }
//! ```

pub mod core;
pub mod error;
pub mod events;
pub mod input;
pub mod profile;
pub mod shows;
pub mod subscribers;

/// Show-list issue this player understands. Profiles carrying a different
/// issue are refused at start-up.
pub const PLAYER_ISSUE: &str = "1.2";

pub use crate::core::{
    AllShowsEnded, HostSystem, NullHost, Player, PlayerBuilder, PlayerConfig, ShowSupervisor,
    SystemHost,
};
pub use crate::error::{PlayerError, ShowError};
pub use crate::events::{Bus, EndReason, Event, EventKind};
pub use crate::input::{GpioDriver, InputEvent, InputPort, TimeOfDayDriver};
pub use crate::profile::{Controls, ResourceReader, SearchPath};
pub use crate::shows::{Show, ShowCatalog, ShowFactory, ShowFn, ShowRecord, ShowRef};
pub use crate::subscribers::{LogWriter, Subscribe, SubscriberSet};
