//! Shows: the presentation-unit contract and the profile's show catalog.
//!
//! A **show** is a self-contained, independently lifecycled presentation
//! unit: a slideshow, a media loop, a clock. The player does not render
//! anything itself; it starts shows, routes symbolic input to them, and
//! asks them to terminate. What a show paints is entirely its own
//! business, including any nested shows it supervises internally (the
//! player only ever sees its direct children).
//!
//! ## Contents
//! - [`Show`], [`ShowRef`], [`ShowFn`] — the async show contract and a
//!   closure-backed implementation for tests and demos
//! - [`ShowContext`] — what a running show is handed: its input stream,
//!   cancellation token, controls table and resources
//! - [`ShowExit`], [`ShowFactory`] — completion outcomes and construction
//! - [`ShowHandle`], [`ShowEnded`], [`ShowOutcome`] — the supervisor-side
//!   capability and the completion report
//! - [`ShowCatalog`], [`ShowRecord`] — the profile's show-list

mod catalog;
mod handle;
mod show;

pub use catalog::{ShowCatalog, ShowRecord, STARTER_REFERENCE};
pub use handle::{ShowEnded, ShowHandle, ShowOutcome};
pub use show::{Show, ShowContext, ShowExit, ShowFactory, ShowFn, ShowRef};
