//! Simple logging subscriber for debugging and demos.
//!
//! [`LogWriter`] prints events to stdout in a human-readable format.
//!
//! ## Output format
//! ```text
//! [input] symbol=pp-exit source=keyboard
//! [starting] show=slideshow
//! [ended] show=slideshow outcome=completed
//! [terminate-requested] reason=killed
//! [all-shows-ended] reason=killed
//! [shutdown-deferred]
//! [grace-exceeded] stuck=slideshow
//! ```

use async_trait::async_trait;

use crate::events::{Event, EventKind};
use crate::subscribers::Subscribe;

/// Simple stdout logging subscriber.
///
/// Useful for development and demos. Implement a custom [`Subscribe`] for
/// structured logging or metrics collection.
pub struct LogWriter;

#[async_trait]
impl Subscribe for LogWriter {
    async fn on_event(&self, e: &Event) {
        match e.kind {
            EventKind::InputReceived => {
                if let Some(symbol) = &e.symbol {
                    let source = e.source.map(|s| s.as_label()).unwrap_or("unknown");
                    println!("[input] symbol={symbol} source={source}");
                }
            }
            EventKind::ShowStarting => {
                println!("[starting] show={:?}", e.show);
            }
            EventKind::ShowEnded => {
                println!("[ended] show={:?} outcome={:?}", e.show, e.reason);
            }
            EventKind::TerminateRequested => {
                println!("[terminate-requested] reason={:?}", e.reason);
            }
            EventKind::AllShowsEnded => {
                println!("[all-shows-ended] reason={:?}", e.reason);
            }
            EventKind::ShutdownRequested => {
                println!("[shutdown-requested]");
            }
            EventKind::ShutdownDeferred => {
                println!("[shutdown-deferred]");
            }
            EventKind::GraceExceeded => {
                println!("[grace-exceeded] stuck={:?}", e.reason);
            }
            EventKind::ResourceMissing => {
                println!("[resource-missing] show={:?} key={:?}", e.show, e.reason);
            }
            EventKind::SubscriberOverflow => {
                println!("[subscriber-overflow] name={:?} reason={:?}", e.show, e.reason);
            }
            EventKind::SubscriberPanicked => {
                println!("[subscriber-panicked] name={:?} info={:?}", e.show, e.reason);
            }
        }
    }

    fn name(&self) -> &'static str {
        "log"
    }
}
