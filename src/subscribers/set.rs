//! Non-blocking event fan-out to multiple subscribers.
//!
//! Provides [`SubscriberSet`] — distributes events to multiple
//! subscribers concurrently without blocking the publisher. The player
//! loop pumps bus events into the set; `emit` must stay cheap because it
//! runs between input handling and show completions.
//!
//! ## Architecture
//! ```text
//! emit(event)
//!     │
//!     ├──► [queue 1] ──► worker 1 ──► subscriber1.on_event()
//!     │    (bounded)         └──────► panic → SubscriberPanicked
//!     ├──► [queue 2] ──► worker 2 ──► subscriber2.on_event()
//!     │    (bounded)
//!     └──► [queue N] ──► worker N ──► subscriberN.on_event()
//!          (bounded)
//! ```
//!
//! ## Rules
//! - **No cross-subscriber ordering**: use `Event::seq` to restore order
//! - **Overflow**: event dropped for that subscriber only, `SubscriberOverflow` published
//! - **Non-blocking**: `emit()` returns immediately (uses `try_send`)
//! - **Isolation**: a slow or panicking subscriber doesn't affect others
//! - **Per-subscriber FIFO**: each subscriber sees events in order
//!
//! ## Panic handling
//! Worker tasks use `catch_unwind`: the panic is converted to a
//! `SubscriberPanicked` event and the worker moves on to the next event.
//!
//! **Warning**: `AssertUnwindSafe` is used, which can leave shared state
//! inconsistent if a subscriber panics while holding a lock.

use std::any::Any;
use std::sync::Arc;

use futures::future::join_all;
use futures::FutureExt;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;

use crate::events::{Bus, Event, EventKind};
use crate::subscribers::Subscribe;

/// Pump-side end of one subscriber's queue.
struct Outbox {
    name: &'static str,
    queue: mpsc::Sender<Arc<Event>>,
}

/// Fan-out coordinator for the event subscribers.
///
/// Owned by the player, which is the sole pump: its loop forwards every
/// bus event through [`emit_arc`](Self::emit_arc) and calls
/// [`shutdown`](Self::shutdown) once the session is over.
pub struct SubscriberSet {
    outboxes: Vec<Outbox>,
    workers: Vec<JoinHandle<()>>,
    bus: Bus,
}

impl SubscriberSet {
    /// Creates the set, one queue and worker per subscriber.
    #[must_use]
    pub fn new(subs: Vec<Arc<dyn Subscribe>>, bus: Bus) -> Self {
        let mut set = Self {
            outboxes: Vec::with_capacity(subs.len()),
            workers: Vec::with_capacity(subs.len()),
            bus,
        };
        for sub in subs {
            set.attach(sub);
        }
        set
    }

    /// Wires one subscriber in: a bounded queue (capacity from
    /// [`Subscribe::queue_capacity`], minimum 1) drained by a dedicated
    /// worker that lives until the queue closes.
    fn attach(&mut self, sub: Arc<dyn Subscribe>) {
        let (queue, rx) = mpsc::channel(sub.queue_capacity().max(1));
        self.outboxes.push(Outbox {
            name: sub.name(),
            queue,
        });
        self.workers.push(spawn_worker(sub, rx, self.bus.clone()));
    }

    /// Emits an event to all subscribers (clones the event).
    pub fn emit(&self, event: &Event) {
        self.emit_arc(Arc::new(event.clone()));
    }

    /// Emits a pre-allocated `Arc<Event>` to all subscribers.
    ///
    /// Never blocks the player loop: a queue that cannot take the event
    /// right now (full, or its worker is gone) simply does not get it,
    /// and a `SubscriberOverflow` naming the subscriber is published in
    /// its place.
    pub fn emit_arc(&self, event: Arc<Event>) {
        // an overflow report that itself overflows is dropped silently,
        // otherwise a full queue would generate reports forever
        let reportable = event.kind != EventKind::SubscriberOverflow;

        for outbox in &self.outboxes {
            let dropped = match outbox.queue.try_send(Arc::clone(&event)) {
                Ok(()) => continue,
                Err(mpsc::error::TrySendError::Full(_)) => "full",
                Err(mpsc::error::TrySendError::Closed(_)) => "closed",
            };
            if reportable {
                self.bus
                    .publish(Event::subscriber_overflow(outbox.name, dropped));
            }
        }
    }

    /// Closes every queue and waits for the workers to drain them.
    pub async fn shutdown(self) {
        drop(self.outboxes);
        let _ = join_all(self.workers).await;
    }
}

/// Drains one subscriber's queue, converting panics into
/// `SubscriberPanicked` events so the worker outlives them.
fn spawn_worker(
    sub: Arc<dyn Subscribe>,
    mut queue: mpsc::Receiver<Arc<Event>>,
    bus: Bus,
) -> JoinHandle<()> {
    tokio::spawn(async move {
        while let Some(event) = queue.recv().await {
            let delivery = std::panic::AssertUnwindSafe(sub.on_event(&event)).catch_unwind();
            if let Err(payload) = delivery.await {
                bus.publish(Event::subscriber_panicked(sub.name(), panic_text(&*payload)));
            }
        }
    })
}

fn panic_text(payload: &(dyn Any + Send)) -> String {
    if let Some(text) = payload.downcast_ref::<&str>() {
        (*text).to_string()
    } else if let Some(text) = payload.downcast_ref::<String>() {
        text.clone()
    } else {
        "unknown panic".to_string()
    }
}
