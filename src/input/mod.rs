//! Symbolic input: the event model, the injection port, and the drivers.
//!
//! Every physical input (a key press, a click on a screen region, a GPIO
//! pin edge, a time-of-day boundary) is abstracted into an [`InputEvent`]
//! carrying a profile-defined **symbolic name** (e.g. `pp-exit`). The
//! orchestrator consumes one stream of these events and neither knows nor
//! cares which driver produced them.
//!
//! ## Architecture
//! ```text
//! event-driven glue:                       poll-driven drivers:
//!   KeyboardMap::press ──┐                   GpioDriver (50ms interval)
//!   ClickAreas::click  ──┤                   TimeOfDayDriver (500ms interval)
//!   window-close glue  ──┤                        │
//!                        ▼                        ▼
//!                   InputPort ──────────────► mpsc channel ──► Player loop
//! ```
//!
//! Poll-driven drivers run as self-rescheduling interval loops on the same
//! reactor as the orchestrator; from the player's perspective a synthesized
//! event is indistinguishable from a key press.
//!
//! ## Reserved symbols
//! Three symbols are control inputs handled by the orchestrator itself and
//! never broadcast to shows: [`EXIT_SYMBOL`], [`SHUTDOWN_SYMBOL`],
//! [`SHUTDOWN_NOW_SYMBOL`]. Every other symbol is delivered to all live
//! shows, which filter for themselves.

mod gpio;
mod keyboard;
mod screen;
mod timeofday;

pub use gpio::{GpioDriver, GpioPins, PinBinding};
pub use keyboard::KeyboardMap;
pub use screen::{ClickArea, ClickAreas};
pub use timeofday::{Clock, SystemClock, TimeOfDayDriver, TimeTrigger};

use std::sync::Arc;

use tokio::sync::mpsc;

/// Exit control symbol: terminate all shows and end the session.
pub const EXIT_SYMBOL: &str = "pp-exit";

/// Delay-class shutdown symbol: schedule a deferred confirmation check.
pub const SHUTDOWN_SYMBOL: &str = "pp-shutdown";

/// Immediate shutdown symbol: terminate and shut the host down.
pub const SHUTDOWN_NOW_SYMBOL: &str = "pp-shutdownnow";

/// Which physical surface produced an input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputSource {
    /// A bound keyboard key.
    Keyboard,
    /// A screen click/touch region.
    Screen,
    /// A GPIO pin edge.
    Gpio,
    /// A time-of-day boundary crossing.
    TimeOfDay,
    /// Injected by the embedding application.
    External,
}

impl InputSource {
    /// Returns a short stable label (snake_case) for logs.
    pub fn as_label(&self) -> &'static str {
        match self {
            InputSource::Keyboard => "keyboard",
            InputSource::Screen => "screen",
            InputSource::Gpio => "gpio",
            InputSource::TimeOfDay => "time_of_day",
            InputSource::External => "external",
        }
    }
}

/// Signal edge an input was observed on.
///
/// Key presses and clicks are rising edges; GPIO bindings may fire on
/// either edge.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Edge {
    /// Inactive-to-active transition (press, pin high).
    Rising,
    /// Active-to-inactive transition (release, pin low).
    Falling,
}

/// A symbolic input event, abstracted away from its physical source.
#[derive(Debug, Clone)]
pub struct InputEvent {
    /// Profile-defined symbolic name (e.g. `pp-exit`, `slideshow-next`).
    pub symbol: Arc<str>,
    /// Edge the input was observed on.
    pub edge: Edge,
    /// Surface that produced the input.
    pub source: InputSource,
}

impl InputEvent {
    /// Creates an input event.
    pub fn new(symbol: impl Into<Arc<str>>, edge: Edge, source: InputSource) -> Self {
        Self {
            symbol: symbol.into(),
            edge,
            source,
        }
    }
}

/// Cloneable handle for injecting symbolic inputs into the player loop.
///
/// Event-driven glue (keyboard bindings, click areas, the window-close
/// handler) calls [`press`](InputPort::press); poll drivers send through a
/// clone of the same port, so there is exactly one dispatch path.
#[derive(Clone, Debug)]
pub struct InputPort {
    tx: mpsc::UnboundedSender<InputEvent>,
}

impl InputPort {
    /// Creates a port and the receiver the player loop consumes.
    pub fn channel() -> (Self, mpsc::UnboundedReceiver<InputEvent>) {
        let (tx, rx) = mpsc::unbounded_channel();
        (Self { tx }, rx)
    }

    /// Injects a symbolic input. Never blocks; lost if the player loop has
    /// already exited.
    pub fn press(&self, symbol: impl Into<Arc<str>>, edge: Edge, source: InputSource) {
        let _ = self.tx.send(InputEvent::new(symbol, edge, source));
    }

    /// Injects a ready-made event.
    pub fn send(&self, event: InputEvent) {
        let _ = self.tx.send(event);
    }
}
