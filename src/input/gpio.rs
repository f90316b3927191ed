//! GPIO input driver: turns pin edges into symbolic inputs by polling.
//!
//! GPIO pins are not event-driven here; the driver runs a short-period
//! interval loop (50ms by default) on the same reactor as everything
//! else, diffs pin levels against the previous tick, and synthesizes an
//! [`InputEvent`] for each configured edge. The electrical layer (pin
//! modes, pull-ups, debouncing hardware) stays behind the [`GpioPins`]
//! trait.
//!
//! ## Lifecycle
//! ```text
//! init()  ──► backend setup, snapshot initial levels
//! poll()  ──► spawn interval loop:
//!               tick ─► diff levels ─► port.press(symbol, edge, Gpio)
//! terminate() ──► cancel the loop (idempotent, safe if never polled)
//! ```
//!
//! The driver also answers [`shutdown_pressed`](GpioDriver::shutdown_pressed),
//! which the orchestrator's deferred-shutdown check consults after the
//! shutdown delay.

use std::sync::Arc;
use std::time::Duration;

use tokio::time;
use tokio_util::sync::CancellationToken;

use super::{Edge, InputEvent, InputPort, InputSource};
use crate::error::PlayerError;

/// Electrical GPIO backend (external collaborator).
///
/// Implementations own pin configuration and level reading; reads must be
/// fast and non-blocking, they run on the shared reactor thread.
pub trait GpioPins: Send + Sync + 'static {
    /// Configures the pins. Called once from [`GpioDriver::init`].
    fn setup(&self) -> Result<(), String>;

    /// Current level of a pin (`true` = active).
    fn level(&self, pin: u8) -> bool;

    /// True while the physical shutdown control is held.
    fn shutdown_pressed(&self) -> bool;
}

/// Binding of one pin to symbolic names, per edge.
#[derive(Debug, Clone)]
pub struct PinBinding {
    /// Pin number, backend numbering.
    pub pin: u8,
    /// Symbol fired on the inactive-to-active transition.
    pub rising: Option<Arc<str>>,
    /// Symbol fired on the active-to-inactive transition.
    pub falling: Option<Arc<str>>,
}

impl PinBinding {
    /// Binding that fires `symbol` on the rising edge only.
    pub fn rising(pin: u8, symbol: impl Into<Arc<str>>) -> Self {
        Self {
            pin,
            rising: Some(symbol.into()),
            falling: None,
        }
    }
}

/// Poll-driven GPIO input driver.
pub struct GpioDriver {
    pins: Arc<dyn GpioPins>,
    bindings: Arc<[PinBinding]>,
    period: Duration,
    port: InputPort,
    cancel: CancellationToken,
}

impl GpioDriver {
    /// Creates a driver over the given backend and bindings.
    pub fn new(
        pins: Arc<dyn GpioPins>,
        bindings: Vec<PinBinding>,
        period: Duration,
        port: InputPort,
    ) -> Self {
        Self {
            pins,
            bindings: bindings.into(),
            period,
            port,
            cancel: CancellationToken::new(),
        }
    }

    /// Sets the backend up. Failure is a fatal initialisation error.
    pub fn init(&self) -> Result<(), PlayerError> {
        self.pins
            .setup()
            .map_err(|message| PlayerError::GpioInit { message })
    }

    /// Spawns the self-rescheduling poll loop.
    ///
    /// Each tick diffs pin levels against the previous tick and injects
    /// one event per observed edge. The loop exits when
    /// [`terminate`](Self::terminate) is called.
    pub fn poll(&self) {
        let pins = Arc::clone(&self.pins);
        let bindings = Arc::clone(&self.bindings);
        let port = self.port.clone();
        let cancel = self.cancel.clone();
        let period = self.period;

        tokio::spawn(async move {
            let mut last: Vec<bool> = bindings.iter().map(|b| pins.level(b.pin)).collect();
            let mut ticks = time::interval(period);
            ticks.set_missed_tick_behavior(time::MissedTickBehavior::Skip);
            // the first interval tick fires immediately
            ticks.tick().await;

            loop {
                tokio::select! {
                    _ = cancel.cancelled() => break,
                    _ = ticks.tick() => {
                        for (binding, prev) in bindings.iter().zip(last.iter_mut()) {
                            let cur = pins.level(binding.pin);
                            if cur == *prev {
                                continue;
                            }
                            *prev = cur;
                            let (edge, symbol) = if cur {
                                (Edge::Rising, &binding.rising)
                            } else {
                                (Edge::Falling, &binding.falling)
                            };
                            if let Some(symbol) = symbol {
                                port.send(InputEvent::new(
                                    symbol.clone(),
                                    edge,
                                    InputSource::Gpio,
                                ));
                            }
                        }
                    }
                }
            }
        });
    }

    /// Stops the poll loop. Idempotent; safe if `poll` was never called.
    pub fn terminate(&self) {
        self.cancel.cancel();
    }

    /// True while the physical shutdown control is held.
    pub fn shutdown_pressed(&self) -> bool {
        self.pins.shutdown_pressed()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicBool, Ordering};

    struct FakePins {
        level: AtomicBool,
        held: AtomicBool,
    }

    impl GpioPins for FakePins {
        fn setup(&self) -> Result<(), String> {
            Ok(())
        }
        fn level(&self, _pin: u8) -> bool {
            self.level.load(Ordering::SeqCst)
        }
        fn shutdown_pressed(&self) -> bool {
            self.held.load(Ordering::SeqCst)
        }
    }

    #[tokio::test(start_paused = true)]
    async fn test_rising_edge_fires_once() {
        let pins = Arc::new(FakePins {
            level: AtomicBool::new(false),
            held: AtomicBool::new(false),
        });
        let (port, mut rx) = InputPort::channel();
        let driver = GpioDriver::new(
            pins.clone(),
            vec![PinBinding::rising(17, "pp-exit")],
            Duration::from_millis(50),
            port,
        );
        driver.init().unwrap();
        driver.poll();

        // steady level: no events
        time::advance(Duration::from_millis(120)).await;
        assert!(rx.try_recv().is_err());

        // one rising edge: exactly one event, however many ticks pass
        pins.level.store(true, Ordering::SeqCst);
        time::advance(Duration::from_millis(200)).await;
        let ev = rx.recv().await.unwrap();
        assert_eq!(&*ev.symbol, "pp-exit");
        assert_eq!(ev.edge, Edge::Rising);
        assert_eq!(ev.source, InputSource::Gpio);
        assert!(rx.try_recv().is_err());

        driver.terminate();
        driver.terminate(); // idempotent
    }

    #[tokio::test(start_paused = true)]
    async fn test_falling_edge_without_binding_is_silent() {
        let pins = Arc::new(FakePins {
            level: AtomicBool::new(true),
            held: AtomicBool::new(false),
        });
        let (port, mut rx) = InputPort::channel();
        let driver = GpioDriver::new(
            pins.clone(),
            vec![PinBinding::rising(4, "clock-dim")],
            Duration::from_millis(50),
            port,
        );
        driver.poll();

        pins.level.store(false, Ordering::SeqCst);
        time::advance(Duration::from_millis(200)).await;
        assert!(rx.try_recv().is_err());
        driver.terminate();
    }
}
