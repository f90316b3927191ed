//! The player: session lifecycle orchestration on one reactor.
//!
//! [`Player`] ties everything together: it validates the profile, starts
//! the boot shows through the [`ShowSupervisor`], runs the single select
//! loop every other component feeds, and tears the session down through
//! the termination cascade when an exit condition fires.
//!
//! ## Architecture
//! ```text
//!                    ┌────────────────────────────────────────────┐
//!  InputPort ───────►│                                            │
//!  show completions ─►│           Player select loop              │──► Bus ──► SubscriberSet
//!  deferred timer ───►│  (single thread of control; registry and  │
//!  grace timer ──────►│   supervisor are only touched from here)  │
//!  OS signals ───────►│                                            │
//!                    └────────────────────────────────────────────┘
//! ```
//!
//! ## Exit conditions
//! - `pp-exit` input, or an OS termination signal: terminate all shows,
//!   end the session (`killed`).
//! - `pp-shutdown`: publish `ShutdownDeferred` and re-check after the
//!   configured delay; if the physical shutdown control is still held the
//!   session ends as `pp-shutdownnow`, otherwise play continues.
//! - `pp-shutdownnow`: terminate and schedule an OS shutdown.
//! - The last show ends of its own accord (`normal`), or a show fails
//!   (`error`, the player run returns `Err`).
//! - A show outlives the termination grace window: the run is abandoned
//!   with [`PlayerError::GraceExceeded`] naming the stuck shows.
//!
//! ## Rules
//! - Reserved symbols are consumed here and never reach the shows.
//! - An OS shutdown is scheduled at most once, as the very last side
//!   effect of the run, after tidy-up and subscriber shutdown.
//! - Without a GPIO backend a deferred shutdown can never be confirmed,
//!   so `pp-shutdown` is a no-op beyond the deferred check itself.

use std::pin::Pin;
use std::sync::Arc;

use tokio::sync::{broadcast, mpsc};
use tokio::time;

use crate::core::config::PlayerConfig;
use crate::core::host::{HostSystem, SystemHost};
use crate::core::shutdown::wait_for_shutdown_signal;
use crate::core::supervisor::{AllShowsEnded, ShowSupervisor};
use crate::error::PlayerError;
use crate::events::{Bus, EndReason, Event, EventKind};
use crate::input::{
    Clock, GpioDriver, GpioPins, InputEvent, InputPort, PinBinding, SystemClock, TimeOfDayDriver,
    TimeTrigger, EXIT_SYMBOL, SHUTDOWN_NOW_SYMBOL, SHUTDOWN_SYMBOL,
};
use crate::profile::{Controls, ResourceReader};
use crate::shows::{ShowCatalog, ShowFactory, ShowOutcome, STARTER_REFERENCE};
use crate::subscribers::{Subscribe, SubscriberSet};

/// One-shot timers armed and disarmed by the loop.
type Timer = Option<Pin<Box<time::Sleep>>>;

/// Completes when the timer is armed and elapsed; pends forever otherwise.
async fn armed(timer: &mut Timer) {
    match timer.as_mut() {
        Some(sleep) => sleep.as_mut().await,
        None => futures::future::pending().await,
    }
}

/// Session lifecycle phase.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum PlayerState {
    Initializing,
    Running,
    Terminating,
}

/// Builder for [`Player`].
///
/// ## Example
/// ```rust,no_run
/// use std::sync::Arc;
/// use showvisor::{PlayerBuilder, PlayerConfig};
/// use showvisor::core::NullHost;
/// use showvisor::shows::{ShowCatalog, ShowRecord};
/// use showvisor::subscribers::LogWriter;
/// # use showvisor::shows::{ShowFactory, ShowRecord as R, ShowRef};
/// # use showvisor::error::PlayerError;
/// # struct F;
/// # impl ShowFactory for F {
/// #     fn build(&self, _r: &R) -> Result<ShowRef, PlayerError> { unimplemented!() }
/// # }
///
/// # async fn demo() -> Result<(), PlayerError> {
/// let catalog = ShowCatalog::from_records(
///     "1.2",
///     vec![
///         ShowRecord::new("start", "start").with_start_show("slideshow"),
///         ShowRecord::new("slideshow", "mediashow"),
///     ],
/// );
/// let player = PlayerBuilder::new(PlayerConfig::default(), catalog, Arc::new(F))
///     .with_subscribers(vec![Arc::new(LogWriter)])
///     .with_host(Arc::new(NullHost))
///     .build();
/// player.run().await
/// # }
/// ```
pub struct PlayerBuilder {
    config: PlayerConfig,
    catalog: ShowCatalog,
    factory: Arc<dyn ShowFactory>,
    controls: Arc<Controls>,
    resources: Arc<ResourceReader>,
    subscribers: Vec<Arc<dyn Subscribe>>,
    host: Arc<dyn HostSystem>,
    gpio: Option<(Arc<dyn GpioPins>, Vec<PinBinding>)>,
    triggers: Vec<TimeTrigger>,
    clock: Arc<dyn Clock>,
}

impl PlayerBuilder {
    /// Starts a builder from the three mandatory collaborators.
    pub fn new(config: PlayerConfig, catalog: ShowCatalog, factory: Arc<dyn ShowFactory>) -> Self {
        Self {
            config,
            catalog,
            factory,
            controls: Arc::new(Controls::empty()),
            resources: Arc::new(ResourceReader::empty()),
            subscribers: Vec::new(),
            host: Arc::new(SystemHost),
            gpio: None,
            triggers: Vec::new(),
            clock: Arc::new(SystemClock),
        }
    }

    /// Sets the control bindings handed to every show.
    pub fn with_controls(mut self, controls: Controls) -> Self {
        self.controls = Arc::new(controls);
        self
    }

    /// Sets the resources file handed to every show.
    pub fn with_resources(mut self, resources: ResourceReader) -> Self {
        self.resources = Arc::new(resources);
        self
    }

    /// Sets the event subscribers.
    pub fn with_subscribers(mut self, subscribers: Vec<Arc<dyn Subscribe>>) -> Self {
        self.subscribers = subscribers;
        self
    }

    /// Sets the host-system backend. Defaults to the real one.
    pub fn with_host(mut self, host: Arc<dyn HostSystem>) -> Self {
        self.host = host;
        self
    }

    /// Enables the GPIO driver over the given backend and bindings.
    pub fn with_gpio(mut self, pins: Arc<dyn GpioPins>, bindings: Vec<PinBinding>) -> Self {
        self.gpio = Some((pins, bindings));
        self
    }

    /// Enables the time-of-day driver with the given triggers.
    pub fn with_time_triggers(mut self, triggers: Vec<TimeTrigger>) -> Self {
        self.triggers = triggers;
        self
    }

    /// Overrides the wall clock used by the time-of-day driver.
    pub fn with_clock(mut self, clock: Arc<dyn Clock>) -> Self {
        self.clock = clock;
        self
    }

    /// Wires everything up. Nothing runs until [`Player::run`].
    pub fn build(self) -> Player {
        let bus = Bus::new(self.config.bus_capacity);
        let bus_rx = bus.subscribe();
        let subs = SubscriberSet::new(self.subscribers, bus.clone());
        let (port, input_rx) = InputPort::channel();
        let catalog = Arc::new(self.catalog);

        let gpio = self.gpio.map(|(pins, bindings)| {
            GpioDriver::new(pins, bindings, self.config.gpio_period, port.clone())
        });
        let tod = if self.triggers.is_empty() {
            None
        } else {
            Some(TimeOfDayDriver::new(
                self.clock,
                self.triggers,
                self.config.tod_period,
                port.clone(),
            ))
        };

        let supervisor = ShowSupervisor::new(
            Arc::clone(&catalog),
            self.factory,
            self.controls,
            self.resources,
            bus.clone(),
        );

        Player {
            config: self.config,
            catalog,
            supervisor,
            bus,
            bus_rx,
            subs,
            port,
            input_rx,
            gpio,
            tod,
            host: self.host,
            state: PlayerState::Initializing,
            shutdown_required: false,
        }
    }
}

/// The exhibit player runtime.
pub struct Player {
    config: PlayerConfig,
    catalog: Arc<ShowCatalog>,
    supervisor: ShowSupervisor,
    bus: Bus,
    bus_rx: broadcast::Receiver<Event>,
    subs: SubscriberSet,
    port: InputPort,
    input_rx: mpsc::UnboundedReceiver<InputEvent>,
    gpio: Option<GpioDriver>,
    tod: Option<TimeOfDayDriver>,
    host: Arc<dyn HostSystem>,
    state: PlayerState,
    shutdown_required: bool,
}

impl Player {
    /// A port for injecting symbolic inputs (keyboard glue, click areas,
    /// the embedding application).
    pub fn input_port(&self) -> InputPort {
        self.port.clone()
    }

    /// The event bus, for additional observers.
    pub fn bus(&self) -> &Bus {
        &self.bus
    }

    /// Runs the session to completion.
    ///
    /// Returns `Ok(())` on a `normal` or `killed` end,
    /// [`PlayerError::SessionError`] when the session ended because a
    /// show failed, [`PlayerError::GraceExceeded`] when termination timed
    /// out, or the initialisation error that prevented the session from
    /// starting.
    pub async fn run(mut self) -> Result<(), PlayerError> {
        let outcome = self.session().await;

        self.tidy_up();
        self.drain_events();
        let host = Arc::clone(&self.host);
        let shutdown_required = self.shutdown_required;
        self.subs.shutdown().await;

        let report = outcome?;
        match report.reason {
            EndReason::Error => Err(PlayerError::SessionError {
                message: report.message,
            }),
            _ => {
                if shutdown_required || report.force_shutdown {
                    host.schedule_shutdown();
                }
                Ok(())
            }
        }
    }

    /// Initialisation plus the select loop, up to the all-ended report.
    async fn session(&mut self) -> Result<AllShowsEnded, PlayerError> {
        self.catalog.check_issue(crate::PLAYER_ISSUE)?;
        let start_list = self
            .catalog
            .index_of(STARTER_REFERENCE)
            .and_then(|i| self.catalog.record(i))
            .ok_or(PlayerError::StarterShowMissing)?
            .start_show
            .clone();

        if let Some(gpio) = &self.gpio {
            gpio.init()?;
        }
        let mut completions = self.supervisor.init()?;
        self.supervisor.start_initial_shows(&start_list)?;
        if let Some(gpio) = &self.gpio {
            gpio.poll();
        }
        if let Some(tod) = &self.tod {
            tod.poll();
        }
        self.state = PlayerState::Running;

        let signal = wait_for_shutdown_signal();
        tokio::pin!(signal);
        let mut signal_armed = true;
        let mut deferred: Timer = None;
        let mut grace: Timer = None;

        let report = loop {
            tokio::select! {
                Some(event) = self.input_rx.recv() => {
                    if let Some(report) = self.on_input(event, &mut deferred, &mut grace) {
                        break report;
                    }
                }
                Some(ended) = completions.recv() => {
                    let failed = matches!(ended.outcome, ShowOutcome::Failed(_));
                    if let Some(report) = self.supervisor.on_show_ended(ended) {
                        break report;
                    }
                    if failed {
                        if let Some(report) = self.begin_terminate(EndReason::Error, &mut grace) {
                            break report;
                        }
                    }
                }
                _ = armed(&mut deferred) => {
                    deferred = None;
                    let held = self
                        .gpio
                        .as_ref()
                        .map(|g| g.shutdown_pressed())
                        .unwrap_or(false);
                    if held {
                        self.shutdown_required = true;
                        if let Some(report) = self.begin_terminate(EndReason::Killed, &mut grace) {
                            break report;
                        }
                    }
                }
                _ = armed(&mut grace) => {
                    let stuck = self.supervisor.stuck_shows();
                    self.bus.publish(
                        Event::now(EventKind::GraceExceeded).with_reason(stuck.join(",")),
                    );
                    return Err(PlayerError::GraceExceeded {
                        grace: self.config.grace,
                        stuck,
                    });
                }
                _ = &mut signal, if signal_armed => {
                    signal_armed = false;
                    self.bus.publish(Event::now(EventKind::ShutdownRequested));
                    if let Some(report) = self.begin_terminate(EndReason::Killed, &mut grace) {
                        break report;
                    }
                }
                recv = self.bus_rx.recv() => {
                    match recv {
                        Ok(ev) => self.subs.emit_arc(Arc::new(ev)),
                        Err(broadcast::error::RecvError::Lagged(_)) => {}
                        Err(broadcast::error::RecvError::Closed) => {}
                    }
                }
            }
        };
        Ok(report)
    }

    /// Routes one symbolic input: reserved symbols drive the session,
    /// everything else is broadcast to the live shows.
    ///
    /// The edge is not consulted here. A profile may bind a reserved
    /// symbol to either edge of a GPIO pin (a normally-closed switch
    /// fires on the release), so whichever edge a driver synthesized
    /// the symbol on, it acts.
    fn on_input(
        &mut self,
        event: InputEvent,
        deferred: &mut Timer,
        grace: &mut Timer,
    ) -> Option<AllShowsEnded> {
        self.bus.publish(
            Event::now(EventKind::InputReceived)
                .with_symbol(event.symbol.clone())
                .with_source(event.source),
        );
        match &*event.symbol {
            EXIT_SYMBOL => self.begin_terminate(EndReason::Killed, grace),
            SHUTDOWN_SYMBOL => {
                if self.state == PlayerState::Running && deferred.is_none() {
                    self.bus.publish(Event::now(EventKind::ShutdownDeferred));
                    *deferred = Some(Box::pin(time::sleep(self.config.shutdown_delay)));
                }
                None
            }
            SHUTDOWN_NOW_SYMBOL => {
                self.shutdown_required = true;
                self.begin_terminate(EndReason::Killed, grace)
            }
            _ => {
                self.supervisor.input_pressed(&event);
                None
            }
        }
    }

    /// Starts the termination cascade once, arming the grace window when
    /// there are live shows to wait for.
    fn begin_terminate(&mut self, reason: EndReason, grace: &mut Timer) -> Option<AllShowsEnded> {
        if self.state != PlayerState::Running {
            return None;
        }
        self.state = PlayerState::Terminating;
        match self.supervisor.terminate(reason) {
            Some(report) => Some(report),
            None => {
                *grace = Some(Box::pin(time::sleep(self.config.grace)));
                None
            }
        }
    }

    /// Restores host state and stops the poll drivers.
    fn tidy_up(&mut self) {
        if self.config.restore_screen_blanking {
            self.host.set_screen_blanking(true);
        }
        if let Some(gpio) = &self.gpio {
            gpio.terminate();
        }
        if let Some(tod) = &self.tod {
            tod.terminate();
        }
    }

    /// Pumps events still sitting in the bus into the subscribers, so
    /// tidy-up and cascade events are not lost at shutdown.
    fn drain_events(&mut self) {
        loop {
            match self.bus_rx.try_recv() {
                Ok(ev) => self.subs.emit_arc(Arc::new(ev)),
                Err(broadcast::error::TryRecvError::Lagged(_)) => continue,
                Err(_) => break,
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
    use std::time::Duration;

    use crate::core::host::NullHost;
    use crate::error::ShowError;
    use crate::input::{Edge, InputSource};
    use crate::shows::{ShowContext, ShowExit, ShowFn, ShowRecord, ShowRef};

    struct MapFactory(std::collections::HashMap<String, ShowRef>);

    impl ShowFactory for MapFactory {
        fn build(&self, record: &ShowRecord) -> Result<ShowRef, PlayerError> {
            self.0
                .get(&record.reference)
                .cloned()
                .ok_or_else(|| PlayerError::ShowBuild {
                    reference: record.reference.clone(),
                    message: "no builder for type".to_string(),
                })
        }
    }

    #[derive(Default)]
    struct RecordingHost {
        shutdowns: AtomicUsize,
        blanking_restored: AtomicUsize,
    }

    impl HostSystem for RecordingHost {
        fn set_screen_blanking(&self, on: bool) {
            if on {
                self.blanking_restored.fetch_add(1, Ordering::SeqCst);
            }
        }
        fn schedule_shutdown(&self) {
            self.shutdowns.fetch_add(1, Ordering::SeqCst);
        }
    }

    struct FakePins {
        held: AtomicBool,
    }

    impl GpioPins for FakePins {
        fn setup(&self) -> Result<(), String> {
            Ok(())
        }
        fn level(&self, _pin: u8) -> bool {
            false
        }
        fn shutdown_pressed(&self) -> bool {
            self.held.load(Ordering::SeqCst)
        }
    }

    fn wait_for_cancel() -> ShowRef {
        ShowFn::arc("x", |ctx: ShowContext| async move {
            ctx.cancelled().await;
            Ok(ShowExit::Completed)
        })
    }

    fn catalog(start_list: &str) -> ShowCatalog {
        ShowCatalog::from_records(
            "1.2",
            vec![
                ShowRecord::new("start", "start").with_start_show(start_list),
                ShowRecord::new("slideshow", "mediashow"),
                ShowRecord::new("clock", "liveshow"),
            ],
        )
    }

    fn builder(start_list: &str, shows: Vec<(&str, ShowRef)>) -> PlayerBuilder {
        let factory = Arc::new(MapFactory(
            shows.into_iter().map(|(r, s)| (r.to_string(), s)).collect(),
        ));
        PlayerBuilder::new(PlayerConfig::default(), catalog(start_list), factory)
            .with_host(Arc::new(NullHost))
    }

    #[tokio::test(start_paused = true)]
    async fn test_exit_input_ends_session_cleanly() {
        let player = builder(
            "slideshow,clock",
            vec![
                ("slideshow", wait_for_cancel()),
                ("clock", wait_for_cancel()),
            ],
        )
        .build();
        let port = player.input_port();
        let run = tokio::spawn(player.run());

        port.press(EXIT_SYMBOL, Edge::Rising, InputSource::Keyboard);
        assert!(run.await.unwrap().is_ok());
    }

    #[tokio::test(start_paused = true)]
    async fn test_exit_on_release_edge_ends_session() {
        let player = builder("slideshow", vec![("slideshow", wait_for_cancel())]).build();
        let port = player.input_port();
        let run = tokio::spawn(player.run());

        // a normally-closed switch fires its symbol on the release edge
        port.press(EXIT_SYMBOL, Edge::Falling, InputSource::Gpio);
        assert!(run.await.unwrap().is_ok());
    }

    #[tokio::test]
    async fn test_issue_mismatch_is_fatal() {
        let factory = Arc::new(MapFactory(Default::default()));
        let catalog = ShowCatalog::from_records(
            "1.3",
            vec![ShowRecord::new("start", "start").with_start_show("")],
        );
        let player = PlayerBuilder::new(PlayerConfig::default(), catalog, factory)
            .with_host(Arc::new(NullHost))
            .build();
        assert!(matches!(
            player.run().await,
            Err(PlayerError::IssueMismatch { .. })
        ));
    }

    #[tokio::test]
    async fn test_unknown_boot_reference_is_fatal() {
        let player = builder("slideshow,missing", vec![("slideshow", wait_for_cancel())]).build();
        assert!(matches!(
            player.run().await,
            Err(PlayerError::UnknownShow { reference }) if reference == "missing"
        ));
    }

    #[tokio::test(start_paused = true)]
    async fn test_natural_end_of_all_shows() {
        let brief: ShowRef = ShowFn::arc("slideshow", |_ctx: ShowContext| async {
            tokio::time::sleep(Duration::from_millis(20)).await;
            Ok(ShowExit::Completed)
        });
        let player = builder("slideshow", vec![("slideshow", brief)]).build();
        assert!(player.run().await.is_ok());
    }

    #[tokio::test(start_paused = true)]
    async fn test_show_failure_ends_session_with_error() {
        let failing: ShowRef = ShowFn::arc("slideshow", |_ctx: ShowContext| async {
            Err(ShowError::Failed {
                message: "media not found".to_string(),
            })
        });
        let calm = wait_for_cancel();
        let player = builder(
            "slideshow,clock",
            vec![("slideshow", failing), ("clock", calm)],
        )
        .build();
        let err = player.run().await.unwrap_err();
        assert!(matches!(err, PlayerError::SessionError { .. }));
    }

    #[tokio::test(start_paused = true)]
    async fn test_force_shutdown_outcome_schedules_host_shutdown() {
        let host = Arc::new(RecordingHost::default());
        let forcing: ShowRef = ShowFn::arc("slideshow", |ctx: ShowContext| async move {
            ctx.cancelled().await;
            Ok(ShowExit::ForceShutdown)
        });
        let player = builder("slideshow", vec![("slideshow", forcing)])
            .with_host(host.clone())
            .build();
        let port = player.input_port();
        let run = tokio::spawn(player.run());

        port.press(EXIT_SYMBOL, Edge::Rising, InputSource::Keyboard);
        assert!(run.await.unwrap().is_ok());
        assert_eq!(host.shutdowns.load(Ordering::SeqCst), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn test_shutdown_now_input() {
        let host = Arc::new(RecordingHost::default());
        let player = builder("slideshow", vec![("slideshow", wait_for_cancel())])
            .with_host(host.clone())
            .build();
        let port = player.input_port();
        let run = tokio::spawn(player.run());

        port.press(SHUTDOWN_NOW_SYMBOL, Edge::Rising, InputSource::Gpio);
        assert!(run.await.unwrap().is_ok());
        assert_eq!(host.shutdowns.load(Ordering::SeqCst), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn test_deferred_shutdown_unconfirmed_keeps_playing() {
        let host = Arc::new(RecordingHost::default());
        let pins = Arc::new(FakePins {
            held: AtomicBool::new(false),
        });
        let player = builder("slideshow", vec![("slideshow", wait_for_cancel())])
            .with_host(host.clone())
            .with_gpio(pins, vec![])
            .build();
        let port = player.input_port();
        let run = tokio::spawn(player.run());

        // button released before the confirmation check: session continues
        port.press(SHUTDOWN_SYMBOL, Edge::Rising, InputSource::Gpio);
        tokio::time::sleep(Duration::from_secs(6)).await;
        assert!(!run.is_finished());

        port.press(EXIT_SYMBOL, Edge::Rising, InputSource::Keyboard);
        assert!(run.await.unwrap().is_ok());
        assert_eq!(host.shutdowns.load(Ordering::SeqCst), 0);
    }

    #[tokio::test(start_paused = true)]
    async fn test_deferred_shutdown_confirmed_shuts_down() {
        let host = Arc::new(RecordingHost::default());
        let pins = Arc::new(FakePins {
            held: AtomicBool::new(true),
        });
        let player = builder("slideshow", vec![("slideshow", wait_for_cancel())])
            .with_host(host.clone())
            .with_gpio(pins, vec![])
            .build();
        let port = player.input_port();
        let run = tokio::spawn(player.run());

        port.press(SHUTDOWN_SYMBOL, Edge::Rising, InputSource::Gpio);
        assert!(run.await.unwrap().is_ok());
        assert_eq!(host.shutdowns.load(Ordering::SeqCst), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn test_stuck_show_exceeds_grace() {
        let stuck: ShowRef = ShowFn::arc("slideshow", |_ctx: ShowContext| {
            futures::future::pending::<Result<ShowExit, ShowError>>()
        });
        let player = builder("slideshow", vec![("slideshow", stuck)]).build();
        let port = player.input_port();
        let run = tokio::spawn(player.run());

        port.press(EXIT_SYMBOL, Edge::Rising, InputSource::Keyboard);
        let err = run.await.unwrap().unwrap_err();
        match err {
            PlayerError::GraceExceeded { stuck, .. } => {
                assert_eq!(stuck, vec!["slideshow"]);
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[tokio::test(start_paused = true)]
    async fn test_nonreserved_input_reaches_shows() {
        let echo: ShowRef = ShowFn::arc("slideshow", |mut ctx: ShowContext| async move {
            let cancel = ctx.cancel_token();
            loop {
                tokio::select! {
                    _ = cancel.cancelled() => return Ok(ShowExit::Completed),
                    Some(ev) = ctx.next_input() => {
                        if &*ev.symbol == "slideshow-stop" {
                            return Ok(ShowExit::Completed);
                        }
                    }
                }
            }
        });
        let player = builder("slideshow", vec![("slideshow", echo)]).build();
        let port = player.input_port();
        let run = tokio::spawn(player.run());

        port.press("slideshow-stop", Edge::Rising, InputSource::Screen);
        // the show exits on the symbol, which ends the session normally
        assert!(run.await.unwrap().is_ok());
    }

    #[tokio::test(start_paused = true)]
    async fn test_tidy_up_restores_screen_blanking() {
        let host = Arc::new(RecordingHost::default());
        let config = PlayerConfig {
            restore_screen_blanking: true,
            ..PlayerConfig::default()
        };
        let factory = Arc::new(MapFactory(
            [("slideshow".to_string(), wait_for_cancel())].into(),
        ));
        let player = PlayerBuilder::new(config, catalog("slideshow"), factory)
            .with_host(host.clone())
            .build();
        let port = player.input_port();
        let run = tokio::spawn(player.run());

        port.press(EXIT_SYMBOL, Edge::Rising, InputSource::Keyboard);
        assert!(run.await.unwrap().is_ok());
        assert_eq!(host.blanking_restored.load(Ordering::SeqCst), 1);
    }
}
