//! Session orchestration: configuration, the supervisor, and the player.
//!
//! ```text
//! PlayerBuilder ──► Player::run()
//!                      │
//!                      ├─► ShowSupervisor ──► ShowRegistry
//!                      ├─► GpioDriver / TimeOfDayDriver (poll loops)
//!                      ├─► HostSystem (tidy-up, OS shutdown)
//!                      └─► SubscriberSet (event fan-out)
//! ```

mod config;
mod host;
mod orchestrator;
mod registry;
mod shutdown;
mod supervisor;

pub use config::PlayerConfig;
pub use host::{HostSystem, NullHost, SystemHost};
pub use orchestrator::{Player, PlayerBuilder};
pub use shutdown::wait_for_shutdown_signal;
pub use supervisor::{AllShowsEnded, ShowSupervisor};
