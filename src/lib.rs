//! syspower: a platform agnostic library for power state management.
//!
//! For any given operation we first work out the platform, then narrow down
//! which methods might work on it (mostly needed on Linux, where the desktop
//! session matters), then try those methods in priority order. Commands that
//! need root are tried through each password-less escalation prefix in turn.
//!
//! ```no_run
//! match syspower::reboot() {
//!     Ok(()) => println!("reboot accepted"),
//!     Err(e) => eprintln!("{}", e),
//! }
//! ```
//!
//! A successful call only means some method accepted the request. For
//! shutdown and reboot it is normal for the call to never return.

pub mod command;
pub mod config;
pub mod desktop;
pub mod error;
pub mod escalation;
pub mod manager;
pub mod operation;
pub mod platform;
pub mod power_state;
pub mod prober;
pub mod resolver;
pub mod runner;
pub mod shutdown_flag;

#[cfg(test)]
mod testing;

pub use command::{CandidateList, Command};
pub use config::Config;
pub use error::{ConfigError, Outcome, PowerError, Result};
pub use escalation::EscalationPrefix;
pub use manager::PowerManager;
pub use operation::Operation;
pub use platform::{HostProbe, OsFamily, PlatformIdentity, PlatformProbe};
pub use power_state::{PowerStateFile, SleepState};
pub use resolver::{Attempt, Plan, Stage};
pub use runner::{CommandRunner, SystemRunner};
pub use shutdown_flag::ShutdownFlag;

/// Initiates a system shutdown.
///
/// In most cases this either never returns or fails; `Ok` means we think
/// things worked, which may not mean they did.
pub fn shutdown() -> Result<()> {
    PowerManager::new().shutdown()
}

/// Initiates a system reboot. See [`shutdown`] for what success means.
pub fn reboot() -> Result<()> {
    PowerManager::new().reboot()
}

/// Suspend to RAM.
pub fn suspend() -> Result<()> {
    PowerManager::new().suspend()
}

/// Hibernate (suspend to disk).
pub fn hibernate() -> Result<()> {
    PowerManager::new().hibernate()
}

/// Hybrid sleep: everything hibernation does, then suspend to RAM instead
/// of powering off. Not the same thing as Windows "Fast Startup".
pub fn hybrid_sleep() -> Result<()> {
    PowerManager::new().hybrid_sleep()
}

/// Logs out of the current desktop session.
pub fn logout() -> Result<()> {
    PowerManager::new().logout()
}
