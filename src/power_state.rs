//! The kernel's power-state control file (`/sys/power/state` on Linux).

use std::fmt;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

pub const DEFAULT_POWER_STATE_FILE: &str = "/sys/power/state";

/// A low-power state the control file can be asked to enter.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SleepState {
    Mem,
    Disk,
    Hybrid,
}

impl SleepState {
    pub fn as_str(self) -> &'static str {
        match self {
            SleepState::Mem => "mem",
            SleepState::Disk => "disk",
            SleepState::Hybrid => "hybrid",
        }
    }
}

impl fmt::Display for SleepState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PowerStateFile {
    path: PathBuf,
}

impl Default for PowerStateFile {
    fn default() -> Self {
        Self::new(DEFAULT_POWER_STATE_FILE)
    }
}

impl PowerStateFile {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Whether the file lists `state`. Unreadable means unsupported.
    pub fn supports(&self, state: SleepState) -> bool {
        match fs::read_to_string(&self.path) {
            Ok(states) => states.contains(state.as_str()),
            Err(e) => {
                tracing::debug!(path = %self.path.display(), error = %e, "cannot read power states");
                false
            }
        }
    }

    /// Writes `state` to the file. A successful write is all we can check;
    /// whether the machine then actually sleeps is up to the kernel.
    pub fn enter(&self, state: SleepState) -> io::Result<()> {
        fs::write(&self.path, state.as_str())
    }

    /// The fallback path: only for privileged callers, and only when the
    /// kernel advertises `state`. Every failure collapses to `false`.
    pub fn try_enter(&self, state: SleepState, privileged: bool) -> bool {
        if !privileged {
            tracing::debug!(%state, "not privileged, skipping direct power-state write");
            return false;
        }
        if !self.supports(state) {
            tracing::debug!(%state, path = %self.path.display(), "state not advertised");
            return false;
        }
        match self.enter(state) {
            Ok(()) => true,
            Err(e) => {
                tracing::debug!(%state, error = %e, "power-state write failed");
                false
            }
        }
    }
}
