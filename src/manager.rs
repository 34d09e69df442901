//! The public operations: resolve a plan for the current platform and run
//! it until something works.

use std::path::PathBuf;

use crate::config::Config;
use crate::error::{PowerError, Result};
use crate::escalation::try_escalated;
use crate::operation::Operation;
use crate::platform::{HostProbe, PlatformIdentity, PlatformProbe};
use crate::power_state::PowerStateFile;
use crate::prober::try_all;
use crate::resolver::{Attempt, Plan, Stage, needs_shutdown_flag, resolve};
use crate::runner::{CommandRunner, SystemRunner};
use crate::shutdown_flag::{ShutdownFlag, sniff};

pub struct PowerManager<R = SystemRunner, P = HostProbe> {
    runner: R,
    probe: P,
    config: Config,
}

impl PowerManager {
    /// A manager for this machine, using the on-disk configuration.
    pub fn new() -> Self {
        Self::with_config(Config::load_or_default())
    }

    pub fn with_config(config: Config) -> Self {
        Self::from_parts(SystemRunner, HostProbe, config)
    }
}

impl Default for PowerManager {
    fn default() -> Self {
        Self::new()
    }
}

impl<R: CommandRunner, P: PlatformProbe> PowerManager<R, P> {
    pub fn from_parts(runner: R, probe: P, config: Config) -> Self {
        Self { runner, probe, config }
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Initiates a system power-off. On success this may never return.
    pub fn shutdown(&self) -> Result<()> {
        self.perform(Operation::Shutdown)
    }

    pub fn reboot(&self) -> Result<()> {
        self.perform(Operation::Reboot)
    }

    /// Suspend to RAM (ACPI S3 on most machines). Depending on the method
    /// this returns before the machine sleeps or after it wakes up.
    pub fn suspend(&self) -> Result<()> {
        self.perform(Operation::Suspend)
    }

    /// OS mediated suspend to disk.
    pub fn hibernate(&self) -> Result<()> {
        self.perform(Operation::Hibernate)
    }

    /// Write a hibernation image, then suspend to RAM.
    pub fn hybrid_sleep(&self) -> Result<()> {
        self.perform(Operation::HybridSleep)
    }

    /// Ends the current desktop session. Only works from inside that
    /// session, as the user who owns it.
    pub fn logout(&self) -> Result<()> {
        self.perform(Operation::Logout)
    }

    /// The plan `operation` would follow right now, without running it.
    pub fn plan(&self, operation: Operation) -> Result<Plan> {
        let platform = self.probe.identity();
        self.plan_for(operation, &platform)
    }

    /// Every attempt `operation` would make right now if each one failed.
    pub fn attempts(&self, operation: Operation) -> Result<Vec<Attempt>> {
        let platform = self.probe.identity();
        let plan = self.plan_for(operation, &platform)?;
        Ok(plan.attempts(&self.config.escalation, platform.is_privileged))
    }

    pub fn perform(&self, operation: Operation) -> Result<()> {
        let platform = self.probe.identity();
        tracing::info!(%operation, %platform, privileged = platform.is_privileged, "attempting");

        let plan = self.plan_for(operation, &platform).inspect_err(|e| {
            tracing::info!("{}", e);
        })?;
        tracing::debug!(?plan, "resolved");

        if self.execute(&plan, &platform) {
            tracing::info!(%operation, "accepted");
            return Ok(());
        }

        let attempts = plan.attempts(&self.config.escalation, platform.is_privileged).len();
        let err = PowerError::NoWorkingMethod { operation, attempts };
        tracing::warn!("{}", err);
        Err(err)
    }

    fn plan_for(&self, operation: Operation, platform: &PlatformIdentity) -> Result<Plan> {
        let search_path: Vec<PathBuf> = if self.config.desktop_sessions {
            self.probe.search_path()
        } else {
            Vec::new()
        };
        let flag = if needs_shutdown_flag(operation, platform) {
            sniff(&self.runner)
        } else {
            ShutdownFlag::None
        };
        let mut plan = resolve(operation, platform, &search_path, flag)?;
        plan.prepend_direct(self.config.extra_commands(operation));
        Ok(plan)
    }

    fn execute(&self, plan: &Plan, platform: &PlatformIdentity) -> bool {
        let power_state = PowerStateFile::new(&self.config.power_state_file);
        plan.stages.iter().any(|stage| match stage {
            Stage::Direct(list) => try_all(&self.runner, list),
            Stage::Escalated(list) => {
                try_escalated(&self.runner, list, &self.config.escalation, platform.is_privileged)
            }
            Stage::PowerStateWrite(state) => power_state.try_enter(*state, platform.is_privileged),
        })
    }
}
