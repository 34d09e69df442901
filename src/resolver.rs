//! Turns an operation and a platform into an ordered plan of candidates.
//!
//! Everything here is a pure function of its inputs: the same operation,
//! platform, search path and shutdown flag always give the same plan.

use std::fmt;
use std::path::PathBuf;

use crate::command::{CandidateList, Command, cmd};
use crate::desktop::{SessionAction, session_commands};
use crate::error::{PowerError, Result};
use crate::escalation::{EscalationPrefix, tiers};
use crate::operation::Operation;
use crate::platform::{Kernel, OsFamily, PlatformIdentity};
use crate::power_state::SleepState;
use crate::shutdown_flag::ShutdownFlag;

/// One step of a plan.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Stage {
    /// Tried as-is, never escalated.
    Direct(CandidateList),
    /// Tried through the escalation tiers.
    Escalated(CandidateList),
    /// Write the state straight to the power-state file. Root only.
    PowerStateWrite(SleepState),
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Plan {
    pub operation: Operation,
    pub stages: Vec<Stage>,
}

/// A single concrete thing a plan will try, after escalation expansion.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Attempt {
    Run(Command),
    WritePowerState(SleepState),
}

impl fmt::Display for Attempt {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Attempt::Run(command) => write!(f, "{}", command),
            Attempt::WritePowerState(state) => write!(f, "write \"{}\" to the power-state file", state),
        }
    }
}

impl Plan {
    fn new(operation: Operation, stages: Vec<Stage>) -> Self {
        let stages = stages
            .into_iter()
            .filter(|stage| !matches!(stage, Stage::Direct(l) | Stage::Escalated(l) if l.is_empty()))
            .collect();
        Self { operation, stages }
    }

    /// Puts `commands` in front of the plan, tried unprefixed.
    pub fn prepend_direct(&mut self, commands: CandidateList) {
        if !commands.is_empty() {
            self.stages.insert(0, Stage::Direct(commands));
        }
    }

    /// The flat candidate list: every command stage, in order, unexpanded.
    pub fn candidates(&self) -> CandidateList {
        self.stages
            .iter()
            .flat_map(|stage| match stage {
                Stage::Direct(list) | Stage::Escalated(list) => list.clone(),
                Stage::PowerStateWrite(_) => Vec::new(),
            })
            .collect()
    }

    /// Everything that would be tried, in order, if nothing succeeded.
    pub fn attempts(&self, prefixes: &[EscalationPrefix], privileged: bool) -> Vec<Attempt> {
        let mut attempts = Vec::new();
        for stage in &self.stages {
            match stage {
                Stage::Direct(list) => attempts.extend(list.iter().cloned().map(Attempt::Run)),
                Stage::Escalated(list) => attempts.extend(
                    tiers(list, prefixes, privileged)
                        .into_iter()
                        .flatten()
                        .map(Attempt::Run),
                ),
                Stage::PowerStateWrite(state) if privileged => {
                    attempts.push(Attempt::WritePowerState(*state))
                }
                Stage::PowerStateWrite(_) => {}
            }
        }
        attempts
    }
}

/// Whether resolving `operation` on `platform` needs the sniffed
/// `shutdown` power-off flag.
pub fn needs_shutdown_flag(operation: Operation, platform: &PlatformIdentity) -> bool {
    operation == Operation::Shutdown
        && platform.os_family == OsFamily::Posix
        && platform.kernel() != Kernel::Darwin
}

pub fn resolve(
    operation: Operation,
    platform: &PlatformIdentity,
    search_path: &[PathBuf],
    shutdown_flag: ShutdownFlag,
) -> Result<Plan> {
    let stages = match platform.os_family {
        OsFamily::Posix => posix_stages(operation, platform.kernel(), search_path, shutdown_flag),
        OsFamily::Windows => windows_stages(operation),
        OsFamily::Other => None,
    };
    stages
        .map(|stages| Plan::new(operation, stages))
        .ok_or_else(|| PowerError::Unsupported {
            operation,
            platform: platform.to_string(),
        })
}

fn posix_stages(
    operation: Operation,
    kernel: Kernel,
    search_path: &[PathBuf],
    flag: ShutdownFlag,
) -> Option<Vec<Stage>> {
    use Stage::*;
    let stages = match (operation, kernel) {
        // Darwin's shutdown powers off without a flag.
        (Operation::Shutdown, Kernel::Darwin) => vec![Escalated(generic_shutdown(ShutdownFlag::None))],
        // Newer Solaris has a shutdown that behaves like telinit with a
        // confirmation; try that before the generic commands.
        (Operation::Shutdown, Kernel::Solaris) => vec![
            Direct(vec![cmd(&["shutdown", "-y", "-i", "5", "5"])]),
            Escalated(generic_shutdown(flag)),
        ],
        (Operation::Shutdown, _) => vec![
            Direct(session_commands(SessionAction::PowerOff, search_path)),
            Escalated(generic_shutdown(flag)),
        ],

        (Operation::Reboot, Kernel::Solaris) => vec![
            Direct(vec![cmd(&["shutdown", "-y", "-i", "6", "6"])]),
            Escalated(generic_reboot()),
        ],
        (Operation::Reboot, _) => vec![Escalated(generic_reboot())],

        (Operation::Suspend, Kernel::Linux) => vec![
            Escalated(vec![cmd(&["systemctl", "suspend"]), cmd(&["pm-suspend"]), cmd(&["s2ram"])]),
            PowerStateWrite(SleepState::Mem),
        ],
        (Operation::Suspend, Kernel::Darwin) => vec![Direct(vec![cmd(&["shutdown", "-s", "now"])])],
        (Operation::Suspend, Kernel::FreeBsd) => vec![Direct(vec![cmd(&["acpiconf", "-s", "3"])])],
        (Operation::Suspend, _) => return None,

        (Operation::Hibernate, Kernel::Linux) => vec![
            Escalated(vec![cmd(&["systemctl", "hibernate"]), cmd(&["pm-hibernate"]), cmd(&["s2disk"])]),
            PowerStateWrite(SleepState::Disk),
        ],
        (Operation::Hibernate, Kernel::FreeBsd | Kernel::OtherBsd) => {
            vec![Direct(vec![cmd(&["pm-hibernate"])])]
        }
        (Operation::Hibernate, _) => return None,

        (Operation::HybridSleep, Kernel::Linux) => vec![
            Escalated(vec![
                cmd(&["systemctl", "hybrid-sleep"]),
                cmd(&["pm-suspend-hybrid"]),
                cmd(&["s2both"]),
            ]),
            PowerStateWrite(SleepState::Hybrid),
        ],
        (Operation::HybridSleep, _) => return None,

        (Operation::Logout, Kernel::Darwin) => return None,
        (Operation::Logout, _) => vec![Direct(session_commands(SessionAction::Logout, search_path))],
    };
    Some(stages)
}

fn windows_stages(operation: Operation) -> Option<Vec<Stage>> {
    let flag = match operation {
        Operation::Shutdown => "/s",
        Operation::Reboot => "/r",
        Operation::Hibernate => "/h",
        Operation::Logout => "/l",
        Operation::Suspend | Operation::HybridSleep => return None,
    };
    Some(vec![Stage::Direct(vec![cmd(&["shutdown", flag])])])
}

fn generic_shutdown(flag: ShutdownFlag) -> CandidateList {
    vec![
        cmd(&["systemctl", "poweroff"]),
        flag.power_off_command(),
        cmd(&["poweroff"]),
        cmd(&["telinit", "0"]),
        cmd(&["halt"]),
    ]
}

fn generic_reboot() -> CandidateList {
    vec![
        cmd(&["systemctl", "reboot"]),
        cmd(&["shutdown", "-r", "now"]),
        cmd(&["reboot"]),
        cmd(&["telinit", "6"]),
    ]
}
