//! Running a single candidate command.

use std::process::{Command as Process, Stdio};

use crate::command::Command;

/// Executes commands and reduces every outcome to success or failure.
pub trait CommandRunner {
    /// Runs `command` to completion. `true` iff it exited with status 0;
    /// launch failures count as `false`.
    fn run(&self, command: &Command) -> bool;

    /// Runs `command` and returns its standard output, or `None` if it
    /// could not be launched or exited non-zero.
    fn output(&self, command: &Command) -> Option<Vec<u8>>;
}

impl<R: CommandRunner + ?Sized> CommandRunner for &R {
    fn run(&self, command: &Command) -> bool {
        (**self).run(command)
    }

    fn output(&self, command: &Command) -> Option<Vec<u8>> {
        (**self).output(command)
    }
}

/// Runs commands as real child processes of the current one.
#[derive(Clone, Copy, Debug, Default)]
pub struct SystemRunner;

impl SystemRunner {
    fn process(command: &Command) -> Process {
        let mut process = Process::new(command.program());
        process.args(command.args());
        process
    }
}

impl CommandRunner for SystemRunner {
    fn run(&self, command: &Command) -> bool {
        tracing::debug!(%command, "trying");
        match Self::process(command)
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .status()
        {
            Ok(status) => {
                if !status.success() {
                    tracing::debug!(%command, %status, "candidate failed");
                }
                status.success()
            }
            Err(e) => {
                tracing::trace!(%command, error = %e, "failed to launch");
                false
            }
        }
    }

    fn output(&self, command: &Command) -> Option<Vec<u8>> {
        let output = Self::process(command)
            .stdin(Stdio::null())
            .stderr(Stdio::null())
            .output()
            .map_err(|e| tracing::trace!(%command, error = %e, "failed to launch"))
            .ok()?;
        output.status.success().then_some(output.stdout)
    }
}
