use crate::command::Command;
use crate::runner::CommandRunner;

/// Tries each command in order, stopping at the first one that succeeds.
/// An empty list never succeeds.
pub fn try_all<R: CommandRunner + ?Sized>(runner: &R, commands: &[Command]) -> bool {
    commands.iter().any(|command| runner.run(command))
}
