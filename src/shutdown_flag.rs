//! Working out what `shutdown` wants to be told to power off.
//!
//! Modern Linux, old Linux, SVR4, BSD and Solaris derived systems all
//! disagree, so we look at `shutdown --help` and guess.

use crate::command::{Command, cmd};
use crate::runner::CommandRunner;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ShutdownFlag {
    /// `-h`: help was unavailable, so assume an old Linux/SVR4 shutdown.
    Legacy,
    /// `-p`: BSD style.
    Bsd,
    /// `-hP`: older Linux style.
    OldLinux,
    /// No flag: modern Linux, and Darwin.
    None,
}

impl ShutdownFlag {
    pub fn as_arg(self) -> Option<&'static str> {
        match self {
            ShutdownFlag::Legacy => Some("-h"),
            ShutdownFlag::Bsd => Some("-p"),
            ShutdownFlag::OldLinux => Some("-hP"),
            ShutdownFlag::None => None,
        }
    }

    /// Picks the flag from captured help text; `None` means the help text
    /// could not be retrieved at all.
    pub fn from_help(help: Option<&[u8]>) -> Self {
        let Some(help) = help else {
            return ShutdownFlag::Legacy;
        };
        if contains(help, b"-p") {
            ShutdownFlag::Bsd
        } else if contains(help, b"-P") {
            ShutdownFlag::OldLinux
        } else {
            ShutdownFlag::None
        }
    }

    /// `shutdown [flag] now`.
    pub fn power_off_command(self) -> Command {
        match self.as_arg() {
            Some(flag) => cmd(&["shutdown", flag, "now"]),
            None => cmd(&["shutdown", "now"]),
        }
    }
}

fn contains(haystack: &[u8], needle: &[u8]) -> bool {
    haystack.windows(needle.len()).any(|window| window == needle)
}

/// Runs `shutdown --help` and derives the flag from it.
pub fn sniff<R: CommandRunner + ?Sized>(runner: &R) -> ShutdownFlag {
    let help = runner.output(&cmd(&["shutdown", "--help"]));
    let flag = ShutdownFlag::from_help(help.as_deref());
    tracing::debug!(?flag, "sniffed shutdown power-off flag");
    flag
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::ScriptedRunner;

    fn flag(help: &[u8]) -> ShutdownFlag {
        ShutdownFlag::from_help(Some(help))
    }

    #[test]
    fn test_flag_from_help_text() {
        assert_eq!(flag(b"usage: shutdown [-p] time"), ShutdownFlag::Bsd);
        assert_eq!(flag(b"  -P  power off after shutdown"), ShutdownFlag::OldLinux);
        assert_eq!(flag(b"-h -r halt or reboot"), ShutdownFlag::None);
        assert_eq!(flag(b""), ShutdownFlag::None);
        assert_eq!(ShutdownFlag::from_help(None), ShutdownFlag::Legacy);
    }

    #[test]
    fn test_lowercase_wins_over_uppercase() {
        assert_eq!(flag(b"-P and -p"), ShutdownFlag::Bsd);
    }

    #[test]
    fn test_power_off_command() {
        assert_eq!(ShutdownFlag::OldLinux.power_off_command().to_string(), "shutdown -hP now");
        assert_eq!(ShutdownFlag::None.power_off_command().to_string(), "shutdown now");
    }

    #[test]
    fn test_sniff_runs_help() {
        let runner = ScriptedRunner::failing().with_help(b"  -P, --poweroff");
        // "--poweroff" contains "-p", which is what a substring match sees.
        assert_eq!(sniff(&runner), ShutdownFlag::Bsd);

        let runner = ScriptedRunner::failing();
        assert_eq!(sniff(&runner), ShutdownFlag::Legacy);
        assert_eq!(runner.captured(), vec!["shutdown --help"]);
    }
}
