//! Password-less privilege escalation.
//!
//! A base candidate list is tried in tiers: directly if we are already
//! privileged, then once per escalation prefix (every command under the
//! first prefix, then every command under the second, ...), then directly
//! again for commands that need no privilege at all.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::command::{CandidateList, Command};
use crate::prober::try_all;
use crate::runner::CommandRunner;

/// An invocation placed in front of a command to run it with elevated rights.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EscalationPrefix(Vec<String>);

impl EscalationPrefix {
    pub fn new<I, S>(argv: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self(argv.into_iter().map(Into::into).collect())
    }

    /// `sudo -n`, `doas -n`, `pkexec`, in that order.
    pub fn defaults() -> Vec<EscalationPrefix> {
        vec![
            EscalationPrefix::new(["sudo", "-n"]),
            EscalationPrefix::new(["doas", "-n"]),
            EscalationPrefix::new(["pkexec"]),
        ]
    }

    pub fn argv(&self) -> &[String] {
        &self.0
    }

    pub fn apply(&self, command: &Command) -> Command {
        command.prefixed(&self.0)
    }
}

impl fmt::Display for EscalationPrefix {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0.join(" "))
    }
}

/// One expanded list per prefix, in prefix order, each keeping `base` order.
pub fn expand(base: &[Command], prefixes: &[EscalationPrefix]) -> Vec<CandidateList> {
    prefixes
        .iter()
        .map(|prefix| base.iter().map(|command| prefix.apply(command)).collect())
        .collect()
}

/// Every list the tier policy will try, in order. The leading direct tier
/// is only present when `privileged` is set.
pub fn tiers(base: &[Command], prefixes: &[EscalationPrefix], privileged: bool) -> Vec<CandidateList> {
    let mut tiers = Vec::with_capacity(prefixes.len() + 2);
    if privileged {
        tiers.push(base.to_vec());
    }
    tiers.extend(expand(base, prefixes));
    tiers.push(base.to_vec());
    tiers
}

/// Tries `base` through every tier, stopping at the first success.
pub fn try_escalated<R: CommandRunner + ?Sized>(
    runner: &R,
    base: &[Command],
    prefixes: &[EscalationPrefix],
    privileged: bool,
) -> bool {
    if base.is_empty() {
        return false;
    }
    tiers(base, prefixes, privileged)
        .iter()
        .any(|tier| try_all(runner, tier))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::command::cmd;
    use crate::testing::ScriptedRunner;

    fn base() -> Vec<Command> {
        vec![cmd(&["systemctl", "reboot"]), cmd(&["reboot"])]
    }

    #[test]
    fn test_expand_prepends_each_prefix() {
        let lists = expand(&base(), &EscalationPrefix::defaults());
        let rendered: Vec<Vec<String>> = lists
            .iter()
            .map(|l| l.iter().map(|c| c.to_string()).collect())
            .collect();
        assert_eq!(
            rendered,
            vec![
                vec!["sudo -n systemctl reboot", "sudo -n reboot"],
                vec!["doas -n systemctl reboot", "doas -n reboot"],
                vec!["pkexec systemctl reboot", "pkexec reboot"],
            ]
        );
    }

    #[test]
    fn test_privileged_success_skips_prefixes() {
        let runner = ScriptedRunner::succeeding(&["systemctl reboot"]);
        assert!(try_escalated(&runner, &base(), &EscalationPrefix::defaults(), true));
        assert_eq!(runner.attempted(), vec!["systemctl reboot"]);
    }

    #[test]
    fn test_unprivileged_walks_tiers_in_order() {
        let runner = ScriptedRunner::failing();
        assert!(!try_escalated(&runner, &base(), &EscalationPrefix::defaults(), false));
        assert_eq!(
            runner.attempted(),
            vec![
                "sudo -n systemctl reboot",
                "sudo -n reboot",
                "doas -n systemctl reboot",
                "doas -n reboot",
                "pkexec systemctl reboot",
                "pkexec reboot",
                "systemctl reboot",
                "reboot",
            ]
        );
    }

    #[test]
    fn test_privileged_failure_falls_through_to_prefixes() {
        let runner = ScriptedRunner::succeeding(&["doas -n reboot"]);
        assert!(try_escalated(&runner, &base(), &EscalationPrefix::defaults(), true));
        assert_eq!(
            runner.attempted(),
            vec![
                "systemctl reboot",
                "reboot",
                "sudo -n systemctl reboot",
                "sudo -n reboot",
                "doas -n systemctl reboot",
                "doas -n reboot",
            ]
        );
    }

    #[test]
    fn test_unprefixed_fallback_is_last() {
        let runner = ScriptedRunner::succeeding(&["reboot"]);
        assert!(try_escalated(&runner, &base(), &[], false));
        assert_eq!(runner.attempted(), vec!["systemctl reboot", "reboot"]);
    }

    #[test]
    fn test_empty_base_never_runs() {
        let runner = ScriptedRunner::failing();
        assert!(!try_escalated(&runner, &[], &EscalationPrefix::defaults(), true));
        assert!(runner.attempted().is_empty());
    }
}
