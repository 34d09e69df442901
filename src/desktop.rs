//! Session-manager tools for the desktops we know how to drive.

use std::path::PathBuf;

use crate::command::{CandidateList, Command, cmd};
use crate::platform::find_on_path;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Desktop {
    Gnome,
    Cinnamon,
    Mate,
    Xfce,
    Kde,
}

/// What we are asking the session manager to do.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SessionAction {
    PowerOff,
    Logout,
}

impl Desktop {
    /// Probe order.
    pub const ALL: [Desktop; 5] = [
        Desktop::Gnome,
        Desktop::Cinnamon,
        Desktop::Mate,
        Desktop::Xfce,
        Desktop::Kde,
    ];

    pub fn command(self, action: SessionAction) -> Command {
        use SessionAction::*;
        match (self, action) {
            (Desktop::Gnome, PowerOff) => cmd(&["gnome-session-quit", "--power-off", "--force"]),
            (Desktop::Gnome, Logout) => cmd(&["gnome-session-quit", "--logout", "--force"]),
            (Desktop::Cinnamon, PowerOff) => cmd(&["cinnamon-session-quit", "--power-off", "--force"]),
            (Desktop::Cinnamon, Logout) => cmd(&["cinnamon-session-quit", "--logout", "--force"]),
            (Desktop::Mate, PowerOff) => cmd(&["mate-session-quit", "--power-off", "--force"]),
            (Desktop::Mate, Logout) => cmd(&["mate-session-quit", "--logout", "--force"]),
            (Desktop::Xfce, PowerOff) => cmd(&["xfce4-session-logout", "--halt"]),
            (Desktop::Xfce, Logout) => cmd(&["xfce4-session-logout", "--logout"]),
            // ksmserver logout(confirm, sdtype, sdmode): 0 = no confirm, 2 = forced,
            // last argument 2 = halt, 3 = logout only.
            (Desktop::Kde, PowerOff) => kde_logout("2"),
            (Desktop::Kde, Logout) => kde_logout("3"),
        }
    }
}

fn kde_logout(mode: &str) -> Command {
    cmd(&[
        "qdbus",
        "org.kde.ksmserver",
        "/KSMServer",
        "org.kde.KSMServerInterface.logout",
        "0",
        "2",
        mode,
    ])
}

/// Session commands for `action` whose program exists on `search_path`,
/// in probe order.
pub fn session_commands(action: SessionAction, search_path: &[PathBuf]) -> CandidateList {
    Desktop::ALL
        .into_iter()
        .map(|desktop| desktop.command(action))
        .filter(|command| find_on_path(command.program(), search_path))
        .collect()
}
