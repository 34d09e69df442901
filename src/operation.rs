use std::fmt;
use std::str::FromStr;

/// The power operations this crate knows how to attempt.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Operation {
    Shutdown,
    Reboot,
    Suspend,
    Hibernate,
    HybridSleep,
    Logout,
}

impl Operation {
    pub const ALL: [Operation; 6] = [
        Operation::Shutdown,
        Operation::Reboot,
        Operation::Suspend,
        Operation::Hibernate,
        Operation::HybridSleep,
        Operation::Logout,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Operation::Shutdown => "shutdown",
            Operation::Reboot => "reboot",
            Operation::Suspend => "suspend",
            Operation::Hibernate => "hibernate",
            Operation::HybridSleep => "hybrid-sleep",
            Operation::Logout => "logout",
        }
    }
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Operation {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_ascii_lowercase().replace('_', "-");
        Operation::ALL
            .into_iter()
            .find(|op| op.as_str() == wanted)
            .ok_or_else(|| format!("Unknown operation: {}", s))
    }
}
