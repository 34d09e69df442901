//! Test doubles shared by the unit tests.

use std::cell::RefCell;
use std::fs;
use std::path::{Path, PathBuf};

use crate::command::Command;
use crate::platform::{PlatformIdentity, PlatformProbe};
use crate::runner::CommandRunner;

/// Records every command and succeeds only for the ones it was told to.
#[derive(Default)]
pub(crate) struct ScriptedRunner {
    succeed: Vec<String>,
    help: Option<Vec<u8>>,
    attempted: RefCell<Vec<String>>,
    captured: RefCell<Vec<String>>,
}

impl ScriptedRunner {
    pub(crate) fn failing() -> Self {
        Self::default()
    }

    pub(crate) fn succeeding(commands: &[&str]) -> Self {
        Self {
            succeed: commands.iter().map(|c| c.to_string()).collect(),
            ..Self::default()
        }
    }

    /// Text returned for `shutdown --help`; without it the probe fails.
    pub(crate) fn with_help(mut self, help: &[u8]) -> Self {
        self.help = Some(help.to_vec());
        self
    }

    pub(crate) fn attempted(&self) -> Vec<String> {
        self.attempted.borrow().clone()
    }

    pub(crate) fn captured(&self) -> Vec<String> {
        self.captured.borrow().clone()
    }
}

impl CommandRunner for ScriptedRunner {
    fn run(&self, command: &Command) -> bool {
        let rendered = command.to_string();
        let ok = self.succeed.contains(&rendered);
        self.attempted.borrow_mut().push(rendered);
        ok
    }

    fn output(&self, command: &Command) -> Option<Vec<u8>> {
        self.captured.borrow_mut().push(command.to_string());
        self.help.clone()
    }
}

pub(crate) struct FixedProbe {
    pub(crate) identity: PlatformIdentity,
    pub(crate) search_path: Vec<PathBuf>,
}

impl PlatformProbe for FixedProbe {
    fn identity(&self) -> PlatformIdentity {
        self.identity.clone()
    }

    fn search_path(&self) -> Vec<PathBuf> {
        self.search_path.clone()
    }
}

/// Drops an empty executable called `name` into `dir`.
pub(crate) fn install_tool(dir: &Path, name: &str) {
    let path = dir.join(name);
    fs::write(&path, "#!/bin/sh\n").unwrap();
    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        fs::set_permissions(&path, fs::Permissions::from_mode(0o755)).unwrap();
    }
}
