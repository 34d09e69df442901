use std::env;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::command::{CandidateList, Command};
use crate::error::ConfigError;
use crate::escalation::EscalationPrefix;
use crate::operation::Operation;
use crate::power_state::DEFAULT_POWER_STATE_FILE;

const APP_NAME: &str = "syspower";
const CONFIG_FILE_NAME: &str = "config.toml";
const SESSION_ID_VAR: &str = "$XDG_SESSION_ID";

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
#[serde(default)]
pub struct Config {
    /// Password-less escalation prefixes, tried in order.
    pub escalation: Vec<EscalationPrefix>,
    /// Look for desktop-session tools on the search path.
    pub desktop_sessions: bool,
    pub power_state_file: PathBuf,
    /// Extra candidates per operation, tried before the built-in ones.
    pub commands: ExtraCommands,
}

#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq)]
#[serde(default)]
pub struct ExtraCommands {
    pub shutdown: Vec<String>,
    pub reboot: Vec<String>,
    pub suspend: Vec<String>,
    pub hibernate: Vec<String>,
    #[serde(rename = "hybrid-sleep")]
    pub hybrid_sleep: Vec<String>,
    pub logout: Vec<String>,
}

impl ExtraCommands {
    pub fn for_operation(&self, operation: Operation) -> &[String] {
        match operation {
            Operation::Shutdown => &self.shutdown,
            Operation::Reboot => &self.reboot,
            Operation::Suspend => &self.suspend,
            Operation::Hibernate => &self.hibernate,
            Operation::HybridSleep => &self.hybrid_sleep,
            Operation::Logout => &self.logout,
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            escalation: EscalationPrefix::defaults(),
            desktop_sessions: true,
            power_state_file: PathBuf::from(DEFAULT_POWER_STATE_FILE),
            commands: ExtraCommands::default(),
        }
    }
}

impl Config {
    /// `$XDG_CONFIG_HOME/syspower/config.toml`.
    #[cfg(unix)]
    pub fn default_path() -> Result<PathBuf, ConfigError> {
        xdg::BaseDirectories::with_prefix(APP_NAME)
            .map(|dirs| dirs.get_config_file(CONFIG_FILE_NAME))
            .map_err(|e| ConfigError::NoConfigDir(e.to_string()))
    }

    #[cfg(not(unix))]
    pub fn default_path() -> Result<PathBuf, ConfigError> {
        dirs::config_dir()
            .map(|dir| dir.join(APP_NAME).join(CONFIG_FILE_NAME))
            .ok_or_else(|| ConfigError::NoConfigDir("no user config directory".to_string()))
    }

    /// Loads the configuration from the default path. A missing file gives
    /// the defaults.
    pub fn load() -> Result<Self, ConfigError> {
        Self::load_from(&Self::default_path()?)
    }

    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        let content = match fs::read_to_string(path) {
            Ok(content) => content,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(Self::default()),
            Err(source) => {
                return Err(ConfigError::Read {
                    path: path.to_path_buf(),
                    source,
                });
            }
        };
        let config: Config = toml::from_str(&content).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })?;
        config.validate()?;
        Ok(config)
    }

    /// Like [`Config::load`], but falls back to the defaults on any error.
    pub fn load_or_default() -> Self {
        Self::load().unwrap_or_else(|e| {
            tracing::warn!("{}. Using default configuration.", e);
            Self::default()
        })
    }

    pub fn save_to(&self, path: &Path) -> Result<(), ConfigError> {
        let content = toml::to_string_pretty(self)?;
        if let Some(dir) = path.parent() {
            fs::create_dir_all(dir).map_err(|source| ConfigError::Write {
                path: dir.to_path_buf(),
                source,
            })?;
        }
        fs::write(path, content).map_err(|source| ConfigError::Write {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Rejects escalation prefixes and extra commands with no program.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if let Some(prefix) = self
            .escalation
            .iter()
            .find(|prefix| prefix.argv().first().is_none_or(|p| p.trim().is_empty()))
        {
            return Err(ConfigError::InvalidCommand(prefix.to_string()));
        }
        for op in Operation::ALL {
            if let Some(bad) = self
                .commands
                .for_operation(op)
                .iter()
                .find(|c| c.trim().is_empty())
            {
                return Err(ConfigError::InvalidCommand(bad.clone()));
            }
        }
        Ok(())
    }

    /// The extra candidates for `operation`, with `$XDG_SESSION_ID` filled in
    /// from the environment.
    pub fn extra_commands(&self, operation: Operation) -> CandidateList {
        let session_id = env::var("XDG_SESSION_ID").ok();
        extra_commands_with(self.commands.for_operation(operation), session_id.as_deref())
    }
}

/// Parses configured command strings. Commands that reference
/// `$XDG_SESSION_ID` are dropped when no session id is known.
fn extra_commands_with(commands: &[String], session_id: Option<&str>) -> CandidateList {
    commands
        .iter()
        .filter_map(|command_str| {
            if command_str.contains(SESSION_ID_VAR) {
                let id = session_id?;
                Command::parse(&command_str.replace(SESSION_ID_VAR, id))
            } else {
                Command::parse(command_str)
            }
        })
        .collect()
}
