use std::fmt;

/// A single external invocation: a program followed by its arguments.
///
/// Commands are never handed to a shell, so arguments need no quoting.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Command {
    argv: Vec<String>,
}

/// An ordered list of candidates, tried first to last.
pub type CandidateList = Vec<Command>;

impl Command {
    pub fn new<I, S>(program: impl Into<String>, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut argv = vec![program.into()];
        argv.extend(args.into_iter().map(Into::into));
        Self { argv }
    }

    /// Builds a command from a full argument vector. Returns `None` when
    /// `argv` is empty since there would be no program to run.
    pub fn from_argv<I, S>(argv: I) -> Option<Self>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let argv: Vec<String> = argv.into_iter().map(Into::into).collect();
        if argv.is_empty() || argv[0].is_empty() {
            None
        } else {
            Some(Self { argv })
        }
    }

    /// Splits a string like "program arg1 arg2" on whitespace.
    pub fn parse(command_str: &str) -> Option<Self> {
        Self::from_argv(command_str.split_whitespace())
    }

    pub fn program(&self) -> &str {
        &self.argv[0]
    }

    pub fn args(&self) -> &[String] {
        &self.argv[1..]
    }

    pub fn argv(&self) -> &[String] {
        &self.argv
    }

    /// Returns a new command with `prefix` placed in front of this one.
    pub fn prefixed(&self, prefix: &[String]) -> Self {
        let mut argv = Vec::with_capacity(prefix.len() + self.argv.len());
        argv.extend(prefix.iter().cloned());
        argv.extend(self.argv.iter().cloned());
        Self { argv }
    }
}

impl fmt::Display for Command {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.argv.join(" "))
    }
}

/// Shorthand for building command tables: `cmd(&["systemctl", "poweroff"])`.
pub(crate) fn cmd(argv: &[&str]) -> Command {
    Command {
        argv: argv.iter().map(|s| s.to_string()).collect(),
    }
}
