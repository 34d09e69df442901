use std::cell::RefCell;
use std::path::PathBuf;

use syspower::{
    Command, CommandRunner, Config, EscalationPrefix, Operation, OsFamily, Outcome, PlatformIdentity,
    PlatformProbe, PowerError, PowerManager,
};

/// Fails everything except `accept`, remembering what it was asked to run.
struct Recorder {
    accept: Option<String>,
    help: Option<Vec<u8>>,
    log: RefCell<Vec<String>>,
}

impl Recorder {
    fn new(accept: Option<&str>) -> Self {
        Self {
            accept: accept.map(str::to_string),
            help: None,
            log: RefCell::new(Vec::new()),
        }
    }
}

impl CommandRunner for Recorder {
    fn run(&self, command: &Command) -> bool {
        let line = command.to_string();
        let ok = self.accept.as_deref() == Some(line.as_str());
        self.log.borrow_mut().push(line);
        ok
    }

    fn output(&self, _command: &Command) -> Option<Vec<u8>> {
        self.help.clone()
    }
}

struct Fixed(PlatformIdentity);

impl PlatformProbe for Fixed {
    fn identity(&self) -> PlatformIdentity {
        self.0.clone()
    }

    fn search_path(&self) -> Vec<PathBuf> {
        Vec::new()
    }
}

fn config_without_state_file() -> Config {
    Config {
        power_state_file: PathBuf::from("/nonexistent/syspower/state"),
        ..Config::default()
    }
}

#[test]
fn unprivileged_linux_reboot_tries_sudo_first() {
    let runner = Recorder::new(Some("sudo -n shutdown -r now"));
    let pm = PowerManager::from_parts(
        &runner,
        Fixed(PlatformIdentity::new(OsFamily::Posix, "linux", false)),
        config_without_state_file(),
    );

    assert!(pm.reboot().is_ok());
    assert_eq!(*runner.log.borrow(), vec!["sudo -n systemctl reboot", "sudo -n shutdown -r now"]);
}

#[test]
fn custom_escalation_order_is_respected() {
    let runner = Recorder::new(None);
    let config = Config {
        escalation: vec![EscalationPrefix::new(["run0"]), EscalationPrefix::new(["doas", "-n"])],
        ..config_without_state_file()
    };
    let pm = PowerManager::from_parts(
        &runner,
        Fixed(PlatformIdentity::new(OsFamily::Posix, "openbsd", false)),
        config,
    );

    let err = pm.reboot().unwrap_err();
    assert_eq!(err, PowerError::NoWorkingMethod { operation: Operation::Reboot, attempts: 12 });
    let log = runner.log.borrow();
    assert_eq!(log[0], "run0 systemctl reboot");
    assert_eq!(log[4], "doas -n systemctl reboot");
    assert_eq!(log[8], "systemctl reboot");
}

#[test]
fn every_operation_on_an_unknown_platform_is_unsupported() {
    let runner = Recorder::new(Some("shutdown /s"));
    let pm = PowerManager::from_parts(
        &runner,
        Fixed(PlatformIdentity::new(OsFamily::Other, "os2", true)),
        Config::default(),
    );

    let results = [
        pm.shutdown(),
        pm.reboot(),
        pm.suspend(),
        pm.hibernate(),
        pm.hybrid_sleep(),
        pm.logout(),
    ];
    for result in &results {
        assert_eq!(Outcome::from(result), Outcome::UnsupportedOperation);
    }
    assert!(runner.log.borrow().is_empty());
}

#[test]
fn dry_run_attempts_match_real_run() {
    let runner = Recorder::new(None);
    let pm = PowerManager::from_parts(
        &runner,
        Fixed(PlatformIdentity::new(OsFamily::Posix, "linux", true)),
        config_without_state_file(),
    );

    let planned: Vec<String> = pm
        .attempts(Operation::Hibernate)
        .unwrap()
        .iter()
        .map(|a| a.to_string())
        .collect();
    assert!(pm.hibernate().is_err());

    // The final planned attempt is the power-state write, which is not a command.
    assert_eq!(planned.last().map(String::as_str), Some("write \"disk\" to the power-state file"));
    assert_eq!(planned[..planned.len() - 1], runner.log.borrow()[..]);
}
