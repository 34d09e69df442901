use std::process::ExitCode;

use clap::Parser;
use syspower::{Config, Operation, PowerError, PowerManager};
use tracing_subscriber::EnvFilter;

/// Shut down, reboot, suspend, hibernate or log out, whatever the platform.
#[derive(Parser, Debug)]
#[command(name = "syspower", version, about)]
struct Cli {
    /// shutdown, reboot, suspend, hibernate, hybrid-sleep or logout
    #[arg(required_unless_present = "write_default_config")]
    operation: Option<Operation>,

    /// Print what would be tried, in order, and exit
    #[arg(short = 'n', long, requires = "operation")]
    dry_run: bool,

    /// Write the default config to the user config directory
    #[arg(long, conflicts_with = "operation")]
    write_default_config: bool,
}

fn init_logging() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("syspower=info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn dry_run(manager: &PowerManager, operation: Operation) -> Result<(), PowerError> {
    let attempts = manager.attempts(operation)?;
    if attempts.is_empty() {
        println!("{}: supported, but nothing to try on this system", operation);
    }
    for (i, attempt) in attempts.iter().enumerate() {
        println!("{:>3}. {}", i + 1, attempt);
    }
    Ok(())
}

fn write_default_config() -> ExitCode {
    let written = Config::default_path().and_then(|path| {
        Config::default().save_to(&path)?;
        Ok(path)
    });
    match written {
        Ok(path) => {
            println!("Wrote {}", path.display());
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("syspower: {}", e);
            ExitCode::FAILURE
        }
    }
}

fn exit_code(err: &PowerError) -> ExitCode {
    match err {
        PowerError::Unsupported { .. } => ExitCode::from(3),
        PowerError::NoWorkingMethod { .. } => ExitCode::from(4),
    }
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logging();

    if cli.write_default_config {
        return write_default_config();
    }
    // clap guarantees an operation whenever --write-default-config is absent.
    let Some(operation) = cli.operation else {
        return ExitCode::from(2);
    };

    let manager = PowerManager::new();
    let result = if cli.dry_run {
        dry_run(&manager, operation)
    } else {
        manager.perform(operation)
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("syspower: {}", e);
            exit_code(&e)
        }
    }
}
