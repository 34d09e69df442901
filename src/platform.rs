//! Facts about the host: OS family, kernel, privilege and search path.

use std::env;
use std::fmt;
use std::fs::Metadata;
use std::path::{Path, PathBuf};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum OsFamily {
    Posix,
    Windows,
    Other,
}

/// A snapshot of the platform, taken fresh for every operation.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PlatformIdentity {
    pub os_family: OsFamily,
    /// Lowercase kernel/platform name, e.g. "linux", "darwin", "sunos".
    pub kernel_name: String,
    pub is_privileged: bool,
}

/// The kernel families the resolver distinguishes between.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Kernel {
    Linux,
    Darwin,
    Solaris,
    FreeBsd,
    /// OpenBSD, NetBSD, DragonFly and friends.
    OtherBsd,
    OtherPosix,
}

impl PlatformIdentity {
    pub fn new(os_family: OsFamily, kernel_name: impl Into<String>, is_privileged: bool) -> Self {
        Self {
            os_family,
            kernel_name: kernel_name.into().to_ascii_lowercase(),
            is_privileged,
        }
    }

    /// Classifies the kernel name. Only meaningful for POSIX platforms.
    pub fn kernel(&self) -> Kernel {
        let name = self.kernel_name.to_ascii_lowercase();
        if name.starts_with("linux") {
            Kernel::Linux
        } else if name.starts_with("darwin") || name.starts_with("macos") {
            Kernel::Darwin
        } else if name.starts_with("sunos") || name.starts_with("solaris") || name.starts_with("illumos") {
            Kernel::Solaris
        } else if name.starts_with("freebsd") {
            Kernel::FreeBsd
        } else if name.contains("bsd") || name.starts_with("dragonfly") {
            Kernel::OtherBsd
        } else {
            Kernel::OtherPosix
        }
    }
}

impl fmt::Display for PlatformIdentity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.os_family {
            OsFamily::Posix => write!(f, "{}", self.kernel_name),
            OsFamily::Windows => write!(f, "windows"),
            OsFamily::Other => write!(f, "unknown platform ({})", self.kernel_name),
        }
    }
}

/// Supplies platform facts. Called once per operation; implementations
/// must not cache, since privilege and environment can change between calls.
pub trait PlatformProbe {
    fn identity(&self) -> PlatformIdentity;

    /// Directories searched for desktop-session tools, in order.
    fn search_path(&self) -> Vec<PathBuf>;
}

/// Reads the facts of the machine we are running on.
#[derive(Clone, Copy, Debug, Default)]
pub struct HostProbe;

impl PlatformProbe for HostProbe {
    fn identity(&self) -> PlatformIdentity {
        let os_family = if cfg!(unix) {
            OsFamily::Posix
        } else if cfg!(windows) {
            OsFamily::Windows
        } else {
            OsFamily::Other
        };
        let kernel_name = match env::consts::OS {
            "macos" | "ios" => "darwin",
            "solaris" | "illumos" => "sunos",
            other => other,
        };
        PlatformIdentity::new(os_family, kernel_name, is_privileged())
    }

    fn search_path(&self) -> Vec<PathBuf> {
        env::var_os("PATH")
            .map(|path| env::split_paths(&path).collect())
            .unwrap_or_default()
    }
}

#[cfg(unix)]
fn is_privileged() -> bool {
    // SAFETY: geteuid has no preconditions and cannot fail.
    unsafe { libc::geteuid() == 0 }
}

#[cfg(not(unix))]
fn is_privileged() -> bool {
    false
}

/// True if `path` is a regular file we could execute.
pub fn is_executable(path: &Path) -> bool {
    path.metadata()
        .map(|metadata| metadata.is_file() && has_exec_bit(&metadata))
        .unwrap_or(false)
}

#[cfg(unix)]
fn has_exec_bit(metadata: &Metadata) -> bool {
    use std::os::unix::fs::PermissionsExt;
    metadata.permissions().mode() & 0o111 != 0
}

#[cfg(not(unix))]
fn has_exec_bit(_metadata: &Metadata) -> bool {
    true
}

/// True if an executable called `program` exists in any of `search_path`.
pub fn find_on_path(program: &str, search_path: &[PathBuf]) -> bool {
    search_path.iter().any(|dir| is_executable(&dir.join(program)))
}
