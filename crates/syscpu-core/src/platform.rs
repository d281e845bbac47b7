//! Platform identity, kernel release and processor discovery.

use serde::{Deserialize, Serialize};

/// Operating system family the sampler is running on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Platform {
    /// Linux (procfs available).
    Linux,
    /// macOS / Darwin.
    MacOS,
    /// Windows.
    Windows,
    /// Anything else (BSDs, illumos, ...).
    Other,
}

impl Platform {
    /// Identity of the host this binary was compiled for.
    pub fn current() -> Self {
        if cfg!(target_os = "linux") {
            Self::Linux
        } else if cfg!(target_os = "macos") {
            Self::MacOS
        } else if cfg!(target_os = "windows") {
            Self::Windows
        } else {
            Self::Other
        }
    }
}

impl std::fmt::Display for Platform {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Linux => write!(f, "linux"),
            Self::MacOS => write!(f, "macos"),
            Self::Windows => write!(f, "windows"),
            Self::Other => write!(f, "other"),
        }
    }
}

/// Three-component version, ordered lexicographically (major, minor, patch).
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
pub struct Version {
    pub major: u32,
    pub minor: u32,
    pub patch: u32,
}

impl Version {
    pub const fn new(major: u32, minor: u32, patch: u32) -> Self {
        Self {
            major,
            minor,
            patch,
        }
    }

    /// Parse the leading numeric components of a release string.
    ///
    /// Accepts `"23.1.0"`, `"6.8.0-45-generic"`, `"5.15"` and similar; stops at
    /// the first component carrying a non-digit suffix. Missing components
    /// default to zero. Returns `None` when no leading number is present.
    pub fn parse(raw: &str) -> Option<Self> {
        let mut parts = [0u32; 3];
        let mut seen = 0usize;
        for (slot, piece) in parts.iter_mut().zip(raw.trim().split('.')) {
            let digits: String = piece.chars().take_while(|c| c.is_ascii_digit()).collect();
            if digits.is_empty() {
                break;
            }
            *slot = digits.parse().ok()?;
            seen += 1;
            if digits.len() != piece.len() {
                break;
            }
        }
        (seen > 0).then(|| Self::new(parts[0], parts[1], parts[2]))
    }
}

impl std::fmt::Display for Version {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}.{}.{}", self.major, self.minor, self.patch)
    }
}

/// Kernel release reported by `uname(2)`, e.g. `"6.8.0-45-generic"`.
#[cfg(unix)]
pub fn kernel_release() -> Option<String> {
    // SAFETY: `utsname` is plain old data; an all-zero value is valid.
    let mut name: libc::utsname = unsafe { std::mem::zeroed() };
    // SAFETY: `uname` fills the provided struct and has no other side effects.
    if unsafe { libc::uname(&mut name) } != 0 {
        return None;
    }
    // SAFETY: on success `release` holds a NUL-terminated string.
    let release = unsafe { std::ffi::CStr::from_ptr(name.release.as_ptr()) };
    let release = release.to_string_lossy().trim().to_string();
    if release.is_empty() {
        None
    } else {
        Some(release)
    }
}

#[cfg(not(unix))]
pub fn kernel_release() -> Option<String> {
    None
}

/// Number of logical processors visible to this process (at least 1).
pub fn logical_processor_count() -> usize {
    std::thread::available_parallelism()
        .map(std::num::NonZero::get)
        .unwrap_or(1)
}

/// Platform information.
pub fn platform_info() -> PlatformInfo {
    PlatformInfo {
        platform: Platform::current(),
        system: std::env::consts::OS.to_string(),
        machine: std::env::consts::ARCH.to_string(),
        family: std::env::consts::FAMILY.to_string(),
        kernel_release: kernel_release(),
        logical_processors: logical_processor_count(),
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlatformInfo {
    pub platform: Platform,
    pub system: String,
    pub machine: String,
    pub family: String,
    pub kernel_release: Option<String>,
    pub logical_processors: usize,
}
