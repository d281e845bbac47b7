//! Read-only host facts consumed by the sampler.
//!
//! Everything the sampling algorithm needs from the operating system goes
//! through [`Environment`], so the algorithm itself can be driven by a
//! scripted environment in tests.

use std::io;
use std::time::{Duration, SystemTime};

use crate::native::NativeCounter;
use crate::platform::{Platform, Version, kernel_release, logical_processor_count};

/// Host facts and OS resources available to a sampler.
pub trait Environment: Send {
    /// Identity of the running platform.
    fn platform(&self) -> Platform;

    /// Version of the host's process accounting layer, if it can be determined.
    fn runtime_version(&self) -> Option<Version>;

    /// Logical processor count (at least 1).
    fn processor_count(&self) -> usize;

    /// Current wall-clock time.
    fn now(&self) -> SystemTime;

    /// Cumulative CPU time of every visible process.
    ///
    /// Processes that could not be read appear as `Err` entries; they are
    /// skipped by the caller.
    fn process_cpu_times(&self) -> Vec<io::Result<Duration>>;

    /// Create the OS aggregate CPU counter.
    fn open_native_counter(&self) -> io::Result<Box<dyn NativeCounter>>;
}

/// [`Environment`] backed by the real host.
///
/// | platform    | processes           | native counter |
/// |-------------|---------------------|----------------|
/// | Linux       | `/proc/<pid>/stat`  | `/proc/stat`   |
/// | other Unix  | `ps -axo time=`     | unsupported    |
/// | anything else | none              | unsupported    |
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemEnvironment;

impl SystemEnvironment {
    pub fn new() -> Self {
        Self
    }
}

impl Environment for SystemEnvironment {
    fn platform(&self) -> Platform {
        Platform::current()
    }

    fn runtime_version(&self) -> Option<Version> {
        kernel_release().as_deref().and_then(Version::parse)
    }

    fn processor_count(&self) -> usize {
        logical_processor_count()
    }

    fn now(&self) -> SystemTime {
        SystemTime::now()
    }

    fn process_cpu_times(&self) -> Vec<io::Result<Duration>> {
        #[cfg(target_os = "linux")]
        {
            crate::procfs::process_cpu_times()
        }
        #[cfg(all(unix, not(target_os = "linux")))]
        {
            crate::ps::process_cpu_times()
        }
        #[cfg(not(unix))]
        {
            Vec::new()
        }
    }

    fn open_native_counter(&self) -> io::Result<Box<dyn NativeCounter>> {
        #[cfg(target_os = "linux")]
        {
            Ok(Box::new(crate::procfs::ProcStatCounter::open()?))
        }
        #[cfg(not(target_os = "linux"))]
        {
            Err(io::Error::new(
                io::ErrorKind::Unsupported,
                format!("no native aggregate CPU counter on {}", self.platform()),
            ))
        }
    }
}
