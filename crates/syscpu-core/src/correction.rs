//! Correction for hosts that over-report cumulative process CPU time.
//!
//! Legacy process accounting on macOS reported cumulative CPU time scaled up
//! by 100. Deltas measured on such a host are divided back down before they
//! are normalized.

use crate::platform::{Platform, Version};

/// Platform carrying the legacy scaling defect.
pub const LEGACY_PLATFORM: Platform = Platform::MacOS;

/// First runtime version on [`LEGACY_PLATFORM`] that reports correctly.
pub const LEGACY_VERSION_THRESHOLD: Version = Version::new(4, 3, 0);

/// Whether deltas measured on `platform` at `runtime_version` need correcting.
///
/// An unknown version is never corrected.
pub fn needs_correction(platform: Platform, runtime_version: Option<Version>) -> bool {
    platform == LEGACY_PLATFORM
        && runtime_version.is_some_and(|v| v < LEGACY_VERSION_THRESHOLD)
}

/// Correct a measured CPU time delta (any unit) for the legacy defect.
pub fn correct_cpu_delta(delta: f64, platform: Platform, runtime_version: Option<Version>) -> f64 {
    if needs_correction(platform, runtime_version) {
        delta / 100.0
    } else {
        delta
    }
}
