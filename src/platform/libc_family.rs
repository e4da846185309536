//! C runtime family detection.
//!
//! Only Linux commonly ships with more than one C runtime, so every other
//! platform reports no family at all.

use log::{debug, warn};

pub const GLIBC: &str = "glibc";
pub const MUSL: &str = "musl";

#[cfg(target_os = "linux")]
const LDD_PATH: &str = "/usr/bin/ldd";

/// Returns the C runtime family of the host, if the platform has several.
///
/// The system `ldd` script is inspected first since it belongs to the
/// installed C runtime. When it cannot be read the family this binary was
/// linked against is used instead.
pub fn detect_libc_family() -> Option<&'static str> {
    #[cfg(target_os = "linux")]
    {
        match std::fs::read_to_string(LDD_PATH) {
            Ok(contents) => {
                if let Some(family) = family_from_ldd(&contents) {
                    debug!("Detected {family} from {LDD_PATH}");
                    return Some(family);
                }
                warn!("Unrecognized {LDD_PATH}, falling back to the build target's C runtime");
            }
            Err(e) => {
                debug!("Cannot read {LDD_PATH}: {e}");
            }
        }
        compile_time_family()
    }

    #[cfg(not(target_os = "linux"))]
    {
        debug!("No C runtime family on this platform");
        None
    }
}

/// Classifies the contents of an `ldd` script.
pub fn family_from_ldd(contents: &str) -> Option<&'static str> {
    if contents.contains("musl") {
        Some(MUSL)
    } else if contents.contains("GNU C Library") || contents.contains("GLIBC") {
        Some(GLIBC)
    } else {
        None
    }
}

#[cfg(target_os = "linux")]
fn compile_time_family() -> Option<&'static str> {
    if cfg!(target_env = "musl") {
        Some(MUSL)
    } else if cfg!(target_env = "gnu") {
        Some(GLIBC)
    } else {
        None
    }
}
