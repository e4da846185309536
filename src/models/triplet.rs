// Copyright 2025 dentsusoken
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! Runtime environment identity.
//!
//! A [`Triplet`] names the platform, instruction set and C runtime a native
//! addon was compiled for. The name is borrowed from cross compiling
//! nomenclature.

use crate::error::{PrebuiltsError, Result};
use crate::paths::prebuilts::{TRIPLET_SEPARATOR, triplet_directory_name};
use crate::platform::{ENV_ARCH, ENV_LIBC, ENV_PLATFORM, HostEnvironment};
use log::debug;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Describes a runtime environment (OS, ISA, C runtime).
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "RawTriplet")]
pub struct Triplet {
    platform: String,
    arch: String,
    libc: Option<String>,
}

#[derive(Deserialize)]
struct RawTriplet {
    platform: String,
    arch: String,
    #[serde(default)]
    libc: Option<String>,
}

impl TryFrom<RawTriplet> for Triplet {
    type Error = PrebuiltsError;

    fn try_from(raw: RawTriplet) -> Result<Self> {
        Triplet::new(raw.platform, raw.arch, raw.libc)
    }
}

impl Triplet {
    /// Builds a triplet, rejecting identifiers that would break the
    /// directory naming scheme.
    pub fn new(
        platform: impl Into<String>,
        arch: impl Into<String>,
        libc: Option<String>,
    ) -> Result<Self> {
        let platform = platform.into();
        let arch = arch.into();
        validate_identifier("platform", &platform)?;
        validate_identifier("arch", &arch)?;
        if let Some(libc) = &libc {
            validate_identifier("libc", libc)?;
        }
        Ok(Self {
            platform,
            arch,
            libc,
        })
    }

    /// Operating system identifier, e.g. `linux`, `darwin`, `win32`.
    pub fn platform(&self) -> &str {
        &self.platform
    }

    /// Instruction set identifier, e.g. `x64`, `arm64`, `armv7`.
    pub fn arch(&self) -> &str {
        &self.arch
    }

    /// C runtime family, only set where a platform commonly has several.
    pub fn libc(&self) -> Option<&str> {
        self.libc.as_deref()
    }
}

impl fmt::Display for Triplet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&triplet_directory_name(self))
    }
}

fn validate_identifier(field: &str, value: &str) -> Result<()> {
    if value.is_empty() {
        return Err(PrebuiltsError::InvalidTriplet(format!(
            "{field} must not be empty"
        )));
    }
    if value
        .chars()
        .any(|c| c == TRIPLET_SEPARATOR || c == '/' || c == '\\' || c.is_whitespace())
    {
        return Err(PrebuiltsError::InvalidTriplet(format!(
            "{field} '{value}' must not contain '{TRIPLET_SEPARATOR}', path separators or whitespace"
        )));
    }
    Ok(())
}

/// The C runtime part of a [`PartialTriplet`].
///
/// An explicitly absent libc is a real override and differs from leaving the
/// field unspecified.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum LibcOverride {
    #[default]
    Unspecified,
    Absent,
    Named(String),
}

impl LibcOverride {
    /// Interprets an optional command line value; `none` requests absence.
    pub fn from_cli(value: Option<&str>) -> Self {
        match value {
            None => LibcOverride::Unspecified,
            Some("none") => LibcOverride::Absent,
            Some(name) => LibcOverride::Named(name.to_string()),
        }
    }
}

/// Triplet values supplied by overrides; unset fields fall back.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct PartialTriplet {
    pub platform: Option<String>,
    pub arch: Option<String>,
    pub libc: LibcOverride,
}

/// Layers `partial` over `fallback`.
///
/// Non-empty platform/arch values win; the libc wins when it is a non-empty
/// name or explicitly absent.
pub fn merge_with_fallback(partial: &PartialTriplet, fallback: &Triplet) -> Result<Triplet> {
    let platform = non_empty(partial.platform.as_deref()).unwrap_or(fallback.platform());
    let arch = non_empty(partial.arch.as_deref()).unwrap_or(fallback.arch());
    let libc = match &partial.libc {
        LibcOverride::Absent => None,
        LibcOverride::Named(name) if !name.is_empty() => Some(name.clone()),
        _ => fallback.libc.clone(),
    };
    Triplet::new(platform, arch, libc)
}

fn non_empty(value: Option<&str>) -> Option<&str> {
    value.filter(|v| !v.is_empty())
}

/// Returns the triplet of the host.
///
/// A bare `arm` architecture is refined with the ARM revision when the host
/// reports one (`armv7`, `armv6`).
pub fn detect_host_triplet<H: HostEnvironment + ?Sized>(host: &H) -> Result<Triplet> {
    let arch = host.architecture();
    let arch = match host.arm_version() {
        Some(version) if arch == "arm" => format!("armv{version}"),
        _ => arch,
    };
    Triplet::new(host.platform(), arch, host.libc_family())
}

/// Returns triplet values provided by the environment for cross compiling.
pub fn environment_configured_triplet<H: HostEnvironment + ?Sized>(host: &H) -> PartialTriplet {
    PartialTriplet {
        platform: host.env_override(ENV_PLATFORM),
        arch: host.env_override(ENV_ARCH),
        libc: host
            .env_override(ENV_LIBC)
            .map_or(LibcOverride::Unspecified, LibcOverride::Named),
    }
}

/// Returns the triplet composed from the cross compiling environment and the
/// host.
pub fn resolve_active_triplet<H: HostEnvironment + ?Sized>(host: &H) -> Result<Triplet> {
    let triplet = merge_with_fallback(
        &environment_configured_triplet(host),
        &detect_host_triplet(host)?,
    )?;
    debug!("Active triplet: {triplet}");
    Ok(triplet)
}
