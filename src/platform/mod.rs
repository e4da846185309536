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

//! Host detection for the currently executing process.
//!
//! Identifiers follow the naming used by the Node.js runtime
//! (`process.platform` / `process.arch`) because those are the names that end
//! up in prebuilt directory layouts shared with JavaScript tooling.

pub mod file_ops;
pub mod filesystem;
pub mod libc_family;

pub use filesystem::{FileStat, FileSystem, LocalFileSystem};

use crate::config::PrebuiltsConfig;
use crate::error::{PrebuiltsError, Result};
use log::{debug, warn};
use std::process::Command;

/// Environment variable overriding the target platform when cross compiling.
pub const ENV_PLATFORM: &str = "npm_config_platform";
/// Environment variable overriding the target architecture when cross compiling.
pub const ENV_ARCH: &str = "npm_config_arch";
/// Environment variable overriding the target C runtime when cross compiling.
pub const ENV_LIBC: &str = "npm_config_libc";
/// Environment variable requesting a from-source build instead of prebuilts.
pub const ENV_BUILD_FROM_SOURCE: &str = "npm_config_build_from_source";

/// Ambient state of the host a triplet is resolved against.
///
/// Everything the triplet model and the path enumeration read from the
/// process goes through this trait so tests can substitute a fake host.
pub trait HostEnvironment {
    /// Operating system identifier, e.g. `linux`, `darwin`, `win32`.
    fn platform(&self) -> String;

    /// Instruction set identifier, e.g. `x64`, `arm64`, `arm`.
    fn architecture(&self) -> String;

    /// ARM architecture revision (`"7"`, `"6"`) on 32-bit ARM hosts.
    fn arm_version(&self) -> Option<String>;

    /// C runtime family where a platform commonly ships more than one.
    fn libc_family(&self) -> Option<String>;

    /// Reads an environment override; empty values count as unset.
    fn env_override(&self, key: &str) -> Option<String>;

    /// Highest Node-API version the host runtime can load.
    fn napi_version(&self) -> Result<u32>;
}

/// [`HostEnvironment`] backed by the running process and its environment.
#[derive(Debug, Clone, Copy)]
pub struct ProcessHost<'a> {
    config: &'a PrebuiltsConfig,
}

impl<'a> ProcessHost<'a> {
    pub fn new(config: &'a PrebuiltsConfig) -> Self {
        Self { config }
    }
}

impl HostEnvironment for ProcessHost<'_> {
    fn platform(&self) -> String {
        current_platform().to_string()
    }

    fn architecture(&self) -> String {
        current_architecture().to_string()
    }

    fn arm_version(&self) -> Option<String> {
        current_arm_version().map(str::to_string)
    }

    fn libc_family(&self) -> Option<String> {
        libc_family::detect_libc_family().map(str::to_string)
    }

    fn env_override(&self, key: &str) -> Option<String> {
        let value = std::env::var_os(key).filter(|value| !value.is_empty())?;
        match value.into_string() {
            Ok(value) => Some(value),
            Err(raw) => {
                // Still counts as set, e.g. for npm_config_build_from_source.
                let lossy = raw.to_string_lossy().into_owned();
                warn!("{key} is not valid UTF-8, using {lossy:?}");
                Some(lossy)
            }
        }
    }

    fn napi_version(&self) -> Result<u32> {
        if let Some(version) = self.config.napi_version {
            debug!("Using configured Node-API version {version}");
            return Ok(version);
        }
        query_runtime_napi_version(self.config.node_binary())
    }
}

/// Maps the compile-time target OS onto the runtime's platform identifier.
pub fn current_platform() -> &'static str {
    platform_identifier(std::env::consts::OS)
}

/// Maps the compile-time target architecture onto the runtime's identifier.
pub fn current_architecture() -> &'static str {
    architecture_identifier(std::env::consts::ARCH, cfg!(target_endian = "little"))
}

fn platform_identifier(os: &'static str) -> &'static str {
    match os {
        "macos" => "darwin",
        "windows" => "win32",
        "solaris" | "illumos" => "sunos",
        other => other,
    }
}

fn architecture_identifier(arch: &'static str, little_endian: bool) -> &'static str {
    match arch {
        "x86_64" => "x64",
        "x86" => "ia32",
        "aarch64" => "arm64",
        "loongarch64" => "loong64",
        "powerpc" => "ppc",
        "powerpc64" => "ppc64",
        "mips" if little_endian => "mipsel",
        "mips" => "mips",
        "mips64" if little_endian => "mips64el",
        other => other,
    }
}

/// ARM revision of the build target, if it is a 32-bit ARM target.
pub fn current_arm_version() -> Option<&'static str> {
    #[cfg(all(target_arch = "arm", target_feature = "v7"))]
    return Some("7");

    #[cfg(all(target_arch = "arm", not(target_feature = "v7"), target_feature = "v6"))]
    return Some("6");

    #[cfg(not(all(target_arch = "arm", any(target_feature = "v7", target_feature = "v6"))))]
    return None;
}

/// Asks the host runtime which Node-API version it implements.
fn query_runtime_napi_version(node_binary: &str) -> Result<u32> {
    let node_path = which::which(node_binary).map_err(|e| {
        PrebuiltsError::NapiVersionUnavailable(format!("'{node_binary}' not found: {e}"))
    })?;

    debug!("Querying Node-API version from {}", node_path.display());
    let output = Command::new(&node_path)
        .args(["-p", "process.versions.napi"])
        .output()
        .map_err(|e| {
            PrebuiltsError::NapiVersionUnavailable(format!(
                "failed to run {}: {e}",
                node_path.display()
            ))
        })?;

    if !output.status.success() {
        return Err(PrebuiltsError::NapiVersionUnavailable(format!(
            "{} exited with {}",
            node_path.display(),
            output.status
        )));
    }

    parse_napi_version(&String::from_utf8_lossy(&output.stdout))
}

fn parse_napi_version(raw: &str) -> Result<u32> {
    let trimmed = raw.trim();
    match trimmed.parse::<u32>() {
        Ok(version) if version > 0 => Ok(version),
        _ => Err(PrebuiltsError::NapiVersionUnavailable(format!(
            "unexpected Node-API version '{trimmed}'"
        ))),
    }
}
