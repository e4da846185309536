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

//! Directory and file naming for prebuilt addons.
//!
//! ```text
//! <package>/prebuilts/<platform>-<arch>[-<libc>]/<name>-napi<NN>.node
//! <package>/prebuilts/<platform>-<arch>[-<libc>]/<auxiliary file>
//! <package>/build/{Debug,Release}/<name>.node
//! ```

use crate::models::Triplet;
use std::path::{Path, PathBuf};

pub const PREBUILTS_DIR: &str = "prebuilts";
pub const BUILD_DIR: &str = "build";
pub const DEBUG_DIR: &str = "Debug";
pub const RELEASE_DIR: &str = "Release";
pub const ADDON_EXTENSION: &str = "node";
pub const TRIPLET_SEPARATOR: char = '-';

/// Bijectively maps a triplet to a directory name.
pub fn triplet_directory_name(triplet: &Triplet) -> String {
    let parts = [Some(triplet.platform()), Some(triplet.arch()), triplet.libc()];

    let mut name = String::new();
    for part in parts.into_iter().flatten().filter(|part| !part.is_empty()) {
        if !name.is_empty() {
            name.push(TRIPLET_SEPARATOR);
        }
        name.push_str(part);
    }
    name
}

/// `<name>-napi<NN>.node` with the version padded to two digits.
pub fn versioned_addon_filename(name: &str, napi_version: u32) -> String {
    format!("{name}-napi{napi_version:02}.{ADDON_EXTENSION}")
}

/// `<name>.node` as produced by the addon build.
pub fn addon_filename(name: &str) -> String {
    format!("{name}.{ADDON_EXTENSION}")
}

/// `prebuilts/<triplet>`, under `package_dir` when given.
pub fn prebuilts_directory_path(triplet: &Triplet, package_dir: Option<&Path>) -> PathBuf {
    let relative = Path::new(PREBUILTS_DIR).join(triplet_directory_name(triplet));
    match package_dir {
        Some(package_dir) => package_dir.join(relative),
        None => relative,
    }
}

/// Full path of a prebuilt addon binary for one Node-API version.
pub fn addon_prebuilt_path(
    name: &str,
    napi_version: u32,
    triplet: &Triplet,
    package_dir: Option<&Path>,
) -> PathBuf {
    prebuilts_directory_path(triplet, package_dir).join(versioned_addon_filename(name, napi_version))
}

/// Addon binaries of local builds, debug before release.
pub fn local_build_addon_paths(package_dir: &Path, name: &str) -> [PathBuf; 2] {
    let build_dir = package_dir.join(BUILD_DIR);
    [
        build_dir.join(DEBUG_DIR).join(addon_filename(name)),
        build_dir.join(RELEASE_DIR).join(addon_filename(name)),
    ]
}
