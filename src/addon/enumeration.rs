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

//! Candidate prebuilt paths for an addon.
//!
//! Newer Node-API versions are a superset of older ones, so the newest
//! version the host can load is tried first.

use crate::error::Result;
use crate::models::{LoaderOptions, Triplet, resolve_active_triplet};
use crate::paths::addon_prebuilt_path;
use crate::platform::HostEnvironment;
use log::debug;
use std::path::{Path, PathBuf};

/// Versions loadable by a host supporting up to `max_supported`, newest first.
pub fn compatible_napi_versions(napi_versions: &[u32], max_supported: u32) -> Vec<u32> {
    let mut versions: Vec<u32> = napi_versions
        .iter()
        .copied()
        .filter(|version| *version <= max_supported)
        .collect();
    versions.sort_unstable_by(|a, b| b.cmp(a));
    versions.dedup();

    if versions.len() < napi_versions.len() {
        debug!(
            "Node-API versions {napi_versions:?} narrowed to {versions:?} (host supports up to {max_supported})"
        );
    }
    versions
}

/// Ordered prebuilt paths for `options` on `triplet`.
pub fn compatible_paths_for(
    options: &LoaderOptions,
    triplet: &Triplet,
    max_supported: u32,
    package_dir: Option<&Path>,
) -> Vec<PathBuf> {
    compatible_napi_versions(options.napi_versions(), max_supported)
        .into_iter()
        .map(|version| addon_prebuilt_path(options.name(), version, triplet, package_dir))
        .collect()
}

/// Ordered prebuilt paths for `options` on the active triplet of `host`.
///
/// Empty when none of the addon's Node-API versions can be loaded.
pub fn compatible_prebuilt_addon_paths<H: HostEnvironment + ?Sized>(
    options: &LoaderOptions,
    package_dir: Option<&Path>,
    host: &H,
) -> Result<Vec<PathBuf>> {
    let max_supported = host.napi_version()?;
    let triplet = resolve_active_triplet(host)?;
    let paths = compatible_paths_for(options, &triplet, max_supported, package_dir);
    debug!("Prebuilt candidates for '{}': {paths:?}", options.name());
    Ok(paths)
}
