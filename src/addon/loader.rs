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

//! Locating and loading an addon binary.
//!
//! Local builds under `build/` are tried before any prebuilt so that a debug
//! build, or a from-source build requested through the environment, takes
//! precedence over what the package shipped.

use crate::addon::enumeration::compatible_prebuilt_addon_paths;
use crate::error::{PrebuiltsError, Result};
use crate::models::LoaderOptions;
use crate::paths::local_build_addon_paths;
use crate::platform::{FileSystem, HostEnvironment};
use libloading::Library;
use log::debug;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Why a single candidate could not be loaded.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum LoadError {
    /// Nothing loadable exists at the path; the next candidate may be tried.
    #[error("Cannot find module '{}'", .path.display())]
    NotFound { path: PathBuf },

    /// The binary exists but could not be loaded.
    #[error("Failed to load '{}': {reason}", .path.display())]
    Failed { path: PathBuf, reason: String },
}

/// Loads an addon binary from a path.
pub trait AddonLoader {
    type Handle;

    fn load(&self, path: &Path) -> std::result::Result<Self::Handle, LoadError>;
}

/// Outcome of probing an ordered list of candidates.
#[derive(Debug)]
pub enum Resolution<H> {
    Found { path: PathBuf, handle: H },
    Exhausted { last_error: Option<LoadError> },
}

/// A loaded addon together with the path it was loaded from.
#[derive(Debug)]
pub struct AddonModule<H> {
    pub handle: H,
    /// The candidate path that succeeded.
    pub path: PathBuf,
    /// `path` with symlinks and relative components resolved.
    pub resolved_path: PathBuf,
}

/// Tries `candidates` in order and stops at the first successful load.
///
/// Not-found failures move on to the next candidate; any other failure is
/// returned immediately.
pub fn probe_candidates<L: AddonLoader + ?Sized>(
    candidates: &[PathBuf],
    loader: &L,
) -> Result<Resolution<L::Handle>> {
    let mut last_error = None;

    for candidate in candidates {
        match loader.load(candidate) {
            Ok(handle) => {
                debug!("Loaded addon from {}", candidate.display());
                return Ok(Resolution::Found {
                    path: candidate.clone(),
                    handle,
                });
            }
            Err(error @ LoadError::NotFound { .. }) => {
                debug!("No addon at {}", candidate.display());
                last_error = Some(error);
            }
            Err(error) => return Err(PrebuiltsError::AddonLoad(error)),
        }
    }

    Ok(Resolution::Exhausted { last_error })
}

/// Loads the addon described by `options` from `package_dir`.
pub fn require_addon<H, L>(
    package_dir: &Path,
    options: &LoaderOptions,
    host: &H,
    loader: &L,
) -> Result<AddonModule<L::Handle>>
where
    H: HostEnvironment + ?Sized,
    L: AddonLoader + ?Sized,
{
    if package_dir.as_os_str().is_empty() {
        return Err(PrebuiltsError::ValidationError(
            "the addon package directory must be a non-empty path".to_string(),
        ));
    }

    // Local builds must not depend on the host runtime being queryable.
    let local_builds: Vec<PathBuf> = local_build_addon_paths(package_dir, options.name()).into();
    if let Resolution::Found { path, handle } = probe_candidates(&local_builds, loader)? {
        return Ok(loaded_module(path, handle));
    }

    let prebuilts = compatible_prebuilt_addon_paths(options, Some(package_dir), host)?;
    match probe_candidates(&prebuilts, loader)? {
        Resolution::Found { path, handle } => Ok(loaded_module(path, handle)),
        Resolution::Exhausted { last_error } => {
            let last_error = last_error.or_else(|| {
                local_builds.last().map(|path| LoadError::NotFound { path: path.clone() })
            });
            Err(PrebuiltsError::AddonNotFound {
                name: options.name().to_string(),
                searched_paths: local_builds
                    .iter()
                    .chain(&prebuilts)
                    .map(|path| path.display().to_string())
                    .collect(),
                last_error,
            })
        }
    }
}

fn loaded_module<H>(path: PathBuf, handle: H) -> AddonModule<H> {
    let resolved_path = path.canonicalize().unwrap_or_else(|_| path.clone());
    AddonModule {
        handle,
        path,
        resolved_path,
    }
}

/// Loads addons as shared libraries.
#[derive(Debug, Default, Clone, Copy)]
pub struct LibraryLoader;

impl AddonLoader for LibraryLoader {
    type Handle = Library;

    fn load(&self, path: &Path) -> std::result::Result<Library, LoadError> {
        if !path.is_file() {
            return Err(LoadError::NotFound {
                path: path.to_path_buf(),
            });
        }

        // SAFETY: loading runs the library's initialisers. Addon binaries are
        // shipped by the package being loaded and are trusted like its code.
        unsafe { Library::new(path) }.map_err(|e| LoadError::Failed {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })
    }
}

/// Whether a prebuilt binary for the active triplet exists on disk.
///
/// Nothing is loaded and local builds are not considered.
pub fn probe_addon_path_for_file<F, H>(
    fs: &F,
    options: &LoaderOptions,
    package_dir: Option<&Path>,
    host: &H,
) -> Result<bool>
where
    F: FileSystem + ?Sized,
    H: HostEnvironment + ?Sized,
{
    let found = compatible_prebuilt_addon_paths(options, package_dir, host)?
        .into_iter()
        .find(|path| fs.stat(path).is_some_and(|stat| stat.is_file));

    match &found {
        Some(path) => debug!("Found prebuilt addon {}", path.display()),
        None => debug!("No prebuilt addon found for '{}'", options.name()),
    }
    Ok(found.is_some())
}

/// Reads a JSON loader options file.
pub fn load_loader_options<F: FileSystem + ?Sized>(fs: &F, path: &Path) -> Result<LoaderOptions> {
    let message = || format!("Failed to load the loader options file \"{}\".", path.display());

    let content = fs
        .read_to_string(path)
        .map_err(|e| PrebuiltsError::command(message(), e))?;
    LoaderOptions::from_json(&content).map_err(|e| PrebuiltsError::command(message(), e))
}
