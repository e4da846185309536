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

use crate::addon::{load_loader_options, probe_addon_path_for_file};
use crate::config::PrebuiltsConfig;
use crate::error::{PrebuiltsError, Result};
use crate::platform::{ENV_BUILD_FROM_SOURCE, FileSystem, HostEnvironment, LocalFileSystem, ProcessHost};
use log::debug;
use std::path::Path;

pub struct CheckPathCommand<'a> {
    config: &'a PrebuiltsConfig,
}

impl<'a> CheckPathCommand<'a> {
    pub fn new(config: &'a PrebuiltsConfig) -> Result<Self> {
        Ok(Self { config })
    }

    /// Returns whether the loader would find a prebuilt addon file.
    ///
    /// Fails with [`PrebuiltsError::BuildFromSource`] when a from-source build
    /// was requested.
    pub fn execute(&self, loader_options: &Path, package_dir: Option<&Path>) -> Result<bool> {
        let host = ProcessHost::new(self.config);
        check_path_with(&LocalFileSystem, &host, loader_options, package_dir)
    }
}

pub fn check_path_with<F, H>(
    fs: &F,
    host: &H,
    loader_options: &Path,
    package_dir: Option<&Path>,
) -> Result<bool>
where
    F: FileSystem + ?Sized,
    H: HostEnvironment + ?Sized,
{
    if host.env_override(ENV_BUILD_FROM_SOURCE).is_some() {
        debug!("{ENV_BUILD_FROM_SOURCE} is set, skipping prebuilt lookup");
        return Err(PrebuiltsError::BuildFromSource);
    }

    let options = load_loader_options(fs, loader_options)?;
    probe_addon_path_for_file(fs, &options, package_dir, host)
}
