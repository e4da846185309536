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

use crate::error::{PrebuiltsError, Result};
use crate::models::Triplet;
use crate::paths::prebuilts::addon_filename;
use crate::paths::{prebuilts_directory_path, versioned_addon_filename};
use crate::platform::FileSystem;
use log::{debug, info};
use std::io;
use std::path::{Path, PathBuf};

/// What to copy out of the build directory.
///
/// Callers must supply a name, at least one file, or both.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ArtifactSelection {
    /// Addon basename without the `.node` extension.
    pub name: Option<String>,
    /// Additional files, relative to the build directory.
    pub files: Vec<String>,
}

impl ArtifactSelection {
    pub fn is_empty(&self) -> bool {
        self.name.is_none() && self.files.is_empty()
    }
}

/// Copies an addon and/or auxiliary files into the prebuilts directory.
///
/// Returns the output directory. The first failing copy aborts the rest.
pub fn copy_artifacts<F: FileSystem + ?Sized>(
    fs: &F,
    build_dir: &Path,
    package_dir: &Path,
    triplet: &Triplet,
    napi_version: u32,
    artifacts: &ArtifactSelection,
) -> Result<PathBuf> {
    let output_dir = prebuilts_directory_path(triplet, Some(package_dir));
    ensure_output_directory(fs, &output_dir)?;

    if let Some(name) = &artifacts.name {
        let source = build_dir.join(addon_filename(name));
        let target = output_dir.join(versioned_addon_filename(name, napi_version));
        fs.copy_file(&source, &target)
            .map_err(|e| {
                PrebuiltsError::command("Failed to copy the node addon to the output directory", e)
            })?;
        info!("Copied {} to {}", source.display(), target.display());
    }

    for file in &artifacts.files {
        let source = build_dir.join(file);
        let target = output_dir.join(file);
        fs.copy_file(&source, &target)
            .map_err(|e| {
                PrebuiltsError::command(
                    format!("Failed to copy the additional file \"{file}\" to the output directory"),
                    e,
                )
            })?;
        info!("Copied {} to {}", source.display(), target.display());
    }

    Ok(output_dir)
}

fn ensure_output_directory<F: FileSystem + ?Sized>(fs: &F, output_dir: &Path) -> Result<()> {
    match fs.create_dir_all(output_dir) {
        Ok(()) => Ok(()),
        // another build may have created it concurrently
        Err(e)
            if e.kind() == io::ErrorKind::AlreadyExists
                && fs.stat(output_dir).is_some_and(|stat| stat.is_dir) =>
        {
            debug!("Output directory {} already exists", output_dir.display());
            Ok(())
        }
        Err(e) => Err(PrebuiltsError::command(
            format!(
                "Failed to create the output directory \"{}\"",
                output_dir.display()
            ),
            e,
        )),
    }
}
