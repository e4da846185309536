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

use crate::addon::{ArtifactSelection, copy_artifacts};
use crate::config::PrebuiltsConfig;
use crate::error::{PrebuiltsError, Result};
use crate::models::{LibcOverride, PartialTriplet, Triplet, merge_with_fallback, resolve_active_triplet};
use crate::platform::{FileSystem, HostEnvironment, LocalFileSystem, ProcessHost};
use clap::Args;
use log::info;
use std::path::PathBuf;

#[derive(Args, Debug, Clone, Default)]
pub struct CopyArgs {
    /// The path to the directory containing the node addon
    #[arg(long, value_name = "DIR")]
    pub build_dir: PathBuf,

    /// The path to the packaging directory (will contain the "prebuilts" directory)
    #[arg(long, value_name = "DIR")]
    pub package_dir: PathBuf,

    /// Target platform identifier; defaults to the host platform
    #[arg(long)]
    pub platform: Option<String>,

    /// Target ISA identifier; defaults to the host ISA
    #[arg(long)]
    pub arch: Option<String>,

    /// Target C runtime; defaults to the host C runtime, "none" for no C runtime
    #[arg(long)]
    pub libc: Option<String>,

    /// Filename of the node addon (without the ".node" extension)
    #[arg(long)]
    pub name: Option<String>,

    /// Node-API version the addon has been compiled against; defaults to the
    /// host runtime's version
    #[arg(long, value_parser = clap::value_parser!(u32).range(1..))]
    pub napi_version: Option<u32>,

    /// Additional files to copy from the build to the package directory
    #[arg(long, value_name = "FILES", value_delimiter = ',')]
    pub files: Vec<String>,
}

impl CopyArgs {
    fn artifacts(&self) -> ArtifactSelection {
        ArtifactSelection {
            name: self.name.clone().filter(|name| !name.is_empty()),
            files: self
                .files
                .iter()
                .filter(|file| !file.is_empty())
                .cloned()
                .collect(),
        }
    }

    fn triplet_overrides(&self) -> PartialTriplet {
        PartialTriplet {
            platform: self.platform.clone(),
            arch: self.arch.clone(),
            libc: LibcOverride::from_cli(self.libc.as_deref()),
        }
    }
}

pub struct CopyCommand<'a> {
    config: &'a PrebuiltsConfig,
}

impl<'a> CopyCommand<'a> {
    pub fn new(config: &'a PrebuiltsConfig) -> Result<Self> {
        Ok(Self { config })
    }

    pub fn execute(&self, args: &CopyArgs) -> Result<()> {
        let host = ProcessHost::new(self.config);
        let output_dir = copy_with(&LocalFileSystem, &host, args)?;
        info!("Artifacts placed in {}", output_dir.display());
        Ok(())
    }
}

/// Runs a copy against the given filesystem and host.
pub fn copy_with<F, H>(fs: &F, host: &H, args: &CopyArgs) -> Result<PathBuf>
where
    F: FileSystem + ?Sized,
    H: HostEnvironment + ?Sized,
{
    let artifacts = args.artifacts();
    if artifacts.is_empty() {
        return Err(PrebuiltsError::MissingArtifacts);
    }

    let triplet = target_triplet(host, args)?;
    let napi_version = match args.napi_version {
        Some(version) => version,
        None => host.napi_version()?,
    };

    copy_artifacts(
        fs,
        &args.build_dir,
        &args.package_dir,
        &triplet,
        napi_version,
        &artifacts,
    )
}

fn target_triplet<H: HostEnvironment + ?Sized>(host: &H, args: &CopyArgs) -> Result<Triplet> {
    merge_with_fallback(&args.triplet_overrides(), &resolve_active_triplet(host)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::platform::ENV_LIBC;
    use crate::test::fixtures::FakeHost;
    use std::fs;
    use tempfile::TempDir;

    struct Workspace {
        _temp_dir: TempDir,
        build_dir: PathBuf,
        package_dir: PathBuf,
    }

    fn workspace(files: &[&str]) -> Workspace {
        let temp_dir = TempDir::new().unwrap();
        let build_dir = temp_dir.path().join("build").join("Release");
        let package_dir = temp_dir.path().join("package");
        fs::create_dir_all(&build_dir).unwrap();
        for file in files {
            fs::write(build_dir.join(file), file.as_bytes()).unwrap();
        }
        Workspace {
            _temp_dir: temp_dir,
            build_dir,
            package_dir,
        }
    }

    fn args(ws: &Workspace) -> CopyArgs {
        CopyArgs {
            build_dir: ws.build_dir.clone(),
            package_dir: ws.package_dir.clone(),
            ..Default::default()
        }
    }

    #[test]
    fn test_copy_requires_name_or_files() {
        let ws = workspace(&[]);
        let host = FakeHost::new("linux", "x64").with_napi_version(8);

        let error = copy_with(&LocalFileSystem, &host, &args(&ws)).unwrap_err();
        assert!(matches!(error, PrebuiltsError::MissingArtifacts));
    }

    #[test]
    fn test_copy_empty_values_count_as_missing() {
        let ws = workspace(&[]);
        let host = FakeHost::new("linux", "x64").with_napi_version(8);
        let copy_args = CopyArgs {
            name: Some(String::new()),
            files: vec![String::new()],
            ..args(&ws)
        };

        let error = copy_with(&LocalFileSystem, &host, &copy_args).unwrap_err();
        assert!(matches!(error, PrebuiltsError::MissingArtifacts));
    }

    #[test]
    fn test_copy_uses_host_triplet_and_napi_version() {
        let ws = workspace(&["addon.node"]);
        let host = FakeHost::new("linux", "x64")
            .with_libc("glibc")
            .with_napi_version(9);
        let copy_args = CopyArgs {
            name: Some("addon".to_string()),
            ..args(&ws)
        };

        let output_dir = copy_with(&LocalFileSystem, &host, &copy_args).unwrap();
        assert_eq!(
            output_dir,
            ws.package_dir.join("prebuilts").join("linux-x64-glibc")
        );
        assert!(output_dir.join("addon-napi09.node").is_file());
    }

    #[test]
    fn test_copy_cli_overrides_win() {
        let ws = workspace(&["addon.node"]);
        let host = FakeHost::new("linux", "x64")
            .with_libc("glibc")
            .with_napi_version(9);
        let copy_args = CopyArgs {
            platform: Some("win32".to_string()),
            libc: Some("none".to_string()),
            name: Some("addon".to_string()),
            napi_version: Some(6),
            ..args(&ws)
        };

        let output_dir = copy_with(&LocalFileSystem, &host, &copy_args).unwrap();
        assert_eq!(output_dir, ws.package_dir.join("prebuilts").join("win32-x64"));
        assert!(output_dir.join("addon-napi06.node").is_file());
    }

    #[test]
    fn test_copy_cli_libc_overrides_environment() {
        let ws = workspace(&["libfoo.so"]);
        let host = FakeHost::new("linux", "arm64")
            .with_libc("glibc")
            .with_env(ENV_LIBC, "musl")
            .with_napi_version(8);

        let from_env = CopyArgs {
            files: vec!["libfoo.so".to_string()],
            ..args(&ws)
        };
        assert_eq!(
            copy_with(&LocalFileSystem, &host, &from_env).unwrap(),
            ws.package_dir.join("prebuilts").join("linux-arm64-musl")
        );

        let from_cli = CopyArgs {
            libc: Some("uclibc".to_string()),
            ..from_env
        };
        assert_eq!(
            copy_with(&LocalFileSystem, &host, &from_cli).unwrap(),
            ws.package_dir.join("prebuilts").join("linux-arm64-uclibc")
        );
    }

    #[test]
    fn test_copy_explicit_napi_version_skips_runtime_query() {
        let ws = workspace(&["addon.node"]);
        let host = FakeHost::new("darwin", "arm64");
        let copy_args = CopyArgs {
            name: Some("addon".to_string()),
            napi_version: Some(8),
            ..args(&ws)
        };

        let output_dir = copy_with(&LocalFileSystem, &host, &copy_args).unwrap();
        assert!(output_dir.join("addon-napi08.node").is_file());
    }

    #[test]
    fn test_copy_without_runtime_fails() {
        let ws = workspace(&["addon.node"]);
        let host = FakeHost::new("darwin", "arm64");
        let copy_args = CopyArgs {
            name: Some("addon".to_string()),
            ..args(&ws)
        };

        let error = copy_with(&LocalFileSystem, &host, &copy_args).unwrap_err();
        assert!(matches!(error, PrebuiltsError::NapiVersionUnavailable(_)));
    }

    #[test]
    fn test_copy_rejects_invalid_platform() {
        let ws = workspace(&["addon.node"]);
        let host = FakeHost::new("linux", "x64").with_napi_version(8);
        let copy_args = CopyArgs {
            platform: Some("linux-gnu".to_string()),
            name: Some("addon".to_string()),
            ..args(&ws)
        };

        let error = copy_with(&LocalFileSystem, &host, &copy_args).unwrap_err();
        assert!(matches!(error, PrebuiltsError::InvalidTriplet(_)));
    }
}
