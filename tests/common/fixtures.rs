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

/// Shared fixtures for building addon packages on disk
use assert_cmd::Command;
use std::fs;
use std::path::{Path, PathBuf};

/// Environment variables read by the binary that must not leak in from the
/// caller's shell (npm sets several of them when running scripts).
const AMBIENT_VARIABLES: &[&str] = &[
    "npm_config_platform",
    "npm_config_arch",
    "npm_config_libc",
    "npm_config_build_from_source",
    "NAPI_PREBUILTS_NAPI_VERSION",
    "NAPI_PREBUILTS_NODE_BINARY",
];

/// A `napi-prebuilts` invocation isolated from the caller's environment and
/// running inside `cwd`.
pub fn napi_prebuilts(cwd: &Path) -> Command {
    let mut cmd = Command::cargo_bin("napi-prebuilts").unwrap();
    for variable in AMBIENT_VARIABLES {
        cmd.env_remove(variable);
    }
    cmd.current_dir(cwd);
    cmd
}

/// Writes a fake build output file and returns its path.
pub fn create_build_file(build_dir: &Path, file_name: &str) -> PathBuf {
    fs::create_dir_all(build_dir).unwrap();
    let path = build_dir.join(file_name);
    fs::write(&path, format!("contents of {file_name}")).unwrap();
    path
}

/// Writes a loader options file and returns its path.
pub fn create_loader_options(dir: &Path, name: &str, napi_versions: &[u32]) -> PathBuf {
    let path = dir.join("loader-options.json");
    let options = serde_json::json!({
        "name": name,
        "napi_versions": napi_versions,
    });
    fs::write(&path, serde_json::to_string_pretty(&options).unwrap()).unwrap();
    path
}

/// Places a prebuilt addon file where the loader looks for it.
#[allow(dead_code)]
pub fn create_prebuilt(package_dir: &Path, triplet: &str, file_name: &str) -> PathBuf {
    let dir = package_dir.join("prebuilts").join(triplet);
    fs::create_dir_all(&dir).unwrap();
    let path = dir.join(file_name);
    fs::write(&path, b"prebuilt").unwrap();
    path
}
