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

pub mod enumeration;
pub mod loader;
pub mod placement;

pub use enumeration::{
    compatible_napi_versions, compatible_paths_for, compatible_prebuilt_addon_paths,
};
pub use loader::{
    AddonLoader, AddonModule, LibraryLoader, LoadError, Resolution, load_loader_options,
    probe_addon_path_for_file, probe_candidates, require_addon,
};
pub use placement::{ArtifactSelection, copy_artifacts};
