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
use serde::{Deserialize, Serialize};

/// Describes which file paths to consider when attempting to load an addon.
///
/// Persisted as JSON, e.g. `{"name": "addon", "napi_versions": [8, 6]}`.
/// Only presence and types are checked; unknown keys are ignored.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "RawLoaderOptions")]
pub struct LoaderOptions {
    name: String,
    napi_versions: Vec<u32>,
}

#[derive(Deserialize)]
struct RawLoaderOptions {
    name: String,
    napi_versions: Vec<u32>,
}

impl TryFrom<RawLoaderOptions> for LoaderOptions {
    type Error = PrebuiltsError;

    fn try_from(raw: RawLoaderOptions) -> Result<Self> {
        LoaderOptions::new(raw.name, raw.napi_versions)
    }
}

impl LoaderOptions {
    pub fn new(name: impl Into<String>, napi_versions: Vec<u32>) -> Result<Self> {
        let name = name.into();
        if name.is_empty() {
            return Err(PrebuiltsError::InvalidLoaderOptions(
                "the loader options must contain an addon's name".to_string(),
            ));
        }
        if napi_versions.is_empty() || napi_versions.contains(&0) {
            return Err(PrebuiltsError::InvalidLoaderOptions(
                "the loader options must contain an array with positive napi version numbers"
                    .to_string(),
            ));
        }
        Ok(Self {
            name,
            napi_versions,
        })
    }

    /// The addon's basename, without the `.node` extension.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Node-API versions the addon was compiled for, in file order.
    pub fn napi_versions(&self) -> &[u32] {
        &self.napi_versions
    }

    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }
}
