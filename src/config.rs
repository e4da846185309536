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
use config::{Config, Environment, File};
use serde::{Deserialize, Serialize};
use std::path::Path;

pub const CONFIG_FILE_NAME: &str = "napi-prebuilts.toml";
pub const ENV_PREFIX: &str = "NAPI_PREBUILTS";
const DEFAULT_NODE_BINARY: &str = "node";

/// Settings for the prebuilt tooling.
///
/// Layered from lowest to highest precedence: built-in defaults,
/// `napi-prebuilts.toml` in the working directory, `NAPI_PREBUILTS_*`
/// environment variables.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct PrebuiltsConfig {
    /// Overrides the Node-API version reported by the host runtime.
    #[serde(default)]
    pub napi_version: Option<u32>,

    /// Runtime executable queried for `process.versions.napi`.
    #[serde(default)]
    pub node_binary: Option<String>,
}

impl PrebuiltsConfig {
    pub fn load(base_dir: &Path) -> Result<Self> {
        let config_path = base_dir.join(CONFIG_FILE_NAME);

        if config_path.exists() {
            log::debug!("Loading config from {config_path:?}");
        } else {
            log::debug!("Config file not found at {config_path:?}, using defaults");
        }

        let settings = Config::builder()
            .add_source(File::from(config_path).required(false))
            .add_source(
                Environment::with_prefix(ENV_PREFIX)
                    .prefix_separator("_")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()
            .map_err(|e| PrebuiltsError::ConfigError(format!("Failed to load settings: {e}")))?;

        let config: PrebuiltsConfig = settings
            .try_deserialize()
            .map_err(|e| PrebuiltsError::ConfigError(format!("Invalid settings: {e}")))?;

        if config.napi_version == Some(0) {
            return Err(PrebuiltsError::ConfigError(
                "napi_version must be a positive integer".to_string(),
            ));
        }

        Ok(config)
    }

    pub fn node_binary(&self) -> &str {
        self.node_binary
            .as_deref()
            .filter(|binary| !binary.is_empty())
            .unwrap_or(DEFAULT_NODE_BINARY)
    }
}

/// Loads the configuration relative to the current working directory.
pub fn new_prebuilts_config() -> Result<PrebuiltsConfig> {
    let cwd = std::env::current_dir()?;
    PrebuiltsConfig::load(&cwd)
}
