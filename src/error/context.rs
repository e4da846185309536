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

use crate::error::PrebuiltsError;
use std::fmt;

pub struct ErrorContext<'a> {
    pub error: &'a PrebuiltsError,
    pub suggestion: Option<String>,
    pub details: Option<String>,
}

impl<'a> ErrorContext<'a> {
    pub fn new(error: &'a PrebuiltsError) -> Self {
        let (suggestion, details) = match error {
            PrebuiltsError::InvalidTriplet(msg) => {
                let suggestion = Some(
                    "Platform, architecture and libc identifiers must be non-empty and must not \
                     contain '-', path separators or whitespace (e.g. 'linux', 'arm64', 'musl')."
                        .to_string(),
                );
                let details = Some(msg.clone());
                (suggestion, details)
            }
            PrebuiltsError::InvalidLoaderOptions(msg) => {
                let suggestion = Some(
                    "The loader options file must be a JSON object such as \
                     {\"name\": \"addon\", \"napi_versions\": [8, 6]}."
                        .to_string(),
                );
                let details = Some(msg.clone());
                (suggestion, details)
            }
            PrebuiltsError::NapiVersionUnavailable(msg) => {
                let set_cmd = if cfg!(windows) {
                    "set NAPI_PREBUILTS_NAPI_VERSION=8"
                } else {
                    "export NAPI_PREBUILTS_NAPI_VERSION=8"
                };
                let suggestion = Some(format!(
                    "Ensure 'node' is available in your PATH, pass --napi-version explicitly, \
                     or configure the version: {set_cmd}"
                ));
                let details = Some(msg.clone());
                (suggestion, details)
            }
            PrebuiltsError::AddonNotFound { searched_paths, .. } => {
                let suggestion = Some(
                    "Build the addon from source or run 'napi-prebuilts copy' for the current \
                     platform."
                        .to_string(),
                );
                let details = if searched_paths.is_empty() {
                    None
                } else {
                    Some(format!("Searched paths:\n  {}", searched_paths.join("\n  ")))
                };
                (suggestion, details)
            }
            PrebuiltsError::MissingArtifacts => {
                let suggestion = Some(
                    "Specify the addon with --name=<string>, additional files with \
                     --files=<a,b>, or both."
                        .to_string(),
                );
                (suggestion, None)
            }
            PrebuiltsError::BuildFromSource => {
                let unset_cmd = if cfg!(windows) {
                    "set npm_config_build_from_source="
                } else {
                    "unset npm_config_build_from_source"
                };
                let suggestion = Some(format!("To use prebuilt addons again: {unset_cmd}"));
                (suggestion, None)
            }
            PrebuiltsError::ConfigError(msg) => {
                let suggestion = Some(
                    "Check napi-prebuilts.toml and NAPI_PREBUILTS_* environment variables."
                        .to_string(),
                );
                let details = Some(msg.clone());
                (suggestion, details)
            }
            _ => (None, None),
        };

        ErrorContext {
            error,
            suggestion,
            details,
        }
    }
}

impl<'a> fmt::Display for ErrorContext<'a> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "napi-prebuilts: {}", self.error)?;

        if let Some(details) = &self.details {
            write!(f, "\n\nDetails: {details}")?;
        }

        if let Some(suggestion) = &self.suggestion {
            write!(f, "\n\nSuggestion: {suggestion}")?;
        }

        Ok(())
    }
}
