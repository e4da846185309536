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

mod context;
mod exit_codes;
mod format;

pub use context::ErrorContext;
pub use exit_codes::get_exit_code;
pub use format::{format_error_chain, format_error_with_color};

use crate::addon::LoadError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum PrebuiltsError {
    /// A low-level failure wrapped with a stable, user-facing description.
    #[error("{}", render_command_error(.message, .cause.as_ref()))]
    Command {
        message: String,
        #[source]
        cause: Option<CommandCause>,
    },

    #[error("Invalid triplet: {0}")]
    InvalidTriplet(String),

    #[error("Invalid loader options: {0}")]
    InvalidLoaderOptions(String),

    #[error("Unable to determine the host Node-API version: {0}")]
    NapiVersionUnavailable(String),

    #[error("Cannot find a loadable '{name}' addon")]
    AddonNotFound {
        name: String,
        searched_paths: Vec<String>,
        #[source]
        last_error: Option<LoadError>,
    },

    #[error(transparent)]
    AddonLoad(LoadError),

    #[error("Missing --name or --files option. Use --help to print usage information.")]
    MissingArtifacts,

    #[error("npm_config_build_from_source is set, prebuilt addons are ignored")]
    BuildFromSource,

    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("Validation error: {0}")]
    ValidationError(String),

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Json(#[from] serde_json::Error),
}

/// The underlying failure carried by [`PrebuiltsError::Command`].
#[derive(Error, Debug)]
pub enum CommandCause {
    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error("{0}")]
    Other(Box<dyn std::error::Error + Send + Sync>),
}

impl From<serde_json::Error> for CommandCause {
    fn from(error: serde_json::Error) -> Self {
        CommandCause::Other(Box::new(error))
    }
}

impl From<PrebuiltsError> for CommandCause {
    fn from(error: PrebuiltsError) -> Self {
        match error {
            PrebuiltsError::Io(io) => CommandCause::Io(io),
            other => CommandCause::Other(Box::new(other)),
        }
    }
}

impl PrebuiltsError {
    /// Wraps `cause` with a descriptive message.
    pub fn command(message: impl Into<String>, cause: impl Into<CommandCause>) -> Self {
        PrebuiltsError::Command {
            message: message.into(),
            cause: Some(cause.into()),
        }
    }
}

// OS errors already read as a diagnostic line of their own; everything else
// gets a `cause:` label.
fn render_command_error(message: &str, cause: Option<&CommandCause>) -> String {
    match cause {
        Some(CommandCause::Io(io)) => format!("{message}\n{io}"),
        Some(CommandCause::Other(other)) => format!("{message}\ncause: {other}"),
        None => message.to_string(),
    }
}

pub type Result<T> = std::result::Result<T, PrebuiltsError>;
