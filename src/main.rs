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

use clap::{Parser, Subcommand};
use napi_prebuilts::commands::check_path::CheckPathCommand;
use napi_prebuilts::commands::copy::{CopyArgs, CopyCommand};
use napi_prebuilts::config::new_prebuilts_config;
use napi_prebuilts::error::{
    PrebuiltsError, format_error_chain, format_error_with_color, get_exit_code,
};
use napi_prebuilts::logging;
use std::io::IsTerminal;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "napi-prebuilts")]
#[command(author, version, about = "A management tool for prebuilt Node-API addons", long_about = None)]
struct Cli {
    /// Increase verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Copy a compiled addon and/or files into the prebuilts directory
    #[command(long_about = "Copy a compiled addon and/or files into the prebuilts directory

Copies a compiled addon and/or files from the build directory into a sub-
directory structure in the package directory. Both directory options must be
supplied. You must either specify the addon name, the files list or both.
The triplet related options default to the host platform.

Examples:
  Copy an addon named \"nvefs\" from build/Release to the prebuilts directory:
  napi-prebuilts copy --build-dir build/Release --package-dir . \\
      --name nvefs --napi-version 8

  Copy foo.so and bar.so from build/Release to the prebuilts directory:
  napi-prebuilts copy --build-dir build/Release --package-dir . \\
      --files foo.so,bar.so")]
    Copy(CopyArgs),

    /// Check whether the addon loader would find a prebuilt addon
    #[command(long_about = "Check whether the addon loader would find a prebuilt addon

Constructs the possible addon locations and checks whether a file exists in
one of them. Exits with 1 if no file is found or the environment variable
\"npm_config_build_from_source\" is set, and with 2 on errors.

Example:
  napi-prebuilts check-path --loader-options loader-options.json")]
    CheckPath {
        /// The path to the loader options JSON file
        #[arg(long, value_name = "PATH")]
        loader_options: PathBuf,

        /// The directory containing the "prebuilts" directory; defaults to the
        /// working directory
        #[arg(long, value_name = "DIR")]
        package_dir: Option<PathBuf>,
    },
}

// Redirected stderr (CI logs, npm install output) gets the plain one-block form.
fn report(error: &PrebuiltsError) {
    if std::io::stderr().is_terminal() {
        eprint!("{}", format_error_with_color(error, true));
    } else {
        eprintln!("{}", format_error_chain(error));
    }
}

fn main() {
    let cli = Cli::parse();

    logging::setup_logger(cli.verbose);

    let config = match new_prebuilts_config() {
        Ok(config) => config,
        Err(e) => {
            report(&e);
            std::process::exit(get_exit_code(&e));
        }
    };

    let code = match cli.command {
        Commands::Copy(args) => {
            match CopyCommand::new(&config).and_then(|command| command.execute(&args)) {
                Ok(()) => 0,
                Err(e) => {
                    report(&e);
                    get_exit_code(&e)
                }
            }
        }
        Commands::CheckPath {
            loader_options,
            package_dir,
        } => {
            let result = CheckPathCommand::new(&config)
                .and_then(|command| command.execute(&loader_options, package_dir.as_deref()));
            match result {
                Ok(true) => 0,
                Ok(false) | Err(PrebuiltsError::BuildFromSource) => 1,
                Err(e) => {
                    report(&e);
                    2
                }
            }
        }
    };

    std::process::exit(code);
}
