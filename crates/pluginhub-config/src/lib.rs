// SPDX-FileCopyrightText: 2026 Pluginhub Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Configuration for pluginhub.
//!
//! Settings come from compiled defaults, TOML files and environment
//! variables. Unknown keys are rejected and every problem is reported as a
//! miette diagnostic.
//!
//! ```no_run
//! let config = pluginhub_config::load_and_validate().expect("config errors");
//! println!("listening on port {}", config.server.port);
//! ```

pub mod diagnostic;
pub mod loader;
pub mod model;
pub mod validation;

use std::path::{Path, PathBuf};

pub use diagnostic::{render_errors, ConfigError};
pub use loader::{load_config, load_config_from_path, load_config_from_str};
pub use model::{LogConfig, LogFormat, LogOutput, PluginHubConfig, ServerConfig, StoreConfig};

/// Load from the standard file hierarchy plus environment, then validate.
pub fn load_and_validate() -> Result<PluginHubConfig, Vec<ConfigError>> {
    checked(loader::load_config(), || {
        candidate_files()
            .into_iter()
            .filter_map(|path| read_source(&path))
            .collect()
    })
}

/// Load from one explicit file plus environment, then validate.
pub fn load_and_validate_path(path: &Path) -> Result<PluginHubConfig, Vec<ConfigError>> {
    checked(loader::load_config_from_path(path), || {
        read_source(path).into_iter().collect()
    })
}

/// Load from an in-memory TOML document, then validate.
pub fn load_and_validate_str(toml_content: &str) -> Result<PluginHubConfig, Vec<ConfigError>> {
    checked(loader::load_config_from_str(toml_content), || {
        vec![("<inline>".to_string(), toml_content.to_string())]
    })
}

/// Validate a loaded config, or convert the load error using the file
/// contents `sources` yields. Sources are only read on failure.
fn checked(
    loaded: Result<PluginHubConfig, figment::Error>,
    sources: impl FnOnce() -> Vec<(String, String)>,
) -> Result<PluginHubConfig, Vec<ConfigError>> {
    match loaded {
        Ok(config) => {
            validation::validate_config(&config)?;
            Ok(config)
        }
        Err(err) => Err(diagnostic::figment_to_config_errors(err, &sources())),
    }
}

fn read_source(path: &Path) -> Option<(String, String)> {
    let content = std::fs::read_to_string(path).ok()?;
    Some((path.display().to_string(), content))
}

/// Files the standard hierarchy may have read, as figment reports them.
fn candidate_files() -> Vec<PathBuf> {
    let mut files = vec![PathBuf::from("/etc/pluginhub/pluginhub.toml")];
    if let Some(config_dir) = dirs::config_dir() {
        files.push(config_dir.join("pluginhub").join("pluginhub.toml"));
    }
    let local = std::env::current_dir()
        .map(|dir| dir.join("pluginhub.toml"))
        .unwrap_or_else(|_| PathBuf::from("pluginhub.toml"));
    files.push(local);
    files
}
