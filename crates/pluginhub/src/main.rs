// SPDX-FileCopyrightText: 2026 Pluginhub Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! pluginhub - console plugin registry service.
//!
//! This is the binary entry point.

#[cfg(not(target_env = "msvc"))]
use tikv_jemallocator::Jemalloc;

#[cfg(not(target_env = "msvc"))]
#[global_allocator]
static GLOBAL: Jemalloc = Jemalloc;

mod logging;
mod serve;
mod shutdown;

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use pluginhub_config::{ConfigError, PluginHubConfig};

/// pluginhub - discover console plugins and toggle their enablement.
#[derive(Parser, Debug)]
#[command(name = "pluginhub", version, about, long_about = None)]
struct Cli {
    /// Read configuration from this file instead of the standard locations.
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Commands>,
}

/// Available subcommands.
#[derive(Subcommand, Debug)]
enum Commands {
    /// Start the REST service (default).
    Serve,
    /// Inspect configuration.
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
    /// Query the plugin registry directly.
    Plugins {
        #[command(subcommand)]
        action: PluginsAction,
    },
}

#[derive(Subcommand, Debug)]
enum ConfigAction {
    /// Load and validate configuration, then print a summary.
    Check,
}

#[derive(Subcommand, Debug)]
enum PluginsAction {
    /// Print every plugin as the API would return it.
    List,
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    let config = match load_config(cli.config.as_deref()) {
        Ok(config) => config,
        Err(errors) => {
            pluginhub_config::render_errors(&errors);
            std::process::exit(1);
        }
    };

    match cli.command.unwrap_or(Commands::Serve) {
        Commands::Serve => {
            let _guard = match logging::init(&config.log) {
                Ok(guard) => guard,
                Err(e) => {
                    eprintln!("pluginhub: {e}");
                    std::process::exit(1);
                }
            };
            if let Err(e) = serve::run_serve(config).await {
                tracing::error!("pluginhub serve failed: {e}");
                eprintln!("pluginhub: {e}");
                std::process::exit(1);
            }
        }
        Commands::Config {
            action: ConfigAction::Check,
        } => {
            print_config_summary(&config);
        }
        Commands::Plugins {
            action: PluginsAction::List,
        } => {
            logging::init_cli();
            if let Err(e) = serve::run_plugins_list(config).await {
                eprintln!("pluginhub: {e}");
                std::process::exit(1);
            }
        }
    }
}

fn load_config(path: Option<&std::path::Path>) -> Result<PluginHubConfig, Vec<ConfigError>> {
    match path {
        Some(path) => pluginhub_config::load_and_validate_path(path),
        None => pluginhub_config::load_and_validate(),
    }
}

fn print_config_summary(config: &PluginHubConfig) {
    let api_server = config
        .store
        .api_server
        .clone()
        .unwrap_or_else(|| format!("{} (resolved at startup)", pluginhub_kube::resolve_api_server(&config.store)));
    println!("configuration OK");
    println!(
        "  listen:     {}:{}{}",
        config.server.bind_address, config.server.port, config.server.api_root
    );
    println!("  api server: {api_server}");
    println!(
        "  resource:   {}/{}/{}",
        config.store.group, config.store.version, config.store.resource
    );
    println!(
        "  log:        level={} format={:?} output={:?}",
        config.log.level, config.log.format, config.log.output
    );
}
