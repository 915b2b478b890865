//! Command-line arguments

use std::path::PathBuf;

use clap::Parser;
use s3b_core::{Config, ConfigManager};

/// s3-browser - browse S3-compatible object storage from a web page
///
/// Serves the browser UI and the JSON API it talks to. Credentials are
/// entered in the UI and kept only in server memory for the session.
#[derive(Parser, Debug, Default)]
#[command(name = "s3-browser")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Configuration file (defaults to <config_dir>/s3-browser/config.toml)
    #[arg(short, long, env = "S3_BROWSER_CONFIG")]
    pub config: Option<PathBuf>,

    /// Address to listen on
    #[arg(long, env = "S3_BROWSER_HOST")]
    pub host: Option<String>,

    /// Port to listen on
    #[arg(short, long, env = "S3_BROWSER_PORT")]
    pub port: Option<u16>,

    /// Directory holding the built frontend
    #[arg(long, env = "S3_BROWSER_STATIC_DIR")]
    pub static_dir: Option<PathBuf>,

    /// Write the effective configuration to the config file and exit
    #[arg(long, default_value = "false")]
    pub write_config: bool,

    /// Enable debug logging
    #[arg(long, default_value = "false")]
    pub debug: bool,
}

impl Cli {
    /// Config manager for `--config`, or the default location
    pub fn config_manager(&self) -> s3b_core::Result<ConfigManager> {
        match &self.config {
            Some(path) => Ok(ConfigManager::with_path(path.clone())),
            None => ConfigManager::new(),
        }
    }

    /// Apply command-line overrides on top of the loaded configuration
    pub fn apply(&self, config: &mut Config) {
        if let Some(host) = &self.host {
            config.server.host = host.clone();
        }
        if let Some(port) = self.port {
            config.server.port = port;
        }
        if let Some(dir) = &self.static_dir {
            config.server.static_dir = Some(dir.clone());
        }
    }
}
