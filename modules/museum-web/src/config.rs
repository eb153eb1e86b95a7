use std::env;
use std::path::Path;

use anyhow::{Context, Result};
use serde::Deserialize;

use museum_locale::{LocalesConfig, RoutingConfig};

/// TOML-backed site configuration.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct FileConfig {
    pub locales: LocalesConfig,
    pub routing: RoutingConfig,
    pub server: ServerConfig,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 3000,
        }
    }
}

impl ServerConfig {
    /// `WEB_HOST` / `WEB_PORT` win over the file.
    pub fn apply_env(&mut self) -> Result<()> {
        if let Ok(host) = env::var("WEB_HOST") {
            self.host = host;
        }
        if let Ok(port) = env::var("WEB_PORT") {
            self.port = port
                .parse()
                .with_context(|| format!("WEB_PORT must be a port number, got {port:?}"))?;
        }
        Ok(())
    }

    pub fn addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

/// Load and parse a TOML config file.
pub fn load_config(path: &Path) -> Result<FileConfig> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read config file: {}", path.display()))?;
    parse_config(&content)
        .with_context(|| format!("Failed to parse config file: {}", path.display()))
}

pub fn parse_config(content: &str) -> Result<FileConfig> {
    Ok(toml::from_str(content)?)
}
