use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use crate::parser::ParseOptions;

#[derive(Debug, Serialize, Deserialize, Clone, Default, PartialEq, Eq)]
#[serde(default)]
pub struct Config {
    /// Pretty-print JSON output.
    pub pretty: bool,
    /// Attach the derived summary to each parsed message.
    pub summary: bool,
    /// Decode nested multipart parts recursively.
    pub nested_multipart: bool,
}

impl Config {
    pub fn parse_options(&self) -> ParseOptions {
        ParseOptions {
            nested_multipart: self.nested_multipart,
        }
    }
}

const TEMPLATE_HEADER: &str = "# emlx2json configuration\n\
# pretty: pretty-print JSON output\n\
# summary: add uuid, UTC date, contacts and snippet to each message\n\
# nested_multipart: decode multipart parts recursively instead of one level\n\n";

/// `<user config dir>/emlx2json/config.toml`
pub fn config_path() -> Result<PathBuf> {
    dirs::config_dir()
        .map(|base| base.join("emlx2json").join("config.toml"))
        .context("no user config directory on this platform")
}

/// Load the config at `path` (or the default location). A missing file yields defaults.
pub fn load_config(path: Option<&Path>) -> Result<Config> {
    let path = match path {
        Some(p) => p.to_path_buf(),
        None => config_path()?,
    };
    if !path.exists() {
        log::debug!("no config at {}, using defaults", path.display());
        return Ok(Config::default());
    }
    let s = fs::read_to_string(&path)
        .with_context(|| format!("failed to read config {}", path.display()))?;
    let cfg: Config =
        toml::from_str(&s).with_context(|| format!("invalid config {}", path.display()))?;
    Ok(cfg)
}

/// Write a commented template config and return where it went.
pub fn write_template(path: Option<&Path>, force: bool) -> Result<PathBuf> {
    let path = match path {
        Some(p) => p.to_path_buf(),
        None => config_path()?,
    };
    if path.exists() && !force {
        return Err(anyhow::anyhow!(
            "config already exists at {} (use --force to overwrite)",
            path.display()
        ));
    }
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    let sample = Config {
        pretty: true,
        ..Config::default()
    };
    let tom = toml::to_string_pretty(&sample)?;
    fs::write(&path, format!("{TEMPLATE_HEADER}{tom}"))?;
    Ok(path)
}
