//! Configuration file for the `aca` client.
//!
//! Stored as TOML in the platform configuration folder:
//! - macOS: ~/Library/Application Support/org.artcrimearchive.aca/
//! - Windows: %APPDATA%/artcrimearchive/aca/config/
//! - Linux: ~/.config/aca/

use std::fs;
use std::num::NonZeroUsize;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};

use aca_client::ClientSettings;
use aca_core::DEFAULT_PAGE_SIZE;

use crate::cli::ConnectionArgs;

const APP_QUALIFIER: &str = "org";
const APP_ORG: &str = "artcrimearchive";
const APP_NAME: &str = "aca";
const CONFIG_FILENAME: &str = "config.toml";

/// Everything the client reads from disk.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CliConfig {
    pub client: ClientSettings,
    pub display: DisplaySettings,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DisplaySettings {
    /// Articles per page. Zero falls back to the default.
    pub page_size: usize,
}

impl Default for DisplaySettings {
    fn default() -> Self {
        Self {
            page_size: DEFAULT_PAGE_SIZE.get(),
        }
    }
}

/// Path of the configuration file, if the platform has a config folder.
pub fn default_config_path() -> Option<PathBuf> {
    ProjectDirs::from(APP_QUALIFIER, APP_ORG, APP_NAME)
        .map(|dirs| dirs.config_dir().join(CONFIG_FILENAME))
}

impl CliConfig {
    /// Reads the file at `path`. A missing file yields the defaults.
    pub fn load(path: &Path) -> Result<Self> {
        match fs::read_to_string(path) {
            Ok(content) => {
                let config = toml::from_str(&content)
                    .with_context(|| format!("parse config {}", path.display()))?;
                tracing::debug!(path = %path.display(), "Loaded configuration");
                Ok(config)
            }
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
                tracing::debug!(path = %path.display(), "No configuration file, using defaults");
                Ok(Self::default())
            }
            Err(err) => Err(err).with_context(|| format!("read config {}", path.display())),
        }
    }

    /// Loads from `path`, or from the default location when `None`.
    pub fn load_or_default(path: Option<&Path>) -> Result<Self> {
        match path.map(Path::to_path_buf).or_else(default_config_path) {
            Some(path) => Self::load(&path),
            None => {
                tracing::warn!("Could not determine config path, using defaults");
                Ok(Self::default())
            }
        }
    }

    /// Writes the configuration, creating the parent folder if needed.
    pub fn save(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent()
            && !parent.as_os_str().is_empty()
        {
            fs::create_dir_all(parent)
                .with_context(|| format!("create config directory {}", parent.display()))?;
        }
        let content = toml::to_string_pretty(self).context("serialize config")?;
        fs::write(path, content).with_context(|| format!("write config {}", path.display()))?;
        tracing::info!(path = %path.display(), "Saved configuration");
        Ok(())
    }

    /// Applies command-line overrides on top of the file values.
    #[must_use]
    pub fn with_overrides(mut self, args: &ConnectionArgs) -> Self {
        if let Some(base_url) = &args.base_url {
            self.client = self.client.with_base_url(base_url.clone());
        }
        if args.token.is_some() {
            self.client = self.client.with_access_token(args.token.clone());
        }
        if let Some(email) = &args.email {
            self.client.email = Some(email.clone());
        }
        if let Some(page_size) = args.page_size {
            self.display.page_size = page_size;
        }
        self
    }

    pub fn page_size(&self) -> NonZeroUsize {
        NonZeroUsize::new(self.display.page_size).unwrap_or(DEFAULT_PAGE_SIZE)
    }

    /// TOML text with the access token masked.
    pub fn to_display_string(&self) -> Result<String> {
        let mut shown = self.clone();
        if shown.client.access_token.is_some() {
            shown.client.access_token = Some("********".to_string());
        }
        toml::to_string_pretty(&shown).context("serialize config")
    }
}
