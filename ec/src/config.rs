//! editorctx configuration types and loading

use eyre::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::session::AsidePanelTab;
use crate::stores::DatabaseChangeMode;

/// Main editorctx configuration
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Initial session state and store seeds
    pub session: SessionConfig,

    /// Project initializer behavior
    pub initializer: InitializerConfig,

    /// Caller-side limits for project switches
    pub switch: SwitchConfig,
}

impl Config {
    /// Load configuration with fallback chain
    pub fn load(config_path: Option<&PathBuf>) -> Result<Self> {
        // If explicit config path provided, try to load it
        if let Some(path) = config_path {
            return Self::load_from_file(path).context(format!("Failed to load config from {}", path.display()));
        }

        // Try project-local config: .editorctx.yml
        let local_config = PathBuf::from(".editorctx.yml");
        if local_config.exists() {
            match Self::load_from_file(&local_config) {
                Ok(config) => return Ok(config),
                Err(e) => {
                    tracing::warn!("Failed to load config from {}: {}", local_config.display(), e);
                }
            }
        }

        // Try user config: ~/.config/editorctx/editorctx.yml
        if let Some(config_dir) = dirs::config_dir() {
            let user_config = config_dir.join("editorctx").join("editorctx.yml");
            if user_config.exists() {
                match Self::load_from_file(&user_config) {
                    Ok(config) => return Ok(config),
                    Err(e) => {
                        tracing::warn!("Failed to load config from {}: {}", user_config.display(), e);
                    }
                }
            }
        }

        // No config file found, use defaults
        tracing::info!("No config file found, using defaults");
        Ok(Self::default())
    }

    fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = fs::read_to_string(&path).context("Failed to read config file")?;

        let config: Self = serde_yaml::from_str(&content).context("Failed to parse config file")?;

        tracing::info!("Loaded config from: {}", path.as_ref().display());
        Ok(config)
    }
}

/// Initial session state
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SessionConfig {
    /// Aside panel shown when the session opens
    #[serde(rename = "aside-panel")]
    pub aside_panel: AsidePanelTab,

    #[serde(rename = "show-connection-panel")]
    pub show_connection_panel: bool,

    #[serde(rename = "show-ai-chat-box")]
    pub show_ai_chat_box: bool,

    /// Project the editor store starts with
    #[serde(rename = "initial-project")]
    pub initial_project: String,

    /// Workspace setting the setting store starts with
    #[serde(rename = "database-change-mode")]
    pub database_change_mode: DatabaseChangeMode,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            aside_panel: AsidePanelTab::Worksheet,
            show_connection_panel: false,
            show_ai_chat_box: false,
            initial_project: "projects/default".to_string(),
            database_change_mode: DatabaseChangeMode::Unspecified,
        }
    }
}

/// Project initializer configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct InitializerConfig {
    /// Simulated re-initialization time in milliseconds
    #[serde(rename = "delay-ms")]
    pub delay_ms: u64,
}

impl InitializerConfig {
    pub fn delay(&self) -> Duration {
        Duration::from_millis(self.delay_ms)
    }
}

impl Default for InitializerConfig {
    fn default() -> Self {
        Self { delay_ms: 50 }
    }
}

/// Project switch limits
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SwitchConfig {
    /// How long a caller waits for the ready signal, in milliseconds
    #[serde(rename = "timeout-ms")]
    pub timeout_ms: u64,
}

impl SwitchConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_millis(self.timeout_ms)
    }
}

impl Default for SwitchConfig {
    fn default() -> Self {
        Self { timeout_ms: 5_000 }
    }
}
