//! Application configuration for the Seeing-Stars extractor.
//!
//! User config lives at `~/.seeing-stars/seeing-stars.toml`.
//! CLI flags override config file values, which override defaults.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{Result, StarsError};

/// Default configuration file name.
const CONFIG_FILE_NAME: &str = "seeing-stars.toml";

/// Default config directory name under the user's home.
const CONFIG_DIR_NAME: &str = ".seeing-stars";

/// Decade listing pages, newest first.
pub const DEFAULT_URLS: [&str; 7] = [
    "https://www.seeing-stars.com/Died/2010s.shtml",
    "https://www.seeing-stars.com/Died/2000s.shtml",
    "https://www.seeing-stars.com/Died/90s.shtml",
    "https://www.seeing-stars.com/Died/80s.shtml",
    "https://www.seeing-stars.com/Died/70s.shtml",
    "https://www.seeing-stars.com/Died/60s.shtml",
    "https://www.seeing-stars.com/Died/50s_20s.shtml#20s",
];

/// Default report file, relative to the working directory.
pub const DEFAULT_OUTPUT_PATH: &str = "seeing-stars-summaries.txt";

/// Default `User-Agent` header sent with every request.
pub const DEFAULT_USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) DeathAtlas/1.0";

/// Default per-request timeout in seconds.
pub const DEFAULT_TIMEOUT_SECS: u64 = 45;

// ---------------------------------------------------------------------------
// Config structs (matching seeing-stars.toml schema)
// ---------------------------------------------------------------------------

/// Top-level application config, deserialized from TOML.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    /// Pages to extract from.
    #[serde(default)]
    pub sources: SourcesConfig,

    /// Report destination.
    #[serde(default)]
    pub output: OutputConfig,

    /// HTTP client settings.
    #[serde(default)]
    pub http: HttpConfig,
}

/// `[sources]` section.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SourcesConfig {
    /// Source URLs, processed in this order.
    #[serde(default = "default_urls")]
    pub urls: Vec<String>,
}

impl Default for SourcesConfig {
    fn default() -> Self {
        Self {
            urls: default_urls(),
        }
    }
}

fn default_urls() -> Vec<String> {
    DEFAULT_URLS.iter().map(|u| u.to_string()).collect()
}

/// `[output]` section.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OutputConfig {
    /// Report file path. Overwritten on every run.
    #[serde(default = "default_output_path")]
    pub path: String,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            path: default_output_path(),
        }
    }
}

fn default_output_path() -> String {
    DEFAULT_OUTPUT_PATH.into()
}

/// `[http]` section.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HttpConfig {
    /// `User-Agent` header value.
    #[serde(default = "default_user_agent")]
    pub user_agent: String,

    /// Per-request timeout in seconds.
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self {
            user_agent: default_user_agent(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

fn default_user_agent() -> String {
    DEFAULT_USER_AGENT.into()
}
fn default_timeout_secs() -> u64 {
    DEFAULT_TIMEOUT_SECS
}

// ---------------------------------------------------------------------------
// Extract config (runtime, merged from config + CLI flags)
// ---------------------------------------------------------------------------

/// Immutable run configuration handed to the orchestrator.
#[derive(Debug, Clone)]
pub struct ExtractConfig {
    /// Source URLs, in report order.
    pub urls: Vec<String>,
    /// Where the report is written.
    pub output_path: PathBuf,
    /// HTTP client settings.
    pub http: HttpConfig,
}

impl From<&AppConfig> for ExtractConfig {
    fn from(config: &AppConfig) -> Self {
        Self {
            urls: config.sources.urls.clone(),
            output_path: PathBuf::from(&config.output.path),
            http: config.http.clone(),
        }
    }
}

impl ExtractConfig {
    /// Reject configurations that cannot produce a run. An empty URL list is
    /// allowed and yields a header-only report.
    pub fn validate(&self) -> Result<()> {
        if self.http.timeout_secs == 0 {
            return Err(StarsError::config("http.timeout_secs must be greater than zero"));
        }
        if self.output_path.as_os_str().is_empty() {
            return Err(StarsError::config("output path is empty"));
        }
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// Config loading
// ---------------------------------------------------------------------------

/// Get the path to the config directory (`~/.seeing-stars/`).
pub fn config_dir() -> Result<PathBuf> {
    let home =
        dirs::home_dir().ok_or_else(|| StarsError::config("could not determine home directory"))?;
    Ok(home.join(CONFIG_DIR_NAME))
}

/// Get the path to the config file (`~/.seeing-stars/seeing-stars.toml`).
pub fn config_file_path() -> Result<PathBuf> {
    Ok(config_dir()?.join(CONFIG_FILE_NAME))
}

/// Load the application config from disk. Returns defaults if the file does not exist.
pub fn load_config() -> Result<AppConfig> {
    let path = config_file_path()?;

    if !path.exists() {
        tracing::debug!(?path, "config file not found, using defaults");
        return Ok(AppConfig::default());
    }

    load_config_from(&path)
}

/// Load the application config from a specific file path.
pub fn load_config_from(path: &Path) -> Result<AppConfig> {
    let content = std::fs::read_to_string(path).map_err(|e| StarsError::io(path, e))?;

    toml::from_str(&content)
        .map_err(|e| StarsError::config(format!("failed to parse {}: {e}", path.display())))
}

/// Create the config directory and write a default config file.
/// Returns the path to the created file.
pub fn init_config() -> Result<PathBuf> {
    let dir = config_dir()?;
    std::fs::create_dir_all(&dir).map_err(|e| StarsError::io(&dir, e))?;

    let path = dir.join(CONFIG_FILE_NAME);
    let content = render_default_config()?;

    std::fs::write(&path, content).map_err(|e| StarsError::io(&path, e))?;
    tracing::info!(?path, "created default config file");

    Ok(path)
}

/// Serialize the default config as pretty TOML.
pub fn render_default_config() -> Result<String> {
    toml::to_string_pretty(&AppConfig::default()).map_err(|e| StarsError::config(e.to_string()))
}
