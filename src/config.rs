//! Configuration primitives for MediTriage.
//!
//! Stored in a machine-readable TOML file located at:
//!   %APPDATA%/MediTriage/config/config.toml on Windows
//!   $XDG_DATA_HOME/MediTriage/config/config.toml on Linux
//!   ~/Library/Application Support/MediTriage/config/config.toml on macOS
//!
//! The config tracks model settings for the Gemini collaborator and the
//! interview pacing defaults. The Gemini API key is deliberately not part
//! of the file; it is read from the `GEMINI_API_KEY` environment variable
//! by whoever constructs the service.

use anyhow::{Context, Result};
use directories::BaseDirs;
use serde::{Deserialize, Serialize};
use std::env;
use std::fs;
use std::path::{Path, PathBuf};

/// Root configuration persisted per installation.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct AppConfig {
    /// Gemini model and request options.
    #[serde(default)]
    pub gemini: GeminiSettings,
    /// Interview pacing defaults (question cap).
    #[serde(default)]
    pub interview: InterviewSettings,
}

/// Request options for the Gemini collaborator.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GeminiSettings {
    /// Model name submitted to the generateContent endpoint.
    #[serde(default = "default_model")]
    pub model: String,
    /// Base endpoint URL.
    #[serde(default = "default_endpoint")]
    pub endpoint: String,
    /// Sampling temperature (0.0 - 2.0).
    #[serde(default = "default_temperature")]
    pub temperature: f32,
    /// Request timeout in seconds.
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

impl Default for GeminiSettings {
    fn default() -> Self {
        Self {
            model: default_model(),
            endpoint: default_endpoint(),
            temperature: default_temperature(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

fn default_model() -> String {
    "gemini-3-flash-preview".to_string()
}

fn default_endpoint() -> String {
    "https://generativelanguage.googleapis.com/v1beta".to_string()
}

const fn default_temperature() -> f32 {
    0.2
}

const fn default_timeout_secs() -> u64 {
    30
}

/// Interview pacing defaults that shape the question loop.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InterviewSettings {
    /// Maximum number of questions the interviewer may ask before the
    /// session is steered toward completion.
    #[serde(default = "default_max_questions")]
    pub max_questions: u32,
}

impl Default for InterviewSettings {
    fn default() -> Self {
        Self {
            max_questions: default_max_questions(),
        }
    }
}

const fn default_max_questions() -> u32 {
    8
}

/// Standard relative path to the config file (resolved per OS at runtime).
pub const CONFIG_FILE_NAME: &str = "config.toml";

/// Directory names created under the workspace root.
const CONFIG_SUBDIR: &str = "config";
const SESSIONS_SUBDIR: &str = "sessions";

/// Resolved workspace directories.
#[derive(Debug, Clone)]
pub struct WorkspacePaths {
    pub root: PathBuf,
    pub config_dir: PathBuf,
    pub sessions_dir: PathBuf,
}

/// Returns the root directory where MediTriage stores data.
///
/// Order of precedence:
/// 1. `MEDITRIAGE_HOME` environment variable.
/// 2. OS-specific data directory via `directories::BaseDirs`.
pub fn workspace_root() -> Result<PathBuf> {
    if let Ok(path) = env::var("MEDITRIAGE_HOME") {
        return Ok(PathBuf::from(path));
    }
    let base_dirs = BaseDirs::new().context("Unable to determine OS data directory")?;
    Ok(base_dirs.data_dir().join("MediTriage"))
}

/// Returns the config directory under the workspace root.
pub fn config_dir() -> Result<PathBuf> {
    Ok(workspace_root()?.join(CONFIG_SUBDIR))
}

/// Path to the config file.
pub fn config_file_path() -> Result<PathBuf> {
    Ok(config_dir()?.join(CONFIG_FILE_NAME))
}

/// Ensures the workspace directories exist and returns their paths.
pub fn ensure_workspace_structure() -> Result<WorkspacePaths> {
    let root = workspace_root()?;
    let paths = WorkspacePaths {
        config_dir: root.join(CONFIG_SUBDIR),
        sessions_dir: root.join(SESSIONS_SUBDIR),
        root,
    };
    for dir in [&paths.root, &paths.config_dir, &paths.sessions_dir] {
        fs::create_dir_all(dir)
            .with_context(|| format!("Failed to create workspace directory {}", dir.display()))?;
    }
    Ok(paths)
}

/// Loads the configuration from disk or returns defaults.
pub fn load_or_default() -> Result<AppConfig> {
    load_from(&config_file_path()?)
}

fn load_from(path: &Path) -> Result<AppConfig> {
    if path.exists() {
        let data = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file {:?}", path))?;
        let cfg: AppConfig = toml::from_str(&data)
            .with_context(|| format!("Failed to parse config file {:?}", path))?;
        Ok(cfg)
    } else {
        Ok(AppConfig::default())
    }
}

/// Persists the configuration to disk.
pub fn save(config: &AppConfig) -> Result<()> {
    let dir = config_dir()?;
    fs::create_dir_all(&dir)?;
    let path = dir.join(CONFIG_FILE_NAME);
    let data = toml::to_string_pretty(config).context("Failed to serialize configuration")?;
    fs::write(&path, data).with_context(|| format!("Failed to write config file {:?}", path))?;
    Ok(())
}
