//! Launcher configuration
//!
//! Configuration file:
//! - ~/.config/consult-user-dialog/config.yaml (or `$CONSULT_DIALOG_CONFIG`)
//!
//! Every field has a default, so a missing or partial file is fine.

use crate::error::{DialogError, Result};
use crate::paths::Paths;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Speech rate used when neither the payload nor the config gives one
pub const DEFAULT_SPEECH_RATE: u32 = 200;

/// Top-level configuration
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub notify: NotifyConfig,

    #[serde(default)]
    pub speech: SpeechConfig,

    #[serde(default)]
    pub ui: UiConfig,

    /// User preferences applied on top of payloads
    #[serde(default)]
    pub defaults: Defaults,
}

impl Config {
    /// Load configuration from the default location
    pub fn load() -> Result<Self> {
        Self::load_from(&Paths::new().config_file())
    }

    /// Load configuration from a specific path; absent file means defaults
    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }

        let content = std::fs::read_to_string(path).map_err(|source| DialogError::ConfigRead {
            path: path.to_path_buf(),
            source,
        })?;

        if content.trim().is_empty() {
            return Ok(Self::default());
        }

        serde_yaml::from_str(&content).map_err(|source| DialogError::ConfigParse {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Load configuration, falling back to defaults on any error
    pub fn load_or_default() -> Self {
        Self::load().unwrap_or_else(|e| {
            tracing::warn!("{}; using default configuration", e);
            Self::default()
        })
    }

    /// Speech rate for a request that did not specify one
    pub fn speech_rate(&self) -> u32 {
        self.defaults.speech_rate.unwrap_or(DEFAULT_SPEECH_RATE)
    }
}

/// Desktop notification executables
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum NotifyBackend {
    /// Linux notify-send (libnotify)
    NotifySend,
    /// macOS osascript
    Osascript,
}

impl Default for NotifyBackend {
    fn default() -> Self {
        Self::detect()
    }
}

impl NotifyBackend {
    /// Pick the backend native to the current platform
    pub fn detect() -> Self {
        if cfg!(target_os = "macos") {
            Self::Osascript
        } else {
            Self::NotifySend
        }
    }

    /// Executable invoked when no program override is configured
    pub fn program(&self) -> &'static str {
        match self {
            Self::NotifySend => "notify-send",
            Self::Osascript => "osascript",
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct NotifyConfig {
    #[serde(default)]
    pub backend: NotifyBackend,

    /// Path to the executable, replacing the backend's default
    #[serde(default)]
    pub program: Option<String>,
}

impl NotifyConfig {
    pub fn program(&self) -> &str {
        self.program.as_deref().unwrap_or(self.backend.program())
    }
}

/// One speech-synthesis executable and its flag convention
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SpeechEngine {
    pub program: String,
    pub rate_flag: String,
    #[serde(default = "default_voice_flag")]
    pub voice_flag: String,
}

fn default_voice_flag() -> String {
    "-v".to_string()
}

impl SpeechEngine {
    pub fn new(program: &str, rate_flag: &str, voice_flag: &str) -> Self {
        Self {
            program: program.to_string(),
            rate_flag: rate_flag.to_string(),
            voice_flag: voice_flag.to_string(),
        }
    }
}

/// Speech engines in the order they are tried
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SpeechConfig {
    #[serde(default = "default_engines")]
    pub engines: Vec<SpeechEngine>,
}

impl Default for SpeechConfig {
    fn default() -> Self {
        Self {
            engines: default_engines(),
        }
    }
}

fn default_engines() -> Vec<SpeechEngine> {
    vec![
        // words per minute, "rate" convention
        SpeechEngine::new("say", "-r", "-v"),
        // words per minute, "speed" convention
        SpeechEngine::new("espeak", "-s", "-v"),
    ]
}

/// Declarative UI renderer
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UiConfig {
    #[serde(default = "default_ui_program")]
    pub program: String,

    /// Top-level resource handed to the renderer
    #[serde(default)]
    pub entry: Option<PathBuf>,
}

impl Default for UiConfig {
    fn default() -> Self {
        Self {
            program: default_ui_program(),
            entry: None,
        }
    }
}

fn default_ui_program() -> String {
    "qml".to_string()
}

impl UiConfig {
    pub fn entry(&self) -> PathBuf {
        self.entry.clone().unwrap_or_else(|| Paths::new().ui_entry())
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Defaults {
    /// Dialog position; overrides whatever the payload asks for
    #[serde(default)]
    pub position: Option<String>,

    #[serde(default)]
    pub speech_rate: Option<u32>,
}
