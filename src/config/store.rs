//! Layered configuration: global and local YAML documents.
//!
//! Each scope is a partial document holding only the keys explicitly set in
//! it. Resolution is key-by-key: local over global over built-in defaults,
//! never whole-file replacement.

use std::fmt;
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::ConfigError;

use super::settings::{Setting, SettingValue};

/// Filename of the global document, under the per-user config directory.
pub const GLOBAL_FILE: &str = "config.yml";

/// Filename of the local document, in the working directory.
pub const LOCAL_FILE: &str = ".gloss.yaml";

/// Configuration layer. Local takes precedence over global.
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum Scope {
    Local,
    Global,
}

impl Scope {
    pub fn as_str(self) -> &'static str {
        match self {
            Scope::Local => "local",
            Scope::Global => "global",
        }
    }
}

impl fmt::Display for Scope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One scope's on-disk document.
///
/// Partial by construction: unset keys serialize to nothing and deserialize
/// to `None`. Unknown keys are rejected at parse time.
#[derive(Debug, Default, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ConfigDocument {
    #[serde(default, skip_serializing_if = "AiSection::is_empty")]
    ai: AiSection,
    #[serde(default, skip_serializing_if = "UserSection::is_empty")]
    user: UserSection,
}

#[derive(Debug, Default, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
struct AiSection {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    model: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    temperature: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    max_tokens: Option<u32>,
}

impl AiSection {
    fn is_empty(&self) -> bool {
        self.model.is_none() && self.temperature.is_none() && self.max_tokens.is_none()
    }
}

#[derive(Debug, Default, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
struct UserSection {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    language: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    emoji_enabled: Option<bool>,
}

impl UserSection {
    fn is_empty(&self) -> bool {
        self.language.is_none() && self.emoji_enabled.is_none()
    }
}

impl ConfigDocument {
    /// The value this document sets for a key, if any.
    fn get(&self, setting: Setting) -> Option<SettingValue> {
        match setting {
            Setting::Model => self.ai.model.clone().map(SettingValue::Text),
            Setting::Temperature => self.ai.temperature.map(SettingValue::Float),
            Setting::MaxTokens => self.ai.max_tokens.map(SettingValue::Integer),
            Setting::Language => self.user.language.clone().map(SettingValue::Text),
            Setting::EmojiEnabled => self.user.emoji_enabled.map(SettingValue::Flag),
        }
    }

    fn set(&mut self, setting: Setting, value: SettingValue) {
        match (setting, value) {
            (Setting::Model, SettingValue::Text(v)) => self.ai.model = Some(v),
            (Setting::Temperature, SettingValue::Float(v)) => self.ai.temperature = Some(v),
            (Setting::MaxTokens, SettingValue::Integer(v)) => self.ai.max_tokens = Some(v),
            (Setting::Language, SettingValue::Text(v)) => self.user.language = Some(v),
            (Setting::EmojiEnabled, SettingValue::Flag(v)) => self.user.emoji_enabled = Some(v),
            // Setting::parse_value is the only producer, so types always line up.
            (setting, value) => unreachable!("mismatched value {value:?} for {}", setting.key()),
        }
    }
}

/// Locations of the two scope documents.
#[derive(Debug, Clone)]
pub struct ConfigPaths {
    pub global: PathBuf,
    pub local: PathBuf,
}

impl ConfigPaths {
    /// Standard locations: `~/.config/gloss/config.yml` and `./.gloss.yaml`.
    pub fn discover() -> Result<Self, ConfigError> {
        let global = dirs::config_dir()
            .ok_or(ConfigError::NoConfigDir)?
            .join("gloss")
            .join(GLOBAL_FILE);
        Ok(Self {
            global,
            local: PathBuf::from(LOCAL_FILE),
        })
    }

    pub fn path(&self, scope: Scope) -> &Path {
        match scope {
            Scope::Local => &self.local,
            Scope::Global => &self.global,
        }
    }
}

/// Fully resolved configuration passed into components.
#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    pub model: String,
    pub temperature: f64,
    pub max_tokens: u32,
    pub language: String,
    pub emoji_enabled: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            model: super::settings::DEFAULT_MODEL.to_string(),
            temperature: super::settings::DEFAULT_TEMPERATURE,
            max_tokens: super::settings::DEFAULT_MAX_TOKENS,
            language: super::settings::DEFAULT_LANGUAGE.to_string(),
            emoji_enabled: true,
        }
    }
}

/// Layered configuration store.
///
/// Both scopes are loaded up front; `set` mutates one layer and persists it
/// immediately. Nothing else writes configuration.
#[derive(Debug)]
pub struct ConfigStore {
    paths: ConfigPaths,
    global: ConfigDocument,
    local: ConfigDocument,
}

impl ConfigStore {
    /// Load both scopes. A missing file yields an empty layer, not an error.
    pub fn load(paths: ConfigPaths) -> Result<Self, ConfigError> {
        let global = load_document(&paths.global)?;
        let local = load_document(&paths.local)?;
        Ok(Self {
            paths,
            global,
            local,
        })
    }

    /// Resolve a setting: local over global over built-in default.
    pub fn resolve(&self, setting: Setting) -> SettingValue {
        self.local
            .get(setting)
            .or_else(|| self.global.get(setting))
            .unwrap_or_else(|| setting.default_value())
    }

    /// Which layer supplies the resolved value; `None` means the default.
    pub fn source(&self, setting: Setting) -> Option<Scope> {
        if self.local.get(setting).is_some() {
            Some(Scope::Local)
        } else if self.global.get(setting).is_some() {
            Some(Scope::Global)
        } else {
            None
        }
    }

    /// Resolve a dotted key, failing on unrecognized keys.
    pub fn resolve_key(&self, key: &str) -> Result<SettingValue, ConfigError> {
        let setting =
            Setting::from_key(key).ok_or_else(|| ConfigError::UnknownSetting(key.to_string()))?;
        Ok(self.resolve(setting))
    }

    /// Validate, set, and persist a value in the given scope.
    ///
    /// The key is checked against the settings enumeration and the value
    /// against its constraints before any file is touched.
    pub fn set(&mut self, key: &str, raw: &str, scope: Scope) -> Result<SettingValue, ConfigError> {
        let setting =
            Setting::from_key(key).ok_or_else(|| ConfigError::InvalidSetting(key.to_string()))?;
        let value = setting.parse_value(raw)?;

        let document = match scope {
            Scope::Local => &mut self.local,
            Scope::Global => &mut self.global,
        };
        document.set(setting, value.clone());
        self.persist(scope)?;
        Ok(value)
    }

    /// The fully merged configuration handed to components.
    pub fn effective(&self) -> Config {
        let mut config = Config::default();
        for setting in Setting::ALL {
            match (setting, self.resolve(setting)) {
                (Setting::Model, SettingValue::Text(v)) => config.model = v,
                (Setting::Temperature, SettingValue::Float(v)) => config.temperature = v,
                (Setting::MaxTokens, SettingValue::Integer(v)) => config.max_tokens = v,
                (Setting::Language, SettingValue::Text(v)) => config.language = v,
                (Setting::EmojiEnabled, SettingValue::Flag(v)) => config.emoji_enabled = v,
                _ => {}
            }
        }
        config
    }

    pub fn paths(&self) -> &ConfigPaths {
        &self.paths
    }

    /// Write one scope's document atomically (temp file, then rename).
    fn persist(&self, scope: Scope) -> Result<(), ConfigError> {
        let path = self.paths.path(scope);
        let write_failed = |source: std::io::Error| ConfigError::WriteFailed {
            path: path.to_path_buf(),
            source,
        };

        let document = match scope {
            Scope::Local => &self.local,
            Scope::Global => &self.global,
        };
        let rendered = serde_yaml::to_string(document)
            .map_err(|e| write_failed(std::io::Error::other(e)))?;

        let parent = match path.parent() {
            Some(p) if !p.as_os_str().is_empty() => p,
            _ => Path::new("."),
        };
        fs::create_dir_all(parent).map_err(write_failed)?;

        let mut tmp = tempfile::NamedTempFile::new_in(parent).map_err(write_failed)?;
        tmp.write_all(rendered.as_bytes()).map_err(write_failed)?;
        tmp.persist(path).map_err(|e| write_failed(e.error))?;

        debug!("wrote {scope} config to {}", path.display());
        Ok(())
    }
}

/// Read one scope document; missing or blank files are empty layers.
fn load_document(path: &Path) -> Result<ConfigDocument, ConfigError> {
    let contents = match fs::read_to_string(path) {
        Ok(contents) => contents,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            return Ok(ConfigDocument::default());
        }
        Err(source) => {
            return Err(ConfigError::ReadFailed {
                path: path.to_path_buf(),
                source,
            });
        }
    };

    if contents.trim().is_empty() {
        return Ok(ConfigDocument::default());
    }

    serde_yaml::from_str(&contents).map_err(|source| ConfigError::ParseFailed {
        path: path.to_path_buf(),
        source,
    })
}
