//! The recognized settings enumeration.
//!
//! Every configurable key is listed here with its description, default, and
//! value parsing. Unknown keys are rejected at this boundary instead of
//! being carried around as loosely-typed maps.

use std::fmt;

use crate::error::ConfigError;

/// Default model identifier on the inference router.
pub const DEFAULT_MODEL: &str = "CohereLabs/c4ai-command-a-03-2025";

/// Default generation temperature.
pub const DEFAULT_TEMPERATURE: f64 = 0.7;

/// Default generation token budget.
pub const DEFAULT_MAX_TOKENS: u32 = 500;

/// Default output language (ISO 639-1).
pub const DEFAULT_LANGUAGE: &str = "en";

/// A recognized configuration setting.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Setting {
    Model,
    Temperature,
    MaxTokens,
    Language,
    EmojiEnabled,
}

/// A typed scalar value for a setting.
#[derive(Debug, Clone, PartialEq)]
pub enum SettingValue {
    Text(String),
    Float(f64),
    Integer(u32),
    Flag(bool),
}

impl fmt::Display for SettingValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SettingValue::Text(value) => f.write_str(value),
            SettingValue::Float(value) => write!(f, "{value}"),
            SettingValue::Integer(value) => write!(f, "{value}"),
            SettingValue::Flag(value) => write!(f, "{value}"),
        }
    }
}

impl Setting {
    /// All recognized settings, in display order.
    pub const ALL: [Setting; 5] = [
        Setting::Model,
        Setting::Temperature,
        Setting::MaxTokens,
        Setting::Language,
        Setting::EmojiEnabled,
    ];

    /// The dotted key for this setting.
    pub fn key(self) -> &'static str {
        match self {
            Setting::Model => "ai.model",
            Setting::Temperature => "ai.temperature",
            Setting::MaxTokens => "ai.max_tokens",
            Setting::Language => "user.language",
            Setting::EmojiEnabled => "user.emoji_enabled",
        }
    }

    /// Human-readable description for `config list`.
    pub fn description(self) -> &'static str {
        match self {
            Setting::Model => "The model to use for generation",
            Setting::Temperature => "Temperature for generation (0.0 to 1.0)",
            Setting::MaxTokens => "Maximum number of tokens to generate",
            Setting::Language => "Language for explanations (ISO 639-1 code)",
            Setting::EmojiEnabled => "Whether to show emojis in output",
        }
    }

    /// The built-in default used when neither scope sets this key.
    pub fn default_value(self) -> SettingValue {
        match self {
            Setting::Model => SettingValue::Text(DEFAULT_MODEL.to_string()),
            Setting::Temperature => SettingValue::Float(DEFAULT_TEMPERATURE),
            Setting::MaxTokens => SettingValue::Integer(DEFAULT_MAX_TOKENS),
            Setting::Language => SettingValue::Text(DEFAULT_LANGUAGE.to_string()),
            Setting::EmojiEnabled => SettingValue::Flag(true),
        }
    }

    /// Look up a setting by its dotted key.
    pub fn from_key(key: &str) -> Option<Setting> {
        Setting::ALL.into_iter().find(|s| s.key() == key)
    }

    /// Parse and validate a raw string value for this setting.
    pub fn parse_value(self, raw: &str) -> Result<SettingValue, ConfigError> {
        let invalid = |reason: String| ConfigError::InvalidValue {
            key: self.key().to_string(),
            reason,
        };
        let raw = raw.trim();

        match self {
            Setting::Model => {
                if raw.is_empty() {
                    return Err(invalid("model must not be empty".to_string()));
                }
                Ok(SettingValue::Text(raw.to_string()))
            }
            Setting::Temperature => {
                let value: f64 = raw
                    .parse()
                    .map_err(|_| invalid(format!("'{raw}' is not a number")))?;
                if !(0.0..=1.0).contains(&value) {
                    return Err(invalid(format!(
                        "{value} is outside the range 0.0 to 1.0"
                    )));
                }
                Ok(SettingValue::Float(value))
            }
            Setting::MaxTokens => {
                let value: i64 = raw
                    .parse()
                    .map_err(|_| invalid(format!("'{raw}' is not an integer")))?;
                if value <= 0 {
                    return Err(invalid(format!("{value} is not a positive integer")));
                }
                u32::try_from(value)
                    .map(SettingValue::Integer)
                    .map_err(|_| invalid(format!("{value} is too large")))
            }
            Setting::Language => {
                let re = regex_lite::Regex::new("^[a-z]{2}$").unwrap();
                if !re.is_match(raw) {
                    return Err(invalid(format!(
                        "'{raw}' is not a two-letter ISO 639-1 code"
                    )));
                }
                Ok(SettingValue::Text(raw.to_string()))
            }
            Setting::EmojiEnabled => match raw.to_lowercase().as_str() {
                "true" | "1" | "yes" | "on" => Ok(SettingValue::Flag(true)),
                "false" | "0" | "no" | "off" => Ok(SettingValue::Flag(false)),
                _ => Err(invalid(format!("'{raw}' is not a boolean"))),
            },
        }
    }
}
