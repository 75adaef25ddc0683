//! Layered configuration: settings schema, scope documents, and resolution.

pub mod settings;
pub mod store;

pub use settings::{Setting, SettingValue};
pub use store::{Config, ConfigDocument, ConfigPaths, ConfigStore, Scope};
