//! gloss - A CLI tool that explains git diffs and generates commit messages
//! with a hosted LLM.
//!
//! # Overview
//!
//! gloss reads a diff (from stdin or the repository), merges the layered
//! configuration, builds a prompt, sends it to a hosted inference endpoint,
//! and prints the explanation or pipes the generated message into a commit.

pub mod commands;
pub mod config;
pub mod editor;
pub mod error;
pub mod git;
pub mod inference;
pub mod prompt;

// Re-export commonly used types
pub use config::{Config, ConfigPaths, ConfigStore, Scope, Setting, SettingValue};
pub use error::{CommitError, ConfigError, DiffError, EditorError, InferenceError};
pub use git::{DiffSource, GitRepository};
pub use inference::{GenerationParams, HuggingFaceClient, TextGenerator};
pub use prompt::{CommitType, PromptMode, PromptRequest, build_prompt};
