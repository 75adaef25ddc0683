//! Hosted inference: generation parameters, trait seam, and HTTP client.

pub mod client;
pub mod generator;

pub use client::{API_KEY_VAR, HuggingFaceClient};
pub use generator::{GenerationParams, TextGenerator};
