//! The `explain` command: describe a diff in plain language.

use std::io::{self, IsTerminal, Read};

use anyhow::{Context, Result};
use tracing::debug;

use crate::config::{Config, ConfigPaths, ConfigStore};
use crate::error::DiffError;
use crate::git::{DiffSource, GitRepository};
use crate::inference::{GenerationParams, HuggingFaceClient, TextGenerator};
use crate::prompt::{PromptMode, PromptRequest, build_prompt};

#[derive(Debug, Clone)]
pub struct ExplainArgs {
    pub detailed: bool,
    pub revspec: Option<String>,
}

pub async fn run(args: ExplainArgs) -> Result<()> {
    let store = ConfigStore::load(ConfigPaths::discover()?)
        .context("Failed to load configuration")?;
    let config = store.effective();

    let diff = acquire_diff(args.revspec.as_deref())?;

    let client = HuggingFaceClient::from_env()?;
    let explanation = generate_explanation(&config, &diff, args.detailed, &client).await?;

    if config.emoji_enabled {
        println!("✨ Changes explained\n");
    } else {
        println!("Changes explained\n");
    }
    println!("{explanation}");

    Ok(())
}

/// Read the diff from stdin when piped, else from the repository.
fn acquire_diff(revspec: Option<&str>) -> Result<String, DiffError> {
    let stdin = io::stdin();
    if !stdin.is_terminal() {
        let mut buffer = String::new();
        stdin
            .lock()
            .read_to_string(&mut buffer)
            .map_err(DiffError::StdinRead)?;
        return ensure_non_empty(buffer);
    }

    let repo = GitRepository::open_current()?;
    let diff = match revspec {
        Some(spec) => repo.revision_diff(spec)?,
        None => repo.working_diff()?,
    };
    ensure_non_empty(diff)
}

fn ensure_non_empty(diff: String) -> Result<String, DiffError> {
    if diff.trim().is_empty() {
        Err(DiffError::Empty)
    } else {
        Ok(diff)
    }
}

/// Build the explain prompt and run it through the generator.
pub async fn generate_explanation(
    config: &Config,
    diff: &str,
    detailed: bool,
    generator: &dyn TextGenerator,
) -> Result<String> {
    let prompt = build_prompt(&PromptRequest {
        mode: PromptMode::Explain { detailed },
        diff,
        language: &config.language,
        emoji_enabled: config.emoji_enabled,
    })?;

    debug!("explain prompt: {} chars", prompt.len());

    let params = GenerationParams::from_config(config);
    let explanation = generator.generate(&prompt, &params).await?;
    Ok(explanation.trim().to_string())
}
