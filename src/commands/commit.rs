//! The `commit` command: generate a message for staged changes and commit.

use anyhow::{Context, Result};
use dialoguer::Confirm;
use tracing::debug;

use crate::config::{Config, ConfigPaths, ConfigStore};
use crate::editor;
use crate::error::DiffError;
use crate::git::{DiffSource, GitRepository};
use crate::inference::{GenerationParams, HuggingFaceClient, TextGenerator};
use crate::prompt::{CommitType, PromptMode, PromptRequest, build_prompt};

#[derive(Debug, Clone)]
pub struct CommitArgs {
    pub commit_type: Option<CommitType>,
    pub no_edit: bool,
}

pub async fn run(args: CommitArgs) -> Result<()> {
    let store = ConfigStore::load(ConfigPaths::discover()?)
        .context("Failed to load configuration")?;
    let config = store.effective();

    let repo = GitRepository::open_current()?;
    let diff = repo.staged_diff()?;
    if diff.trim().is_empty() {
        return Err(anyhow::Error::from(DiffError::Empty)
            .context("No staged changes found. Stage changes with 'git add' first"));
    }

    let client = HuggingFaceClient::from_env()?;
    let message = generate_message(&config, &diff, args.commit_type, &client).await?;

    if config.emoji_enabled {
        println!("✨ Generated commit message:\n");
    } else {
        println!("Generated commit message:\n");
    }
    println!("{message}\n");

    let message = if args.no_edit {
        message
    } else {
        match editor::edit_message(&message)? {
            Some(edited) => edited,
            None => {
                println!("Empty commit message, aborting.");
                return Ok(());
            }
        }
    };

    let confirmed = Confirm::new()
        .with_prompt("Commit with this message?")
        .default(true)
        .interact()?;
    if !confirmed {
        println!("Commit aborted.");
        return Ok(());
    }

    let oid = repo.commit(&message)?;
    let id = oid.to_string();
    println!("✓ Created commit {}", &id[..7]);

    Ok(())
}

/// Build the commit prompt and run it through the generator.
pub async fn generate_message(
    config: &Config,
    diff: &str,
    commit_type: Option<CommitType>,
    generator: &dyn TextGenerator,
) -> Result<String> {
    let prompt = build_prompt(&PromptRequest {
        mode: PromptMode::Commit { commit_type },
        diff,
        language: &config.language,
        emoji_enabled: config.emoji_enabled,
    })?;

    debug!("commit prompt: {} chars", prompt.len());

    let params = GenerationParams::from_config(config);
    let message = generator.generate(&prompt, &params).await?;
    Ok(message.trim().to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::InferenceError;
    use crate::inference::generator::MockTextGenerator;

    #[tokio::test]
    async fn test_generate_message_conventional_type_reaches_prompt() {
        let config = Config::default();

        let mut generator = MockTextGenerator::new();
        generator
            .expect_generate()
            .withf(|prompt, _| prompt.contains("type 'feat'"))
            .returning(|_, _| Ok("feat(core): add widget\n".to_string()));

        let message = generate_message(
            &config,
            "diff --git a/x b/x\n+foo",
            Some(CommitType::Feat),
            &generator,
        )
        .await
        .unwrap();
        assert_eq!(message, "feat(core): add widget");
    }

    #[tokio::test]
    async fn test_generate_message_provider_failure_propagates() {
        let config = Config::default();

        let mut generator = MockTextGenerator::new();
        generator.expect_generate().returning(|_, _| {
            Err(InferenceError::Provider {
                status: 503,
                message: "overloaded".to_string(),
            })
        });

        let err = generate_message(&config, "+change", None, &generator)
            .await
            .unwrap_err();
        assert!(matches!(
            err.downcast_ref::<InferenceError>(),
            Some(InferenceError::Provider { status: 503, .. })
        ));
    }

    #[tokio::test]
    async fn test_generate_message_empty_diff_never_calls_generator() {
        let config = Config::default();

        let mut generator = MockTextGenerator::new();
        generator.expect_generate().times(0);

        let result = generate_message(&config, "", None, &generator).await;
        assert!(matches!(
            result.unwrap_err().downcast_ref::<DiffError>(),
            Some(DiffError::Empty)
        ));
    }
}
