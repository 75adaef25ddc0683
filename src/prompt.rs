//! Prompt construction for diff explanations and commit messages.

use std::fmt;

use crate::error::DiffError;

/// Conventional commit types accepted by `gloss commit --type`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum CommitType {
    Feat,
    Fix,
    Docs,
    Style,
    Refactor,
    Test,
    Chore,
}

impl CommitType {
    pub fn as_str(self) -> &'static str {
        match self {
            CommitType::Feat => "feat",
            CommitType::Fix => "fix",
            CommitType::Docs => "docs",
            CommitType::Style => "style",
            CommitType::Refactor => "refactor",
            CommitType::Test => "test",
            CommitType::Chore => "chore",
        }
    }
}

impl fmt::Display for CommitType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Which template to build.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PromptMode {
    Explain { detailed: bool },
    Commit { commit_type: Option<CommitType> },
}

/// Everything needed to build one prompt. Built fresh per invocation.
#[derive(Debug, Clone)]
pub struct PromptRequest<'a> {
    pub mode: PromptMode,
    pub diff: &'a str,
    pub language: &'a str,
    pub emoji_enabled: bool,
}

/// Build the prompt for a request.
///
/// Rejects empty or whitespace-only diffs before assembling anything, so an
/// empty diff can never reach the inference call.
pub fn build_prompt(request: &PromptRequest<'_>) -> Result<String, DiffError> {
    if request.diff.trim().is_empty() {
        return Err(DiffError::Empty);
    }

    let body = match request.mode {
        PromptMode::Explain { detailed } => {
            explain_template(request.diff, detailed, request.emoji_enabled)
        }
        PromptMode::Commit { commit_type } => commit_template(request.diff, commit_type),
    };

    Ok(format!("{}{body}", language_instruction(request.language)))
}

/// Opening instruction for non-English output; empty for English.
fn language_instruction(language: &str) -> String {
    if language.eq_ignore_ascii_case("en") {
        String::new()
    } else {
        format!("Please respond in the language with ISO 639-1 code '{language}'.\n\n")
    }
}

fn explain_template(diff: &str, detailed: bool, emoji_enabled: bool) -> String {
    let depth_section = if detailed {
        "Then give a detailed, file-by-file analysis: for every file in the diff, \
         explain what was modified, why the change was likely made, and how it \
         affects the rest of the codebase. Call out complex logic, edge cases, \
         and performance considerations where they appear."
    } else {
        "Keep the explanation to a concise summary of the main purpose of the \
         change, in a few sentences."
    };

    let emoji_note = if emoji_enabled {
        "\nStart each section heading with a fitting emoji."
    } else {
        ""
    };

    format!(
        r#"You are an expert Git assistant. Analyze the following Git diff and explain the changes in plain language that helps developers understand them quickly.

Structure the explanation as:
1. Summary: one or two sentences covering the main purpose.
2. Files affected: the key files or directories changed.
3. Impact and risks: potential side effects, regressions, or areas to review.

{depth_section}{emoji_note}

Git diff:
{diff}"#
    )
}

fn commit_template(diff: &str, commit_type: Option<CommitType>) -> String {
    let conventional_section = match commit_type {
        Some(ty) => format!(
            "\nUse the conventional commit format with type '{ty}':\n\
             - Format: {ty}(scope): description\n\
             - The scope is optional; when present it is a noun naming the affected area, e.g. {ty}(parser)\n\
             - The description clearly states the purpose of the change\n"
        ),
        None => String::new(),
    };

    format!(
        r#"You are an expert at writing Git commit messages. Generate a clear and concise commit message for the following changes.

Guidelines:
- Use the imperative mood ("Add feature", not "Added feature")
- The first line is a short summary of 50 characters or less
- If more context is needed, add a body after a blank line
- Be specific about what changed and why, focusing on the intention of the change
- Respond with only the commit message, without surrounding commentary or code fences
{conventional_section}
Changes:
{diff}"#
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE_DIFF: &str = "diff --git a/x b/x\n+foo";

    fn explain_request(detailed: bool) -> PromptRequest<'static> {
        PromptRequest {
            mode: PromptMode::Explain { detailed },
            diff: SAMPLE_DIFF,
            language: "en",
            emoji_enabled: false,
        }
    }

    #[test]
    fn test_explain_prompt_embeds_diff_verbatim() {
        let prompt = build_prompt(&explain_request(false)).unwrap();
        assert!(prompt.contains(SAMPLE_DIFF));
        assert!(prompt.to_lowercase().contains("expert git assistant"));
    }

    #[test]
    fn test_explain_prompt_detailed_requests_file_level_analysis() {
        let concise = build_prompt(&explain_request(false)).unwrap();
        let detailed = build_prompt(&explain_request(true)).unwrap();

        assert!(detailed.len() > concise.len());
        assert!(detailed.contains("file-by-file"));
        assert!(detailed.contains("every file in the diff"));
        assert!(concise.contains("concise summary"));
    }

    #[test]
    fn test_explain_prompt_english_has_no_language_instruction() {
        let prompt = build_prompt(&explain_request(false)).unwrap();
        assert!(!prompt.contains("ISO 639-1"));
    }

    #[test]
    fn test_explain_prompt_non_english_requests_language() {
        let request = PromptRequest {
            language: "es",
            ..explain_request(false)
        };
        let prompt = build_prompt(&request).unwrap();
        assert!(prompt.contains("'es'"));
        assert!(prompt.contains(SAMPLE_DIFF));
    }

    #[test]
    fn test_explain_prompt_emoji_markers() {
        let request = PromptRequest {
            emoji_enabled: true,
            ..explain_request(false)
        };
        let prompt = build_prompt(&request).unwrap();
        assert!(prompt.contains("emoji"));

        let plain = build_prompt(&explain_request(false)).unwrap();
        assert!(!plain.contains("emoji"));
    }

    #[test]
    fn test_commit_prompt_plain() {
        let request = PromptRequest {
            mode: PromptMode::Commit { commit_type: None },
            diff: SAMPLE_DIFF,
            language: "en",
            emoji_enabled: true,
        };
        let prompt = build_prompt(&request).unwrap();
        assert!(prompt.to_lowercase().contains("commit message"));
        assert!(prompt.contains("imperative mood"));
        assert!(prompt.contains(SAMPLE_DIFF));
        assert!(!prompt.contains("conventional commit"));
    }

    #[test]
    fn test_commit_prompt_conventional_type() {
        let request = PromptRequest {
            mode: PromptMode::Commit {
                commit_type: Some(CommitType::Feat),
            },
            diff: SAMPLE_DIFF,
            language: "en",
            emoji_enabled: false,
        };
        let prompt = build_prompt(&request).unwrap();
        assert!(prompt.contains("conventional commit format with type 'feat'"));
        assert!(prompt.contains("feat(scope): description"));
    }

    #[test]
    fn test_empty_diff_is_rejected() {
        for diff in ["", "   ", "\n\t\n"] {
            let request = PromptRequest {
                mode: PromptMode::Explain { detailed: false },
                diff,
                language: "en",
                emoji_enabled: false,
            };
            assert!(matches!(build_prompt(&request), Err(DiffError::Empty)));
        }
    }

    #[test]
    fn test_commit_type_display() {
        assert_eq!(CommitType::Feat.to_string(), "feat");
        assert_eq!(CommitType::Refactor.to_string(), "refactor");
    }
}
