//! Editor round trip for reviewing generated commit messages.

use std::io::{Read, Write};
use std::process::Command;

use crate::error::EditorError;

/// Open the user's editor on the given text and return the edited result.
///
/// Resolves `$VISUAL`, then `$EDITOR`, then falls back to `vi`. Returns
/// `None` when the user empties the buffer, which callers treat as an
/// abort.
pub fn edit_message(initial: &str) -> Result<Option<String>, EditorError> {
    let editor = std::env::var("VISUAL")
        .or_else(|_| std::env::var("EDITOR"))
        .unwrap_or_else(|_| "vi".to_string());

    let mut temp_file = tempfile::Builder::new()
        .prefix("gloss-")
        .suffix(".COMMIT_EDITMSG")
        .tempfile()
        .map_err(EditorError::Io)?;

    temp_file
        .write_all(initial.as_bytes())
        .map_err(EditorError::Io)?;

    let path = temp_file.path().to_owned();

    let status = Command::new(&editor)
        .arg(&path)
        .status()
        .map_err(|source| EditorError::SpawnFailed {
            editor: editor.clone(),
            source,
        })?;

    if !status.success() {
        return Err(EditorError::NonZeroExit(status));
    }

    let mut content = String::new();
    std::fs::File::open(&path)
        .map_err(EditorError::Io)?
        .read_to_string(&mut content)
        .map_err(EditorError::Io)?;

    let trimmed = content.trim();
    if trimmed.is_empty() {
        return Ok(None);
    }

    Ok(Some(trimmed.to_string()))
}
