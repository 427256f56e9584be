//! Hand drafted notes to the operator's `$EDITOR`.

use std::env;
use std::fs;
use std::io::Write;
use std::process::Command;

use crate::error::{ReleaseNotesError, Result};

/// Editor command from the `EDITOR` environment variable, if set and non-empty
pub fn resolve_editor() -> Option<String> {
    env::var("EDITOR")
        .ok()
        .map(|editor| editor.trim().to_string())
        .filter(|editor| !editor.is_empty())
}

/// Let the operator edit `text` and return the saved result.
///
/// The text is written to a temporary file, `<editor> <path>` runs through
/// the platform shell, and the file is read back once the editor exits.
pub fn edit(editor: &str, text: &str) -> Result<String> {
    let mut file = tempfile::Builder::new()
        .prefix("notes")
        .suffix(".md")
        .tempfile()?;
    file.write_all(text.as_bytes())?;
    file.flush()?;

    let command = format!("{} \"{}\"", editor, file.path().display());
    log::debug!("Launching editor: {}", command);

    let status = shell(&command).status().map_err(|e| {
        ReleaseNotesError::editor(format!("Failed to launch '{}': {}", editor, e))
    })?;

    if !status.success() {
        return Err(ReleaseNotesError::editor(format!(
            "'{}' exited with code {}",
            editor,
            status.code().unwrap_or(-1)
        )));
    }

    Ok(fs::read_to_string(file.path())?)
}

#[cfg(not(windows))]
fn shell(command: &str) -> Command {
    let mut cmd = Command::new("/bin/sh");
    cmd.arg("-c").arg(command);
    cmd
}

#[cfg(windows)]
fn shell(command: &str) -> Command {
    use std::os::windows::process::CommandExt;

    // cmd.exe parses its own command line, so the quoting must reach it untouched
    let mut cmd = Command::new("cmd.exe");
    cmd.raw_arg("/s").raw_arg("/c").raw_arg(format!("\"{}\"", command));
    cmd
}

#[cfg(all(test, unix))]
mod tests {
    use super::*;
    use serial_test::serial;

    #[test]
    fn test_edit_returns_saved_content() {
        // `sed -i` stands in for an interactive editor
        let edited = edit("sed -i.bak s/draft/final/", "draft notes\n").unwrap();
        assert_eq!(edited, "final notes\n");
    }

    #[test]
    fn test_edit_unchanged_with_noop_editor() {
        assert_eq!(edit("true", "keep me\n").unwrap(), "keep me\n");
    }

    #[test]
    fn test_edit_failure_is_editor_error() {
        let err = edit("false", "text").unwrap_err();
        assert!(matches!(err, ReleaseNotesError::Editor(_)));
    }

    #[test]
    #[serial]
    fn test_resolve_editor_from_env() {
        let saved = env::var("EDITOR").ok();

        env::set_var("EDITOR", "vim");
        assert_eq!(resolve_editor(), Some("vim".to_string()));

        env::set_var("EDITOR", "  ");
        assert_eq!(resolve_editor(), None);

        env::remove_var("EDITOR");
        assert_eq!(resolve_editor(), None);

        if let Some(editor) = saved {
            env::set_var("EDITOR", editor);
        }
    }
}
