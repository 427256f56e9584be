use crate::domain::version::IncrementKind;
use crate::error::Result;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// In-progress release metadata kept in the sidecar file between runs
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReleaseState {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub increment: Option<IncrementKind>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub version: Option<String>,
}

impl ReleaseState {
    /// Load the sidecar, `None` when it does not exist.
    pub fn load(path: &Path) -> Result<Option<Self>> {
        if !path.is_file() {
            return Ok(None);
        }
        let text = fs::read_to_string(path)?;
        Ok(Some(serde_json::from_str(&text)?))
    }

    pub fn save(&self, path: &Path) -> Result<()> {
        fs::write(path, serde_json::to_string(self)?)?;
        log::debug!("Saved release state to {}", path.display());
        Ok(())
    }

    pub fn has_unfinished_note(&self) -> bool {
        self.note.as_deref().is_some_and(|note| !note.is_empty())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_load_missing() {
        let dir = TempDir::new().unwrap();
        assert_eq!(ReleaseState::load(&dir.path().join(".generator-release")).unwrap(), None);
    }

    #[test]
    fn test_save_uses_sidecar_field_names() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join(".generator-release");
        let state = ReleaseState {
            note: Some("- fixed things\n".to_string()),
            increment: Some(IncrementKind::Minor),
            version: Some("v1.3.0".to_string()),
        };
        state.save(&path).unwrap();

        let raw: serde_json::Value =
            serde_json::from_str(&fs::read_to_string(&path).unwrap()).unwrap();
        assert_eq!(raw["note"], "- fixed things\n");
        assert_eq!(raw["increment"], "minor");
        assert_eq!(raw["version"], "v1.3.0");

        assert_eq!(ReleaseState::load(&path).unwrap(), Some(state));
    }

    #[test]
    fn test_load_partial_record() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join(".generator-release");
        fs::write(&path, r#"{"note":"draft"}"#).unwrap();

        let state = ReleaseState::load(&path).unwrap().unwrap();
        assert!(state.has_unfinished_note());
        assert_eq!(state.increment, None);
    }

    #[test]
    fn test_load_corrupt_record() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join(".generator-release");
        fs::write(&path, "not json").unwrap();

        assert!(ReleaseState::load(&path).is_err());
    }
}
