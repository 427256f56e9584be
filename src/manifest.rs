//! Version descriptors (`bower.json`, `package.json`, ...).

use serde::Deserialize;
use std::fs;
use std::path::Path;

use crate::domain::ProjectVersion;
use crate::error::{ReleaseNotesError, Result};

#[derive(Debug, Deserialize)]
struct Descriptor {
    version: String,
}

/// Read the `version` field of a JSON descriptor.
///
/// Returns `None` when the file is missing, is not JSON, or has no string
/// `version` field.
pub fn read_version(path: &Path) -> Option<String> {
    let text = fs::read_to_string(path).ok()?;
    match serde_json::from_str::<Descriptor>(&text) {
        Ok(descriptor) => Some(descriptor.version),
        Err(e) => {
            log::debug!("Skipping {}: {}", path.display(), e);
            None
        }
    }
}

/// Resolve the prior project version from the first usable descriptor.
///
/// Returns the descriptor file name alongside the parsed version.
pub fn resolve_prior_version(root: &Path, sources: &[String]) -> Result<(String, ProjectVersion)> {
    let (source, raw) = sources
        .iter()
        .find_map(|source| read_version(&root.join(source)).map(|raw| (source.clone(), raw)))
        .ok_or_else(|| {
            ReleaseNotesError::configuration(format!(
                "No version found in any of: {}",
                sources.join(", ")
            ))
        })?;

    let version = ProjectVersion::parse(&raw).map_err(|_| {
        ReleaseNotesError::configuration(format!(
            "{} has version \"{}\" which is not a valid semantic version",
            source, raw
        ))
    })?;

    log::debug!("Prior version {} from {}", version, source);
    Ok((source, version))
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn sources() -> Vec<String> {
        vec!["bower.json".to_string(), "package.json".to_string()]
    }

    #[test]
    fn test_primary_source_wins() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("bower.json"), r#"{"version": "2.0.0"}"#).unwrap();
        fs::write(dir.path().join("package.json"), r#"{"version": "1.0.0"}"#).unwrap();

        let (source, version) = resolve_prior_version(dir.path(), &sources()).unwrap();
        assert_eq!(source, "bower.json");
        assert_eq!(version.tag(), "v2.0.0");
    }

    #[test]
    fn test_falls_back_when_primary_missing() {
        let dir = TempDir::new().unwrap();
        fs::write(
            dir.path().join("package.json"),
            r#"{"name": "tester", "version": "v1.2.0"}"#,
        )
        .unwrap();

        let (source, version) = resolve_prior_version(dir.path(), &sources()).unwrap();
        assert_eq!(source, "package.json");
        assert_eq!(version.tag(), "v1.2.0");
    }

    #[test]
    fn test_falls_back_when_primary_unparsable() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("bower.json"), "{ not json").unwrap();
        fs::write(dir.path().join("package.json"), r#"{"version": "1.2.0"}"#).unwrap();

        let (source, _) = resolve_prior_version(dir.path(), &sources()).unwrap();
        assert_eq!(source, "package.json");
    }

    #[test]
    fn test_falls_back_when_primary_has_no_version() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("bower.json"), r#"{"name": "x"}"#).unwrap();
        fs::write(dir.path().join("package.json"), r#"{"version": "1.2.0"}"#).unwrap();

        let (source, _) = resolve_prior_version(dir.path(), &sources()).unwrap();
        assert_eq!(source, "package.json");
    }

    #[test]
    fn test_no_descriptor_is_configuration_error() {
        let dir = TempDir::new().unwrap();
        let err = resolve_prior_version(dir.path(), &sources()).unwrap_err();
        assert!(matches!(err, ReleaseNotesError::Configuration(_)));
    }

    #[test]
    fn test_invalid_version_is_configuration_error() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("package.json"), r#"{"version": "one"}"#).unwrap();
        let err = resolve_prior_version(dir.path(), &sources()).unwrap_err();
        assert!(matches!(err, ReleaseNotesError::Configuration(_)));
    }
}
