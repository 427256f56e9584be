use crate::error::{ReleaseNotesError, Result};
use semver::{BuildMetadata, Prerelease, Version};
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

/// A project version as read from a version descriptor.
///
/// Stored without the leading `v`; [`ProjectVersion::tag`] adds it back.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProjectVersion {
    version: Version,
}

impl ProjectVersion {
    /// Parse a version string, stripping one leading `v`/`V` marker.
    pub fn parse(raw: &str) -> Result<Self> {
        let trimmed = raw.trim();
        let clean = trimmed
            .strip_prefix('v')
            .or_else(|| trimmed.strip_prefix('V'))
            .unwrap_or(trimmed);

        let version = Version::parse(clean).map_err(|e| {
            ReleaseNotesError::validation(format!("\"{}\" is not a valid version: {}", raw, e))
        })?;

        Ok(ProjectVersion { version })
    }

    pub fn semver(&self) -> &Version {
        &self.version
    }

    /// Tag form of the version (e.g., "1.2.0" -> "v1.2.0")
    pub fn tag(&self) -> String {
        format!("v{}", self.version)
    }

    /// Compare by semantic-version precedence, ignoring build metadata.
    pub fn cmp_precedence(&self, other: &ProjectVersion) -> Ordering {
        without_build(&self.version).cmp(&without_build(&other.version))
    }

    /// Advance the version by a standard increment.
    ///
    /// `Custom` carries no rule of its own; use [`ProjectVersion::parse_custom`].
    pub fn increment(&self, kind: IncrementKind) -> Result<Self> {
        let mut next = self.version.clone();
        let released = next.pre.is_empty();
        next.build = BuildMetadata::EMPTY;

        match kind {
            IncrementKind::Major => {
                if next.minor != 0 || next.patch != 0 || released {
                    next.major = step(next.major, "major")?;
                }
                next.minor = 0;
                next.patch = 0;
                next.pre = Prerelease::EMPTY;
            }
            IncrementKind::Minor => {
                if next.patch != 0 || released {
                    next.minor = step(next.minor, "minor")?;
                }
                next.patch = 0;
                next.pre = Prerelease::EMPTY;
            }
            IncrementKind::Patch => {
                if released {
                    next.patch = step(next.patch, "patch")?;
                }
                next.pre = Prerelease::EMPTY;
            }
            IncrementKind::Prerelease => {
                if released {
                    next.patch = step(next.patch, "patch")?;
                    next.pre = Prerelease::new("0").map_err(semver_error)?;
                } else {
                    next.pre = bump_prerelease(&next.pre)?;
                }
            }
            IncrementKind::Custom => {
                return Err(ReleaseNotesError::validation(
                    "custom increment requires an explicit version",
                ));
            }
        }

        Ok(ProjectVersion { version: next })
    }

    /// Validate a user-supplied version against the prior one.
    ///
    /// The input must parse (after stripping a leading `v`) and must be
    /// strictly greater than `self`.
    pub fn parse_custom(&self, input: &str) -> Result<Self> {
        let candidate = ProjectVersion::parse(input)
            .map_err(|_| ReleaseNotesError::validation(format!("\"{}\" is not a valid version", input)))?;

        if candidate.cmp_precedence(self) != Ordering::Greater {
            return Err(ReleaseNotesError::validation(format!(
                "\"{}\" must be larger than \"{}\"",
                input,
                self.tag()
            )));
        }

        Ok(candidate)
    }
}

impl fmt::Display for ProjectVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.version)
    }
}

fn without_build(version: &Version) -> Version {
    let mut version = version.clone();
    version.build = BuildMetadata::EMPTY;
    version
}

/// `value + 1`, or a validation error when the component is already at its maximum.
fn step(value: u64, component: &str) -> Result<u64> {
    value.checked_add(1).ok_or_else(|| {
        ReleaseNotesError::validation(format!(
            "{} version {} is out of range",
            component, value
        ))
    })
}

fn semver_error(err: semver::Error) -> ReleaseNotesError {
    ReleaseNotesError::validation(format!("Cannot build prerelease identifier: {}", err))
}

/// Increment the last numeric identifier, or append `.0` when there is none.
fn bump_prerelease(pre: &Prerelease) -> Result<Prerelease> {
    let mut identifiers: Vec<String> = pre.as_str().split('.').map(str::to_string).collect();

    let last_numeric = identifiers
        .iter()
        .rposition(|id| !id.is_empty() && id.chars().all(|c| c.is_ascii_digit()));

    match last_numeric {
        Some(index) => {
            let value: u64 = identifiers[index].parse().map_err(|_| {
                ReleaseNotesError::validation(format!(
                    "Prerelease identifier '{}' is out of range",
                    identifiers[index]
                ))
            })?;
            let bumped = value.checked_add(1).ok_or_else(|| {
                ReleaseNotesError::validation(format!(
                    "Prerelease identifier '{}' is out of range",
                    identifiers[index]
                ))
            })?;
            identifiers[index] = bumped.to_string();
        }
        None => identifiers.push("0".to_string()),
    }

    Prerelease::new(&identifiers.join(".")).map_err(semver_error)
}

/// How the project version advances for the next release
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum IncrementKind {
    Major,
    Minor,
    Patch,
    Prerelease,
    Custom,
}

impl IncrementKind {
    /// Kinds accepted on the command line.
    pub const STANDARD: [IncrementKind; 4] = [
        IncrementKind::Major,
        IncrementKind::Minor,
        IncrementKind::Patch,
        IncrementKind::Prerelease,
    ];

    /// Kinds offered in the interactive list.
    pub const ALL: [IncrementKind; 5] = [
        IncrementKind::Major,
        IncrementKind::Minor,
        IncrementKind::Patch,
        IncrementKind::Prerelease,
        IncrementKind::Custom,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            IncrementKind::Major => "major",
            IncrementKind::Minor => "minor",
            IncrementKind::Patch => "patch",
            IncrementKind::Prerelease => "prerelease",
            IncrementKind::Custom => "custom",
        }
    }
}

impl FromStr for IncrementKind {
    type Err = ReleaseNotesError;

    fn from_str(s: &str) -> Result<Self> {
        IncrementKind::ALL
            .iter()
            .copied()
            .find(|kind| kind.as_str() == s.to_lowercase())
            .ok_or_else(|| ReleaseNotesError::validation(format!("Unknown increment '{}'", s)))
    }
}

impl fmt::Display for IncrementKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
