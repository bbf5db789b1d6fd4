//! Release version arithmetic.
//!
//! Every branch name, tag, milestone and follow-up development version used
//! during a release is derived from the single `MAJOR.MINOR.PATCH` version
//! the operator asked for.
use semver::{Prerelease, Version};
use std::fmt;

use crate::Result;

/// Pre-release suffix appended to development versions.
const DEV_SUFFIX: &str = "dev";

/// The version being released, parsed from operator input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReleaseVersion {
    version: Version,
}

impl ReleaseVersion {
    /// Parse a semantic version. A leading `v` is accepted.
    pub fn parse(input: &str) -> Result<Self> {
        let trimmed = input.trim();
        let trimmed = trimmed.strip_prefix('v').unwrap_or(trimmed);
        let version = Version::parse(trimmed)?;
        Ok(Self { version })
    }

    /// Release branch scoped to the minor line, e.g. `v1.14.x`.
    pub fn release_branch(&self) -> String {
        format!("v{}.{}.x", self.version.major, self.version.minor)
    }

    /// Tag the draft release is created for, e.g. `v1.14.2`.
    pub fn tag(&self) -> String {
        format!("v{}", self.version)
    }

    /// Milestone the merged pull requests are collected from.
    pub fn milestone_title(&self) -> String {
        format!("{}.{} Release", self.version.major, self.version.minor)
    }

    pub fn release_title(&self) -> String {
        format!("Release {}", self.version)
    }

    /// Development version applied to the release branch once the release
    /// is published: the patch field is incremented.
    pub fn post_release_version(&self) -> String {
        let mut next = self.version.clone();
        next.patch += 1;
        dev_version(next)
    }

    /// Development version applied to trunk: the minor field is incremented
    /// and patch resets to zero.
    pub fn next_minor_version(&self) -> String {
        let mut next = self.version.clone();
        next.minor += 1;
        next.patch = 0;
        dev_version(next)
    }
}

impl fmt::Display for ReleaseVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.version)
    }
}

fn dev_version(mut version: Version) -> String {
    version.pre = Prerelease::EMPTY;
    version.build = semver::BuildMetadata::EMPTY;
    format!("{version}-{DEV_SUFFIX}")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ReleaseBotError;

    #[test]
    fn derives_release_artifacts() {
        let version = ReleaseVersion::parse("1.14.2").unwrap();

        assert_eq!(version.release_branch(), "v1.14.x");
        assert_eq!(version.tag(), "v1.14.2");
        assert_eq!(version.milestone_title(), "1.14 Release");
        assert_eq!(version.release_title(), "Release 1.14.2");
        assert_eq!(version.to_string(), "1.14.2");
    }

    #[test]
    fn post_release_increments_patch_only() {
        let version = ReleaseVersion::parse("1.14.2").unwrap();
        assert_eq!(version.post_release_version(), "1.14.3-dev");
    }

    #[test]
    fn next_minor_increments_minor_and_resets_patch() {
        let version = ReleaseVersion::parse("1.14.2").unwrap();
        assert_eq!(version.next_minor_version(), "1.15.0-dev");

        let version = ReleaseVersion::parse("2.0.0").unwrap();
        assert_eq!(version.next_minor_version(), "2.1.0-dev");
        assert_eq!(version.post_release_version(), "2.0.1-dev");
    }

    #[test]
    fn accepts_leading_v() {
        let version = ReleaseVersion::parse("v1.3.0").unwrap();
        assert_eq!(version.tag(), "v1.3.0");
    }

    #[test]
    fn rejects_malformed_versions() {
        for input in ["", "1.14", "one.two.three", "1.14.x"] {
            let err = ReleaseVersion::parse(input).unwrap_err();
            assert!(
                matches!(err, ReleaseBotError::InvalidVersion(_)),
                "expected invalid version for {input:?}"
            );
        }
    }
}
