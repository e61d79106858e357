//! Upgrade severity classification

use semver::Version;
use std::fmt;

/// The coarsest semantic-version component that differs between two versions
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum UpgradeKind {
    /// Major version change (breaking)
    Major,
    /// Minor version change (features)
    Minor,
    /// Patch version change (fixes)
    Patch,
    /// Versions are numerically identical
    None,
}

impl UpgradeKind {
    /// Classify the upgrade between two versions.
    ///
    /// Components are compared in strict precedence order: a differing major
    /// wins over a differing minor, which wins over a differing patch.
    pub fn from_versions(from: &Version, to: &Version) -> Self {
        if from.major != to.major {
            UpgradeKind::Major
        } else if from.minor != to.minor {
            UpgradeKind::Minor
        } else if from.patch != to.patch {
            UpgradeKind::Patch
        } else {
            UpgradeKind::None
        }
    }

    /// Returns the plain display label
    pub fn label(&self) -> &'static str {
        match self {
            UpgradeKind::Major => "major",
            UpgradeKind::Minor => "minor",
            UpgradeKind::Patch => "patch",
            UpgradeKind::None => "none",
        }
    }
}

impl fmt::Display for UpgradeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}
