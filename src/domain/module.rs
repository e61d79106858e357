//! Module update records

use super::UpgradeKind;
use semver::Version;
use std::fmt;

/// One dependency module with a known current and available version.
///
/// Records are created fresh on every run from the lister output and never
/// persisted. The upgrade kind is computed once at construction and is
/// immutable thereafter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModuleUpdate {
    /// Module path (e.g. `github.com/owner/repo`)
    pub name: String,
    /// Version currently required by the project
    pub from: Version,
    /// Version available for upgrade
    pub to: Version,
    /// Severity of the upgrade, derived from `from` and `to`
    pub kind: UpgradeKind,
}

impl ModuleUpdate {
    /// Creates a new module update with the kind derived from the versions
    pub fn new(name: impl Into<String>, from: Version, to: Version) -> Self {
        let kind = UpgradeKind::from_versions(&from, &to);
        Self {
            name: name.into(),
            from,
            to,
            kind,
        }
    }

    /// Formats this record back into the listing line format
    pub fn to_listing_line(&self) -> String {
        format!("==START=={},{},{}==END==", self.name, self.from, self.to)
    }
}

impl fmt::Display for ModuleUpdate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {} -> {}", self.name, self.from, self.to)
    }
}
