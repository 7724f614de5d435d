//! # Ruleset Versions
//!
//! Generation rules change between releases. Every collaborator is built
//! for exactly one `RulesetVersion` and never mixes rules across versions.

use serde::{Deserialize, Serialize};
use std::str::FromStr;
use thiserror::Error;

/// A release of the world-generation rules.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum RulesetVersion {
    /// 1.14
    V1_14,
    /// 1.15
    V1_15,
    /// 1.16 (first release with ruined portals)
    V1_16,
    /// 1.17
    V1_17,
    /// 1.18
    V1_18,
    /// 1.19
    V1_19,
    /// 1.20
    V1_20,
    /// 1.21
    V1_21,
}

impl RulesetVersion {
    /// All known versions, oldest first.
    pub const ALL: [Self; 8] = [
        Self::V1_14,
        Self::V1_15,
        Self::V1_16,
        Self::V1_17,
        Self::V1_18,
        Self::V1_19,
        Self::V1_20,
        Self::V1_21,
    ];

    /// The newest supported version.
    pub const LATEST: Self = Self::V1_21;

    /// Minor release number (the `21` in `1.21`).
    #[must_use]
    pub const fn minor(self) -> u8 {
        match self {
            Self::V1_14 => 14,
            Self::V1_15 => 15,
            Self::V1_16 => 16,
            Self::V1_17 => 17,
            Self::V1_18 => 18,
            Self::V1_19 => 19,
            Self::V1_20 => 20,
            Self::V1_21 => 21,
        }
    }

    /// Looks up a version by its minor release number.
    #[must_use]
    pub fn from_minor(minor: u8) -> Option<Self> {
        Self::ALL.into_iter().find(|v| v.minor() == minor)
    }
}

impl Default for RulesetVersion {
    fn default() -> Self {
        Self::LATEST
    }
}

impl std::fmt::Display for RulesetVersion {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "1.{}", self.minor())
    }
}

/// A version string that names no known ruleset.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("unknown ruleset version: '{0}'")]
pub struct VersionParseError(pub String);

impl FromStr for RulesetVersion {
    type Err = VersionParseError;

    /// Accepts `1.21` and `1.21.4`; the patch number is ignored.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let err = || VersionParseError(s.to_string());
        let mut parts = s.trim().split('.');

        if parts.next() != Some("1") {
            return Err(err());
        }
        let minor: u8 = parts.next().and_then(|m| m.parse().ok()).ok_or_else(err)?;
        if let Some(patch) = parts.next() {
            patch.parse::<u8>().map_err(|_| err())?;
        }
        if parts.next().is_some() {
            return Err(err());
        }

        Self::from_minor(minor).ok_or_else(err)
    }
}

impl TryFrom<String> for RulesetVersion {
    type Error = VersionParseError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<RulesetVersion> for String {
    fn from(value: RulesetVersion) -> Self {
        value.to_string()
    }
}
