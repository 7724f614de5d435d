//! Loot table identifiers.

use serde::{Deserialize, Serialize};

/// Identifies which deterministic content-generation rule a container uses.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct LootTableId(pub u32);

impl LootTableId {
    /// `chests/ruined_portal`.
    pub const RUINED_PORTAL: Self = Self(1);

    /// Returns the raw id.
    #[inline]
    #[must_use]
    pub const fn value(self) -> u32 {
        self.0
    }
}

impl std::fmt::Display for LootTableId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "table#{}", self.0)
    }
}
