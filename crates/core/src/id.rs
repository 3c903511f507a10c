//! Strongly-typed identifiers used across the domain.

use core::str::FromStr;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::DomainError;

/// Identifier of a sale ledger (one per selling session).
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct LedgerId(Uuid);

impl LedgerId {
    /// Fresh, time-ordered (UUIDv7) identifier.
    pub fn new() -> Self {
        Self(Uuid::now_v7())
    }
}

impl Default for LedgerId {
    fn default() -> Self {
        Self::new()
    }
}

impl core::fmt::Display for LedgerId {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "ledger-{}", self.0)
    }
}

impl From<Uuid> for LedgerId {
    fn from(value: Uuid) -> Self {
        Self(value)
    }
}

impl FromStr for LedgerId {
    type Err = DomainError;

    /// Accepts both `ledger-<uuid>` and a bare UUID.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let raw = s.strip_prefix("ledger-").unwrap_or(s);
        let uuid = Uuid::from_str(raw)
            .map_err(|e| DomainError::invalid_id(format!("LedgerId: {e}")))?;
        Ok(Self(uuid))
    }
}
