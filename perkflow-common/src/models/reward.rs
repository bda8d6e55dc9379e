// File: perkflow-common/src/models/reward.rs

use serde::{Deserialize, Serialize};
use std::fmt;

/// Opaque identifier of a catalog item being redeemed. The catalog itself
/// lives elsewhere; the redemption flow only ever carries the id through.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct RewardId(pub String);

impl RewardId {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for RewardId {
    fn from(s: &str) -> Self {
        RewardId(s.to_string())
    }
}

impl fmt::Display for RewardId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Account identifier supplied by the identity provider. The backend format
/// is unspecified, so this stays an opaque string rather than a Uuid.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct AccountId(pub String);

impl AccountId {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for AccountId {
    fn from(s: &str) -> Self {
        AccountId(s.to_string())
    }
}

impl fmt::Display for AccountId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
