// File: perkflow-common/src/traits/api_traits.rs

use async_trait::async_trait;

use crate::models::remote::{DeviceMetadata, OtpWindow, RedeemedReward, RemoteFailure};
use crate::models::reward::{AccountId, RewardId};

/// Supplies the current account's identifier at call time. Read-only shared
/// context; the redemption flow never mutates it.
#[async_trait]
pub trait IdentityProvider: Send + Sync {
    async fn account_id(&self) -> AccountId;
}

/// The remote reward service, three request/response operations.
///
/// An empty payload from `request_code` or `redeem` is the service's
/// out-of-stock sentinel and surfaces here as `None`.
#[async_trait]
pub trait RewardApi: Send + Sync {
    /// Asks the service to issue a one-time password for the reward.
    /// `None` means the reward has no stock left.
    async fn request_code(
        &self,
        account: &AccountId,
        reward: &RewardId,
    ) -> Result<Option<OtpWindow>, RemoteFailure>;

    /// Submits the user's code together with fixed device metadata.
    async fn verify_code(
        &self,
        account: &AccountId,
        code: &str,
        device: &DeviceMetadata,
    ) -> Result<(), RemoteFailure>;

    /// Exchanges the verified session for a unique redemption code.
    /// `None` means stock ran out after verification.
    async fn redeem(&self, reward: &RewardId) -> Result<Option<RedeemedReward>, RemoteFailure>;
}
