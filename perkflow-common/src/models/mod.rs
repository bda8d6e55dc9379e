// File: perkflow-common/src/models/mod.rs
pub mod redemption;
pub mod remote;
pub mod reward;

pub use redemption::{RedemptionErrorKind, RedemptionSession, RedemptionStatus, SessionSnapshot};
pub use remote::{DeviceMetadata, OtpWindow, RedeemedReward, RemoteFailure};
pub use reward::{AccountId, RewardId};
