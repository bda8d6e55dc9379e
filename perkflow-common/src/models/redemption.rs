// File: perkflow-common/src/models/redemption.rs

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::models::reward::RewardId;

/// Lifecycle of one redemption attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RedemptionStatus {
    Idle,
    AwaitingOtp,
    Verifying,
    Redeeming,
    Succeeded,
    OutOfStock,
    Failed,
}

impl RedemptionStatus {
    /// Terminal for the session: no further verify/redeem calls until reset.
    pub fn is_terminal(&self) -> bool {
        matches!(self, RedemptionStatus::Succeeded | RedemptionStatus::OutOfStock)
    }

    /// A remote call is currently outstanding for the session.
    pub fn is_in_flight(&self) -> bool {
        matches!(self, RedemptionStatus::Verifying | RedemptionStatus::Redeeming)
    }
}

/// Closed error taxonomy for the redemption flow.
///
/// Out-of-stock is deliberately NOT in here: it is a valid business outcome
/// with its own terminal status, not a fault.
#[derive(Debug, Clone, PartialEq, Eq, Error, Serialize, Deserialize)]
pub enum RedemptionErrorKind {
    #[error("The code entered is incorrect")]
    IncorrectCode,

    #[error("Too many failed attempts; request a new code")]
    TooManyAttempts,

    #[error("Requesting a verification code failed")]
    RequestFailed,

    #[error("Code verification failed")]
    VerificationFailed,

    #[error("Redeeming the reward failed")]
    RedemptionFailed,

    #[error("{0}")]
    Unknown(String),
}

impl RedemptionErrorKind {
    /// Whether the user may retry in place, within the same OTP window.
    /// Everything else leaves the session in `Failed`.
    pub fn is_recoverable(&self) -> bool {
        matches!(self, Self::IncorrectCode | Self::TooManyAttempts)
    }
}

/// In-flight state of a single redemption attempt. Owned exclusively by the
/// redemption service; one live instance per attempt.
#[derive(Debug, Clone)]
pub struct RedemptionSession {
    /// Set by the first OTP request; immutable until reset.
    pub reward_id: Option<RewardId>,
    pub status: RedemptionStatus,
    pub otp_sent_at: Option<DateTime<Utc>>,
    pub otp_expires_at: Option<DateTime<Utc>>,
    pub last_error: Option<RedemptionErrorKind>,
    /// Present if and only if `status == Succeeded`.
    pub redeemed_code: Option<String>,
    /// Bumped on every reset. Remote completions carry the generation they
    /// were issued under; a completion for an older generation is stale and
    /// must be discarded without touching the session.
    pub generation: u64,
}

impl RedemptionSession {
    pub fn new() -> Self {
        Self {
            reward_id: None,
            status: RedemptionStatus::Idle,
            otp_sent_at: None,
            otp_expires_at: None,
            last_error: None,
            redeemed_code: None,
            generation: 0,
        }
    }

    /// Unconditionally returns the session to `Idle`, clearing every field
    /// (including the recorded reward) and superseding any in-flight call.
    pub fn reset(&mut self) {
        let generation = self.generation.wrapping_add(1);
        *self = Self::new();
        self.generation = generation;
    }

    /// The read-only tuple the presentation layer renders from.
    pub fn snapshot(&self) -> SessionSnapshot {
        SessionSnapshot {
            status: self.status,
            last_error: self.last_error.clone(),
            otp_expires_at: self.otp_expires_at,
            redeemed_code: self.redeemed_code.clone(),
        }
    }
}

impl Default for RedemptionSession {
    fn default() -> Self {
        Self::new()
    }
}

/// Everything the presentation layer needs to pick a screen and render it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionSnapshot {
    pub status: RedemptionStatus,
    pub last_error: Option<RedemptionErrorKind>,
    pub otp_expires_at: Option<DateTime<Utc>>,
    pub redeemed_code: Option<String>,
}
