// File: src/services/redemption_service.rs

use std::sync::Arc;

use parking_lot::Mutex;
use tracing::{debug, info, warn};

use perkflow_common::models::redemption::{
    RedemptionErrorKind, RedemptionSession, RedemptionStatus, SessionSnapshot,
};
use perkflow_common::models::remote::DeviceMetadata;
use perkflow_common::models::reward::RewardId;
use perkflow_common::traits::api_traits::{IdentityProvider, RewardApi};

use crate::services::classifier::{classify, RemotePhase};

/// Outcome of `request_otp` / `request_new_otp`. Expected failure modes are
/// data here, not panics or thrown errors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RequestOtpOutcome {
    /// A code was issued; the session is now awaiting it.
    Sent,
    /// The service signalled no stock. Terminal until reset.
    OutOfStock,
    Error(RedemptionErrorKind),
}

/// Outcome of `verify_otp`. `Success` carries the unique redemption code:
/// verification and redemption are fused into one caller-visible step, so a
/// correct code alone is never surfaced as success — stock can still run out
/// at redemption time.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum VerifyOtpOutcome {
    Success { code: String },
    OutOfStock,
    Error(RedemptionErrorKind),
}

/// Orchestrates the request-OTP / verify-OTP / redeem flow against a single
/// redemption session.
///
/// The service is cooperative: guards on the session status keep at most one
/// remote call outstanding, and every call captures the session generation so
/// a completion arriving after `reset()` is discarded instead of clobbering
/// the fresh session.
pub struct RedemptionService {
    api: Arc<dyn RewardApi>,
    identity: Arc<dyn IdentityProvider>,
    device: DeviceMetadata,
    session: Mutex<RedemptionSession>,
}

impl RedemptionService {
    pub fn new(
        api: Arc<dyn RewardApi>,
        identity: Arc<dyn IdentityProvider>,
        device: DeviceMetadata,
    ) -> Self {
        Self {
            api,
            identity,
            device,
            session: Mutex::new(RedemptionSession::new()),
        }
    }

    /// Read-only view for the presentation layer.
    pub fn snapshot(&self) -> SessionSnapshot {
        self.session.lock().snapshot()
    }

    /// Asks the remote service to issue a one-time password for `reward_id`.
    ///
    /// Valid from `Idle`, `AwaitingOtp` (re-request) and `Failed`. Rejected
    /// while a call is in flight, after a terminal status, or when the reward
    /// differs from the one already recorded — a new reward needs `reset()`.
    pub async fn request_otp(&self, reward_id: RewardId) -> RequestOtpOutcome {
        let generation = {
            let mut session = self.session.lock();
            if session.status.is_in_flight() {
                warn!("request_otp rejected: a remote call is already in flight");
                return RequestOtpOutcome::Error(RedemptionErrorKind::RequestFailed);
            }
            if session.status.is_terminal() {
                warn!(
                    "request_otp rejected: session is terminal ({:?}); reset first",
                    session.status
                );
                return RequestOtpOutcome::Error(RedemptionErrorKind::RequestFailed);
            }
            if let Some(existing) = &session.reward_id {
                if *existing != reward_id {
                    warn!(
                        "request_otp rejected: reward changed mid-session ('{existing}' -> '{reward_id}'); reset first"
                    );
                    return RequestOtpOutcome::Error(RedemptionErrorKind::RequestFailed);
                }
            }
            session.last_error = None;
            session.reward_id = Some(reward_id.clone());
            session.generation
        };

        let account = self.identity.account_id().await;
        debug!("requesting OTP for reward '{reward_id}' (account '{account}')");
        let result = self.api.request_code(&account, &reward_id).await;

        let mut session = self.session.lock();
        if session.generation != generation {
            debug!("dropping stale request_code completion (generation {generation} superseded)");
            return RequestOtpOutcome::Error(RedemptionErrorKind::RequestFailed);
        }
        match result {
            Ok(Some(window)) if window.is_well_formed() => {
                session.status = RedemptionStatus::AwaitingOtp;
                session.otp_sent_at = Some(window.sent_at);
                session.otp_expires_at = Some(window.expires_at);
                info!("OTP sent for reward '{reward_id}', expires at {}", window.expires_at);
                RequestOtpOutcome::Sent
            }
            Ok(Some(window)) => {
                warn!(
                    "malformed OTP window (sent_at {} >= expires_at {})",
                    window.sent_at, window.expires_at
                );
                session.status = RedemptionStatus::Failed;
                session.last_error = Some(RedemptionErrorKind::RequestFailed);
                RequestOtpOutcome::Error(RedemptionErrorKind::RequestFailed)
            }
            Ok(None) => {
                info!("reward '{reward_id}' is out of stock");
                session.status = RedemptionStatus::OutOfStock;
                session.otp_sent_at = None;
                session.otp_expires_at = None;
                RequestOtpOutcome::OutOfStock
            }
            Err(failure) => {
                warn!("request_code failed: {failure}");
                let kind = classify(Some(RemotePhase::RequestCode), &failure);
                session.status = RedemptionStatus::Failed;
                session.last_error = Some(kind.clone());
                RequestOtpOutcome::Error(kind)
            }
        }
    }

    /// Re-issues the OTP request for the reward already on record. Makes no
    /// remote call when no reward was recorded (e.g. right after `reset()`).
    pub async fn request_new_otp(&self) -> RequestOtpOutcome {
        let reward_id = self.session.lock().reward_id.clone();
        match reward_id {
            Some(id) => self.request_otp(id).await,
            None => {
                warn!("request_new_otp rejected: no reward on record");
                RequestOtpOutcome::Error(RedemptionErrorKind::RequestFailed)
            }
        }
    }

    /// Submits the user's code. Valid only from `AwaitingOtp`; any other
    /// status is rejected without a remote call, which also blocks duplicate
    /// submission while a verify is outstanding.
    ///
    /// On remote success this chains straight into the redeem call; control
    /// does not return to the caller in between.
    pub async fn verify_otp(&self, code: &str) -> VerifyOtpOutcome {
        let generation = {
            let mut session = self.session.lock();
            if session.status != RedemptionStatus::AwaitingOtp {
                warn!("verify_otp rejected in status {:?}", session.status);
                return VerifyOtpOutcome::Error(RedemptionErrorKind::VerificationFailed);
            }
            session.status = RedemptionStatus::Verifying;
            session.last_error = None;
            session.generation
        };

        let account = self.identity.account_id().await;
        debug!("verifying OTP for account '{account}'");
        let result = self.api.verify_code(&account, code, &self.device).await;

        {
            let mut session = self.session.lock();
            if session.generation != generation {
                debug!("dropping stale verify_code completion (generation {generation} superseded)");
                return VerifyOtpOutcome::Error(RedemptionErrorKind::VerificationFailed);
            }
            match result {
                Ok(()) => {
                    session.status = RedemptionStatus::Redeeming;
                }
                Err(failure) => {
                    warn!("verify_code failed: {failure}");
                    let kind = classify(Some(RemotePhase::VerifyCode), &failure);
                    if kind.is_recoverable() {
                        // Code rejected; the OTP window keeps running.
                        session.status = RedemptionStatus::AwaitingOtp;
                    } else {
                        session.status = RedemptionStatus::Failed;
                    }
                    session.last_error = Some(kind.clone());
                    return VerifyOtpOutcome::Error(kind);
                }
            }
        }

        info!("code verified; redeeming");
        self.redeem(generation).await
    }

    /// Continuation of a successful `verify_otp`; never invoked directly by
    /// callers.
    async fn redeem(&self, generation: u64) -> VerifyOtpOutcome {
        let reward_id = {
            let session = self.session.lock();
            if session.generation != generation {
                // A reset raced the verify chain; issuing the call anyway
                // could consume stock for a session this chain no longer
                // belongs to.
                debug!("redeem skipped: generation {generation} superseded before the call went out");
                return VerifyOtpOutcome::Error(RedemptionErrorKind::RedemptionFailed);
            }
            match &session.reward_id {
                Some(id) => id.clone(),
                None => {
                    debug!("redeem skipped: no reward on record");
                    return VerifyOtpOutcome::Error(RedemptionErrorKind::RedemptionFailed);
                }
            }
        };

        let result = self.api.redeem(&reward_id).await;

        let mut session = self.session.lock();
        if session.generation != generation {
            debug!("dropping stale redeem completion (generation {generation} superseded)");
            return VerifyOtpOutcome::Error(RedemptionErrorKind::RedemptionFailed);
        }
        match result {
            Ok(Some(redeemed)) => {
                info!("reward '{reward_id}' redeemed");
                session.status = RedemptionStatus::Succeeded;
                session.redeemed_code = Some(redeemed.code.clone());
                VerifyOtpOutcome::Success { code: redeemed.code }
            }
            Ok(None) => {
                // Stock ran out between verification and redemption.
                info!("reward '{reward_id}' out of stock at redemption time");
                session.status = RedemptionStatus::OutOfStock;
                VerifyOtpOutcome::OutOfStock
            }
            Err(failure) => {
                warn!("redeem failed: {failure}");
                let kind = classify(Some(RemotePhase::Redeem), &failure);
                session.status = RedemptionStatus::Failed;
                session.last_error = Some(kind.clone());
                VerifyOtpOutcome::Error(kind)
            }
        }
    }

    /// Unconditionally returns the session to `Idle` and supersedes any call
    /// still in flight; its completion will be dropped on arrival.
    pub fn reset(&self) {
        let mut session = self.session.lock();
        info!("redemption session reset (was {:?})", session.status);
        session.reset();
    }
}
