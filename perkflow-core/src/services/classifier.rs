// File: src/services/classifier.rs

use serde_json::Value;
use tracing::debug;

use perkflow_common::models::redemption::RedemptionErrorKind;
use perkflow_common::models::remote::RemoteFailure;

/// Exact backend string signalling the account has exhausted its attempt
/// budget for the current code. This is a contract constant: the comparison
/// is deliberately a strict equality, with no case folding or substring
/// matching, so a changed backend message is NOT silently treated as an
/// incorrect code. Flagged with the backend team as a fragile coupling.
pub const TOO_MANY_FAILS_SENTINEL: &str = "too many fails";

/// Payload field carrying the verification-failure reason.
pub const VERIFY_REASON_FIELD: &str = "reason";

/// Which remote call a failure came out of. Classification of everything
/// except authorization-class verification failures is phase-generic.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RemotePhase {
    RequestCode,
    VerifyCode,
    Redeem,
}

/// Maps an opaque remote failure to one kind of the closed error taxonomy.
///
/// Pass `None` for the phase when the failure arrives with no call context;
/// it then falls back to `Unknown` carrying the failure's own message.
pub fn classify(phase: Option<RemotePhase>, failure: &RemoteFailure) -> RedemptionErrorKind {
    if phase == Some(RemotePhase::VerifyCode) && failure.is_authorization() {
        let reason = failure
            .payload
            .as_ref()
            .and_then(|p| p.get(VERIFY_REASON_FIELD))
            .and_then(Value::as_str);
        debug!("classifying verification failure, reason field: {:?}", reason);
        return match reason {
            Some(TOO_MANY_FAILS_SENTINEL) => RedemptionErrorKind::TooManyAttempts,
            _ => RedemptionErrorKind::IncorrectCode,
        };
    }

    match phase {
        Some(RemotePhase::RequestCode) => RedemptionErrorKind::RequestFailed,
        Some(RemotePhase::VerifyCode) => RedemptionErrorKind::VerificationFailed,
        Some(RemotePhase::Redeem) => RedemptionErrorKind::RedemptionFailed,
        None => RedemptionErrorKind::Unknown(failure.message.clone()),
    }
}
