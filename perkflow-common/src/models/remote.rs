// File: perkflow-common/src/models/remote.rs

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use uuid::Uuid;

/// Validity window of an issued one-time password.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct OtpWindow {
    pub sent_at: DateTime<Utc>,
    pub expires_at: DateTime<Utc>,
}

impl OtpWindow {
    /// A window whose expiry is not strictly after its issue instant is
    /// malformed and must not be applied to a session.
    pub fn is_well_formed(&self) -> bool {
        self.expires_at > self.sent_at
    }
}

/// What the remote service hands back on a successful redemption.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RedeemedReward {
    /// The unique redemption code.
    pub code: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub reward_name: Option<String>,
}

/// Fixed device/session metadata sent along with every verification call.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeviceMetadata {
    pub device_id: String,
    pub platform: String,
    pub app_version: String,
}

impl DeviceMetadata {
    /// Builds metadata with a freshly generated device id.
    pub fn generate(platform: impl Into<String>, app_version: impl Into<String>) -> Self {
        Self {
            device_id: Uuid::new_v4().to_string(),
            platform: platform.into(),
            app_version: app_version.into(),
        }
    }
}

/// Opaque failure from a remote call: an HTTP-style status code plus whatever
/// JSON body came back with it. Status `0` means the call never produced a
/// response at all (transport failure, timeout, malformed body).
#[derive(Debug, Clone, Error)]
#[error("remote call failed (status {status}): {message}")]
pub struct RemoteFailure {
    pub status: u16,
    pub payload: Option<serde_json::Value>,
    pub message: String,
}

impl RemoteFailure {
    pub fn transport(message: impl Into<String>) -> Self {
        Self {
            status: 0,
            payload: None,
            message: message.into(),
        }
    }

    /// Authorization-class responses are the only ones the verification
    /// classifier inspects for a structured reason.
    pub fn is_authorization(&self) -> bool {
        self.status == 401 || self.status == 403
    }
}
