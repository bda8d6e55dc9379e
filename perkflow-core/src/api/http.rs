// File: src/api/http.rs

use std::time::Duration;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use reqwest::Client;
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use tracing::{debug, warn};
use url::Url;

use perkflow_common::error::Error;
use perkflow_common::models::remote::{DeviceMetadata, OtpWindow, RedeemedReward, RemoteFailure};
use perkflow_common::models::reward::{AccountId, RewardId};
use perkflow_common::traits::api_traits::RewardApi;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RewardApiConfig {
    pub base_url: String,
    pub request_timeout_secs: u64,
}

impl Default for RewardApiConfig {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:8080/".to_string(),
            request_timeout_secs: 10,
        }
    }
}

/// `RewardApi` over plain HTTP/JSON.
///
/// The service signals out-of-stock with an empty JSON object body on an
/// otherwise successful response; that maps to `Ok(None)` here. Non-2xx
/// responses become `RemoteFailure` carrying the parsed body (when it parses)
/// so the classifier can inspect it.
pub struct HttpRewardApi {
    client: Client,
    base_url: Url,
}

impl HttpRewardApi {
    pub fn new(config: &RewardApiConfig) -> Result<Self, Error> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.request_timeout_secs))
            .build()?;
        let base_url = Url::parse(&config.base_url)?;
        Ok(Self { client, base_url })
    }

    fn endpoint(&self, path: &str) -> Result<Url, RemoteFailure> {
        self.base_url
            .join(path)
            .map_err(|e| RemoteFailure::transport(format!("bad endpoint '{path}': {e}")))
    }

    async fn post_json(&self, path: &str, body: Value) -> Result<Value, RemoteFailure> {
        let url = self.endpoint(path)?;
        debug!("POST {url}");
        let resp = self
            .client
            .post(url)
            .json(&body)
            .send()
            .await
            .map_err(|e| RemoteFailure::transport(format!("POST {path}: {e}")))?;

        let status = resp.status();
        let bytes = resp
            .bytes()
            .await
            .map_err(|e| RemoteFailure::transport(format!("reading {path} response: {e}")))?;
        let payload: Option<Value> = if bytes.is_empty() {
            None
        } else {
            serde_json::from_slice(&bytes).ok()
        };

        if !status.is_success() {
            warn!("POST {path} returned {status}");
            return Err(RemoteFailure {
                status: status.as_u16(),
                payload,
                message: format!("{path} returned {status}"),
            });
        }
        Ok(payload.unwrap_or_else(|| json!({})))
    }
}

#[derive(Debug, Deserialize)]
struct RequestCodeResponse {
    #[serde(default)]
    otp_sent_at: Option<DateTime<Utc>>,
    #[serde(default)]
    otp_expires_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Deserialize)]
struct RedeemResponse {
    #[serde(default)]
    code: Option<String>,
    #[serde(default)]
    reward_name: Option<String>,
}

#[async_trait]
impl RewardApi for HttpRewardApi {
    async fn request_code(
        &self,
        account: &AccountId,
        reward: &RewardId,
    ) -> Result<Option<OtpWindow>, RemoteFailure> {
        let path = format!("rewards/{}/otp", urlencoding::encode(reward.as_str()));
        let payload = self
            .post_json(&path, json!({ "account_id": account }))
            .await?;

        let parsed: RequestCodeResponse = serde_json::from_value(payload)
            .map_err(|e| RemoteFailure::transport(format!("malformed request_code body: {e}")))?;
        match (parsed.otp_sent_at, parsed.otp_expires_at) {
            (Some(sent_at), Some(expires_at)) => Ok(Some(OtpWindow { sent_at, expires_at })),
            // Empty object => out of stock.
            (None, None) => Ok(None),
            _ => Err(RemoteFailure::transport(
                "request_code body carried only half an OTP window",
            )),
        }
    }

    async fn verify_code(
        &self,
        account: &AccountId,
        code: &str,
        device: &DeviceMetadata,
    ) -> Result<(), RemoteFailure> {
        self.post_json(
            "otp/verify",
            json!({
                "account_id": account,
                "code": code,
                "device": device,
            }),
        )
        .await?;
        Ok(())
    }

    async fn redeem(&self, reward: &RewardId) -> Result<Option<RedeemedReward>, RemoteFailure> {
        let path = format!("rewards/{}/redeem", urlencoding::encode(reward.as_str()));
        let payload = self.post_json(&path, json!({})).await?;

        let parsed: RedeemResponse = serde_json::from_value(payload)
            .map_err(|e| RemoteFailure::transport(format!("malformed redeem body: {e}")))?;
        match parsed.code {
            Some(code) => Ok(Some(RedeemedReward {
                code,
                reward_name: parsed.reward_name,
            })),
            // Empty object => stock ran out after verification.
            None => Ok(None),
        }
    }
}
