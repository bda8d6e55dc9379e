
// File: src/services/mod.rs

pub mod classifier;
pub mod redemption_service;

pub use redemption_service::{RedemptionService, RequestOtpOutcome, VerifyOtpOutcome};
