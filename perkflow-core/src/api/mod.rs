// File: src/api/mod.rs

pub mod http;

pub use http::{HttpRewardApi, RewardApiConfig};
