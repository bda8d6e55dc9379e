// src/lib.rs

pub mod api;
pub mod services;
pub mod utils;

pub use perkflow_common::error::Error;
pub use api::{HttpRewardApi, RewardApiConfig};
pub use services::RedemptionService;
