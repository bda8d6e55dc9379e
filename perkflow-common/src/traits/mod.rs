// File: perkflow-common/src/traits/mod.rs
pub mod api_traits;

pub use api_traits::{IdentityProvider, RewardApi};
