// File: src/utils/mod.rs

pub mod otp;
pub mod time;
