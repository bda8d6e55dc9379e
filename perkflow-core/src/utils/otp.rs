// src/utils/otp.rs

/// Required length of a complete one-time password.
pub const OTP_LENGTH: usize = 6;

/// Normalizes raw keystroke/paste input by dropping every character outside
/// `[0-9]`. No length truncation happens here; capping the field is a
/// presentation concern applied after filtering.
pub fn filter(raw: &str) -> String {
    raw.chars().filter(|c| c.is_ascii_digit()).collect()
}

/// True iff `code` is exactly six digits, i.e. it survives `filter` unchanged
/// and has the full OTP length.
pub fn validate(code: &str) -> bool {
    code.len() == OTP_LENGTH && code.chars().all(|c| c.is_ascii_digit())
}
