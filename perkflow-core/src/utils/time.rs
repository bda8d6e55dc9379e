// src/utils/time.rs

use chrono::{DateTime, Duration, Utc};

/// Time left until `expires_at`, clamped at zero. Pure function over injected
/// instants; the caller owns the periodic tick that re-evaluates it.
pub fn remaining(now: DateTime<Utc>, expires_at: DateTime<Utc>) -> Duration {
    let left = expires_at - now;
    if left < Duration::zero() {
        Duration::zero()
    } else {
        left
    }
}

/// Whether the OTP window has closed. The boundary instant itself counts as
/// expired: `now == expires_at` returns true.
pub fn is_expired(now: DateTime<Utc>, expires_at: DateTime<Utc>) -> bool {
    now >= expires_at
}

/// Renders a countdown as `MM:SS`, both parts zero-padded to two digits.
/// Minutes are not renormalized into hours: 99 minutes renders as "99:00".
pub fn format_remaining(left: Duration) -> String {
    let total = left.num_seconds().max(0);
    format!("{:02}:{:02}", total / 60, total % 60)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn at(secs: i64) -> DateTime<Utc> {
        Utc.timestamp_opt(1_700_000_000 + secs, 0).unwrap()
    }

    #[test]
    fn remaining_is_never_negative() {
        assert_eq!(remaining(at(500), at(0)), Duration::zero());
        assert_eq!(remaining(at(0), at(300)), Duration::seconds(300));
    }

    #[test]
    fn zero_remaining_iff_expired() {
        for (now, exp) in [(at(0), at(300)), (at(299), at(300)), (at(300), at(300)), (at(301), at(300))] {
            assert_eq!(remaining(now, exp) == Duration::zero(), is_expired(now, exp));
        }
    }

    #[test]
    fn expiry_boundary_counts_as_expired() {
        let exp = at(300);
        assert!(!is_expired(at(299), exp));
        assert!(is_expired(at(300), exp), "now == expires_at must be expired");
        assert!(is_expired(at(301), exp));
    }

    #[test]
    fn formats_zero_padded() {
        assert_eq!(format_remaining(Duration::seconds(0)), "00:00");
        assert_eq!(format_remaining(Duration::seconds(65)), "01:05");
        assert_eq!(format_remaining(Duration::seconds(299)), "04:59");
    }

    #[test]
    fn minutes_are_not_renormalized_into_hours() {
        assert_eq!(format_remaining(Duration::seconds(99 * 60 + 5)), "99:05");
        assert_eq!(format_remaining(Duration::minutes(120)), "120:00");
    }

    #[test]
    fn negative_duration_renders_as_zero() {
        assert_eq!(format_remaining(Duration::seconds(-30)), "00:00");
    }
}
