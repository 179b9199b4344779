//! Cache freshness policy.

use chrono::{DateTime, Duration, Utc};

/// Whether a reading stamped at `timestamp` may still be served at `now`.
///
/// Fresh iff `now - timestamp <= ttl`. The boundary is inclusive, and a
/// timestamp in the future (negative age) counts as fresh.
pub fn is_fresh(timestamp: DateTime<Utc>, now: DateTime<Utc>, ttl: Duration) -> bool {
    now - timestamp <= ttl
}

#[cfg(test)]
mod tests {
    use super::*;

    fn at(s: &str) -> DateTime<Utc> {
        s.parse().unwrap()
    }

    #[test]
    fn test_within_ttl_is_fresh() {
        let now = at("2026-03-01T12:00:00Z");
        assert!(is_fresh(at("2026-03-01T11:45:00Z"), now, Duration::minutes(30)));
    }

    #[test]
    fn test_exact_boundary_is_fresh() {
        let now = at("2026-03-01T12:00:00Z");
        assert!(is_fresh(at("2026-03-01T11:30:00Z"), now, Duration::minutes(30)));
    }

    #[test]
    fn test_just_past_boundary_is_stale() {
        let now = at("2026-03-01T12:00:00Z");
        let ts = at("2026-03-01T11:30:00Z") - Duration::milliseconds(1);
        assert!(!is_fresh(ts, now, Duration::minutes(30)));
    }

    #[test]
    fn test_future_timestamp_is_fresh() {
        let now = at("2026-03-01T12:00:00Z");
        assert!(is_fresh(at("2026-03-01T13:00:00Z"), now, Duration::minutes(30)));
    }

    #[test]
    fn test_zero_ttl() {
        let now = at("2026-03-01T12:00:00Z");
        assert!(is_fresh(now, now, Duration::zero()));
        assert!(!is_fresh(now - Duration::seconds(1), now, Duration::zero()));
    }
}
