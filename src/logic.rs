// Pure functions — severity thresholds and readout text.
// Nothing here reads the clock; the caller passes the reference time in.

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

use crate::constants::*;
use crate::types::*;

/// Two inclusive upper bounds splitting a scale into three severities:
/// `value <= critical` is Critical, `value <= warning` is Warning, anything
/// above is Normal.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Bands<T> {
    pub critical: T,
    pub warning: T,
}

impl<T: PartialOrd + Copy> Bands<T> {
    pub fn classify(&self, value: T) -> Severity {
        if value <= self.critical {
            Severity::Critical
        } else if value <= self.warning {
            Severity::Warning
        } else {
            Severity::Normal
        }
    }
}

/// Severity bands for every readout, tunable per device type.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Thresholds {
    pub reservoir: Bands<Units>,
    pub battery: Bands<f64>,
    pub expiry: Bands<Seconds>,
}

impl Default for Thresholds {
    fn default() -> Self {
        Thresholds {
            reservoir: Bands {
                critical: RESERVOIR_CRITICAL,
                warning: RESERVOIR_WARNING,
            },
            battery: Bands {
                critical: BATTERY_CRITICAL,
                warning: BATTERY_WARNING,
            },
            expiry: Bands {
                critical: EXPIRY_CRITICAL,
                warning: EXPIRY_WARNING,
            },
        }
    }
}

impl Thresholds {
    pub fn reservoir_severity(&self, reservoir: Reservoir) -> Severity {
        match reservoir {
            Reservoir::Amount(units) if !is_overfull(reservoir) => self.reservoir.classify(units),
            _ => Severity::Normal,
        }
    }

    pub fn battery_severity(&self, percent: f64) -> Severity {
        self.battery.classify(percent)
    }

    pub fn expiry_severity(&self, secs_remaining: Seconds) -> Severity {
        self.expiry.classify(secs_remaining)
    }
}

/// At most 10 U is Critical, at most 30 U is Warning, anything above is Normal.
pub fn classify_reservoir(units: Units) -> Severity {
    Thresholds::default().reservoir_severity(Reservoir::Amount(units))
}

/// True for `Overfull` and for a raw amount still carrying the sentinel.
fn is_overfull(reservoir: Reservoir) -> bool {
    match reservoir {
        Reservoir::Overfull => true,
        Reservoir::Amount(units) => units == RESERVOIR_OVERFULL_SENTINEL,
    }
}

/// At most 10 % is Critical, at most 20 % is Warning, anything above is Normal.
pub fn classify_battery(percent: f64) -> Severity {
    Thresholds::default().battery_severity(percent)
}

/// At most 8 hours left is Critical (including already expired), at most
/// 24 hours is Warning, anything above is Normal.
pub fn classify_expiry(secs_remaining: Seconds) -> Severity {
    Thresholds::default().expiry_severity(secs_remaining)
}

/// Compact remaining-time text for the pod timer.
///
/// Whole days, hours and minutes are split off by floor division. Days show
/// as `"{d}d {h}h"`, otherwise hours as `"{h}h"` (minutes dropped), otherwise
/// `"{m}m"`, which reads `"0m"` in the last minute. Zero or negative time
/// yields [`EXPIRED_TOKEN`].
pub fn format_remaining(secs_remaining: Seconds) -> String {
    if secs_remaining <= 0 {
        return EXPIRED_TOKEN.to_string();
    }

    let mut rest = secs_remaining;
    let days = rest / SECONDS_PER_DAY;
    rest -= days * SECONDS_PER_DAY;
    let hours = rest / SECONDS_PER_HOUR;
    rest -= hours * SECONDS_PER_HOUR;
    let minutes = rest / SECONDS_PER_MINUTE;

    if days >= 1 {
        format!("{}d {}h", days, hours)
    } else if hours >= 1 {
        format!("{}h", hours)
    } else {
        format!("{}m", minutes)
    }
}

/// Seconds from `now` until `expires_at`, with any positive fraction rounded
/// up so a pod that is still valid never reads as expired. Negative once expired.
pub fn remaining_seconds(expires_at: DateTime<Utc>, now: DateTime<Utc>) -> Seconds {
    let delta = expires_at.signed_duration_since(now);
    let secs = delta.num_seconds();
    if secs >= 0 && delta.subsec_nanos() > 0 {
        secs + 1
    } else {
        secs
    }
}

/// `at` shifted by `secs`, or `None` when the result leaves chrono's range.
pub fn offset_by_seconds(at: DateTime<Utc>, secs: Seconds) -> Option<DateTime<Utc>> {
    Duration::try_seconds(secs).and_then(|d| at.checked_add_signed(d))
}

/// `"50+ U"` for an overfull reservoir, otherwise the amount rounded to
/// whole units (ties to even) followed by `" U"`.
pub fn reservoir_text(reservoir: Reservoir) -> String {
    match reservoir {
        Reservoir::Amount(units) if !is_overfull(reservoir) => {
            format!("{}{}", units.round_ties_even() as i64, UNIT_SUFFIX)
        }
        _ => OVERFULL_TEXT.to_string(),
    }
}

/// Percent truncated to an integer followed by `" %"`; a battery without a
/// level reads as full.
pub fn battery_text(battery: &Battery) -> String {
    let percent = battery.percent.unwrap_or(BATTERY_PERCENT_FALLBACK);
    format!("{}{}", percent.trunc() as i64, PERCENT_SUFFIX)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_classify_reservoir() {
        assert_eq!(classify_reservoir(0.0), Severity::Critical);
        assert_eq!(classify_reservoir(10.0), Severity::Critical);
        assert_eq!(classify_reservoir(10.01), Severity::Warning);
        assert_eq!(classify_reservoir(30.0), Severity::Warning);
        assert_eq!(classify_reservoir(30.5), Severity::Normal);
        assert_eq!(classify_reservoir(200.0), Severity::Normal);
        // Out-of-domain input still gets a severity
        assert_eq!(classify_reservoir(-3.0), Severity::Critical);
    }

    #[test]
    fn test_overfull_is_normal() {
        assert_eq!(classify_reservoir(RESERVOIR_OVERFULL_SENTINEL), Severity::Normal);
        let t = Thresholds::default();
        assert_eq!(t.reservoir_severity(Reservoir::Overfull), Severity::Normal);
    }

    #[test]
    fn test_raw_sentinel_amount_agrees() {
        let raw = Reservoir::Amount(RESERVOIR_OVERFULL_SENTINEL);
        assert_eq!(reservoir_text(raw), "50+ U");
        assert_eq!(Thresholds::default().reservoir_severity(raw), Severity::Normal);
    }

    #[test]
    fn test_classify_battery() {
        assert_eq!(classify_battery(0.0), Severity::Critical);
        assert_eq!(classify_battery(10.0), Severity::Critical);
        assert_eq!(classify_battery(11.0), Severity::Warning);
        assert_eq!(classify_battery(20.0), Severity::Warning);
        assert_eq!(classify_battery(20.5), Severity::Normal);
        assert_eq!(classify_battery(100.0), Severity::Normal);
    }

    #[test]
    fn test_classify_expiry() {
        assert_eq!(classify_expiry(-100), Severity::Critical);
        assert_eq!(classify_expiry(0), Severity::Critical);
        assert_eq!(classify_expiry(28_800), Severity::Critical);
        assert_eq!(classify_expiry(28_801), Severity::Warning);
        assert_eq!(classify_expiry(86_400), Severity::Warning);
        assert_eq!(classify_expiry(86_401), Severity::Normal);
    }

    #[test]
    fn test_format_remaining_expired() {
        assert_eq!(format_remaining(0), "expired");
        assert_eq!(format_remaining(-100), "expired");
    }

    #[test]
    fn test_format_remaining_tiers() {
        assert_eq!(format_remaining(59), "0m");
        assert_eq!(format_remaining(60), "1m");
        assert_eq!(format_remaining(3_599), "59m");
        assert_eq!(format_remaining(3_600), "1h");
        // Minutes are dropped in the hours tier
        assert_eq!(format_remaining(2 * 3_600 + 59 * 60), "2h");
        assert_eq!(format_remaining(86_399), "23h");
    }

    #[test]
    fn test_format_remaining_days() {
        // Exactly 24h lands in the days branch
        assert_eq!(format_remaining(86_400), "1d 0h");
        // 1d 1h 1m 1s
        assert_eq!(format_remaining(90_061), "1d 1h");
        assert_eq!(format_remaining(3 * 86_400 + 23 * 3_600 + 3_599), "3d 23h");
    }

    #[test]
    fn test_custom_bands() {
        let t = Thresholds {
            expiry: Bands {
                critical: 3_600,
                warning: 4 * 3_600,
            },
            ..Thresholds::default()
        };
        assert_eq!(t.expiry_severity(3_600), Severity::Critical);
        assert_eq!(t.expiry_severity(7_200), Severity::Warning);
        assert_eq!(t.expiry_severity(28_800), Severity::Normal);
    }

    #[test]
    fn test_remaining_seconds() {
        let now = Utc.with_ymd_and_hms(2024, 3, 1, 12, 0, 0).unwrap();
        assert_eq!(remaining_seconds(now + Duration::hours(2), now), 7_200);
        assert_eq!(remaining_seconds(now - Duration::minutes(1), now), -60);
    }

    #[test]
    fn test_sub_second_remaining_rounds_up() {
        let now = Utc.with_ymd_and_hms(2024, 3, 1, 12, 0, 0).unwrap();
        let half = Duration::milliseconds(500);
        assert_eq!(remaining_seconds(now + half, now), 1);
        assert_eq!(format_remaining(remaining_seconds(now + half, now)), "0m");
        assert_eq!(remaining_seconds(now + Duration::nanoseconds(1), now), 1);
        // Still Warning half a second past the 8h boundary
        let remaining = remaining_seconds(now + Duration::seconds(28_800) + half, now);
        assert_eq!(classify_expiry(remaining), Severity::Warning);
        // Already expired stays expired
        assert_eq!(remaining_seconds(now - half, now), 0);
        assert_eq!(remaining_seconds(now, now), 0);
    }

    #[test]
    fn test_offset_by_seconds_out_of_range() {
        let now = Utc.with_ymd_and_hms(2024, 3, 1, 12, 0, 0).unwrap();
        assert_eq!(offset_by_seconds(now, 60), Some(now + Duration::minutes(1)));
        assert_eq!(offset_by_seconds(now, i64::MAX), None);
        assert_eq!(offset_by_seconds(now, i64::MAX / 1000), None);
        assert_eq!(offset_by_seconds(now, i64::MIN / 1000), None);
    }

    #[test]
    fn test_reservoir_text() {
        assert_eq!(reservoir_text(Reservoir::Overfull), "50+ U");
        assert_eq!(reservoir_text(Reservoir::Amount(40.0)), "40 U");
        assert_eq!(reservoir_text(Reservoir::Amount(12.6)), "13 U");
        assert_eq!(reservoir_text(Reservoir::Amount(2.5)), "2 U");
        assert_eq!(reservoir_text(Reservoir::Amount(0.0)), "0 U");
    }

    #[test]
    fn test_battery_text() {
        let b = Battery {
            percent: Some(49.9),
            display: true,
        };
        assert_eq!(battery_text(&b), "49 %");
        let unknown = Battery {
            percent: None,
            display: true,
        };
        assert_eq!(battery_text(&unknown), "100 %");
    }
}
