// Constants — default thresholds, display tokens and simulator selection sets.

use crate::types::{Seconds, Units};

// Reservoir thresholds (insulin units, inclusive upper bounds)
pub const RESERVOIR_CRITICAL: Units = 10.0;
pub const RESERVOIR_WARNING: Units = 30.0;

// Battery thresholds (percent, inclusive upper bounds)
pub const BATTERY_CRITICAL: f64 = 10.0;
pub const BATTERY_WARNING: f64 = 20.0;

// Pod expiry thresholds (seconds remaining, inclusive upper bounds)
pub const EXPIRY_CRITICAL: Seconds = 8 * SECONDS_PER_HOUR; // 8 hours
pub const EXPIRY_WARNING: Seconds = SECONDS_PER_DAY; // 24 hours

pub const SECONDS_PER_MINUTE: Seconds = 60;
pub const SECONDS_PER_HOUR: Seconds = 60 * SECONDS_PER_MINUTE;
pub const SECONDS_PER_DAY: Seconds = 24 * SECONDS_PER_HOUR;

/// Raw reservoir reading some pumps report when the reservoir holds more
/// than they can measure precisely.
pub const RESERVOIR_OVERFULL_SENTINEL: Units = 0xDEAD_BEEF_u32 as Units;

// Display tokens; localization happens in the rendering layer
pub const EXPIRED_TOKEN: &str = "expired";
pub const OVERFULL_TEXT: &str = "50+ U";
pub const UNIT_SUFFIX: &str = " U";
pub const PERCENT_SUFFIX: &str = " %";

/// Percent shown when a battery record carries no level.
pub const BATTERY_PERCENT_FALLBACK: f64 = 100.0;

// Selection sets for the simulator
pub const RESERVOIR_READINGS: &[Units] = &[0.0, 4.5, 10.0, 10.4, 22.0, 30.0, 30.5, 45.0, 120.0, 200.0];
pub const BATTERY_LEVELS: &[Option<u8>] = &[None, Some(0), Some(5), Some(10), Some(15), Some(20), Some(21), Some(60), Some(100)];
pub const TICK_SECONDS: &[Seconds] = &[59, 60, 300, 3_600, 4 * 3_600, 8 * 3_600, 86_400];
pub const POD_LIFETIMES: &[Seconds] = &[30, 3_600, 8 * 3_600, 24 * 3_600, 72 * 3_600, 80 * 3_600];
pub const HIGHLIGHT_MESSAGES: &[&str] = &["Insulin suspended", "Pump error", "Pump not responding"];
