// Display invariants — properties every rendered header must satisfy.

use crate::constants::{EXPIRED_TOKEN, OVERFULL_TEXT};
use crate::types::*;

fn slots(status: &HeaderStatus) -> Option<&StatusSlots> {
    match status {
        HeaderStatus::Slots(slots) => Some(slots),
        _ => None,
    }
}

/// A highlight message is shown verbatim and alone.
pub fn highlight_preempts(snapshot: &PumpSnapshot, status: &HeaderStatus) -> bool {
    match &snapshot.highlight {
        Some(message) => *status == HeaderStatus::Message(message.clone()),
        None => !matches!(status, HeaderStatus::Message(_)),
    }
}

/// The placeholder shows exactly when there is neither reservoir nor battery.
pub fn placeholder_without_device(snapshot: &PumpSnapshot, status: &HeaderStatus) -> bool {
    if snapshot.highlight.is_some() {
        return true;
    }
    let no_device = snapshot.reservoir.is_none() && snapshot.battery.is_none();
    no_device == (*status == HeaderStatus::NoPump)
}

/// A running pod timer takes the battery's place.
pub fn battery_hidden_while_timer(snapshot: &PumpSnapshot, status: &HeaderStatus) -> bool {
    match slots(status) {
        Some(slots) if snapshot.expires_at.is_some() => slots.battery.is_none(),
        _ => true,
    }
}

/// Batteries flagged as not displayable never show.
pub fn battery_hidden_when_not_displayed(snapshot: &PumpSnapshot, status: &HeaderStatus) -> bool {
    match (slots(status), snapshot.battery) {
        (Some(slots), Some(battery)) if !battery.display => slots.battery.is_none(),
        _ => true,
    }
}

pub fn expired_timer_is_critical(_snapshot: &PumpSnapshot, status: &HeaderStatus) -> bool {
    match slots(status).and_then(|s| s.timer.as_ref()) {
        Some(timer) if timer.text == EXPIRED_TOKEN => timer.severity == Some(Severity::Critical),
        _ => true,
    }
}

pub fn overfull_reads_fifty_plus(snapshot: &PumpSnapshot, status: &HeaderStatus) -> bool {
    match (slots(status), snapshot.reservoir) {
        (Some(slots), Some(Reservoir::Overfull)) => {
            slots.reservoir
                == Some(Slot {
                    severity: Some(Severity::Normal),
                    text: OVERFULL_TEXT.to_string(),
                })
        }
        _ => true,
    }
}

/// Every present measurement carries a severity; only a battery without a
/// level renders neutral.
pub fn readings_carry_severity(snapshot: &PumpSnapshot, status: &HeaderStatus) -> bool {
    let Some(slots) = slots(status) else {
        return true;
    };
    let reservoir_ok = slots
        .reservoir
        .as_ref()
        .map_or(true, |slot| slot.severity.is_some());
    let timer_ok = slots
        .timer
        .as_ref()
        .map_or(true, |slot| slot.severity.is_some());
    let battery_ok = match (&slots.battery, snapshot.battery) {
        (Some(slot), Some(battery)) => slot.severity.is_some() == battery.percent.is_some(),
        (Some(_), None) => false,
        (None, _) => true,
    };
    reservoir_ok && timer_ok && battery_ok
}

/// All per-render invariants with names for reporting.
pub const ALL_INVARIANTS: &[(&str, fn(&PumpSnapshot, &HeaderStatus) -> bool)] = &[
    ("highlightPreempts", highlight_preempts),
    ("placeholderWithoutDevice", placeholder_without_device),
    ("batteryHiddenWhileTimer", battery_hidden_while_timer),
    ("batteryHiddenWhenNotDisplayed", battery_hidden_when_not_displayed),
    ("expiredTimerIsCritical", expired_timer_is_critical),
    ("overfullReadsFiftyPlus", overfull_reads_fifty_plus),
    ("readingsCarrySeverity", readings_carry_severity),
];

/// Check all invariants and return the name of the first violated one, if any.
pub fn check_invariants(snapshot: &PumpSnapshot, status: &HeaderStatus) -> Result<(), &'static str> {
    for (name, check) in ALL_INVARIANTS {
        if !check(snapshot, status) {
            return Err(*name);
        }
    }
    Ok(())
}

/// Letting time pass never makes the pod timer less urgent.
pub fn tick_never_relaxes_timer(
    before: &HeaderStatus,
    event: &StatusEvent,
    after: &HeaderStatus,
) -> bool {
    if !matches!(event, StatusEvent::Tick { .. }) {
        return true;
    }
    let severity = |status: &HeaderStatus| {
        slots(status)
            .and_then(|s| s.timer.as_ref())
            .and_then(|t| t.severity)
    };
    match (severity(before), severity(after)) {
        (Some(b), Some(a)) => a.rank() <= b.rank(),
        _ => true,
    }
}

/// Check the step invariant for one transition.
pub fn check_step(
    before: &HeaderStatus,
    event: &StatusEvent,
    after: &HeaderStatus,
) -> Result<(), &'static str> {
    if tick_never_relaxes_timer(before, event, after) {
        Ok(())
    } else {
        Err("tickNeverRelaxesTimer")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::display::render;
    use crate::logic::Thresholds;
    use chrono::{Duration, TimeZone, Utc};

    fn snapshot() -> PumpSnapshot {
        PumpSnapshot {
            reservoir: Some(Reservoir::Overfull),
            battery: Some(Battery {
                percent: Some(15.0),
                display: true,
            }),
            ..PumpSnapshot::unpaired(Utc.with_ymd_and_hms(2024, 5, 1, 0, 0, 0).unwrap())
        }
    }

    #[test]
    fn test_rendered_status_satisfies_invariants() {
        let s = snapshot();
        let status = render(&s, &Thresholds::default());
        assert_eq!(check_invariants(&s, &status), Ok(()));
    }

    #[test]
    fn test_detects_battery_shown_with_timer() {
        let s = PumpSnapshot {
            expires_at: Some(snapshot().now + Duration::hours(3)),
            ..snapshot()
        };
        let bogus = HeaderStatus::Slots(StatusSlots {
            reservoir: None,
            battery: Some(Slot {
                severity: Some(Severity::Warning),
                text: "15 %".to_string(),
            }),
            timer: None,
        });
        assert!(!battery_hidden_while_timer(&s, &bogus));
    }

    #[test]
    fn test_detects_missing_placeholder() {
        let s = PumpSnapshot::unpaired(snapshot().now);
        let bogus = HeaderStatus::Slots(StatusSlots::default());
        assert_eq!(check_invariants(&s, &bogus), Err("placeholderWithoutDevice"));
    }

    #[test]
    fn test_tick_step_invariant() {
        let critical = HeaderStatus::Slots(StatusSlots {
            timer: Some(Slot {
                severity: Some(Severity::Critical),
                text: "1h".to_string(),
            }),
            ..StatusSlots::default()
        });
        let normal = HeaderStatus::Slots(StatusSlots {
            timer: Some(Slot {
                severity: Some(Severity::Normal),
                text: "2d 0h".to_string(),
            }),
            ..StatusSlots::default()
        });
        let tick = StatusEvent::Tick { secs: 60 };
        assert!(check_step(&normal, &tick, &critical).is_ok());
        assert_eq!(check_step(&critical, &tick, &normal), Err("tickNeverRelaxesTimer"));
        // A new pod may legitimately relax the timer
        let pod = StatusEvent::PodActivated {
            lifetime_secs: 72 * 3_600,
        };
        assert!(check_step(&critical, &pod, &normal).is_ok());
    }
}
