// Snapshot updates — one pure function per status event.
// Each returns whether the event applied; inapplicable events leave the snapshot as is.

use tracing::trace;

use crate::logic::offset_by_seconds;
use crate::types::*;

fn unchanged(snapshot: &PumpSnapshot) -> EventResult {
    EventResult {
        applied: false,
        snapshot: snapshot.clone(),
    }
}

fn applied(snapshot: PumpSnapshot) -> EventResult {
    EventResult {
        applied: true,
        snapshot,
    }
}

/// Advance the reference clock. Only forward ticks that stay within the
/// representable date range apply.
pub fn tick(snapshot: &PumpSnapshot, secs: Seconds) -> EventResult {
    if secs <= 0 {
        return unchanged(snapshot);
    }
    match offset_by_seconds(snapshot.now, secs) {
        Some(now) => applied(PumpSnapshot {
            now,
            ..snapshot.clone()
        }),
        None => unchanged(snapshot),
    }
}

/// A new reservoir reading arrives; the overfull sentinel maps to `Overfull`.
pub fn reservoir_reading(snapshot: &PumpSnapshot, units: Units) -> EventResult {
    match Reservoir::from_units(units) {
        Ok(reservoir) => applied(PumpSnapshot {
            reservoir: Some(reservoir),
            ..snapshot.clone()
        }),
        Err(_) => unchanged(snapshot),
    }
}

pub fn reservoir_overfull(snapshot: &PumpSnapshot) -> EventResult {
    applied(PumpSnapshot {
        reservoir: Some(Reservoir::Overfull),
        ..snapshot.clone()
    })
}

pub fn reservoir_lost(snapshot: &PumpSnapshot) -> EventResult {
    if snapshot.reservoir.is_none() {
        return unchanged(snapshot);
    }
    applied(PumpSnapshot {
        reservoir: None,
        ..snapshot.clone()
    })
}

pub fn battery_reading(snapshot: &PumpSnapshot, percent: Option<u8>, display: bool) -> EventResult {
    match Battery::new(percent.map(f64::from), display) {
        Ok(battery) => applied(PumpSnapshot {
            battery: Some(battery),
            ..snapshot.clone()
        }),
        Err(_) => unchanged(snapshot),
    }
}

pub fn battery_lost(snapshot: &PumpSnapshot) -> EventResult {
    if snapshot.battery.is_none() {
        return unchanged(snapshot);
    }
    applied(PumpSnapshot {
        battery: None,
        ..snapshot.clone()
    })
}

/// A fresh pod starts its countdown at the current reference time.
pub fn pod_activated(snapshot: &PumpSnapshot, lifetime_secs: Seconds) -> EventResult {
    if lifetime_secs <= 0 {
        return unchanged(snapshot);
    }
    match offset_by_seconds(snapshot.now, lifetime_secs) {
        Some(expires_at) => applied(PumpSnapshot {
            expires_at: Some(expires_at),
            ..snapshot.clone()
        }),
        None => unchanged(snapshot),
    }
}

pub fn pod_deactivated(snapshot: &PumpSnapshot) -> EventResult {
    if snapshot.expires_at.is_none() {
        return unchanged(snapshot);
    }
    applied(PumpSnapshot {
        expires_at: None,
        ..snapshot.clone()
    })
}

pub fn highlight(snapshot: &PumpSnapshot, message: &str) -> EventResult {
    if message.is_empty() {
        return unchanged(snapshot);
    }
    applied(PumpSnapshot {
        highlight: Some(message.to_string()),
        ..snapshot.clone()
    })
}

pub fn clear_highlight(snapshot: &PumpSnapshot) -> EventResult {
    if snapshot.highlight.is_none() {
        return unchanged(snapshot);
    }
    applied(PumpSnapshot {
        highlight: None,
        ..snapshot.clone()
    })
}

/// Unpair the pump; the clock keeps running.
pub fn pump_removed(snapshot: &PumpSnapshot) -> EventResult {
    if snapshot.reservoir.is_none() && snapshot.battery.is_none() && snapshot.expires_at.is_none() {
        return unchanged(snapshot);
    }
    applied(PumpSnapshot {
        highlight: snapshot.highlight.clone(),
        ..PumpSnapshot::unpaired(snapshot.now)
    })
}

/// Dispatch a labelled event to its update function.
pub fn apply_event(snapshot: &PumpSnapshot, event: &StatusEvent) -> EventResult {
    trace!(%event, "applying status event");
    match event {
        StatusEvent::NoEvent => applied(snapshot.clone()),
        StatusEvent::Tick { secs } => tick(snapshot, *secs),
        StatusEvent::ReservoirReading { units } => reservoir_reading(snapshot, *units),
        StatusEvent::ReservoirOverfull => reservoir_overfull(snapshot),
        StatusEvent::ReservoirLost => reservoir_lost(snapshot),
        StatusEvent::BatteryReading { percent, display } => {
            battery_reading(snapshot, *percent, *display)
        }
        StatusEvent::BatteryLost => battery_lost(snapshot),
        StatusEvent::PodActivated { lifetime_secs } => pod_activated(snapshot, *lifetime_secs),
        StatusEvent::PodDeactivated => pod_deactivated(snapshot),
        StatusEvent::Highlight { message } => highlight(snapshot, message),
        StatusEvent::ClearHighlight => clear_highlight(snapshot),
        StatusEvent::PumpRemoved => pump_removed(snapshot),
    }
}
