// Display selection — decides which readouts the header shows for a snapshot.

use tracing::debug;

use crate::logic::{battery_text, format_remaining, remaining_seconds, reservoir_text, Thresholds};
use crate::types::*;

/// Render a snapshot into the header status.
///
/// A highlight message suppresses everything else. Without a reservoir or a
/// battery record the "add pump" placeholder shows. Otherwise each readout
/// is independent, except that the battery is hidden while a pod timer is
/// running and when the pump asks not to display it.
pub fn render(snapshot: &PumpSnapshot, thresholds: &Thresholds) -> HeaderStatus {
    if let Some(message) = &snapshot.highlight {
        debug!(%message, "highlight message overrides pump readouts");
        return HeaderStatus::Message(message.clone());
    }

    if snapshot.reservoir.is_none() && snapshot.battery.is_none() {
        debug!("no reservoir or battery, showing placeholder");
        return HeaderStatus::NoPump;
    }

    let reservoir = snapshot.reservoir.map(|r| Slot {
        severity: Some(thresholds.reservoir_severity(r)),
        text: reservoir_text(r),
    });

    let battery = match snapshot.battery {
        Some(battery) if battery.display && snapshot.expires_at.is_none() => Some(Slot {
            severity: battery.percent.map(|p| thresholds.battery_severity(p)),
            text: battery_text(&battery),
        }),
        _ => None,
    };

    let timer = snapshot.expires_at.map(|expires_at| {
        let secs = remaining_seconds(expires_at, snapshot.now);
        Slot {
            severity: Some(thresholds.expiry_severity(secs)),
            text: format_remaining(secs),
        }
    });

    HeaderStatus::Slots(StatusSlots {
        reservoir,
        battery,
        timer,
    })
}
