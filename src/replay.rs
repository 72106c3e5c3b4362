// Deterministic replay — applies a sequence of labelled events to a snapshot,
// rendering after each step and checking the display invariants.

use crate::display::render;
use crate::error::{Result, StatusError};
use crate::events::apply_event;
use crate::invariants;
use crate::logic::Thresholds;
use crate::types::*;

/// One replayed step: the event and what the header looked like afterwards.
#[derive(Debug, Clone)]
pub struct ReplayStep {
    pub event: StatusEvent,
    pub snapshot: PumpSnapshot,
    pub status: HeaderStatus,
}

/// Replay a full sequence of events starting from `init`.
/// Every event must apply and every render must satisfy the invariants;
/// the first failure is reported with its step index.
pub fn replay_events(
    init: PumpSnapshot,
    events: &[StatusEvent],
    thresholds: &Thresholds,
) -> Result<Vec<ReplayStep>> {
    let mut trace = Vec::with_capacity(events.len());
    let mut snapshot = init;
    let mut status = render(&snapshot, thresholds);

    for (i, event) in events.iter().enumerate() {
        let result = apply_event(&snapshot, event);
        if !result.applied {
            return Err(StatusError::replay(
                i,
                format!("event {} did not apply to snapshot:\n{}", event, snapshot),
            ));
        }

        let next = render(&result.snapshot, thresholds);
        if let Err(violated) = invariants::check_invariants(&result.snapshot, &next) {
            return Err(StatusError::replay(
                i,
                format!("invariant '{}' violated after {}", violated, event),
            ));
        }
        if let Err(violated) = invariants::check_step(&status, event, &next) {
            return Err(StatusError::replay(
                i,
                format!("invariant '{}' violated by {}", violated, event),
            ));
        }

        snapshot = result.snapshot;
        status = next;
        trace.push(ReplayStep {
            event: event.clone(),
            snapshot: snapshot.clone(),
            status: status.clone(),
        });
    }

    Ok(trace)
}
