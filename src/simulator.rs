// Simulator — random event traces against the header renderer.
// Each step picks an applicable event at random, renders, and checks the invariants.

use chrono::{DateTime, Utc};
use rand::seq::SliceRandom;
use rand::Rng;
use tracing::{info, warn};

use crate::constants::*;
use crate::display::render;
use crate::events::apply_event;
use crate::invariants;
use crate::logic::Thresholds;
use crate::types::*;

/// 2024-01-01T00:00:00Z, the reference time every trace starts from.
pub const SIM_START_TIMESTAMP: i64 = 1_704_067_200;

/// The kinds of event the simulator can choose from.
#[derive(Debug, Clone, Copy)]
pub enum EventKind {
    Tick,
    ReservoirReading,
    ReservoirOverfull,
    ReservoirLost,
    BatteryReading,
    BatteryLost,
    PodActivated,
    PodDeactivated,
    Highlight,
    ClearHighlight,
    PumpRemoved,
}

const ALL_EVENT_KINDS: &[EventKind] = &[
    EventKind::Tick,
    EventKind::ReservoirReading,
    EventKind::ReservoirOverfull,
    EventKind::ReservoirLost,
    EventKind::BatteryReading,
    EventKind::BatteryLost,
    EventKind::PodActivated,
    EventKind::PodDeactivated,
    EventKind::Highlight,
    EventKind::ClearHighlight,
    EventKind::PumpRemoved,
];

/// Every trace starts with no pump paired.
pub fn init_snapshot() -> PumpSnapshot {
    let start = DateTime::<Utc>::from_timestamp(SIM_START_TIMESTAMP, 0).unwrap_or_default();
    PumpSnapshot::unpaired(start)
}

fn pick<T: Copy + Default>(items: &[T], rng: &mut impl Rng) -> T {
    items.choose(rng).copied().unwrap_or_default()
}

/// Resolve an event kind into a concrete event with random parameters.
fn resolve_event(kind: EventKind, rng: &mut impl Rng) -> StatusEvent {
    match kind {
        EventKind::Tick => StatusEvent::Tick {
            secs: pick(TICK_SECONDS, rng),
        },
        EventKind::ReservoirReading => StatusEvent::ReservoirReading {
            units: pick(RESERVOIR_READINGS, rng),
        },
        EventKind::ReservoirOverfull => StatusEvent::ReservoirOverfull,
        EventKind::ReservoirLost => StatusEvent::ReservoirLost,
        EventKind::BatteryReading => StatusEvent::BatteryReading {
            percent: pick(BATTERY_LEVELS, rng),
            display: rng.gen_bool(0.7),
        },
        EventKind::BatteryLost => StatusEvent::BatteryLost,
        EventKind::PodActivated => StatusEvent::PodActivated {
            lifetime_secs: pick(POD_LIFETIMES, rng),
        },
        EventKind::PodDeactivated => StatusEvent::PodDeactivated,
        EventKind::Highlight => StatusEvent::Highlight {
            message: pick(HIGHLIGHT_MESSAGES, rng).to_string(),
        },
        EventKind::ClearHighlight => StatusEvent::ClearHighlight,
        EventKind::PumpRemoved => StatusEvent::PumpRemoved,
    }
}

/// Execute a single random step. Event kinds are shuffled and tried in turn
/// until one applies; if none does the snapshot is unchanged.
pub fn step(snapshot: &PumpSnapshot, rng: &mut impl Rng) -> (StatusEvent, PumpSnapshot) {
    let mut kinds: Vec<EventKind> = ALL_EVENT_KINDS.to_vec();
    kinds.shuffle(rng);

    for kind in &kinds {
        let event = resolve_event(*kind, rng);
        let result = apply_event(snapshot, &event);
        if result.applied {
            return (event, result.snapshot);
        }
    }

    (StatusEvent::NoEvent, snapshot.clone())
}

/// An invariant violation found while simulating.
pub struct Violation {
    pub invariant: &'static str,
    pub step: usize,
    pub snapshot: PumpSnapshot,
    pub status: HeaderStatus,
}

/// Result of running one simulation trace.
pub struct TraceResult {
    pub steps: usize,
    pub violation: Option<Violation>,
    pub final_snapshot: PumpSnapshot,
}

/// Run a single trace for up to `max_steps`, checking the invariants after each step.
pub fn run_trace(
    max_steps: usize,
    thresholds: &Thresholds,
    rng: &mut impl Rng,
    verbose: bool,
) -> TraceResult {
    let mut snapshot = init_snapshot();
    let mut status = render(&snapshot, thresholds);

    if verbose {
        println!("[State 0] init");
        println!("{}", snapshot);
        println!("{}\n", status);
    }

    if let Err(violated) = invariants::check_invariants(&snapshot, &status) {
        return TraceResult {
            steps: 0,
            violation: Some(Violation {
                invariant: violated,
                step: 0,
                snapshot: snapshot.clone(),
                status,
            }),
            final_snapshot: snapshot,
        };
    }

    for step_num in 1..=max_steps {
        let (event, next_snapshot) = step(&snapshot, rng);
        let next_status = render(&next_snapshot, thresholds);

        if verbose && next_snapshot != snapshot {
            println!("[State {}] {}", step_num, event);
            println!("{}", next_snapshot);
            println!("{}\n", next_status);
        }

        let checked = invariants::check_invariants(&next_snapshot, &next_status)
            .and_then(|_| invariants::check_step(&status, &event, &next_status));

        snapshot = next_snapshot;
        status = next_status;

        if let Err(violated) = checked {
            warn!(invariant = violated, step = step_num, "invariant violated");
            return TraceResult {
                steps: step_num,
                violation: Some(Violation {
                    invariant: violated,
                    step: step_num,
                    snapshot: snapshot.clone(),
                    status,
                }),
                final_snapshot: snapshot,
            };
        }
    }

    TraceResult {
        steps: max_steps,
        violation: None,
        final_snapshot: snapshot,
    }
}

/// Run many seeded traces, stopping at the first violation.
pub fn run_simulation(
    max_steps: usize,
    max_samples: usize,
    seed: u64,
    thresholds: &Thresholds,
    verbose: bool,
) -> SimulationResult {
    use rand::SeedableRng;
    let mut rng = rand::rngs::StdRng::seed_from_u64(seed);

    let start = std::time::Instant::now();
    let mut violation = None;

    for trace_num in 0..max_samples {
        let result = run_trace(max_steps, thresholds, &mut rng, verbose && trace_num == 0);

        if let Some(v) = result.violation {
            violation = Some((trace_num, v));
            break;
        }
    }

    let elapsed = start.elapsed();
    info!(
        max_steps,
        max_samples,
        seed,
        elapsed_ms = elapsed.as_millis() as u64,
        violated = violation.is_some(),
        "simulation finished"
    );

    SimulationResult {
        max_steps,
        max_samples,
        seed,
        elapsed,
        violation,
    }
}

pub struct SimulationResult {
    pub max_steps: usize,
    pub max_samples: usize,
    pub seed: u64,
    pub elapsed: std::time::Duration,
    /// Trace index and the violation found in it.
    pub violation: Option<(usize, Violation)>,
}

impl std::fmt::Display for SimulationResult {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let traces_per_sec = self.max_samples as f64 / self.elapsed.as_secs_f64().max(1e-9);
        writeln!(f)?;
        match &self.violation {
            None => {
                writeln!(
                    f,
                    "[ok] No violation found ({:.0}ms at {:.0} traces/second).",
                    self.elapsed.as_millis(),
                    traces_per_sec,
                )?;
                writeln!(
                    f,
                    "Checked {} traces of {} steps each.",
                    self.max_samples, self.max_steps,
                )?;
            }
            Some((trace, v)) => {
                writeln!(
                    f,
                    "[VIOLATION] Invariant '{}' violated at trace {} step {}.",
                    v.invariant, trace, v.step,
                )?;
                writeln!(f, "Snapshot at violation:")?;
                writeln!(f, "{}", v.snapshot)?;
                writeln!(f, "Rendered:")?;
                writeln!(f, "{}", v.status)?;
            }
        }
        writeln!(f, "Seed: {} ", self.seed)
    }
}
