use pump_status::logic::{Bands, Thresholds};
use pump_status::simulator::run_simulation;

#[test]
fn seeded_simulation_finds_no_violation() {
    let result = run_simulation(30, 500, 7, &Thresholds::default(), false);
    assert!(result.violation.is_none());
    assert_eq!(result.seed, 7);
}

#[test]
fn simulation_holds_with_tuned_thresholds() {
    let thresholds = Thresholds {
        battery: Bands {
            critical: 5.0,
            warning: 50.0,
        },
        expiry: Bands {
            critical: 0,
            warning: 3_600,
        },
        ..Thresholds::default()
    };
    let result = run_simulation(25, 300, 99, &thresholds, false);
    assert!(result.violation.is_none());
}
