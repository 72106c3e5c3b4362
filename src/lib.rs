//! # pump-status
//!
//! Status readouts for an insulin pump header: severity classification of
//! reservoir, battery and pod expiry, compact remaining-time text, and the
//! rule deciding which readouts show together.
//!
//! - `logic`: classifiers, `format_remaining` and readout text
//! - `display`: renders a `PumpSnapshot` into a `HeaderStatus`
//! - `events`, `replay`, `simulator`: labelled snapshot updates, deterministic
//!   replay and random traces checked against `invariants`
//! - `config`, `logging`, `error`: the usual plumbing

pub mod config;
pub mod constants;
pub mod display;
pub mod error;
pub mod events;
pub mod invariants;
pub mod logging;
pub mod logic;
pub mod replay;
pub mod simulator;
pub mod types;

pub use config::Config;
pub use display::render;
pub use error::{Result, StatusError};
pub use logic::{classify_battery, classify_expiry, classify_reservoir, format_remaining, Thresholds};
pub use types::{Battery, HeaderStatus, PumpSnapshot, Reservoir, Severity};
