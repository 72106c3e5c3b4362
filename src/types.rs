// Types — value inputs handed over by the host app and the header status rendered from them.

use chrono::{DateTime, Utc};
use tracing::warn;

use crate::constants::RESERVOIR_OVERFULL_SENTINEL;
use crate::error::{Result, StatusError};

/// Insulin units, as reported by the pump.
pub type Units = f64;

/// Signed seconds; negative values lie in the past.
pub type Seconds = i64;

/// Urgency shared by the reservoir, battery and pod timer readouts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Severity {
    Critical,
    Warning,
    Normal,
}

impl Severity {
    /// Lower rank means more urgent.
    pub fn rank(self) -> u8 {
        match self {
            Severity::Critical => 0,
            Severity::Warning => 1,
            Severity::Normal => 2,
        }
    }
}

/// Insulin left in the reservoir.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Reservoir {
    Amount(Units),
    /// More than the pump can measure precisely.
    Overfull,
}

impl Reservoir {
    /// Build a reservoir reading from a raw pump value, mapping the overfull
    /// sentinel to [`Reservoir::Overfull`].
    pub fn from_units(units: Units) -> Result<Self> {
        if units == RESERVOIR_OVERFULL_SENTINEL {
            return Ok(Reservoir::Overfull);
        }
        if !units.is_finite() || units < 0.0 {
            warn!(units, "rejecting reservoir reading");
            return Err(StatusError::invalid_reading(format!(
                "reservoir amount must be a non-negative number, got {}",
                units
            )));
        }
        Ok(Reservoir::Amount(units))
    }
}

/// Battery record as the pump manager publishes it.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Battery {
    /// Charge level 0–100, when the pump reports one.
    pub percent: Option<f64>,
    /// False for pumps whose battery is not user-serviceable.
    pub display: bool,
}

impl Battery {
    pub fn new(percent: Option<f64>, display: bool) -> Result<Self> {
        if let Some(p) = percent {
            if !p.is_finite() || !(0.0..=100.0).contains(&p) {
                warn!(percent = p, "rejecting battery reading");
                return Err(StatusError::invalid_reading(format!(
                    "battery percent must be within 0..=100, got {}",
                    p
                )));
            }
        }
        Ok(Battery { percent, display })
    }
}

/// Everything the header needs for one render pass.
#[derive(Debug, Clone, PartialEq)]
pub struct PumpSnapshot {
    pub reservoir: Option<Reservoir>,
    pub battery: Option<Battery>,
    pub expires_at: Option<DateTime<Utc>>,
    /// Reference time for the pod timer; never read from the wall clock here.
    pub now: DateTime<Utc>,
    pub highlight: Option<String>,
}

impl PumpSnapshot {
    /// A snapshot with no pump paired.
    pub fn unpaired(now: DateTime<Utc>) -> Self {
        PumpSnapshot {
            reservoir: None,
            battery: None,
            expires_at: None,
            now,
            highlight: None,
        }
    }
}

/// One readout in the header: a tint and its text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Slot {
    /// `None` renders with the neutral tint.
    pub severity: Option<Severity>,
    pub text: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StatusSlots {
    pub reservoir: Option<Slot>,
    pub battery: Option<Slot>,
    pub timer: Option<Slot>,
}

/// What the header widget shows.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HeaderStatus {
    /// A highlight message replaces all readouts.
    Message(String),
    /// No reservoir and no battery: the "add pump" placeholder.
    NoPump,
    Slots(StatusSlots),
}

/// Labelled snapshot updates, so a sequence of them can be replayed.
#[derive(Debug, Clone, PartialEq)]
pub enum StatusEvent {
    NoEvent,
    Tick { secs: Seconds },
    ReservoirReading { units: Units },
    ReservoirOverfull,
    ReservoirLost,
    BatteryReading { percent: Option<u8>, display: bool },
    BatteryLost,
    PodActivated { lifetime_secs: Seconds },
    PodDeactivated,
    Highlight { message: String },
    ClearHighlight,
    PumpRemoved,
}

impl std::fmt::Display for StatusEvent {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            StatusEvent::NoEvent => write!(f, "NoEvent"),
            StatusEvent::Tick { secs } => write!(f, "Tick({}s)", secs),
            StatusEvent::ReservoirReading { units } => write!(f, "ReservoirReading({})", units),
            StatusEvent::ReservoirOverfull => write!(f, "ReservoirOverfull"),
            StatusEvent::ReservoirLost => write!(f, "ReservoirLost"),
            StatusEvent::BatteryReading { percent, display } => match percent {
                Some(p) => write!(f, "BatteryReading({}%, display={})", p, display),
                None => write!(f, "BatteryReading(-, display={})", display),
            },
            StatusEvent::BatteryLost => write!(f, "BatteryLost"),
            StatusEvent::PodActivated { lifetime_secs } => {
                write!(f, "PodActivated({}s)", lifetime_secs)
            }
            StatusEvent::PodDeactivated => write!(f, "PodDeactivated"),
            StatusEvent::Highlight { message } => write!(f, "Highlight({:?})", message),
            StatusEvent::ClearHighlight => write!(f, "ClearHighlight"),
            StatusEvent::PumpRemoved => write!(f, "PumpRemoved"),
        }
    }
}

/// Result of applying an event.
pub struct EventResult {
    pub applied: bool,
    pub snapshot: PumpSnapshot,
}

impl std::fmt::Display for Severity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:?}", self)
    }
}

impl std::fmt::Display for Slot {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self.severity {
            Some(severity) => write!(f, "[{}] {}", severity, self.text),
            None => write!(f, "[Neutral] {}", self.text),
        }
    }
}

impl std::fmt::Display for HeaderStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            HeaderStatus::Message(message) => write!(f, "  message:   {}", message),
            HeaderStatus::NoPump => write!(f, "  (add pump)"),
            HeaderStatus::Slots(slots) => {
                let rows = [
                    ("reservoir", &slots.reservoir),
                    ("battery", &slots.battery),
                    ("timer", &slots.timer),
                ];
                let mut first = true;
                for (name, slot) in rows {
                    if let Some(slot) = slot {
                        if !first {
                            writeln!(f)?;
                        }
                        write!(f, "  {:<10} {}", format!("{}:", name), slot)?;
                        first = false;
                    }
                }
                Ok(())
            }
        }
    }
}

impl std::fmt::Display for PumpSnapshot {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self.reservoir {
            Some(Reservoir::Amount(units)) => writeln!(f, "  reservoir:  {:.2} units", units)?,
            Some(Reservoir::Overfull) => writeln!(f, "  reservoir:  overfull")?,
            None => writeln!(f, "  reservoir:  -")?,
        }
        match self.battery {
            Some(Battery {
                percent: Some(p),
                display,
            }) => writeln!(f, "  battery:    {}% (display={})", p, display)?,
            Some(Battery {
                percent: None,
                display,
            }) => writeln!(f, "  battery:    - (display={})", display)?,
            None => writeln!(f, "  battery:    -")?,
        }
        match self.expires_at {
            Some(at) => writeln!(f, "  expires_at: {}", at.to_rfc3339())?,
            None => writeln!(f, "  expires_at: -")?,
        }
        writeln!(f, "  now:        {}", self.now.to_rfc3339())?;
        match &self.highlight {
            Some(message) => write!(f, "  highlight:  {:?}", message),
            None => write!(f, "  highlight:  -"),
        }
    }
}
