use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::types::snapshot::DriverType;

pub use crate::types::formula::Status;

pub const SPARKLINE_LEN: usize = 7;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Trend {
    Up,
    Flat,
    Down,
}

impl Trend {
    pub fn as_str(self) -> &'static str {
        match self {
            Trend::Up => "up",
            Trend::Flat => "flat",
            Trend::Down => "down",
        }
    }

    pub fn arrow(self) -> &'static str {
        match self {
            Trend::Up => "↑",
            Trend::Flat => "→",
            Trend::Down => "↓",
        }
    }
}

impl fmt::Display for Trend {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DriverBreakdown {
    pub driver_type: DriverType,
    /// Driver score after clamping to [0, 100].
    pub score: f64,
    /// Clamped score times the driver weight, rounded to 2 decimals.
    pub weighted: f64,
    pub confidence: f64,
    pub delta7d: f64,
    pub delta30d: f64,
    pub trend: Trend,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ComputedIndex {
    pub org_id: String,
    pub score: f64,
    pub previous_score: f64,
    pub delta7d: f64,
    pub delta30d: f64,
    pub status: Status,
    pub trend: Trend,
    /// Visibility, authority, momentum, in that order.
    pub drivers: Vec<DriverBreakdown>,
    pub sparkline: [f64; SPARKLINE_LEN],
    pub confidence: f64,
    pub computed_at: DateTime<Utc>,
}

impl ComputedIndex {
    pub fn driver(&self, driver_type: DriverType) -> Option<&DriverBreakdown> {
        self.drivers
            .iter()
            .find(|breakdown| breakdown.driver_type == driver_type)
    }
}
