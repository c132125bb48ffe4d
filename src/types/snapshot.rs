use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DriverType {
    Visibility,
    Authority,
    Momentum,
}

impl DriverType {
    pub const ALL: [DriverType; 3] = [
        DriverType::Visibility,
        DriverType::Authority,
        DriverType::Momentum,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            DriverType::Visibility => "visibility",
            DriverType::Authority => "authority",
            DriverType::Momentum => "momentum",
        }
    }
}

impl fmt::Display for DriverType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A named sub-metric behind a driver score. Carried through for display only.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ComponentMetric {
    pub name: String,
    pub value: f64,
    pub max_value: f64,
    pub weight: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DriverSnapshot {
    pub driver_type: DriverType,
    pub score: f64,
    pub confidence: f64,
    #[serde(default)]
    pub component_metrics: Vec<ComponentMetric>,
    #[serde(default)]
    pub delta7d: f64,
    #[serde(default)]
    pub delta30d: f64,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HistoricalScore {
    pub date: NaiveDate,
    pub score: f64,
}

/// Input to one index computation. Driver slots are optional so that a
/// provider handing over an incomplete document is caught by the engine
/// instead of failing deserialization halfway.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CompositeSnapshot {
    pub generated_at: DateTime<Utc>,
    pub org_id: String,
    #[serde(default)]
    pub visibility: Option<DriverSnapshot>,
    #[serde(default)]
    pub authority: Option<DriverSnapshot>,
    #[serde(default)]
    pub momentum: Option<DriverSnapshot>,
    /// Oldest first.
    #[serde(default)]
    pub historical_scores: Vec<HistoricalScore>,
}

impl CompositeSnapshot {
    pub fn driver(&self, driver_type: DriverType) -> Option<&DriverSnapshot> {
        match driver_type {
            DriverType::Visibility => self.visibility.as_ref(),
            DriverType::Authority => self.authority.as_ref(),
            DriverType::Momentum => self.momentum.as_ref(),
        }
    }
}
