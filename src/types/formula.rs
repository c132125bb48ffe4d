use crate::types::snapshot::DriverType;
use serde::{Deserialize, Serialize};
use std::fmt;

pub const WEIGHT_SUM_TOLERANCE: f64 = 0.001;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DriverWeights {
    pub visibility: f64,
    pub authority: f64,
    pub momentum: f64,
}

impl DriverWeights {
    pub const CANONICAL: DriverWeights = DriverWeights {
        visibility: 0.40,
        authority: 0.35,
        momentum: 0.25,
    };

    pub fn get(&self, driver_type: DriverType) -> f64 {
        match driver_type {
            DriverType::Visibility => self.visibility,
            DriverType::Authority => self.authority,
            DriverType::Momentum => self.momentum,
        }
    }

    pub fn sum(&self) -> f64 {
        self.visibility + self.authority + self.momentum
    }

    /// Weighted blend of one value per driver.
    pub fn blend(&self, visibility: f64, authority: f64, momentum: f64) -> f64 {
        visibility * self.visibility + authority * self.authority + momentum * self.momentum
    }
}

impl Default for DriverWeights {
    fn default() -> Self {
        Self::CANONICAL
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Status {
    AtRisk,
    Emerging,
    Competitive,
    Dominant,
}

impl Status {
    pub fn as_str(self) -> &'static str {
        match self {
            Status::AtRisk => "at_risk",
            Status::Emerging => "emerging",
            Status::Competitive => "competitive",
            Status::Dominant => "dominant",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Status::AtRisk => "At Risk",
            Status::Emerging => "Emerging",
            Status::Competitive => "Competitive",
            Status::Dominant => "Dominant",
        }
    }
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Inclusive integer range of index points mapped to one status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Band {
    pub status: Status,
    pub min: u32,
    pub max: u32,
}

/// Ordered, lowest band first.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BandTable {
    pub bands: Vec<Band>,
}

impl BandTable {
    pub fn canonical() -> Self {
        Self {
            bands: vec![
                Band {
                    status: Status::AtRisk,
                    min: 0,
                    max: 40,
                },
                Band {
                    status: Status::Emerging,
                    min: 41,
                    max: 60,
                },
                Band {
                    status: Status::Competitive,
                    min: 61,
                    max: 80,
                },
                Band {
                    status: Status::Dominant,
                    min: 81,
                    max: 100,
                },
            ],
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = &Band> {
        self.bands.iter()
    }
}

impl Default for BandTable {
    fn default() -> Self {
        Self::canonical()
    }
}

/// Every constant the index, confidence and forecast computations share.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Formula {
    pub weights: DriverWeights,
    pub bands: BandTable,
    /// Trend deadband in index points; |delta| at or below it reads as flat.
    pub trend_deadband: f64,
    pub horizon_weeks: u32,
    pub base_variance: f64,
    /// Extra spread added on each side of the forecast interval.
    pub interval_margin: f64,
}

impl Formula {
    pub fn canonical() -> Self {
        Self {
            weights: DriverWeights::CANONICAL,
            bands: BandTable::canonical(),
            trend_deadband: 0.5,
            horizon_weeks: 4,
            base_variance: 3.0,
            interval_margin: 1.0,
        }
    }

    pub fn as_text(&self) -> String {
        format!(
            "score = round(clamp(visibility, 0, 100) * {:.2} + clamp(authority, 0, 100) * {:.2} + clamp(momentum, 0, 100) * {:.2}, 1)",
            self.weights.visibility, self.weights.authority, self.weights.momentum
        )
    }
}

impl Default for Formula {
    fn default() -> Self {
        Self::canonical()
    }
}
