use super::{clamp_score, round_to};
use crate::error::{IndexError, Result};
use crate::types::formula::DriverWeights;
use crate::types::snapshot::{CompositeSnapshot, DriverSnapshot, DriverType};

/// The three driver snapshots of a snapshot, all known to be present.
#[derive(Debug, Clone, Copy)]
pub struct DriverSet<'a> {
    pub visibility: &'a DriverSnapshot,
    pub authority: &'a DriverSnapshot,
    pub momentum: &'a DriverSnapshot,
}

impl<'a> DriverSet<'a> {
    pub fn get(&self, driver_type: DriverType) -> &'a DriverSnapshot {
        match driver_type {
            DriverType::Visibility => self.visibility,
            DriverType::Authority => self.authority,
            DriverType::Momentum => self.momentum,
        }
    }
}

/// Fails on the first absent driver; no defaults are substituted.
pub fn require_drivers(snapshot: &CompositeSnapshot) -> Result<DriverSet<'_>> {
    let lookup = |driver_type| {
        snapshot
            .driver(driver_type)
            .ok_or(IndexError::MissingDriver(driver_type))
    };
    Ok(DriverSet {
        visibility: lookup(DriverType::Visibility)?,
        authority: lookup(DriverType::Authority)?,
        momentum: lookup(DriverType::Momentum)?,
    })
}

/// Contribution of one driver: its score clamped to [0, 100] before weighting.
pub fn weighted(score: f64, weight: f64) -> f64 {
    clamp_score(score) * weight
}

pub fn composite_score(drivers: &DriverSet<'_>, weights: &DriverWeights) -> f64 {
    let total = weighted(drivers.visibility.score, weights.visibility)
        + weighted(drivers.authority.score, weights.authority)
        + weighted(drivers.momentum.score, weights.momentum);
    clamp_score(round_to(total, 1))
}
