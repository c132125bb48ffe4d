use super::composite::DriverSet;
use super::{clamp_unit, round_to};
use crate::types::formula::DriverWeights;

/// Blends driver confidences with the score weights, rounded to 2 decimals.
pub fn aggregate(drivers: &DriverSet<'_>, weights: &DriverWeights) -> f64 {
    let blended = weights.blend(
        clamp_unit(drivers.visibility.confidence),
        clamp_unit(drivers.authority.confidence),
        clamp_unit(drivers.momentum.confidence),
    );
    clamp_unit(round_to(blended, 2))
}
