use crate::types::formula::{BandTable, Status};
use crate::types::index::Trend;

/// Each band covers scores above the previous band's max up to its own max,
/// so fractional scores between integer boundaries (40.5) fall upward.
pub fn classify_status(score: f64, bands: &BandTable) -> Status {
    bands
        .iter()
        .find(|band| score <= f64::from(band.max))
        .or_else(|| bands.bands.last())
        .map(|band| band.status)
        .unwrap_or(Status::AtRisk)
}

pub fn classify_trend(delta: f64, deadband: f64) -> Trend {
    if delta > deadband {
        Trend::Up
    } else if delta < -deadband {
        Trend::Down
    } else {
        Trend::Flat
    }
}
