//! Pure index computation. Nothing in this module performs I/O, holds state
//! between calls, or logs; identical inputs give identical outputs.

pub mod classify;
pub mod composite;
pub mod confidence;
pub mod forecast;
pub mod history;
pub mod integrity;

use crate::error::{IndexError, Result};
use crate::types::forecast::{ForecastInterval, ForecastResult, ForecastScenario};
use crate::types::formula::Formula;
use crate::types::index::{ComputedIndex, DriverBreakdown};
use crate::types::snapshot::{CompositeSnapshot, DriverType};
use integrity::FormulaIntegrity;

/// Rounds half away from zero to `places` decimals.
pub fn round_to(value: f64, places: i32) -> f64 {
    let factor = 10f64.powi(places);
    (value * factor).round() / factor
}

/// NaN reads as the lower bound.
pub fn clamp_score(value: f64) -> f64 {
    clamp_or_floor(value, 0.0, 100.0)
}

pub fn clamp_unit(value: f64) -> f64 {
    clamp_or_floor(value, 0.0, 1.0)
}

pub(crate) fn finite_or_zero(value: f64) -> f64 {
    if value.is_finite() {
        value
    } else {
        0.0
    }
}

fn clamp_or_floor(value: f64, min: f64, max: f64) -> f64 {
    if value.is_nan() {
        min
    } else {
        value.clamp(min, max)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct IndexEngine {
    formula: Formula,
}

impl IndexEngine {
    /// Builds an engine over `formula`, refusing one that fails the integrity check.
    pub fn new(formula: Formula) -> Result<Self> {
        let report = integrity::check(&formula);
        if !report.valid {
            return Err(IndexError::FormulaIntegrity(report.issues.join("; ")));
        }
        Ok(Self { formula })
    }

    pub fn canonical() -> Self {
        Self {
            formula: Formula::canonical(),
        }
    }

    pub fn formula(&self) -> &Formula {
        &self.formula
    }

    pub fn compute_index(&self, snapshot: &CompositeSnapshot) -> Result<ComputedIndex> {
        let formula = &self.formula;
        let drivers = composite::require_drivers(snapshot)?;
        let score = composite::composite_score(&drivers, &formula.weights);
        let summary = history::summarize(&snapshot.historical_scores, score);
        let confidence = confidence::aggregate(&drivers, &formula.weights);

        let breakdown = DriverType::ALL
            .iter()
            .map(|&driver_type| {
                let driver = drivers.get(driver_type);
                let delta7d = round_to(finite_or_zero(driver.delta7d), 1);
                DriverBreakdown {
                    driver_type,
                    score: clamp_score(driver.score),
                    weighted: round_to(
                        composite::weighted(driver.score, formula.weights.get(driver_type)),
                        2,
                    ),
                    confidence: round_to(clamp_unit(driver.confidence), 2),
                    delta7d,
                    delta30d: round_to(finite_or_zero(driver.delta30d), 1),
                    trend: classify::classify_trend(delta7d, formula.trend_deadband),
                }
            })
            .collect();

        Ok(ComputedIndex {
            org_id: snapshot.org_id.clone(),
            score,
            previous_score: summary.previous_score,
            delta7d: summary.delta7d,
            delta30d: summary.delta30d,
            status: classify::classify_status(score, &formula.bands),
            trend: classify::classify_trend(summary.delta7d, formula.trend_deadband),
            drivers: breakdown,
            sparkline: summary.sparkline,
            confidence,
            computed_at: snapshot.generated_at,
        })
    }

    pub fn compute_forecast(
        &self,
        current: &ComputedIndex,
        scenarios: &[ForecastScenario],
    ) -> ForecastResult {
        forecast::forecast(current, scenarios, &self.formula)
    }

    /// One outcome per snapshot, in input order. A snapshot missing a driver
    /// fails on its own without affecting the others.
    pub fn compute_each<'a>(
        &self,
        snapshots: &'a [CompositeSnapshot],
    ) -> Vec<(&'a str, Result<ComputedIndex>)> {
        snapshots
            .iter()
            .map(|snapshot| (snapshot.org_id.as_str(), self.compute_index(snapshot)))
            .collect()
    }

    pub fn validate(&self) -> FormulaIntegrity {
        integrity::check(&self.formula)
    }
}

impl Default for IndexEngine {
    fn default() -> Self {
        Self::canonical()
    }
}

/// Computes the index with the canonical formula.
pub fn compute_index(snapshot: &CompositeSnapshot) -> Result<ComputedIndex> {
    IndexEngine::canonical().compute_index(snapshot)
}

/// Forecasts the canonical horizon. Never fails.
pub fn compute_forecast(
    current: &ComputedIndex,
    scenarios: &[ForecastScenario],
) -> ForecastInterval {
    IndexEngine::canonical()
        .compute_forecast(current, scenarios)
        .interval
}

pub fn validate_formula_integrity() -> FormulaIntegrity {
    integrity::check(&Formula::canonical())
}

#[cfg(test)]
pub(crate) mod fixtures {
    use crate::types::snapshot::{CompositeSnapshot, DriverSnapshot, DriverType, HistoricalScore};
    use chrono::{DateTime, Duration, NaiveDate, Utc};

    pub fn timestamp() -> DateTime<Utc> {
        DateTime::parse_from_rfc3339("2026-10-01T12:00:00Z")
            .expect("fixture timestamp should parse")
            .with_timezone(&Utc)
    }

    pub fn driver(driver_type: DriverType, score: f64, confidence: f64) -> DriverSnapshot {
        DriverSnapshot {
            driver_type,
            score,
            confidence,
            component_metrics: Vec::new(),
            delta7d: 0.0,
            delta30d: 0.0,
            updated_at: timestamp(),
        }
    }

    pub fn history(scores: &[f64]) -> Vec<HistoricalScore> {
        let start = NaiveDate::from_ymd_opt(2026, 9, 1).expect("fixture date should be valid");
        scores
            .iter()
            .enumerate()
            .map(|(offset, &score)| HistoricalScore {
                date: start + Duration::days(offset as i64),
                score,
            })
            .collect()
    }

    pub fn snapshot(visibility: f64, authority: f64, momentum: f64) -> CompositeSnapshot {
        CompositeSnapshot {
            generated_at: timestamp(),
            org_id: "org-test".to_string(),
            visibility: Some(driver(DriverType::Visibility, visibility, 0.85)),
            authority: Some(driver(DriverType::Authority, authority, 0.82)),
            momentum: Some(driver(DriverType::Momentum, momentum, 0.78)),
            historical_scores: Vec::new(),
        }
    }
}
