use super::{clamp_score, finite_or_zero};
use crate::types::forecast::{ForecastInterval, ForecastResult, ForecastScenario};
use crate::types::formula::{DriverWeights, Formula};
use crate::types::index::ComputedIndex;

/// Sum of every scenario's weighted driver deltas. Scenarios stack; nothing
/// is deduplicated or capped.
pub fn scenario_delta(scenarios: &[ForecastScenario], weights: &DriverWeights) -> f64 {
    scenarios
        .iter()
        .map(|scenario| {
            weights.blend(
                field(scenario.delta_visibility),
                field(scenario.delta_authority),
                field(scenario.delta_momentum),
            )
        })
        .sum()
}

fn field(delta: Option<f64>) -> f64 {
    delta.map(finite_or_zero).unwrap_or(0.0)
}

pub fn forecast(
    current: &ComputedIndex,
    scenarios: &[ForecastScenario],
    formula: &Formula,
) -> ForecastResult {
    let baseline_expected = finite_or_zero(current.score)
        + finite_or_zero(current.delta7d) * f64::from(formula.horizon_weeks);
    let scenario_delta = scenario_delta(scenarios, &formula.weights);

    let expected = clamp_score(baseline_expected + scenario_delta);
    // Never negative, so low <= expected <= high.
    let spread = finite_or_zero(formula.base_variance + formula.interval_margin).max(0.0);

    ForecastResult {
        org_id: current.org_id.clone(),
        horizon_weeks: formula.horizon_weeks,
        current_score: current.score,
        baseline_expected,
        scenario_delta,
        interval: ForecastInterval {
            low: clamp_score(expected - spread),
            expected,
            high: clamp_score(expected + spread),
        },
    }
}
