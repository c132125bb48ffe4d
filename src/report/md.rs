use crate::engine::integrity::FormulaIntegrity;
use crate::types::forecast::ForecastResult;
use crate::types::index::ComputedIndex;

pub fn index_to_markdown(index: &ComputedIndex) -> String {
    let mut output = String::new();
    output.push_str(&format!("# Visibility Index: {}\n\n", index.org_id));
    output.push_str(&format!(
        "Score: {:.1} ({}) {} {:+.1} over 7d, {:+.1} over 30d\n",
        index.score,
        index.status.label(),
        index.trend.arrow(),
        index.delta7d,
        index.delta30d
    ));
    output.push_str(&format!("Confidence: {:.2}\n", index.confidence));
    output.push_str(&format!(
        "Computed at: {}\n\n",
        index.computed_at.to_rfc3339()
    ));

    output.push_str("## Drivers\n\n");
    for driver in &index.drivers {
        output.push_str(&format!(
            "- {}: {:.1} (weighted {:.2}, confidence {:.2}, {} {:+.1})\n",
            driver.driver_type,
            driver.score,
            driver.weighted,
            driver.confidence,
            driver.trend,
            driver.delta7d
        ));
    }
    output.push('\n');

    output.push_str("## Sparkline\n\n");
    let points = index
        .sparkline
        .iter()
        .map(|point| format!("{point:.1}"))
        .collect::<Vec<_>>();
    output.push_str(&points.join(" "));
    output.push('\n');
    output
}

pub fn forecast_to_markdown(forecast: &ForecastResult) -> String {
    let interval = forecast.interval;
    let mut output = String::new();
    output.push_str(&format!("# Forecast: {}\n\n", forecast.org_id));
    output.push_str(&format!(
        "Horizon: {} weeks from {:.1}\n",
        forecast.horizon_weeks, forecast.current_score
    ));
    output.push_str(&format!(
        "Baseline: {:.1}, scenario effect {:+.2}\n",
        forecast.baseline_expected, forecast.scenario_delta
    ));
    output.push_str(&format!(
        "Expected: {:.1} (low {:.1}, high {:.1})\n",
        interval.expected, interval.low, interval.high
    ));
    output
}

pub fn integrity_to_markdown(integrity: &FormulaIntegrity) -> String {
    let mut output = String::new();
    output.push_str("# Formula Integrity\n\n");
    output.push_str(&format!(
        "Status: {}\n\n",
        if integrity.valid { "valid" } else { "INVALID" }
    ));
    output.push_str(&format!("`{}`\n\n", integrity.formula));
    output.push_str(&format!(
        "Weights: visibility {:.2}, authority {:.2}, momentum {:.2} (sum {:.3})\n\n",
        integrity.weights.visibility,
        integrity.weights.authority,
        integrity.weights.momentum,
        integrity.weight_sum
    ));

    output.push_str("## Bands\n\n");
    for band in &integrity.bands {
        output.push_str(&format!("- {}: {}-{}\n", band.status, band.min, band.max));
    }
    output.push('\n');

    output.push_str("## Issues\n\n");
    if integrity.issues.is_empty() {
        output.push_str("- none\n");
    } else {
        for issue in &integrity.issues {
            output.push_str(&format!("- {issue}\n"));
        }
    }
    output.push_str(&format!("\nFingerprint: {}\n", integrity.fingerprint));
    output
}
