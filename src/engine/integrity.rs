use crate::types::formula::{Band, DriverWeights, Formula, WEIGHT_SUM_TOLERANCE};
use serde::Serialize;
use sha2::{Digest, Sha256};

const SCORE_MIN: u32 = 0;
const SCORE_MAX: u32 = 100;

/// Outcome of re-deriving the formula invariants. Meant for CI, not end users.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FormulaIntegrity {
    pub valid: bool,
    pub formula: String,
    pub weights: DriverWeights,
    pub weight_sum: f64,
    pub bands: Vec<Band>,
    pub issues: Vec<String>,
    /// SHA-256 over the formula text, weights and bands.
    pub fingerprint: String,
}

pub fn check(formula: &Formula) -> FormulaIntegrity {
    let mut issues = Vec::new();
    check_weights(&formula.weights, &mut issues);
    check_bands(&formula.bands.bands, &mut issues);

    if !(formula.trend_deadband.is_finite() && formula.trend_deadband > 0.0) {
        issues.push(format!(
            "trend deadband must be greater than 0 (found {})",
            formula.trend_deadband
        ));
    }
    if formula.horizon_weeks == 0 {
        issues.push("forecast horizon must be at least one week".to_string());
    }
    if !(formula.base_variance.is_finite() && formula.base_variance >= 0.0) {
        issues.push(format!(
            "forecast base variance must be non-negative (found {})",
            formula.base_variance
        ));
    }
    if !(formula.interval_margin.is_finite() && formula.interval_margin >= 0.0) {
        issues.push(format!(
            "forecast interval margin must be non-negative (found {})",
            formula.interval_margin
        ));
    }

    let text = formula.as_text();
    FormulaIntegrity {
        valid: issues.is_empty(),
        fingerprint: fingerprint(&text, formula),
        formula: text,
        weights: formula.weights,
        weight_sum: formula.weights.sum(),
        bands: formula.bands.bands.clone(),
        issues,
    }
}

fn check_weights(weights: &DriverWeights, issues: &mut Vec<String>) {
    for (name, weight) in [
        ("visibility", weights.visibility),
        ("authority", weights.authority),
        ("momentum", weights.momentum),
    ] {
        if !(0.0..=1.0).contains(&weight) {
            issues.push(format!(
                "{name} weight must be between 0.0 and 1.0 (found {weight})"
            ));
        }
    }

    let sum = weights.sum();
    if !((sum - 1.0).abs() <= WEIGHT_SUM_TOLERANCE) {
        issues.push(format!("weights must sum to 1.0 (found {sum:.3})"));
    }
}

fn check_bands(bands: &[Band], issues: &mut Vec<String>) {
    let (Some(first), Some(last)) = (bands.first(), bands.last()) else {
        issues.push("band table is empty".to_string());
        return;
    };

    if first.min != SCORE_MIN {
        issues.push(format!(
            "lowest band {} must start at {SCORE_MIN} (found {})",
            first.status, first.min
        ));
    }
    if last.max != SCORE_MAX {
        issues.push(format!(
            "highest band {} must end at {SCORE_MAX} (found {})",
            last.status, last.max
        ));
    }
    for band in bands {
        if band.min > band.max {
            issues.push(format!(
                "band {} has min {} above max {}",
                band.status, band.min, band.max
            ));
        }
    }
    for pair in bands.windows(2) {
        let (lower, upper) = (&pair[0], &pair[1]);
        if lower.max + 1 != upper.min {
            issues.push(format!(
                "bands {} and {} are not contiguous ({} + 1 != {})",
                lower.status, upper.status, lower.max, upper.min
            ));
        }
        if lower.status >= upper.status {
            issues.push(format!(
                "band {} is out of order after {}",
                upper.status, lower.status
            ));
        }
    }
}

fn fingerprint(text: &str, formula: &Formula) -> String {
    let mut hasher = Sha256::new();
    hasher.update(text.as_bytes());
    hasher.update(format!("{:?}", formula.weights).as_bytes());
    for band in formula.bands.iter() {
        hasher.update(format!("{}:{}-{};", band.status, band.min, band.max).as_bytes());
    }
    format!("{:x}", hasher.finalize())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::formula::Status;

    #[test]
    fn canonical_formula_is_valid() {
        let report = check(&Formula::canonical());
        assert!(report.valid, "issues: {:?}", report.issues);
        assert!(report.issues.is_empty());
        assert_eq!(report.bands.len(), 4);
        assert!((report.weight_sum - 1.0).abs() <= WEIGHT_SUM_TOLERANCE);
        assert!(report.formula.starts_with("score = round("));
        assert_eq!(report.fingerprint.len(), 64);
    }

    #[test]
    fn canonical_bands_are_contiguous_over_full_range() {
        let report = check(&Formula::canonical());
        let bands = &report.bands;
        assert_eq!(bands[0].min, 0);
        assert_eq!(bands[bands.len() - 1].max, 100);
        for pair in bands.windows(2) {
            assert_eq!(pair[0].max + 1, pair[1].min);
        }
    }

    #[test]
    fn weight_drift_is_reported() {
        let mut formula = Formula::canonical();
        formula.weights.visibility = 0.45;
        let report = check(&formula);
        assert!(!report.valid);
        assert!(report
            .issues
            .iter()
            .any(|issue| issue.contains("weights must sum to 1.0 (found 1.050)")));
    }

    #[test]
    fn small_rounding_drift_is_tolerated() {
        let mut formula = Formula::canonical();
        formula.weights.visibility = 0.4005;
        assert!(check(&formula).valid);
    }

    #[test]
    fn band_gap_is_reported() {
        let mut formula = Formula::canonical();
        formula.bands.bands[1].min = 42;
        let report = check(&formula);
        assert!(!report.valid);
        assert!(report
            .issues
            .iter()
            .any(|issue| issue.contains("at_risk and emerging are not contiguous")));
    }

    #[test]
    fn band_range_must_span_zero_to_hundred() {
        let mut formula = Formula::canonical();
        formula.bands.bands[3].max = 99;
        let report = check(&formula);
        assert!(report
            .issues
            .iter()
            .any(|issue| issue.contains("must end at 100")));
    }

    #[test]
    fn band_order_is_enforced() {
        let mut formula = Formula::canonical();
        formula.bands.bands[2].status = Status::AtRisk;
        assert!(!check(&formula).valid);
    }

    #[test]
    fn zero_deadband_is_rejected() {
        let mut formula = Formula::canonical();
        formula.trend_deadband = 0.0;
        let report = check(&formula);
        assert!(report
            .issues
            .iter()
            .any(|issue| issue.contains("deadband must be greater than 0")));
    }

    #[test]
    fn fingerprint_changes_with_weights() {
        let canonical = check(&Formula::canonical());
        let mut formula = Formula::canonical();
        formula.weights.authority = 0.30;
        formula.weights.momentum = 0.30;
        let shifted = check(&formula);
        assert_ne!(canonical.fingerprint, shifted.fingerprint);
        assert_eq!(canonical.fingerprint, check(&Formula::canonical()).fingerprint);
    }
}
