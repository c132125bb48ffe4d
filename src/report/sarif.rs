use crate::engine::integrity::FormulaIntegrity;
use serde_json::json;

pub fn to_sarif(integrity: &FormulaIntegrity) -> Result<String, serde_json::Error> {
    let results: Vec<_> = integrity
        .issues
        .iter()
        .map(|issue| {
            json!({
                "ruleId": "formula.integrity",
                "level": "error",
                "message": { "text": issue },
            })
        })
        .collect();

    let sarif = json!({
        "version": "2.1.0",
        "runs": [{
            "tool": {
                "driver": {
                    "name": "visindex",
                    "version": env!("CARGO_PKG_VERSION"),
                }
            },
            "properties": {
                "fingerprint": integrity.fingerprint,
            },
            "results": results
        }]
    });

    serde_json::to_string_pretty(&sarif)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::integrity::check;
    use crate::types::formula::Formula;

    #[test]
    fn sarif_reports_each_issue_as_error() {
        let mut formula = Formula::canonical();
        formula.weights.visibility = 0.9;
        let rendered = to_sarif(&check(&formula)).expect("sarif should serialize");
        assert!(rendered.contains("\"ruleId\": \"formula.integrity\""));
        assert!(rendered.contains("\"level\": \"error\""));
        assert!(rendered.contains("weights must sum to 1.0"));
    }

    #[test]
    fn sarif_has_no_results_for_valid_formula() {
        let rendered = to_sarif(&check(&Formula::canonical())).expect("sarif should serialize");
        assert!(rendered.contains("\"results\": []"));
    }
}
