use serde::{Deserialize, Deserializer, Serialize};

/// Hypothetical point changes to driver scores. Absent or non-numeric fields
/// have no effect.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ForecastScenario {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
    #[serde(default, deserialize_with = "numeric_or_none")]
    pub delta_visibility: Option<f64>,
    #[serde(default, deserialize_with = "numeric_or_none")]
    pub delta_authority: Option<f64>,
    #[serde(default, deserialize_with = "numeric_or_none")]
    pub delta_momentum: Option<f64>,
}

fn numeric_or_none<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<serde_json::Value>::deserialize(deserializer)?;
    Ok(value.and_then(|value| value.as_f64()))
}

impl ForecastScenario {
    pub fn new(
        delta_visibility: Option<f64>,
        delta_authority: Option<f64>,
        delta_momentum: Option<f64>,
    ) -> Self {
        Self {
            label: None,
            delta_visibility,
            delta_authority,
            delta_momentum,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ForecastInterval {
    pub low: f64,
    pub expected: f64,
    pub high: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ForecastResult {
    pub org_id: String,
    pub horizon_weeks: u32,
    pub current_score: f64,
    /// Trend extrapolation before any scenario is applied, unclamped.
    pub baseline_expected: f64,
    pub scenario_delta: f64,
    pub interval: ForecastInterval,
}
