use crate::error::IndexError;
use crate::types::formula::{DriverWeights, Formula, WEIGHT_SUM_TOLERANCE};
use serde::Deserialize;
use std::collections::HashMap;

#[derive(Debug, Clone, Default, Deserialize)]
pub struct IndexConfig {
    pub weights: Option<HashMap<String, f64>>,
    pub trend: Option<TrendConfig>,
    pub forecast: Option<ForecastConfig>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct TrendConfig {
    pub deadband: Option<f64>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ForecastConfig {
    pub horizon_weeks: Option<u32>,
    pub base_variance: Option<f64>,
    pub margin: Option<f64>,
}

const ALLOWED_WEIGHT_KEYS: [&str; 3] = ["visibility", "authority", "momentum"];

impl IndexConfig {
    /// Typed view of an already-merged config table.
    pub fn deserialize_from(table: toml::Table) -> Result<Self, IndexError> {
        toml::Value::Table(table)
            .try_into()
            .map_err(|e: toml::de::Error| IndexError::ConfigParse(e.to_string()))
    }

    pub fn weights(&self) -> DriverWeights {
        let defaults = DriverWeights::CANONICAL;
        match &self.weights {
            Some(weights) => DriverWeights {
                visibility: *weights.get("visibility").unwrap_or(&defaults.visibility),
                authority: *weights.get("authority").unwrap_or(&defaults.authority),
                momentum: *weights.get("momentum").unwrap_or(&defaults.momentum),
            },
            None => defaults,
        }
    }

    /// Canonical formula with any configured overrides applied. Bands are fixed.
    pub fn formula(&self) -> Formula {
        let mut formula = Formula::canonical();
        formula.weights = self.weights();
        if let Some(deadband) = self.trend.as_ref().and_then(|trend| trend.deadband) {
            formula.trend_deadband = deadband;
        }
        if let Some(forecast) = &self.forecast {
            formula.horizon_weeks = forecast.horizon_weeks.unwrap_or(formula.horizon_weeks);
            formula.base_variance = forecast.base_variance.unwrap_or(formula.base_variance);
            formula.interval_margin = forecast.margin.unwrap_or(formula.interval_margin);
        }
        formula
    }

    /// Weight keys that name no driver, sorted.
    pub fn unknown_weight_keys(&self) -> Vec<String> {
        let mut unknown = self
            .weights
            .iter()
            .flat_map(|weights| weights.keys())
            .filter(|key| !ALLOWED_WEIGHT_KEYS.contains(&key.as_str()))
            .cloned()
            .collect::<Vec<_>>();
        unknown.sort();
        unknown
    }

    pub fn validate(&self) -> Result<(), IndexError> {
        let unknown = self.unknown_weight_keys();
        if !unknown.is_empty() {
            return Err(IndexError::ConfigParse(unknown_keys_message(&unknown)));
        }

        let weights = self.weights();
        if [weights.visibility, weights.authority, weights.momentum]
            .iter()
            .any(|weight| !(0.0..=1.0).contains(weight))
        {
            return Err(IndexError::ConfigParse(
                "weights values must be between 0.0 and 1.0".to_string(),
            ));
        }
        let weight_sum = weights.sum();
        if (weight_sum - 1.0).abs() > WEIGHT_SUM_TOLERANCE {
            return Err(IndexError::ConfigParse(format!(
                "weights must sum to 1.0 (found {:.3})",
                weight_sum
            )));
        }

        if let Some(deadband) = self.trend.as_ref().and_then(|trend| trend.deadband) {
            if deadband <= 0.0 {
                return Err(IndexError::ConfigParse(
                    "trend.deadband must be greater than 0".to_string(),
                ));
            }
        }

        if let Some(forecast) = &self.forecast {
            if forecast.horizon_weeks == Some(0) {
                return Err(IndexError::ConfigParse(
                    "forecast.horizon_weeks must be greater than 0".to_string(),
                ));
            }
            if forecast.base_variance.is_some_and(|variance| variance < 0.0) {
                return Err(IndexError::ConfigParse(
                    "forecast.base_variance must not be negative".to_string(),
                ));
            }
            if forecast.margin.is_some_and(|margin| margin < 0.0) {
                return Err(IndexError::ConfigParse(
                    "forecast.margin must not be negative".to_string(),
                ));
            }
        }

        Ok(())
    }
}

pub(crate) fn unknown_keys_message(unknown: &[String]) -> String {
    format!("weights contains unknown key(s): {}", unknown.join(", "))
}
