pub mod json;
pub mod md;
pub mod sarif;

use crate::engine::integrity::FormulaIntegrity;
use crate::error::IndexError;
use crate::types::forecast::ForecastResult;
use crate::types::index::ComputedIndex;

#[derive(Debug, Clone, Copy)]
pub enum OutputFormat {
    Json,
    Md,
}

/// Integrity results can also go out as SARIF for CI annotation.
#[derive(Debug, Clone, Copy)]
pub enum IntegrityFormat {
    Json,
    Md,
    Sarif,
}

pub fn render_indexes(
    indexes: &[ComputedIndex],
    format: OutputFormat,
) -> Result<String, IndexError> {
    match format {
        OutputFormat::Json => json::to_json(&indexes).map_err(IndexError::Json),
        OutputFormat::Md => Ok(indexes
            .iter()
            .map(md::index_to_markdown)
            .collect::<Vec<_>>()
            .join("\n")),
    }
}

pub fn render_forecasts(
    forecasts: &[ForecastResult],
    format: OutputFormat,
) -> Result<String, IndexError> {
    match format {
        OutputFormat::Json => json::to_json(&forecasts).map_err(IndexError::Json),
        OutputFormat::Md => Ok(forecasts
            .iter()
            .map(md::forecast_to_markdown)
            .collect::<Vec<_>>()
            .join("\n")),
    }
}

pub fn render_integrity(
    integrity: &FormulaIntegrity,
    format: IntegrityFormat,
) -> Result<String, IndexError> {
    match format {
        IntegrityFormat::Json => json::to_json(integrity).map_err(IndexError::Json),
        IntegrityFormat::Md => Ok(md::integrity_to_markdown(integrity)),
        IntegrityFormat::Sarif => sarif::to_sarif(integrity).map_err(IndexError::Json),
    }
}
