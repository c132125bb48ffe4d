pub mod config;
pub mod engine;
pub mod error;
pub mod provider;
pub mod report;
pub mod types;

pub use engine::integrity::FormulaIntegrity;
pub use engine::{compute_forecast, compute_index, validate_formula_integrity, IndexEngine};
pub use error::{IndexError, Result};
pub use types::forecast::{ForecastInterval, ForecastResult, ForecastScenario};
pub use types::formula::{Band, BandTable, DriverWeights, Formula, Status};
pub use types::index::{ComputedIndex, DriverBreakdown, Trend};
pub use types::snapshot::{
    ComponentMetric, CompositeSnapshot, DriverSnapshot, DriverType, HistoricalScore,
};
