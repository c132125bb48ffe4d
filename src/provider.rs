use crate::error::{IndexError, Result};
use crate::types::forecast::ForecastScenario;
use crate::types::snapshot::CompositeSnapshot;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

/// Source of composite snapshots, one per organization per cycle.
pub trait SnapshotProvider {
    fn snapshots(&self) -> Result<Vec<CompositeSnapshot>>;
}

/// Reads snapshots from a single JSON document or from every `*.json`
/// file below a directory, in path order.
#[derive(Debug, Clone)]
pub struct JsonSnapshotProvider {
    path: PathBuf,
}

impl JsonSnapshotProvider {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    fn files(&self) -> Result<Vec<PathBuf>> {
        if !self.path.exists() {
            return Err(IndexError::PathNotFound(self.path.display().to_string()));
        }
        if self.path.is_file() {
            return Ok(vec![self.path.clone()]);
        }
        let mut files = WalkDir::new(&self.path)
            .into_iter()
            .filter_map(|entry| entry.ok())
            .filter(|entry| entry.file_type().is_file())
            .map(|entry| entry.into_path())
            .filter(|path| path.extension().is_some_and(|ext| ext == "json"))
            .collect::<Vec<_>>();
        files.sort();
        Ok(files)
    }
}

impl SnapshotProvider for JsonSnapshotProvider {
    fn snapshots(&self) -> Result<Vec<CompositeSnapshot>> {
        let files = self.files()?;
        tracing::info!(count = files.len(), root = %self.path.display(), "loading snapshots");
        files.iter().map(|path| read_snapshot(path)).collect()
    }
}

pub fn read_snapshot(path: &Path) -> Result<CompositeSnapshot> {
    let content = std::fs::read_to_string(path)?;
    serde_json::from_str(&content)
        .map_err(|e| IndexError::InvalidSnapshot(format!("{}: {}", path.display(), e)))
}

pub fn read_scenarios(path: &Path) -> Result<Vec<ForecastScenario>> {
    if !path.exists() {
        return Err(IndexError::PathNotFound(path.display().to_string()));
    }
    let content = std::fs::read_to_string(path)?;
    Ok(serde_json::from_str(&content)?)
}

/// Parses `visibility,authority,momentum`; an empty field leaves that driver untouched.
pub fn parse_scenario(spec: &str) -> Result<ForecastScenario> {
    let fields = spec.split(',').map(str::trim).collect::<Vec<_>>();
    if fields.len() != 3 {
        return Err(IndexError::InvalidScenario(format!(
            "'{spec}' must have three comma-separated fields"
        )));
    }
    let parse = |field: &str| -> Result<Option<f64>> {
        if field.is_empty() {
            return Ok(None);
        }
        field.parse::<f64>().map(Some).map_err(|_| {
            IndexError::InvalidScenario(format!("field '{field}' is not a number"))
        })
    };
    Ok(ForecastScenario::new(
        parse(fields[0])?,
        parse(fields[1])?,
        parse(fields[2])?,
    ))
}
