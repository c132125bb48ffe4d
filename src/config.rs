use crate::engine::integrity::{self, FormulaIntegrity};
use crate::error::{IndexError, Result};
use crate::types::config::{unknown_keys_message, IndexConfig};
use crate::types::formula::Formula;
use std::path::{Path, PathBuf};
use toml::map::Map;
use toml::Value;

pub const DEFAULT_CONFIG_FILE: &str = "visindex.toml";
pub const DEFAULT_LOCAL_FILE: &str = ".visindex/local.toml";
pub const DEFAULT_GLOBAL_CONFIG_FILE: &str = ".config/visindex/config.toml";

/// One source of formula overrides. Later layers win key by key.
#[derive(Debug, Clone, PartialEq, Eq)]
struct ConfigLayer {
    name: &'static str,
    path: PathBuf,
}

impl ConfigLayer {
    fn new(name: &'static str, path: PathBuf) -> Self {
        Self { name, path }
    }

    /// `None` when the file is absent; optional layers are skipped silently.
    fn read(&self) -> Result<Option<Map<String, Value>>> {
        if !self.path.is_file() {
            return Ok(None);
        }
        let content = std::fs::read_to_string(&self.path)?;
        let table = content
            .parse::<toml::Table>()
            .map_err(|e| IndexError::ConfigParse(format!("{}: {}", self.path.display(), e)))?;
        Ok(Some(table))
    }
}

/// Global, repo and local layers, lowest precedence first.
fn layers(root: &Path, global_path: Option<&Path>) -> Vec<ConfigLayer> {
    global_path
        .map(|path| ConfigLayer::new("global", path.to_path_buf()))
        .into_iter()
        .chain([
            ConfigLayer::new("repo", root.join(DEFAULT_CONFIG_FILE)),
            ConfigLayer::new("local", root.join(DEFAULT_LOCAL_FILE)),
        ])
        .collect()
}

pub fn load_config(root: &Path) -> Result<Option<IndexConfig>> {
    let global = std::env::var_os("HOME")
        .map(PathBuf::from)
        .map(|home| home.join(DEFAULT_GLOBAL_CONFIG_FILE));
    load_config_with_global(root, global.as_deref())
}

/// Layers global, repo and local files; the repo file must exist for any
/// config to apply.
pub(crate) fn load_config_with_global(
    root: &Path,
    global_path: Option<&Path>,
) -> Result<Option<IndexConfig>> {
    let repo_path = root.join(DEFAULT_CONFIG_FILE);
    if !repo_path.is_file() {
        tracing::debug!(path = %repo_path.display(), "no config file, using canonical formula");
        return Ok(None);
    }

    let mut effective = Map::new();
    for layer in layers(root, global_path) {
        if let Some(table) = layer.read()? {
            tracing::debug!(
                layer = layer.name,
                path = %layer.path.display(),
                keys = table.len(),
                "applying config layer"
            );
            overlay_table(&mut effective, table);
        }
    }

    let cfg = IndexConfig::deserialize_from(effective)?;
    Ok(Some(cfg))
}

/// Nested tables merge; any other value replaces what the lower layer set.
fn overlay_table(base: &mut Map<String, Value>, overlay: Map<String, Value>) {
    for (key, value) in overlay {
        match value {
            Value::Table(nested) => match base.get_mut(&key) {
                Some(Value::Table(existing)) => overlay_table(existing, nested),
                _ => {
                    base.insert(key, Value::Table(nested));
                }
            },
            value => {
                base.insert(key, value);
            }
        }
    }
}

/// Effective formula for computation: canonical unless a validated config overrides it.
pub fn load_formula(root: &Path) -> Result<Formula> {
    match load_config(root)? {
        Some(cfg) => {
            cfg.validate()?;
            Ok(cfg.formula())
        }
        None => Ok(Formula::canonical()),
    }
}

/// Integrity of the effective formula, including config keys the formula
/// cannot represent. Never refuses a config that parses.
pub fn integrity_report(root: &Path) -> Result<FormulaIntegrity> {
    let global = std::env::var_os("HOME")
        .map(PathBuf::from)
        .map(|home| home.join(DEFAULT_GLOBAL_CONFIG_FILE));
    integrity_report_with_global(root, global.as_deref())
}

pub(crate) fn integrity_report_with_global(
    root: &Path,
    global_path: Option<&Path>,
) -> Result<FormulaIntegrity> {
    let Some(cfg) = load_config_with_global(root, global_path)? else {
        return Ok(integrity::check(&Formula::canonical()));
    };
    let mut report = integrity::check(&cfg.formula());
    let unknown = cfg.unknown_weight_keys();
    if !unknown.is_empty() {
        report.issues.push(unknown_keys_message(&unknown));
        report.valid = false;
    }
    Ok(report)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn load_config_returns_none_when_repo_file_missing() {
        let dir = TempDir::new().expect("temp dir should be created");
        let cfg = load_config_with_global(dir.path(), None).expect("load should not fail");
        assert!(cfg.is_none());
    }

    #[test]
    fn layers_run_from_global_to_local() {
        let root = Path::new("/repo");
        let names = layers(root, Some(Path::new("/home/user/config.toml")))
            .iter()
            .map(|layer| layer.name)
            .collect::<Vec<_>>();
        assert_eq!(names, ["global", "repo", "local"]);
        assert_eq!(layers(root, None).len(), 2);
    }

    #[test]
    fn load_config_merges_global_repo_and_local_in_order() {
        let root = TempDir::new().expect("root temp dir should be created");
        let global_root = TempDir::new().expect("global temp dir should be created");
        let global_path = global_root.path().join("config.toml");

        fs::write(
            &global_path,
            r#"
[trend]
deadband = 0.8

[forecast]
base_variance = 4.0
"#,
        )
        .expect("global config should write");

        fs::write(
            root.path().join(DEFAULT_CONFIG_FILE),
            r#"
[forecast]
horizon_weeks = 6
base_variance = 2.0
"#,
        )
        .expect("repo config should write");

        fs::create_dir_all(root.path().join(".visindex")).expect("local dir should create");
        fs::write(
            root.path().join(DEFAULT_LOCAL_FILE),
            r#"
[forecast]
horizon_weeks = 2
"#,
        )
        .expect("local override should write");

        let cfg = load_config_with_global(root.path(), Some(&global_path))
            .expect("load should succeed")
            .expect("merged config should exist");
        let formula = cfg.formula();

        assert_eq!(formula.trend_deadband, 0.8);
        assert_eq!(formula.base_variance, 2.0);
        assert_eq!(formula.horizon_weeks, 2);
        assert_eq!(formula.weights, crate::types::formula::DriverWeights::CANONICAL);
    }

    #[test]
    fn local_weight_override_keeps_repo_siblings() {
        let root = TempDir::new().expect("root temp dir should be created");
        fs::write(
            root.path().join(DEFAULT_CONFIG_FILE),
            r#"
[weights]
visibility = 0.50
authority = 0.30
momentum = 0.20
"#,
        )
        .expect("repo config should write");
        fs::create_dir_all(root.path().join(".visindex")).expect("local dir should create");
        fs::write(
            root.path().join(DEFAULT_LOCAL_FILE),
            r#"
[weights]
authority = 0.25
momentum = 0.25
"#,
        )
        .expect("local override should write");

        let weights = load_config_with_global(root.path(), None)
            .expect("load should succeed")
            .expect("config should exist")
            .weights();
        assert_eq!(weights.visibility, 0.50);
        assert_eq!(weights.authority, 0.25);
        assert_eq!(weights.momentum, 0.25);
    }

    #[test]
    fn overlay_replaces_scalar_with_table() {
        let mut base: Map<String, Value> = toml::from_str("trend = 1").expect("base should parse");
        let overlay: Map<String, Value> =
            toml::from_str("[trend]\ndeadband = 0.7").expect("overlay should parse");
        overlay_table(&mut base, overlay);
        let deadband = base
            .get("trend")
            .and_then(|trend| trend.get("deadband"))
            .and_then(Value::as_float);
        assert_eq!(deadband, Some(0.7));
    }

    #[test]
    fn load_formula_rejects_invalid_merged_weights() {
        let root = TempDir::new().expect("root temp dir should be created");
        fs::write(
            root.path().join(DEFAULT_CONFIG_FILE),
            r#"
[weights]
visibility = 0.60
"#,
        )
        .expect("repo config should write");

        let cfg = load_config_with_global(root.path(), None)
            .expect("load should succeed")
            .expect("config should exist");
        assert!((cfg.weights().sum() - 1.2).abs() < 1e-9);

        let err = load_formula(root.path()).expect_err("formula should be rejected");
        assert!(matches!(err, IndexError::ConfigParse(_)));
    }

    #[test]
    fn load_formula_defaults_to_canonical() {
        let dir = TempDir::new().expect("temp dir should be created");
        let formula = load_formula(dir.path()).expect("formula should load");
        assert_eq!(formula, Formula::canonical());
    }

    #[test]
    fn load_config_reports_malformed_toml_with_path() {
        let root = TempDir::new().expect("root temp dir should be created");
        fs::write(root.path().join(DEFAULT_CONFIG_FILE), "[weights\n").expect("file should write");

        let err = load_config_with_global(root.path(), None).expect_err("load should fail");
        assert!(err.to_string().contains(DEFAULT_CONFIG_FILE));
    }

    #[test]
    fn integrity_report_flags_unknown_weight_keys() {
        let root = TempDir::new().expect("root temp dir should be created");
        fs::write(
            root.path().join(DEFAULT_CONFIG_FILE),
            r#"
[weights]
visibility = 0.40
authority = 0.35
momentum = 0.25
reach = 0.01
"#,
        )
        .expect("repo config should write");

        let report =
            integrity_report_with_global(root.path(), None).expect("report should build");
        assert!(!report.valid);
        assert!((report.weight_sum - 1.0).abs() < 1e-9);
        assert_eq!(
            report.issues,
            vec!["weights contains unknown key(s): reach".to_string()]
        );
    }

    #[test]
    fn integrity_report_without_config_is_canonical() {
        let dir = TempDir::new().expect("temp dir should be created");
        let report = integrity_report_with_global(dir.path(), None).expect("report should build");
        assert!(report.valid);
        assert_eq!(report, integrity::check(&Formula::canonical()));
    }
}
