use std::path::{Path, PathBuf};
use std::sync::Arc;

use grimoire_core::catalog::{CatalogIndex, CatalogSource};
use grimoire_engine::{ConfigError, ConflictEngine, EngineConfig, Report};
use grimoire_rules::defaults;
use grimoire_rules::loader::{self, LoadError};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum InputError {
    #[error("Failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("{path}: {source}")]
    Load { path: PathBuf, source: LoadError },
    #[error("Bundled data failed to load: {0}")]
    Bundled(#[from] LoadError),
    #[error("{path}: {source}")]
    Config { path: PathBuf, source: ConfigError },
}

/// Data files named on the command line. Anything left unset falls back to
/// the bundled data.
#[derive(Debug, Clone, Default)]
pub struct DataPaths {
    pub catalogs: Vec<PathBuf>,
    pub categories: Option<PathBuf>,
    pub groups: Vec<PathBuf>,
    pub config: Option<PathBuf>,
}

fn read(path: &Path) -> Result<String, InputError> {
    std::fs::read_to_string(path).map_err(|source| InputError::Io {
        path: path.to_path_buf(),
        source,
    })
}

fn load_catalog_file(path: &Path) -> Result<CatalogSource, InputError> {
    let contents = read(path)?;
    let is_json = path
        .extension()
        .is_some_and(|ext| ext.eq_ignore_ascii_case("json"));
    let parsed = if is_json {
        loader::load_catalog_from_json(&contents)
    } else {
        loader::load_catalog_from_str(&contents)
    };
    parsed.map_err(|source| InputError::Load {
        path: path.to_path_buf(),
        source,
    })
}

/// Build an engine from the given paths.
pub fn load_engine(paths: &DataPaths) -> Result<ConflictEngine, InputError> {
    let catalog = if paths.catalogs.is_empty() {
        defaults::default_catalog()?
    } else {
        let sources = paths
            .catalogs
            .iter()
            .map(|p| load_catalog_file(p))
            .collect::<Result<Vec<_>, _>>()?;
        CatalogIndex::build(&sources)
    };

    let categories = match &paths.categories {
        Some(path) => read(path)?,
        None => defaults::CATEGORY_RULES.to_string(),
    };
    let group_texts: Vec<String> = if paths.groups.is_empty() {
        defaults::GROUP_SOURCES.iter().map(|s| s.to_string()).collect()
    } else {
        paths
            .groups
            .iter()
            .map(|p| read(p))
            .collect::<Result<_, _>>()?
    };
    let group_refs: Vec<&str> = group_texts.iter().map(String::as_str).collect();
    let rules_origin = paths
        .categories
        .clone()
        .or_else(|| paths.groups.first().cloned())
        .unwrap_or_else(|| PathBuf::from("<bundled rules>"));
    let rules = loader::load_rule_table(&categories, &group_refs).map_err(|source| {
        InputError::Load {
            path: rules_origin,
            source,
        }
    })?;

    let config = match &paths.config {
        Some(path) => EngineConfig::from_ron_str(&read(path)?).map_err(|source| {
            InputError::Config {
                path: path.clone(),
                source,
            }
        })?,
        None => EngineConfig::default(),
    };

    Ok(ConflictEngine::new(Arc::new(catalog), Arc::new(rules), config))
}

/// Write a report as pretty JSON, creating parent directories.
pub fn save_report(path: &Path, report: &Report) -> std::io::Result<()> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    let json = report.to_json().map_err(std::io::Error::other)?;
    std::fs::write(path, json)
}
