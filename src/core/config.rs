// src/core/config.rs

use crate::core::common::TaskTreeError;
use crate::core::indexing::kdtree::DimensionWeights;
use crate::core::storage::{InMemoryTaskStore, JsonFileTaskStore, TaskStore};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Number of best matches returned when the caller does not ask for a limit.
pub const DEFAULT_BEST_MATCH_LIMIT: usize = 10;

/// Name of the task file inside `data_dir` for the JSON file backend.
pub const DATA_FILE_NAME: &str = "tasks.json";

/// Which `TaskStore` implementation to open.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StorageBackend {
    Memory,
    #[default]
    JsonFile,
}

/// Configuration for the task index.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct Config {
    pub data_dir: PathBuf,
    pub storage: StorageBackend,
    pub best_match_limit: usize,
    pub weights: DimensionWeights,
}

/// Fluent builder for [`Config`].
#[derive(Debug, Clone, Default)]
pub struct ConfigBuilder {
    data_dir: Option<PathBuf>,
    storage: Option<StorageBackend>,
    best_match_limit: Option<usize>,
    weights: Option<DimensionWeights>,
}

impl ConfigBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the data directory
    pub fn data_dir<P: Into<PathBuf>>(mut self, path: P) -> Self {
        self.data_dir = Some(path.into());
        self
    }

    /// Sets the storage backend
    pub fn storage(mut self, backend: StorageBackend) -> Self {
        self.storage = Some(backend);
        self
    }

    /// Sets the default number of best matches
    pub fn best_match_limit(mut self, limit: usize) -> Self {
        self.best_match_limit = Some(limit);
        self
    }

    /// Sets the best-match metric weights
    pub fn weights(mut self, weights: DimensionWeights) -> Self {
        self.weights = Some(weights);
        self
    }

    /// Builds the Config instance with validation
    pub fn build(self) -> Result<Config, TaskTreeError> {
        let defaults = Config::default();
        let config = Config {
            data_dir: self.data_dir.unwrap_or(defaults.data_dir),
            storage: self.storage.unwrap_or(defaults.storage),
            best_match_limit: self.best_match_limit.unwrap_or(defaults.best_match_limit),
            weights: self.weights.unwrap_or(defaults.weights),
        };
        config.validate()?;
        Ok(config)
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            data_dir: PathBuf::from("data"),
            storage: StorageBackend::default(),
            best_match_limit: DEFAULT_BEST_MATCH_LIMIT,
            weights: DimensionWeights::default(),
        }
    }
}

impl Config {
    pub fn builder() -> ConfigBuilder {
        ConfigBuilder::new()
    }

    /// Validates the configuration
    pub fn validate(&self) -> Result<(), TaskTreeError> {
        if self.best_match_limit == 0 {
            return Err(TaskTreeError::configuration(
                "best_match_limit must be greater than 0",
            ));
        }

        let w = &self.weights;
        let all = [("time", w.time), ("mood", w.mood), ("energy", w.energy), ("distance", w.distance)];
        if let Some((name, value)) = all.iter().find(|(_, v)| !v.is_finite() || *v < 0.0) {
            return Err(TaskTreeError::configuration(format!(
                "weights.{name} must be a finite, non-negative number, got {value}"
            )));
        }
        if all.iter().all(|(_, v)| *v == 0.0) {
            return Err(TaskTreeError::configuration("at least one weight must be positive"));
        }

        if self.storage == StorageBackend::JsonFile && self.data_dir.as_os_str().is_empty() {
            return Err(TaskTreeError::configuration(
                "data_dir must be set for the json_file backend",
            ));
        }

        Ok(())
    }

    /// Loads configuration from a TOML file.
    ///
    /// # Errors
    ///
    /// Returns `TaskTreeError::Configuration` if the file cannot be parsed or
    /// fails validation. A missing file yields the default configuration.
    pub fn load_from_file(path: &Path) -> Result<Self, TaskTreeError> {
        match fs::read_to_string(path) {
            Ok(contents) => {
                let config: Self = toml::from_str(&contents).map_err(|e| {
                    TaskTreeError::configuration(format!(
                        "Failed to parse config file '{}': {}",
                        path.display(),
                        e
                    ))
                })?;
                config.validate()?;
                Ok(config)
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(Self::default()),
            Err(e) => Err(TaskTreeError::Io(e)),
        }
    }

    /// Loads from `optional_path` if given, otherwise returns the default.
    pub fn load_or_default(optional_path: Option<&Path>) -> Result<Self, TaskTreeError> {
        match optional_path {
            Some(path) => Self::load_from_file(path),
            None => Ok(Self::default()),
        }
    }

    /// Path of the JSON task file.
    pub fn data_file(&self) -> PathBuf {
        self.data_dir.join(DATA_FILE_NAME)
    }

    /// Opens the configured storage backend.
    pub fn open_store(&self) -> Result<Box<dyn TaskStore>, TaskTreeError> {
        Ok(match self.storage {
            StorageBackend::Memory => Box::new(InMemoryTaskStore::new()),
            StorageBackend::JsonFile => Box::new(JsonFileTaskStore::open(self.data_file())?),
        })
    }

    /// Configuration for tests: in-memory storage, default weights.
    pub fn for_testing() -> Self {
        Self { storage: StorageBackend::Memory, ..Self::default() }
    }
}
