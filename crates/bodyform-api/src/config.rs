//! Service configuration.

use std::path::{Path, PathBuf};

use bodyform_anthro::{AggregationEngine, AveragingPolicy, MeasurementExtractor, DEFAULT_MIN_MODEL_HEIGHT};
use bodyform_core::{Error, LandmarkTable, Result};
use bodyform_plan::{ExerciseCatalog, RuleSet, DEFAULT_LIGHT_SESSION_LEN};
use serde::{Deserialize, Serialize};

const ENV_PREFIX: &str = "BODYFORM";

/// Complete service configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ServiceConfig {
    /// Measurement extraction
    pub analysis: AnalysisConfig,

    /// Subject-level averaging
    pub aggregation: AggregationConfig,

    /// Plan synthesis
    pub plan: PlanConfig,

    /// Log output
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AnalysisConfig {
    /// Landmark table used to read incoming poses
    pub landmark_table_version: u32,

    /// Model heights at or below this are rejected as degenerate
    pub min_model_height: f64,

    /// Centre and flip poses before measuring
    pub normalize_pose: bool,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AggregationConfig {
    pub policy: AveragingPolicy,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PlanConfig {
    /// Exercises kept on light days
    pub light_session_len: usize,

    /// JSON exercise catalog; the built-in catalog when unset
    pub catalog_path: Option<PathBuf>,

    /// Priority rules, heaviest first after evaluation
    pub rules: RuleSet,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// `EnvFilter` directive used when `RUST_LOG` is unset
    pub filter: String,
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            landmark_table_version: LandmarkTable::current().version(),
            min_model_height: DEFAULT_MIN_MODEL_HEIGHT,
            normalize_pose: true,
        }
    }
}

impl Default for PlanConfig {
    fn default() -> Self {
        Self {
            light_session_len: DEFAULT_LIGHT_SESSION_LEN,
            catalog_path: None,
            rules: RuleSet::default(),
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            filter: "info".to_string(),
        }
    }
}

impl ServiceConfig {
    /// Load configuration from file, overridden by `BODYFORM__*` variables
    pub fn from_file(path: &str) -> Result<Self> {
        let settings = config::Config::builder()
            .add_source(config::File::with_name(path))
            .add_source(environment())
            .build()
            .map_err(config_error)?;

        let config: Self = settings.try_deserialize().map_err(config_error)?;
        config.validate()?;
        Ok(config)
    }

    /// Load from environment variables
    pub fn from_env() -> Result<Self> {
        let settings = config::Config::builder()
            .add_source(environment())
            .build()
            .map_err(config_error)?;

        let config: Self = settings.try_deserialize().map_err(config_error)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        if LandmarkTable::by_version(self.analysis.landmark_table_version).is_none() {
            return Err(Error::Config(format!(
                "unknown landmark table version {}",
                self.analysis.landmark_table_version
            )));
        }
        if !self.analysis.min_model_height.is_finite() || self.analysis.min_model_height < 0.0 {
            return Err(Error::Config(format!(
                "min_model_height must be a non-negative number, got {}",
                self.analysis.min_model_height
            )));
        }
        if self.plan.light_session_len == 0 {
            return Err(Error::Config("light_session_len must be at least 1".to_string()));
        }
        Ok(())
    }

    pub fn extractor(&self) -> Result<MeasurementExtractor> {
        let table = LandmarkTable::by_version(self.analysis.landmark_table_version).ok_or_else(|| {
            Error::Config(format!(
                "unknown landmark table version {}",
                self.analysis.landmark_table_version
            ))
        })?;
        Ok(MeasurementExtractor::new(table).with_min_model_height(self.analysis.min_model_height))
    }

    pub fn aggregation_engine(&self) -> AggregationEngine {
        AggregationEngine::new(self.aggregation.policy)
    }

    /// Configured catalog, read from `plan.catalog_path` when set
    pub fn catalog(&self) -> Result<ExerciseCatalog> {
        match &self.plan.catalog_path {
            Some(path) => load_catalog(path),
            None => Ok(ExerciseCatalog::default()),
        }
    }
}

fn environment() -> config::Environment {
    config::Environment::with_prefix(ENV_PREFIX)
        .prefix_separator("__")
        .separator("__")
        .try_parsing(true)
}

fn load_catalog(path: &Path) -> Result<ExerciseCatalog> {
    let json = std::fs::read_to_string(path)
        .map_err(|e| Error::Config(format!("cannot read catalog {}: {}", path.display(), e)))?;
    ExerciseCatalog::from_json(&json)
}

fn config_error(e: config::ConfigError) -> Error {
    Error::Config(e.to_string())
}
