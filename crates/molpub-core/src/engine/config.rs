use super::score::ScoreMethod;
use crate::core::models::metric::{ParseMetricError, SimilarityMetric};
use crate::core::models::model::{ModelType, ParseModelTypeError};
use serde::Deserialize;
use std::fmt;
use std::path::Path;
use std::str::FromStr;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Missing required parameter: {0}")]
    MissingParameter(&'static str),
    #[error("File I/O error for '{path}': {source}")]
    Io {
        path: String,
        source: std::io::Error,
    },
    #[error("TOML parsing error for '{path}': {source}")]
    Toml {
        path: String,
        source: toml::de::Error,
    },
    #[error("Invalid value for '{parameter}': {reason}")]
    InvalidValue {
        parameter: &'static str,
        reason: String,
    },
    #[error(transparent)]
    Metric(#[from] ParseMetricError),
    #[error(transparent)]
    Model(#[from] ParseModelTypeError),
    #[error(transparent)]
    Merge(#[from] ParseMergeTypeError),
}

/// How a structure joins existing clusters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MergeType {
    /// Similar to every member of a cluster.
    #[default]
    All,
    /// Similar to at least one member of a cluster.
    Any,
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("Unknown merge type: '{0}' (expected 'all' or 'any')")]
pub struct ParseMergeTypeError(pub String);

impl FromStr for MergeType {
    type Err = ParseMergeTypeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "all" => Ok(MergeType::All),
            "any" => Ok(MergeType::Any),
            _ => Err(ParseMergeTypeError(s.to_string())),
        }
    }
}

impl fmt::Display for MergeType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            MergeType::All => "all",
            MergeType::Any => "any",
        })
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ClusterConfig {
    pub method: ScoreMethod,
    pub use_center: bool,
    /// `None` defers to the method's default threshold.
    pub threshold: Option<f64>,
    pub merge: MergeType,
}

impl ClusterConfig {
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::Io {
            path: path.to_string_lossy().to_string(),
            source: e,
        })?;
        let file: FileClusterConfig = toml::from_str(&content).map_err(|e| ConfigError::Toml {
            path: path.to_string_lossy().to_string(),
            source: e,
        })?;
        Self::try_from(file)
    }
}

#[derive(Default)]
pub struct ClusterConfigBuilder {
    method: Option<ScoreMethod>,
    use_center: Option<bool>,
    threshold: Option<f64>,
    merge: Option<MergeType>,
}

impl ClusterConfigBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn method(mut self, method: ScoreMethod) -> Self {
        self.method = Some(method);
        self
    }
    pub fn use_center(mut self, use_center: bool) -> Self {
        self.use_center = Some(use_center);
        self
    }
    pub fn threshold(mut self, threshold: f64) -> Self {
        self.threshold = Some(threshold);
        self
    }
    pub fn merge(mut self, merge: MergeType) -> Self {
        self.merge = Some(merge);
        self
    }

    pub fn build(self) -> Result<ClusterConfig, ConfigError> {
        let method = self.method.ok_or(ConfigError::MissingParameter("method"))?;
        if method.metric() == SimilarityMetric::Rmsd && self.threshold.is_none() {
            return Err(ConfigError::MissingParameter("threshold"));
        }
        if let Some(threshold) = self.threshold {
            if !threshold.is_finite() {
                return Err(ConfigError::InvalidValue {
                    parameter: "threshold",
                    reason: format!("{threshold} is not a finite number"),
                });
            }
        }

        Ok(ClusterConfig {
            method,
            use_center: self.use_center.unwrap_or(true),
            threshold: self.threshold,
            merge: self.merge.unwrap_or_default(),
        })
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "kebab-case", deny_unknown_fields)]
struct FileClusterConfig {
    metric: String,
    model: String,
    #[serde(default = "default_use_center")]
    use_center: bool,
    threshold: Option<f64>,
    #[serde(default)]
    merge: MergeType,
}

fn default_use_center() -> bool {
    true
}

impl TryFrom<FileClusterConfig> for ClusterConfig {
    type Error = ConfigError;

    fn try_from(file: FileClusterConfig) -> Result<Self, Self::Error> {
        let metric: SimilarityMetric = file.metric.parse()?;
        let model: ModelType = file.model.parse()?;
        let method = ScoreMethod::new(metric, model).map_err(|e| ConfigError::InvalidValue {
            parameter: "model",
            reason: e.to_string(),
        })?;

        let mut builder = ClusterConfigBuilder::new()
            .method(method)
            .use_center(file.use_center)
            .merge(file.merge);
        if let Some(threshold) = file.threshold {
            builder = builder.threshold(threshold);
        }
        builder.build()
    }
}
