//! Top-level configuration and TOML loading.

use std::path::Path;

use serde::{Deserialize, Serialize};

use super::{ImpactConfig, LayoutConfig, ResolutionConfig, ScanConfig};
use crate::constants::CONFIG_FILE_NAMES;
use crate::errors::ConfigError;

/// Configuration for one analysis run.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct StagemapConfig {
    pub scan: ScanConfig,
    pub resolution: ResolutionConfig,
    pub impact: ImpactConfig,
    pub layout: LayoutConfig,
}

impl StagemapConfig {
    /// Parse and validate a TOML document.
    pub fn from_toml_str(s: &str) -> Result<Self, ConfigError> {
        Self::parse(s, "<inline>")
    }

    /// Load and validate a specific config file.
    pub fn load_from_file(path: &Path) -> Result<Self, ConfigError> {
        let display = path.display().to_string();
        if !path.is_file() {
            return Err(ConfigError::FileNotFound { path: display });
        }
        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::ParseError {
            path: display.clone(),
            message: e.to_string(),
        })?;
        Self::parse(&content, &display)
    }

    /// Load `stagemap.toml` / `.stagemap.toml` from `root`, or defaults when
    /// neither exists.
    pub fn load(root: &Path) -> Result<Self, ConfigError> {
        for name in CONFIG_FILE_NAMES {
            let candidate = root.join(name);
            if candidate.is_file() {
                tracing::debug!(path = %candidate.display(), "loading config");
                return Self::load_from_file(&candidate);
            }
        }
        Ok(Self::default())
    }

    fn parse(content: &str, path: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(content).map_err(|e| ConfigError::ParseError {
            path: path.to_string(),
            message: e.to_string(),
        })?;
        config.validate()?;
        Ok(config)
    }

    /// Reject values the engine cannot honour.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let layout = &self.layout;
        if layout.max_nodes_per_column == 0 {
            return Err(invalid("layout.max_nodes_per_column", "must be at least 1"));
        }
        if layout.max_columns_per_group == 0 {
            return Err(invalid("layout.max_columns_per_group", "must be at least 1"));
        }
        let sizes = [
            ("layout.base_column_width", layout.base_column_width),
            ("layout.column_width_per_node", layout.column_width_per_node),
            ("layout.max_column_width", layout.max_column_width),
            ("layout.group_gap", layout.group_gap),
            ("layout.band_height", layout.band_height),
            ("layout.band_gap", layout.band_gap),
            ("layout.top_margin", layout.top_margin),
            ("layout.left_margin", layout.left_margin),
            ("layout.min_node_spacing", layout.min_node_spacing),
        ];
        for (field, value) in sizes {
            if !value.is_finite() || value < 0.0 {
                return Err(ConfigError::InvalidValue {
                    field: field.to_string(),
                    message: format!("must be a finite non-negative number, got {value}"),
                });
            }
        }
        if layout.max_column_width < layout.base_column_width {
            return Err(invalid(
                "layout.max_column_width",
                "must not be smaller than layout.base_column_width",
            ));
        }

        let thresholds = &self.impact.thresholds;
        if thresholds.medium_above > thresholds.high_above {
            return Err(invalid(
                "impact.thresholds",
                "medium_above must not exceed high_above",
            ));
        }
        if self.impact.cache_capacity == 0 {
            return Err(invalid("impact.cache_capacity", "must be at least 1"));
        }

        if self.scan.group_depth == Some(0) {
            return Err(invalid("scan.group_depth", "must be at least 1"));
        }
        Ok(())
    }
}

fn invalid(field: &str, message: &str) -> ConfigError {
    ConfigError::ValidationFailed {
        field: field.to_string(),
        message: message.to_string(),
    }
}
