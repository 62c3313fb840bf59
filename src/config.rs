//! Chart configuration, loadable from a TOML file.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::chart::legend::LegendConfig;
use crate::layout::LayoutConfig;
use crate::render::colors::PaletteOverflow;
use crate::render::label::LabelConfig;
use crate::ui::tooltip::TooltipConfig;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid config: {0}")]
    Parse(#[from] toml::de::Error),
}

/// Everything that shapes the rendered chart. Missing fields use the defaults.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ChartConfig {
    pub title: String,
    pub description: String,
    pub treemap: LayoutConfig,
    pub labels: LabelConfig,
    pub legend: LegendConfig,
    pub tooltip: TooltipConfig,
    pub palette_overflow: PaletteOverflow,
}

impl Default for ChartConfig {
    fn default() -> Self {
        Self {
            title: "Video Game Sales".to_string(),
            description: "Top 100 Most Sold Video Games Grouped by Platform".to_string(),
            treemap: LayoutConfig::default(),
            labels: LabelConfig::default(),
            legend: LegendConfig::default(),
            tooltip: TooltipConfig::default(),
            palette_overflow: PaletteOverflow::default(),
        }
    }
}

impl ChartConfig {
    pub fn from_toml_str(text: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(text)?)
    }

    pub fn load_path(path: &Path) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let config = Self::from_toml_str(&text)?;
        tracing::info!("Loaded config from {}", path.display());
        Ok(config)
    }

    /// Config from `path`, or the defaults when none is given.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        match path {
            Some(path) => Self::load_path(path),
            None => Ok(Self::default()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layout::TileMethod;

    #[test]
    fn empty_file_gives_defaults() {
        assert_eq!(ChartConfig::from_toml_str("").unwrap(), ChartConfig::default());
    }

    #[test]
    fn partial_sections_keep_other_defaults() {
        let config = ChartConfig::from_toml_str(
            r#"
            title = "Kickstarter Pledges"
            palette_overflow = "neutral"

            [treemap]
            width = 1200.0
            tile = "binary"

            [legend]
            width = 900.0
            "#,
        )
        .unwrap();

        assert_eq!(config.title, "Kickstarter Pledges");
        assert_eq!(config.palette_overflow, PaletteOverflow::Neutral);
        assert_eq!(config.treemap.width, 1200.0);
        assert_eq!(config.treemap.height, 570.0);
        assert_eq!(config.treemap.tile, TileMethod::Binary);
        assert_eq!(config.legend.width, 900.0);
        assert_eq!(config.legend.columns(), 6);
        assert_eq!(config.tooltip.offset_y, -28.0);
        assert_eq!(config.labels.first_baseline, 13.0);
    }

    #[test]
    fn rejects_unknown_enum_values() {
        let err = ChartConfig::from_toml_str("[treemap]\ntile = \"spiral\"").unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }

    #[test]
    fn missing_file_reports_path() {
        let err = ChartConfig::load(Some(Path::new("/nonexistent/chart.toml"))).unwrap_err();
        assert!(err.to_string().contains("/nonexistent/chart.toml"));
    }

    #[test]
    fn no_path_means_defaults() {
        assert_eq!(ChartConfig::load(None).unwrap(), ChartConfig::default());
    }
}
